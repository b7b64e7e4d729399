pub mod age_gender_predictor;
pub mod blob;
pub mod blob_builder;
pub mod classifier;
pub mod labels;
