#[cfg(feature = "opencv")]
pub mod caffe_classifier;
pub mod model_files;
#[cfg(feature = "opencv")]
pub mod opencv_blob_builder;
