pub mod annotation;
pub mod frame_annotator;
