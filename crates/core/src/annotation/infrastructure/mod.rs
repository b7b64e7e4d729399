#[cfg(feature = "opencv")]
pub mod opencv_annotator;
