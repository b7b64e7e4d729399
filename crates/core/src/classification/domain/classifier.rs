use thiserror::Error;

use crate::classification::domain::blob::Blob;

#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("classifier produced an empty output")]
    EmptyOutput,
    #[error("predicted class {index} is outside the {labels} known labels")]
    IndexOutOfRange { index: usize, labels: usize },
}

/// Domain interface for a single-output image classifier.
///
/// Returns the raw score vector for one blob. Backends bind the input
/// before running, hence `&mut self`.
pub trait Classifier: Send {
    fn predict(&mut self, blob: &Blob) -> Result<Vec<f32>, Box<dyn std::error::Error>>;
}
