use thiserror::Error;

use crate::shared::constants::UNKNOWN_EMOTION;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// One detected face and the emotion the analyzer read from it.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceAnalysis {
    pub region: Region,
    pub dominant_emotion: Option<String>,
}

impl FaceAnalysis {
    pub fn new(region: Region, dominant_emotion: impl Into<String>) -> Self {
        Self {
            region,
            dominant_emotion: Some(dominant_emotion.into()),
        }
    }

    /// Emotion text for the label, falling back to a placeholder.
    pub fn emotion_label(&self) -> &str {
        self.dominant_emotion.as_deref().unwrap_or(UNKNOWN_EMOTION)
    }
}

/// How the analyzer behaves when no face is confidently found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectionMode {
    /// Fail with [`AnalysisError::NoFaceDetected`].
    Strict,
    /// Fall back to analysing the whole frame as a single face.
    #[default]
    Permissive,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no face detected in frame {frame_index}")]
    NoFaceDetected { frame_index: usize },
    #[error("unexpected {model} output: {detail}")]
    UnexpectedOutput { model: &'static str, detail: String },
}

/// Face detection plus emotion recognition on one RGB frame.
///
/// Implementations may keep inference sessions that need `&mut self`.
pub trait FaceAnalyzer: Send {
    fn analyze(&mut self, frame: &Frame) -> Result<Vec<FaceAnalysis>, Box<dyn std::error::Error>>;
}
