use crate::analysis::domain::emotion_recognizer::EmotionRecognizer;
use crate::analysis::domain::face_analyzer::{
    AnalysisError, DetectionMode, FaceAnalysis, FaceAnalyzer,
};
use crate::analysis::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Face analyzer built from a detector and a per-face emotion recognizer.
///
/// In [`DetectionMode::Permissive`] a frame without detections is analysed
/// as one face covering the whole frame, so callers always get a result.
pub struct FaceEmotionAnalyzer {
    detector: Box<dyn FaceDetector>,
    recognizer: Box<dyn EmotionRecognizer>,
    mode: DetectionMode,
}

impl FaceEmotionAnalyzer {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        recognizer: Box<dyn EmotionRecognizer>,
        mode: DetectionMode,
    ) -> Self {
        Self {
            detector,
            recognizer,
            mode,
        }
    }
}

impl FaceAnalyzer for FaceEmotionAnalyzer {
    fn analyze(&mut self, frame: &Frame) -> Result<Vec<FaceAnalysis>, Box<dyn std::error::Error>> {
        let (fw, fh) = (frame.width(), frame.height());

        let mut regions = self.detector.detect(frame)?;
        if regions.is_empty() {
            match self.mode {
                DetectionMode::Strict => {
                    return Err(AnalysisError::NoFaceDetected {
                        frame_index: frame.index(),
                    }
                    .into());
                }
                DetectionMode::Permissive => {
                    log::debug!("No face in frame {}, analysing whole frame", frame.index());
                    regions.push(Region::full_frame(fw, fh));
                }
            }
        }

        let mut faces = Vec::with_capacity(regions.len());
        for region in regions {
            let dominant_emotion = match region.crop_rect(fw, fh) {
                Some(rect) => Some(self.recognizer.recognize(frame, &rect)?.to_string()),
                None => None,
            };
            faces.push(FaceAnalysis {
                region,
                dominant_emotion,
            });
        }
        Ok(faces)
    }
}
