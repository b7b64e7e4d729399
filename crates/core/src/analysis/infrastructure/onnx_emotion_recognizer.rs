/// FER+ emotion recognizer using ONNX Runtime via `ort`.
///
/// The model takes a 64x64 grayscale face with raw 0-255 intensities and
/// emits one score per emotion class.
use std::path::Path;

use ndarray::{Array4, ArrayView3};

use crate::analysis::domain::emotion::{dominant_emotion, EMOTION_LABELS};
use crate::analysis::domain::emotion_recognizer::EmotionRecognizer;
use crate::analysis::domain::face_analyzer::AnalysisError;
use crate::analysis::infrastructure::session::load_session;
use crate::classification::domain::blob::resize_bilinear;
use crate::shared::frame::Frame;
use crate::shared::region::CropRect;

const INPUT_SIZE: usize = 64;

pub struct OnnxEmotionRecognizer {
    session: ort::session::Session,
}

impl OnnxEmotionRecognizer {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            session: load_session(model_path)?,
        })
    }
}

impl EmotionRecognizer for OnnxEmotionRecognizer {
    fn recognize(
        &mut self,
        frame: &Frame,
        face: &CropRect,
    ) -> Result<&'static str, Box<dyn std::error::Error>> {
        let input = preprocess(frame.crop(face));
        let input_value = ort::value::Tensor::from_array(input)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        let scores = outputs[0].try_extract_array::<f32>()?;
        let scores = scores.as_slice().ok_or("Cannot get emotion score slice")?;

        dominant_emotion(scores).ok_or_else(|| {
            AnalysisError::UnexpectedOutput {
                model: "emotion recognizer",
                detail: format!(
                    "{} scores for {} classes",
                    scores.len(),
                    EMOTION_LABELS.len()
                ),
            }
            .into()
        })
    }
}

/// Resize an RGB crop to 64x64 and convert it to luma, NCHW `[1, 1, 64, 64]`.
fn preprocess(rgb: ArrayView3<'_, u8>) -> Array4<f32> {
    let resized = resize_bilinear(rgb, INPUT_SIZE, INPUT_SIZE);
    let mut tensor = Array4::<f32>::zeros((1, 1, INPUT_SIZE, INPUT_SIZE));
    for y in 0..INPUT_SIZE {
        for x in 0..INPUT_SIZE {
            tensor[[0, 0, y, x]] = 0.299 * resized[[y, x, 0]]
                + 0.587 * resized[[y, x, 1]]
                + 0.114 * resized[[y, x, 2]];
        }
    }
    tensor
}
