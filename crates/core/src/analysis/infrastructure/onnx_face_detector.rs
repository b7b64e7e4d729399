/// YOLO face detector using ONNX Runtime via `ort`.
///
/// Letterboxes the RGB frame to the model's square input, keeps boxes above
/// the confidence threshold, and applies greedy NMS. Pose keypoints emitted
/// by the model are ignored.
use std::path::Path;

use crate::analysis::domain::face_analyzer::AnalysisError;
use crate::analysis::domain::face_detector::FaceDetector;
use crate::analysis::infrastructure::math::{nms, ScoredBox};
use crate::analysis::infrastructure::session::load_session;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Fallback input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold for face detection.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

const NMS_IOU_THRESH: f64 = 0.45;

/// Letterbox padding value (YOLO convention).
const PAD_VALUE: f32 = 114.0 / 255.0;

pub struct OnnxFaceDetector {
    session: ort::session::Session,
    confidence: f64,
    input_size: u32,
}

impl OnnxFaceDetector {
    /// Load a YOLO face model. The input size is read from its NCHW input
    /// shape, falling back to 640 for dynamic shapes.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            confidence,
            input_size,
        })
    }
}

impl FaceDetector for OnnxFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let (input_tensor, transform) = letterbox(frame, self.input_size);

        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err(unexpected("no outputs".to_string()));
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        if shape.len() != 3 {
            return Err(unexpected(format!("output shape {shape:?}")));
        }
        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        // [1, features, detections] when features < detections, else [1, detections, features]
        let transposed = shape[1] < shape[2];
        let (num_dets, num_feats) = if transposed {
            (shape[2], shape[1])
        } else {
            (shape[1], shape[2])
        };
        if num_feats < 5 {
            return Err(unexpected(format!("{num_feats} features per detection")));
        }

        let feature = |det: usize, f: usize| -> f64 {
            if transposed {
                data[f * num_dets + det] as f64
            } else {
                data[det * num_feats + f] as f64
            }
        };

        let mut candidates = Vec::new();
        for i in 0..num_dets {
            let conf = feature(i, 4);
            if conf < self.confidence {
                continue;
            }
            let (cx, cy, w, h) = (feature(i, 0), feature(i, 1), feature(i, 2), feature(i, 3));
            candidates.push(ScoredBox {
                bbox: transform.to_frame_coords([
                    cx - w / 2.0,
                    cy - h / 2.0,
                    cx + w / 2.0,
                    cy + h / 2.0,
                ]),
                confidence: conf,
            });
        }

        let kept = nms(candidates, NMS_IOU_THRESH);
        log::debug!("Frame {}: {} face(s) detected", frame.index(), kept.len());

        Ok(kept
            .iter()
            .filter_map(|b| to_region(&b.bbox, frame.width(), frame.height()))
            .collect())
    }
}

fn unexpected(detail: String) -> Box<dyn std::error::Error> {
    AnalysisError::UnexpectedOutput {
        model: "face detector",
        detail,
    }
    .into()
}

/// Clip a frame-space box to the frame and convert it to a region.
fn to_region(bbox: &[f64; 4], frame_w: u32, frame_h: u32) -> Option<Region> {
    let x1 = bbox[0].max(0.0);
    let y1 = bbox[1].max(0.0);
    let x2 = bbox[2].min(frame_w as f64);
    let y2 = bbox[3].min(frame_h as f64);
    let w = (x2 - x1) as i32;
    let h = (y2 - y1) as i32;
    if w <= 0 || h <= 0 {
        return None;
    }
    Some(Region::new(x1 as i32, y1 as i32, w, h))
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Maps model-space coordinates back to the original frame.
#[derive(Clone, Copy, Debug)]
struct LetterboxTransform {
    scale: f64,
    pad_x: u32,
    pad_y: u32,
}

impl LetterboxTransform {
    fn to_frame_coords(&self, b: [f64; 4]) -> [f64; 4] {
        let px = self.pad_x as f64;
        let py = self.pad_y as f64;
        [
            (b[0] - px) / self.scale,
            (b[1] - py) / self.scale,
            (b[2] - px) / self.scale,
            (b[3] - py) / self.scale,
        ]
    }
}

/// Letterbox-resize a frame into a `target_size` square NCHW tensor in [0, 1].
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, LetterboxTransform) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = ((fw * scale).round() as u32).min(target_size);
    let new_h = ((fh * scale).round() as u32).min(target_size);
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    let t = target_size as usize;
    let mut tensor = ndarray::Array4::<f32>::from_elem((1, 3, t, t), PAD_VALUE);

    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    // Nearest-neighbour resize into the padded area
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (
        tensor,
        LetterboxTransform {
            scale,
            pad_x,
            pad_y,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 -> 640: scale 3.2, content 640x320, pad_y 160
        let frame = Frame::new(vec![128u8; 200 * 100 * 3], 200, 100, 3, 0);
        let (tensor, lb) = letterbox(&frame, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert_relative_eq!(lb.scale, 3.2, epsilon = 1e-9);
        assert_eq!(lb.pad_x, 0);
        assert_eq!(lb.pad_y, 160);
    }

    #[test]
    fn test_letterbox_pixels_and_padding() {
        let frame = Frame::new(vec![255u8; 100 * 50 * 3], 100, 50, 3, 0);
        let (tensor, lb) = letterbox(&frame, 640);

        let y = lb.pad_y as usize + 1;
        assert_relative_eq!(tensor[[0, 0, y, 1]], 1.0, epsilon = 1e-6);
        assert_relative_eq!(tensor[[0, 0, 0, 0]], PAD_VALUE, epsilon = 1e-6);
    }

    #[test]
    fn test_to_frame_coords_inverts_letterbox() {
        let frame = Frame::new(vec![0u8; 200 * 100 * 3], 200, 100, 3, 0);
        let (_, lb) = letterbox(&frame, 640);
        // Frame box (50, 25)-(150, 75) maps to (160, 240)-(480, 400) in model space
        let b = lb.to_frame_coords([160.0, 240.0, 480.0, 400.0]);
        assert_relative_eq!(b[0], 50.0, epsilon = 1e-9);
        assert_relative_eq!(b[1], 25.0, epsilon = 1e-9);
        assert_relative_eq!(b[2], 150.0, epsilon = 1e-9);
        assert_relative_eq!(b[3], 75.0, epsilon = 1e-9);
    }

    #[test]
    fn test_to_region_clips_to_frame() {
        let r = to_region(&[-10.0, 5.0, 50.0, 500.0], 320, 240).unwrap();
        assert_eq!(r, Region::new(0, 5, 50, 235));
    }

    #[test]
    fn test_to_region_rejects_outside_box() {
        assert_eq!(to_region(&[400.0, 10.0, 450.0, 60.0], 320, 240), None);
    }
}
