use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for locating faces in an RGB frame.
///
/// Implementations may hold inference sessions that need `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
