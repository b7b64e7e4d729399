use crate::shared::frame::Frame;
use crate::shared::region::CropRect;

/// Domain interface for reading the dominant emotion of one face.
pub trait EmotionRecognizer: Send {
    /// Returns the emotion label for the pixels of `face` in an RGB `frame`.
    fn recognize(
        &mut self,
        frame: &Frame,
        face: &CropRect,
    ) -> Result<&'static str, Box<dyn std::error::Error>>;
}
