use crate::shared::frame::Frame;

/// Shows annotated frames and reports key presses.
pub trait FrameDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait up to `delay_ms` for a key press.
    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>>;

    /// Destroy any open windows. Calling it more than once is harmless.
    fn close(&mut self);
}
