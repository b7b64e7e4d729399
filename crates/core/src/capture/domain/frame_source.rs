use crate::shared::frame::Frame;

/// A live source of BGR frames, such as a webcam.
pub trait FrameSource: Send {
    /// Grab the next frame.
    ///
    /// `Ok(None)` means the device produced no frame; callers treat it as
    /// the end of the stream.
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Release the underlying device. Calling it more than once is harmless.
    fn release(&mut self);
}
