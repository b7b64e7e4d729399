use crate::annotation::domain::annotation::Annotation;
use crate::shared::frame::Frame;

/// Draws face annotations onto a BGR frame in place.
pub trait FrameAnnotator: Send {
    /// Draw every annotation of one frame and return how many were drawn.
    ///
    /// An annotation that fails to draw is logged and skipped; `Err` means
    /// nothing could be drawn on the frame.
    fn annotate(
        &self,
        frame: &mut Frame,
        annotations: &[Annotation],
    ) -> Result<usize, Box<dyn std::error::Error>>;
}
