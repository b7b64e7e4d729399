use opencv::core::{Mat, Point, Scalar};
use opencv::imgproc;

use crate::annotation::domain::annotation::Annotation;
use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::shared::constants::{
    ANNOTATION_COLOR, BOX_THICKNESS, LABEL_FONT_SCALE, LABEL_THICKNESS,
};
use crate::shared::frame::Frame;
use crate::shared::mat_interop::{copy_mat_into_frame, frame_to_mat};

/// Draws boxes and labels with OpenCV's `imgproc` primitives.
///
/// The frame is copied into a `Mat` once, every annotation is drawn, and
/// the result is copied back. OpenCV clips shapes and text that fall
/// outside the image.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpencvAnnotator;

impl OpencvAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl FrameAnnotator for OpencvAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        annotations: &[Annotation],
    ) -> Result<usize, Box<dyn std::error::Error>> {
        if annotations.is_empty() {
            return Ok(0);
        }

        let mut mat = frame_to_mat(frame)?;
        let mut drawn = 0;
        for annotation in annotations {
            match draw(&mut mat, annotation, BOX_THICKNESS) {
                Ok(()) => drawn += 1,
                Err(e) => log::warn!(
                    "Failed to draw '{}' in frame {}: {e}",
                    annotation.label,
                    frame.index()
                ),
            }
        }
        copy_mat_into_frame(&mat, frame)?;
        Ok(drawn)
    }
}

fn color() -> Scalar {
    let [b, g, r] = ANNOTATION_COLOR;
    Scalar::new(b as f64, g as f64, r as f64, 0.0)
}

/// Box corners are both inclusive: `bottom_right` is drawn, as with
/// `cv::rectangle(img, pt1, pt2, ...)`.
fn draw(mat: &mut Mat, annotation: &Annotation, box_thickness: i32) -> opencv::Result<()> {
    let (x1, y1) = annotation.top_left;
    let (x2, y2) = annotation.bottom_right;
    imgproc::rectangle_points(
        mat,
        Point::new(x1, y1),
        Point::new(x2, y2),
        color(),
        box_thickness,
        imgproc::LINE_8,
        0,
    )?;
    imgproc::put_text(
        mat,
        &annotation.label,
        Point::new(annotation.label_origin.0, annotation.label_origin.1),
        imgproc::FONT_HERSHEY_SIMPLEX,
        LABEL_FONT_SCALE,
        color(),
        LABEL_THICKNESS,
        imgproc::LINE_8,
        false,
    )
}
