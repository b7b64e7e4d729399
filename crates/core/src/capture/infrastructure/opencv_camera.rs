use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;
use crate::shared::mat_interop::mat_to_frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("could not open camera {index}")]
    OpenFailed { index: i32 },
}

/// Webcam capture through OpenCV's `videoio` backend.
///
/// The device is released on [`FrameSource::release`] or when dropped.
pub struct OpencvCameraSource {
    capture: VideoCapture,
    camera_index: i32,
    next_index: usize,
    released: bool,
}

// Safety: the capture handle is owned by one pipeline and only used from
// the thread running it.
unsafe impl Send for OpencvCameraSource {}

impl OpencvCameraSource {
    pub fn open(camera_index: i32) -> Result<Self, Box<dyn std::error::Error>> {
        let capture = VideoCapture::new(camera_index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(CaptureError::OpenFailed {
                index: camera_index,
            }
            .into());
        }
        log::info!("Opened camera {camera_index}");
        Ok(Self {
            capture,
            camera_index,
            next_index: 0,
            released: false,
        })
    }
}

impl FrameSource for OpencvCameraSource {
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let mut mat = Mat::default();
        if !self.capture.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        let frame = mat_to_frame(&mat, self.next_index)?;
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera {}: {e}", self.camera_index);
        } else {
            log::debug!("Released camera {}", self.camera_index);
        }
    }
}

impl Drop for OpencvCameraSource {
    fn drop(&mut self) {
        self.release();
    }
}
