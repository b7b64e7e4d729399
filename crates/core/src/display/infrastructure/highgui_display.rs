use opencv::highgui;

use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::frame::Frame;
use crate::shared::mat_interop::frame_to_mat;

/// A single OpenCV `highgui` window.
///
/// All windows are destroyed on [`FrameDisplay::close`] or when dropped.
pub struct HighguiDisplay {
    title: String,
    closed: bool,
}

impl HighguiDisplay {
    pub fn open(title: &str) -> Result<Self, Box<dyn std::error::Error>> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            title: title.to_string(),
            closed: false,
        })
    }
}

impl FrameDisplay for HighguiDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mat = frame_to_mat(frame)?;
        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(delay_ms)?;
        if key < 0 {
            return Ok(None);
        }
        Ok(char::from_u32((key & 0xFF) as u32))
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to destroy windows: {e}");
        }
    }
}

impl Drop for HighguiDisplay {
    fn drop(&mut self) {
        self.close();
    }
}
