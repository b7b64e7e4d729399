/// Axis-aligned face bounding box in frame coordinates, as reported by the
/// analyzer. May be degenerate or partly outside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Pixel rectangle guaranteed to lie inside a frame and to be non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width` x `height` frame.
    pub fn full_frame(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    pub fn has_positive_size(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Same region with its origin moved to `x, y >= 0`.
    ///
    /// Width and height are kept as given, so the far edges shift along
    /// with the origin.
    pub fn clamp_origin(&self) -> Region {
        Region {
            x: self.x.max(0),
            y: self.y.max(0),
            ..*self
        }
    }

    /// Pixels of a `frame_width` x `frame_height` frame covered by the
    /// origin-clamped region, truncated at the right and bottom edges.
    ///
    /// Returns `None` for non-positive sizes and for crops that end up empty.
    pub fn crop_rect(&self, frame_width: u32, frame_height: u32) -> Option<CropRect> {
        if !self.has_positive_size() {
            return None;
        }
        let clamped = self.clamp_origin();
        let x = clamped.x as i64;
        let y = clamped.y as i64;
        let w = (clamped.width as i64).min(frame_width as i64 - x);
        let h = (clamped.height as i64).min(frame_height as i64 - y);
        if w <= 0 || h <= 0 {
            return None;
        }
        Some(CropRect {
            x: x as u32,
            y: y as u32,
            width: w as u32,
            height: h as u32,
        })
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn bottom_right(&self) -> (i32, i32) {
        (
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        )
    }
}
