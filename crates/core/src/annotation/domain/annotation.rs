use std::fmt;

use crate::shared::constants::LABEL_OFFSET_Y;
use crate::shared::region::Region;

/// Text drawn above a face: `"{gender}, {age}, {emotion}"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceLabel<'a> {
    pub gender: &'a str,
    pub age: &'a str,
    pub emotion: &'a str,
}

impl fmt::Display for FaceLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.gender, self.age, self.emotion)
    }
}

/// Everything needed to draw one face onto a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub top_left: (i32, i32),
    pub bottom_right: (i32, i32),
    pub label: String,
    /// Bottom-left corner of the label text.
    pub label_origin: (i32, i32),
}

impl Annotation {
    /// Box and label for `region`, after moving its origin inside the frame.
    pub fn for_region(region: &Region, label: &FaceLabel<'_>) -> Self {
        let clamped = region.clamp_origin();
        let top_left = clamped.top_left();
        Self {
            top_left,
            bottom_right: clamped.bottom_right(),
            label: label.to_string(),
            label_origin: (top_left.0, top_left.1 - LABEL_OFFSET_Y),
        }
    }
}
