use ndarray::{s, ArrayView3, ArrayViewMut3};

use crate::shared::region::CropRect;

/// A single camera frame: contiguous 8-bit pixels in row-major order.
///
/// Frames arrive from the capture device in BGR order. [`Frame::to_rgb`]
/// produces the RGB copy handed to the face analyzer; everything else
/// (classifier crops, drawing, display) works on the BGR original.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Position of the frame in the capture sequence, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copy with the first and third channels swapped (BGR <-> RGB).
    pub fn to_rgb(&self) -> Frame {
        let mut data = self.data.clone();
        if self.channels >= 3 {
            for px in data.chunks_exact_mut(self.channels as usize) {
                px.swap(0, 2);
            }
        }
        Frame::new(data, self.width, self.height, self.channels, self.index)
    }

    /// View of the pixels inside `rect`, shape `(height, width, channels)`.
    ///
    /// `rect` must come from [`crate::shared::region::Region::crop_rect`]
    /// for this frame's dimensions.
    pub fn crop(&self, rect: &CropRect) -> ArrayView3<'_, u8> {
        let x = rect.x as usize;
        let y = rect.y as usize;
        self.as_ndarray().slice_move(s![
            y..y + rect.height as usize,
            x..x + rect.width as usize,
            ..
        ])
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
