use ndarray::{Array3, Array4, ArrayView3};

use crate::shared::constants::{BLOB_MEAN, BLOB_SIZE};
use crate::shared::frame::Frame;
use crate::shared::region::CropRect;

/// Normalized `1 x 3 x 227 x 227` classifier input.
///
/// Built from a face crop by bilinear resize back to 8-bit pixels and
/// per-channel mean subtraction. Channel order is the frame's own: a BGR
/// crop yields a BGR blob.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    tensor: Array4<f32>,
}

impl Blob {
    /// Build the age/gender blob for `rect` of `frame`.
    pub fn from_crop(frame: &Frame, rect: &CropRect) -> Self {
        Self::from_pixels(frame.crop(rect), BLOB_SIZE, BLOB_MEAN)
    }

    /// Resize `pixels` (HWC, 3 channels) to `size` x `size` and subtract `mean`.
    ///
    /// Resized samples are rounded and saturated to `u8` before the mean is
    /// subtracted, as an 8-bit image resize would store them.
    pub fn from_pixels(pixels: ArrayView3<'_, u8>, size: usize, mean: [f32; 3]) -> Self {
        let resized = resize_bilinear(pixels, size, size);
        let mut tensor = Array4::<f32>::zeros((1, 3, size, size));
        for y in 0..size {
            for x in 0..size {
                for c in 0..3 {
                    let pixel = resized[[y, x, c]].round().clamp(0.0, 255.0);
                    tensor[[0, c, y, x]] = pixel - mean[c];
                }
            }
        }
        Self { tensor }
    }

    /// Wrap an NCHW tensor produced by another backend.
    pub fn from_tensor(tensor: Array4<f32>) -> Self {
        let tensor = if tensor.is_standard_layout() {
            tensor
        } else {
            tensor.as_standard_layout().into_owned()
        };
        Self { tensor }
    }

    pub fn tensor(&self) -> &Array4<f32> {
        &self.tensor
    }

    pub fn shape(&self) -> &[usize] {
        self.tensor.shape()
    }

    /// Contiguous NCHW values.
    pub fn values(&self) -> &[f32] {
        self.tensor
            .as_slice()
            .expect("Blob tensor is always in standard layout")
    }
}

/// Bilinear resize with half-pixel centres, edge pixels replicated.
///
/// Input is HWC `u8`; output is HWC `f32` with the same channel count.
pub fn resize_bilinear(src: ArrayView3<'_, u8>, out_w: usize, out_h: usize) -> Array3<f32> {
    let (src_h, src_w, channels) = src.dim();
    let mut out = Array3::<f32>::zeros((out_h, out_w, channels));
    if src_h == 0 || src_w == 0 {
        return out;
    }

    let scale_x = src_w as f32 / out_w as f32;
    let scale_y = src_h as f32 / out_h as f32;

    for y in 0..out_h {
        let (y0, y1, fy) = sample_axis(y, scale_y, src_h);
        for x in 0..out_w {
            let (x0, x1, fx) = sample_axis(x, scale_x, src_w);
            for c in 0..channels {
                let top = src[[y0, x0, c]] as f32 * (1.0 - fx) + src[[y0, x1, c]] as f32 * fx;
                let bottom = src[[y1, x0, c]] as f32 * (1.0 - fx) + src[[y1, x1, c]] as f32 * fx;
                out[[y, x, c]] = top * (1.0 - fy) + bottom * fy;
            }
        }
    }
    out
}

/// Source indices and blend weight for output coordinate `dst`.
fn sample_axis(dst: usize, scale: f32, len: usize) -> (usize, usize, f32) {
    let pos = ((dst as f32 + 0.5) * scale - 0.5).max(0.0);
    let i0 = (pos.floor() as usize).min(len - 1);
    let i1 = (i0 + 1).min(len - 1);
    let frac = if i0 == i1 { 0.0 } else { pos - i0 as f32 };
    (i0, i1, frac)
}
