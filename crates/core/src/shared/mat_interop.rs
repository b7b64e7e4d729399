//! Copies between [`Frame`] buffers and OpenCV `Mat`s.
//!
//! Only 8-bit 3-channel images cross this boundary.
use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::prelude::*;

use crate::shared::frame::Frame;

/// Copy a frame's pixels into a freshly allocated `CV_8UC3` matrix.
pub fn frame_to_mat(frame: &Frame) -> Result<Mat, Box<dyn std::error::Error>> {
    if frame.channels() != 3 {
        return Err(format!("Expected a 3-channel frame, got {}", frame.channels()).into());
    }
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    Ok(mat)
}

/// Copy a `CV_8UC3` matrix into a new frame with the given sequence index.
pub fn mat_to_frame(mat: &Mat, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    if mat.typ() != CV_8UC3 {
        return Err(format!("Expected an 8-bit 3-channel image, got type {}", mat.typ()).into());
    }
    let continuous;
    let src = if mat.is_continuous() {
        mat
    } else {
        continuous = mat.try_clone()?;
        &continuous
    };
    let data = src.data_bytes()?.to_vec();
    Ok(Frame::new(
        data,
        src.cols() as u32,
        src.rows() as u32,
        3,
        index,
    ))
}

/// Overwrite `frame`'s pixels with those of a matrix of identical size.
pub fn copy_mat_into_frame(mat: &Mat, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = mat.data_bytes()?;
    if bytes.len() != frame.data().len() {
        return Err(format!(
            "Matrix holds {} bytes but frame holds {}",
            bytes.len(),
            frame.data().len()
        )
        .into());
    }
    frame.data_mut().copy_from_slice(bytes);
    Ok(())
}
