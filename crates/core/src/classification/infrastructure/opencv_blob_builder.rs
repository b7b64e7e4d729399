use ndarray::Array4;
use opencv::core::{Scalar, Size, CV_32F};
use opencv::dnn;
use opencv::prelude::*;

use crate::classification::domain::blob::Blob;
use crate::classification::domain::blob_builder::BlobBuilder;
use crate::shared::constants::{BLOB_MEAN, BLOB_SIZE};
use crate::shared::frame::Frame;
use crate::shared::mat_interop::frame_to_mat;
use crate::shared::region::CropRect;

/// Builds blobs with `dnn::blob_from_image`: 8-bit `INTER_LINEAR` resize,
/// mean subtraction, no channel swap, no centre crop.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpencvBlobBuilder;

impl BlobBuilder for OpencvBlobBuilder {
    fn build(&self, frame: &Frame, rect: &CropRect) -> Result<Blob, Box<dyn std::error::Error>> {
        let crop = frame.crop(rect);
        let crop_frame = Frame::new(
            crop.iter().copied().collect(),
            rect.width,
            rect.height,
            frame.channels(),
            frame.index(),
        );
        let crop_mat = frame_to_mat(&crop_frame)?;

        let size = BLOB_SIZE as i32;
        let mean = Scalar::new(
            BLOB_MEAN[0] as f64,
            BLOB_MEAN[1] as f64,
            BLOB_MEAN[2] as f64,
            0.0,
        );
        let blob = dnn::blob_from_image(
            &crop_mat,
            1.0,
            Size::new(size, size),
            mean,
            false,
            false,
            CV_32F,
        )?;

        let values = blob.data_typed::<f32>()?.to_vec();
        let tensor = Array4::from_shape_vec((1, 3, BLOB_SIZE, BLOB_SIZE), values)?;
        Ok(Blob::from_tensor(tensor))
    }
}
