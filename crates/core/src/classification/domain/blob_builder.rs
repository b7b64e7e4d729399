use crate::classification::domain::blob::Blob;
use crate::shared::frame::Frame;
use crate::shared::region::CropRect;

/// Turns a face crop into the age/gender classifier input.
pub trait BlobBuilder: Send {
    fn build(&self, frame: &Frame, rect: &CropRect) -> Result<Blob, Box<dyn std::error::Error>>;
}

/// Pure-ndarray blob construction, see [`Blob::from_crop`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BilinearBlobBuilder;

impl BlobBuilder for BilinearBlobBuilder {
    fn build(&self, frame: &Frame, rect: &CropRect) -> Result<Blob, Box<dyn std::error::Error>> {
        Ok(Blob::from_crop(frame, rect))
    }
}
