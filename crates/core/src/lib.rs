//! Face analysis and age/gender annotation for live camera frames.
//!
//! Each bounded context follows the same split: `domain` holds traits and
//! pure logic, `infrastructure` holds the ONNX Runtime and OpenCV backends.
//! OpenCV-backed adapters are compiled only with the `opencv` feature.
pub mod analysis;
pub mod annotation;
pub mod capture;
pub mod classification;
pub mod display;
pub mod pipeline;
pub mod shared;
