pub mod constants;
pub mod frame;
#[cfg(feature = "opencv")]
pub mod mat_interop;
pub mod region;
