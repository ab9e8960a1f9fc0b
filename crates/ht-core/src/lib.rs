/// Configuration, types, and shared structures for halftone.
///
/// This crate contains the pixel buffers, the block tone enumeration, the
/// option set, and the error type shared across the halftone workspace.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;

pub use color::Tone;
pub use config::{DitherOptions, DitherOverrides, HalftoneConfig};
pub use error::CoreError;
pub use frame::{FrameBuffer, GrayGrid};
