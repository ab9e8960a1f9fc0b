/// Halftone conversion engine.
///
/// Reduces RGBA frames to luminance and renders them as Bayer-dithered
/// white / gray / black blocks.
pub mod dither;
pub mod luminance;

pub use dither::{BlockStats, render, render_parallel, render_with_stats};
pub use luminance::to_gray;
