/// Image decoding for halftone.

pub mod image;
