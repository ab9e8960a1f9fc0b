/// PNG export of halftone canvases.

pub mod png;
