/// Couleur d'un bloc après classification.
///
/// Closed set: a block is painted white, black, or the configured mid-gray.
///
/// # Example
/// ```
/// use ht_core::color::Tone;
/// assert_eq!(Tone::White.rgba(), [255, 255, 255, 255]);
/// assert_eq!(Tone::Gray(128).rgba(), [128, 128, 128, 255]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Average above the threshold.
    White,
    /// Average inside the gray band, painted at the given intensity.
    Gray(u8),
    /// Average below the gray band.
    Black,
}

impl Tone {
    /// Opaque RGBA value painted for this tone.
    #[inline(always)]
    #[must_use]
    pub fn rgba(self) -> [u8; 4] {
        match self {
            Self::White => [255, 255, 255, 255],
            Self::Gray(y) => [y, y, y, 255],
            Self::Black => [0, 0, 0, 255],
        }
    }
}
