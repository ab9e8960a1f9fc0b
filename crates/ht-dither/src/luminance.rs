use ht_core::frame::{FrameBuffer, GrayGrid};

/// Luminance BT.601 d'un pixel RGBA 8 bits, alpha prémultiplié.
///
/// Channels are widened to 16 bits and premultiplied by alpha before the
/// integer weights 19595/38470/7471 (sum 65536) are applied, so a fully
/// transparent pixel reads as black.
///
/// # Example
/// ```
/// use ht_dither::luminance::gray_value;
/// assert_eq!(gray_value(255, 255, 255, 255), 255);
/// assert_eq!(gray_value(0, 0, 0, 255), 0);
/// assert_eq!(gray_value(255, 255, 255, 0), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn gray_value(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let widen = |c: u8| u32::from(c) * 0x101 * u32::from(a) / 0xff;
    let y = 19595 * widen(r) + 38470 * widen(g) + 7471 * widen(b) + (1 << 15);
    (y >> 24) as u8
}

/// Convertit un buffer RGBA en grille de luminance de mêmes dimensions.
///
/// # Example
/// ```
/// use ht_core::frame::FrameBuffer;
/// use ht_dither::luminance::to_gray;
///
/// let mut fb = FrameBuffer::new(2, 1);
/// fb.set_pixel(1, 0, [255, 255, 255, 255]);
/// let grid = to_gray(&fb);
/// assert_eq!(grid.dimensions(), (2, 1));
/// assert_eq!(grid.get(1, 0), 255);
/// ```
#[must_use]
pub fn to_gray(frame: &FrameBuffer) -> GrayGrid {
    GrayGrid::from_fn(frame.width, frame.height, |x, y| {
        let (r, g, b, a) = frame.pixel(x, y);
        gray_value(r, g, b, a)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_passes_through_neutral_tones() {
        for v in [0u8, 1, 64, 127, 128, 200, 254, 255] {
            assert_eq!(gray_value(v, v, v, 255), v, "neutral {v}");
        }
    }

    #[test]
    fn green_dominates_luminance() {
        let r = gray_value(255, 0, 0, 255);
        let g = gray_value(0, 255, 0, 255);
        let b = gray_value(0, 0, 255, 255);
        assert_eq!((r, g, b), (76, 150, 29));
    }

    #[test]
    fn to_gray_is_deterministic() {
        let mut fb = FrameBuffer::new(3, 3);
        for (i, px) in fb.data.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&[(i * 20) as u8, (i * 7) as u8, (i * 31) as u8, 255]);
        }
        assert_eq!(to_gray(&fb), to_gray(&fb));
    }
}
