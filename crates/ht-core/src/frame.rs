use crate::error::CoreError;

/// Buffer de pixels RGBA. Sert à la fois d'image décodée et de canevas de sortie.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use ht_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data.len() != width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// let (r, g, b, a) = fb.pixel(0, 0);
    /// assert_eq!((r, g, b, a), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit un pixel RGBA. Hors limites : ignoré.
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }
}

/// Grille de luminance 8 bits, row-major. Immuable une fois construite.
///
/// # Example
/// ```
/// use ht_core::frame::GrayGrid;
/// let grid = GrayGrid::filled(3, 2, 200);
/// assert_eq!(grid.get(2, 1), 200);
/// assert_eq!(grid.dimensions(), (3, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayGrid {
    samples: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayGrid {
    /// Wrap a row-major luminance buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `samples.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, CoreError> {
        if samples.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            samples,
            width,
            height,
        })
    }

    /// Uniform grid, mostly useful in tests.
    #[must_use]
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            samples: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every sample.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::GrayGrid;
    /// let grid = GrayGrid::from_fn(4, 1, |x, _| (x * 50) as u8);
    /// assert_eq!(grid.get(3, 0), 150);
    /// ```
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self {
            samples,
            width,
            height,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Intensité au point (x, y). L'appelant garantit x < width, y < height.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "sample out of bounds");
        self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Row-major samples.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_from_raw_rejects_short_buffer() {
        let err = FrameBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDimensions {
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn gray_from_raw_rejects_long_buffer() {
        assert!(GrayGrid::from_raw(2, 2, vec![0; 5]).is_err());
        assert!(GrayGrid::from_raw(2, 2, vec![0; 4]).is_ok());
    }

    #[test]
    fn set_pixel_out_of_bounds_is_noop() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(2, 0, [255; 4]);
        fb.set_pixel(0, 7, [255; 4]);
        assert!(fb.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn gray_from_fn_is_row_major() {
        let grid = GrayGrid::from_fn(3, 2, |x, y| (y * 3 + x) as u8);
        assert_eq!(grid.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }
}
