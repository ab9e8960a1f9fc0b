//! Tramage ordonné par blocs (Bayer 4×4).
//!
//! The grid is tiled into `dot_size`×`dot_size` blocks. Every in-bounds
//! sub-pixel of a block is compared against its Bayer threshold, the hits are
//! averaged, and the whole block is painted white, mid-gray or black.

use ht_core::color::Tone;
use ht_core::config::DitherOptions;
use ht_core::frame::{FrameBuffer, GrayGrid};
use rayon::prelude::*;

/// Matrice de Bayer 4x4, rangs 1..=16.
///
/// Indexed as `BAYER_4X4[i % 4][j % 4]` where `i` is the horizontal and `j` the
/// vertical offset inside a block. Blocks larger than 4 tile the matrix.
pub const BAYER_4X4: [[u8; 4]; 4] = [[1, 9, 3, 11], [13, 5, 15, 7], [4, 12, 2, 10], [16, 8, 14, 6]];

/// Seuil du sous-pixel (i, j) : rang × 16, soit 16..=256.
///
/// # Example
/// ```
/// use ht_dither::dither::bayer_threshold;
/// assert_eq!(bayer_threshold(0, 0), 16);
/// assert_eq!(bayer_threshold(3, 0), 256);
/// assert_eq!(bayer_threshold(4, 4), bayer_threshold(0, 0));
/// ```
#[inline(always)]
#[must_use]
pub fn bayer_threshold(i: u32, j: u32) -> u16 {
    u16::from(BAYER_4X4[(i % 4) as usize][(j % 4) as usize]) * 16
}

/// Intensité moyenne du bloc d'origine (x, y), sous-pixels hors grille exclus.
///
/// Each in-bounds sub-pixel contributes 255 when its intensity is strictly
/// above its Bayer threshold and 0 otherwise. The sum is divided by the number
/// of in-bounds sub-pixels, truncating.
///
/// The origin must lie inside the grid and `size` must be at least 1.
///
/// # Example
/// ```
/// use ht_core::frame::GrayGrid;
/// use ht_dither::dither::block_average;
///
/// let grid = GrayGrid::filled(4, 4, 200);
/// assert_eq!(block_average(&grid, 0, 0, 4), 191);
/// ```
#[must_use]
pub fn block_average(grid: &GrayGrid, x: u32, y: u32, size: u32) -> u8 {
    debug_assert!(x < grid.width() && y < grid.height() && size > 0);
    let cols = size.min(grid.width() - x);
    let rows = size.min(grid.height() - y);

    let mut sum = 0u64;
    for j in 0..rows {
        for i in 0..cols {
            if u16::from(grid.get(x + i, y + j)) > bayer_threshold(i, j) {
                sum += 255;
            }
        }
    }
    let count = u64::from(cols) * u64::from(rows);
    (sum / count) as u8
}

/// Classe une moyenne de bloc.
///
/// `avg > threshold` is white, `avg < threshold - gray_threshold` is black,
/// both bounds of the band in between are gray.
///
/// # Example
/// ```
/// use ht_core::color::Tone;
/// use ht_core::config::DitherOptions;
/// use ht_dither::dither::classify;
///
/// let opts = DitherOptions::default();
/// assert_eq!(classify(133, &opts), Tone::White);
/// assert_eq!(classify(132, &opts), Tone::Gray(128));
/// assert_eq!(classify(120, &opts), Tone::Gray(128));
/// assert_eq!(classify(119, &opts), Tone::Black);
/// ```
#[inline(always)]
#[must_use]
pub fn classify(avg: u8, opts: &DitherOptions) -> Tone {
    if avg > opts.threshold() {
        Tone::White
    } else if avg < opts.black_below() {
        Tone::Black
    } else {
        Tone::Gray(opts.gray_color())
    }
}

/// Nombre de blocs par classe produits par un rendu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockStats {
    pub white: u64,
    pub gray: u64,
    pub black: u64,
}

impl BlockStats {
    #[inline(always)]
    fn record(&mut self, tone: Tone) {
        match tone {
            Tone::White => self.white += 1,
            Tone::Gray(_) => self.gray += 1,
            Tone::Black => self.black += 1,
        }
    }

    /// Total number of blocks.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.white + self.gray + self.black
    }

    #[must_use]
    fn combine(self, other: Self) -> Self {
        Self {
            white: self.white + other.white,
            gray: self.gray + other.gray,
            black: self.black + other.black,
        }
    }
}

/// Rend la grille en canevas RGBA de mêmes dimensions.
///
/// Dispatches to [`render_parallel`] when `opts.parallel()` is set; both paths
/// produce identical canvases.
///
/// # Example
/// ```
/// use ht_core::config::DitherOptions;
/// use ht_core::frame::GrayGrid;
/// use ht_dither::dither::render;
///
/// let grid = GrayGrid::filled(7, 5, 0);
/// let canvas = render(&grid, &DitherOptions::default());
/// assert_eq!((canvas.width, canvas.height), (7, 5));
/// assert_eq!(canvas.pixel(6, 4), (0, 0, 0, 255));
/// ```
#[must_use]
pub fn render(grid: &GrayGrid, opts: &DitherOptions) -> FrameBuffer {
    let (canvas, stats) = render_with_stats(grid, opts);
    log::debug!(
        "Tramage {}x{} (point {}) : {} blancs, {} gris, {} noirs",
        grid.width(),
        grid.height(),
        opts.dot_size(),
        stats.white,
        stats.gray,
        stats.black
    );
    canvas
}

/// Comme [`render`], avec le décompte des blocs par classe.
#[must_use]
pub fn render_with_stats(grid: &GrayGrid, opts: &DitherOptions) -> (FrameBuffer, BlockStats) {
    let mut canvas = FrameBuffer::new(grid.width(), grid.height());
    let Some(band_len) = band_len(grid, opts) else {
        return (canvas, BlockStats::default());
    };

    if opts.parallel() {
        let stats = paint_parallel(grid, opts, &mut canvas, band_len);
        return (canvas, stats);
    }

    let size = opts.dot_size();
    let stats = canvas
        .data
        .chunks_mut(band_len)
        .enumerate()
        .map(|(band, pixels)| render_band(grid, opts, band as u32 * size, pixels))
        .fold(BlockStats::default(), BlockStats::combine);
    (canvas, stats)
}

/// Rendu parallèle : une bande de `dot_size` lignes par tâche rayon.
///
/// Bands read disjoint rows of the grid and write disjoint slices of the
/// canvas, so no synchronisation is needed.
#[must_use]
pub fn render_parallel(grid: &GrayGrid, opts: &DitherOptions) -> FrameBuffer {
    let mut canvas = FrameBuffer::new(grid.width(), grid.height());
    if let Some(band_len) = band_len(grid, opts) {
        paint_parallel(grid, opts, &mut canvas, band_len);
    }
    canvas
}

fn paint_parallel(
    grid: &GrayGrid,
    opts: &DitherOptions,
    canvas: &mut FrameBuffer,
    band_len: usize,
) -> BlockStats {
    let size = opts.dot_size();
    canvas
        .data
        .par_chunks_mut(band_len)
        .enumerate()
        .map(|(band, pixels)| render_band(grid, opts, band as u32 * size, pixels))
        .reduce(BlockStats::default, BlockStats::combine)
}

/// Bytes covered by one full band of blocks, `None` for an empty grid.
fn band_len(grid: &GrayGrid, opts: &DitherOptions) -> Option<usize> {
    if grid.width() == 0 || grid.height() == 0 {
        return None;
    }
    let rows = opts.dot_size().min(grid.height()) as usize;
    Some(grid.width() as usize * 4 * rows)
}

/// Classe et peint une rangée de blocs dont la première ligne est `y`.
///
/// `pixels` holds exactly the canvas rows of this band (fewer than
/// `dot_size` for the last band when the height is not a multiple).
fn render_band(grid: &GrayGrid, opts: &DitherOptions, y: u32, pixels: &mut [u8]) -> BlockStats {
    let size = opts.dot_size();
    let width = grid.width() as usize;
    let mut stats = BlockStats::default();

    for x in (0..grid.width()).step_by(size as usize) {
        let tone = classify(block_average(grid, x, y, size), opts);
        stats.record(tone);

        let rgba = tone.rgba();
        let x0 = x as usize;
        let x1 = (x0 + size as usize).min(width);
        for row in pixels.chunks_exact_mut(width * 4) {
            for px in row[x0 * 4..x1 * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }
    stats
}
