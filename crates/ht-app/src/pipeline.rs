use anyhow::{Context, Result};
use ht_core::config::HalftoneConfig;
use ht_dither::BlockStats;

/// Décodage → luminance → tramage → encodage PNG.
///
/// Nothing is written until dithering has finished, so decode errors leave
/// the output path untouched.
///
/// # Errors
/// Returns the first decode or encode error, annotated with the path involved.
pub fn run(config: &HalftoneConfig) -> Result<BlockStats> {
    log::info!(
        "halftone {} → {}",
        config.input.display(),
        config.output.display()
    );

    let frame = ht_source::image::load_image(&config.input)?;
    let grid = ht_dither::to_gray(&frame);
    drop(frame);

    let (canvas, stats) = ht_dither::render_with_stats(&grid, &config.dither);
    log::info!(
        "{} blocs ({} blancs, {} gris, {} noirs)",
        stats.total(),
        stats.white,
        stats.gray,
        stats.black
    );

    ht_export::png::save_png(&canvas, &config.output)
        .with_context(|| format!("Export vers {} échoué", config.output.display()))?;
    Ok(stats)
}
