use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ht_core::frame::FrameBuffer;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Encode le canevas en PNG RGBA dans `writer`.
///
/// # Errors
/// Returns an error if the encoder or the underlying writer fails.
pub fn encode_png<W: Write>(canvas: &FrameBuffer, writer: W) -> Result<()> {
    PngEncoder::new(writer)
        .write_image(
            &canvas.data,
            canvas.width,
            canvas.height,
            ExtendedColorType::Rgba8,
        )
        .context("Échec de l'encodage PNG")
}

/// Écrit le canevas en PNG à `path`, quelle que soit l'extension.
///
/// The file is created here and nowhere earlier, so a failure upstream never
/// leaves an empty output behind.
///
/// # Errors
/// Returns an error if the file cannot be created or encoding fails.
///
/// # Example
/// ```no_run
/// use ht_core::frame::FrameBuffer;
/// use ht_export::png::save_png;
/// use std::path::Path;
/// save_png(&FrameBuffer::new(4, 4), Path::new("out.png")).unwrap();
/// ```
pub fn save_png(canvas: &FrameBuffer, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Impossible de créer {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    encode_png(canvas, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!(
        "PNG {}x{} écrit : {}",
        canvas.width,
        canvas.height,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    fn checker() -> FrameBuffer {
        let mut fb = FrameBuffer::new(4, 2);
        for (i, px) in fb.data.chunks_exact_mut(4).enumerate() {
            let v = if i % 2 == 0 { 255 } else { 0 };
            px.copy_from_slice(&[v, v, v, 255]);
        }
        fb
    }

    #[test]
    fn encoded_bytes_are_png() {
        let mut out = Vec::new();
        encode_png(&checker(), &mut out).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn save_png_ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.jpg");
        save_png(&checker(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (4, 2));
        assert_eq!(back.into_raw(), checker().data);
    }

    #[test]
    fn save_png_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("out.png");
        assert!(save_png(&checker(), &path).is_err());
    }
}
