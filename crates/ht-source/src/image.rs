use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use ht_core::frame::FrameBuffer;
use image::ImageReader;

/// Charge une image depuis le disque et la convertit en RGBA.
///
/// The format is sniffed from the file content, never from the extension.
///
/// # Errors
/// Returns an error if the file cannot be opened, the format is not
/// recognised, or decoding fails.
///
/// # Example
/// ```no_run
/// use ht_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.jpg")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let file =
        File::open(path).with_context(|| format!("Impossible d'ouvrir {}", path.display()))?;
    decode(BufReader::new(file)).with_context(|| format!("Impossible de décoder {}", path.display()))
}

/// Décode une image déjà en mémoire.
///
/// # Errors
/// Returns an error if the format is not recognised or decoding fails.
pub fn decode_bytes(bytes: &[u8]) -> Result<FrameBuffer> {
    decode(Cursor::new(bytes))
}

fn decode<R: BufRead + Seek>(reader: R) -> Result<FrameBuffer> {
    let reader = ImageReader::new(reader).with_guessed_format()?;
    let format = reader.format().context("Format d'image non reconnu")?;
    let img = reader.decode()?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Image {format:?} décodée : {width}x{height}");
    Ok(FrameBuffer::from_raw(width, height, rgba.into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(5, 3, |x, y| Rgba([(x * 50) as u8, (y * 80) as u8, 7, 255]))
    }

    #[test]
    fn load_png_roundtrips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        sample().save(&path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (5, 3));
        assert_eq!(frame.pixel(4, 2), (200, 160, 7, 255));
    }

    #[test]
    fn format_is_sniffed_not_taken_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabelled.jpg");
        sample().save_with_format(&path, ImageFormat::Png).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!(frame.pixel(1, 1), (50, 80, 7, 255));
    }

    #[test]
    fn bmp_without_extension_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noext");
        sample().save_with_format(&path, ImageFormat::Bmp).unwrap();
        assert_eq!(load_image(&path).unwrap().width, 5);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_bytes(b"definitely not an image").is_err());
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_image(Path::new("/nonexistent/halftone/in.png")).unwrap_err();
        assert!(format!("{err}").contains("/nonexistent/halftone/in.png"));
    }
}
