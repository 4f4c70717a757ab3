//! Image file export.
//!
//! The container format follows the file extension (PNG, JPEG, BMP, TGA,
//! PPM...), whatever the `image` crate can encode as 8-bit RGB.

use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while writing an image to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unsupported output format for {path:?}")]
    UnsupportedFormat { path: PathBuf },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("failed to encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Write interleaved 8-bit RGB bytes to `path`.
pub fn write_image(path: &Path, rgb: Vec<u8>, width: u32, height: u32) -> Result<(), OutputError> {
    let format = ImageFormat::from_path(path).map_err(|_| OutputError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let expected = width as usize * height as usize * 3;
    let actual = rgb.len();
    let image = RgbImage::from_raw(width, height, rgb).ok_or(OutputError::BufferSize {
        width,
        height,
        expected,
        actual,
    })?;

    image
        .save_with_format(path, format)
        .map_err(|source| OutputError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("prism_output_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_png_roundtrip() {
        let path = temp_path("small.png");
        let rgb = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];
        write_image(&path, rgb.clone(), 2, 2).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.into_raw(), rgb);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unknown_extension() {
        let path = temp_path("image.nope");
        let err = write_image(&path, vec![0; 3], 1, 1).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let path = temp_path("short.png");
        let err = write_image(&path, vec![0; 5], 2, 1).unwrap_err();
        assert!(matches!(err, OutputError::BufferSize { expected: 6, actual: 5, .. }));
        assert!(!path.exists());
    }
}
