//! PNG input and output for layers and final textures.

use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::{PaintError, Result};

/// Write an RGB image to a PNG file, whatever the path's extension.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| PaintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}

/// Read an image file as RGB. The format is sniffed from the content.
pub fn read_png(path: &Path) -> Result<RgbImage> {
    let bytes = std::fs::read(path).map_err(|e| PaintError::Image {
        path: path.to_path_buf(),
        message: format!("Failed to read layer: {}", e),
    })?;

    image::load_from_memory(&bytes)
        .map(|img| img.to_rgb8())
        .map_err(|e| PaintError::Image {
            path: path.to_path_buf(),
            message: format!("Failed to decode layer: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(1, 0, Rgb([255, 0, 10]));

        let dir = tempdir().unwrap();
        let path = dir.path().join("layer.png");
        write_png(&img, &path).unwrap();

        let back = read_png(&path).unwrap();
        assert_eq!(back.dimensions(), (2, 1));
        assert_eq!(back.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(back.get_pixel(1, 0).0, [255, 0, 10]);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let img = RgbImage::new(1, 1);
        let result = write_png(&img, Path::new("/nonexistent/dir/out.png"));
        assert!(matches!(result, Err(PaintError::Io { .. })));
    }

    #[test]
    fn test_read_missing_file_fails() {
        assert!(matches!(
            read_png(Path::new("/nonexistent/layer.png")),
            Err(PaintError::Image { .. })
        ));
    }
}
