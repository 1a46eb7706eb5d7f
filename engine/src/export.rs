use std::path::Path;

use image::{DynamicImage, ImageFormat};
use log::info;
use thiserror::Error;

use crate::canvas::Canvas;

pub const DEFAULT_EXPORT_NAME: &str = "WorldImage.jpg";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("rendering is still in progress")]
    Incomplete,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Writes the canvas to `path`, format chosen from the extension.
///
/// Refuses while `complete` is false so half-drawn maps never reach disk.
/// Formats without alpha (JPEG) get an RGB copy.
pub fn export_image(canvas: &Canvas, path: impl AsRef<Path>, complete: bool) -> Result<(), ExportError> {
    if !complete {
        return Err(ExportError::Incomplete);
    }
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let image = DynamicImage::ImageRgba8(canvas.image().clone());
    match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => image.to_rgb8().save_with_format(path, format)?,
        _ => image.save_with_format(path, format)?,
    }
    info!("Saved {}x{} map image to {}", canvas.width(), canvas.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DrawCommand;
    use crate::color::Color;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("terrain_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn refuses_while_incomplete() {
        let canvas = Canvas::new(4, 4);
        let path = temp_path("never.png");
        assert!(matches!(export_image(&canvas, &path, false), Err(ExportError::Incomplete)));
        assert!(!path.exists());
    }

    #[test]
    fn png_keeps_pixels() {
        let mut canvas = Canvas::new(3, 2);
        canvas.apply(&DrawCommand::DrawPoint { x: 2, y: 1, color: Color::rgb(10, 20, 30) });
        let path = temp_path("map.png");
        export_image(&canvas, &path, true).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn jpeg_drops_alpha() {
        let canvas = Canvas::new(8, 8);
        let path = temp_path(DEFAULT_EXPORT_NAME);
        export_image(&canvas, &path, true).unwrap();
        let back = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.dimensions(), (8, 8));
    }

    #[test]
    fn unknown_extension_is_an_image_error() {
        let canvas = Canvas::new(1, 1);
        assert!(matches!(export_image(&canvas, temp_path("map.nope"), true), Err(ExportError::Image(_))));
    }
}
