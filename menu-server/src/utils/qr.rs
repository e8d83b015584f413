//! QR code rendering
//!
//! Encodes a target URL into a PNG image. Tables embed the generated image
//! at creation time; codes are never regenerated on update.

use image::{DynamicImage, GrayImage, Luma};
use qrcode::{Color, QrCode};
use shared::error::{AppError, ErrorCode};
use std::io::Cursor;

/// Pixel size of one QR module
const MODULE_PX: u32 = 8;
/// Quiet zone width in modules on every side
const QUIET_MODULES: u32 = 4;

/// Render `data` as a PNG-encoded QR code.
pub fn render_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::with_message(ErrorCode::QrGenerationFailed, e.to_string()))?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = (modules + 2 * QUIET_MODULES) * MODULE_PX;

    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));
    for (idx, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = (idx as u32 % modules + QUIET_MODULES) * MODULE_PX;
        let my = (idx as u32 / modules + QUIET_MODULES) * MODULE_PX;
        for dy in 0..MODULE_PX {
            for dx in 0..MODULE_PX {
                img.put_pixel(mx + dx, my + dy, Luma([0u8]));
            }
        }
    }

    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| AppError::with_message(ErrorCode::QrGenerationFailed, e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_png_is_valid_image() {
        let png = render_png("https://menu.example.com/m/spice-route?table=4").unwrap();
        let decoded = image::load_from_memory(&png).expect("generated PNG must decode");
        assert!(decoded.width() > 0);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render_png("https://menu.example.com/m/x?table=1").unwrap();
        let b = render_png("https://menu.example.com/m/x?table=1").unwrap();
        assert_eq!(a, b);
    }
}
