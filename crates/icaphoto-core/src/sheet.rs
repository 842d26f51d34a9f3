//! 4x6 inch print sheet with four copies of the photo in a 2x2 grid.

use image::{imageops, Rgb, RgbImage};

use crate::compose::ComposeError;
use crate::config::PhotoSpec;
use crate::decode::{FilterType, RgbRaster};

/// Top-left corners of the four copies, row-major.
///
/// Margins are equal on both sides and between the copies:
/// `(sheet - 2 * photo) / 3` per axis, rounded to whole pixels.
pub fn tile_positions(spec: &PhotoSpec) -> [(u32, u32); 4] {
    let (pw, ph) = (spec.print_photo_width as f64, spec.print_photo_height as f64);
    let margin_x = ((spec.sheet_width as f64 - 2.0 * pw) / 3.0).max(0.0);
    let margin_y = ((spec.sheet_height as f64 - 2.0 * ph) / 3.0).max(0.0);

    let col = [margin_x, margin_x * 2.0 + pw];
    let row = [margin_y, margin_y * 2.0 + ph];
    [
        (col[0].round() as u32, row[0].round() as u32),
        (col[1].round() as u32, row[0].round() as u32),
        (col[0].round() as u32, row[1].round() as u32),
        (col[1].round() as u32, row[1].round() as u32),
    ]
}

/// Lay out four copies of `photo` on a white sheet.
///
/// Fails if the photo buffer does not match its dimensions.
pub fn tile_print_sheet(photo: &RgbRaster, spec: &PhotoSpec) -> Result<RgbRaster, ComposeError> {
    let source = photo.to_image().ok_or(ComposeError::InvalidSource {
        width: photo.width,
        height: photo.height,
    })?;
    let copy = imageops::resize(
        &source,
        spec.print_photo_width,
        spec.print_photo_height,
        FilterType::Lanczos3.to_image_filter(),
    );

    let mut sheet = RgbImage::from_pixel(spec.sheet_width, spec.sheet_height, Rgb([255, 255, 255]));
    for (x, y) in tile_positions(spec) {
        imageops::overlay(&mut sheet, &copy, x as i64, y as i64);
    }

    log::debug!(
        target: "icaphoto::sheet",
        "tiled 4 copies of {}x{} on {}x{} sheet",
        spec.print_photo_width,
        spec.print_photo_height,
        spec.sheet_width,
        spec.sheet_height
    );
    Ok(RgbRaster::from_image(sheet))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbRaster {
        RgbRaster {
            width,
            height,
            pixels: rgb.repeat((width * height) as usize),
        }
    }

    #[test]
    fn test_default_positions() {
        // marginX = 374 / 3 = 124.67, marginY = 738 / 3 = 246
        assert_eq!(
            tile_positions(&PhotoSpec::default()),
            [(125, 246), (662, 246), (125, 1023), (662, 1023)]
        );
    }

    #[test]
    fn test_positions_fit_on_sheet() {
        let spec = PhotoSpec::default();
        for (x, y) in tile_positions(&spec) {
            assert!(x + spec.print_photo_width <= spec.sheet_width);
            assert!(y + spec.print_photo_height <= spec.sheet_height);
        }
    }

    #[test]
    fn test_oversized_photo_clamps_margins() {
        let spec = PhotoSpec {
            print_photo_width: 700,
            ..PhotoSpec::default()
        };
        let positions = tile_positions(&spec);
        assert_eq!(positions[0].0, 0);
        assert_eq!(positions[1].0, 700);
    }

    #[test]
    fn test_sheet_layout() {
        let spec = PhotoSpec::default();
        let photo = solid(40, 52, [0, 0, 0]);
        let sheet = tile_print_sheet(&photo, &spec).unwrap();
        assert_eq!((sheet.width, sheet.height), (1200, 1800));

        // Margins stay white
        assert_eq!(sheet.pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(sheet.pixel(600, 900), Some([255, 255, 255]));
        assert_eq!(sheet.pixel(1199, 1799), Some([255, 255, 255]));

        // Centre of every copy is dark
        for (x, y) in tile_positions(&spec) {
            let [r, g, b] = sheet.pixel(x + 206, y + 265).unwrap();
            assert!(r < 10 && g < 10 && b < 10);
        }
    }

    #[test]
    fn test_invalid_photo_buffer() {
        let photo = RgbRaster {
            width: 10,
            height: 10,
            pixels: vec![0; 5],
        };
        assert_eq!(
            tile_print_sheet(&photo, &PhotoSpec::default()),
            Err(ComposeError::InvalidSource {
                width: 10,
                height: 10
            })
        );
    }
}
