//! Step-output rendering: debug previews and the OCR-prep image.

use image::{ImageBuffer, Luma, Rgba};

use super::hsv::HsvThreshold;
use super::mask::Mask;
use super::region::Rect;

/// Crops `rect` out of the image with its original colors.
///
/// `rect` must already be clamped to the image bounds.
pub fn roi_preview(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    rect: Rect,
) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    image::imageops::crop_imm(img, rect.x, rect.y, rect.w, rect.h).to_image()
}

/// Renders the mask as a grayscale image, replicating each cell as a
/// `scale x scale` block of 0 or 255.
///
/// Deliberately blocky: the viewer should see the discrete sample cells, not
/// a smoothed approximation of them.
pub fn mask_preview(mask: &Mask, scale: u32) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let scale = scale.max(1);
    ImageBuffer::from_fn(mask.w * scale, mask.h * scale, |x, y| {
        let v = if mask.get(x / scale, y / scale) == 1 {
            255
        } else {
            0
        };
        Luma([v])
    })
}

/// Renders the binarized crop handed to the OCR engine.
///
/// The HSV test is re-evaluated per output pixel against the full-resolution
/// source (nearest-neighbor mapping), never by upscaling the coarse mask:
/// digit edges matter for recognition. Output is strictly 0/255. With
/// `invert` the digit renders dark-on-light, the polarity most OCR engines
/// expect.
pub fn ocr_prep(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    rect: Rect,
    threshold: &HsvThreshold,
    scale: u32,
    invert: bool,
) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let scale = scale.max(1);
    // Widened to u64: crop width times scale (and output x times crop
    // width below) can exceed u32 for large fallback ROIs.
    let out_w = (rect.w as u64 * scale as u64).clamp(1, u32::MAX as u64) as u32;
    let out_h = (rect.h as u64 * scale as u64).clamp(1, u32::MAX as u64) as u32;

    ImageBuffer::from_fn(out_w, out_h, |x, y| {
        let sx = rect.x + ((x as u64 * rect.w as u64 / out_w as u64) as u32).min(rect.w - 1);
        let sy = rect.y + ((y as u64 * rect.h as u64 / out_h as u64) as u32).min(rect.h - 1);
        let px = img.get_pixel(sx, sy);
        let on = threshold.matches(px[0], px[1], px[2]);
        let v = if on != invert { 255 } else { 0 };
        Luma([v])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([230, 20, 20, 255]);
    const DARK: Rgba<u8> = Rgba([20, 20, 20, 255]);

    #[test]
    fn test_roi_preview_keeps_original_pixels() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(50, 50, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let crop = roi_preview(&img, Rect::new(10, 20, 5, 4));
        assert_eq!(crop.dimensions(), (5, 4));
        assert_eq!(crop.get_pixel(0, 0)[0], 10);
        assert_eq!(crop.get_pixel(0, 0)[1], 20);
    }

    #[test]
    fn test_mask_preview_block_replication() {
        let mut m = Mask::zeros(2, 2);
        m.data[0] = 1; // top-left cell on
        let out = mask_preview(&m, 3);
        assert_eq!(out.dimensions(), (6, 6));
        // Whole 3x3 block of the on-cell is white, the rest black.
        for y in 0..6 {
            for x in 0..6 {
                let expected = if x < 3 && y < 3 { 255 } else { 0 };
                assert_eq!(out.get_pixel(x, y)[0], expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_ocr_prep_is_binary_and_scaled() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(10, 10, |x, _| if x < 5 { RED } else { DARK });
        let thr = HsvThreshold::default();
        let out = ocr_prep(&img, Rect::new(0, 0, 10, 10), &thr, 4, false);
        assert_eq!(out.dimensions(), (40, 40));
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
        // Left half (red) is on, right half off.
        assert_eq!(out.get_pixel(0, 0)[0], 255);
        assert_eq!(out.get_pixel(39, 0)[0], 0);
    }

    #[test]
    fn test_ocr_prep_invert_swaps_polarity() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(4, 4, |x, _| if x == 0 { RED } else { DARK });
        let thr = HsvThreshold::default();
        let plain = ocr_prep(&img, Rect::new(0, 0, 4, 4), &thr, 1, false);
        let inverted = ocr_prep(&img, Rect::new(0, 0, 4, 4), &thr, 1, true);
        for (a, b) in plain.pixels().zip(inverted.pixels()) {
            assert_eq!(a[0], 255 - b[0]);
        }
    }

    #[test]
    fn test_ocr_prep_very_wide_crop_does_not_overflow() {
        // A crop wide enough that output-x times crop-width exceeds u32;
        // the nearest-neighbor mapping must still reach the last column.
        let w = 70_000u32;
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(w, 1, |x, _| if x == w - 1 { RED } else { DARK });
        let thr = HsvThreshold::default();
        let out = ocr_prep(&img, Rect::new(0, 0, w, 1), &thr, 1, false);
        assert_eq!(out.dimensions(), (w, 1));
        assert_eq!(out.get_pixel(w - 1, 0)[0], 255);
        assert_eq!(out.get_pixel(w - 2, 0)[0], 0);
    }

    #[test]
    fn test_ocr_prep_full_resolution_beats_coarse_mask() {
        // A single red column that a step-2 mask sample grid would miss
        // entirely still shows up in the OCR prep, which always samples at
        // full resolution.
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(8, 8, |x, _| if x == 3 { RED } else { DARK });
        let thr = HsvThreshold::default();
        let out = ocr_prep(&img, Rect::new(0, 0, 8, 8), &thr, 1, false);
        assert_eq!(out.get_pixel(3, 4)[0], 255);
    }
}
