//! Coarse ROI auto-placement.
//!
//! Scans a grid of candidate windows over the full image and moves the ROI
//! to the one with the most threshold hits. This only has to land the ROI
//! near the counter; the component stage does the precise localization.

use image::{ImageBuffer, Rgba};

use super::hsv::HsvThreshold;
use super::region::Rect;

/// Candidate windows per axis.
const GRID: u32 = 14;
/// Only every Nth pixel of a window is tested.
const SAMPLE_STRIDE: usize = 6;

/// Returns the quarter-size window with the most digit-colored pixels, or
/// `None` when the image is too small to scan.
pub fn auto_find_roi(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    threshold: &HsvThreshold,
) -> Option<Rect> {
    let (width, height) = img.dimensions();
    let win_w = width / 4;
    let win_h = height / 4;
    if win_w == 0 || win_h == 0 {
        return None;
    }

    let mut best: Option<Rect> = None;
    let mut best_hits = -1i64;

    for gy in 0..GRID {
        for gx in 0..GRID {
            let x = (gx as u64 * (width - win_w) as u64 / (GRID - 1) as u64) as u32;
            let y = (gy as u64 * (height - win_h) as u64 / (GRID - 1) as u64) as u32;

            let mut hits = 0i64;
            let mut i = 0usize;
            for yy in y..y + win_h {
                for xx in x..x + win_w {
                    if i % SAMPLE_STRIDE == 0 {
                        let px = img.get_pixel(xx, yy);
                        if threshold.matches(px[0], px[1], px[2]) {
                            hits += 1;
                        }
                    }
                    i += 1;
                }
            }

            if hits > best_hits {
                best_hits = hits;
                best = Some(Rect::new(x, y, win_w, win_h));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([230, 20, 20, 255]);
    const DARK: Rgba<u8> = Rgba([20, 20, 20, 255]);

    #[test]
    fn test_auto_find_lands_on_colored_region() {
        // Red patch in the bottom-right quadrant of a dark image.
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(200, 200, |x, y| {
            if x >= 150 && x < 190 && y >= 150 && y < 190 {
                RED
            } else {
                DARK
            }
        });
        let roi = auto_find_roi(&img, &HsvThreshold::default()).unwrap();
        assert_eq!((roi.w, roi.h), (50, 50));
        // The chosen window must overlap the patch substantially.
        assert!(roi.x >= 130 && roi.y >= 130);
    }

    #[test]
    fn test_auto_find_all_background_still_returns_a_window() {
        // No hits anywhere: the scan still settles on some window (the first
        // one), so callers get a usable ROI either way.
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_pixel(100, 100, DARK);
        let roi = auto_find_roi(&img, &HsvThreshold::default()).unwrap();
        assert_eq!(roi, Rect::new(0, 0, 25, 25));
    }

    #[test]
    fn test_auto_find_tiny_image_returns_none() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_pixel(3, 3, RED);
        assert!(auto_find_roi(&img, &HsvThreshold::default()).is_none());
    }
}
