//! Pixel rectangles with bounds clamping.
//!
//! The ROI comes straight from user configuration, so every rectangle is
//! clamped to image bounds before any pixel access. Clamped rectangles are
//! never empty: width and height stay at least 1.

use serde::{Deserialize, Serialize};

/// An integer rectangle in image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Clamps this rectangle into `[0, width) x [0, height)`.
    ///
    /// The origin is clamped to the last valid pixel and the extent is cut to
    /// whatever remains, with a 1x1 minimum. Callers must ensure the image is
    /// non-empty.
    pub fn clamp_to(&self, width: u32, height: u32) -> Rect {
        let x = self.x.min(width.saturating_sub(1));
        let y = self.y.min(height.saturating_sub(1));
        let w = self.w.clamp(1, width - x);
        let h = self.h.clamp(1, height - y);
        Rect { x, y, w, h }
    }

    /// Expands the rectangle by `pad` pixels on all sides, then clamps the
    /// result to image bounds. The result is never smaller than 1x1.
    pub fn pad_clamped(&self, pad: u32, width: u32, height: u32) -> Rect {
        let x0 = (self.x as i64 - pad as i64).clamp(0, width as i64 - 1);
        let y0 = (self.y as i64 - pad as i64).clamp(0, height as i64 - 1);
        let x1 = (self.x as i64 + self.w as i64 + pad as i64).clamp(1, width as i64);
        let y1 = (self.y as i64 + self.h as i64 + pad as i64).clamp(1, height as i64);
        Rect {
            x: x0 as u32,
            y: y0 as u32,
            w: (x1 - x0).max(1) as u32,
            h: (y1 - y0).max(1) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_is_identity() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.clamp_to(100, 100), r);
    }

    #[test]
    fn test_clamp_cuts_overhang() {
        let r = Rect::new(90, 95, 30, 30);
        assert_eq!(r.clamp_to(100, 100), Rect::new(90, 95, 10, 5));
    }

    #[test]
    fn test_clamp_origin_past_edge() {
        // Origin beyond the image snaps to the last pixel with a 1x1 extent.
        let r = Rect::new(500, 500, 10, 10);
        assert_eq!(r.clamp_to(100, 100), Rect::new(99, 99, 1, 1));
    }

    #[test]
    fn test_clamp_zero_extent_becomes_one() {
        let r = Rect::new(5, 5, 0, 0);
        assert_eq!(r.clamp_to(100, 100), Rect::new(5, 5, 1, 1));
    }

    #[test]
    fn test_pad_expands_both_sides() {
        let r = Rect::new(20, 20, 10, 10);
        assert_eq!(r.pad_clamped(5, 100, 100), Rect::new(15, 15, 20, 20));
    }

    #[test]
    fn test_pad_clamps_at_image_edge() {
        let r = Rect::new(2, 2, 10, 10);
        let padded = r.pad_clamped(5, 100, 100);
        assert_eq!(padded, Rect::new(0, 0, 17, 17));

        let r = Rect::new(90, 90, 8, 8);
        let padded = r.pad_clamped(10, 100, 100);
        assert_eq!(padded, Rect::new(80, 80, 20, 20));
    }

    #[test]
    fn test_pad_stays_within_bounds() {
        // Round-trip guarantee: padded boxes always fit in the image.
        for pad in [0u32, 1, 7, 40] {
            let r = Rect::new(95, 3, 60, 1).clamp_to(100, 100);
            let p = r.pad_clamped(pad, 100, 100);
            assert!(p.x + p.w <= 100);
            assert!(p.y + p.h <= 100);
            assert!(p.w >= 1 && p.h >= 1);
        }
    }
}
