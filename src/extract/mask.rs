//! Binary mask construction over a downsampled ROI.

use image::{ImageBuffer, Rgba};

use super::hsv::HsvThreshold;
use super::region::Rect;

/// A row-major grid of 0/1 cells, one per sampled ROI pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub w: u32,
    pub h: u32,
    pub data: Vec<u8>,
}

impl Mask {
    pub fn zeros(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            data: vec![0; (w * h) as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y * self.w + x) as usize]
    }

    /// Number of 1-cells.
    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }
}

/// Builds a binary mask over `roi`, sampling one pixel per `step x step`
/// block (at the block origin) and testing it against the HSV threshold.
///
/// The mask is `max(1, roiW/step) x max(1, roiH/step)` cells. Pure function
/// of the pixel data and parameters. `roi` must already be clamped to the
/// image and `step` is forced to at least 1.
pub fn build_mask(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    roi: Rect,
    threshold: &HsvThreshold,
    step: u32,
) -> Mask {
    let step = step.max(1);
    let mw = (roi.w / step).max(1);
    let mh = (roi.h / step).max(1);
    let mut mask = Mask::zeros(mw, mh);

    for yy in 0..mh {
        for xx in 0..mw {
            let px = img.get_pixel(roi.x + xx * step, roi.y + yy * step);
            if threshold.matches(px[0], px[1], px[2]) {
                mask.data[(yy * mw + xx) as usize] = 1;
            }
        }
    }

    mask
}

/// Removes speckle noise with `iterations` passes of a 3x3 majority vote:
/// a cell is 1 after a pass only if the sum of its 3x3 neighborhood
/// (self + 8 neighbors) is at least 5.
///
/// Only interior cells are voted on; the 1-pixel border is written as 0 on
/// every pass. Downstream component selection was tuned against this exact
/// edge behavior, so it is reproduced as-is.
pub fn despeckle(mask: &Mask, iterations: u32) -> Mask {
    let (w, h) = (mask.w, mask.h);
    let mut cur = mask.data.clone();
    let mut nxt = vec![0u8; (w * h) as usize];

    let idx = |x: u32, y: u32| (y * w + x) as usize;

    for _ in 0..iterations {
        nxt.fill(0);
        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                let mut sum = 0u8;
                for dy in 0..3 {
                    for dx in 0..3 {
                        sum += cur[idx(x + dx - 1, y + dy - 1)];
                    }
                }
                nxt[idx(x, y)] = if sum >= 5 { 1 } else { 0 };
            }
        }
        std::mem::swap(&mut cur, &mut nxt);
    }

    Mask { w, h, data: cur }
}
