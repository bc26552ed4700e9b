//! RGB → HSV conversion and the target-color membership test.
//!
//! Vacancy boards render their digit segments in a saturated signal color
//! (typically red or green LEDs), so the mask stage classifies pixels in HSV
//! space: hue picks the color family, saturation and value minimums reject
//! washed-out or dark background pixels.

use serde::{Deserialize, Serialize};

/// Converts 8-bit RGB to HSV with hue in degrees `[0, 360)` and
/// saturation/value in `[0, 1]`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let mut h = 0.0;
    if d != 0.0 {
        h = if max == r {
            ((g - b) / d) % 6.0
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h *= 60.0;
        if h < 0.0 {
            h += 360.0;
        }
    }

    let s = if max == 0.0 { 0.0 } else { d / max };
    (h, s, max)
}

/// Acceptance region for "digit-colored" pixels in HSV space.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HsvThreshold {
    /// Center of the accepted hue band in degrees (0 = red).
    pub hue_center: f32,
    /// Half-width of the hue band in degrees.
    pub hue_range: f32,
    /// Minimum saturation, 0.0-1.0.
    pub sat_min: f32,
    /// Minimum value (brightness), 0.0-1.0.
    pub val_min: f32,
}

impl Default for HsvThreshold {
    fn default() -> Self {
        // Tuned against red seven-segment vacancy counters.
        Self {
            hue_center: 0.0,
            hue_range: 18.0,
            sat_min: 0.45,
            val_min: 0.22,
        }
    }
}

impl HsvThreshold {
    /// Returns true if the pixel falls inside the acceptance region.
    ///
    /// Hue distance is circular so a band centered on 0° (red) also accepts
    /// hues just below 360°.
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        let (h, s, v) = rgb_to_hsv(r, g, b);
        let d = (h - self.hue_center)
            .abs()
            .min((h - self.hue_center + 360.0).abs())
            .min((h - self.hue_center - 360.0).abs());
        d <= self.hue_range && s >= self.sat_min && v >= self.val_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hsv_primaries() {
        let (h, s, v) = rgb_to_hsv(255, 0, 0);
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));

        let (h, _, _) = rgb_to_hsv(0, 255, 0);
        assert_eq!(h, 120.0);

        let (h, _, _) = rgb_to_hsv(0, 0, 255);
        assert_eq!(h, 240.0);
    }

    #[test]
    fn test_rgb_to_hsv_grays_have_zero_saturation() {
        let (h, s, v) = rgb_to_hsv(128, 128, 128);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((v - 128.0 / 255.0).abs() < 1e-6);

        let (_, s, v) = rgb_to_hsv(0, 0, 0);
        assert_eq!(s, 0.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_default_threshold_accepts_pure_red() {
        let thr = HsvThreshold::default();
        assert!(thr.matches(230, 20, 20));
    }

    #[test]
    fn test_default_threshold_rejects_near_black() {
        // Fails both sat_min and val_min.
        let thr = HsvThreshold::default();
        assert!(!thr.matches(20, 20, 20));
    }

    #[test]
    fn test_hue_distance_wraps_around_zero() {
        // Hue 355° is 5° away from a band centered on 0°.
        let thr = HsvThreshold {
            hue_center: 0.0,
            hue_range: 10.0,
            sat_min: 0.2,
            val_min: 0.2,
        };
        // RGB(255, 0, 21) has hue ≈ 355°.
        assert!(thr.matches(255, 0, 21));
        // Hue 120° (green) is far outside the band.
        assert!(!thr.matches(0, 255, 0));
    }

    #[test]
    fn test_threshold_rejects_desaturated_pink() {
        let thr = HsvThreshold::default();
        // Right hue, but saturation ~0.2 < 0.45.
        assert!(!thr.matches(255, 204, 204));
    }
}
