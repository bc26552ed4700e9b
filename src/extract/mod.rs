//! Digit region extraction pipeline.
//!
//! Mask build → despeckle → component labeling → candidate selection → box
//! conversion back to image coordinates. The whole pipeline is a pure,
//! synchronous function of the image and parameters: "no signal" inputs
//! (all-background mask, nothing passing the filters) produce fallbacks, not
//! errors, because the tool is driven by a human tuning parameters and must
//! never die on a bad combination.

pub mod components;
pub mod hsv;
pub mod locate;
pub mod mask;
pub mod region;
pub mod render;

use image::{ImageBuffer, Rgba};
use serde::{Deserialize, Serialize};

use components::{Component, SelectionCriteria, find_components, pick_best};
use hsv::HsvThreshold;
use mask::{Mask, build_mask, despeckle};
use region::Rect;

/// All knobs of one extraction run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ExtractParams {
    pub threshold: HsvThreshold,
    /// Mask downsample step; 1 = every ROI pixel.
    pub step: u32,
    /// 3x3 majority filter passes applied to the mask.
    pub despeckle_iters: u32,
    /// Padding added around the winning bounding box, in image pixels.
    pub pad: u32,
    pub criteria: SelectionCriteria,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            threshold: HsvThreshold::default(),
            step: 2,
            despeckle_iters: 0,
            pad: 10,
            criteria: SelectionCriteria::default(),
        }
    }
}

/// Everything one extraction run produces.
#[derive(Clone, Debug)]
pub struct Extraction {
    /// The ROI actually used, clamped to the image.
    pub roi: Rect,
    pub mask: Mask,
    pub components: Vec<Component>,
    /// The winning component, in mask coordinates.
    pub best: Option<Component>,
    /// Winning box in image coordinates, padded and clamped.
    pub tight_box: Option<Rect>,
    /// Region to binarize for OCR: `tight_box`, or the ROI when no component
    /// qualified.
    pub crop_box: Rect,
}

/// Runs the extraction pipeline on one image.
///
/// The caller-supplied ROI is clamped to the image first, so any rectangle
/// is acceptable. Deterministic: identical inputs give identical outputs.
pub fn extract(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    roi: Rect,
    params: &ExtractParams,
) -> Extraction {
    let (width, height) = img.dimensions();
    let roi = roi.clamp_to(width, height);
    let step = params.step.max(1);

    let mut mask = build_mask(img, roi, &params.threshold, step);
    if params.despeckle_iters > 0 {
        mask = despeckle(&mask, params.despeckle_iters);
    }

    let components = find_components(&mask);
    let best = pick_best(&components, mask.w, mask.h, &params.criteria).copied();

    let tight_box = best.map(|c| {
        // Mask cell coords → image pixel coords, then pad.
        Rect::new(
            roi.x + c.min_x * step,
            roi.y + c.min_y * step,
            c.w * step,
            c.h * step,
        )
        .pad_clamped(params.pad, width, height)
    });

    let crop_box = tight_box.unwrap_or(roi);

    Extraction {
        roi,
        mask,
        components,
        best,
        tight_box,
        crop_box,
    }
}
