//! Connected-component labeling and digit-candidate selection.
//!
//! Labeling walks the mask in row-major order and grows each component with
//! an explicit stack (4-connected neighbors only). Recursion is deliberately
//! avoided: masks can be large at step 1 and a thin diagonal stroke would
//! otherwise nest thousands of calls deep.

use serde::{Deserialize, Serialize};

use super::mask::Mask;

/// A maximal 4-connected region of 1-cells, in mask coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    /// Bounding box width in cells.
    pub w: u32,
    /// Bounding box height in cells.
    pub h: u32,
    /// Number of 1-cells in the component.
    pub area: u32,
}

impl Component {
    /// Fraction of the bounding box covered by the component's cells.
    pub fn fill(&self) -> f64 {
        self.area as f64 / (self.w as f64 * self.h as f64)
    }

    /// Bounding box width over height.
    pub fn aspect(&self) -> f64 {
        self.w as f64 / self.h as f64
    }
}

/// Labels all components of the mask, returned in row-major discovery order.
///
/// Every 1-cell belongs to exactly one component, so the component areas sum
/// to the mask's total 1-cell count. The order carries no meaning beyond
/// being a stable iteration order for selection.
pub fn find_components(mask: &Mask) -> Vec<Component> {
    let (w, h) = (mask.w, mask.h);
    let mut visited = vec![false; (w * h) as usize];
    let mut comps = Vec::new();
    let mut stack: Vec<u32> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let p = y * w + x;
            if mask.data[p as usize] == 0 || visited[p as usize] {
                continue;
            }

            visited[p as usize] = true;
            stack.push(p);

            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
            let mut area = 0u32;

            while let Some(cur) = stack.pop() {
                let cx = cur % w;
                let cy = cur / w;
                area += 1;

                min_x = min_x.min(cx);
                min_y = min_y.min(cy);
                max_x = max_x.max(cx);
                max_y = max_y.max(cy);

                let mut visit = |nb: u32| {
                    if mask.data[nb as usize] == 1 && !visited[nb as usize] {
                        visited[nb as usize] = true;
                        stack.push(nb);
                    }
                };

                if cx > 0 {
                    visit(cur - 1);
                }
                if cx + 1 < w {
                    visit(cur + 1);
                }
                if cy > 0 {
                    visit(cur - w);
                }
                if cy + 1 < h {
                    visit(cur + w);
                }
            }

            comps.push(Component {
                min_x,
                min_y,
                max_x,
                max_y,
                w: max_x - min_x + 1,
                h: max_y - min_y + 1,
                area,
            });
        }
    }

    comps
}

/// Bounds a candidate component must satisfy, plus the scoring preference.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SelectionCriteria {
    /// Accepted component area as a fraction of the whole mask.
    pub min_area_frac: f64,
    pub max_area_frac: f64,
    /// Accepted fill ratio (area / bounding box area).
    pub min_fill: f64,
    pub max_fill: f64,
    /// Accepted aspect ratio (bounding box width / height).
    pub min_aspect: f64,
    pub max_aspect: f64,
    /// Penalize components far from the mask center.
    pub prefer_center: bool,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            min_area_frac: 0.002,
            max_area_frac: 0.45,
            min_fill: 0.06,
            max_fill: 0.8,
            min_aspect: 0.15,
            max_aspect: 2.5,
            prefer_center: true,
        }
    }
}

/// Picks the most digit-like component, or `None` if nothing survives the
/// filters. Callers fall back to the full ROI in the `None` case.
///
/// Surviving candidates are scored as
/// `area + fill * 2000 - bbox_width * 5`, with an extra penalty of
/// `(|dx| + |dy|) * 500` when `prefer_center` is set (`dx`/`dy` are the
/// center offsets normalized by the mask half-extents). The strict `>`
/// comparison makes the earliest-discovered component win exact ties.
pub fn pick_best<'a>(
    comps: &'a [Component],
    mask_w: u32,
    mask_h: u32,
    criteria: &SelectionCriteria,
) -> Option<&'a Component> {
    let total = mask_w as f64 * mask_h as f64;
    let mut best: Option<&Component> = None;
    let mut best_score = f64::NEG_INFINITY;

    for c in comps {
        let area_frac = c.area as f64 / total;
        if area_frac < criteria.min_area_frac || area_frac > criteria.max_area_frac {
            continue;
        }

        let fill = c.fill();
        if fill < criteria.min_fill || fill > criteria.max_fill {
            continue;
        }

        let aspect = c.aspect();
        if aspect < criteria.min_aspect || aspect > criteria.max_aspect {
            continue;
        }

        let mut score = c.area as f64 + fill * 2000.0 - c.w as f64 * 5.0;

        if criteria.prefer_center {
            let cx = (c.min_x + c.max_x) as f64 / 2.0;
            let cy = (c.min_y + c.max_y) as f64 / 2.0;
            let dx = (cx - mask_w as f64 / 2.0).abs() / (mask_w as f64 / 2.0);
            let dy = (cy - mask_h as f64 / 2.0).abs() / (mask_h as f64 / 2.0);
            score -= (dx + dy) * 500.0;
        }

        if score > best_score {
            best_score = score;
            best = Some(c);
        }
    }

    best
}
