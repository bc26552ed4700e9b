//! Vacancy counter OCR tool.
//!
//! Reads the digit off a photographed parking-vacancy counter board:
//! HSV color mask → connected components → best-blob crop → Tesseract.
//! Each pipeline stage is written to `debug/` as an image so thresholds can
//! be tuned against real photos.

mod config;
mod extract;
mod ocr;
mod paths;

use anyhow::{Result, anyhow};
use chrono::Local;
use image::{ImageBuffer, Rgba};
use std::fs::OpenOptions;
use std::io::Write;

use extract::region::Rect;
use extract::{Extraction, extract, locate, render};

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("vacancy_ocr.log");
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    let image_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("Usage: vacancy-ocr <image>"))?;

    paths::ensure_directories()?;
    config::init_config();

    if let Err(e) = ocr::ensure_tessdata() {
        log(&format!("Warning: Failed to set up tessdata: {}", e));
        log("OCR may not work until Tesseract language data is installed.");
    }

    let cfg = config::get_config();

    log(&format!("Loading {}", image_path));
    let img = image::open(&image_path)?.to_rgba8();
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(anyhow!("Image is empty: {}", image_path));
    }
    log(&format!("Image: {}x{}", width, height));

    let roi = resolve_roi(&img, cfg);
    let extraction = extract(&img, roi, &cfg.extract);
    log_extraction(&extraction, cfg);

    save_step_images(&img, &extraction, cfg)?;

    let prep = render::ocr_prep(
        &img,
        extraction.crop_box,
        &cfg.extract.threshold,
        cfg.ocr_scale,
        cfg.invert_for_ocr,
    );

    if cfg.psm != ocr::PSM_SINGLE_CHAR && cfg.psm != ocr::PSM_SINGLE_LINE {
        log(&format!(
            "Note: unusual PSM {} (common: {} = single char, {} = single line)",
            cfg.psm,
            ocr::PSM_SINGLE_CHAR,
            ocr::PSM_SINGLE_LINE
        ));
    }

    log("Running OCR...");
    match ocr::read_digits(&prep, cfg.psm)? {
        Some(digits) => {
            log(&format!("Reading: {}", digits));
            println!("{}", digits);
        }
        None => {
            log("No digits recognized in crop");
            println!("-");
        }
    }

    Ok(())
}

/// Decides where to look for the counter: configured ROI, auto-scan, or the
/// centered default.
fn resolve_roi(img: &ImageBuffer<Rgba<u8>, Vec<u8>>, cfg: &config::ToolConfig) -> Rect {
    let (width, height) = img.dimensions();

    if let Some(roi) = cfg.roi {
        return roi.clamp_to(width, height);
    }

    if cfg.auto_roi {
        if let Some(roi) = locate::auto_find_roi(img, &cfg.extract.threshold) {
            log(&format!(
                "Auto ROI: x={} y={} w={} h={}",
                roi.x, roi.y, roi.w, roi.h
            ));
            return roi;
        }
    }

    default_roi(width, height)
}

/// Center-ish default window, used when nothing better is known.
fn default_roi(width: u32, height: u32) -> Rect {
    let w = width.min(280);
    let h = height.min(200);
    Rect::new(
        ((width - w) as f32 * 0.35) as u32,
        ((height - h) as f32 * 0.35) as u32,
        w,
        h,
    )
}

/// Logs the per-stage numbers the operator tunes against.
fn log_extraction(out: &Extraction, cfg: &config::ToolConfig) {
    let roi = out.roi;
    log(&format!(
        "ROI: x={} y={} w={} h={}",
        roi.x, roi.y, roi.w, roi.h
    ));
    log(&format!(
        "Mask: step={} {}x{} cells, {} on, {} components",
        cfg.extract.step.max(1),
        out.mask.w,
        out.mask.h,
        out.mask.count_ones(),
        out.components.len()
    ));

    match &out.best {
        Some(c) => log(&format!(
            "Best: area={} bbox={}x{} fill={:.3} aspect={:.3}",
            c.area,
            c.w,
            c.h,
            c.fill(),
            c.aspect()
        )),
        None => log("Best: (none, falling back to ROI)"),
    }

    let b = out.crop_box;
    log(&format!(
        "Crop: x={} y={} w={} h={}",
        b.x, b.y, b.w, b.h
    ));

    let thr = &cfg.extract.threshold;
    log(&format!(
        "HSV: center={}° range=±{}° satMin={:.2} valMin={:.2}",
        thr.hue_center, thr.hue_range, thr.sat_min, thr.val_min
    ));
}

/// Writes the four step outputs to the debug directory.
fn save_step_images(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    out: &Extraction,
    cfg: &config::ToolConfig,
) -> Result<()> {
    let dir = paths::get_debug_dir();

    render::roi_preview(img, out.roi).save(dir.join("step1_roi.png"))?;
    render::mask_preview(&out.mask, cfg.mask_preview_scale).save(dir.join("step2_mask.png"))?;
    render::roi_preview(img, out.crop_box).save(dir.join("step3_tight.png"))?;
    render::ocr_prep(
        img,
        out.crop_box,
        &cfg.extract.threshold,
        cfg.ocr_scale,
        cfg.invert_for_ocr,
    )
    .save(dir.join("step4_ocr_prep.png"))?;

    log(&format!("Step images written to {}", dir.display()));
    Ok(())
}
