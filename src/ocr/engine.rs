use anyhow::{Result, anyhow};
use image::{ImageBuffer, Luma};
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, find_tesseract_executable};

/// Page segmentation mode for a single-character read (one digit).
pub const PSM_SINGLE_CHAR: u8 = 10;
/// Page segmentation mode for a single-line read (multi-digit counters).
pub const PSM_SINGLE_LINE: u8 = 7;

/// Runs Tesseract on a prepared binary crop and returns the raw recognized
/// text.
///
/// The character whitelist is restricted to digits; callers still strip the
/// output because Tesseract can emit whitespace and stray punctuation around
/// the match. Failure of the external process is reported as an error and is
/// not retried: the read is operator-triggered and re-running it is the
/// operator's call.
pub fn recognize_digits(img: &ImageBuffer<Luma<u8>, Vec<u8>>, psm: u8) -> Result<String> {
    let tesseract_exe = find_tesseract_executable()?;
    let tessdata_dir = find_tessdata_dir()?;

    // Tesseract reads from a file, so the crop goes through a temp PNG.
    let temp_input = NamedTempFile::with_suffix(".png")?;
    img.save(temp_input.path())?;

    let output = Command::new(&tesseract_exe)
        .arg(temp_input.path())
        .arg("stdout")
        .arg("--tessdata-dir")
        .arg(&tessdata_dir)
        .arg("-l")
        .arg("eng")
        .arg("--psm")
        .arg(psm.to_string())
        .arg("-c")
        .arg("tessedit_char_whitelist=0123456789")
        .output()
        .map_err(|e| anyhow!("Failed to run Tesseract: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("Tesseract failed: {}", stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
