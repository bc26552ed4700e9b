pub mod digits;
pub mod engine;
pub mod setup;

pub use engine::{PSM_SINGLE_CHAR, PSM_SINGLE_LINE};
pub use setup::ensure_tessdata;

use anyhow::Result;
use image::{ImageBuffer, Luma};

use digits::extract_digits;
use engine::recognize_digits;

/// High-level read: prepared binary crop → digit string.
///
/// Returns `Ok(None)` when Tesseract ran but found no digits (a valid
/// outcome for an empty or unreadable crop), `Err` only when the engine
/// itself failed.
pub fn read_digits(img: &ImageBuffer<Luma<u8>, Vec<u8>>, psm: u8) -> Result<Option<String>> {
    let text = recognize_digits(img, psm)?;
    extract_digits(&text)
}
