use anyhow::Result;
use regex::Regex;

/// Pattern for everything that is not a digit.
const NON_DIGIT_PATTERN: &str = r"\D+";

/// Reduces raw OCR text to the digit reading.
///
/// Even with a digit whitelist, Tesseract output can carry whitespace and
/// line noise around the match, and multi-digit readings are often split
/// into separate words. All non-digit characters are removed and the
/// remaining digits concatenated in order, so `"1 23"` reads as `"123"`.
/// Returns `None` when the text contains no digits at all, which callers
/// report as "no reading" rather than an error.
pub fn extract_digits(text: &str) -> Result<Option<String>> {
    let non_digit = Regex::new(NON_DIGIT_PATTERN)?;
    let digits = non_digit.replace_all(text, "");

    if digits.is_empty() {
        Ok(None)
    } else {
        Ok(Some(digits.into_owned()))
    }
}
