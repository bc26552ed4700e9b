//! Tool configuration.
//!
//! Loads settings from config.json at startup. Every field has a default
//! matching the values the extraction pipeline was tuned with, so a partial
//! (or missing) config file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::extract::ExtractParams;
use crate::extract::region::Rect;
use crate::ocr::PSM_SINGLE_CHAR;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<ToolConfig> = OnceLock::new();

/// Complete tool configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Fixed ROI in image pixels. When absent the ROI is placed
    /// automatically (see `auto_roi`).
    #[serde(default)]
    pub roi: Option<Rect>,
    /// With no fixed ROI: scan the image for the strongest digit-colored
    /// window instead of using the centered default.
    #[serde(default = "default_auto_roi")]
    pub auto_roi: bool,
    /// Extraction pipeline parameters.
    #[serde(default)]
    pub extract: ExtractParams,
    /// Block size for the mask debug preview.
    #[serde(default = "default_mask_preview_scale")]
    pub mask_preview_scale: u32,
    /// Upscale factor for the OCR-prep crop.
    #[serde(default = "default_ocr_scale")]
    pub ocr_scale: u32,
    /// Render the digit dark-on-light for OCR.
    #[serde(default = "default_invert_for_ocr")]
    pub invert_for_ocr: bool,
    /// Tesseract page segmentation mode (10 = single char, 7 = single line).
    #[serde(default = "default_psm")]
    pub psm: u8,
}

fn default_auto_roi() -> bool {
    true
}

fn default_mask_preview_scale() -> u32 {
    4
}

fn default_ocr_scale() -> u32 {
    4
}

fn default_invert_for_ocr() -> bool {
    true
}

fn default_psm() -> u8 {
    PSM_SINGLE_CHAR
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            roi: None,
            auto_roi: default_auto_roi(),
            extract: ExtractParams::default(),
            mask_preview_scale: default_mask_preview_scale(),
            ocr_scale: default_ocr_scale(),
            invert_for_ocr: default_invert_for_ocr(),
            psm: default_psm(),
        }
    }
}

/// Loads configuration from config.json or returns defaults.
/// Looks for config.json in the same directory as the executable.
fn load_config() -> ToolConfig {
    let config_path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("config.json")))
        .unwrap_or_else(|| Path::new("config.json").to_path_buf());

    if config_path.exists() {
        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log(&format!("Config loaded from {}", config_path.display()));
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    ToolConfig::default()
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config() {
    let _ = CONFIG.set(load_config());
}

/// Returns a reference to the global configuration.
/// Panics if called before init_config().
pub fn get_config() -> &'static ToolConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
}
