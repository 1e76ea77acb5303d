//! # Catering Configuration Module
//!
//! Runtime settings for the planner, with defaults that reproduce the
//! classic behavior (substring matching, raw quantities, 10 guests).
//! Values can be overridden from environment variables.

use crate::catering_errors::ConfigError;
use crate::localization::DEFAULT_LANGUAGE;
use crate::quantity_display::QuantityPrecision;
use crate::recipe_matcher::{MatchMode, DEFAULT_GUEST_COUNT};
use crate::render::{OutputFormat, RenderOptions, DEFAULT_COLUMNS, DEFAULT_COLUMN_WIDTH};
use std::path::PathBuf;

// Default catalog location, relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "master_recipe_template.csv";

pub const ENV_CATALOG_PATH: &str = "CATERING_CATALOG_PATH";
pub const ENV_OUTPUT_DIR: &str = "CATERING_OUTPUT_DIR";
pub const ENV_DEFAULT_GUESTS: &str = "CATERING_DEFAULT_GUESTS";
pub const ENV_MATCH_MODE: &str = "CATERING_MATCH_MODE";
pub const ENV_QUANTITY_PRECISION: &str = "CATERING_QUANTITY_PRECISION";
pub const ENV_FORMAT: &str = "CATERING_FORMAT";
pub const ENV_COLUMNS: &str = "CATERING_COLUMNS";
pub const ENV_LANGUAGE: &str = "CATERING_LANGUAGE";
pub const ENV_AFFIRMATIONS: &str = "CATERING_AFFIRMATIONS";

/// Configuration structure for the catering planner
#[derive(Debug, Clone, PartialEq)]
pub struct CateringConfig {
    /// Path of the master recipe CSV
    pub catalog_path: PathBuf,
    /// Where documents are written; temporary files when `None`
    pub output_dir: Option<PathBuf>,
    /// Guest count when the request has no number
    pub default_guest_count: u32,
    /// How recipe names are found in the request
    pub match_mode: MatchMode,
    /// How quantities are printed
    pub precision: QuantityPrecision,
    /// Document format
    pub format: OutputFormat,
    /// Checkbox columns in the text shopping list
    pub columns: usize,
    /// Language code for messages and headings (e.g., "en", "fr")
    pub language: String,
    /// Whether to print an affirmation per request
    pub show_affirmations: bool,
}

impl Default for CateringConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            output_dir: None,
            default_guest_count: DEFAULT_GUEST_COUNT,
            match_mode: MatchMode::Substring,
            precision: QuantityPrecision::Raw,
            format: OutputFormat::Text,
            columns: DEFAULT_COLUMNS,
            language: DEFAULT_LANGUAGE.to_string(),
            show_affirmations: true,
        }
    }
}

impl CateringConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    ///
    /// Unset or blank keys keep their default; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_CATALOG_PATH) {
            config.catalog_path = PathBuf::from(path.trim());
        }
        if let Some(dir) = get(ENV_OUTPUT_DIR) {
            config.output_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(value) = get(ENV_DEFAULT_GUESTS) {
            config.default_guest_count = value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|guests| *guests > 0)
                .ok_or_else(|| invalid(ENV_DEFAULT_GUESTS, &value))?;
        }
        if let Some(value) = get(ENV_MATCH_MODE) {
            config.match_mode = value.parse().map_err(|_| invalid(ENV_MATCH_MODE, &value))?;
        }
        if let Some(value) = get(ENV_QUANTITY_PRECISION) {
            config.precision = value
                .parse()
                .map_err(|_| invalid(ENV_QUANTITY_PRECISION, &value))?;
        }
        if let Some(value) = get(ENV_FORMAT) {
            config.format = value.parse().map_err(|_| invalid(ENV_FORMAT, &value))?;
        }
        if let Some(value) = get(ENV_COLUMNS) {
            config.columns = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|columns| *columns > 0)
                .ok_or_else(|| invalid(ENV_COLUMNS, &value))?;
        }
        if let Some(value) = get(ENV_LANGUAGE) {
            config.language = value.trim().to_lowercase();
        }
        if let Some(value) = get(ENV_AFFIRMATIONS) {
            config.show_affirmations =
                parse_bool(&value).ok_or_else(|| invalid(ENV_AFFIRMATIONS, &value))?;
        }

        Ok(config)
    }

    /// Layout options derived from this configuration
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            columns: self.columns,
            column_width: DEFAULT_COLUMN_WIDTH,
            precision: self.precision,
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
