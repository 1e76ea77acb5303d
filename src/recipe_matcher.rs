//! # Recipe Matcher Module
//!
//! Pulls a guest count and a set of known recipe names out of a free-text
//! request such as `"Meatballs, Caesar Salad for 300 people"`.
//!
//! ## Matching modes
//!
//! - [`MatchMode::Substring`]: a recipe is selected when its lower-cased name
//!   appears anywhere in the lower-cased request. A name that is part of a
//!   longer word also matches ("Pie" matches "pieces").
//! - [`MatchMode::WordBoundary`]: the name must start and end on word
//!   boundaries.

use crate::catering_errors::{ConfigError, PlanError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

/// Guest count used when the request contains no number
pub const DEFAULT_GUEST_COUNT: u32 = 10;

/// How recipe names are located in the request text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    Substring,
    WordBoundary,
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "word-boundary" | "word_boundary" | "word" => Ok(MatchMode::WordBoundary),
            _ => Err(ConfigError::InvalidValue {
                key: "match mode".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Result of matching a request against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMatch {
    /// Matched recipe names, in catalog order
    pub recipes: Vec<String>,
    /// Number of guests to cater for
    pub guest_count: u32,
}

/// Matches requests against a fixed list of recipe names
#[derive(Debug, Clone)]
pub struct RecipeMatcher {
    mode: MatchMode,
    default_guest_count: u32,
}

impl Default for RecipeMatcher {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            default_guest_count: DEFAULT_GUEST_COUNT,
        }
    }
}

impl RecipeMatcher {
    /// Create a matcher with the given mode and fallback guest count
    pub fn new(mode: MatchMode, default_guest_count: u32) -> Self {
        Self {
            mode,
            default_guest_count: default_guest_count.max(1),
        }
    }

    /// Match a request against the known recipe names
    ///
    /// # Arguments
    ///
    /// * `request` - Free text typed by the user
    /// * `known_recipes` - Recipe names in catalog order
    ///
    /// # Returns
    ///
    /// The matched names (catalog order, not request order) and the guest
    /// count, or [`PlanError::NoMatch`] when nothing matched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catering_companion::recipe_matcher::RecipeMatcher;
    ///
    /// let matcher = RecipeMatcher::default();
    /// let matched = matcher
    ///     .match_request("Meatballs for 300 people", &["Meatballs", "Caesar Salad"])
    ///     .unwrap();
    /// assert_eq!(matched.recipes, vec!["Meatballs"]);
    /// assert_eq!(matched.guest_count, 300);
    /// ```
    pub fn match_request(
        &self,
        request: &str,
        known_recipes: &[&str],
    ) -> Result<RequestMatch, PlanError> {
        if request.trim().is_empty() {
            return Err(PlanError::EmptyRequest);
        }

        let request_lower = request.to_lowercase();
        let guest_count = extract_guest_count(request).unwrap_or(self.default_guest_count);

        let recipes: Vec<String> = known_recipes
            .iter()
            .filter(|name| self.name_appears(name, &request_lower))
            .map(|name| name.to_string())
            .collect();

        if recipes.is_empty() {
            info!(request = %request, "No catalog recipe found in request");
            return Err(PlanError::NoMatch(request.to_string()));
        }

        info!(
            recipes = ?recipes,
            guest_count,
            mode = ?self.mode,
            "Matched request"
        );

        Ok(RequestMatch {
            recipes,
            guest_count,
        })
    }

    fn name_appears(&self, name: &str, request_lower: &str) -> bool {
        let name_lower = name.trim().to_lowercase();
        if name_lower.is_empty() {
            return false;
        }

        match self.mode {
            MatchMode::Substring => request_lower.contains(&name_lower),
            MatchMode::WordBoundary => {
                // Names may start or end on punctuation, where `\b` never matches
                let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&name_lower));
                match Regex::new(&pattern) {
                    Ok(regex) => regex.is_match(request_lower),
                    Err(e) => {
                        debug!(name = %name, error = %e, "Falling back to substring match");
                        request_lower.contains(&name_lower)
                    }
                }
            }
        }
    }
}

/// Sentence punctuation that may trail a number ("300," or "300.")
const TRAILING_PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?'];
/// Brackets and quotes that may wrap a number ("(300)" or "'300'")
const WRAPPING_PUNCTUATION: &[char] = &['(', ')', '"', '\''];

/// Find the first whole-number token in the request
///
/// Tokens are split on whitespace. Trailing sentence punctuation and wrapping
/// brackets or quotes are stripped, so `"300,"` and `"(300)"` both count, while
/// signed or prefixed tokens such as `"-5"`, `"#2"` and `"$300"` do not. Zero
/// and values that overflow `u32` are skipped.
pub fn extract_guest_count(request: &str) -> Option<u32> {
    request
        .split_whitespace()
        .map(strip_number_punctuation)
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|token| token.parse::<u32>().ok())
        .find(|count| *count > 0)
}

fn strip_number_punctuation(token: &str) -> &str {
    token
        .trim_end_matches(TRAILING_PUNCTUATION)
        .trim_matches(WRAPPING_PUNCTUATION)
        .trim_end_matches(TRAILING_PUNCTUATION)
}
