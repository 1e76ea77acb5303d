//! # Catering Error Types Module
//!
//! This module defines the error types used throughout the planning pipeline.
//! Catalog problems, request problems and rendering problems each get their own
//! enum so callers can decide which ones are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading and validating the recipe catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file does not exist
    #[error("Recipe catalog not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The catalog file exists but could not be read
    #[error("Failed to read recipe catalog {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure itself is broken
    #[error("Malformed recipe catalog: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Recipe catalog is missing required column '{0}'")]
    MissingColumn(String),

    /// A single row failed validation
    #[error("Invalid catalog row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    /// Rows of the same recipe disagree on their base servings
    #[error("Recipe '{recipe}' has inconsistent BaseServings ({first} vs {other})")]
    InconsistentServings {
        recipe: String,
        first: u32,
        other: u32,
    },

    /// The table has a header but no data rows
    #[error("Recipe catalog contains no recipes")]
    Empty,
}

/// Errors raised while turning a request into a plan
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request text was blank
    #[error("Request is empty")]
    EmptyRequest,

    /// No catalog recipe name appears in the request
    #[error("No matching recipes found in request '{0}'")]
    NoMatch(String),
}

/// Errors raised while rendering or writing documents
#[derive(Debug, Error)]
pub enum RenderError {
    /// Serializing the plan failed
    #[error("Failed to serialize plan: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Formatting a document into text failed
    #[error("Failed to format document: {0}")]
    Format(#[from] std::fmt::Error),

    /// Writing a document failed
    #[error("Failed to write document {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while reading configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A setting has a value that cannot be interpreted
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}
