//! # Catering Companion
//!
//! Scales catering recipes to a guest count, merges the scaled ingredients
//! into a shopping list grouped by category, and renders that list plus a
//! per-recipe guide into printable documents.

pub mod affirmations;
pub mod catalog;
pub mod catering_config;
pub mod catering_errors;
pub mod consolidation;
pub mod documents;
pub mod localization;
pub mod planner;
pub mod quantity_display;
pub mod recipe_matcher;
pub mod render;
pub mod request_handler;
pub mod scaling;
pub mod unit_consolidation;
