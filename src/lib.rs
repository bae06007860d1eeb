//! Puppy Picker - dog breed recommendations
//!
//! This library scores a fixed breed catalog against a user's preference
//! weights and size selector, and summarises the catalog's lifespans.
//! The catalog is loaded once and is read-only afterwards.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{descriptive_lifespan, Catalog, MatchResult, Matcher};
pub use error::{DataIntegrityError, EmptyCatalogError, InvalidPreferenceError, LookupError};
pub use models::{BreedRecord, LifespanSummary, PreferenceVector, PreferenceWeights, SizeCategory, SizeFilter};
