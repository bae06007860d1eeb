// Core algorithm exports
pub mod catalog;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod stats;

pub use catalog::Catalog;
pub use filters::{filter_by_size, matches_size};
pub use matcher::{Matcher, MatchResult, DEFAULT_MATCH_LIMIT};
pub use scoring::calculate_breed_score;
pub use stats::{
    attribute_pairs, descriptive_lifespan, grouped_mean, histogram, lifespan_by_size,
    size_lifespan_correlation, MAX_HISTOGRAM_BINS,
};
