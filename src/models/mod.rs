// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AttributePair, BreedAttribute, BreedComparison, BreedRecord, GroupKey, GroupMean, Histogram,
    LifespanSummary, PreferenceVector, PreferenceWeights, RawBreed, ScoredBreed, SizeCategory,
    SizeFilter, SizeLifespan,
};
pub use requests::{CompareBreedsQuery, FindMatchesRequest, ListBreedsQuery};
pub use responses::{
    BreedSummary, CorrelationResponse, ErrorResponse, ExploreResponse, FindMatchesResponse,
    HealthResponse,
};
