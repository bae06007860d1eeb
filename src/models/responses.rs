use serde::{Deserialize, Serialize};

use crate::models::domain::{
    AttributePair, BreedAttribute, BreedRecord, GroupKey, GroupMean, ScoredBreed, SizeCategory,
};

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub breeds: Vec<String>,
    pub scores: Vec<f64>,
    pub matches: Vec<ScoredBreed>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub breeds: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// One row of the display-only breed listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedSummary {
    pub breed: String,
    #[serde(rename = "breedGroup")]
    pub breed_group: String,
    #[serde(rename = "sizeCategory")]
    pub size_category: SizeCategory,
}

impl From<&BreedRecord> for BreedSummary {
    fn from(record: &BreedRecord) -> Self {
        Self {
            breed: record.breed().to_string(),
            breed_group: record.breed_group().to_string(),
            size_category: record.size_category(),
        }
    }
}

/// Two-attribute exploration: one point per breed, plus group means when requested
#[derive(Debug, Clone, Serialize)]
pub struct ExploreResponse {
    pub x: BreedAttribute,
    pub y: BreedAttribute,
    pub points: Vec<AttributePair>,
    #[serde(rename = "groupBy", skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupMean>>,
}

/// Size vs lifespan correlation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResponse {
    pub correlation: Option<f64>,
    pub breeds: usize,
}
