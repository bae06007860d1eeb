use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::InvalidPreferenceError;
use crate::models::domain::PreferenceVector;

/// Request to find matching breeds
///
/// Weights arrive as strings the way a form collects them; they are turned
/// into a [`PreferenceVector`] by [`FindMatchesRequest::to_preference`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    pub adaptability: String,
    #[validate(length(min = 1))]
    #[serde(alias = "all_around_friendliness", rename = "allAroundFriendliness")]
    pub all_around_friendliness: String,
    #[validate(length(min = 1))]
    #[serde(alias = "health_grooming", rename = "healthGrooming")]
    pub health_grooming: String,
    #[validate(length(min = 1))]
    pub trainability: String,
    #[validate(length(min = 1))]
    #[serde(alias = "exercise_needs", rename = "exerciseNeeds")]
    pub exercise_needs: String,
    #[validate(length(min = 1))]
    pub lifespan: String,
    #[serde(default = "default_size")]
    pub size: String,
}

fn default_size() -> String {
    "all".to_string()
}

impl FindMatchesRequest {
    pub fn to_preference(&self) -> Result<PreferenceVector, InvalidPreferenceError> {
        PreferenceVector::parse(
            &[
                &self.adaptability,
                &self.all_around_friendliness,
                &self.health_grooming,
                &self.trainability,
                &self.exercise_needs,
                &self.lifespan,
            ],
            &self.size,
        )
    }
}

/// Query for the breed listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBreedsQuery {
    pub group: Option<String>,
}

/// Query for comparing two breeds
///
/// `attributes` is a comma-separated list of column names; when omitted the
/// five trait scores are compared.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareBreedsQuery {
    #[validate(length(min = 1))]
    pub first: String,
    #[validate(length(min = 1))]
    pub second: String,
    pub attributes: Option<String>,
}
