use crate::models::{BreedRecord, PreferenceWeights};

/// Composite score of a breed against a set of preference weights.
///
/// Scoring formula:
/// score = (
///     adaptability * w_adapt +
///     all_around_friendliness * w_friend +
///     health_grooming * w_health +
///     trainability * w_train +
///     exercise_needs * w_exercise +
///     average_lifespan * w_life
/// )
///
/// The result is not rounded or normalised.
#[inline]
pub fn calculate_breed_score(record: &BreedRecord, weights: &PreferenceWeights) -> f64 {
    let raw = record.raw();

    raw.adaptability * f64::from(weights.adaptability())
        + raw.all_around_friendliness * f64::from(weights.all_around_friendliness())
        + raw.health_grooming * f64::from(weights.health_grooming())
        + raw.trainability * f64::from(weights.trainability())
        + raw.exercise_needs * f64::from(weights.exercise_needs())
        + record.average_lifespan() * f64::from(weights.lifespan())
}
