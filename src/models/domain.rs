use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DataIntegrityError, InvalidPreferenceError, LookupError};

/// Inclusive upper bound of the `small` size bin
pub const SMALL_SIZE_LIMIT: f64 = 17.3125;
/// Inclusive upper bound of the `medium` size bin
pub const MEDIUM_SIZE_LIMIT: f64 = 47.46875;
/// Inclusive upper bound of the `big` size bin
pub const BIG_SIZE_LIMIT: f64 = 100.25;

/// Largest accepted preference weight
pub const MAX_WEIGHT: u8 = 3;

/// Scoring dimensions, in the fixed order weights are supplied in
pub const WEIGHT_DIMENSIONS: [&str; 6] = [
    "adaptability",
    "all_around_friendliness",
    "health_grooming",
    "trainability",
    "exercise_needs",
    "average_lifespan",
];

/// Size bucket derived from a breed's average morphometric size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Small,
    Medium,
    Big,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 3] = [SizeCategory::Small, SizeCategory::Medium, SizeCategory::Big];

    /// Bin an average size into a category.
    ///
    /// Bins are `[0, 17.3125]`, `(17.3125, 47.46875]` and `(47.46875, 100.25]`.
    /// Anything else (negative, above 100.25, NaN) has no category.
    pub fn from_average_size(average_size: f64) -> Option<Self> {
        if average_size.is_nan() || average_size < 0.0 {
            None
        } else if average_size <= SMALL_SIZE_LIMIT {
            Some(SizeCategory::Small)
        } else if average_size <= MEDIUM_SIZE_LIMIT {
            Some(SizeCategory::Medium)
        } else if average_size <= BIG_SIZE_LIMIT {
            Some(SizeCategory::Big)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Big => "big",
        }
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size selector of a preference vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeFilter {
    Small,
    Medium,
    Big,
    All,
}

impl SizeFilter {
    /// Whether a breed of the given category passes this filter
    #[inline]
    pub fn admits(&self, category: SizeCategory) -> bool {
        match self {
            SizeFilter::All => true,
            SizeFilter::Small => category == SizeCategory::Small,
            SizeFilter::Medium => category == SizeCategory::Medium,
            SizeFilter::Big => category == SizeCategory::Big,
        }
    }
}

impl From<SizeCategory> for SizeFilter {
    fn from(category: SizeCategory) -> Self {
        match category {
            SizeCategory::Small => SizeFilter::Small,
            SizeCategory::Medium => SizeFilter::Medium,
            SizeCategory::Big => SizeFilter::Big,
        }
    }
}

impl FromStr for SizeFilter {
    type Err = InvalidPreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SizeFilter::Small),
            "medium" => Ok(SizeFilter::Medium),
            "big" => Ok(SizeFilter::Big),
            "all" => Ok(SizeFilter::All),
            _ => Err(InvalidPreferenceError::UnknownSize {
                value: s.to_string(),
            }),
        }
    }
}

/// One catalog row as it appears in the raw source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBreed {
    pub breed: String,
    pub breed_group: String,
    pub min_height_male: f64,
    pub max_height_male: f64,
    pub min_weight_male: f64,
    pub max_weight_male: f64,
    pub min_height_female: f64,
    pub max_height_female: f64,
    pub min_weight_female: f64,
    pub max_weight_female: f64,
    pub min_life_expectancy: f64,
    pub max_life_expectancy: f64,
    pub adaptability: f64,
    pub all_around_friendliness: f64,
    pub health_grooming: f64,
    pub trainability: f64,
    pub exercise_needs: f64,
}

impl RawBreed {
    /// Mean of the two life expectancy bounds
    pub fn average_lifespan(&self) -> f64 {
        (self.min_life_expectancy + self.max_life_expectancy) / 2.0
    }

    /// Mean of all eight height and weight bounds, male and female
    pub fn average_size(&self) -> f64 {
        (self.min_height_male
            + self.max_height_male
            + self.min_weight_male
            + self.max_weight_male
            + self.min_height_female
            + self.max_height_female
            + self.min_weight_female
            + self.max_weight_female)
            / 8.0
    }
}

/// Catalog entry: the raw row plus the fields derived from it at load time.
///
/// Derived fields are private so a record can only be obtained through
/// [`BreedRecord::derive`], which keeps them consistent with the raw values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedRecord {
    #[serde(flatten)]
    raw: RawBreed,
    average_lifespan: f64,
    average_size: f64,
    size_category: SizeCategory,
}

impl BreedRecord {
    /// Compute the derived fields for a raw row
    pub fn derive(raw: RawBreed) -> Result<Self, DataIntegrityError> {
        let average_lifespan = raw.average_lifespan();
        if !average_lifespan.is_finite() {
            return Err(DataIntegrityError::NonFiniteDerived {
                breed: raw.breed,
                field: "average_lifespan".to_string(),
            });
        }

        let average_size = raw.average_size();
        let size_category = SizeCategory::from_average_size(average_size).ok_or_else(|| {
            DataIntegrityError::SizeOutOfRange {
                breed: raw.breed.clone(),
                average_size,
            }
        })?;

        Ok(Self {
            raw,
            average_lifespan,
            average_size,
            size_category,
        })
    }

    pub fn raw(&self) -> &RawBreed {
        &self.raw
    }

    pub fn breed(&self) -> &str {
        &self.raw.breed
    }

    pub fn breed_group(&self) -> &str {
        &self.raw.breed_group
    }

    pub fn average_lifespan(&self) -> f64 {
        self.average_lifespan
    }

    pub fn average_size(&self) -> f64 {
        self.average_size
    }

    pub fn size_category(&self) -> SizeCategory {
        self.size_category
    }

    /// Value of a numeric column, raw or derived
    pub fn attribute(&self, attribute: BreedAttribute) -> f64 {
        let raw = &self.raw;
        match attribute {
            BreedAttribute::MinHeightMale => raw.min_height_male,
            BreedAttribute::MaxHeightMale => raw.max_height_male,
            BreedAttribute::MinWeightMale => raw.min_weight_male,
            BreedAttribute::MaxWeightMale => raw.max_weight_male,
            BreedAttribute::MinHeightFemale => raw.min_height_female,
            BreedAttribute::MaxHeightFemale => raw.max_height_female,
            BreedAttribute::MinWeightFemale => raw.min_weight_female,
            BreedAttribute::MaxWeightFemale => raw.max_weight_female,
            BreedAttribute::MinLifeExpectancy => raw.min_life_expectancy,
            BreedAttribute::MaxLifeExpectancy => raw.max_life_expectancy,
            BreedAttribute::Adaptability => raw.adaptability,
            BreedAttribute::AllAroundFriendliness => raw.all_around_friendliness,
            BreedAttribute::HealthGrooming => raw.health_grooming,
            BreedAttribute::Trainability => raw.trainability,
            BreedAttribute::ExerciseNeeds => raw.exercise_needs,
            BreedAttribute::AverageLifespan => self.average_lifespan,
            BreedAttribute::AverageSize => self.average_size,
        }
    }

    /// The five trait scores in display order
    pub fn trait_profile(&self) -> [(BreedAttribute, f64); 5] {
        BreedAttribute::TRAITS.map(|attribute| (attribute, self.attribute(attribute)))
    }
}

/// A numeric catalog column, addressable by its column name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedAttribute {
    MinHeightMale,
    MaxHeightMale,
    MinWeightMale,
    MaxWeightMale,
    MinHeightFemale,
    MaxHeightFemale,
    MinWeightFemale,
    MaxWeightFemale,
    MinLifeExpectancy,
    MaxLifeExpectancy,
    Adaptability,
    AllAroundFriendliness,
    HealthGrooming,
    Trainability,
    ExerciseNeeds,
    AverageLifespan,
    AverageSize,
}

impl BreedAttribute {
    pub const ALL: [BreedAttribute; 17] = [
        BreedAttribute::MinHeightMale,
        BreedAttribute::MaxHeightMale,
        BreedAttribute::MinWeightMale,
        BreedAttribute::MaxWeightMale,
        BreedAttribute::MinHeightFemale,
        BreedAttribute::MaxHeightFemale,
        BreedAttribute::MinWeightFemale,
        BreedAttribute::MaxWeightFemale,
        BreedAttribute::MinLifeExpectancy,
        BreedAttribute::MaxLifeExpectancy,
        BreedAttribute::Adaptability,
        BreedAttribute::AllAroundFriendliness,
        BreedAttribute::HealthGrooming,
        BreedAttribute::Trainability,
        BreedAttribute::ExerciseNeeds,
        BreedAttribute::AverageLifespan,
        BreedAttribute::AverageSize,
    ];

    /// Trait scores (0-5) in the order they are charted
    pub const TRAITS: [BreedAttribute; 5] = [
        BreedAttribute::AllAroundFriendliness,
        BreedAttribute::Trainability,
        BreedAttribute::HealthGrooming,
        BreedAttribute::ExerciseNeeds,
        BreedAttribute::Adaptability,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            BreedAttribute::MinHeightMale => "min_height_male",
            BreedAttribute::MaxHeightMale => "max_height_male",
            BreedAttribute::MinWeightMale => "min_weight_male",
            BreedAttribute::MaxWeightMale => "max_weight_male",
            BreedAttribute::MinHeightFemale => "min_height_female",
            BreedAttribute::MaxHeightFemale => "max_height_female",
            BreedAttribute::MinWeightFemale => "min_weight_female",
            BreedAttribute::MaxWeightFemale => "max_weight_female",
            BreedAttribute::MinLifeExpectancy => "min_life_expectancy",
            BreedAttribute::MaxLifeExpectancy => "max_life_expectancy",
            BreedAttribute::Adaptability => "adaptability",
            BreedAttribute::AllAroundFriendliness => "all_around_friendliness",
            BreedAttribute::HealthGrooming => "health_grooming",
            BreedAttribute::Trainability => "trainability",
            BreedAttribute::ExerciseNeeds => "exercise_needs",
            BreedAttribute::AverageLifespan => "average_lifespan",
            BreedAttribute::AverageSize => "average_size",
        }
    }
}

impl fmt::Display for BreedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for BreedAttribute {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        BreedAttribute::ALL
            .into_iter()
            .find(|attribute| attribute.column() == name)
            .ok_or_else(|| LookupError::UnknownAttribute {
                attribute: s.to_string(),
            })
    }
}

/// The six importance weights of a preference vector, each in `0..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PreferenceWeights {
    adaptability: u8,
    all_around_friendliness: u8,
    health_grooming: u8,
    trainability: u8,
    exercise_needs: u8,
    lifespan: u8,
}

impl PreferenceWeights {
    /// Build from weights in dimension order, rejecting values above 3
    pub fn new(values: [u8; 6]) -> Result<Self, InvalidPreferenceError> {
        for (dimension, value) in WEIGHT_DIMENSIONS.iter().zip(values) {
            if value > MAX_WEIGHT {
                return Err(InvalidPreferenceError::OutOfRange {
                    dimension: dimension.to_string(),
                    value: i64::from(value),
                });
            }
        }

        let [adaptability, all_around_friendliness, health_grooming, trainability, exercise_needs, lifespan] =
            values;
        Ok(Self {
            adaptability,
            all_around_friendliness,
            health_grooming,
            trainability,
            exercise_needs,
            lifespan,
        })
    }

    /// Parse six textual weights in dimension order.
    ///
    /// Each value must be an integer in `0..=3`; surrounding whitespace is
    /// ignored. Nothing is clamped.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, InvalidPreferenceError> {
        if values.len() != WEIGHT_DIMENSIONS.len() {
            return Err(InvalidPreferenceError::WrongArity {
                expected: WEIGHT_DIMENSIONS.len(),
                actual: values.len(),
            });
        }

        let mut parsed = [0u8; 6];
        for ((slot, dimension), value) in parsed.iter_mut().zip(WEIGHT_DIMENSIONS).zip(values) {
            *slot = parse_weight(dimension, value.as_ref())?;
        }

        Self::new(parsed)
    }

    /// Weights in dimension order
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.adaptability,
            self.all_around_friendliness,
            self.health_grooming,
            self.trainability,
            self.exercise_needs,
            self.lifespan,
        ]
    }

    pub fn adaptability(&self) -> u8 {
        self.adaptability
    }

    pub fn all_around_friendliness(&self) -> u8 {
        self.all_around_friendliness
    }

    pub fn health_grooming(&self) -> u8 {
        self.health_grooming
    }

    pub fn trainability(&self) -> u8 {
        self.trainability
    }

    pub fn exercise_needs(&self) -> u8 {
        self.exercise_needs
    }

    pub fn lifespan(&self) -> u8 {
        self.lifespan
    }
}

fn parse_weight(dimension: &str, value: &str) -> Result<u8, InvalidPreferenceError> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| InvalidPreferenceError::NotAnInteger {
            dimension: dimension.to_string(),
            value: value.to_string(),
        })?;

    u8::try_from(parsed)
        .ok()
        .filter(|weight| *weight <= MAX_WEIGHT)
        .ok_or_else(|| InvalidPreferenceError::OutOfRange {
            dimension: dimension.to_string(),
            value: parsed,
        })
}

/// Weights plus size selector for a single matching query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreferenceVector {
    pub weights: PreferenceWeights,
    pub size: SizeFilter,
}

impl PreferenceVector {
    pub fn new(weights: PreferenceWeights, size: SizeFilter) -> Self {
        Self { weights, size }
    }

    /// Build from the textual form a caller collects: six weights and a size
    pub fn parse<S: AsRef<str>>(weights: &[S], size: &str) -> Result<Self, InvalidPreferenceError> {
        Ok(Self {
            weights: PreferenceWeights::parse(weights)?,
            size: size.parse()?,
        })
    }
}

/// A breed and its composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBreed {
    pub breed: String,
    pub score: f64,
}

/// Catalog-wide lifespan statistics, truncated to whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifespanSummary {
    pub min: i64,
    pub max: i64,
    pub mean: i64,
    pub mode: i64,
}

/// Mean lifespan of the breeds in one size category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLifespan {
    pub size: SizeCategory,
    #[serde(rename = "meanLifespan")]
    pub mean_lifespan: f64,
    pub breeds: usize,
}

/// Side-by-side attribute values for two breeds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedComparison {
    pub first: String,
    pub second: String,
    pub attributes: Vec<BreedAttribute>,
    #[serde(rename = "firstValues")]
    pub first_values: Vec<f64>,
    #[serde(rename = "secondValues")]
    pub second_values: Vec<f64>,
}

/// Equal-width bin counts of one attribute; `edges` has one more entry than `counts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub attribute: BreedAttribute,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Categorical column used to bucket breeds for a grouped mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    BreedGroup,
    SizeCategory,
}

impl GroupKey {
    pub fn column(self) -> &'static str {
        match self {
            GroupKey::BreedGroup => "breed_group",
            GroupKey::SizeCategory => "size_category",
        }
    }

    /// The bucket label of one record
    pub fn label(self, record: &BreedRecord) -> &str {
        match self {
            GroupKey::BreedGroup => record.breed_group(),
            GroupKey::SizeCategory => record.size_category().as_str(),
        }
    }
}

impl FromStr for GroupKey {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "breed_group" => Ok(GroupKey::BreedGroup),
            "size_category" => Ok(GroupKey::SizeCategory),
            _ => Err(LookupError::UnknownGrouping {
                group_by: s.to_string(),
            }),
        }
    }
}

/// One breed plotted on two chosen attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributePair {
    pub breed: String,
    pub x: f64,
    pub y: f64,
}

/// Mean of one attribute over the breeds sharing a group label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
    pub breeds: usize,
}
