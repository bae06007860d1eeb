use thiserror::Error;

/// Errors raised while building the breed catalog from its raw source.
///
/// Any of these aborts the whole load: a partially loaded catalog would
/// silently skew every ranking computed from it.
#[derive(Debug, Error)]
pub enum DataIntegrityError {
    #[error("I/O error reading breed catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("breed catalog is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("row {row}: missing breed name")]
    MissingBreedName { row: usize },

    #[error("breed '{breed}': missing value for '{column}'")]
    MissingValue { breed: String, column: String },

    #[error("breed '{breed}': non-numeric value '{value}' for '{column}'")]
    NonNumeric {
        breed: String,
        column: String,
        value: String,
    },

    #[error("duplicate breed '{breed}'")]
    DuplicateBreed { breed: String },

    #[error("breed '{breed}': derived {field} is not a finite number")]
    NonFiniteDerived { breed: String, field: String },

    #[error("breed '{breed}': average size {average_size} is outside the size bins (0, 100.25]")]
    SizeOutOfRange { breed: String, average_size: f64 },
}

/// Errors raised when a preference vector cannot be built from caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPreferenceError {
    #[error("weight for '{dimension}' is not an integer: '{value}'")]
    NotAnInteger { dimension: String, value: String },

    #[error("weight for '{dimension}' must be between 0 and 3, got {value}")]
    OutOfRange { dimension: String, value: i64 },

    #[error("unknown size '{value}', expected one of: small, medium, big, all")]
    UnknownSize { value: String },

    #[error("expected {expected} weights, got {actual}")]
    WrongArity { expected: usize, actual: usize },
}

/// Statistics were requested over a catalog with no breeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("breed catalog is empty")]
pub struct EmptyCatalogError;

/// Errors from breed lookups and attribute comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown breed '{breed}'")]
    UnknownBreed { breed: String },

    #[error("unknown attribute '{attribute}'")]
    UnknownAttribute { attribute: String },

    #[error("cannot group by '{group_by}', expected breed_group or size_category")]
    UnknownGrouping { group_by: String },
}
