use schema::Element;
use thiserror::Error;

/// Main error type for the creature battle engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// A caller-supplied value is outside its documented domain
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// The engine configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Rejected input. Every variant names the field that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must list 1 or 2 elements, got {count}")]
    ElementCount { field: &'static str, count: usize },
    #[error("{field} lists `{element}` twice")]
    DuplicateElement { field: &'static str, element: Element },
    #[error("unknown element tag `{0}`")]
    UnknownElement(String),
    #[error("unknown rarity tier `{0}`")]
    UnknownRarity(String),
    #[error("unknown objective kind `{0}`")]
    UnknownObjectiveKind(String),
    #[error("unknown reward kind `{0}`")]
    UnknownRewardKind(String),
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} progress {current} exceeds target {target}")]
    ProgressExceedsTarget {
        field: &'static str,
        current: u32,
        target: u32,
    },
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::ElementCount { field, .. }
            | ValidationError::DuplicateElement { field, .. }
            | ValidationError::Empty { field }
            | ValidationError::ProgressExceedsTarget { field, .. } => field,
            ValidationError::UnknownElement(_) => "element",
            ValidationError::UnknownRarity(_) => "rarity",
            ValidationError::UnknownObjectiveKind(_) => "kind",
            ValidationError::UnknownRewardKind(_) => "reward_type",
        }
    }

    pub(crate) fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}

/// Errors raised while loading an `EngineConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Range check shared by every validated numeric input.
pub(crate) fn check_range<T>(field: &'static str, value: T, min: T, max: T) -> ValidationResult<T>
where
    T: PartialOrd + Copy + Into<f64>,
{
    if value < min || value > max {
        return Err(ValidationError::out_of_range(
            field,
            value.into(),
            min.into(),
            max.into(),
        ));
    }
    Ok(value)
}

/// Like [`check_range`] but for floats, which may also be NaN or infinite.
pub(crate) fn check_fraction(field: &'static str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    check_range(field, value, 0.0, 1.0)
}
