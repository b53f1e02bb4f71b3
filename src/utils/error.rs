use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Course has no assessments")]
    EmptyCourse,

    #[error("Duplicate assessment name: {name}")]
    DuplicateAssessment { name: String },

    #[error("Invalid assessment '{name}': {reason}")]
    InvalidAssessment { name: String, reason: String },

    #[error("Assessment weights sum to {actual}, expected {expected}")]
    WeightTotalMismatch { expected: f64, actual: f64 },

    #[error("Invalid grade scale: {reason}")]
    InvalidGradeScale { reason: String },

    #[error("Unknown grade: {abbreviation}")]
    UnknownGrade { abbreviation: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Validation,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GradeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GradeError::IoError(_) => ErrorCategory::Io,
            GradeError::SerializationError(_) => ErrorCategory::Data,
            GradeError::ConfigError { .. }
            | GradeError::ConfigValidationError { .. }
            | GradeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GradeError::EmptyCourse
            | GradeError::DuplicateAssessment { .. }
            | GradeError::InvalidAssessment { .. }
            | GradeError::WeightTotalMismatch { .. }
            | GradeError::InvalidGradeScale { .. }
            | GradeError::UnknownGrade { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GradeError::IoError(_) => {
                "Check that the configuration file exists and is readable".to_string()
            }
            GradeError::SerializationError(_) => {
                "Report output could not be serialized; try running without --json".to_string()
            }
            GradeError::ConfigError { .. } | GradeError::ConfigValidationError { .. } => {
                "Make sure the file is valid TOML with [course] and [[assessments]] sections"
                    .to_string()
            }
            GradeError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            GradeError::EmptyCourse => {
                "Add at least one [[assessments]] entry to the configuration".to_string()
            }
            GradeError::DuplicateAssessment { name } => {
                format!("Rename one of the assessments called '{}'", name)
            }
            GradeError::InvalidAssessment { name, .. } => {
                format!("Correct the weight or mark of assessment '{}'", name)
            }
            GradeError::WeightTotalMismatch { expected, .. } => format!(
                "Adjust assessment weights so they add up to {}, or disable strict_weights",
                expected
            ),
            GradeError::InvalidGradeScale { .. } => {
                "Give every [[grades]] entry a distinct minMark and abbreviation".to_string()
            }
            GradeError::UnknownGrade { .. } => {
                "Use one of the abbreviations listed in the grade scale".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read input: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Validation => format!("Course data is invalid: {}", self),
            ErrorCategory::Data => format!("Output failed: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;
