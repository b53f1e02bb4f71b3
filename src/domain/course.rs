use crate::domain::model::Assessment;
use crate::utils::error::{GradeError, Result};
use crate::utils::validation::{find_duplicate, validate_finite, validate_range};
use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// 計算參數，對應設定檔的 `[calculation]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculationSettings {
    #[serde(default = "CalculationSettings::default_weight_total")]
    pub weight_total: f64,
    #[serde(default = "CalculationSettings::default_max_mark")]
    pub max_mark: f64,
    #[serde(default)]
    pub strict_weights: bool,
    #[serde(default = "CalculationSettings::default_decimal_places")]
    pub decimal_places: u32,
}

impl CalculationSettings {
    fn default_weight_total() -> f64 {
        100.0
    }

    fn default_max_mark() -> f64 {
        100.0
    }

    fn default_decimal_places() -> u32 {
        1
    }

    pub fn validate(&self) -> Result<()> {
        validate_finite("calculation.weight_total", self.weight_total)?;
        if self.weight_total <= 0.0 {
            return Err(GradeError::InvalidConfigValueError {
                field: "calculation.weight_total".to_string(),
                value: self.weight_total.to_string(),
                reason: "Weight total must be positive".to_string(),
            });
        }
        validate_finite("calculation.max_mark", self.max_mark)?;
        if self.max_mark <= 0.0 {
            return Err(GradeError::InvalidConfigValueError {
                field: "calculation.max_mark".to_string(),
                value: self.max_mark.to_string(),
                reason: "Maximum mark must be positive".to_string(),
            });
        }
        validate_range("calculation.decimal_places", self.decimal_places, 0, 6)
    }
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            weight_total: Self::default_weight_total(),
            max_mark: Self::default_max_mark(),
            strict_weights: false,
            decimal_places: Self::default_decimal_places(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub name: String,
    pub assessments: Vec<Assessment>,
}

impl Course {
    pub fn new(name: impl Into<String>, assessments: Vec<Assessment>) -> Self {
        Self {
            name: name.into(),
            assessments,
        }
    }

    pub fn known(&self) -> impl Iterator<Item = &Assessment> {
        self.assessments.iter().filter(|a| a.mark_known)
    }

    pub fn unknown(&self) -> impl Iterator<Item = &Assessment> {
        self.assessments.iter().filter(|a| !a.mark_known)
    }

    pub fn total_weight(&self) -> f64 {
        self.assessments.iter().map(|a| a.weight).sum()
    }

    /// 驗證課程資料；權重總和不符且非嚴格模式時回傳警告訊息
    pub fn validate(&self, settings: &CalculationSettings) -> Result<Vec<String>> {
        if self.assessments.is_empty() {
            return Err(GradeError::EmptyCourse);
        }

        for assessment in &self.assessments {
            validate_assessment(assessment, settings)?;
        }

        if let Some(dup) = find_duplicate(self.assessments.iter().map(|a| a.name.as_str())) {
            return Err(GradeError::DuplicateAssessment {
                name: dup.trim().to_string(),
            });
        }

        let total = self.total_weight();
        if total <= 0.0 {
            return Err(GradeError::WeightTotalMismatch {
                expected: settings.weight_total,
                actual: total,
            });
        }

        let mut warnings = Vec::new();
        if (total - settings.weight_total).abs() > WEIGHT_TOLERANCE {
            if settings.strict_weights {
                return Err(GradeError::WeightTotalMismatch {
                    expected: settings.weight_total,
                    actual: total,
                });
            }
            let message = format!(
                "Assessment weights sum to {} instead of {}; results are normalised by the actual total",
                total, settings.weight_total
            );
            tracing::warn!("⚠️ {}", message);
            warnings.push(message);
        }

        Ok(warnings)
    }

    /// 計算時使用的權重總和
    pub fn effective_weight_total(&self, settings: &CalculationSettings) -> f64 {
        let total = self.total_weight();
        if settings.strict_weights || (total - settings.weight_total).abs() <= WEIGHT_TOLERANCE {
            settings.weight_total
        } else {
            total
        }
    }
}

fn validate_assessment(assessment: &Assessment, settings: &CalculationSettings) -> Result<()> {
    let invalid = |reason: String| GradeError::InvalidAssessment {
        name: assessment.name.clone(),
        reason,
    };

    if assessment.name.trim().is_empty() {
        return Err(invalid("name cannot be empty".to_string()));
    }
    if !assessment.weight.is_finite() || assessment.weight < 0.0 {
        return Err(invalid(format!(
            "weight must be a non-negative number, got {}",
            assessment.weight
        )));
    }
    if !assessment.mark.is_finite()
        || assessment.mark < 0.0
        || assessment.mark > settings.max_mark
    {
        return Err(invalid(format!(
            "mark must be between 0 and {}, got {}",
            settings.max_mark, assessment.mark
        )));
    }
    Ok(())
}
