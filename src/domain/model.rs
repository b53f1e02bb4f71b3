use crate::utils::error::{GradeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一項評量（作業、考試等）
///
/// `mark_known` 為 false 時，`mark` 只是預估值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Assessment {
    pub name: String,
    pub weight: f64,
    pub mark: f64,
    #[serde(rename = "markKnown", alias = "mark_known")]
    pub mark_known: bool,
}

impl Assessment {
    pub fn known(name: impl Into<String>, weight: f64, mark: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            mark,
            mark_known: true,
        }
    }

    pub fn estimate(name: impl Into<String>, weight: f64, mark: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            mark,
            mark_known: false,
        }
    }

    /// 權重乘上分數
    pub fn weighted_mark(&self) -> f64 {
        self.weight * self.mark
    }
}

/// 等第門檻
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Grade {
    pub name: String,
    pub abbreviation: String,
    #[serde(rename = "minMark", alias = "min_mark")]
    pub min_mark: f64,
}

impl Grade {
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>, min_mark: f64) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            min_mark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "average", rename_all = "snake_case")]
pub enum Requirement {
    /// 已知分數已足夠，剩下的評量拿零分也不影響
    Secured,
    /// 剩餘評量需要的平均分數
    Needs(f64),
    Unattainable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRequirement {
    pub grade: Grade,
    pub requirement: Requirement,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub course: String,
    pub generated_at: DateTime<Utc>,
    pub total_weight: f64,
    pub known_weight: f64,
    pub remaining_weight: f64,
    pub achieved: f64,
    pub projected: f64,
    pub current_average: Option<f64>,
    pub secured_grade: Option<Grade>,
    pub current_grade: Option<Grade>,
    pub projected_grade: Option<Grade>,
    pub requirements: Vec<GradeRequirement>,
    pub warnings: Vec<String>,
}

impl GradeReport {
    pub fn requirement_for(&self, abbreviation: &str) -> Option<&GradeRequirement> {
        let wanted = abbreviation.trim();
        self.requirements
            .iter()
            .find(|r| r.grade.abbreviation.trim().eq_ignore_ascii_case(wanted))
    }

    /// 只保留指定等第的需求；找不到該等第時回傳錯誤
    pub fn retain_target(&mut self, abbreviation: &str) -> Result<()> {
        let wanted = abbreviation.trim();
        self.requirements
            .retain(|r| r.grade.abbreviation.trim().eq_ignore_ascii_case(wanted));
        if self.requirements.is_empty() {
            return Err(GradeError::UnknownGrade {
                abbreviation: abbreviation.to_string(),
            });
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_weight == 0.0
    }
}
