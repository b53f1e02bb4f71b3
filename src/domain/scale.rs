use crate::domain::model::Grade;
use crate::utils::error::{GradeError, Result};
use crate::utils::validation::find_duplicate;

/// 排序後的等第表，由高到低
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    grades: Vec<Grade>,
}

impl GradeScale {
    pub fn new(mut grades: Vec<Grade>) -> Result<Self> {
        if grades.is_empty() {
            return Err(GradeError::InvalidGradeScale {
                reason: "at least one grade is required".to_string(),
            });
        }

        for grade in &grades {
            if grade.name.trim().is_empty() || grade.abbreviation.trim().is_empty() {
                return Err(GradeError::InvalidGradeScale {
                    reason: format!(
                        "grade '{}' ({}) needs both a name and an abbreviation",
                        grade.name, grade.abbreviation
                    ),
                });
            }
            if !grade.min_mark.is_finite() || grade.min_mark < 0.0 {
                return Err(GradeError::InvalidGradeScale {
                    reason: format!(
                        "grade '{}' has invalid minMark {}",
                        grade.name, grade.min_mark
                    ),
                });
            }
        }

        if let Some(dup) = find_duplicate(grades.iter().map(|g| g.abbreviation.as_str())) {
            return Err(GradeError::InvalidGradeScale {
                reason: format!("abbreviation '{}' is used more than once", dup),
            });
        }

        grades.sort_by(|a, b| b.min_mark.total_cmp(&a.min_mark));

        if let Some(pair) = grades.windows(2).find(|w| w[0].min_mark == w[1].min_mark) {
            return Err(GradeError::InvalidGradeScale {
                reason: format!(
                    "'{}' and '{}' share minMark {}",
                    pair[0].name, pair[1].name, pair[0].min_mark
                ),
            });
        }

        Ok(Self { grades })
    }

    /// 取得分數對應的等第，門檻包含等號
    pub fn grade_for(&self, mark: f64) -> Option<&Grade> {
        if mark.is_nan() {
            return None;
        }
        self.grades.iter().find(|g| mark >= g.min_mark)
    }

    pub fn grades(&self) -> impl Iterator<Item = &Grade> {
        self.grades.iter()
    }

    pub fn highest(&self) -> &Grade {
        // new() 保證至少有一個等第
        &self.grades[0]
    }

    pub fn boundary_count(&self) -> usize {
        self.grades.len()
    }

    /// 依設定建立等第表：沒有自訂等第時，預設門檻按 `max_mark / 100` 縮放
    pub fn for_max_mark(grades: Option<Vec<Grade>>, max_mark: f64) -> Result<Self> {
        let scale = match grades {
            Some(grades) => Self::new(grades)?,
            None => Self::default().rescaled(max_mark),
        };
        scale.check_within(max_mark)?;
        Ok(scale)
    }

    /// 所有門檻都必須落在 `0..=max_mark`
    pub fn check_within(&self, max_mark: f64) -> Result<()> {
        match self.grades.iter().find(|g| g.min_mark > max_mark) {
            Some(grade) => Err(GradeError::InvalidGradeScale {
                reason: format!(
                    "grade '{}' has minMark {} above the maximum mark {}",
                    grade.name, grade.min_mark, max_mark
                ),
            }),
            None => Ok(()),
        }
    }

    fn rescaled(mut self, max_mark: f64) -> Self {
        for grade in &mut self.grades {
            grade.min_mark = grade.min_mark * max_mark / 100.0;
        }
        self
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self {
            grades: vec![
                Grade::new("First Class", "1st", 70.0),
                Grade::new("Upper Second Class", "2:1", 60.0),
                Grade::new("Lower Second Class", "2:2", 50.0),
                Grade::new("Third Class", "3rd", 40.0),
                Grade::new("Fail", "F", 0.0),
            ],
        }
    }
}
