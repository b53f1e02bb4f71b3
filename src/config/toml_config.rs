use crate::core::ConfigProvider;
use crate::domain::course::CalculationSettings;
use crate::domain::model::{Assessment, Grade};
use crate::domain::scale::GradeScale;
use crate::utils::error::{GradeError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub course: CourseConfig,
    #[serde(default)]
    pub calculation: CalculationSettings,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    pub grades: Option<Vec<Grade>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseConfig {
    pub name: String,
    pub description: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(GradeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GradeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSE_NAME})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GradeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn uses_default_scale(&self) -> bool {
        self.grades.is_none()
    }

    pub fn known_count(&self) -> usize {
        self.assessments.iter().filter(|a| a.mark_known).count()
    }
}

impl ConfigProvider for TomlConfig {
    fn course_name(&self) -> &str {
        &self.course.name
    }

    fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    fn grade_scale(&self) -> Result<GradeScale> {
        GradeScale::for_max_mark(self.grades.clone(), self.calculation.max_mark)
    }

    fn settings(&self) -> &CalculationSettings {
        &self.calculation
    }
}
