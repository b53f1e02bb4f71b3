pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::core::{
    calculator::GradeCalculator, engine::GradeEngine, Assessment, CalculationSettings,
    ConfigProvider, Course, Grade, GradeReport, GradeRequirement, GradeScale, Requirement,
};
pub use crate::utils::error::{GradeError, Result};
