pub mod calculator;
pub mod engine;

pub use crate::domain::course::{CalculationSettings, Course};
pub use crate::domain::model::{Assessment, Grade, GradeReport, GradeRequirement, Requirement};
pub use crate::domain::ports::ConfigProvider;
pub use crate::domain::scale::GradeScale;
pub use crate::utils::error::Result;
