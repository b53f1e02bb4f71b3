use crate::domain::course::CalculationSettings;
use crate::domain::model::Assessment;
use crate::domain::scale::GradeScale;
use crate::utils::error::Result;

pub trait ConfigProvider {
    fn course_name(&self) -> &str;
    fn assessments(&self) -> &[Assessment];
    /// 等第表在此建立並驗證
    fn grade_scale(&self) -> Result<GradeScale>;
    fn settings(&self) -> &CalculationSettings;
}
