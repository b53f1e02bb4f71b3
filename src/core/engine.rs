use crate::core::calculator::GradeCalculator;
use crate::core::{ConfigProvider, Course, GradeReport, GradeScale};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

pub struct GradeEngine<C: ConfigProvider> {
    config: C,
}

/// 通過驗證後的輸入
struct Prepared {
    course: Course,
    scale: GradeScale,
    warnings: Vec<String>,
}

impl<C: ConfigProvider> GradeEngine<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    fn prepare(&self) -> Result<Prepared> {
        validate_non_empty_string("course.name", self.config.course_name())?;

        let settings = self.config.settings();
        settings.validate()?;

        let scale = self.config.grade_scale()?;
        tracing::debug!(
            "Grade scale has {} boundaries, top is {} at {}",
            scale.boundary_count(),
            scale.highest().abbreviation,
            scale.highest().min_mark
        );

        let course = Course::new(
            self.config.course_name(),
            self.config.assessments().to_vec(),
        );
        let warnings = course.validate(settings)?;

        Ok(Prepared {
            course,
            scale,
            warnings,
        })
    }

    /// 只驗證，不計算；回傳警告
    pub fn check(&self) -> Result<Vec<String>> {
        tracing::info!("🔍 Validating course '{}'", self.config.course_name());
        let prepared = self.prepare()?;
        tracing::info!(
            "✅ {} assessments and {} grades are valid",
            prepared.course.assessments.len(),
            prepared.scale.boundary_count()
        );
        Ok(prepared.warnings)
    }

    pub fn run(&self) -> Result<GradeReport> {
        tracing::info!("Starting grade calculation for '{}'", self.config.course_name());

        let Prepared {
            course,
            scale,
            warnings,
        } = self.prepare()?;
        tracing::info!(
            "Validated {} assessments ({} with known marks)",
            course.assessments.len(),
            course.known().count()
        );

        let report = GradeCalculator::new(&scale, self.config.settings()).calculate(&course, warnings);

        tracing::info!(
            "Projected {:.2} ({}), secured {:.2}",
            report.projected,
            report
                .projected_grade
                .as_ref()
                .map(|g| g.abbreviation.as_str())
                .unwrap_or("-"),
            report.achieved
        );

        Ok(report)
    }
}
