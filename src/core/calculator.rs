use crate::domain::course::{CalculationSettings, Course};
use crate::domain::model::{GradeReport, GradeRequirement, Requirement};
use crate::domain::scale::GradeScale;
use chrono::Utc;

fn known_weighted_sum(course: &Course) -> f64 {
    course.known().map(|a| a.weighted_mark()).sum()
}

/// 已確定的分數（以整門課為基準）
pub fn achieved(course: &Course, weight_total: f64) -> f64 {
    known_weighted_sum(course) / weight_total
}

/// 若所有預估分數成真的最終分數
pub fn projected(course: &Course, weight_total: f64) -> f64 {
    course
        .assessments
        .iter()
        .map(|a| a.weighted_mark())
        .sum::<f64>()
        / weight_total
}

pub fn current_average(course: &Course) -> Option<f64> {
    let known_weight: f64 = course.known().map(|a| a.weight).sum();
    if known_weight > 0.0 {
        Some(known_weighted_sum(course) / known_weight)
    } else {
        None
    }
}

pub fn known_weight(course: &Course) -> f64 {
    course.known().map(|a| a.weight).sum()
}

pub fn remaining_weight(course: &Course) -> f64 {
    course.unknown().map(|a| a.weight).sum()
}

/// 剩餘評量需要多少平均分數才能達到 `target`
pub fn required_average(
    course: &Course,
    weight_total: f64,
    target: f64,
    max_mark: f64,
) -> Requirement {
    let secured = known_weighted_sum(course);
    if secured / weight_total >= target {
        return Requirement::Secured;
    }

    let remaining = remaining_weight(course);
    if remaining <= 0.0 {
        return Requirement::Unattainable;
    }

    let needed = (target * weight_total - secured) / remaining;
    if needed <= max_mark {
        Requirement::Needs(needed)
    } else {
        Requirement::Unattainable
    }
}

pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}

pub struct GradeCalculator<'a> {
    scale: &'a GradeScale,
    settings: &'a CalculationSettings,
}

impl<'a> GradeCalculator<'a> {
    pub fn new(scale: &'a GradeScale, settings: &'a CalculationSettings) -> Self {
        Self { scale, settings }
    }

    /// 課程須先通過 `Course::validate`
    pub fn calculate(&self, course: &Course, warnings: Vec<String>) -> GradeReport {
        let weight_total = course.effective_weight_total(self.settings);
        let achieved = achieved(course, weight_total);
        let projected = projected(course, weight_total);
        let current_average = current_average(course);

        tracing::debug!(
            "Weight total {} (known {}, remaining {})",
            weight_total,
            known_weight(course),
            remaining_weight(course)
        );

        let requirements = self
            .scale
            .grades()
            .map(|grade| GradeRequirement {
                grade: grade.clone(),
                requirement: required_average(
                    course,
                    weight_total,
                    grade.min_mark,
                    self.settings.max_mark,
                ),
            })
            .collect();

        GradeReport {
            course: course.name.clone(),
            generated_at: Utc::now(),
            total_weight: course.total_weight(),
            known_weight: known_weight(course),
            remaining_weight: remaining_weight(course),
            achieved,
            projected,
            current_average,
            secured_grade: self.scale.grade_for(achieved).cloned(),
            current_grade: current_average.and_then(|avg| self.scale.grade_for(avg).cloned()),
            projected_grade: self.scale.grade_for(projected).cloned(),
            requirements,
            warnings,
        }
    }
}
