use anyhow::Result;
use grade_calc::{GradeEngine, GradeError, Requirement, TomlConfig};
use tempfile::TempDir;

fn write_config(temp_dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let config_path = temp_dir.path().join(name);
    std::fs::write(&config_path, content)?;
    Ok(config_path.to_string_lossy().into_owned())
}

/// 完整流程：讀檔、驗證、計算
#[test]
fn test_end_to_end_report_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(
        &temp_dir,
        "algorithms.toml",
        r#"
[course]
name = "Algorithms"
description = "Second-year core module"

[[assessments]]
name = "Coursework 1"
weight = 15
mark = 72
markKnown = true

[[assessments]]
name = "Coursework 2"
weight = 15
mark = 64
markKnown = true

[[assessments]]
name = "Exam"
weight = 70
mark = 65
markKnown = false
"#,
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    let report = GradeEngine::new(config).run()?;

    // (15*72 + 15*64) / 100 = 20.4
    assert!((report.achieved - 20.4).abs() < 1e-9);
    // 20.4 + 70*65/100 = 65.9
    assert!((report.projected - 65.9).abs() < 1e-9);
    assert!((report.current_average.unwrap() - 68.0).abs() < 1e-9);
    assert_eq!(report.projected_grade.as_ref().unwrap().abbreviation, "2:1");
    assert_eq!(report.current_grade.as_ref().unwrap().abbreviation, "2:1");
    assert!(report.warnings.is_empty());

    // (7000 - 2040) / 70
    match report.requirement_for("1st").unwrap().requirement {
        Requirement::Needs(avg) => assert!((avg - 4960.0 / 70.0).abs() < 1e-9),
        other => panic!("expected Needs, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_custom_scale_with_unreachable_top_grade() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[course]
name = "Databases"

[[assessments]]
name = "Project"
weight = 80
mark = 40
markKnown = true

[[assessments]]
name = "Viva"
weight = 20
mark = 50
markKnown = false

[[grades]]
name = "Distinction"
abbreviation = "D"
minMark = 70

[[grades]]
name = "Pass"
abbreviation = "P"
minMark = 40
"#,
    )?;

    let report = GradeEngine::new(config).run()?;

    // 32 已確定，剩下 20 權重最多再加 20 分
    assert_eq!(
        report.requirement_for("D").unwrap().requirement,
        Requirement::Unattainable
    );
    assert_eq!(
        report.requirement_for("P").unwrap().requirement,
        Requirement::Needs(40.0)
    );
    assert!(report.secured_grade.is_none());
    Ok(())
}

#[test]
fn test_lax_weights_are_reported_as_warnings() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[course]
name = "Partial listing"

[[assessments]]
name = "Essay"
weight = 40
mark = 58
markKnown = true
"#,
    )?;

    let engine = GradeEngine::new(config);
    let warnings = engine.check()?;
    assert_eq!(warnings.len(), 1);

    let report = engine.run()?;
    assert_eq!(report.warnings.len(), 1);
    assert!((report.achieved - 58.0).abs() < 1e-9);
    assert!(report.is_complete());
    Ok(())
}

#[test]
fn test_invalid_scale_stops_the_engine() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[course]
name = "Ambiguous"

[[assessments]]
name = "Exam"
weight = 100
mark = 50
markKnown = true

[[grades]]
name = "Pass"
abbreviation = "P"
minMark = 50

[[grades]]
name = "Satisfactory"
abbreviation = "S"
minMark = 50
"#,
    )?;

    let result = GradeEngine::new(config).run();
    assert!(matches!(result, Err(GradeError::InvalidGradeScale { .. })));
    Ok(())
}

#[test]
fn test_empty_course_is_rejected() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[course]
name = "Nothing yet"
"#,
    )?;

    let err = GradeEngine::new(config).check().unwrap_err();
    assert!(matches!(err, GradeError::EmptyCourse));
    assert_eq!(err.exit_code(), 2);
    Ok(())
}

#[test]
fn test_report_serializes_to_json() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[course]
name = "Networks"

[[assessments]]
name = "Lab"
weight = 50
mark = 80
markKnown = true

[[assessments]]
name = "Exam"
weight = 50
mark = 60
markKnown = false
"#,
    )?;

    let report = GradeEngine::new(config).run()?;
    let value = serde_json::to_value(&report)?;

    assert_eq!(value["course"], "Networks");
    assert_eq!(value["projected"], 70.0);
    assert_eq!(value["projected_grade"]["minMark"], 70.0);
    assert_eq!(value["requirements"][0]["requirement"]["status"], "needs");
    assert_eq!(value["requirements"][0]["requirement"]["average"], 60.0);
    assert!(value["generated_at"].is_string());
    Ok(())
}

#[test]
fn test_target_filters_serialized_requirements() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[course]
name = "Operating Systems"

[[assessments]]
name = "Coursework"
weight = 40
mark = 75
markKnown = true

[[assessments]]
name = "Exam"
weight = 60
mark = 55
markKnown = false
"#,
    )?;

    let mut report = GradeEngine::new(config).run()?;
    assert_eq!(report.requirements.len(), 5);

    report.retain_target("2:1")?;
    let value = serde_json::to_value(&report)?;
    let requirements = value["requirements"].as_array().unwrap();

    assert_eq!(requirements.len(), 1);
    assert_eq!(requirements[0]["grade"]["abbreviation"], "2:1");
    // (6000 - 3000) / 60
    assert_eq!(requirements[0]["requirement"]["average"], 50.0);

    let err = report.retain_target("A*").unwrap_err();
    assert!(matches!(err, GradeError::UnknownGrade { .. }));
    Ok(())
}
