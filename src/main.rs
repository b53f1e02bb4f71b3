use clap::Parser;
use grade_calc::core::calculator::round_to;
use grade_calc::utils::{logger, validation::validate_path};
use grade_calc::{CliConfig, GradeEngine, GradeError, GradeReport, Requirement, TomlConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting grade-calc");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if let Err(e) = validate_path("config", &args.config) {
        fail(&e);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    args.apply_overrides(&mut config);
    let decimal_places = config.calculation.decimal_places;

    tracing::info!("✅ Configuration loaded successfully");

    if !args.json {
        display_config_summary(&config, &args);
    }

    // 驗證交給引擎處理
    let engine = GradeEngine::new(config);

    if args.check {
        match engine.check() {
            Ok(warnings) => {
                for warning in &warnings {
                    println!("⚠️ {}", warning);
                }
                println!("✅ Configuration is valid");
                return Ok(());
            }
            Err(e) => fail(&e),
        }
    }

    let mut report = match engine.run() {
        Ok(report) => report,
        Err(e) => fail(&e),
    };

    if let Some(target) = args.target.as_deref() {
        if let Err(e) = report.retain_target(target) {
            fail(&e);
        }
    }

    if args.json {
        let output = serde_json::to_string_pretty(&report).map_err(GradeError::from)?;
        println!("{}", output);
    } else {
        display_report(&report, decimal_places);
    }

    Ok(())
}

fn fail(e: &GradeError) -> ! {
    tracing::error!(
        "❌ Grade calculation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

fn display_config_summary(config: &TomlConfig, args: &CliConfig) {
    println!("📋 Configuration Summary:");
    println!("  Course: {}", config.course.name);
    if let Some(description) = &config.course.description {
        println!("  Description: {}", description);
    }
    println!(
        "  Assessments: {} ({} with known marks)",
        config.assessments.len(),
        config.known_count()
    );
    println!(
        "  Grade scale: {}",
        if config.uses_default_scale() {
            "default"
        } else {
            "custom"
        }
    );
    println!(
        "  Weight total: {} (strict: {})",
        config.calculation.weight_total, config.calculation.strict_weights
    );
    println!("  Maximum mark: {}", config.calculation.max_mark);

    if args.check {
        println!("  🔍 CHECK MODE ENABLED");
    }

    println!();
}

fn display_report(report: &GradeReport, places: u32) {
    let fmt = |value: f64| format!("{}", round_to(value, places));
    let grade_label = |grade: Option<&grade_calc::Grade>| {
        grade
            .map(|g| format!("{} ({})", g.name, g.abbreviation))
            .unwrap_or_else(|| "below every boundary".to_string())
    };

    println!("📊 {}", report.course);
    println!(
        "  Weight: {} known / {} remaining",
        fmt(report.known_weight),
        fmt(report.remaining_weight)
    );
    if let Some(avg) = report.current_average {
        println!(
            "  Current average: {} → {}",
            fmt(avg),
            grade_label(report.current_grade.as_ref())
        );
    } else {
        println!("  Current average: no known marks yet");
    }
    println!(
        "  Secured so far: {} → {}",
        fmt(report.achieved),
        grade_label(report.secured_grade.as_ref())
    );
    println!(
        "  Projected: {} → {}",
        fmt(report.projected),
        grade_label(report.projected_grade.as_ref())
    );

    println!();
    println!("🎯 Needed on remaining assessments:");
    for req in &report.requirements {
        let status = match req.requirement {
            Requirement::Secured => "✅ secured".to_string(),
            Requirement::Needs(avg) => format!("average of {}", fmt(avg)),
            Requirement::Unattainable => "❌ out of reach".to_string(),
        };
        println!(
            "  {:<6} {:<22} {}",
            req.grade.abbreviation, req.grade.name, status
        );
    }

    for warning in &report.warnings {
        println!("⚠️ {}", warning);
    }
}
