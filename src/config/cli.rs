use crate::config::toml_config::TomlConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "grade-calc")]
#[command(about = "Weighted course grade calculator")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "grades.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,

    /// Only show what is needed for this grade (abbreviation)
    #[arg(long)]
    pub target: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,

    /// Fail when weights do not add up to the configured total
    #[arg(long)]
    pub strict: bool,
}

impl CliConfig {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if self.strict && !config.calculation.strict_weights {
            config.calculation.strict_weights = true;
            tracing::info!("🔧 Strict weight checking enabled from command line");
        }
    }
}
