pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::orchestrator::RunMode;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "brand-assets")]
#[command(about = "Generate the ModelIt K12 brand package: palette and template decks plus AI illustrations")]
pub struct CliConfig {
    /// demo: 8 visuals + 5 mascot poses, no prompts. full: everything, confirmed step by step
    #[arg(long, value_enum, default_value = "demo")]
    pub mode: RunMode,

    /// Path to a TOML configuration file (defaults to ./brand-assets.toml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the output root from the configuration
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Show the plan and cost estimate without calling the API or writing files
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log memory usage and timings after each step")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML configuration and applies command-line overrides.
    pub fn app_config(&self) -> crate::Result<toml_config::AppConfig> {
        toml_config::AppConfig::load_validated(self.config.as_deref(), self.output_dir.as_deref())
    }
}
