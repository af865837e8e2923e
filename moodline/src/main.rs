//! moodline - 聊天记录情感分析命令行工具

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use moodline_lib::commands::{self, ConfigSetArgs};
use moodline_lib::modules::config::DEFAULT_CONFIG_FILE;
use moodline_lib::modules::ConfigModule;

#[derive(Parser)]
#[command(name = "moodline")]
#[command(about = "Emotion and mood analysis for exported chat transcripts", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a chat export into {author, text} messages
    Clean {
        input: PathBuf,

        /// Output path (defaults to <input>_cleaned.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify every message and write an emotion report
    Analyze {
        input: PathBuf,

        /// Output path (defaults to <input>_emotions.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Print per-author mood statistics for a saved report
    Stats {
        report: PathBuf,

        /// Also write the aggregate as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Restore defaults
    Reset,
    /// Update selected settings
    Set(ConfigSetArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    moodline_lib::init_tracing(cli.verbose);

    let config_module = ConfigModule::new_with_file(&cli.config);

    match cli.command {
        Commands::Clean { input, output } => {
            commands::clean(&input, output)
                .await
                .with_context(|| format!("failed to clean {}", input.display()))?;
        }
        Commands::Analyze {
            input,
            output,
            no_progress,
        } => {
            let config = config_module
                .load_validated()
                .await
                .with_context(|| format!("failed to load {}", cli.config.display()))?;
            commands::analyze(&input, output, &config, !no_progress)
                .await
                .with_context(|| format!("failed to analyze {}", input.display()))?;
        }
        Commands::Stats { report, json } => {
            commands::stats(&report, json)
                .await
                .with_context(|| format!("failed to aggregate {}", report.display()))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config_show(&config_module).await?;
            }
            ConfigAction::Reset => {
                commands::config_reset(&config_module).await?;
            }
            ConfigAction::Set(args) => {
                commands::config_set(&config_module, args).await?;
            }
        },
    }

    Ok(())
}
