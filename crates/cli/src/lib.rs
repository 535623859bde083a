pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use makeitsell_core::config::{AppConfig, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "makeitsell",
    about = "Make It Sell recommendation CLI",
    long_about = "Rank a marketplace catalog for a shopper with any of the five \
                  recommendation strategies, inspect configuration, and run readiness checks.",
    after_help = "Examples:\n  makeitsell demo --strategy hybrid\n  makeitsell recommend --user 7f8c8c5e-8a30-4a7e-9d41-0b54f1d0a1b2 --strategy trending\n  makeitsell doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank the configured catalog for a shopper with one strategy")]
    Recommend {
        #[arg(long, help = "Shopper id (UUID)")]
        user: uuid::Uuid,
        #[arg(
            long,
            default_value = "hybrid",
            help = "personalized|collaborative|content|trending|hybrid"
        )]
        strategy: String,
        #[arg(long, help = "Maximum results to return (defaults to the configured limit)")]
        limit: Option<usize>,
        #[arg(long, help = "Catalog JSON file (overrides data.catalog_path)")]
        catalog: Option<PathBuf>,
        #[arg(long, help = "Behavior JSON file (overrides data.behavior_path)")]
        behavior: Option<PathBuf>,
    },
    #[command(about = "Rank the built-in demo marketplace; output is deterministic across runs")]
    Demo {
        #[arg(
            long,
            default_value = "hybrid",
            help = "personalized|collaborative|content|trending|hybrid"
        )]
        strategy: String,
        #[arg(long, help = "Maximum results to return")]
        limit: Option<usize>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Validate config, data files, and run a smoke ranking")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let builder = tracing_subscriber::fmt().with_target(false).with_max_level(log_level);
    // A second init (tests, repeated invocations) is harmless; ignore it.
    let result = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    let _ = result;
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(Default::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Recommend { user, strategy, limit, catalog, behavior } => {
            commands::recommend::run(commands::recommend::RecommendArgs {
                user,
                strategy,
                limit,
                catalog,
                behavior,
            })
        }
        Command::Demo { strategy, limit } => commands::demo::run(&strategy, limit),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
