use clap::Parser;
use tracing_subscriber::EnvFilter;

use lh_assistant::cli::{self, Cli, Command, ConfigCommand};
use lh_domain::config::LoggingConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = cli::load_config()?;

    match cli.command {
        Command::Config(ConfigCommand::Validate) => {
            let valid = cli::config::validate(&config, &config_path);
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => cli::config::show(&config),
        Command::Reduce { file, stats } => {
            init_cli_tracing(&config.logging);
            cli::commands::reduce(&config, &file, stats)
        }
        Command::Inspect { file } => {
            init_cli_tracing(&config.logging);
            cli::commands::inspect(&file)
        }
        Command::Summarize { files } => {
            init_cli_tracing(&config.logging);
            cli::commands::summarize(&config, &files).await
        }
        Command::Ask {
            question,
            reports,
            temperature,
        } => {
            init_cli_tracing(&config.logging);
            cli::commands::ask(&config, question, &reports, temperature).await
        }
        Command::Chat {
            reports,
            temperature,
        } => {
            init_cli_tracing(&config.logging);
            cli::chat::chat(&config, &reports, temperature).await
        }
    }
}

/// Logs go to stderr so stdout carries only command output. `RUST_LOG`
/// wins over the configured filter.
fn init_cli_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
