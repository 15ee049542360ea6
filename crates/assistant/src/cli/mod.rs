pub mod chat;
pub mod commands;
pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lighthouse Assistant: summarize Google Lighthouse reports and ask
/// questions about them.
#[derive(Debug, Parser)]
#[command(name = "lighthouse-assistant", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a report and print its reduced form (no network).
    Reduce {
        /// Path to a Lighthouse JSON report.
        file: PathBuf,
        /// Print reduction statistics to stderr.
        #[arg(long)]
        stats: bool,
    },
    /// Validate a report and print its per-category snapshot.
    Inspect {
        /// Path to a Lighthouse JSON report.
        file: PathBuf,
    },
    /// Summarize one or more reports through the summarizer model.
    Summarize {
        /// Paths to Lighthouse JSON reports.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Ask a single question, optionally about some reports.
    Ask {
        /// The question.
        question: String,
        /// Reports to load as context (repeatable).
        #[arg(long = "report")]
        reports: Vec<PathBuf>,
        /// Sampling temperature (0.0 – 2.0). Defaults to `chat.temperature`.
        #[arg(long)]
        temperature: Option<f32>,
    },
    /// Interactive chat.
    Chat {
        /// Reports to load before the first question (repeatable).
        #[arg(long = "report")]
        reports: Vec<PathBuf>,
        /// Sampling temperature (0.0 – 2.0). Defaults to `chat.temperature`.
        #[arg(long)]
        temperature: Option<f32>,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `LH_CONFIG` (or
/// `config.toml` by default). A missing file yields the defaults.
/// Returns the parsed [`Config`] and the path that was used.
///
/// [`Config`]: lh_domain::config::Config
pub fn load_config() -> anyhow::Result<(lh_domain::config::Config, String)> {
    let config_path = std::env::var("LH_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        lh_domain::config::Config::default()
    };

    Ok((config, config_path))
}
