//! Command-line surface
//!
//! `repomap <input-dir> [-o out] [-t max-tokens] [-f text|json] [-l language] [-v]`

use crate::error::RepoMapError;
use crate::language::get_language_extensions;
use crate::pipeline::{generate_repo_map, RepoMapOptions, RepoMapResult, DEFAULT_MAX_TOKENS};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Relevance-ranked, token-budgeted map of a source repository
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "repomap", version, about, long_about = None)]
pub struct Cli {
    /// Repository root to map
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Token budget for the rendered map
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: usize,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only scan files of this language (e.g. typescript, python)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The rendered map only
    Text,
    /// The full result as pretty JSON
    Json,
}

impl Cli {
    /// Reject argument values clap cannot check on its own.
    pub fn validate(&self) -> crate::error::Result<()> {
        if let Some(language) = &self.language {
            if get_language_extensions(language).is_none() {
                return Err(RepoMapError::UnsupportedLanguage(language.clone()));
            }
        }
        if let Some(output) = self.output.as_deref().filter(|p| p.is_dir()) {
            return Err(RepoMapError::InvalidArguments(format!(
                "output '{}' is a directory",
                output.display()
            )));
        }
        Ok(())
    }

    pub fn options(&self) -> RepoMapOptions {
        RepoMapOptions {
            max_tokens: self.max_tokens,
            language: self.language.clone(),
            ..RepoMapOptions::default()
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Text map or pretty JSON, per `format`.
pub fn render(result: &RepoMapResult, format: OutputFormat) -> crate::error::Result<String> {
    match format {
        OutputFormat::Text => Ok(result.map.clone()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

/// Write `content` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, content: &str) -> crate::error::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RepoMapError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| RepoMapError::io(path, e))
}

/// Validate, generate, and emit the map.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    cli.validate()?;

    let result = generate_repo_map(&cli.input, &cli.options())
        .with_context(|| format!("Failed to map {}", cli.input.display()))?;
    let rendered = render(&result, cli.format).context("Failed to render repo map")?;

    match &cli.output {
        Some(path) => {
            write_output(path, &rendered)?;
            info!("Wrote repo map to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
