//! pagetext command-line interface.
//!
//! ```text
//! pagetext extract scan.pdf --format json --record results.jsonl
//! pagetext config --config pagetext.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pagetext::{ExtractionConfig, JsonLinesRecorder, extract_and_record, extract_file_sync};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pagetext")]
#[command(about = "Extract text from PDFs, with OCR for scanned pages")]
#[command(version)]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML, YAML or JSON); defaults to a discovered pagetext.toml
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the text of a PDF
    Extract {
        /// PDF file to extract
        path: PathBuf,

        #[command(flatten)]
        overrides: ConfigOverrides,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Append the result to this JSON Lines file
        #[arg(long, value_name = "FILE")]
        record: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

#[derive(clap::Args)]
struct ConfigOverrides {
    /// Render scale relative to 72 DPI
    #[arg(long)]
    zoom: Option<f32>,

    /// Always OCR, even when the PDF has selectable text
    #[arg(long)]
    force_ocr: bool,

    /// Recognize pages concurrently
    #[arg(long)]
    parallel: bool,

    /// OCR backend (tesseract, tesseract-cli)
    #[arg(long, value_name = "NAME")]
    ocr_backend: Option<String>,

    /// Tesseract language, e.g. eng or eng+deu
    #[arg(short, long)]
    language: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl ConfigOverrides {
    fn apply(self, config: &mut ExtractionConfig) {
        if let Some(zoom) = self.zoom {
            config.zoom = zoom;
        }
        if self.force_ocr {
            config.force_ocr = true;
        }
        if self.parallel {
            config.parallel_pages = true;
        }
        if let Some(backend) = self.ocr_backend {
            config.ocr.backend = backend;
        }
        if let Some(language) = self.language {
            config.ocr.language = language;
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ExtractionConfig> {
    let config = match path {
        Some(path) => ExtractionConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ExtractionConfig::discover()
            .context("Failed to discover pagetext.toml")?
            .unwrap_or_default(),
    };
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Extract {
            path,
            overrides,
            format,
            record,
        } => {
            overrides.apply(&mut config);
            config.validate().context("Invalid configuration")?;

            let result = match record {
                Some(record_path) => {
                    let recorder = JsonLinesRecorder::new(record_path);
                    extract_and_record(&path, &config, &recorder)
                }
                None => extract_file_sync(&path, &config),
            }
            .with_context(|| format!("Failed to extract text from {}", path.display()))?;

            match format {
                OutputFormat::Text => println!("{}", result.text),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }
        Commands::Config { overrides } => {
            overrides.apply(&mut config);
            config.validate().context("Invalid configuration")?;
            if config.ocr.page_timeout_secs.is_none() {
                tracing::warn!(
                    "The per-page OCR deadline is disabled; TOML cannot express this, so reloading the printed configuration restores the default deadline"
                );
            }
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
