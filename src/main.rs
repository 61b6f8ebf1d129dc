//! Panelkit CLI
//!
//! Offline tooling for the dashboard behaviour layer:
//! - Replay an event script and show the resulting sidebar/notification state
//! - Render the print view of one element from a saved HTML page
//! - Generate or inspect configuration

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use panelkit::print::{HtmlSnapshot, PrintExporter, PrintSurface};
use panelkit::replay::{parse_script, replay, ReplayRow};
use panelkit::{generate_default_config, Config, LoggingConfig, ShellError, ShellResult};

#[derive(Parser)]
#[command(name = "panelkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard view-state tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines event script
    Replay {
        /// Path to the script
        path: PathBuf,
        /// Initial window width in pixels
        #[arg(short, long, default_value = "1200")]
        width: u32,
    },

    /// Render the print view of one element
    Print {
        /// Saved HTML page
        path: PathBuf,
        /// Id of the element to print
        #[arg(long)]
        id: String,
        /// Document title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show the effective configuration
    Show,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    match cli.command {
        Commands::Replay { path, width } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let steps = parse_script(&text)?;
            tracing::info!("Replaying {} steps from {:?}", steps.len(), path);

            let rows = replay(&config, width, &steps).await;
            print_rows(&rows, &cli.format)?;
        }
        Commands::Print {
            path,
            id,
            title,
            out,
        } => {
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let exporter = PrintExporter::new(config.print.clone());
            let mut surface = FileSurface { out };
            exporter.print_subtree(&HtmlSnapshot::new(html), &mut surface, &id, &title)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { out } => {
                let content = generate_default_config();
                match out {
                    Some(path) => {
                        write_new_file(&path, &content)?;
                        println!("Wrote {}", path.display());
                    }
                    None => print!("{}", content),
                }
            }
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        },
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("panelkit={}", config.level)));

    // Logs go to stderr so stdout stays clean for documents and tables
    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_rows(rows: &[ReplayRow], format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(rows)?),
        _ => {
            println!(
                "{:>4}  {:<20} {:<8} {:<9} {:<6} {:<8} {}",
                "STEP", "ACTION", "VIEWPORT", "COLLAPSED", "SHOWN", "OVERLAY", "TOASTS"
            );
            for row in rows {
                let toasts = row
                    .notifications
                    .iter()
                    .map(|id| format!("#{}", id))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!(
                    "{:>4}  {:<20} {:<8} {:<9} {:<6} {:<8} {}",
                    row.step,
                    row.action,
                    row.viewport.to_string(),
                    row.collapsed,
                    row.shown,
                    row.overlay_shown,
                    if toasts.is_empty() { "-".to_string() } else { toasts }
                );
            }
        }
    }
    Ok(())
}

fn write_new_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Print surface writing the document to a file or stdout
struct FileSurface {
    out: Option<PathBuf>,
}

impl PrintSurface for FileSurface {
    fn open(&mut self, document: &str) -> ShellResult<()> {
        match &self.out {
            Some(path) => std::fs::write(path, document).map_err(|e| {
                ShellError::SurfaceUnavailable(format!("{}: {}", path.display(), e))
            }),
            None => {
                print!("{}", document);
                Ok(())
            }
        }
    }
}
