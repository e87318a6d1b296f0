//! CLI entry and dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use livepage_core::config::{self, Config};
use livepage_core::core::interrupt;
use livepage_core::logging;
use livepage_core::preview::SandboxedPreview;

mod commands;

#[derive(Parser)]
#[command(name = "livepage")]
#[command(version)]
#[command(about = "Watch a live app-generation session and preview the finished app in a sandbox")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    preview: PreviewArgs,
}

/// Where session messages come from.
#[derive(clap::Args, Debug, Clone, Default)]
struct SourceArgs {
    /// Server-Sent Events endpoint streaming server messages (overrides config)
    #[arg(long, value_name = "URL", conflicts_with = "file")]
    url: Option<String>,

    /// Read newline-delimited JSON messages from a file ('-' for stdin)
    #[arg(long, value_name = "PATH")]
    file: Option<String>,
}

impl SourceArgs {
    /// Fills unset fields from `other`.
    fn or(self, other: Self) -> Self {
        Self {
            url: self.url.or(other.url),
            file: self.file.or(other.file),
        }
    }
}

/// Where and how rendered applications are previewed.
#[derive(clap::Args, Debug, Clone, Default)]
struct PreviewArgs {
    /// Directory for rendered application pages (overrides config)
    #[arg(long, value_name = "DIR", global = true)]
    preview_dir: Option<PathBuf>,

    /// Do not open rendered applications in the browser
    #[arg(long = "no-open", global = true)]
    no_open: bool,
}

impl PreviewArgs {
    fn surface(&self, config: &Config) -> SandboxedPreview {
        let dir = self
            .preview_dir
            .clone()
            .unwrap_or_else(|| config.preview_dir());
        let open_browser = config.preview.open_browser && !self.no_open;
        SandboxedPreview::new(dir, open_browser)
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Watch a live session in the terminal (default)
    Watch {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Replay recorded messages without a terminal UI
    Replay {
        /// Newline-delimited JSON messages ('-' for stdin)
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init().context("install Ctrl+C handler")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        source,
        preview,
    } = cli;

    let source = match command {
        Some(Commands::Config { command }) => {
            return match command {
                ConfigCommands::Path => {
                    commands::config::path();
                    Ok(())
                }
                ConfigCommands::Init => commands::config::init(),
            };
        }
        Some(Commands::Replay { path }) => {
            let config = Config::load().context("load config")?;
            let _log_guard = init_logging(&config)?;
            let surface = preview.surface(&config);
            return commands::replay::run(&path, &surface).await;
        }
        Some(Commands::Watch { source: watch }) => watch.or(source),
        None => source,
    };

    let config = Config::load().context("load config")?;
    let _log_guard = init_logging(&config)?;
    let source = commands::watch::resolve_source(
        source.url.as_deref(),
        source.file.as_deref(),
        &config,
    )?;
    let surface = Arc::new(preview.surface(&config));
    commands::watch::run(source, surface).await
}

fn init_logging(config: &Config) -> Result<logging::WorkerGuard> {
    logging::init(&config::paths::logs_dir(), &config.log_filter).context("init logging")
}
