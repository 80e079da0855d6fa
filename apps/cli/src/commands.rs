//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use dexgen_core::pipeline::{BuildSiteConfig, BuildSiteResult, ProgressReporter};
use dexgen_shared::{AppConfig, BuildConfig, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// dexgen: build a static Pokédex site from YAML records.
#[derive(Parser)]
#[command(
    name = "dexgen",
    version,
    about = "Build a static Pokédex site from a directory of YAML records.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.dexgen/dexgen.toml.
    #[arg(long, global = true, env = "DEXGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the site.
    Build {
        /// Record database directory.
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output directory for the generated site.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Stylesheet to copy into the site instead of the built-in one.
        #[arg(long)]
        stylesheet: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "dexgen=info",
        1 => "dexgen=debug",
        _ => "dexgen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Build {
            db,
            out,
            stylesheet,
        } => cmd_build(config_path, db, out, stylesheet),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn read_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Layer command-line overrides on top of the file config.
fn resolve_build_config(
    config: &AppConfig,
    db: Option<PathBuf>,
    out: Option<PathBuf>,
    stylesheet: Option<PathBuf>,
) -> BuildConfig {
    let mut build = BuildConfig::from(config);
    if let Some(db) = db {
        build.db_dir = db;
    }
    if let Some(out) = out {
        build.output_dir = out;
    }
    if stylesheet.is_some() {
        build.stylesheet = stylesheet;
    }
    build
}

fn cmd_build(
    config_path: Option<&Path>,
    db: Option<PathBuf>,
    out: Option<PathBuf>,
    stylesheet: Option<PathBuf>,
) -> Result<()> {
    let config = read_config(config_path)?;
    let build = resolve_build_config(&config, db, out, stylesheet);

    info!(
        db = %build.db_dir.display(),
        out = %build.output_dir.display(),
        "building site"
    );

    let site_config = BuildSiteConfig {
        build,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let reporter = CliProgress::new();
    let result = dexgen_core::pipeline::build_site(&site_config, &reporter)?;

    println!();
    println!("  Site built successfully!");
    println!("  Pages:    {}", result.page_count);
    println!("  Evolving: {}", result.evolving_count);
    println!("  Edges:    {}", result.edge_count);
    println!("  Path:     {}", result.output_dir.display());
    println!("  Time:     {:.2}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn record_rendered(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Rendering [{current}/{total}] {name}"));
    }

    fn done(&self, _result: &BuildSiteResult) {
        self.spinner.finish_and_clear();
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = read_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
