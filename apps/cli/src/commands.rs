//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use dexterm_core::pipeline::{self, PipelineConfig, PipelineOutcome};
use dexterm_core::state::{StateReceiver, state_channel};
use dexterm_shared::{AppConfig, DisplayRecord, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// dexterm — the original roster, with sprites, in your terminal.
#[derive(Parser)]
#[command(
    name = "dexterm",
    version,
    about = "Fetch the original 151-entry roster and render it as a list.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Rendered output format for `show`.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    List,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch the roster and render it.
    Show {
        /// Collection endpoint override (defaults to the configured one).
        #[arg(long)]
        endpoint: Option<String>,

        /// Output format: list (default) or json.
        #[arg(long, default_value = "list")]
        format: OutputFormat,
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

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = format!(
        "dexterm_cli={level},dexterm_core={level},dexterm_roster={level},dexterm_sprites={level},dexterm_shared={level}"
    );

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
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Show { endpoint, format } => cmd_show(endpoint.as_deref(), format).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

async fn cmd_show(endpoint: Option<&str>, format: OutputFormat) -> Result<()> {
    let mut config = load_config()?;
    if let Some(endpoint) = endpoint {
        config.api.listing_endpoint = endpoint.to_string();
    }

    let pipeline_config = PipelineConfig::from_app_config(&config)?;

    info!(endpoint = %pipeline_config.listing_endpoint, "activating roster pipeline");

    let (publisher, rx) = state_channel();
    let pipeline = tokio::spawn(async move {
        pipeline::activate(&pipeline_config, &publisher).await
    });

    render_screen(rx, &format).await;

    // A pipeline failure was already reported on the diagnostic channel;
    // the rendered screen stays an empty list with no error affordance.
    if let PipelineOutcome::Success { count, elapsed } = pipeline.await? {
        info!(count, elapsed_ms = elapsed.as_millis(), "show complete");
    }

    Ok(())
}

/// Observe the published state: spinner while loading, then the list.
async fn render_screen(mut rx: StateReceiver, format: &OutputFormat) {
    let spinner = loading_spinner();

    if rx.borrow().loading {
        // Resolves on the terminal publication, or with an error if the
        // writer vanished without publishing.
        let _ = rx.changed().await;
    }

    spinner.finish_and_clear();

    let state = rx.borrow().clone();
    match format {
        OutputFormat::List => render_list(&state.items),
        OutputFormat::Json => render_json(&state.items),
    }
}

/// Loading indicator shown until the terminal snapshot arrives.
fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message("Loading roster...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

fn render_list(items: &[DisplayRecord]) {
    for item in items {
        match &item.image {
            Some(image) => println!("{:<12}  {image}", item.name),
            None => println!("{:<12}  (no sprite)", item.name),
        }
    }
}

fn render_json(items: &[DisplayRecord]) {
    match serde_json::to_string_pretty(items) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize display records"),
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
