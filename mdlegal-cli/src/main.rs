//! mdlegal CLI - MD Legal Suite list pages from the terminal
//!
//! This is the main entry point for the mdlegal command-line tool, which provides:
//! - One-shot listing with search, filters, sorting and pagination (`list`)
//! - A line-driven page session with create/edit/delete (`session`)
//! - A tabbed terminal dashboard over every page (`browse`)
//! - Theme and office settings blobs (`settings`)
//! - CLI configuration (`config`)

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

mod commands;
mod config;
mod entity;
mod tracing_setup;
mod tui;
mod ui;

use commands::list::ListArgs;
use commands::session::SessionArgs;
use commands::settings::SettingsArgs;
use commands::Context;
use config::{CliConfig, ConfigArgs};
use entity::EntityKind;
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "mdlegal",
    author,
    version,
    about = "MD Legal Suite list pages: cases, clients, staff, finance and support tickets",
    long_about = "Browse the law-office dashboard lists from the terminal. Every page supports \
                  free-text search, categorical filters, column sorting, pagination and \
                  create/edit/delete against a simulated backend."
)]
struct Cli {
    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Answer immediately instead of simulating backend latency
    #[arg(long, global = true, env = "MDLEGAL_NO_DELAY")]
    no_delay: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one page of a list (no entity: list the available pages)
    List(ListArgs),

    /// Open a list page and drive it with commands from stdin
    Session(SessionArgs),

    /// Interactive dashboard with one tab per list page
    Browse {
        /// Page to open first
        #[arg(value_enum, default_value = "cases")]
        entity: EntityKind,
    },

    /// Read and write theme/office settings
    Settings(SettingsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load()?;

    init_tracing(&TracingConfig {
        debug: cli.debug,
        level: config.log_level.clone(),
    })
    .ok();

    // Initialize UI quiet mode from flag, env var, and TTY detection
    ui::init_quiet_mode(cli.quiet);

    let ctx = Context::new(config, cli.no_delay);
    debug!(latency_ms = ctx.latency.as_millis() as u64, "context ready");

    match cli.command {
        Commands::List(args) => commands::run_list(args, &ctx).await?,
        Commands::Session(args) => commands::run_session(args, &ctx).await?,
        Commands::Browse { entity } => tui::run(&ctx, entity).await?,
        Commands::Settings(args) => commands::run_settings(args, &ctx)?,
        Commands::Config(args) => config::run_config(args)?,
    }
    Ok(())
}
