//! ramenlog library root.
//! Exposes the CLI parser, the high-level run() function, the ikitai
//! view-model and the API client layer.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod location;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use context::AppContext;
use errors::AppResult;
use tracing_subscriber::{EnvFilter, fmt};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, ctx),
        Commands::Signup { .. } => cli::commands::account::signup(&cli.command, ctx),
        Commands::Login { .. } => cli::commands::account::login(&cli.command, ctx),
        Commands::Logout => cli::commands::account::logout(ctx),
        Commands::Refresh => cli::commands::account::refresh(ctx),
        Commands::Friends { .. } => cli::commands::friends::handle(&cli.command, ctx),
        Commands::Ikitai { .. } => cli::commands::ikitai::handle(&cli.command, ctx),
        Commands::Board => cli::commands::board::handle(ctx),
        Commands::Follow { .. }
        | Commands::Unfollow { .. }
        | Commands::Approve { .. }
        | Commands::Deny { .. } => cli::commands::relationships::handle(&cli.command, ctx),
        Commands::Following { .. } | Commands::Followers { .. } | Commands::Requests { .. } => {
            cli::commands::relationships::list(&cli.command, ctx)
        }
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, ctx),
    }
}

/// Logs go to stderr; `RAMENLOG_LOG` takes an EnvFilter directive.
fn init_tracing(verbose: bool) {
    let default = if verbose { "ramenlog=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RAMENLOG_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // 2️⃣ `init` runs before a configuration exists
    if let Commands::Init { .. } = cli.command {
        return cli::commands::init::handle(&cli);
    }

    // 3️⃣ load config once, apply overrides, build the API
    let ctx = AppContext::from_cli(&cli)?;

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &ctx)
}
