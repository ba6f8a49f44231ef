use std::path::PathBuf;

use crate::cli::parser::{Cli, Commands};
use crate::config::{Backend, Config};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// Writes a configuration file with the defaults, keeping any global
/// override given on the same command line (`--api`, `--mock`, `--lat`,
/// `--lon`, `--deny-location`).
pub fn handle(cli: &Cli) -> AppResult<()> {
    let force = matches!(cli.command, Commands::Init { force: true });

    let path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file);

    if path.exists() && !force {
        warning(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        ));
        return Ok(());
    }

    let mut cfg = Config {
        source: path.clone(),
        ..Config::default()
    };
    if let Some(url) = &cli.api {
        cfg.api_base_url = url.clone();
    }
    if cli.mock {
        cfg.backend = Backend::Mock;
    }
    cfg.location.latitude = cli.lat.or(cfg.location.latitude);
    cfg.location.longitude = cli.lon.or(cfg.location.longitude);
    if cli.deny_location {
        cfg.location.allow = false;
    }

    cfg.save()?;

    success(format!("Config file: {}", path.display()));
    info(format!("API: {} ({:?})", cfg.api_base(), cfg.backend));
    info(format!("Tokens: {}", cfg.token_path().display()));
    Ok(())
}
