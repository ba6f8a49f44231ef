//! Everything a command handler needs, resolved once per invocation.

use std::path::PathBuf;

use crate::api::{self, RamenApi};
use crate::auth::TokenStore;
use crate::cli::parser::Cli;
use crate::config::{Backend, Config};
use crate::errors::AppResult;
use crate::location::ConfiguredLocation;
use crate::models::user::Credentials;

pub struct AppContext {
    pub cfg: Config,
    pub api: Box<dyn RamenApi>,
    pub location: ConfiguredLocation,
    pub tokens: TokenStore,
}

impl AppContext {
    /// Load the configuration and apply the global command-line overrides.
    pub fn from_cli(cli: &Cli) -> AppResult<Self> {
        let path = cli.config.as_ref().map(PathBuf::from);
        let mut cfg = Config::load(path.as_deref())?;

        if let Some(url) = &cli.api {
            cfg.api_base_url = url.clone();
        }
        if cli.mock {
            cfg.backend = Backend::Mock;
        }
        if let Some(lat) = cli.lat {
            cfg.location.latitude = Some(lat);
        }
        if let Some(lon) = cli.lon {
            cfg.location.longitude = Some(lon);
        }
        if cli.deny_location {
            cfg.location.allow = false;
        }

        Self::new(cfg)
    }

    pub fn new(cfg: Config) -> AppResult<Self> {
        let api = api::connect(&cfg)?;
        let location = ConfiguredLocation::new(&cfg.location);
        let tokens = TokenStore::new(cfg.token_path());
        Ok(Self {
            cfg,
            api,
            location,
            tokens,
        })
    }

    /// Credentials for this request, or `NotAuthenticated`.
    pub fn credentials(&self) -> AppResult<Credentials> {
        self.tokens.credentials()
    }

    /// Credentials when logged in, `None` otherwise.
    pub fn optional_credentials(&self) -> AppResult<Option<Credentials>> {
        Ok(self.tokens.load()?.as_ref().map(Credentials::from))
    }
}
