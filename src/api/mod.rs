//! Client side of the remote services.
//!
//! Each service is a trait so the screens can run against the real HTTP
//! backend, the bundled mock, or a test double. Authenticated calls take the
//! caller's [`Credentials`] explicitly; nothing is kept in shared headers.

pub mod http;
pub mod mock;

use serde::Deserialize;

use crate::config::{Backend, Config};
use crate::errors::AppResult;
use crate::models::ikitai::{IkitaiFriend, OwnStatus, StatusUpdate};
use crate::models::ramen_log::{NewRamenLog, RamenLog};
use crate::models::relationship::{FollowAction, UserRelationship};
use crate::models::user::{AuthTokens, Credentials, User};

pub use http::HttpApi;
pub use mock::MockApi;

/// Ikitai directory and own-status endpoints.
pub trait IkitaiApi {
    /// Friends currently marked ikitai, in server order.
    fn fetch_ikitai_friends(&self, auth: &Credentials) -> AppResult<Vec<IkitaiFriend>>;

    /// Push the local user's status.
    fn update_status(&self, auth: &Credentials, update: &StatusUpdate) -> AppResult<()>;

    /// The local user's status as the server knows it; `None` when off.
    fn fetch_own_status(&self, auth: &Credentials) -> AppResult<Option<OwnStatus>>;
}

pub trait AuthApi {
    fn register(&self, username: &str, email: &str, password: &str) -> AppResult<User>;
    fn login(&self, username: &str, password: &str) -> AppResult<AuthTokens>;
    fn refresh(&self, refresh: &str) -> AppResult<RefreshedToken>;
}

pub trait RelationshipApi {
    fn follow(&self, auth: &Credentials, user_id: i64) -> AppResult<UserRelationship>;
    fn respond(
        &self,
        auth: &Credentials,
        follower_id: i64,
        action: FollowAction,
    ) -> AppResult<UserRelationship>;
    fn unfollow(&self, auth: &Credentials, user_id: i64) -> AppResult<()>;
    fn following(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>>;
    fn followers(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>>;
    fn pending_requests(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>>;
}

/// Ramen log entries. The server does not require a login for these, so
/// credentials are attached only when available.
pub trait RamenLogApi {
    fn list_logs(&self, auth: Option<&Credentials>) -> AppResult<Vec<RamenLog>>;
    fn get_log(&self, auth: Option<&Credentials>, id: i64) -> AppResult<RamenLog>;
    fn create_log(&self, auth: Option<&Credentials>, log: &NewRamenLog) -> AppResult<RamenLog>;
    fn delete_log(&self, auth: Option<&Credentials>, id: i64) -> AppResult<()>;
}

/// Everything the CLI talks to.
pub trait RamenApi: IkitaiApi + AuthApi + RelationshipApi + RamenLogApi {}

impl<T: IkitaiApi + AuthApi + RelationshipApi + RamenLogApi> RamenApi for T {}

/// Result of a token refresh. The refresh token is only present when the
/// server rotates it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RefreshedToken {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Build the API selected by the configuration.
pub fn connect(cfg: &Config) -> AppResult<Box<dyn RamenApi>> {
    match cfg.backend {
        Backend::Remote => Ok(Box::new(HttpApi::new(cfg.api_base(), cfg.timeout_secs)?)),
        Backend::Mock => Ok(Box::new(MockApi::new())),
    }
}
