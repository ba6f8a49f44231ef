//! HTTP implementation of the API traits (blocking reqwest).

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{AuthApi, IkitaiApi, RamenLogApi, RefreshedToken, RelationshipApi};
use crate::errors::{AppError, AppResult};
use crate::models::ikitai::{IkitaiFriend, OwnStatus, StatusUpdate};
use crate::models::ramen_log::{NewRamenLog, RamenLog};
use crate::models::relationship::{FollowAction, UserRelationship};
use crate::models::user::{AuthTokens, Credentials, User};

pub struct HttpApi {
    client: Client,
    base: String,
}

/// DRF error bodies carry a `detail` field; validation errors are a map of
/// field → messages and are passed through verbatim.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct ApprovalResponse {
    relationship: UserRelationship,
}

impl HttpApi {
    pub fn new(base: &str, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("ramenlog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn authed(req: RequestBuilder, auth: Option<&Credentials>) -> RequestBuilder {
        match auth {
            Some(c) => req.bearer_auth(c.token()),
            None => req,
        }
    }

    /// Send and turn transport failures and non-success statuses into errors.
    fn send(&self, req: RequestBuilder) -> AppResult<Response> {
        let resp = req.send().map_err(|e| {
            warn!("request failed: {}", e);
            AppError::Network(e.to_string())
        })?;

        let status = resp.status();
        debug!(%status, url = %resp.url(), "response");
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        Err(status_error(status, &body))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, auth: Option<&Credentials>) -> AppResult<T> {
        let req = Self::authed(self.client.get(self.url(path)), auth);
        let resp = self.send(req)?;
        Ok(resp.json()?)
    }
}

/// Map a non-success status: 401 means the login is missing or expired,
/// 5xx is the service being unavailable, any other 4xx carries the server's
/// explanation.
fn status_error(status: StatusCode, body: &str) -> AppError {
    if status == StatusCode::UNAUTHORIZED {
        return AppError::NotAuthenticated;
    }
    if status.is_server_error() {
        return AppError::Network(format!("server error {}", status));
    }
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request rejected").to_string()
            } else {
                body.trim().to_string()
            }
        });
    AppError::Api {
        status: status.as_u16(),
        detail,
    }
}

impl IkitaiApi for HttpApi {
    fn fetch_ikitai_friends(&self, auth: &Credentials) -> AppResult<Vec<IkitaiFriend>> {
        info!("API Call: fetch ikitai friends");
        self.get_json("relationships/ikitai/friends/", Some(auth))
    }

    fn update_status(&self, auth: &Credentials, update: &StatusUpdate) -> AppResult<()> {
        info!(
            status = ?update.status,
            slot = ?update.time_slot,
            with_location = update.has_location(),
            "API Call: update ikitai status"
        );
        let req = self
            .client
            .post(self.url("relationships/ikitai/"))
            .bearer_auth(auth.token())
            .json(update);
        self.send(req)?;
        Ok(())
    }

    fn fetch_own_status(&self, auth: &Credentials) -> AppResult<Option<OwnStatus>> {
        info!("API Call: fetch own ikitai status");
        match self.get_json("relationships/ikitai/", Some(auth)) {
            Ok(status) => Ok(Some(status)),
            // 404 is how the server says "not ikitai"
            Err(AppError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl AuthApi for HttpApi {
    fn register(&self, username: &str, email: &str, password: &str) -> AppResult<User> {
        info!(username, "API Call: register");
        let req = self.client.post(self.url("users/register/")).json(&json!({
            "username": username,
            "email": email,
            "password": password,
        }));
        let body: RegisterResponse = self.send(req)?.json()?;
        Ok(body.user)
    }

    fn login(&self, username: &str, password: &str) -> AppResult<AuthTokens> {
        info!(username, "API Call: login");
        let req = self.client.post(self.url("token/")).json(&json!({
            "username": username,
            "password": password,
        }));
        Ok(self.send(req)?.json()?)
    }

    fn refresh(&self, refresh: &str) -> AppResult<RefreshedToken> {
        info!("API Call: refresh token");
        let req = self
            .client
            .post(self.url("token/refresh/"))
            .json(&json!({ "refresh": refresh }));
        Ok(self.send(req)?.json()?)
    }
}

impl RelationshipApi for HttpApi {
    fn follow(&self, auth: &Credentials, user_id: i64) -> AppResult<UserRelationship> {
        info!(user_id, "API Call: follow");
        let req = self
            .client
            .post(self.url("relationships/follow/"))
            .bearer_auth(auth.token())
            .json(&json!({ "user_id": user_id }));
        Ok(self.send(req)?.json()?)
    }

    fn respond(
        &self,
        auth: &Credentials,
        follower_id: i64,
        action: FollowAction,
    ) -> AppResult<UserRelationship> {
        info!(follower_id, ?action, "API Call: answer follow request");
        let req = self
            .client
            .patch(self.url(&format!("relationships/approve/{}/", follower_id)))
            .bearer_auth(auth.token())
            .json(&json!({ "action": action }));
        let body: ApprovalResponse = self.send(req)?.json()?;
        Ok(body.relationship)
    }

    fn unfollow(&self, auth: &Credentials, user_id: i64) -> AppResult<()> {
        info!(user_id, "API Call: unfollow");
        let req = self
            .client
            .delete(self.url(&format!("relationships/unfollow/{}/", user_id)))
            .bearer_auth(auth.token());
        self.send(req)?;
        Ok(())
    }

    fn following(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>> {
        self.get_json("relationships/following/", Some(auth))
    }

    fn followers(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>> {
        self.get_json("relationships/followers/", Some(auth))
    }

    fn pending_requests(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>> {
        self.get_json("relationships/pending-requests/", Some(auth))
    }
}

impl RamenLogApi for HttpApi {
    fn list_logs(&self, auth: Option<&Credentials>) -> AppResult<Vec<RamenLog>> {
        self.get_json("ramen/ramenlog/", auth)
    }

    fn get_log(&self, auth: Option<&Credentials>, id: i64) -> AppResult<RamenLog> {
        self.get_json(&format!("ramen/ramenlog/{}/", id), auth)
    }

    fn create_log(&self, auth: Option<&Credentials>, log: &NewRamenLog) -> AppResult<RamenLog> {
        info!(shop = %log.shop_name, "API Call: create ramen log");
        let req = Self::authed(self.client.post(self.url("ramen/ramenlog/")), auth).json(log);
        Ok(self.send(req)?.json()?)
    }

    fn delete_log(&self, auth: Option<&Credentials>, id: i64) -> AppResult<()> {
        info!(id, "API Call: delete ramen log");
        let req = Self::authed(
            self.client
                .delete(self.url(&format!("ramen/ramenlog/{}/delete/", id))),
            auth,
        );
        self.send(req)?;
        Ok(())
    }
}
