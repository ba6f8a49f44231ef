//! Signup, login and token maintenance.

use regex::Regex;
use std::sync::LazyLock;
use tracing::info;

use crate::api::AuthApi;
use crate::auth::TokenStore;
use crate::errors::{AppError, AppResult};
use crate::models::user::{AuthTokens, User};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl SignupForm {
    pub fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation("username is required".into()));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.password != self.confirm {
            return Err(AppError::Validation("passwords do not match".into()));
        }
        Ok(())
    }
}

pub struct AccountLogic;

impl AccountLogic {
    pub fn signup<A: AuthApi + ?Sized>(api: &A, form: &SignupForm) -> AppResult<User> {
        form.validate()?;
        api.register(form.username.trim(), form.email.trim(), &form.password)
    }

    /// Obtain a token pair and cache it.
    pub fn login<A: AuthApi + ?Sized>(
        api: &A,
        store: &TokenStore,
        username: &str,
        password: &str,
    ) -> AppResult<AuthTokens> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "username and password are required".into(),
            ));
        }
        let tokens = api.login(username.trim(), password)?;
        store.save(&tokens, Some(username.trim()))?;
        info!(username, "logged in");
        Ok(tokens)
    }

    pub fn logout(store: &TokenStore) -> AppResult<bool> {
        store.clear()
    }

    /// Swap the cached access token for a fresh one.
    pub fn refresh<A: AuthApi + ?Sized>(api: &A, store: &TokenStore) -> AppResult<AuthTokens> {
        let current = store.session()?.ok_or(AppError::NotAuthenticated)?;
        let fresh = api.refresh(&current.tokens.refresh)?;
        let tokens = AuthTokens {
            access: fresh.access,
            refresh: fresh.refresh.unwrap_or(current.tokens.refresh),
        };
        store.save(&tokens, current.username.as_deref())?;
        Ok(tokens)
    }
}
