//! Local token cache. The remote service issues the tokens; this module only
//! keeps the pair between invocations.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::user::{AuthTokens, Credentials};

pub struct TokenStore {
    path: PathBuf,
}

/// On-disk shape: the token pair plus the name it was issued to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached session, if a previous login left one.
    pub fn session(&self) -> AppResult<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    /// Cached tokens, if a previous login left any.
    pub fn load(&self) -> AppResult<Option<AuthTokens>> {
        Ok(self.session()?.map(|s| s.tokens))
    }

    /// Name used at the last login.
    pub fn username(&self) -> AppResult<Option<String>> {
        Ok(self.session()?.and_then(|s| s.username))
    }

    pub fn save(&self, tokens: &AuthTokens, username: Option<&str>) -> AppResult<()> {
        let session = StoredSession {
            username: username.map(str::to_string),
            tokens: tokens.clone(),
        };
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(&session)?;
        let mut file = open_private(&self.path)?;
        file.write_all(yaml.as_bytes())?;
        debug!(path = %self.path.display(), "tokens saved");
        Ok(())
    }

    /// Forget the cached pair. Returns whether anything was removed.
    pub fn clear(&self) -> AppResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Credentials for the next request, or `NotAuthenticated`.
    pub fn credentials(&self) -> AppResult<Credentials> {
        self.load()?
            .map(|t| Credentials::from(&t))
            .ok_or(AppError::NotAuthenticated)
    }
}

/// Truncating open; on unix the file is created owner-only, and an older
/// file with wider permissions is narrowed before anything is written.
#[cfg(unix)]
fn open_private(path: &Path) -> AppResult<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> AppResult<fs::File> {
    Ok(fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("tokens.yaml"));

        assert!(store.load().unwrap().is_none());
        assert!(matches!(store.credentials(), Err(AppError::NotAuthenticated)));

        let tokens = AuthTokens {
            access: "a.b.c".into(),
            refresh: "r.r.r".into(),
        };
        store.save(&tokens, Some("ramen")).unwrap();
        assert_eq!(store.load().unwrap(), Some(tokens));
        assert_eq!(store.username().unwrap().as_deref(), Some("ramen"));
        assert_eq!(store.credentials().unwrap().token(), "a.b.c");

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("tokens.yaml"));
        let tokens = AuthTokens {
            access: "a".into(),
            refresh: "r".into(),
        };

        store.save(&tokens, None).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        // a file left readable by an older version is narrowed on save
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();
        store.save(&tokens, Some("ramen")).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.username().unwrap().as_deref(), Some("ramen"));
    }
}
