//! Resolution of user-supplied file paths.

use std::path::{Path, PathBuf};

/// `~` and `~/...` point into the home directory; anything else is kept.
pub fn expand_home(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

/// A file kept next to `anchor` (usually the config file), or in
/// `fallback_dir` when the anchor has no parent.
pub fn sibling_of(anchor: &Path, name: &str, fallback_dir: PathBuf) -> PathBuf {
    anchor
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or(fallback_dir)
        .join(name)
}
