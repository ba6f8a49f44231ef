#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn rl() -> Command {
    cargo_bin_cmd!("ramenlog")
}

/// Isolated configuration directory. The token cache lands next to the
/// config file, so nothing touches the real home directory.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("ramenlog.conf")
    }

    pub fn config(&self) -> String {
        self.config_path().to_string_lossy().to_string()
    }

    pub fn tokens_path(&self) -> PathBuf {
        self.dir.path().join("tokens.yaml")
    }

    /// `ramenlog --config <tmp> --mock <args...>`
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut c = rl();
        c.env_remove("RAMENLOG_LOG")
            .env("NO_COLOR", "1")
            .args(["--config", &self.config(), "--mock"])
            .args(args);
        c
    }
}

/// Sandbox with a mock-backed config and a cached login.
pub fn logged_in() -> Sandbox {
    let sb = Sandbox::new();
    sb.cmd(&["init"]).assert().success();
    sb.cmd(&["login", "--username", "me", "--password", "ramen-password"])
        .assert()
        .success();
    sb
}
