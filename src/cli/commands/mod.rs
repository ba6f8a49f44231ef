pub mod account;
pub mod board;
pub mod config;
pub mod friends;
pub mod ikitai;
pub mod init;
pub mod log;
pub mod relationships;
