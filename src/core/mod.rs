pub mod account;
pub mod ikitai;
pub mod view;
