pub mod ikitai;
pub mod ramen_log;
pub mod relationship;
pub mod time_slot;
pub mod user;
