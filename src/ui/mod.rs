pub mod board;
pub mod messages;
