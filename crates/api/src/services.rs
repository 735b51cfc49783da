pub mod auth;
pub mod time_block;
