pub mod auth;
pub mod availability;
pub mod time_block;
