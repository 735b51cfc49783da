pub mod appointment;
pub mod time_block;
pub mod user;
