//! # Agenda Core
//!
//! Domain types and logic shared across the agenda workspace: the error
//! taxonomy, time-block and user models, interval conflict detection,
//! input validation, and availability statistics. This crate performs no
//! I/O; persistence lives in `agenda-db` and transport in `agenda-api`.

pub mod conflict;
pub mod errors;
pub mod models;
pub mod stats;
pub mod validation;
