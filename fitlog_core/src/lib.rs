#![forbid(unsafe_code)]

//! Core domain model and business logic for the fitlog exercise tracker.
//!
//! This crate provides:
//! - Domain types (users, exercises, projections)
//! - The user document store
//! - The log query engine (date-range and count filtering)
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod query;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::UserStore;
pub use query::{format_log, ExerciseView, LogQuery};
