//! # Aquafarm Common Library
//!
//! Shared code for the aquafarm services including:
//! - Database schema initialization and row models
//! - Error types
//! - Configuration and root folder resolution
//! - Timestamp utilities

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
