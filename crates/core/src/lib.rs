//! AgriGenius Core Library
//!
//! Foundational utilities shared by every AgriGenius crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management and capability flags

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, Capabilities};
pub use error::{AppError, AppResult};
