//! incfix Core
//!
//! Shared types, configuration and error handling for the include
//! relocation tool.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::FileRecord;
