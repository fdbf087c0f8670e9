//! Configuration module for Reelpick
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file (or no file) gives the defaults.
//!
//! # Example
//!
//! ```no_run
//! use reelpick::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("reelpick.toml")).unwrap();
//! println!("Retries per request: {}", config.fetch.max_retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, PaginationConfig, SourceConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
