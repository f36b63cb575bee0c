//! Configuration module for Hoopstat
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an empty file (or no file at all) describes the
//! stock crawl.
//!
//! # Example
//!
//! ```no_run
//! use hoopstat::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hoopstat.toml")).unwrap();
//! println!("Request delay: {}ms", config.fetcher.request_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, FetcherConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
