//! Configuration module for kumo
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a default, so the crawler runs without a config
//! file and command-line flags can override individual values.
//!
//! # Example
//!
//! ```no_run
//! use kumo::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("kumo.toml")).unwrap();
//! println!("Scope policy: {}", config.crawler.scope);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, UserAgentConfig, DEFAULT_MAX_CONCURRENT_FETCHES};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
