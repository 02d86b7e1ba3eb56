//! Configuration module for Link Auditor
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use link_auditor::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-auditor.toml")).unwrap();
//! println!("Scanning {} sites", config.sites.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClientConfig, Config, SiteEntry, StorageConfig};

// Re-export parser functions
pub use parser::{
    compute_config_hash, config_digest, load_config, load_config_with_hash, parse_config,
};
