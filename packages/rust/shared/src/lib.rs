//! Shared types, error model, and configuration for aireadme.
//!
//! This crate is the foundation depended on by all other aireadme crates.
//! It provides:
//! - [`AiReadmeError`] — the unified error type
//! - Domain types ([`ReadmeScope`], request/response structs)
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, DiscoveryConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{AiReadmeError, Result};
pub use types::{
    AI_README_FILENAME, DEFAULT_CHANGELOG_TITLE, DEFAULT_HEADLINE, GuidanceRequest,
    GuidanceResponse, ReadmeScope, ScopeSummary, UpdateRequest, UpdateResponse,
};
