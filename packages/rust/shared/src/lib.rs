//! Shared types, error model, and configuration for dexterm.
//!
//! This crate is the foundation depended on by all other dexterm crates.
//! It provides:
//! - [`DextermError`] — the unified error type
//! - Domain types ([`Reference`], [`Detail`], [`DisplayRecord`], [`PipelineState`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ApiConfig, AppConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{DextermError, Result};
pub use types::{Detail, DisplayRecord, PipelineState, Reference};
