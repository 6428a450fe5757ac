//! Configuration module for orchestrator
//!
//! Provides YAML configuration loading (`$include` directives and
//! `${ENV:default}` expansion, for callers that want file-based config) plus
//! the [`server::ServerConfig`] the server binary actually loads at startup.

pub mod loader;
pub mod server;

pub use loader::{deep_merge, load_yaml_config, load_yaml_file};
pub use server::ServerConfig;
