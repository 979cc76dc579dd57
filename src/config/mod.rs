// src/config/mod.rs

//! Configuration loading and validation for atlas-ops.
//!
//! Responsibilities:
//! - Define the YAML/TOML-backed data model (`model.rs`).
//! - Find and load a config file (`loader.rs`).
//! - Turn the raw model into validated engine tasks (`validate.rs`).
//! - Hold the starter templates (`templates.rs`).

pub mod loader;
pub mod model;
pub mod templates;
pub mod validate;

pub use loader::{
    find_default_config, find_default_config_with, load_and_validate, load_and_validate_with,
    load_config, load_from_path, load_from_path_with, parse_str, ConfigFormat,
    DEFAULT_CONFIG_NAMES,
};
pub use model::{AtlasConfig, RawAtlasConfig, RawStep, RawTask, Requirement, Scalar};
