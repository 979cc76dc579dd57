// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{AtlasConfig, RawAtlasConfig};
use crate::errors::{AtlasError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// File names searched for, in order, in each directory during discovery.
pub const DEFAULT_CONFIG_NAMES: [&str; 3] = ["atlas_ops.yml", "atlas_ops.yaml", "atlas_ops.toml"];

/// Serialization format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but `.toml` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Deserialize config text without semantic validation.
///
/// An empty document yields the default (empty) raw config so that
/// validation can report what is missing.
pub fn parse_str(contents: &str, format: ConfigFormat) -> Result<RawAtlasConfig> {
    if contents.trim().is_empty() {
        return Ok(RawAtlasConfig::default());
    }

    let raw = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
        ConfigFormat::Toml => toml::from_str(contents)?,
    };
    Ok(raw)
}

/// Load a configuration file and return the raw, unvalidated model.
pub fn load_from_path_with(fs: &dyn FileSystem, path: &Path) -> Result<RawAtlasConfig> {
    if !fs.is_file(path) {
        return Err(AtlasError::ConfigNotFound(path.display().to_string()));
    }

    let contents = fs.read_to_string(path)?;
    parse_str(&contents, ConfigFormat::from_path(path))
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawAtlasConfig> {
    load_from_path_with(&RealFileSystem, path.as_ref())
}

/// Load a configuration file from path and validate it.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate_with(fs: &dyn FileSystem, path: &Path) -> Result<AtlasConfig> {
    let raw = load_from_path_with(fs, path)?;
    let mut config = AtlasConfig::try_from(raw)?;
    config.source_path = Some(path.to_path_buf());
    debug!(
        path = %path.display(),
        project = %config.project,
        tasks = config.tasks.len(),
        "configuration loaded"
    );
    Ok(config)
}

pub fn load_and_validate(path: impl AsRef<Path>) -> Result<AtlasConfig> {
    load_and_validate_with(&RealFileSystem, path.as_ref())
}

/// Find a config file by walking up from `start` through its parents.
pub fn find_default_config_with(fs: &dyn FileSystem, start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        for name in DEFAULT_CONFIG_NAMES {
            let candidate = dir.join(name);
            if fs.is_file(&candidate) {
                debug!(path = %candidate.display(), "discovered configuration");
                return Ok(candidate);
            }
        }
    }

    Err(AtlasError::ConfigNotFound(format!(
        "no {} found in {} or parent directories. Provide --config to specify a custom path.",
        DEFAULT_CONFIG_NAMES[0],
        start.display()
    )))
}

/// Find a config file starting from `start`, or the current directory.
pub fn find_default_config(start: Option<&Path>) -> Result<PathBuf> {
    let start = match start {
        Some(start) => start.to_path_buf(),
        None => std::env::current_dir()?,
    };
    find_default_config_with(&RealFileSystem, &start)
}

/// Load from an explicit path, or discover one from the current directory.
pub fn load_config(path: Option<&Path>) -> Result<AtlasConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => find_default_config(None)?,
    };
    load_and_validate(path)
}
