//! Shared configuration loader for the gf hosts.
//!
//! `defaults/gf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Hosts layer user-specific files on top of
//! those defaults via [`Loader`] before deserializing into [`GfConfig`].
//!
//! Separator sets are fixed by `gf-core` and deliberately absent here.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use gf_core::CandidateOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/gf.default.toml");

/// Top-level configuration consumed by gf hosts.
#[derive(Debug, Clone, Deserialize)]
pub struct GfConfig {
    pub open: OpenConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenConfig {
    pub trim_trailing_dot: bool,
    pub take_focus: bool,
}

impl OpenConfig {
    pub fn candidate_options(&self) -> CandidateOptions {
        CandidateOptions {
            trim_trailing_dot: self.trim_trailing_dot,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GfConfig, ConfigError> {
    Loader::new().build()
}
