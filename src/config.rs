//! Configuration loading
//!
//! `defaults/laplan.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Callers layer user files and single-key
//! overrides on top of it via [`Loader`] before deserializing into
//! [`LaplanConfig`].

use crate::batch::output::OutputFormat;
use crate::error::{Error, Result};
use crate::zoning::{vocabulary, TagRule};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/laplan.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LaplanConfig {
    pub parser: ParserConfig,
    pub batch: BatchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Priority order for claiming suffix tags
    pub tag_rules: Vec<TagRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub sentinel: String,
    pub threads: usize,
    pub dedupe: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl LaplanConfig {
    fn validate(self) -> Result<Self> {
        let sentinel = self.batch.sentinel.trim();
        if sentinel.is_empty() {
            return Err(Error::InvalidConfig(
                "batch.sentinel must not be empty".to_string(),
            ));
        }
        if vocabulary::lookup_zone_class(sentinel).is_some() {
            return Err(Error::InvalidConfig(format!(
                "batch.sentinel `{}` is a zone class and would be indistinguishable from parsed rows",
                sentinel
            )));
        }
        Ok(self)
    }
}

/// Layers sources on top of the embedded defaults, lowest priority first:
/// defaults, then config files in the order added, then key overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Add a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_file(path.as_ref(), true)
    }

    /// Add a TOML file if it exists, e.g. `laplan.toml` in the working directory.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_file(path.as_ref(), false)
    }

    fn layer_file(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Override one dotted key, e.g. `output.format` from `--format`.
    pub fn set_override<V>(mut self, key: &str, value: V) -> Result<Self>
    where
        V: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer into a validated [`LaplanConfig`].
    pub fn build(self) -> Result<LaplanConfig> {
        self.builder
            .build()?
            .try_deserialize::<LaplanConfig>()?
            .validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top
pub fn load_defaults() -> Result<LaplanConfig> {
    Loader::new().build()
}
