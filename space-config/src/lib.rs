//! Configuration for the Space toolchain.
//!
//! Settings come from three TOML layers, later ones winning key by key:
//!
//! ```text
//! defaults/space.default.toml   compiled in, always present
//! ./.space.toml                 per-project, optional
//! --config <file>               per-invocation, must exist when given
//! ```
//!
//! [`Loader::discover`] stacks exactly those. Tests and embedders can build their own
//! stack with the other [`Loader`] methods.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use space_parser::space::formats::TreevizOptions;
use space_parser::space::generation::GenerationRequest;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/space.default.toml");

/// Top-level configuration consumed by Space applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceConfig {
    pub inspect: InspectConfig,
    pub output: OutputConfig,
    pub generation: GenerationConfig,
}

/// Controls treeviz inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_line_numbers: bool,
    pub label_width: usize,
}

impl InspectConfig {
    pub fn treeviz_options(&self) -> TreevizOptions {
        TreevizOptions {
            show_line_numbers: self.show_line_numbers,
            label_width: self.label_width,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub keep_preamble: bool,
}

/// Settings passed along to generative services.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
}

impl GenerationConfig {
    /// Build a request for `command`, with `context` as the current document.
    pub fn request(&self, command: &str, context: Option<&str>) -> GenerationRequest {
        GenerationRequest::new(command, context)
            .with_model(&self.model)
            .with_temperature(self.temperature)
    }
}

/// Name of the per-project settings file looked up in the working directory.
pub const PROJECT_FILE: &str = ".space.toml";

/// Stack of configuration layers, built lowest first.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Just the compiled-in defaults.
    pub fn new() -> Self {
        Self {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// The layers the `space` binary uses: defaults, then `dir/.space.toml` if it exists,
    /// then `explicit` (an error at build time if that file is missing).
    pub fn discover(dir: impl AsRef<Path>, explicit: Option<&Path>) -> Self {
        let loader = Self::new().with_optional_file(dir.as_ref().join(PROJECT_FILE));
        match explicit {
            Some(path) => loader.with_file(path),
            None => loader,
        }
    }

    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a file that may be absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        self.builder = self.builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(required),
        );
        self
    }

    /// Set one dotted key, e.g. `output.format`, above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SpaceConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl SpaceConfig {
    /// The compiled-in settings with nothing layered on top.
    pub fn defaults() -> Result<Self, ConfigError> {
        Loader::new().build()
    }
}
