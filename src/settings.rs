//! Configuration loading.
//!
//! `defaults/arrowparse.default.toml` is embedded into the library so that docs and runtime
//! behavior stay in sync. On top of it a [`Loader`] stacks TOML files or text, environment
//! variables and single-key overrides, then deserializes and validates the result as an
//! [`ArrowparseConfig`]. [`ArrowparseConfig::load`] is the usual stack for a caller that
//! takes a config path.

use config::builder::DefaultState;
use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, FileSourceString, Map,
    ValueKind,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const DEFAULT_TOML: &str = include_str!("../defaults/arrowparse.default.toml");

/// Prefix of environment variables read by [`Loader::with_env`].
const ENV_PREFIX: &str = "ARROWPARSE";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArrowparseConfig {
    pub arrow: ArrowConfig,
    pub json: JsonConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Arrow-notation grammar knobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArrowConfig {
    pub allow_chains: bool,
}

/// JSON grammar knobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonConfig {
    pub max_depth: usize,
    pub allow_trailing_input: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagnosticsConfig {
    pub snippet_width: usize,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self { allow_chains: true }
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            allow_trailing_input: false,
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { snippet_width: 24 }
    }
}

impl Default for ArrowparseConfig {
    fn default() -> Self {
        Self {
            arrow: ArrowConfig::default(),
            json: JsonConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl ArrowparseConfig {
    /// Embedded defaults, then the file at `path` when one is given (it must exist), then
    /// `ARROWPARSE__SECTION__KEY` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let loader = match path {
            Some(path) => Loader::new().with_file(path),
            None => Loader::new(),
        };
        loader.with_env().build()
    }

    /// Reject values no grammar can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.json.max_depth == 0 {
            return Err(ConfigError::Message(
                "json.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Stacks configuration layers over the embedded defaults. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the embedded defaults.
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(toml(DEFAULT_TOML)),
        }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml_file(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml_file(path.as_ref(), false)
    }

    /// Layer TOML text, e.g. a `[json]` table embedded in a host application's settings.
    pub fn with_toml(mut self, text: &str) -> Self {
        self.builder = self.builder.add_source(toml(text));
        self
    }

    /// Layer `ARROWPARSE__SECTION__KEY` variables from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_source(None)
    }

    /// Layer `ARROWPARSE__SECTION__KEY` pairs from `vars` instead of the process
    /// environment.
    pub fn with_vars<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.with_env_source(Some(vars))
    }

    /// Set one key, e.g. `("json.max_depth", 16)`.
    pub fn set_override<V>(mut self, key: &str, value: V) -> Result<Self, ConfigError>
    where
        V: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers, deserialize and validate.
    pub fn build(self) -> Result<ArrowparseConfig, ConfigError> {
        let config: ArrowparseConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            allow_chains = config.arrow.allow_chains,
            max_depth = config.json.max_depth,
            "configuration loaded"
        );
        Ok(config)
    }

    fn with_toml_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    fn with_env_source(mut self, vars: Option<Map<String, String>>) -> Self {
        let source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(vars);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml(text: &str) -> File<FileSourceString, FileFormat> {
    File::from_str(text, FileFormat::Toml)
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<ArrowparseConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.arrow.allow_chains);
        assert_eq!(config.json.max_depth, 128);
        assert!(!config.json.allow_trailing_input);
        assert_eq!(config.diagnostics.snippet_width, 24);
    }

    #[test]
    fn embedded_defaults_match_default_impl() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, ArrowparseConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("json.max_depth", 4)
            .expect("override to apply")
            .set_override("arrow.allow_chains", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.json.max_depth, 4);
        assert!(!config.arrow.allow_chains);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("does/not/exist.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, ArrowparseConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        assert!(Loader::new().with_file("does/not/exist.toml").build().is_err());
        assert!(ArrowparseConfig::load(Some(Path::new("does/not/exist.toml"))).is_err());
    }

    #[test]
    fn toml_layer_overrides_defaults() {
        let config = Loader::new()
            .with_toml("[json]\nmax_depth = 16\n")
            .build()
            .expect("config to build");
        assert_eq!(config.json.max_depth, 16);
        assert!(!config.json.allow_trailing_input);
    }

    #[test]
    fn vars_layer_over_toml() {
        let config = Loader::new()
            .with_toml("[arrow]\nallow_chains = true\n")
            .with_vars([
                ("ARROWPARSE__ARROW__ALLOW_CHAINS", "false"),
                ("ARROWPARSE__DIAGNOSTICS__SNIPPET_WIDTH", "8"),
                ("OTHER__JSON__MAX_DEPTH", "1"),
            ])
            .build()
            .expect("config to build");
        assert!(!config.arrow.allow_chains);
        assert_eq!(config.diagnostics.snippet_width, 8);
        assert_eq!(config.json.max_depth, 128);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let error = Loader::new()
            .set_override("json.max_depth", 0)
            .expect("override to apply")
            .build()
            .unwrap_err();
        assert!(error.to_string().contains("json.max_depth"));
    }
}
