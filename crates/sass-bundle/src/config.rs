//! Layered configuration
//!
//! Values are merged from, lowest to highest precedence: built-in defaults, the
//! user config file, the project config file, `SASS_BUNDLE_*` environment
//! variables, and command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::StyleType;

/// Project config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "sass-bundle.toml";

/// Output directory used when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

const ENV_FILE: &str = "SASS_BUNDLE_FILE";
const ENV_TYPE: &str = "SASS_BUNDLE_TYPE";
const ENV_OUTPUT_NAME: &str = "SASS_BUNDLE_OUTPUT_NAME";
const ENV_OUTPUT_DIR: &str = "SASS_BUNDLE_OUTPUT_DIR";

/// Raw, possibly incomplete configuration layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Entry stylesheet
    pub file: Option<PathBuf>,
    /// Extension of the produced asset
    #[serde(rename = "type")]
    pub style_type: Option<StyleType>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Base name of the produced asset
    pub name: Option<String>,
    /// Directory the CLI writes the asset into
    pub dir: Option<PathBuf>,
}

/// Fully validated settings for one bundling run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    pub file: PathBuf,
    pub style_type: StyleType,
    pub output_name: String,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Overlay `other` on top of `self`; values set in `other` win
    pub fn merge(&mut self, other: Self) {
        if other.file.is_some() {
            self.file = other.file;
        }
        if other.style_type.is_some() {
            self.style_type = other.style_type;
        }
        if other.output.name.is_some() {
            self.output.name = other.output.name;
        }
        if other.output.dir.is_some() {
            self.output.dir = other.output.dir;
        }
    }

    /// Build a layer from `SASS_BUNDLE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a layer from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let style_type = lookup(ENV_TYPE)
            .map(|value| {
                value
                    .parse::<StyleType>()
                    .map_err(|err| anyhow!("{ENV_TYPE}: {err}"))
            })
            .transpose()?;

        Ok(Self {
            file: lookup(ENV_FILE).map(PathBuf::from),
            style_type,
            output: OutputConfig {
                name: lookup(ENV_OUTPUT_NAME),
                dir: lookup(ENV_OUTPUT_DIR).map(PathBuf::from),
            },
        })
    }

    /// Load every file and environment layer
    ///
    /// `explicit_config` replaces the project config lookup and must exist.
    pub fn load(explicit_config: Option<&Path>) -> Result<Self> {
        let user_config = user_config_path();
        let project_config = match explicit_config {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = PathBuf::from(PROJECT_CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        let mut config = Self::load_files(user_config.as_deref(), project_config.as_deref())?;
        config.merge(Self::from_env()?);
        Ok(config)
    }

    /// Merge the user and project config files
    ///
    /// A missing user config is skipped; the project config, when given, must
    /// be readable.
    pub fn load_files(user_config: Option<&Path>, project_config: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = user_config.filter(|path| path.is_file()) {
            debug!("Loading user config from {}", path.display());
            config.merge(Self::from_file(path)?);
        }

        if let Some(path) = project_config {
            debug!("Loading project config from {}", path.display());
            config.merge(Self::from_file(path)?);
        }

        Ok(config)
    }

    /// Validate that every required option is present
    pub fn into_options(self) -> Result<BundleOptions> {
        Ok(BundleOptions {
            file: self.file.ok_or_else(|| missing("file"))?,
            style_type: self.style_type.ok_or_else(|| missing("type"))?,
            output_name: self.output.name.ok_or_else(|| missing("output.name"))?,
            output_dir: self
                .output
                .dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }
}

fn missing(key: &str) -> anyhow::Error {
    anyhow!("missing required option '{key}'")
}

/// Location of the per-user config file, if a home directory is known
pub fn user_config_path() -> Option<PathBuf> {
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("sass-bundle").join("config.toml"))
}
