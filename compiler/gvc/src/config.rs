//! Project file (`gamevm.json`).
//!
//! ```json
//! { "profile": "L3", "enforcement": "advisory",
//!   "extensions": ["Ext.Math.Fast"], "target": "atari2600" }
//! ```
//!
//! Every key is optional. `profile` accepts `L3` or `GV.Spec.L3`.
//! Command line flags are applied after the project file and win.

use std::path::Path;

use gv_ir::{CapabilityTier, CompileOptions, Enforcement, OptLevel, ParseTierError, TargetArch};
use serde::Deserialize;
use thiserror::Error;

/// Default project file name looked up next to the source.
pub const PROJECT_FILE: &str = "gamevm.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read project file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid project file '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid profile in project file: {0}")]
    Profile(#[from] ParseTierError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct ProjectConfig {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub enforcement: Option<Enforcement>,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub target: Option<TargetArch>,
    #[serde(default)]
    pub opt_level: Option<OptLevel>,
}

impl ProjectConfig {
    pub fn from_json(text: &str, path: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        let config = Self::from_json(&text, &shown)?;
        tracing::debug!(path = %shown, ?config, "loaded project file");
        Ok(config)
    }

    /// Overlay the project settings onto `options`.
    ///
    /// Extensions are appended; everything else replaces. An `opt_level`
    /// also turns the optimizer on.
    pub fn apply(&self, options: &mut CompileOptions) -> Result<(), ConfigError> {
        if let Some(profile) = &self.profile {
            options.tier = profile.parse::<CapabilityTier>()?;
        }
        if let Some(enforcement) = self.enforcement {
            options.enforcement = enforcement;
        }
        if let Some(target) = self.target {
            options.target = target;
        }
        if let Some(level) = self.opt_level {
            options.optimize = level > OptLevel::None;
            options.opt_level = level;
        }
        for ext in &self.extensions {
            if !options.extensions.contains(ext) {
                options.extensions.push(ext.clone());
            }
        }
        Ok(())
    }
}
