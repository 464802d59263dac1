use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::options::TrimOptions;

/// File-backed settings.
///
/// ```toml
/// [trim]
/// exclude = ["user.password", "raw.*"]
/// convert_to_full_width = false
/// ```
///
/// `trim = ["user.password"]` (bare list) is accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrimConfig {
    #[serde(default)]
    pub trim: TrimOptions,
}

impl TrimConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(
                "No config file found at {}. Using TrimConfig::default().",
                path.display()
            );
            return Ok(TrimConfig::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str::<TrimConfig>(text)?)
    }

    pub fn options(&self) -> &TrimOptions {
        &self.trim
    }
}
