use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub publish: PublishConfig,
    #[serde(default)]
    pub staging: StagingConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HostConfig {
    /// Variable holding the host's build staging root.
    pub staging_dir_var: String,
    /// Variable holding the host's ephemeral working directory.
    pub temp_dir_var: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PublishConfig {
    pub container_folder: String,
    pub default_bucket: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StagingConfig {
    /// Parent for a fresh staging directory when the host gives no temp dir.
    pub fallback_base: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            staging_dir_var: "BUILD_STAGINGDIRECTORY".to_string(),
            temp_dir_var: "AGENT_TEMPDIRECTORY".to_string(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self { container_folder: "drop".to_string(), default_bucket: "release".to_string() }
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self { fallback_base: "~/.stagehand/staging".to_string() }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    /// Load `.stagehand/stagehand.toml` under `root`, or defaults if absent.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = Self::config_path(root);
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn fallback_base(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.staging.fallback_base).as_ref())
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(".stagehand").join("stagehand.toml")
    }
}
