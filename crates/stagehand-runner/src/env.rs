use std::path::PathBuf;

use crate::Config;

/// Host inputs read once at session start.
#[derive(Clone, Debug, Default)]
pub struct HostEnvironment {
    pub staging_root: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    /// Full environment, sorted by name, for diagnostics.
    pub vars: Vec<(String, String)>,
}

impl HostEnvironment {
    pub fn capture(cfg: &Config) -> Self {
        let vars = std::env::vars_os().map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned()));
        Self::from_vars(cfg, vars)
    }

    pub fn from_vars(cfg: &Config, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut vars: Vec<(String, String)> = vars.into_iter().collect();
        vars.sort();

        let lookup = |name: &str| {
            vars.iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };
        let staging_root = lookup(&cfg.host.staging_dir_var);
        let temp_dir = lookup(&cfg.host.temp_dir_var);

        Self { staging_root, temp_dir, vars }
    }

    /// Parent directory for a fresh staging root.
    pub fn temp_base(&self, cfg: &Config) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(|| cfg.fallback_base())
    }
}
