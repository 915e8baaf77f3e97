use std::io;
use std::path::{Path, PathBuf};

use stagehand_host::{HostSink, Reporter};
use uuid::Uuid;

use crate::error::PublishError;

const FRESH_DIR_ATTEMPTS: usize = 16;

/// Resolves the staging root once per session and caches it.
///
/// The host-provided root wins when it is set and non-empty. Otherwise a new
/// directory is created under `temp_base`, and the environment is dumped to
/// the host log so the missing variable can be diagnosed.
pub struct StagingDirectoryResolver {
    primary: Option<PathBuf>,
    temp_base: PathBuf,
    environment: Vec<(String, String)>,
    cached: Option<PathBuf>,
}

impl StagingDirectoryResolver {
    pub fn new(primary: Option<PathBuf>, temp_base: PathBuf, environment: Vec<(String, String)>) -> Self {
        let primary = primary.filter(|p| !p.as_os_str().is_empty());
        Self { primary, temp_base, environment, cached: None }
    }

    /// The resolved root, if [`resolve`](Self::resolve) has succeeded.
    pub fn cached(&self) -> Option<&Path> {
        self.cached.as_deref()
    }

    pub fn resolve<S: HostSink>(&mut self, reporter: &mut Reporter<S>) -> Result<PathBuf, PublishError> {
        if let Some(root) = &self.cached {
            return Ok(root.clone());
        }

        let root = match &self.primary {
            Some(primary) => {
                ensure_dir(primary)?;
                primary.clone()
            }
            None => {
                let root = create_fresh_dir(&self.temp_base)?;
                tracing::warn!(root = %root.display(), "build staging directory not provided; using a fresh directory");
                reporter.info(format!(
                    "Build staging directory is not available; staging to {} instead.",
                    root.display()
                ));
                reporter.info("Environment:");
                for (key, value) in &self.environment {
                    reporter.info(format!("  {}={}", key, value));
                }
                root
            }
        };

        self.cached = Some(root.clone());
        Ok(root)
    }
}

/// Create `path` and its parents. An existing directory is reused.
pub fn ensure_dir(path: &Path) -> Result<(), PublishError> {
    std::fs::create_dir_all(path).map_err(|source| PublishError::CreateDir { path: path.to_path_buf(), source })
}

/// Create a directory under `base` that did not exist before this call.
fn create_fresh_dir(base: &Path) -> Result<PathBuf, PublishError> {
    ensure_dir(base)?;
    for _ in 0..FRESH_DIR_ATTEMPTS {
        let candidate = base.join(format!("stagehand-{}", Uuid::new_v4().simple()));
        match std::fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(PublishError::CreateDir { path: candidate, source }),
        }
    }
    Err(PublishError::NoFreshName(base.to_path_buf()))
}
