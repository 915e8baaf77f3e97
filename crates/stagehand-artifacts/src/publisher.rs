use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use stagehand_errors::{report_error, ErrorRecord};
use stagehand_host::{HostSink, Reporter};
use walkdir::WalkDir;

use crate::archive::{expand_zip, is_zip};
use crate::error::{FileError, PublishError};
use crate::staging::{ensure_dir, StagingDirectoryResolver};

pub const DEFAULT_BUCKET: &str = "release";

/// Absolute paths already handed to the host in this session.
#[derive(Clone, Debug, Default)]
pub struct PublishedFileSet {
    identities: HashSet<PathBuf>,
}

impl PublishedFileSet {
    pub fn contains(&self, identity: &Path) -> bool {
        self.identities.contains(identity)
    }

    /// Returns false if the identity was already present.
    pub fn insert(&mut self, identity: PathBuf) -> bool {
        self.identities.insert(identity)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

/// What one [`ArtifactPublisher::publish`] call did.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PublishReport {
    pub destination: PathBuf,
    pub uploaded: Vec<PathBuf>,
    pub expanded: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
}

pub struct ArtifactPublisher {
    container_folder: String,
    published: PublishedFileSet,
}

impl ArtifactPublisher {
    pub fn new(container_folder: impl Into<String>) -> Self {
        Self { container_folder: container_folder.into(), published: PublishedFileSet::default() }
    }

    pub fn published(&self) -> &PublishedFileSet {
        &self.published
    }

    /// Publish every file under `source` into `bucket` below the staging root.
    ///
    /// Each distinct file is published at most once per session: archives are
    /// expanded once and every file gets one upload command. A file counts as
    /// published as soon as its processing starts, so a failed expansion or
    /// handoff is reported but not retried by later calls. Only failing to
    /// create the destination aborts the call.
    pub fn publish<S: HostSink>(
        &mut self,
        staging: &mut StagingDirectoryResolver,
        reporter: &mut Reporter<S>,
        source: &Path,
        bucket: &str,
    ) -> Result<PublishReport, PublishError> {
        let root = staging.resolve(reporter)?;
        let destination = root.join(bucket);
        ensure_dir(&destination)?;

        let mut report = PublishReport { destination: destination.clone(), ..Default::default() };

        for entry in WalkDir::new(source).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source_err) => {
                    let err = FileError::Walk { root: source.to_path_buf(), source: source_err };
                    report_error(reporter, &ErrorRecord::from_error(&err));
                    report.failed += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            self.publish_file(entry.path(), &destination, reporter, &mut report);
        }

        tracing::info!(
            source = %source.display(),
            bucket,
            uploaded = report.uploaded.len(),
            skipped = report.skipped,
            failed = report.failed,
            "publish finished"
        );
        Ok(report)
    }

    fn publish_file<S: HostSink>(
        &mut self,
        path: &Path,
        destination: &Path,
        reporter: &mut Reporter<S>,
        report: &mut PublishReport,
    ) {
        let identity = match std::fs::canonicalize(path) {
            Ok(identity) => identity,
            Err(source) => {
                let err = FileError::Identity { path: path.to_path_buf(), source };
                report_error(reporter, &ErrorRecord::from_error(&err));
                report.failed += 1;
                return;
            }
        };

        if self.published.contains(&identity) {
            tracing::debug!(path = %identity.display(), "already published; skipping");
            report.skipped += 1;
            return;
        }
        self.published.insert(identity.clone());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| identity.to_string_lossy().into_owned());

        if is_zip(path) {
            let target = destination.join(&name);
            match expand_zip(&identity, &target) {
                Ok(()) => report.expanded.push(target),
                Err(source) => {
                    let err = FileError::Expand { path: identity.clone(), source };
                    report_error(reporter, &ErrorRecord::from_error(&err));
                    report.failed += 1;
                }
            }
        }

        match reporter.upload(&self.container_folder, &name, &identity) {
            Ok(()) => report.uploaded.push(identity),
            Err(source) => {
                let err = FileError::Upload { path: identity, source };
                report_error(reporter, &ErrorRecord::from_error(&err));
                report.failed += 1;
            }
        }
    }
}
