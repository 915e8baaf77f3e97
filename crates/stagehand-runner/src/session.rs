use std::io;
use std::path::Path;

use stagehand_artifacts::{ArtifactPublisher, PublishError, PublishReport, StagingDirectoryResolver};
use stagehand_core::{Severity, TaskState};
use stagehand_errors::{report_error, ErrorRecord};
use stagehand_host::{Finished, HostSink, Reporter};

use crate::{Config, HostEnvironment};

/// One build job's reporting and publishing state.
///
/// Create it at job start, drive it, then call [`finish`](Self::finish) to
/// emit the completion line. Nothing here outlives the session.
pub struct Session<S: HostSink> {
    reporter: Reporter<S>,
    staging: StagingDirectoryResolver,
    publisher: ArtifactPublisher,
    default_bucket: String,
}

impl<S: HostSink> Session<S> {
    pub fn new(cfg: &Config, env: HostEnvironment, sink: S) -> Self {
        let temp_base = env.temp_base(cfg);
        Self {
            reporter: Reporter::new(sink),
            staging: StagingDirectoryResolver::new(env.staging_root, temp_base, env.vars),
            publisher: ArtifactPublisher::new(cfg.publish.container_folder.clone()),
            default_bucket: cfg.publish.default_bucket.clone(),
        }
    }

    /// Publish `source` into `bucket`, or the configured default bucket.
    pub fn publish(&mut self, source: &Path, bucket: Option<&str>) -> Result<PublishReport, PublishError> {
        let bucket = bucket.unwrap_or(self.default_bucket.as_str());
        self.publisher.publish(&mut self.staging, &mut self.reporter, source, bucket)
    }

    pub fn issue(&mut self, severity: Severity, text: impl Into<String>) -> TaskState {
        self.reporter.issue(severity, text)
    }

    pub fn warning(&mut self, text: impl Into<String>) -> TaskState {
        self.reporter.warning(text)
    }

    pub fn report_error(&mut self, record: &ErrorRecord) -> TaskState {
        report_error(&mut self.reporter, record)
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.reporter.info(text)
    }

    pub fn state(&self) -> TaskState {
        self.reporter.state()
    }

    /// Start a new phase: status goes back to `Succeeded`. Published files
    /// and the staging root are kept.
    pub fn reset(&mut self) {
        self.reporter.reset();
    }

    pub fn reporter(&self) -> &Reporter<S> {
        &self.reporter
    }

    pub fn finish(self) -> io::Result<Finished<S>> {
        self.reporter.finish()
    }
}
