use std::io;
use std::path::Path;

use stagehand_core::{HostCommand, Message, Severity, StatusAggregator, TaskState};

use crate::sink::HostSink;

/// Pairs the status aggregator with the host sink.
///
/// Every issue goes through here, so writing an issue line and escalating
/// the job status cannot drift apart.
pub struct Reporter<S: HostSink> {
    sink: S,
    status: StatusAggregator,
}

/// Result of [`Reporter::finish`]: the final state and the sink it was written to.
pub struct Finished<S> {
    pub state: TaskState,
    pub sink: S,
}

impl<S: HostSink> Reporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, status: StatusAggregator::new() }
    }

    /// Record an issue and emit it. The state escalates even if the sink
    /// fails to write.
    pub fn issue(&mut self, severity: Severity, text: impl Into<String>) -> TaskState {
        let message = Message { severity, text: text.into() };
        let state = self.status.record_message(&message);
        let cmd = HostCommand::LogIssue { severity, message: message.text };
        if let Err(e) = self.sink.emit(&cmd) {
            tracing::error!(error = %e, severity = %severity, "failed to write issue to host");
        }
        state
    }

    pub fn warning(&mut self, text: impl Into<String>) -> TaskState {
        self.issue(Severity::Warning, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> TaskState {
        self.issue(Severity::Error, text)
    }

    pub fn info(&mut self, text: impl Into<String>) {
        if let Err(e) = self.sink.emit(&HostCommand::Info(text.into())) {
            tracing::warn!(error = %e, "failed to write info line to host");
        }
    }

    /// Ask the host to upload `path`. Unlike issues, a write failure here is
    /// returned: the file was not handed off.
    pub fn upload(&mut self, container_folder: &str, artifact_name: &str, path: &Path) -> io::Result<()> {
        self.sink.emit(&HostCommand::ArtifactUpload {
            container_folder: container_folder.to_string(),
            artifact_name: artifact_name.to_string(),
            path: path.to_path_buf(),
        })
    }

    pub fn state(&self) -> TaskState {
        self.status.state()
    }

    pub fn reset(&mut self) {
        self.status.reset();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Emit `task.complete` with the final state. Consumes the reporter so
    /// completion happens once per session.
    pub fn finish(mut self) -> io::Result<Finished<S>> {
        let state = self.status.state();
        self.sink.emit(&HostCommand::Complete { result: state })?;
        Ok(Finished { state, sink: self.sink })
    }
}
