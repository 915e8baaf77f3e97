use std::path::PathBuf;

use crate::{Severity, TaskState};

/// A single instruction for the CI host, before rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCommand {
    LogIssue { severity: Severity, message: String },
    Complete { result: TaskState },
    ArtifactUpload { container_folder: String, artifact_name: String, path: PathBuf },
    Info(String),
}

impl HostCommand {
    /// Render the command as one line of the host's logging-command syntax.
    ///
    /// `Info` renders untagged, one output line per input line, with any
    /// command prefix defused. Every other variant becomes
    /// `##vso[<area.event> key=value;...]<data>` with values escaped so a
    /// newline in user text cannot start a second command.
    pub fn render(&self) -> String {
        match self {
            HostCommand::LogIssue { severity, message } => {
                tagged("task.logissue", &[("type", severity.as_str())], message)
            }
            HostCommand::Complete { result } => tagged("task.complete", &[("result", result.as_str())], ""),
            HostCommand::ArtifactUpload { container_folder, artifact_name, path } => tagged(
                "artifact.upload",
                &[("containerfolder", container_folder.as_str()), ("artifactname", artifact_name.as_str())],
                &path.to_string_lossy(),
            ),
            HostCommand::Info(text) => untagged(text),
        }
    }
}

fn tagged(kind: &str, props: &[(&str, &str)], data: &str) -> String {
    let mut s = format!("##vso[{}", kind);
    if !props.is_empty() {
        s.push(' ');
        for (k, v) in props {
            s.push_str(&format!("{}={};", k, escape_property(v)));
        }
    }
    s.push(']');
    s.push_str(&escape_data(data));
    s
}

fn untagged(text: &str) -> String {
    text.replace("\r\n", "\n")
        .split(|c: char| c == '\r' || c == '\n')
        .map(|line| line.replace(COMMAND_PREFIX, "##vso%5B"))
        .collect::<Vec<_>>()
        .join("\n")
}

const COMMAND_PREFIX: &str = "##vso[";

fn escape_data(value: &str) -> String {
    value.replace('%', "%AZP25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(';', "%3B").replace(']', "%5D")
}
