use stagehand_core::TaskState;
use stagehand_host::{HostSink, Reporter};

use crate::record::ErrorRecord;

/// Render a record into the lines that will be reported, one issue each.
///
/// Blank lines are dropped. A record that renders to nothing still yields one
/// line so that reporting it always escalates the job status.
pub fn format_error(record: &ErrorRecord) -> Vec<String> {
    if let ErrorRecord::Other { kind, .. } = record {
        tracing::warn!(kind = %kind, "unrecognized error kind; using generic rendering");
    }

    let lines: Vec<String> = record
        .render()
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .map(String::from)
        .collect();

    if lines.is_empty() {
        vec![format!("unknown {} error", record.kind())]
    } else {
        lines
    }
}

/// Report every rendered line as an error-severity issue.
pub fn report_error<S: HostSink>(reporter: &mut Reporter<S>, record: &ErrorRecord) -> TaskState {
    for line in format_error(record) {
        reporter.error(line);
    }
    reporter.state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_core::{HostCommand, Severity};
    use stagehand_host::MemorySink;

    #[test]
    fn each_line_becomes_an_error_issue() {
        let mut reporter = Reporter::new(MemorySink::new());
        let rec = ErrorRecord::Remote {
            message: "upload refused".into(),
            origin: "artifact-service".into(),
            stack_trace: vec!["handoff".into()],
        };
        let state = report_error(&mut reporter, &rec);
        assert_eq!(state, TaskState::Failed);
        assert_eq!(
            reporter.sink().commands,
            vec![
                HostCommand::LogIssue { severity: Severity::Error, message: "upload refused".into() },
                HostCommand::LogIssue { severity: Severity::Error, message: "Origin: artifact-service".into() },
                HostCommand::LogIssue { severity: Severity::Error, message: "   at handoff".into() },
            ]
        );
    }

    #[test]
    fn unrecognized_error_uses_generic_text_and_fails() {
        let mut reporter = Reporter::new(MemorySink::new());
        let rec = ErrorRecord::other("exit-code", "tool exited with 3");
        assert_eq!(format_error(&rec), vec!["tool exited with 3".to_string()]);
        assert_eq!(report_error(&mut reporter, &rec), TaskState::Failed);
        assert_eq!(reporter.sink().issues().len(), 1);
    }

    #[test]
    fn empty_rendering_still_records_one_error() {
        let mut reporter = Reporter::new(MemorySink::new());
        let rec = ErrorRecord::other("blank", "\n  \n");
        report_error(&mut reporter, &rec);
        assert_eq!(reporter.state(), TaskState::Failed);
        assert_eq!(
            reporter.sink().commands,
            vec![HostCommand::LogIssue { severity: Severity::Error, message: "unknown blank error".into() }]
        );
    }

    #[test]
    fn error_after_warning_still_fails() {
        let mut reporter = Reporter::new(MemorySink::new());
        reporter.warning("deprecated flag");
        report_error(&mut reporter, &ErrorRecord::runtime("link step failed"));
        assert_eq!(reporter.state(), TaskState::Failed);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logged_while(rec: &ErrorRecord) -> String {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || format_error(rec));
        let bytes = log.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn unrecognized_kind_leaves_a_diagnostic_note() {
        let out = logged_while(&ErrorRecord::other("exit-code", "tool exited with 3"));
        assert!(out.contains("unrecognized error kind"), "{out}");
        assert!(out.contains("kind=exit-code"), "{out}");
    }

    #[test]
    fn recognized_kind_logs_nothing() {
        let out = logged_while(&ErrorRecord::runtime("link step failed"));
        assert!(out.is_empty(), "{out}");
    }
}
