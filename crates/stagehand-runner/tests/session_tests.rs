use std::path::PathBuf;

use stagehand_core::{HostCommand, Severity, TaskState};
use stagehand_errors::ErrorRecord;
use stagehand_host::{MemorySink, TextSink};
use stagehand_runner::{Config, HostEnvironment, Session};
use tempfile::tempdir;

fn env_with(pairs: &[(&str, String)]) -> HostEnvironment {
    let vars = pairs.iter().map(|(k, v)| (k.to_string(), v.clone()));
    HostEnvironment::from_vars(&Config::default(), vars)
}

#[test]
fn publish_then_finish_reports_uploads_and_state() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("app.tar"), "bits").unwrap();
    let staging = dir.path().join("staging");

    let env = env_with(&[("BUILD_STAGINGDIRECTORY", staging.display().to_string())]);
    let mut session = Session::new(&Config::default(), env, MemorySink::new());

    let report = session.publish(&out, None).unwrap();
    assert_eq!(report.destination, staging.join("release"));
    session.publish(&out, Some("other")).unwrap();

    let done = session.finish().unwrap();
    assert_eq!(done.state, TaskState::Succeeded);
    assert_eq!(done.sink.uploads().len(), 1);
    assert_eq!(done.sink.commands.last(), Some(&HostCommand::Complete { result: TaskState::Succeeded }));
}

#[test]
fn missing_staging_variable_falls_back_to_fresh_temp_dir() {
    let dir = tempdir().unwrap();
    let tmp = dir.path().join("agent-tmp");
    let out = dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("a.txt"), "a").unwrap();

    let env = env_with(&[("AGENT_TEMPDIRECTORY", tmp.display().to_string()), ("BUILD_ID", "42".into())]);
    let mut session = Session::new(&Config::default(), env, MemorySink::new());

    let report = session.publish(&out, None).unwrap();
    let root: PathBuf = report.destination.parent().unwrap().to_path_buf();
    assert!(root.starts_with(&tmp));
    assert_ne!(root, tmp);
    assert!(session.reporter().sink().commands.contains(&HostCommand::Info("  BUILD_ID=42".into())));
}

#[test]
fn warning_then_error_finishes_failed() {
    let mut session = Session::new(&Config::default(), HostEnvironment::default(), MemorySink::new());
    session.warning("cache miss");
    session.report_error(&ErrorRecord::Parse {
        message: "bad manifest".into(),
        position: Some("manifest.json:3".into()),
        stack_trace: vec![],
    });
    let done = session.finish().unwrap();
    assert_eq!(done.state, TaskState::Failed);
    assert_eq!(done.sink.issues().len(), 3);
}

#[test]
fn reset_between_phases() {
    let mut session = Session::new(&Config::default(), HostEnvironment::default(), MemorySink::new());
    session.issue(Severity::Error, "phase one");
    assert_eq!(session.state(), TaskState::Failed);
    session.reset();
    assert_eq!(session.state(), TaskState::Succeeded);
    session.issue(Severity::Warning, "phase two");
    assert_eq!(session.finish().unwrap().state, TaskState::SucceededWithIssues);
}

#[test]
fn text_output_matches_host_protocol() {
    let mut session = Session::new(&Config::default(), HostEnvironment::default(), TextSink::new(Vec::new()));
    session.info("build 42");
    session.report_error(&ErrorRecord::other("exit-code", "make exited with 2"));
    let done = session.finish().unwrap();
    let text = String::from_utf8(done.sink.into_inner()).unwrap();
    assert_eq!(
        text,
        "build 42\n##vso[task.logissue type=error;]make exited with 2\n##vso[task.complete result=Failed;]\n"
    );
}

#[test]
fn environment_dump_cannot_forge_completion() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("a.txt"), "a").unwrap();

    let env = env_with(&[
        ("AGENT_TEMPDIRECTORY", dir.path().join("tmp").display().to_string()),
        ("EVIL", "x\n##vso[task.complete result=Succeeded;]".into()),
    ]);
    let mut session = Session::new(&Config::default(), env, TextSink::new(Vec::new()));
    session.publish(&out, None).unwrap();
    session.report_error(&ErrorRecord::runtime("link failed"));

    let text = String::from_utf8(session.finish().unwrap().sink.into_inner()).unwrap();
    let completions: Vec<&str> = text.lines().filter(|l| l.starts_with("##vso[task.complete")).collect();
    assert_eq!(completions, vec!["##vso[task.complete result=Failed;]"]);
    assert!(text.lines().any(|l| l == "##vso%5Btask.complete result=Succeeded;]"));
}
