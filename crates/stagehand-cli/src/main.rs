use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use stagehand_core::{Severity, TaskState};
use stagehand_errors::ErrorRecord;
use stagehand_host::TextSink;
use stagehand_runner::{doctor, Config, HostEnvironment, Session};

#[derive(Parser)]
#[command(name = "stagehand", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default config to .stagehand/stagehand.toml if absent
    Init,

    /// Show how the host environment would be resolved
    Doctor,

    /// Publish build outputs and report the job result
    Publish {
        /// File or directory to publish; repeatable
        #[arg(long = "source", required = true)]
        sources: Vec<PathBuf>,
        /// Bucket under the staging root (defaults to the configured bucket)
        #[arg(long)]
        bucket: Option<String>,
        /// Print a JSON summary to stderr
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Report one issue and complete the job
    Issue {
        #[arg(long, value_parser = parse_severity)]
        severity: Severity,
        text: String,
    },

    /// Format an error, report it and complete the job
    Fail {
        message: String,
        #[arg(long, value_enum, default_value_t = Kind::Runtime)]
        kind: Kind,
        /// Origin descriptor for remote errors
        #[arg(long)]
        origin: Option<String>,
        /// Source position for parse errors
        #[arg(long)]
        position: Option<String>,
        /// Stack frame; repeatable
        #[arg(long = "stack")]
        stack: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Runtime,
    Parse,
    Remote,
    Other,
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse::<Severity>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match cli.cmd {
        Command::Init => {
            let path = Config::config_path(&root);
            if path.exists() {
                println!("Config already present at {}", path.display());
            } else {
                Config::default().save_to(&path)?;
                println!("Wrote {}", path.display());
            }
        }
        Command::Doctor => {
            let cfg = Config::load_or_default(&root)?;
            let env = HostEnvironment::capture(&cfg);
            for line in doctor(&cfg, &env) {
                println!("{}", line);
            }
        }
        Command::Publish { sources, bucket, json } => {
            let mut session = open_session(&root)?;
            let mut reports = Vec::new();
            let mut fatal = None;
            for source in &sources {
                match session.publish(source, bucket.as_deref()) {
                    Ok(report) => {
                        session.info(format!(
                            "Published {} file(s) from {} ({} already published, {} failed)",
                            report.uploaded.len(),
                            source.display(),
                            report.skipped,
                            report.failed
                        ));
                        reports.push(report);
                    }
                    Err(e) => {
                        session.report_error(&ErrorRecord::from_error(&e));
                        fatal = Some(anyhow::Error::new(e).context(format!("publish {}", source.display())));
                        break;
                    }
                }
            }
            let state = finish(session)?;
            if json {
                let summary = serde_json::json!({ "result": state, "reports": reports });
                eprintln!("{}", serde_json::to_string_pretty(&summary)?);
            }
            if let Some(e) = fatal {
                return Err(e);
            }
        }
        Command::Issue { severity, text } => {
            let mut session = open_session(&root)?;
            session.issue(severity, text);
            finish(session)?;
        }
        Command::Fail { message, kind, origin, position, stack } => {
            let record = match kind {
                Kind::Runtime => ErrorRecord::Runtime { message, stack_trace: stack },
                Kind::Parse => ErrorRecord::Parse { message, position, stack_trace: stack },
                Kind::Remote => ErrorRecord::Remote {
                    message,
                    origin: origin.unwrap_or_else(|| "unknown".to_string()),
                    stack_trace: stack,
                },
                Kind::Other => ErrorRecord::other("cli", message),
            };
            let mut session = open_session(&root)?;
            session.report_error(&record);
            finish(session)?;
        }
    }

    Ok(())
}

fn open_session(root: &std::path::Path) -> anyhow::Result<Session<TextSink<std::io::Stdout>>> {
    let cfg = Config::load_or_default(root)?;
    let env = HostEnvironment::capture(&cfg);
    Ok(Session::new(&cfg, env, TextSink::stdout()))
}

fn finish(session: Session<TextSink<std::io::Stdout>>) -> anyhow::Result<TaskState> {
    let done = session.finish().context("write task completion")?;
    tracing::info!(result = %done.state, "job complete");
    Ok(done.state)
}
