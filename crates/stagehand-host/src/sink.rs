use std::io::{self, Write};

use stagehand_core::HostCommand;

/// Destination for host commands.
pub trait HostSink {
    fn emit(&mut self, cmd: &HostCommand) -> io::Result<()>;
}

/// Renders each command as one text line on a writer (stdout in production).
pub struct TextSink<W: Write> {
    out: W,
}

impl TextSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> HostSink for TextSink<W> {
    fn emit(&mut self, cmd: &HostCommand) -> io::Result<()> {
        writeln!(self.out, "{}", cmd.render())?;
        self.out.flush()
    }
}

/// Keeps commands in memory. Used by tests to assert on structured output.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub commands: Vec<HostCommand>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> Vec<&HostCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, HostCommand::ArtifactUpload { .. }))
            .collect()
    }

    pub fn issues(&self) -> Vec<&HostCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, HostCommand::LogIssue { .. }))
            .collect()
    }
}

impl HostSink for MemorySink {
    fn emit(&mut self, cmd: &HostCommand) -> io::Result<()> {
        self.commands.push(cmd.clone());
        Ok(())
    }
}

impl<T: HostSink + ?Sized> HostSink for &mut T {
    fn emit(&mut self, cmd: &HostCommand) -> io::Result<()> {
        (**self).emit(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_core::Severity;

    #[test]
    fn text_sink_writes_one_line_per_command() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&HostCommand::Info("starting".into())).unwrap();
        sink.emit(&HostCommand::LogIssue { severity: Severity::Warning, message: "careful".into() })
            .unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "starting\n##vso[task.logissue type=warning;]careful\n");
    }
}
