use std::error::Error as StdError;

/// A caught error, classified by the shape of context it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorRecord {
    /// Error raised while running: message plus stack frames.
    Runtime { message: String, stack_trace: Vec<String> },
    /// Error raised while parsing input, with the source position when known.
    Parse { message: String, position: Option<String>, stack_trace: Vec<String> },
    /// Error reported by another process or machine.
    Remote { message: String, origin: String, stack_trace: Vec<String> },
    /// Anything not classified above. Rendered from its text alone.
    Other { kind: String, text: String },
}

impl ErrorRecord {
    pub fn runtime(message: impl Into<String>) -> Self {
        ErrorRecord::Runtime { message: message.into(), stack_trace: vec![] }
    }

    pub fn other(kind: impl Into<String>, text: impl Into<String>) -> Self {
        ErrorRecord::Other { kind: kind.into(), text: text.into() }
    }

    /// Build a runtime record from a std error; its `source()` chain becomes
    /// the stack lines.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut stack_trace = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            stack_trace.push(format!("caused by: {}", cause));
            source = cause.source();
        }
        ErrorRecord::Runtime { message: err.to_string(), stack_trace }
    }

    pub fn kind(&self) -> &str {
        match self {
            ErrorRecord::Runtime { .. } => "runtime",
            ErrorRecord::Parse { .. } => "parse",
            ErrorRecord::Remote { .. } => "remote",
            ErrorRecord::Other { kind, .. } => kind.as_str(),
        }
    }

    /// Multi-line text for this record.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self {
            ErrorRecord::Runtime { message, stack_trace } => {
                out.push_str(message);
                push_frames(&mut out, stack_trace);
            }
            ErrorRecord::Parse { message, position, stack_trace } => {
                out.push_str(message);
                if let Some(pos) = position {
                    out.push_str(&format!("\nAt {}", pos));
                }
                push_frames(&mut out, stack_trace);
            }
            ErrorRecord::Remote { message, origin, stack_trace } => {
                out.push_str(message);
                out.push_str(&format!("\nOrigin: {}", origin));
                push_frames(&mut out, stack_trace);
            }
            ErrorRecord::Other { text, .. } => out.push_str(text),
        }
        out
    }
}

fn push_frames(out: &mut String, frames: &[String]) {
    for frame in frames {
        out.push_str("\n   at ");
        out.push_str(frame);
    }
}

impl From<anyhow::Error> for ErrorRecord {
    fn from(err: anyhow::Error) -> Self {
        let mut chain = err.chain();
        let message = chain.next().map(|e| e.to_string()).unwrap_or_default();
        let stack_trace = chain.map(|cause| format!("caused by: {}", cause)).collect();
        ErrorRecord::Runtime { message, stack_trace }
    }
}

impl From<std::io::Error> for ErrorRecord {
    fn from(err: std::io::Error) -> Self {
        ErrorRecord::from_error(&err)
    }
}

impl From<&str> for ErrorRecord {
    fn from(text: &str) -> Self {
        ErrorRecord::other("string", text)
    }
}

impl From<String> for ErrorRecord {
    fn from(text: String) -> Self {
        ErrorRecord::other("string", text)
    }
}
