use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Aggregated result of a build job.
///
/// Variants are declared in severity order, so the derived `Ord` gives
/// `Succeeded < SucceededWithIssues < Failed`.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskState {
    #[default]
    Succeeded,
    SucceededWithIssues,
    Failed,
}

impl TaskState {
    /// Name used in the host's `task.complete` command.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Succeeded => "Succeeded",
            TaskState::SucceededWithIssues => "SucceededWithIssues",
            TaskState::Failed => "Failed",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown severity: {0} (expected `warning` or `error`)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_are_ordered_by_severity() {
        assert!(TaskState::Succeeded < TaskState::SucceededWithIssues);
        assert!(TaskState::SucceededWithIssues < TaskState::Failed);
        assert_eq!(TaskState::default(), TaskState::Succeeded);
    }

    #[test]
    fn parses_severity_case_insensitively() {
        assert_eq!("Error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert!("info".parse::<Severity>().is_err());
    }
}
