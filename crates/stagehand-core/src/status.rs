use crate::{Message, Severity, TaskState};

/// Holds the job status for one reporting session.
///
/// Errors move the state to `Failed` unconditionally. Warnings only lift
/// `Succeeded` to `SucceededWithIssues`. Nothing but [`reset`](Self::reset)
/// ever lowers the state.
#[derive(Clone, Debug, Default)]
pub struct StatusAggregator {
    state: TaskState,
}

impl StatusAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, severity: Severity) -> TaskState {
        self.state = next_state(self.state, severity);
        self.state
    }

    pub fn record_message(&mut self, message: &Message) -> TaskState {
        self.record(message.severity)
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = TaskState::Succeeded;
    }
}

/// Pure transition function behind [`StatusAggregator::record`].
pub fn next_state(current: TaskState, severity: Severity) -> TaskState {
    match (current, severity) {
        (_, Severity::Error) => TaskState::Failed,
        (TaskState::Succeeded, Severity::Warning) => TaskState::SucceededWithIssues,
        (other, Severity::Warning) => other,
    }
}
