//! Task state resolution.
//!
//! Maps the authoritative task record at the end of a turn onto what the
//! session does next.

use a2a_types::{Task, TaskState};

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The agent asked for more input on the same task.
    Continue,
    Complete,
    /// The task failed. Carries the text of its status message, if any.
    Error { message: Option<String> },
    /// A state with no defined follow-up. Treated as terminal.
    Unhandled(TaskState),
}

impl Resolution {
    pub fn should_continue(&self) -> bool {
        matches!(self, Resolution::Continue)
    }
}

pub fn resolve(task: &Task) -> Resolution {
    match &task.status.state {
        TaskState::InputRequired => Resolution::Continue,
        TaskState::Completed => Resolution::Complete,
        TaskState::Failed => Resolution::Error {
            message: status_text(task),
        },
        other => {
            tracing::warn!(
                task_id = %task.id,
                state = %other,
                "task ended in a state with no defined follow-up; starting a new task"
            );
            Resolution::Unhandled(other.clone())
        }
    }
}

fn status_text(task: &Task) -> Option<String> {
    let message = task.status.message.as_ref()?;
    let text = message.texts().collect::<Vec<_>>().join("\n");
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2a_types::Message;

    fn task(state: TaskState) -> Task {
        Task::new("t1", "c1", state)
    }

    #[test]
    fn input_required_continues() {
        let resolution = resolve(&task(TaskState::InputRequired));
        assert_eq!(resolution, Resolution::Continue);
        assert!(resolution.should_continue());
    }

    #[test]
    fn completed_stops() {
        let resolution = resolve(&task(TaskState::Completed));
        assert_eq!(resolution, Resolution::Complete);
        assert!(!resolution.should_continue());
    }

    #[test]
    fn failed_surfaces_status_message() {
        let failed = task(TaskState::Failed)
            .with_status_message(Message::agent_text("We are unable to process your request"));
        assert_eq!(
            resolve(&failed),
            Resolution::Error {
                message: Some("We are unable to process your request".to_string())
            }
        );
    }

    #[test]
    fn error_wire_value_resolves_as_failure() {
        let failed = task(TaskState::from("error"));
        assert!(matches!(resolve(&failed), Resolution::Error { message: None }));
    }

    // Every state other than input-required, completed and failed ends the
    // task. These cases pin that down so a change is deliberate.
    #[test]
    fn unlisted_states_stop_without_error() {
        for state in [
            TaskState::Submitted,
            TaskState::Working,
            TaskState::Canceled,
            TaskState::Rejected,
            TaskState::AuthRequired,
            TaskState::Unknown,
            TaskState::Other("paused".to_string()),
        ] {
            let resolution = resolve(&task(state.clone()));
            assert_eq!(resolution, Resolution::Unhandled(state));
            assert!(!resolution.should_continue());
        }
    }
}
