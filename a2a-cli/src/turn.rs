//! One user turn against the remote agent.
//!
//! A turn sends a single message bound to the current task, renders whatever
//! comes back, and reports whether the task wants another turn.

use crate::agent::RemoteAgent;
use crate::classify::{classify, message_lines, task_lines, DisplayLine, EventKind};
use crate::console::Console;
use crate::resolve::{resolve, Resolution};
use a2a_types::{
    Message, MessageSendConfiguration, MessageSendParams, SendMessageResult, Task,
    TaskQueryParams, TaskState,
};
use futures::StreamExt;
use std::fmt;

/// Inputs that end the session instead of being sent.
pub const EXIT_SENTINELS: [&str; 2] = [":q", "quit"];

/// Output mode advertised on every outbound message.
pub const ACCEPTED_OUTPUT_MODE: &str = "text";

/// Matches the line exactly, ignoring only a trailing line terminator.
pub fn is_exit_sentinel(input: &str) -> bool {
    EXIT_SENTINELS.contains(&input.trim_end_matches(['\r', '\n']))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    ContextId,
    TaskId,
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdField::ContextId => f.write_str("contextId"),
            IdField::TaskId => f.write_str("taskId"),
        }
    }
}

/// A server-sent id that disagreed with the one already bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAnomaly {
    pub field: IdField,
    pub kept: String,
    pub received: String,
}

/// The task and context a turn is bound to.
///
/// Each id is unset until the agent supplies one. Once set it never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskIds {
    pub context_id: Option<String>,
    pub task_id: Option<String>,
}

impl TaskIds {
    pub fn new(context_id: Option<String>, task_id: Option<String>) -> Self {
        Self {
            context_id,
            task_id,
        }
    }

    pub fn observe_context_id(&mut self, received: Option<&str>) -> Option<IdAnomaly> {
        observe_id(&mut self.context_id, IdField::ContextId, received)
    }

    pub fn observe_task_id(&mut self, received: Option<&str>) -> Option<IdAnomaly> {
        observe_id(&mut self.task_id, IdField::TaskId, received)
    }

    /// Records both ids from one event and returns any disagreements.
    pub fn observe(&mut self, context_id: Option<&str>, task_id: Option<&str>) -> Vec<IdAnomaly> {
        self.observe_context_id(context_id)
            .into_iter()
            .chain(self.observe_task_id(task_id))
            .collect()
    }
}

fn observe_id(
    slot: &mut Option<String>,
    field: IdField,
    received: Option<&str>,
) -> Option<IdAnomaly> {
    let received = received.filter(|id| !id.is_empty())?;
    match slot {
        None => {
            *slot = Some(received.to_string());
            None
        }
        Some(kept) if kept.as_str() == received => None,
        Some(kept) => {
            tracing::warn!(
                %field,
                kept = %kept,
                received,
                "agent changed an id mid-task; keeping the original"
            );
            Some(IdAnomaly {
                field,
                kept: kept.clone(),
                received: received.to_string(),
            })
        }
    }
}

/// Why a task stopped taking turns.
#[derive(Debug, Clone, PartialEq)]
pub enum FinishReason {
    Completed,
    Failed { message: Option<String> },
    /// The task reached a state with no defined follow-up.
    Unhandled(TaskState),
    /// The agent answered with a plain message instead of a task.
    Message,
    /// The stream carried a JSON-RPC error.
    ProtocolError,
    TransportFailure,
    /// The stream ended without naming a task.
    NoTask,
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Completed => f.write_str("task completed"),
            FinishReason::Failed { .. } => f.write_str("task failed"),
            FinishReason::Unhandled(state) => write!(f, "task ended in state '{}'", state),
            FinishReason::Message => f.write_str("agent replied with a message"),
            FinishReason::ProtocolError => f.write_str("turn aborted by a protocol error"),
            FinishReason::TransportFailure => f.write_str("call to the agent failed"),
            FinishReason::NoTask => f.write_str("agent did not create a task"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The agent wants more input on the same task.
    InputRequired,
    Finished(FinishReason),
    /// The operator asked to leave.
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub outcome: TurnOutcome,
    pub ids: TaskIds,
    pub anomalies: Vec<IdAnomaly>,
}

impl TurnResult {
    fn new(outcome: TurnOutcome, ids: TaskIds, anomalies: Vec<IdAnomaly>) -> Self {
        Self {
            outcome,
            ids,
            anomalies,
        }
    }

    fn finished(reason: FinishReason, ids: TaskIds, anomalies: Vec<IdAnomaly>) -> Self {
        Self::new(TurnOutcome::Finished(reason), ids, anomalies)
    }

    pub fn should_continue(&self) -> bool {
        matches!(self.outcome, TurnOutcome::InputRequired)
    }
}

/// Runs turns against one remote agent.
pub struct TurnExecutor<A> {
    agent: A,
    streaming: bool,
    history_length: Option<i32>,
}

impl<A: RemoteAgent> TurnExecutor<A> {
    /// Streams whenever the agent advertises support for it.
    pub fn new(agent: A) -> Self {
        let streaming = agent.supports_streaming();
        Self {
            agent,
            streaming,
            history_length: None,
        }
    }

    /// Turns streaming off. Passing `true` cannot enable streaming the agent
    /// does not support.
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.streaming = enabled && self.agent.supports_streaming();
        self
    }

    /// History length requested when the task is fetched after a stream.
    pub fn with_history_length(mut self, history_length: Option<i32>) -> Self {
        self.history_length = history_length;
        self
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub async fn execute_turn(
        &self,
        prompt: &str,
        ids: TaskIds,
        console: &mut dyn Console,
    ) -> TurnResult {
        if is_exit_sentinel(prompt) {
            return TurnResult::new(TurnOutcome::Exit, ids, Vec::new());
        }

        let params = self.build_params(prompt, &ids);
        tracing::debug!(
            task_id = ?ids.task_id,
            context_id = ?ids.context_id,
            streaming = self.streaming,
            "sending user turn"
        );

        if self.streaming {
            self.streaming_turn(params, ids, console).await
        } else {
            self.blocking_turn(params, ids, console).await
        }
    }

    fn build_params(&self, prompt: &str, ids: &TaskIds) -> MessageSendParams {
        MessageSendParams {
            message: Message::user_text(prompt, ids.task_id.clone(), ids.context_id.clone()),
            configuration: Some(MessageSendConfiguration {
                accepted_output_modes: vec![ACCEPTED_OUTPUT_MODE.to_string()],
                ..MessageSendConfiguration::default()
            }),
            metadata: None,
        }
    }

    async fn streaming_turn(
        &self,
        params: MessageSendParams,
        mut ids: TaskIds,
        console: &mut dyn Console,
    ) -> TurnResult {
        let mut anomalies = Vec::new();

        let mut events = match self.agent.send_streaming_message(params).await {
            Ok(events) => events,
            Err(e) => return transport_failure(e, ids, anomalies, console),
        };

        let mut saw_message = false;
        let mut failure_shown = false;
        while let Some(item) = events.next().await {
            let response = match item {
                Ok(response) => response,
                Err(e) if e.is_decode() => {
                    tracing::warn!(error = %e, "skipping undecodable stream event");
                    console.print(&format!("Skipped an unreadable event: {}", e));
                    continue;
                }
                Err(e) => return transport_failure(e, ids, anomalies, console),
            };

            let classification = classify(&response);
            if let Some(error) = &classification.error {
                tracing::warn!(
                    code = error.code,
                    message = %error.message,
                    "agent reported an error mid-stream"
                );
                console.print(&format!("Error: {}", error));
                return TurnResult::finished(FinishReason::ProtocolError, ids, anomalies);
            }

            anomalies.extend(ids.observe(
                classification.context_id.as_deref(),
                classification.task_id.as_deref(),
            ));

            match classification.kind {
                EventKind::Unrecognized => {
                    tracing::warn!("ignoring stream event of an unrecognized shape");
                }
                EventKind::Message => saw_message = true,
                EventKind::StatusUpdate
                    if classification.state == Some(TaskState::Failed)
                        && !classification.lines.is_empty() =>
                {
                    failure_shown = true;
                }
                kind => tracing::debug!(?kind, task_id = ?ids.task_id, "stream event"),
            }
            print_lines(console, &classification.lines);
        }

        let Some(task_id) = ids.task_id.clone() else {
            let reason = if saw_message {
                FinishReason::Message
            } else {
                FinishReason::NoTask
            };
            return TurnResult::finished(reason, ids, anomalies);
        };

        let query = TaskQueryParams {
            history_length: self.history_length,
            ..TaskQueryParams::new(task_id)
        };
        match self.agent.get_task(query).await {
            Ok(task) => {
                anomalies.extend(ids.observe(Some(&task.context_id), Some(&task.id)));
                let outcome = task_outcome(&task, failure_shown, console);
                TurnResult::new(outcome, ids, anomalies)
            }
            Err(e) => transport_failure(e, ids, anomalies, console),
        }
    }

    async fn blocking_turn(
        &self,
        params: MessageSendParams,
        mut ids: TaskIds,
        console: &mut dyn Console,
    ) -> TurnResult {
        let mut anomalies = Vec::new();

        let result = match self.agent.send_message(params).await {
            Ok(result) => result,
            Err(e) => return transport_failure(e, ids, anomalies, console),
        };

        match result {
            SendMessageResult::Message(message) => {
                anomalies.extend(ids.observe(message.context_id.as_deref(), None));
                print_lines(console, &message_lines(&message));
                TurnResult::finished(FinishReason::Message, ids, anomalies)
            }
            SendMessageResult::Task(task) => {
                anomalies.extend(ids.observe(Some(&task.context_id), Some(&task.id)));
                if task.status.state != TaskState::Failed {
                    print_lines(console, &task_lines(&task));
                }
                let outcome = task_outcome(&task, false, console);
                TurnResult::new(outcome, ids, anomalies)
            }
        }
    }
}

/// `failure_shown` is set when the failure text was already streamed as a
/// status line, so it is not repeated.
fn task_outcome(task: &Task, failure_shown: bool, console: &mut dyn Console) -> TurnOutcome {
    match resolve(task) {
        Resolution::Continue => TurnOutcome::InputRequired,
        Resolution::Complete => TurnOutcome::Finished(FinishReason::Completed),
        Resolution::Error { message } => {
            match &message {
                Some(text) if !failure_shown => {
                    console.print(&format!("Task failed: {}", text))
                }
                _ => console.print("Task failed"),
            }
            TurnOutcome::Finished(FinishReason::Failed { message })
        }
        Resolution::Unhandled(state) => TurnOutcome::Finished(FinishReason::Unhandled(state)),
    }
}

fn transport_failure(
    error: a2a_client::A2AError,
    ids: TaskIds,
    anomalies: Vec<IdAnomaly>,
    console: &mut dyn Console,
) -> TurnResult {
    tracing::error!(error = %error, "call to the agent failed");
    console.print(&format!("Failed to complete the call: {}", error));
    TurnResult::finished(FinishReason::TransportFailure, ids, anomalies)
}

fn print_lines(console: &mut dyn Console, lines: &[DisplayLine]) {
    for line in lines {
        console.print(&line.text);
    }
}
