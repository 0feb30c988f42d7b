//! Event classification for a single turn.
//!
//! Every item of a `message/stream` response, and the inline result of a
//! `message/send`, is reduced to the identifiers it carries plus the text
//! lines an operator should see. Nothing here prints or keeps state.

use a2a_types::{
    Artifact, JSONRPCError, Message, Part, SendStreamingMessageResponse, SendStreamingMessageResult,
    Task, TaskState,
};
use std::fmt;

/// Where a display line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSource {
    Status,
    Artifact,
    Message,
}

impl LineSource {
    pub fn label(self) -> &'static str {
        match self {
            LineSource::Status => "status",
            LineSource::Artifact => "artifact",
            LineSource::Message => "message",
        }
    }
}

/// One line of transcript output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub source: LineSource,
    pub text: String,
}

impl DisplayLine {
    fn new(source: LineSource, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TaskSnapshot,
    StatusUpdate,
    ArtifactUpdate,
    Message,
    Unrecognized,
    Error,
}

/// What one event says about the turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: EventKind,
    pub context_id: Option<String>,
    pub task_id: Option<String>,
    /// Task state carried by snapshots and status updates.
    pub state: Option<TaskState>,
    pub lines: Vec<DisplayLine>,
    /// Set only for JSON-RPC error envelopes.
    pub error: Option<JSONRPCError>,
}

impl Classification {
    fn new(kind: EventKind, context_id: Option<&str>, task_id: Option<&str>) -> Self {
        Self {
            kind,
            context_id: non_empty(context_id),
            task_id: non_empty(task_id),
            state: None,
            lines: Vec::new(),
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Classifies one stream item.
pub fn classify(response: &SendStreamingMessageResponse) -> Classification {
    let success = match response {
        SendStreamingMessageResponse::Error(envelope) => {
            let mut classification = Classification::new(EventKind::Error, None, None);
            classification.error = Some(envelope.error.clone());
            return classification;
        }
        SendStreamingMessageResponse::Success(success) => success,
    };

    match &success.result {
        SendStreamingMessageResult::Task(task) => {
            let mut classification = Classification::new(
                EventKind::TaskSnapshot,
                Some(&task.context_id),
                Some(&task.id),
            );
            classification.state = Some(task.status.state.clone());
            classification
        }
        SendStreamingMessageResult::TaskStatusUpdate(update) => {
            let mut classification = Classification::new(
                EventKind::StatusUpdate,
                Some(&update.context_id),
                Some(&update.task_id),
            );
            classification.state = Some(update.status.state.clone());
            if let Some(message) = &update.status.message {
                classification.lines = part_lines(LineSource::Status, &message.parts);
            }
            classification
        }
        SendStreamingMessageResult::TaskArtifactUpdate(update) => {
            let mut classification = Classification::new(
                EventKind::ArtifactUpdate,
                Some(&update.context_id),
                Some(&update.task_id),
            );
            classification.lines = part_lines(LineSource::Artifact, &update.artifact.parts);
            classification
        }
        SendStreamingMessageResult::Message(message) => {
            let mut classification =
                Classification::new(EventKind::Message, message.context_id.as_deref(), None);
            classification.lines = message_lines(message);
            classification
        }
        SendStreamingMessageResult::Unrecognized(_) => {
            Classification::new(EventKind::Unrecognized, None, None)
        }
    }
}

/// Lines for a standalone agent message.
pub fn message_lines(message: &Message) -> Vec<DisplayLine> {
    part_lines(LineSource::Message, &message.parts)
}

/// Lines for an inline task: its status message, then each artifact in order.
pub fn task_lines(task: &Task) -> Vec<DisplayLine> {
    let mut lines = task
        .status
        .message
        .as_ref()
        .map(|message| part_lines(LineSource::Status, &message.parts))
        .unwrap_or_default();
    lines.extend(task.artifacts.iter().flat_map(artifact_lines));
    lines
}

fn artifact_lines(artifact: &Artifact) -> Vec<DisplayLine> {
    part_lines(LineSource::Artifact, &artifact.parts)
}

fn part_lines(source: LineSource, parts: &[Part]) -> Vec<DisplayLine> {
    parts
        .iter()
        .map(|part| match part.as_text() {
            Some(text) => DisplayLine::new(source, text),
            None => DisplayLine::new(source, fallback_text(source, part)),
        })
        .collect()
}

fn fallback_text(source: LineSource, part: &Part) -> String {
    let rendered = match part {
        Part::Unsupported => "<unsupported part kind>".to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{:?}", other)),
    };
    format!("No text in {} part: {}", source.label(), rendered)
}

fn non_empty(id: Option<&str>) -> Option<String> {
    id.filter(|id| !id.is_empty()).map(str::to_string)
}
