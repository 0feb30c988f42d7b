//! # A2A (Agent2Agent) Protocol Types
//!
//! Rust data structures for the subset of the Agent2Agent (A2A) protocol that a
//! conversational client needs: the JSON-RPC envelope, tasks and their lifecycle
//! states, messages and parts, artifacts, and the events delivered over a
//! `message/stream` connection.
//!
//! All types serialize with the camelCase field names used on the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

pub mod agent_card;
pub use agent_card::{AgentCapabilities, AgentCard, AgentProvider, AgentSkill, TransportProtocol};

// ============================================================================
// JSON-RPC 2.0 Base Types
// ============================================================================

/// Represents a JSON-RPC 2.0 identifier, which can be a string, number, or null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JSONRPCId {
    String(String),
    Integer(i64),
    Null,
}

/// Represents a JSON-RPC 2.0 Error Response object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JSONRPCErrorResponse {
    /// The version of the JSON-RPC protocol. MUST be exactly "2.0".
    pub jsonrpc: String,
    /// An object describing the error that occurred.
    pub error: JSONRPCError,
    /// The identifier established by the client.
    pub id: Option<JSONRPCId>,
}

/// Represents a JSON-RPC 2.0 Error object, included in an error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JSONRPCError {
    /// A number that indicates the error type that occurred.
    pub code: i32,
    /// A string providing a short description of the error.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for JSONRPCError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

// ============================================================================
// A2A Core Protocol Types
// ============================================================================

/// Defines the lifecycle states of a Task.
///
/// Values the client does not know are kept verbatim in [`TaskState::Other`]
/// so they survive a round trip instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// The task has been submitted and is awaiting execution.
    Submitted,
    /// The agent is actively working on the task.
    Working,
    /// The task is paused and waiting for input from the user.
    InputRequired,
    /// The task has been successfully completed.
    Completed,
    /// The task has been canceled by the user.
    Canceled,
    /// The task failed due to an error during execution. Also accepts the `error` spelling.
    Failed,
    /// The task was rejected by the agent and was not started.
    Rejected,
    /// The task requires authentication to proceed.
    AuthRequired,
    /// The task is in an unknown or indeterminate state.
    Unknown,
    /// A state this client does not recognize, carried as sent.
    Other(String),
}

impl TaskState {
    /// The wire representation of this state.
    pub fn as_str(&self) -> &str {
        match self {
            TaskState::Submitted => "submitted",
            TaskState::Working => "working",
            TaskState::InputRequired => "input-required",
            TaskState::Completed => "completed",
            TaskState::Canceled => "canceled",
            TaskState::Failed => "failed",
            TaskState::Rejected => "rejected",
            TaskState::AuthRequired => "auth-required",
            TaskState::Unknown => "unknown",
            TaskState::Other(raw) => raw,
        }
    }
}

impl From<&str> for TaskState {
    fn from(value: &str) -> Self {
        match value {
            "submitted" => TaskState::Submitted,
            "working" => TaskState::Working,
            "input-required" | "input_required" => TaskState::InputRequired,
            "completed" => TaskState::Completed,
            "canceled" | "cancelled" => TaskState::Canceled,
            "failed" | "error" => TaskState::Failed,
            "rejected" => TaskState::Rejected,
            "auth-required" | "auth_required" => TaskState::AuthRequired,
            "unknown" => TaskState::Unknown,
            other => TaskState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskState::from(raw.as_str()))
    }
}

/// Represents the status of a task at a specific point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// The current state of the task's lifecycle.
    pub state: TaskState,
    /// An ISO 8601 datetime string indicating when this status was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// An optional, human-readable message providing more details about the current status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// Represents a single, stateful operation or conversation between a client and an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// The type of this object, used as a discriminator. Always 'task'.
    #[serde(default = "default_task_kind")]
    pub kind: String,
    /// A unique identifier for the task, generated by the server for a new task.
    pub id: String,
    /// A server-generated identifier for maintaining context across multiple related tasks or interactions.
    #[serde(rename = "contextId")]
    pub context_id: String,
    /// The current status of the task, including its state and a descriptive message.
    pub status: TaskStatus,
    /// An array of messages exchanged during the task, representing the conversation history.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub history: Vec<Message>,
    /// A collection of artifacts generated by the agent during the execution of the task.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub artifacts: Vec<Artifact>,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_task_kind() -> String {
    TASK_KIND.to_string()
}

impl Task {
    /// Creates a task in the given state with no history or artifacts.
    pub fn new(id: impl Into<String>, context_id: impl Into<String>, state: TaskState) -> Self {
        Self {
            kind: default_task_kind(),
            id: id.into(),
            context_id: context_id.into(),
            status: TaskStatus {
                state,
                timestamp: None,
                message: None,
            },
            history: Vec::new(),
            artifacts: Vec::new(),
            metadata: None,
        }
    }

    /// Attaches a status message to the task (builder pattern).
    pub fn with_status_message(mut self, message: Message) -> Self {
        self.status.message = Some(message);
        self
    }
}

/// Identifies the sender of a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// For messages sent by the client/user.
    User,
    /// For messages sent by the agent/service.
    Agent,
}

/// Represents a single message in the conversation between a user and an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// The type of this object, used as a discriminator. Always 'message'.
    #[serde(default = "default_message_kind")]
    pub kind: String,
    /// A unique identifier for the message, typically a UUID, generated by the sender.
    #[serde(rename = "messageId")]
    pub message_id: String,
    /// Identifies the sender of the message.
    pub role: MessageRole,
    /// An array of content parts that form the message body.
    pub parts: Vec<Part>,
    /// The context identifier for this message, used to group related interactions.
    #[serde(skip_serializing_if = "Option::is_none", rename = "contextId")]
    pub context_id: Option<String>,
    /// The identifier of the task this message is part of. Omitted for the first message of a new task.
    #[serde(skip_serializing_if = "Option::is_none", rename = "taskId")]
    pub task_id: Option<String>,
    /// A list of other task IDs that this message references for additional context.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        rename = "referenceTaskIds",
        default
    )]
    pub reference_task_ids: Vec<String>,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_message_kind() -> String {
    MESSAGE_KIND.to_string()
}

impl Message {
    /// Creates a single-text-part user message bound to an optional task and context.
    ///
    /// The message id is a fresh UUID v4.
    pub fn user_text(
        text: impl Into<String>,
        task_id: Option<String>,
        context_id: Option<String>,
    ) -> Self {
        Self::with_role(MessageRole::User, vec![Part::text(text)], task_id, context_id)
    }

    /// Creates a single-text-part agent message.
    pub fn agent_text(text: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Agent, vec![Part::text(text)], None, None)
    }

    /// Creates a message with explicit role and parts.
    pub fn with_role(
        role: MessageRole,
        parts: Vec<Part>,
        task_id: Option<String>,
        context_id: Option<String>,
    ) -> Self {
        Self {
            kind: default_message_kind(),
            message_id: uuid::Uuid::new_v4().to_string(),
            role,
            parts,
            context_id,
            task_id,
            reference_task_ids: Vec::new(),
            metadata: None,
        }
    }

    /// Iterates over the text of every text part, skipping other kinds.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(Part::as_text)
    }
}

/// A discriminated union representing a part of a message or artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    /// Represents a text segment.
    Text {
        /// The string content of the text part.
        text: String,
        /// Optional metadata associated with this part.
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, serde_json::Value>>,
    },
    /// Represents a file segment.
    File {
        /// The file content, represented as either a URI or as base64-encoded bytes.
        file: FileContent,
        /// Optional metadata associated with this part.
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, serde_json::Value>>,
    },
    /// Represents a structured data segment (e.g., JSON).
    Data {
        /// The structured data content.
        data: serde_json::Value,
        /// Optional metadata associated with this part.
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, serde_json::Value>>,
    },
    /// A part kind introduced by a newer protocol revision.
    #[serde(other)]
    Unsupported,
}

impl Part {
    /// Creates a text part without metadata.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: text.into(),
            metadata: None,
        }
    }

    /// Returns the text content when this is a non-empty text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text, .. } if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Part::Data { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Represents file content, which can be provided either directly as bytes or as a URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FileContent {
    WithBytes(FileWithBytes),
    WithUri(FileWithUri),
}

/// Represents a file with its content provided directly as a base64-encoded string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileWithBytes {
    /// The base64-encoded content of the file.
    pub bytes: String,
    /// The MIME type of the file (e.g., "application/pdf").
    #[serde(skip_serializing_if = "Option::is_none", rename = "mimeType")]
    pub mime_type: Option<String>,
    /// An optional name for the file (e.g., "document.pdf").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Represents a file with its content located at a specific URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileWithUri {
    /// A URL pointing to the file's content.
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none", rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Represents a file, data structure, or other resource generated by an agent during a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// A unique identifier for the artifact within the scope of the task.
    #[serde(rename = "artifactId")]
    pub artifact_id: String,
    /// An array of content parts that make up the artifact.
    pub parts: Vec<Part>,
    /// An optional, human-readable name for the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// An optional, human-readable description of the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

// ============================================================================
// A2A Method Parameter Types
// ============================================================================

/// Defines the parameters for a request to send a message to an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSendParams {
    /// The message object being sent to the agent.
    pub message: Message,
    /// Optional configuration for the send request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<MessageSendConfiguration>,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// Defines configuration options for a `message/send` or `message/stream` request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MessageSendConfiguration {
    /// If true, the client will wait for the task to complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking: Option<bool>,
    /// The number of most recent messages from the task's history to retrieve in the response.
    #[serde(skip_serializing_if = "Option::is_none", rename = "historyLength")]
    pub history_length: Option<i32>,
    /// A list of output modes the client is prepared to accept in the response.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        rename = "acceptedOutputModes",
        default
    )]
    pub accepted_output_modes: Vec<String>,
}

/// Defines parameters for querying a task, with an option to limit history length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskQueryParams {
    /// The unique identifier of the task.
    pub id: String,
    /// The number of most recent messages from the task's history to retrieve.
    #[serde(skip_serializing_if = "Option::is_none", rename = "historyLength")]
    pub history_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl TaskQueryParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            history_length: None,
            metadata: None,
        }
    }
}

// ============================================================================
// A2A Response Types
// ============================================================================

/// The result of a `message/send` call, which can be a direct reply or a task object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SendMessageResult {
    Task(Task),
    Message(Message),
}

/// A single event of a `message/stream` call.
///
/// The four protocol shapes are tried in order. A payload matching none of
/// them is kept as raw JSON so the consumer can report it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SendStreamingMessageResult {
    Task(Task),
    Message(Message),
    TaskStatusUpdate(TaskStatusUpdateEvent),
    TaskArtifactUpdate(TaskArtifactUpdateEvent),
    Unrecognized(serde_json::Value),
}

/// Represents a successful JSON-RPC response for the `message/stream` method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendStreamingMessageSuccessResponse {
    pub jsonrpc: String, // Always "2.0"
    pub result: SendStreamingMessageResult,
    pub id: Option<JSONRPCId>,
}

/// Represents a JSON-RPC response for the `message/stream` method.
///
/// Error envelopes can arrive in the middle of a stream, so both shapes are
/// items of the event stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SendStreamingMessageResponse {
    Error(JSONRPCErrorResponse),
    Success(Box<SendStreamingMessageSuccessResponse>),
}

impl SendStreamingMessageResponse {
    /// Wraps an event in a success envelope with no request id.
    pub fn event(result: SendStreamingMessageResult) -> Self {
        SendStreamingMessageResponse::Success(Box::new(SendStreamingMessageSuccessResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result,
            id: None,
        }))
    }

    /// Wraps an error object in an error envelope with no request id.
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        SendStreamingMessageResponse::Error(JSONRPCErrorResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            error: JSONRPCError {
                code,
                message: message.into(),
                data: None,
            },
            id: None,
        })
    }
}

// Constants for type values
pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "0.3.0";
pub const TASK_KIND: &str = "task";
pub const MESSAGE_KIND: &str = "message";
pub const STATUS_UPDATE_KIND: &str = "status-update";
pub const ARTIFACT_UPDATE_KIND: &str = "artifact-update";

// ============================================================================
// Streaming Event Types
// ============================================================================

/// An event sent by the agent to notify the client of a change in a task's status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatusUpdateEvent {
    /// The type of this event. Always "status-update".
    #[serde(default = "default_status_update_kind")]
    pub kind: String,
    /// The ID of the task that was updated.
    #[serde(rename = "taskId")]
    pub task_id: String,
    /// The context ID associated with the task.
    #[serde(rename = "contextId")]
    pub context_id: String,
    /// The new status of the task.
    pub status: TaskStatus,
    /// If true, this is the final event in the stream for this interaction.
    #[serde(rename = "final", default)]
    pub is_final: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_status_update_kind() -> String {
    STATUS_UPDATE_KIND.to_string()
}

/// An event sent by the agent to notify the client that an artifact has been generated or updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskArtifactUpdateEvent {
    /// The type of this event. Always "artifact-update".
    #[serde(default = "default_artifact_update_kind")]
    pub kind: String,
    /// The ID of the task this artifact belongs to.
    #[serde(rename = "taskId")]
    pub task_id: String,
    /// The context ID associated with the task.
    #[serde(rename = "contextId")]
    pub context_id: String,
    /// The artifact that was generated or updated.
    pub artifact: Artifact,
    /// If true, the content of this artifact should be appended to a previously sent artifact with the same ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,
    /// If true, this is the final chunk of the artifact.
    #[serde(skip_serializing_if = "Option::is_none", rename = "lastChunk")]
    pub last_chunk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_artifact_update_kind() -> String {
    ARTIFACT_UPDATE_KIND.to_string()
}
