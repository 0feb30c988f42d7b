//! Constants for the A2A client

/// Default path to the agent card as per A2A specification
pub const AGENT_CARD_PATH: &str = ".well-known/agent-card.json";

/// Card path used by agents built against protocol revisions before 0.3
pub const LEGACY_AGENT_CARD_PATH: &str = ".well-known/agent.json";

/// JSON-RPC method names used by this client
pub const METHOD_MESSAGE_SEND: &str = "message/send";
pub const METHOD_MESSAGE_STREAM: &str = "message/stream";
pub const METHOD_TASKS_GET: &str = "tasks/get";

/// Content type of a Server-Sent Events response
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";
