use serde::{Deserialize, Serialize};
// ============================================================================
// A2A Agent Card and Discovery Types
// ============================================================================

/// Supported A2A transport protocols.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransportProtocol {
    /// JSON-RPC 2.0 over HTTP
    #[serde(rename = "JSONRPC")]
    #[default]
    JsonRpc,
    /// gRPC over HTTP/2
    #[serde(rename = "GRPC")]
    Grpc,
    /// REST-style HTTP with JSON
    #[serde(rename = "HTTP+JSON")]
    HttpJson,
}

/// Defines optional capabilities supported by an agent.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AgentCapabilities {
    /// Indicates if the agent supports Server-Sent Events (SSE) for streaming responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,
    /// Indicates if the agent supports sending push notifications for asynchronous task updates.
    #[serde(skip_serializing_if = "Option::is_none", rename = "pushNotifications")]
    pub push_notifications: Option<bool>,
    /// Indicates if the agent provides a history of state transitions for a task.
    #[serde(
        skip_serializing_if = "Option::is_none",
        rename = "stateTransitionHistory"
    )]
    pub state_transition_history: Option<bool>,
}

/// Represents the service provider of an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentProvider {
    pub organization: String,
    pub url: String,
}

/// Represents a distinct capability or function that an agent can perform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSkill {
    /// A unique identifier for the agent's skill.
    pub id: String,
    /// A human-readable name for the skill.
    pub name: String,
    /// A detailed description of the skill.
    #[serde(default)]
    pub description: String,
    /// A set of keywords describing the skill's capabilities.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Example prompts or scenarios that this skill can handle.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,
}

/// The AgentCard is a self-describing manifest for an agent.
///
/// Only the fields a client acts on are modelled; anything else in the
/// published card is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentCard {
    /// A human-readable name for the agent.
    pub name: String,
    /// A human-readable description of the agent.
    #[serde(default)]
    pub description: String,
    /// The agent's own version number.
    pub version: String,
    /// The version of the A2A protocol this agent supports.
    #[serde(rename = "protocolVersion", default = "default_protocol_version")]
    pub protocol_version: String,
    /// The preferred endpoint URL for interacting with the agent.
    pub url: String,
    /// The transport protocol for the preferred endpoint.
    #[serde(rename = "preferredTransport", default)]
    pub preferred_transport: TransportProtocol,
    /// A declaration of optional capabilities supported by the agent.
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    /// Default set of supported input MIME types for all skills.
    #[serde(rename = "defaultInputModes", default)]
    pub default_input_modes: Vec<String>,
    /// Default set of supported output MIME types for all skills.
    #[serde(rename = "defaultOutputModes", default)]
    pub default_output_modes: Vec<String>,
    /// The set of skills that the agent can perform.
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<AgentProvider>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "documentationUrl")]
    pub documentation_url: Option<String>,
}

fn default_protocol_version() -> String {
    crate::PROTOCOL_VERSION.to_string()
}

impl AgentCard {
    /// Create a new AgentCard with minimal required fields
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: version.into(),
            protocol_version: default_protocol_version(),
            url: url.into(),
            preferred_transport: TransportProtocol::default(),
            capabilities: AgentCapabilities::default(),
            default_input_modes: vec!["text".to_string()],
            default_output_modes: vec!["text".to_string()],
            skills: Vec::new(),
            provider: None,
            documentation_url: None,
        }
    }

    /// Enable or disable streaming support
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.capabilities.streaming = Some(enabled);
        self
    }

    /// Add a skill to the card
    pub fn add_skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Whether the agent advertises `message/stream` support.
    ///
    /// An absent flag means no streaming.
    pub fn supports_streaming(&self) -> bool {
        self.capabilities.streaming.unwrap_or(false)
    }
}

impl AgentSkill {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn add_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_card_new() {
        let card = AgentCard::new(
            "Test Agent",
            "A test agent",
            "1.0.0",
            "http://localhost:10000",
        );

        assert_eq!(card.name, "Test Agent");
        assert_eq!(card.url, "http://localhost:10000");
        assert!(!card.supports_streaming());
    }

    #[test]
    fn test_streaming_flag() {
        let card = AgentCard::new("a", "b", "1.0.0", "http://localhost").with_streaming(true);
        assert!(card.supports_streaming());
    }

    #[test]
    fn test_card_parses_published_manifest() {
        let raw = json!({
            "name": "Copilot Agent",
            "description": "Answers questions about shared documents.",
            "url": "http://localhost:10000/",
            "version": "1.0.0",
            "defaultInputModes": ["text", "text/plain"],
            "defaultOutputModes": ["text", "text/plain"],
            "capabilities": {"streaming": true},
            "skills": [{
                "id": "copilot_agent",
                "name": "Copilot Agent Tool",
                "description": "Search documents and answer.",
                "tags": ["Document Q&A"],
                "examples": ["What are the requirements for the expense tracker app?"]
            }],
            "securitySchemes": {"bearer": {"type": "http", "scheme": "bearer"}}
        });

        let card: AgentCard = serde_json::from_value(raw).unwrap();
        assert!(card.supports_streaming());
        assert_eq!(card.protocol_version, crate::PROTOCOL_VERSION);
        assert_eq!(card.skills[0].id, "copilot_agent");
        assert_eq!(card.preferred_transport, TransportProtocol::JsonRpc);
    }
}
