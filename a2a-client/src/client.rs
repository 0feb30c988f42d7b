//! A2A Client for calling remote A2A agents
//!
//! This module provides a client for making A2A protocol calls to remote agents.
//! It supports both streaming and non-streaming interactions.

use crate::constants::{
    AGENT_CARD_PATH, EVENT_STREAM_CONTENT_TYPE, LEGACY_AGENT_CARD_PATH, METHOD_MESSAGE_SEND,
    METHOD_MESSAGE_STREAM, METHOD_TASKS_GET,
};
use crate::error::{A2AError, A2AResult};
use crate::sse::SseDecoder;
use a2a_types::{
    AgentCard, JSONRPCErrorResponse, JSONRPCId, MessageSendParams, SendMessageResult,
    SendStreamingMessageResponse, Task, TaskQueryParams, JSONRPC_VERSION,
};
use futures_core::Stream;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stream of JSON-RPC responses delivered over a `message/stream` connection.
pub type EventStream =
    Pin<Box<dyn Stream<Item = A2AResult<SendStreamingMessageResponse>> + Send>>;

/// A2A client for communicating with remote agents
#[derive(Clone)]
pub struct A2AClient {
    /// HTTP client for making requests
    client: Client,
    /// Service endpoint URL from agent card
    service_endpoint_url: String,
    /// Request ID counter for JSON-RPC requests
    request_id_counter: Arc<AtomicU64>,
    /// Cached agent card
    agent_card: Arc<AgentCard>,
}

/// JSON-RPC 2.0 request structure
#[derive(Debug, Serialize)]
struct JsonRpcRequest<T> {
    jsonrpc: &'static str,
    id: JSONRPCId,
    method: &'static str,
    params: T,
}

/// JSON-RPC 2.0 response structure
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonRpcResponse<T> {
    Success {
        id: Option<JSONRPCId>,
        result: T,
    },
    Error(JSONRPCErrorResponse),
}

impl<T> JsonRpcResponse<T> {
    fn into_result(self) -> A2AResult<T> {
        match self {
            JsonRpcResponse::Success { result, .. } => Ok(result),
            JsonRpcResponse::Error(err) => Err(A2AError::RemoteAgentError {
                message: err.error.message,
                code: Some(err.error.code),
            }),
        }
    }
}

impl A2AClient {
    /// Create a new A2A client from an agent's base URL
    ///
    /// Fetches the agent card from the well-known path and uses the service
    /// endpoint URL from the card for all subsequent requests.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use a2a_client::A2AClient;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = A2AClient::from_card_url("http://localhost:10000").await?;
    /// println!("{}", client.agent_card().name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_card_url(base_url: impl AsRef<str>) -> A2AResult<Self> {
        Self::from_card_url_with_client(base_url, Client::new()).await
    }

    /// Create a new A2A client from an agent's base URL with a custom HTTP client
    ///
    /// This allows you to provide a pre-configured `reqwest::Client` with
    /// custom settings like timeouts, proxies or default headers.
    pub async fn from_card_url_with_client(
        base_url: impl AsRef<str>,
        http_client: Client,
    ) -> A2AResult<Self> {
        let agent_card = fetch_agent_card(&http_client, base_url.as_ref()).await?;
        Self::from_card_with_client(agent_card, http_client)
    }

    /// Create a new A2A client directly from an agent card
    pub fn from_card(agent_card: AgentCard) -> A2AResult<Self> {
        Self::from_card_with_client(agent_card, Client::new())
    }

    /// Create a new A2A client from an agent card with a custom HTTP client
    pub fn from_card_with_client(agent_card: AgentCard, http_client: Client) -> A2AResult<Self> {
        if agent_card.url.is_empty() {
            return Err(A2AError::InvalidParameter {
                message: "Agent card does not contain a valid 'url' for the service endpoint"
                    .to_string(),
            });
        }

        Ok(Self {
            client: http_client,
            service_endpoint_url: agent_card.url.clone(),
            request_id_counter: Arc::new(AtomicU64::new(1)),
            agent_card: Arc::new(agent_card),
        })
    }

    /// Get the cached agent card
    pub fn agent_card(&self) -> &AgentCard {
        &self.agent_card
    }

    /// Get the next request ID
    fn next_request_id(&self) -> JSONRPCId {
        let id = self.request_id_counter.fetch_add(1, Ordering::SeqCst);
        JSONRPCId::Integer(id as i64)
    }

    /// Inject W3C Trace Context into HTTP headers for distributed tracing
    ///
    /// Extracts the OpenTelemetry context from the current tracing span so the
    /// remote agent can attach its spans to the caller's trace.
    fn inject_trace_context() -> HashMap<String, String> {
        use opentelemetry::global;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let mut carrier = HashMap::new();
        let context = tracing::Span::current().context();
        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(&context, &mut carrier);
        });
        carrier
    }

    fn rpc_request<T: Serialize>(
        &self,
        method: &'static str,
        params: T,
        accept: &str,
    ) -> (JSONRPCId, reqwest::RequestBuilder) {
        let request_id = self.next_request_id();
        let rpc_request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: request_id.clone(),
            method,
            params,
        };

        let mut req = self
            .client
            .post(&self.service_endpoint_url)
            .header("Content-Type", "application/json")
            .header("Accept", accept)
            .json(&rpc_request);

        for (key, value) in Self::inject_trace_context() {
            req = req.header(key, value);
        }

        (request_id, req)
    }

    /// Helper method to make a generic JSON-RPC POST request
    async fn post_rpc_request<TParams, TResponse>(
        &self,
        method: &'static str,
        params: TParams,
    ) -> A2AResult<JsonRpcResponse<TResponse>>
    where
        TParams: Serialize,
        TResponse: for<'de> Deserialize<'de>,
    {
        let (request_id, req) = self.rpc_request(method, params, "application/json");
        tracing::debug!(method, id = ?request_id, "sending JSON-RPC request");

        let response = req.send().await.map_err(|e| A2AError::NetworkError {
            message: format!("Failed to send {} request: {}", method, e),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(error_json) = serde_json::from_str::<JSONRPCErrorResponse>(&error_text) {
                return Ok(JsonRpcResponse::Error(error_json));
            }
            return Err(A2AError::NetworkError {
                message: format!("HTTP error {}: {}", status, error_text),
            });
        }

        let json_response: JsonRpcResponse<TResponse> =
            response
                .json()
                .await
                .map_err(|e| A2AError::SerializationError {
                    message: format!("Failed to parse {} response: {}", method, e),
                })?;

        if let JsonRpcResponse::Success {
            id: Some(resp_id), ..
        } = &json_response
        {
            if resp_id != &request_id {
                tracing::warn!(
                    method,
                    expected = ?request_id,
                    received = ?resp_id,
                    "JSON-RPC response id mismatch"
                );
            }
        }

        Ok(json_response)
    }

    /// Send a message to the remote agent (non-streaming)
    ///
    /// The agent answers with either a task or a standalone message.
    pub async fn send_message(&self, params: MessageSendParams) -> A2AResult<SendMessageResult> {
        self.post_rpc_request(METHOD_MESSAGE_SEND, params)
            .await?
            .into_result()
    }

    /// Send a streaming message to the remote agent
    ///
    /// Returns the stream of JSON-RPC responses the agent emits for this
    /// message. Error envelopes are yielded as items rather than terminating
    /// the stream.
    pub async fn send_streaming_message(&self, params: MessageSendParams) -> A2AResult<EventStream> {
        if !self.agent_card.supports_streaming() {
            return Err(A2AError::InvalidParameter {
                message: "Agent does not support streaming (capabilities.streaming is not true)"
                    .to_string(),
            });
        }

        let (request_id, req) =
            self.rpc_request(METHOD_MESSAGE_STREAM, params, EVENT_STREAM_CONTENT_TYPE);
        tracing::debug!(id = ?request_id, "opening message stream");

        let response = req.send().await.map_err(|e| A2AError::NetworkError {
            message: format!("Failed to send streaming message request: {}", e),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(A2AError::NetworkError {
                message: format!("HTTP error {}: {}", status, error_text),
            });
        }

        let content_type = response
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with(EVENT_STREAM_CONTENT_TYPE) {
            return Err(A2AError::NetworkError {
                message: format!(
                    "Invalid response Content-Type for SSE stream. Expected '{}', got '{}'",
                    EVENT_STREAM_CONTENT_TYPE, content_type
                ),
            });
        }

        Ok(Box::pin(SseDecoder::new(response.bytes_stream())))
    }

    /// Get a specific task from the remote agent
    pub async fn get_task(&self, params: TaskQueryParams) -> A2AResult<Task> {
        self.post_rpc_request(METHOD_TASKS_GET, params)
            .await?
            .into_result()
    }
}

/// Fetch an agent card, trying the current well-known path first and the
/// pre-0.3 path when the agent does not serve the current one.
async fn fetch_agent_card(http_client: &Client, base_url: &str) -> A2AResult<AgentCard> {
    let base_url = base_url.trim_end_matches('/');

    match fetch_card_at(http_client, &format!("{}/{}", base_url, AGENT_CARD_PATH)).await? {
        Some(card) => Ok(card),
        None => {
            tracing::debug!(base_url, "agent card not found, trying legacy path");
            let legacy_url = format!("{}/{}", base_url, LEGACY_AGENT_CARD_PATH);
            fetch_card_at(http_client, &legacy_url)
                .await?
                .ok_or_else(|| A2AError::NetworkError {
                    message: format!("No agent card published at {}", base_url),
                })
        }
    }
}

async fn fetch_card_at(http_client: &Client, card_url: &str) -> A2AResult<Option<AgentCard>> {
    let response = http_client
        .get(card_url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| A2AError::NetworkError {
            message: format!("Failed to fetch agent card from {}: {}", card_url, e),
        })?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if !response.status().is_success() {
        return Err(A2AError::NetworkError {
            message: format!("Failed to fetch agent card: HTTP {}", response.status()),
        });
    }

    response
        .json()
        .await
        .map(Some)
        .map_err(|e| A2AError::SerializationError {
            message: format!("Failed to parse agent card: {}", e),
        })
}
