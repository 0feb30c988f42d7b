//! The remote agent seam.
//!
//! The turn executor only needs four things from the agent: whether it
//! streams, a request/response send, a streaming send, and task retrieval.
//! [`A2AClient`] provides them over HTTP; tests substitute scripted fakes.

use a2a_client::{A2AClient, A2AResult, EventStream};
use a2a_types::{MessageSendParams, SendMessageResult, Task, TaskQueryParams};
use async_trait::async_trait;

#[async_trait]
pub trait RemoteAgent: Send + Sync {
    /// The `capabilities.streaming` flag of the agent card.
    fn supports_streaming(&self) -> bool;

    async fn send_message(&self, params: MessageSendParams) -> A2AResult<SendMessageResult>;

    async fn send_streaming_message(&self, params: MessageSendParams) -> A2AResult<EventStream>;

    async fn get_task(&self, params: TaskQueryParams) -> A2AResult<Task>;
}

#[async_trait]
impl RemoteAgent for A2AClient {
    fn supports_streaming(&self) -> bool {
        self.agent_card().supports_streaming()
    }

    async fn send_message(&self, params: MessageSendParams) -> A2AResult<SendMessageResult> {
        A2AClient::send_message(self, params).await
    }

    async fn send_streaming_message(&self, params: MessageSendParams) -> A2AResult<EventStream> {
        A2AClient::send_streaming_message(self, params).await
    }

    async fn get_task(&self, params: TaskQueryParams) -> A2AResult<Task> {
        A2AClient::get_task(self, params).await
    }
}
