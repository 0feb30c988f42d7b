//! # A2A Protocol Client
//!
//! This crate provides a client for calling remote A2A (Agent-to-Agent) protocol compliant agents.
//! It supports both streaming and non-streaming interactions over HTTP/HTTPS.
//!
//! ## Features
//!
//! - Agent discovery via agent cards (current and legacy well-known paths)
//! - `message/send` request/response calls
//! - `message/stream` over Server-Sent Events, with in-stream JSON-RPC errors surfaced as items
//! - Task retrieval with `tasks/get`
//! - W3C trace-context propagation from the current `tracing` span
//!
//! ## Example
//!
//! ```rust,no_run
//! use a2a_client::A2AClient;
//! use a2a_types::{Message, MessageSendParams, SendMessageResult};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = A2AClient::from_card_url("http://localhost:10000").await?;
//!
//! let params = MessageSendParams {
//!     message: Message::user_text("Hello!", None, None),
//!     configuration: None,
//!     metadata: None,
//! };
//!
//! match client.send_message(params).await? {
//!     SendMessageResult::Task(task) => println!("task {} is {}", task.id, task.status.state),
//!     SendMessageResult::Message(message) => println!("{:?}", message.parts),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod constants;
pub mod error;
mod sse;

pub use client::{A2AClient, EventStream};
pub use error::{A2AError, A2AResult};
