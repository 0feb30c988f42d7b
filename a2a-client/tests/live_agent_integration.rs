//! Integration tests for A2AClient against a running A2A agent
//!
//! These tests talk to a real agent, so they are ignored by default.
//!
//! ## Running Tests
//! ```bash
//! A2A_TEST_AGENT_URL=http://localhost:10000 \
//!     cargo test --package a2a-client --test live_agent_integration -- --ignored --show-output
//! ```

use a2a_client::A2AClient;
use a2a_types::{
    Message, MessageSendConfiguration, MessageSendParams, SendMessageResult,
    SendStreamingMessageResponse, SendStreamingMessageResult, TaskQueryParams,
};
use futures_util::StreamExt;
use std::time::Duration;

const DEFAULT_AGENT_URL: &str = "http://localhost:10000";
const TEST_TIMEOUT_SECS: u64 = 60;

fn agent_url() -> String {
    std::env::var("A2A_TEST_AGENT_URL").unwrap_or_else(|_| DEFAULT_AGENT_URL.to_string())
}

async fn connect() -> Result<A2AClient, Box<dyn std::error::Error>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(TEST_TIMEOUT_SECS))
        .build()?;
    Ok(A2AClient::from_card_url_with_client(agent_url(), http_client).await?)
}

fn text_params(text: &str, task_id: Option<String>, context_id: Option<String>) -> MessageSendParams {
    MessageSendParams {
        message: Message::user_text(text, task_id, context_id),
        configuration: Some(MessageSendConfiguration {
            accepted_output_modes: vec!["text".to_string()],
            ..Default::default()
        }),
        metadata: None,
    }
}

#[tokio::test]
#[ignore] // Requires a running A2A agent
async fn test_fetch_agent_card() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;
    let card = client.agent_card();

    println!("Agent Name: {}", card.name);
    println!("Service URL: {}", card.url);
    println!("Streaming: {:?}", card.capabilities.streaming);

    assert!(!card.name.is_empty());
    assert!(!card.url.is_empty());
    Ok(())
}

#[tokio::test]
#[ignore] // Requires a running A2A agent
async fn test_send_message_returns_task_or_message() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;

    match client.send_message(text_params("Hello", None, None)).await? {
        SendMessageResult::Task(task) => {
            println!("  Task ID: {}", task.id);
            println!("  Context ID: {}", task.context_id);
            println!("  Status: {}", task.status.state);
            assert!(!task.id.is_empty());
            assert!(!task.context_id.is_empty());
        }
        SendMessageResult::Message(message) => {
            println!("  Message ID: {}", message.message_id);
            assert!(!message.parts.is_empty());
        }
    }
    Ok(())
}

#[tokio::test]
#[ignore] // Requires a running A2A agent with streaming enabled
async fn test_streaming_then_fetch_task() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;
    if !client.agent_card().supports_streaming() {
        println!("agent does not stream, skipping");
        return Ok(());
    }

    let mut stream = client
        .send_streaming_message(text_params("Hello", None, None))
        .await?;

    let mut task_id = None;
    let mut event_count = 0;
    while let Some(item) = stream.next().await {
        event_count += 1;
        match item? {
            SendStreamingMessageResponse::Error(err) => panic!("stream error: {:?}", err.error),
            SendStreamingMessageResponse::Success(success) => match success.result {
                SendStreamingMessageResult::Task(task) => task_id = Some(task.id),
                SendStreamingMessageResult::TaskStatusUpdate(update) => {
                    println!("  status: {}", update.status.state);
                    task_id = Some(update.task_id);
                }
                SendStreamingMessageResult::TaskArtifactUpdate(update) => {
                    task_id = Some(update.task_id)
                }
                SendStreamingMessageResult::Message(_)
                | SendStreamingMessageResult::Unrecognized(_) => {}
            },
        }
    }

    assert!(event_count > 0, "stream should yield at least one event");

    if let Some(id) = task_id {
        let task = client.get_task(TaskQueryParams::new(id.clone())).await?;
        assert_eq!(task.id, id);
        println!("  final state: {}", task.status.state);
    }
    Ok(())
}
