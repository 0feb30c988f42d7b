//! Scripted fakes for driving turns and sessions in tests.
//!
//! [`ScriptedAgent`] answers from queues seeded up front and records every
//! call it receives. When a queue runs dry it returns an error so a missing
//! expectation shows up as a failed turn.

use crate::agent::RemoteAgent;
use crate::console::Console;
use a2a_client::{A2AError, A2AResult, EventStream};
use a2a_types::{
    Artifact, Message, MessageSendParams, Part, SendMessageResult, SendStreamingMessageResponse,
    SendStreamingMessageResult, Task, TaskArtifactUpdateEvent, TaskQueryParams, TaskState,
    TaskStatus, TaskStatusUpdateEvent, ARTIFACT_UPDATE_KIND, STATUS_UPDATE_KIND,
};
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type ScriptedStream = A2AResult<Vec<A2AResult<SendStreamingMessageResponse>>>;

/// A call the agent received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentCall {
    Send(MessageSendParams),
    Stream(MessageSendParams),
    GetTask(TaskQueryParams),
}

#[derive(Clone, Default)]
pub struct ScriptedAgent {
    streaming: bool,
    sends: Arc<Mutex<VecDeque<A2AResult<SendMessageResult>>>>,
    streams: Arc<Mutex<VecDeque<ScriptedStream>>>,
    tasks: Arc<Mutex<VecDeque<A2AResult<Task>>>>,
    calls: Arc<Mutex<Vec<AgentCall>>>,
    polled: Arc<AtomicUsize>,
}

impl ScriptedAgent {
    /// An agent that advertises streaming.
    pub fn streaming() -> Self {
        Self {
            streaming: true,
            ..Self::default()
        }
    }

    /// An agent that only answers `message/send`.
    pub fn blocking() -> Self {
        Self::default()
    }

    pub fn push_send(&self, result: A2AResult<SendMessageResult>) -> &Self {
        self.sends
            .lock()
            .expect("scripted sends mutex poisoned")
            .push_back(result);
        self
    }

    /// Queues the events of one `message/stream` call.
    pub fn push_stream<I>(&self, events: I) -> &Self
    where
        I: IntoIterator<Item = SendStreamingMessageResponse>,
    {
        let events = events.into_iter().map(Ok).collect();
        self.push_stream_result(Ok(events))
    }

    pub fn push_stream_result(&self, result: ScriptedStream) -> &Self {
        self.streams
            .lock()
            .expect("scripted streams mutex poisoned")
            .push_back(result);
        self
    }

    pub fn push_task(&self, result: A2AResult<Task>) -> &Self {
        self.tasks
            .lock()
            .expect("scripted tasks mutex poisoned")
            .push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<AgentCall> {
        self.calls
            .lock()
            .expect("scripted calls mutex poisoned")
            .clone()
    }

    /// Messages sent through either send method, in order.
    pub fn sent_messages(&self) -> Vec<Message> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AgentCall::Send(params) | AgentCall::Stream(params) => Some(params.message),
                AgentCall::GetTask(_) => None,
            })
            .collect()
    }

    /// Number of stream items handed to a consumer so far.
    pub fn events_polled(&self) -> usize {
        self.polled.load(Ordering::SeqCst)
    }

    fn record(&self, call: AgentCall) {
        self.calls
            .lock()
            .expect("scripted calls mutex poisoned")
            .push(call);
    }
}

fn exhausted(what: &str) -> A2AError {
    A2AError::InvalidParameter {
        message: format!("no scripted {} left", what),
    }
}

#[async_trait]
impl RemoteAgent for ScriptedAgent {
    fn supports_streaming(&self) -> bool {
        self.streaming
    }

    async fn send_message(&self, params: MessageSendParams) -> A2AResult<SendMessageResult> {
        self.record(AgentCall::Send(params));
        self.sends
            .lock()
            .expect("scripted sends mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("send result")))
    }

    async fn send_streaming_message(&self, params: MessageSendParams) -> A2AResult<EventStream> {
        self.record(AgentCall::Stream(params));
        let events = self
            .streams
            .lock()
            .expect("scripted streams mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("stream")))?;

        let polled = Arc::clone(&self.polled);
        let stream: EventStream = Box::pin(futures::stream::iter(events).inspect(move |_| {
            polled.fetch_add(1, Ordering::SeqCst);
        }));
        Ok(stream)
    }

    async fn get_task(&self, params: TaskQueryParams) -> A2AResult<Task> {
        self.record(AgentCall::GetTask(params));
        self.tasks
            .lock()
            .expect("scripted tasks mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("task")))
    }
}

/// Console fed from a list of inputs that records everything printed.
///
/// Once the inputs run out, `prompt` reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub output: Vec<String>,
    pub prompts: usize,
}

impl ScriptedConsole {
    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn prompt(&mut self, _question: &str) -> io::Result<Option<String>> {
        self.prompts += 1;
        Ok(self.inputs.pop_front())
    }

    fn print(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

fn status(state: TaskState, text: Option<&str>) -> TaskStatus {
    TaskStatus {
        state,
        timestamp: None,
        message: text.map(Message::agent_text),
    }
}

pub fn status_update(
    task_id: &str,
    context_id: &str,
    state: TaskState,
    text: Option<&str>,
) -> SendStreamingMessageResponse {
    SendStreamingMessageResponse::event(SendStreamingMessageResult::TaskStatusUpdate(
        TaskStatusUpdateEvent {
            kind: STATUS_UPDATE_KIND.to_string(),
            task_id: task_id.to_string(),
            context_id: context_id.to_string(),
            status: status(state, text),
            is_final: false,
            metadata: None,
        },
    ))
}

pub fn artifact_update(
    task_id: &str,
    context_id: &str,
    parts: Vec<Part>,
) -> SendStreamingMessageResponse {
    SendStreamingMessageResponse::event(SendStreamingMessageResult::TaskArtifactUpdate(
        TaskArtifactUpdateEvent {
            kind: ARTIFACT_UPDATE_KIND.to_string(),
            task_id: task_id.to_string(),
            context_id: context_id.to_string(),
            artifact: Artifact {
                artifact_id: format!("{}-artifact", task_id),
                parts,
                name: None,
                description: None,
                metadata: None,
            },
            append: None,
            last_chunk: None,
            metadata: None,
        },
    ))
}

pub fn task_snapshot(
    task_id: &str,
    context_id: &str,
    state: TaskState,
) -> SendStreamingMessageResponse {
    SendStreamingMessageResponse::event(SendStreamingMessageResult::Task(Task::new(
        task_id, context_id, state,
    )))
}

pub fn message_event(message: Message) -> SendStreamingMessageResponse {
    SendStreamingMessageResponse::event(SendStreamingMessageResult::Message(message))
}

/// A task in `state` whose status message is `text`.
pub fn task_with_status(task_id: &str, context_id: &str, state: TaskState, text: &str) -> Task {
    Task::new(task_id, context_id, state).with_status_message(Message::agent_text(text))
}
