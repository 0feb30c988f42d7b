//! Server-Sent Events decoding for `message/stream` responses
//!
//! Each SSE event carries one JSON-RPC response in its `data:` field. The
//! decoder yields those responses in arrival order, including JSON-RPC error
//! envelopes, so callers can decide how to react to an in-stream failure.

use crate::error::{A2AError, A2AResult};
use a2a_types::SendStreamingMessageResponse;
use bytes::Bytes;
use futures_core::Stream;
use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Incremental SSE decoder over a byte stream.
pub(crate) struct SseDecoder<S> {
    inner: Pin<Box<S>>,
    line_buffer: Vec<u8>,
    event_data: String,
    has_data: bool,
    ready: VecDeque<A2AResult<SendStreamingMessageResponse>>,
    finished: bool,
}

impl<S> SseDecoder<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self {
            inner: Box::pin(inner),
            line_buffer: Vec::new(),
            event_data: String::new(),
            has_data: false,
            ready: VecDeque::new(),
            finished: false,
        }
    }

    fn feed(&mut self, chunk: &[u8]) {
        self.line_buffer.extend_from_slice(chunk);

        while let Some(newline) = self.line_buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.line_buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&raw[..raw.len() - 1]);
            let line = line.trim_end_matches('\r').to_string();
            self.process_line(&line);
        }
    }

    fn process_line(&mut self, line: &str) {
        if line.is_empty() {
            self.dispatch();
        } else if let Some(data) = line.strip_prefix("data:") {
            let data = data.strip_prefix(' ').unwrap_or(data);
            if self.has_data {
                self.event_data.push('\n');
            }
            self.event_data.push_str(data);
            self.has_data = true;
        }
        // Comment lines (":") and the event/id/retry fields carry nothing we use.
    }

    fn dispatch(&mut self) {
        if !self.has_data {
            return;
        }
        let data = std::mem::take(&mut self.event_data);
        self.has_data = false;
        if data.trim().is_empty() {
            tracing::debug!("skipping SSE event with empty data");
            return;
        }
        self.ready.push_back(parse_event(&data));
    }

    /// Flushes a trailing line and event that were not terminated before EOF.
    fn finish(&mut self) {
        if !self.line_buffer.is_empty() {
            let rest = std::mem::take(&mut self.line_buffer);
            let line = String::from_utf8_lossy(&rest).trim_end_matches('\r').to_string();
            self.process_line(&line);
        }
        self.dispatch();
    }
}

fn parse_event(data: &str) -> A2AResult<SendStreamingMessageResponse> {
    tracing::trace!(data, "received SSE event");
    serde_json::from_str(data).map_err(|e| A2AError::SerializationError {
        message: format!("Failed to parse SSE event data: {}", e),
    })
}

impl<S, E> Stream for SseDecoder<S>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    type Item = A2AResult<SendStreamingMessageResponse>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Poll::Ready(Some(item));
            }
            if self.finished {
                return Poll::Ready(None);
            }

            match self.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => self.feed(&chunk),
                Poll::Ready(Some(Err(e))) => {
                    self.finished = true;
                    return Poll::Ready(Some(Err(A2AError::NetworkError {
                        message: format!("Stream error: {}", e),
                    })));
                }
                Poll::Ready(None) => {
                    self.finished = true;
                    self.finish();
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2a_types::{SendStreamingMessageResult, TaskState};
    use futures_util::{stream, StreamExt};

    fn chunks(parts: &[&str]) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
        let owned: Vec<Result<Bytes, std::io::Error>> = parts
            .iter()
            .map(|p| Ok(Bytes::from(p.to_string())))
            .collect();
        stream::iter(owned)
    }

    async fn collect(parts: &[&str]) -> Vec<A2AResult<SendStreamingMessageResponse>> {
        SseDecoder::new(chunks(parts)).collect().await
    }

    const STATUS_EVENT: &str = r#"{"jsonrpc":"2.0","id":1,"result":{"kind":"status-update","taskId":"t1","contextId":"c1","status":{"state":"working"},"final":false}}"#;

    #[tokio::test]
    async fn decodes_events_split_across_chunks() {
        let first = format!("data: {}", &STATUS_EVENT[..20]);
        let second = format!("{}\n\n", &STATUS_EVENT[20..]);
        let events = collect(&[&first, &second]).await;

        assert_eq!(events.len(), 1);
        let Ok(SendStreamingMessageResponse::Success(success)) = &events[0] else {
            panic!("expected success, got {:?}", events[0]);
        };
        let SendStreamingMessageResult::TaskStatusUpdate(update) = &success.result else {
            panic!("expected status update");
        };
        assert_eq!(update.status.state, TaskState::Working);
    }

    #[tokio::test]
    async fn preserves_arrival_order_and_skips_comments() {
        let body = format!(
            ": keep-alive\n\ndata: {}\n\nevent: message\ndata: {}\r\n\r\n",
            STATUS_EVENT,
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32603,"message":"boom"}}"#
        );
        let events = collect(&[&body]).await;

        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            Ok(SendStreamingMessageResponse::Success(_))
        ));
        assert!(matches!(
            &events[1],
            Ok(SendStreamingMessageResponse::Error(e)) if e.error.message == "boom"
        ));
    }

    #[tokio::test]
    async fn flushes_unterminated_final_event() {
        let body = format!("data: {}", STATUS_EVENT);
        let events = collect(&[&body]).await;
        assert_eq!(events.len(), 1);
        assert!(events[0].is_ok());
    }

    #[tokio::test]
    async fn joins_multiline_data_fields() {
        let body = "data: {\"jsonrpc\":\"2.0\",\ndata: \"id\":1,\"error\":{\"code\":1,\"message\":\"x\"}}\n\n";
        let events = collect(&[body]).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Ok(SendStreamingMessageResponse::Error(_))
        ));
    }

    #[tokio::test]
    async fn malformed_json_surfaces_serialization_error() {
        let events = collect(&["data: {not json}\n\n"]).await;
        assert!(matches!(
            events[0],
            Err(A2AError::SerializationError { .. })
        ));
    }

    #[tokio::test]
    async fn transport_error_ends_the_stream() {
        let items: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from(format!("data: {}\n\n", STATUS_EVENT))),
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reset")),
            Ok(Bytes::from(format!("data: {}\n\n", STATUS_EVENT))),
        ];
        let events: Vec<_> = SseDecoder::new(stream::iter(items)).collect().await;

        assert_eq!(events.len(), 2);
        assert!(events[0].is_ok());
        assert!(matches!(events[1], Err(A2AError::NetworkError { .. })));
    }
}
