//! Server-push subscription streams.
//!
//! The server publishes state changes as `text/event-stream` frames: an
//! `event:` name line, optional `data:` payload lines, and a blank line
//! terminator. This module turns the raw response body into parsed frames
//! behind an explicit handle whose lifecycle (receive, time out, close) is
//! owned by the caller.

use std::time::Duration;

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::ClientError;

/// Event names the server uses on its update streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Full snapshot of the subscribed entity in the frame's data.
    Update,
    /// The current phase ended and the next one is ready.
    Continue,
    /// The subscribed entity ended normally.
    End,
    /// The subscribed entity was torn down.
    Delete,
    Other,
}

/// One parsed server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

impl SseEvent {
    pub fn kind(&self) -> EventKind {
        match self.event.as_str() {
            "update" => EventKind::Update,
            "continue" => EventKind::Continue,
            "end" => EventKind::End,
            "delete" => EventKind::Delete,
            _ => EventKind::Other,
        }
    }

    /// Deserialize the frame payload, e.g. a snapshot carried by an `update`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.data)
            .map_err(|err| ClientError::stream(format!("invalid event payload: {err}")))
    }
}

/// Incremental parser for the event-stream wire format.
///
/// Fed one line at a time (already stripped of the line terminator); emits a
/// frame when the blank separator line arrives. Comment lines and fields other
/// than `event`/`data` are ignored. Multiple `data` lines join with `\n`.
#[derive(Default)]
pub(crate) struct FrameParser {
    event: Option<String>,
    data: Vec<String>,
}

impl FrameParser {
    pub(crate) fn push_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.flush();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn flush(&mut self) -> Option<SseEvent> {
        if self.event.is_none() && self.data.is_empty() {
            return None;
        }
        let event = self.event.take().unwrap_or_else(|| "message".to_string());
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent { event, data })
    }
}

/// A live subscription to one lobby/bid/game update stream.
///
/// The connection stays open until [`close`](Self::close) is called or the
/// server ends the stream. Dropping the handle without closing leaves the
/// connection open until the server's next write fails, so tearing down
/// explicitly is the caller's responsibility.
pub struct EventStream {
    events: mpsc::UnboundedReceiver<Result<SseEvent, ClientError>>,
    reader: JoinHandle<()>,
}

impl EventStream {
    pub(crate) fn spawn(response: reqwest::Response) -> Self {
        let (sender, events) = mpsc::unbounded_channel();
        let reader = tokio::spawn(read_frames(response, sender));
        Self { events, reader }
    }

    /// Next parsed frame; `None` once the stream has ended or been closed.
    /// A mid-stream transport failure is delivered as the final `Err` item.
    pub async fn recv(&mut self) -> Option<Result<SseEvent, ClientError>> {
        self.events.recv().await
    }

    /// [`recv`](Self::recv) bounded by a timeout, with transport failures
    /// flattened into the error. Timing out is an error, not end-of-stream.
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<SseEvent>, ClientError> {
        match tokio::time::timeout(timeout, self.recv()).await {
            Err(_) => Err(ClientError::stream(format!(
                "no event within {timeout:?}"
            ))),
            Ok(None) => Ok(None),
            Ok(Some(Ok(event))) => Ok(Some(event)),
            Ok(Some(Err(err))) => Err(err),
        }
    }

    /// Tear the subscription down: abort the reader task and drop the
    /// connection.
    pub fn close(self) {
        self.reader.abort();
    }
}

async fn read_frames(
    response: reqwest::Response,
    sender: mpsc::UnboundedSender<Result<SseEvent, ClientError>>,
) {
    let mut body = response.bytes_stream();
    let mut parser = FrameParser::default();
    let mut pending = String::new();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                let _ = sender.send(Err(ClientError::Transport(err)));
                return;
            }
        };
        pending.push_str(&String::from_utf8_lossy(&chunk));
        while let Some(at) = pending.find('\n') {
            let line: String = pending.drain(..=at).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(event) = parser.push_line(line) {
                if sender.send(Ok(event)).is_err() {
                    // Receiver gone; stop reading.
                    return;
                }
            }
        }
    }
}
