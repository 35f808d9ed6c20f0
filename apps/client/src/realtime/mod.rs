pub mod sse;

pub use sse::{EventKind, EventStream, SseEvent};
