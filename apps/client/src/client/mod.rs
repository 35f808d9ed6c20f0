//! Resource clients: one async operation per server action.
//!
//! Operations share a single contract. The identifier for the current
//! lobby/bid/game is read from the relevant [`AppContext`] cell; when that
//! cell is unset the operation returns [`CallStatus::NO_CONTEXT`] (or an
//! empty read sentinel) without touching the network. Otherwise exactly one
//! HTTP request is issued, with no retry and no timeout beyond the
//! transport's own. A 2xx response carrying a snapshot replaces the relevant
//! cell wholesale; a non-2xx response leaves the cell alone and surfaces only
//! its status code. Transport failures propagate as [`ClientError`].

pub mod auth;
pub mod bidding;
pub mod games;
pub mod lobbies;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::realtime::EventStream;
use crate::state::AppContext;

/// Outcome of a single server call: whether the response was 2xx and the raw
/// status code. `code` 0 means the call was never made for lack of context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallStatus {
    pub ok: bool,
    pub code: u16,
}

impl CallStatus {
    /// The operation's required state cell was unset; no request was issued.
    pub const NO_CONTEXT: CallStatus = CallStatus { ok: false, code: 0 };
}

impl From<reqwest::StatusCode> for CallStatus {
    fn from(status: reqwest::StatusCode) -> Self {
        Self {
            ok: status.is_success(),
            code: status.as_u16(),
        }
    }
}

/// Client for the game server's HTTP and event-stream surface.
///
/// One instance per session; holds the shared connection pool and the
/// session's [`AppContext`].
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    ctx: Arc<AppContext>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_context(config, AppContext::new())
    }

    /// Attach the client to an existing context, e.g. one shared with
    /// presentation code that subscribes to the cells.
    pub fn with_context(config: ClientConfig, ctx: Arc<AppContext>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            ctx,
        }
    }

    pub fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Open a server-push stream on `path`. Refusal to subscribe is a stream
    /// error: unlike the request/response operations there is no status to
    /// hand back, only a connection that never existed.
    pub(crate) async fn open_stream(&self, path: &str) -> Result<EventStream, ClientError> {
        let response = self.http.get(self.url(path)).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::stream(format!(
                "subscribe to {path} refused with status {}",
                response.status().as_u16()
            )));
        }
        Ok(EventStream::spawn(response))
    }
}
