//! Session operations: login, logout, registration, and cookie-session sync.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::client::{ApiClient, CallStatus};
use crate::domain::models::UserInfo;
use crate::error::ClientError;

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    name: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// POST `/api/auth/login`. On success the server's session info replaces
    /// the user cell.
    pub async fn login(&self, name: &str, password: &str) -> Result<CallStatus, ClientError> {
        let response = self
            .http()
            .post(self.url("/api/auth/login"))
            .json(&Credentials { name, password })
            .send()
            .await?;
        let status = CallStatus::from(response.status());
        if status.ok {
            let info: UserInfo = response.json().await?;
            self.context().user.set(Some(info));
        } else {
            debug!(code = status.code, "login rejected");
        }
        Ok(status)
    }

    /// POST `/api/auth/logout`. Clears the user cell once the server has
    /// dropped the session.
    pub async fn logout(&self) -> Result<CallStatus, ClientError> {
        if !self.context().user.is_set() {
            return Ok(CallStatus::NO_CONTEXT);
        }
        let response = self
            .http()
            .post(self.url("/api/auth/logout"))
            .send()
            .await?;
        let status = CallStatus::from(response.status());
        if status.ok {
            self.context().user.clear();
        }
        Ok(status)
    }

    /// GET `/api/auth/status`: pick up an existing server-side session, e.g.
    /// after a restart. An expired or missing session leaves the user cell
    /// unset and returns `None`.
    pub async fn sync_status(&self) -> Result<Option<UserInfo>, ClientError> {
        let response = self.http().get(self.url("/api/auth/status")).send().await?;
        if !response.status().is_success() {
            warn!(
                code = response.status().as_u16(),
                "could not fetch session status"
            );
            return Ok(None);
        }
        let info: UserInfo = response.json().await?;
        if info.is_expired(OffsetDateTime::now_utc().unix_timestamp()) {
            debug!(name = %info.name, "ignoring expired session");
            return Ok(None);
        }
        self.context().user.set(Some(info.clone()));
        Ok(Some(info))
    }

    /// POST `/api/auth/register`. Status only; registering does not log in.
    pub async fn register(&self, name: &str, password: &str) -> Result<CallStatus, ClientError> {
        let response = self
            .http()
            .post(self.url("/api/auth/register"))
            .json(&Credentials { name, password })
            .send()
            .await?;
        Ok(CallStatus::from(response.status()))
    }
}
