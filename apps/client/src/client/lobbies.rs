//! Lobby operations: creating, joining, seating, and the lobby update stream.

use serde::Serialize;
use tracing::debug;

use crate::client::{ApiClient, CallStatus};
use crate::domain::models::LobbyInfo;
use crate::error::ClientError;
use crate::realtime::EventStream;

#[derive(Debug, Serialize)]
struct SeatSwap {
    i: usize,
    j: usize,
}

impl ApiClient {
    /// POST `/api/games/create`: open a lobby with a server-assigned id,
    /// hosted by the current user. The new lobby replaces the lobby cell.
    pub async fn create_game(&self) -> Result<CallStatus, ClientError> {
        let response = self
            .http()
            .post(self.url("/api/games/create"))
            .send()
            .await?;
        self.adopt_lobby_snapshot(response).await
    }

    /// PUT `/api/lobbies/{id}`: open a lobby under a caller-chosen id.
    pub async fn create_lobby(&self, id: &str) -> Result<CallStatus, ClientError> {
        let response = self
            .http()
            .put(self.url(&format!("/api/lobbies/{id}")))
            .send()
            .await?;
        self.adopt_lobby_snapshot(response).await
    }

    /// GET `/api/lobbies/{id}`. A read probe: the result is returned to the
    /// caller but the lobby cell is left alone.
    pub async fn fetch_lobby(&self, id: &str) -> Result<Option<LobbyInfo>, ClientError> {
        let response = self
            .http()
            .get(self.url(&format!("/api/lobbies/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            debug!(code = response.status().as_u16(), id, "lobby lookup failed");
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    /// POST `/api/lobbies/{id}/join`: take the first vacant seat.
    pub async fn join_lobby(&self, id: &str) -> Result<CallStatus, ClientError> {
        let response = self
            .http()
            .post(self.url(&format!("/api/lobbies/{id}/join")))
            .send()
            .await?;
        self.adopt_lobby_snapshot(response).await
    }

    /// POST `/api/lobbies/{id}/swap`: swap the players in seats `i` and `j`.
    /// Status only; the updated seating arrives over the lobby stream.
    pub async fn swap_players(&self, i: usize, j: usize) -> Result<CallStatus, ClientError> {
        let Some(lobby) = self.context().lobby.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        let response = self
            .http()
            .post(self.url(&format!("/api/lobbies/{}/swap", lobby.id)))
            .json(&SeatSwap { i, j })
            .send()
            .await?;
        Ok(CallStatus::from(response.status()))
    }

    /// POST `/api/lobbies/{id}/leave`. On success there is no lobby to be in
    /// anymore, so the lobby cell is cleared.
    pub async fn leave_lobby(&self) -> Result<CallStatus, ClientError> {
        let Some(lobby) = self.context().lobby.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        let response = self
            .http()
            .post(self.url(&format!("/api/lobbies/{}/leave", lobby.id)))
            .send()
            .await?;
        let status = CallStatus::from(response.status());
        if status.ok {
            self.context().lobby.clear();
        }
        Ok(status)
    }

    /// Open the update stream for the current lobby, or `None` without a
    /// network call when no lobby is active.
    pub async fn subscribe_lobby(&self) -> Result<Option<EventStream>, ClientError> {
        let Some(lobby) = self.context().lobby.get() else {
            return Ok(None);
        };
        self.open_stream(&format!("/api/lobbies/{}/subscribe", lobby.id))
            .await
            .map(Some)
    }

    async fn adopt_lobby_snapshot(
        &self,
        response: reqwest::Response,
    ) -> Result<CallStatus, ClientError> {
        let status = CallStatus::from(response.status());
        if status.ok {
            let lobby: LobbyInfo = response.json().await?;
            self.context().lobby.set(Some(lobby));
        } else {
            debug!(code = status.code, "lobby request rejected");
        }
        Ok(status)
    }
}
