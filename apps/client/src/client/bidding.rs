//! Bidding-phase operations.
//!
//! The bid state is keyed by the lobby/game id. Starting the phase and the
//! first snapshot fetch run off the lobby cell (the lobby hands over to
//! bidding); submitting bids and the bid stream run off the bid cell itself.

use serde::Serialize;
use tracing::debug;

use crate::client::{ApiClient, CallStatus};
use crate::domain::models::BidInfo;
use crate::error::ClientError;
use crate::realtime::EventStream;

#[derive(Debug, Serialize)]
struct BidSubmission {
    amount: i32,
}

impl ApiClient {
    /// PUT `/api/bidding/{id}`: ask the server to deal and open bidding for
    /// the current lobby. Status only; players then fetch the bid snapshot.
    pub async fn start_bidding(&self) -> Result<CallStatus, ClientError> {
        let Some(lobby) = self.context().lobby.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        let response = self
            .http()
            .put(self.url(&format!("/api/bidding/{}", lobby.id)))
            .send()
            .await?;
        Ok(CallStatus::from(response.status()))
    }

    /// GET `/api/bidding/{id}` for the current lobby. On success the
    /// snapshot replaces the bid cell.
    pub async fn fetch_bid_state(&self) -> Result<CallStatus, ClientError> {
        let Some(lobby) = self.context().lobby.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        let response = self
            .http()
            .get(self.url(&format!("/api/bidding/{}", lobby.id)))
            .send()
            .await?;
        let status = CallStatus::from(response.status());
        if status.ok {
            let bid: BidInfo = response.json().await?;
            self.context().bid.set(Some(bid));
        } else {
            debug!(code = status.code, "bid state fetch rejected");
        }
        Ok(status)
    }

    /// POST `/api/bidding/{id}` with the bid amount. A bid at or below the
    /// standing one counts as a pass; the server decides. Status only.
    pub async fn submit_bid(&self, amount: i32) -> Result<CallStatus, ClientError> {
        let Some(bid) = self.context().bid.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        let response = self
            .http()
            .post(self.url(&format!("/api/bidding/{}", bid.id)))
            .json(&BidSubmission { amount })
            .send()
            .await?;
        Ok(CallStatus::from(response.status()))
    }

    /// Open the update stream for the current bidding phase, or `None`
    /// without a network call when no bid state is held.
    pub async fn subscribe_bidding(&self) -> Result<Option<EventStream>, ClientError> {
        let Some(bid) = self.context().bid.get() else {
            return Ok(None);
        };
        self.open_stream(&format!("/api/bidding/{}/subscribe", bid.id))
            .await
            .map(Some)
    }
}
