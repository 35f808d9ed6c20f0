//! Play-phase operations: widow exchange, playing cards, tricks, and score.

use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{ApiClient, CallStatus};
use crate::domain::cards::{Card, Color};
use crate::domain::models::{GameInfo, GameScore};
use crate::error::ClientError;
use crate::realtime::EventStream;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundSetup<'a> {
    trump: Color,
    to_widow: &'a [Card],
    from_widow: &'a [Card],
}

impl ApiClient {
    /// GET `/api/games/{id}` by explicit id: adopt a game the bidding phase
    /// handed over to (the bid id doubles as the game id). On success the
    /// snapshot replaces the game cell.
    pub async fn fetch_game(&self, id: &str) -> Result<CallStatus, ClientError> {
        let response = self
            .http()
            .get(self.url(&format!("/api/games/{id}")))
            .send()
            .await?;
        let status = CallStatus::from(response.status());
        if status.ok {
            let game: GameInfo = response.json().await?;
            self.context().game.set(Some(game));
        } else {
            debug!(code = status.code, id, "game fetch rejected");
        }
        Ok(status)
    }

    /// Re-fetch the current game's snapshot, e.g. after a stream hiccup.
    pub async fn refresh_game(&self) -> Result<CallStatus, ClientError> {
        let Some(game) = self.context().game.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        self.fetch_game(&game.id).await
    }

    /// GET `/api/games/{id}/widow`: the widow cards, visible to the bid
    /// winner before the exchange. `None` when unavailable or not permitted.
    pub async fn fetch_widow(&self) -> Result<Option<Vec<Card>>, ClientError> {
        let Some(game) = self.context().game.get() else {
            return Ok(None);
        };
        let response = self
            .http()
            .get(self.url(&format!("/api/games/{}/widow", game.id)))
            .send()
            .await?;
        if !response.status().is_success() {
            warn!(
                code = response.status().as_u16(),
                "could not fetch the widow"
            );
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    /// POST `/api/games/{id}/start`: the bid winner declares trump and
    /// exchanges cards with the widow. Status only.
    pub async fn start_round(
        &self,
        trump: Color,
        to_widow: &[Card],
        from_widow: &[Card],
    ) -> Result<CallStatus, ClientError> {
        let Some(game) = self.context().game.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        let response = self
            .http()
            .post(self.url(&format!("/api/games/{}/start", game.id)))
            .json(&RoundSetup {
                trump,
                to_widow,
                from_widow,
            })
            .send()
            .await?;
        Ok(CallStatus::from(response.status()))
    }

    /// GET `/api/games/{id}/score`: end-of-game team totals. `None` while
    /// the server refuses to tally.
    pub async fn fetch_score(&self) -> Result<Option<GameScore>, ClientError> {
        let Some(game) = self.context().game.get() else {
            return Ok(None);
        };
        let response = self
            .http()
            .get(self.url(&format!("/api/games/{}/score", game.id)))
            .send()
            .await?;
        if !response.status().is_success() {
            warn!(
                code = response.status().as_u16(),
                "could not fetch end-of-game score"
            );
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    /// POST `/api/games/{id}/play` with the card to lay on the table.
    /// Status only; the table update arrives over the game stream.
    pub async fn play_card(&self, card: Card) -> Result<CallStatus, ClientError> {
        let Some(game) = self.context().game.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        let response = self
            .http()
            .post(self.url(&format!("/api/games/{}/play", game.id)))
            .json(&card)
            .send()
            .await?;
        Ok(CallStatus::from(response.status()))
    }

    /// POST `/api/games/{id}/finish`: acknowledge the completed trick so the
    /// server clears the table and advances the lead. Status only.
    pub async fn finish_trick(&self) -> Result<CallStatus, ClientError> {
        let Some(game) = self.context().game.get() else {
            return Ok(CallStatus::NO_CONTEXT);
        };
        let response = self
            .http()
            .post(self.url(&format!("/api/games/{}/finish", game.id)))
            .send()
            .await?;
        Ok(CallStatus::from(response.status()))
    }

    /// Open the update stream for the current game, or `None` without a
    /// network call when no game is active.
    pub async fn subscribe_game(&self) -> Result<Option<EventStream>, ClientError> {
        let Some(game) = self.context().game.get() else {
            return Ok(None);
        };
        self.open_stream(&format!("/api/games/{}/subscribe", game.id))
            .await
            .map(Some)
    }
}
