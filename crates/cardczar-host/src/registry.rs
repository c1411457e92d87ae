//! Match lifecycle and the per-match serialization boundary.
//!
//! Each match is an independently owned, single-threaded state machine. The
//! registry keeps every live match behind its own async mutex, so all
//! operations on one match apply one at a time while unrelated matches run
//! fully in parallel. Callers get back the emitted events plus a fresh view
//! snapshot to render from.

use cardczar_core::{
    CardCatalog, DeckId, GameError, GameEvent, MatchState, MatchView, UserId, MIN_PLAYERS,
};
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Match not found")]
    MatchNotFound,

    #[error("A match needs at least 3 players")]
    NotEnoughPlayers,

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Outcome of a mutating operation: what happened, and what to render now.
pub type OpOutcome = (Vec<GameEvent>, MatchView);

/// Registry of live matches.
pub struct MatchRegistry {
    matches: DashMap<Uuid, Arc<Mutex<MatchState>>>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self {
            matches: DashMap::new(),
        }
    }

    /// Number of live matches
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Create a match seeded from the given decks.
    ///
    /// Fails fast when the selection yields no cards of either kind, so a
    /// bad deck pick surfaces at creation rather than mid-lobby.
    pub fn create_match(
        &self,
        catalog: &dyn CardCatalog,
        deck_ids: &[DeckId],
        points_goal: u32,
    ) -> Result<Uuid, HostError> {
        let cards = catalog.cards_for_decks(deck_ids);
        if cards.prompts.is_empty() || cards.responses.is_empty() {
            warn!(?deck_ids, "rejected match creation: no cards in selection");
            return Err(HostError::Game(GameError::EmptyCatalog));
        }

        let match_id = Uuid::new_v4();
        let game = MatchState::new(cards, points_goal);
        self.matches.insert(match_id, Arc::new(Mutex::new(game)));

        info!(%match_id, ?deck_ids, points_goal, "match created");
        Ok(match_id)
    }

    /// Tear a match down, resetting it and dropping it from the registry.
    pub async fn end_match(&self, match_id: Uuid) -> Result<Vec<GameEvent>, HostError> {
        let (_, game) = self
            .matches
            .remove(&match_id)
            .ok_or(HostError::MatchNotFound)?;
        let events = game.lock().await.end();

        info!(%match_id, "match ended");
        Ok(events)
    }

    /// Add a player to a match lobby.
    pub async fn join(
        &self,
        match_id: Uuid,
        user: UserId,
        name: String,
    ) -> Result<OpOutcome, HostError> {
        let game = self.get(match_id)?;
        let mut game = game.lock().await;

        let events = game.join(user, name)?;
        info!(%match_id, user, "player joined");
        Ok((events, game.current_view()))
    }

    /// Remove a player from a match lobby.
    pub async fn leave(&self, match_id: Uuid, user: UserId) -> Result<OpOutcome, HostError> {
        let game = self.get(match_id)?;
        let mut game = game.lock().await;

        let events = game.leave(user)?;
        info!(%match_id, user, "player left");
        Ok((events, game.current_view()))
    }

    /// Start a match. The host policy of a minimum roster lives here; the
    /// engine itself only documents it.
    pub async fn start(&self, match_id: Uuid) -> Result<OpOutcome, HostError> {
        let game = self.get(match_id)?;
        let mut game = game.lock().await;

        if game.player_count() < MIN_PLAYERS {
            warn!(%match_id, players = game.player_count(), "rejected start: too few players");
            return Err(HostError::NotEnoughPlayers);
        }

        let events = game.start()?;
        info!(%match_id, players = game.player_count(), "match started");
        Ok((events, game.current_view()))
    }

    /// Submit cards for the current round.
    pub async fn submit(
        &self,
        match_id: Uuid,
        user: UserId,
        card_indices: &[usize],
    ) -> Result<OpOutcome, HostError> {
        let game = self.get(match_id)?;
        let mut game = game.lock().await;

        let events = game.submit(user, card_indices)?;
        Ok((events, game.current_view()))
    }

    /// Pick the round winner by presentation slot.
    pub async fn pick_winner(
        &self,
        match_id: Uuid,
        user: UserId,
        submission_index: usize,
    ) -> Result<OpOutcome, HostError> {
        let game = self.get(match_id)?;
        let mut game = game.lock().await;

        let events = game.pick_winner(user, submission_index)?;
        if let Some(GameEvent::MatchWon { winner }) = events
            .iter()
            .find(|e| matches!(e, GameEvent::MatchWon { .. }))
        {
            info!(%match_id, winner, "match won");
        }
        Ok((events, game.current_view()))
    }

    /// Read-only snapshot of a match.
    pub async fn view(&self, match_id: Uuid) -> Result<MatchView, HostError> {
        let game = self.get(match_id)?;
        let game = game.lock().await;
        Ok(game.current_view())
    }

    // Clone the Arc out so the registry shard lock is never held across an
    // await point
    fn get(&self, match_id: Uuid) -> Result<Arc<Mutex<MatchState>>, HostError> {
        self.matches
            .get(&match_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(HostError::MatchNotFound)
    }
}

impl Default for MatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}
