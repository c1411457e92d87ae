//! Core match state machine.
//!
//! This module contains the main `MatchState` struct and all game logic: the
//! player roster, judge rotation, round-phase progression, submission
//! collection, winner resolution, and match completion.

use crate::card::{CatalogCards, PromptCard, UserId};
use crate::deck::DeckManager;
use crate::player::Player;
use crate::view::{MatchView, PlayerSummary, PromptView, ScoreEntry, SubmissionView};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cards dealt to each player at match start
pub const STARTING_HAND_SIZE: usize = 10;

/// Points goal used when the host does not pick one
pub const DEFAULT_POINTS_GOAL: u32 = 5;

/// Players a host should require before starting a match. The engine itself
/// only rejects an empty roster; this threshold is the host's precondition.
pub const MIN_PLAYERS: usize = 3;

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for players; roster may change
    Lobby,
    /// A round is running and non-judge players are submitting cards
    Submission,
    /// All submissions are in; the judge is picking a winner
    Judging,
}

/// Errors that can occur when applying operations.
///
/// All are locally recoverable; every mutating operation either fully
/// applies or leaves the match in its prior state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Already joined this match")]
    AlreadyJoined,

    #[error("Not in this match")]
    NotJoined,

    #[error("Match is in progress")]
    MatchInProgress,

    #[error("Not enough players")]
    NotEnoughPlayers,

    #[error("Player not found")]
    PlayerNotFound,

    #[error("Already submitted this round")]
    AlreadySubmitted,

    #[error("The judge cannot submit cards")]
    JudgeCannotSubmit,

    #[error("Only the judge can pick a winner")]
    NotJudge,

    #[error("Wrong number of cards for this prompt")]
    InvalidSubmissionCount,

    #[error("No such card")]
    InvalidSubmissionIndex,

    #[error("Invalid operation for current phase")]
    InvalidPhase,

    #[error("Card catalog has no cards of a required kind")]
    EmptyCatalog,
}

/// Events that occur as a result of operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player joined the lobby
    PlayerJoined { player: UserId },

    /// A player left the lobby
    PlayerLeft { player: UserId },

    /// The match started
    MatchStarted { players: usize },

    /// A new round began
    RoundStarted { round: u32, judge: UserId },

    /// A player submitted cards for the current round
    CardsSubmitted { player: UserId },

    /// Every non-judge player has submitted; the judge is up
    JudgingStarted { submissions: usize },

    /// The judge picked this round's winner
    RoundWon { winner: UserId, points: u32 },

    /// A player reached the points goal; the match reset to the lobby
    MatchWon { winner: UserId },

    /// The host tore the match down
    MatchEnded,
}

/// The complete state of one match.
///
/// A host owns one instance per match and must serialize all calls to it;
/// independent matches share nothing and may run in parallel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Joined players, in insertion order, unique by id
    pub players: Vec<Player>,
    /// Draw and discard piles for both card kinds
    pub decks: DeckManager,
    /// Round counter; 0 means not started
    pub round: u32,
    /// Fixed random permutation of player ids computed at match start; the
    /// judge for round R is `judge_order[(R-1) % len]`
    pub judge_order: Vec<UserId>,
    /// Points needed to win the match
    pub points_goal: u32,
    /// Whether a match is running
    pub in_progress: bool,
    /// The active prompt, set while a round is running
    pub current_prompt: Option<PromptCard>,
    /// Current phase
    pub phase: MatchPhase,
    /// Randomized order submissions are presented to the judge in, fixed
    /// once per round when judging begins
    pub submission_order: Vec<UserId>,
}

impl MatchState {
    /// Create an empty match seeded with catalog cards.
    ///
    /// The catalog is validated at [`start`](Self::start), not here, so a
    /// misconfigured deck selection surfaces exactly once per match.
    pub fn new(cards: CatalogCards, points_goal: u32) -> Self {
        Self {
            players: Vec::new(),
            decks: DeckManager::new(cards.prompts, cards.responses),
            round: 0,
            judge_order: Vec::new(),
            points_goal,
            in_progress: false,
            current_prompt: None,
            phase: MatchPhase::Lobby,
            submission_order: Vec::new(),
        }
    }

    /// Get a player by id
    pub fn player(&self, id: UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn player_mut(&mut self, id: UserId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Number of joined players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The current round's judge id, while a match is running
    pub fn judge_id(&self) -> Option<UserId> {
        if !self.in_progress || self.round == 0 || self.judge_order.is_empty() {
            return None;
        }
        let index = (self.round as usize - 1) % self.judge_order.len();
        Some(self.judge_order[index])
    }

    /// The current round's judge, while a match is running
    pub fn judge(&self) -> Option<&Player> {
        self.judge_id().and_then(|id| self.player(id))
    }

    /// Non-judge players who have not yet submitted this round. The judge is
    /// never counted as unfinished.
    pub fn unfinished_players(&self) -> Vec<&Player> {
        let judge = self.judge_id();
        self.players
            .iter()
            .filter(|p| Some(p.id) != judge && !p.has_submitted())
            .collect()
    }

    /// Whether every non-judge player has submitted this round
    pub fn is_round_ready(&self) -> bool {
        self.unfinished_players().is_empty()
    }

    /// Add a player to the lobby.
    pub fn join(&mut self, id: UserId, name: String) -> Result<Vec<GameEvent>, GameError> {
        if self.in_progress {
            return Err(GameError::MatchInProgress);
        }
        if self.player(id).is_some() {
            return Err(GameError::AlreadyJoined);
        }

        self.players.push(Player::new(id, name));
        Ok(vec![GameEvent::PlayerJoined { player: id }])
    }

    /// Remove a player from the lobby.
    pub fn leave(&mut self, id: UserId) -> Result<Vec<GameEvent>, GameError> {
        if self.in_progress {
            return Err(GameError::MatchInProgress);
        }
        let pos = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::NotJoined)?;

        self.players.remove(pos);
        Ok(vec![GameEvent::PlayerLeft { player: id }])
    }

    /// Start the match: shuffle both piles, fix the judge rotation, deal
    /// starting hands, and begin round 1.
    ///
    /// Callers are expected to enforce the [`MIN_PLAYERS`] threshold before
    /// invoking this; the engine only rejects an empty roster, for which
    /// judge rotation is undefined.
    pub fn start(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.in_progress {
            return Err(GameError::MatchInProgress);
        }
        if self.players.is_empty() {
            return Err(GameError::NotEnoughPlayers);
        }
        if self.decks.prompt_count() == 0 || self.decks.response_count() == 0 {
            return Err(GameError::EmptyCatalog);
        }

        let mut rng = rand::thread_rng();
        self.decks.shuffle(&mut rng);

        let mut order: Vec<UserId> = self.players.iter().map(|p| p.id).collect();
        order.shuffle(&mut rng);
        self.judge_order = order;

        self.in_progress = true;
        for player in &mut self.players {
            player.add_cards(self.decks.draw_responses(STARTING_HAND_SIZE, &mut rng));
        }

        self.round = 1;
        self.current_prompt = Some(
            self.decks
                .draw_prompt(&mut rng)
                .ok_or(GameError::EmptyCatalog)?,
        );
        self.phase = MatchPhase::Submission;

        let judge = self.judge_id().ok_or(GameError::NotEnoughPlayers)?;
        Ok(vec![
            GameEvent::MatchStarted {
                players: self.players.len(),
            },
            GameEvent::RoundStarted {
                round: self.round,
                judge,
            },
        ])
    }

    /// Submit cards for the current round, identified by hand indices.
    ///
    /// The readiness predicate is re-evaluated after every submission; the
    /// moment every non-judge player has submitted, the match transitions to
    /// judging and the presentation order is fixed.
    pub fn submit(
        &mut self,
        id: UserId,
        card_indices: &[usize],
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != MatchPhase::Submission {
            return Err(GameError::InvalidPhase);
        }
        if self.player(id).is_none() {
            return Err(GameError::PlayerNotFound);
        }
        if self.judge_id() == Some(id) {
            return Err(GameError::JudgeCannotSubmit);
        }

        let required = self
            .current_prompt
            .as_ref()
            .map(|p| p.required_responses())
            .unwrap_or(1);
        if card_indices.len() != required {
            return Err(GameError::InvalidSubmissionCount);
        }

        let player = self.player_mut(id).ok_or(GameError::PlayerNotFound)?;
        if player.has_submitted() {
            return Err(GameError::AlreadySubmitted);
        }

        // Validate all indices before touching the hand
        for (i, &index) in card_indices.iter().enumerate() {
            if index >= player.hand.len() || card_indices[..i].contains(&index) {
                return Err(GameError::InvalidSubmissionIndex);
            }
        }

        // Submission keeps the player's chosen card order
        let picked = card_indices
            .iter()
            .map(|&i| player.hand[i].clone())
            .collect();
        let mut removal = card_indices.to_vec();
        removal.sort_unstable_by(|a, b| b.cmp(a));
        for index in removal {
            player.hand.remove(index);
        }
        player.submission = picked;

        let mut events = vec![GameEvent::CardsSubmitted { player: id }];

        if self.is_round_ready() {
            let judge = self.judge_id();
            let mut order: Vec<UserId> = self
                .players
                .iter()
                .filter(|p| Some(p.id) != judge && p.has_submitted())
                .map(|p| p.id)
                .collect();
            order.shuffle(&mut rand::thread_rng());

            events.push(GameEvent::JudgingStarted {
                submissions: order.len(),
            });
            self.submission_order = order;
            self.phase = MatchPhase::Judging;
        }

        Ok(events)
    }

    /// Pick this round's winning submission by its position in the
    /// randomized presentation.
    ///
    /// Resolution is a single atomic step: the winner scores, all submitted
    /// cards are discarded, every player is dealt replacements, and either
    /// the next round begins or the match completes and resets to the lobby.
    pub fn pick_winner(
        &mut self,
        id: UserId,
        submission_index: usize,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != MatchPhase::Judging {
            return Err(GameError::InvalidPhase);
        }
        if self.judge_id() != Some(id) {
            return Err(GameError::NotJudge);
        }
        let winner = *self
            .submission_order
            .get(submission_index)
            .ok_or(GameError::InvalidSubmissionIndex)?;

        let winner_points = {
            let player = self.player_mut(winner).ok_or(GameError::PlayerNotFound)?;
            player.points += 1;
            player.points
        };

        let mut events = vec![GameEvent::RoundWon {
            winner,
            points: winner_points,
        }];

        // Retire every submission, winning and losing, and deal each player
        // replacements equal to the prompt's required-response count
        let required = self
            .current_prompt
            .as_ref()
            .map(|p| p.required_responses())
            .unwrap_or(1);
        let mut rng = rand::thread_rng();
        for player in &mut self.players {
            let submitted = player.take_submission();
            self.decks.discard_responses(submitted);
        }
        for player in &mut self.players {
            player.add_cards(self.decks.draw_responses(required, &mut rng));
        }
        self.submission_order.clear();

        if winner_points >= self.points_goal {
            self.reset_to_lobby();
            events.push(GameEvent::MatchWon { winner });
        } else {
            self.round += 1;
            self.current_prompt = Some(
                // Prompts cycle through their own discard, so a started
                // match can always draw the next one
                self.decks
                    .draw_prompt(&mut rng)
                    .ok_or(GameError::EmptyCatalog)?,
            );
            self.phase = MatchPhase::Submission;
            let judge = self.judge_id().ok_or(GameError::NotEnoughPlayers)?;
            events.push(GameEvent::RoundStarted {
                round: self.round,
                judge,
            });
        }

        Ok(events)
    }

    /// Host-initiated teardown, independent of the win condition. Returns
    /// the match to a restartable lobby.
    pub fn end(&mut self) -> Vec<GameEvent> {
        self.reset_to_lobby();
        vec![GameEvent::MatchEnded]
    }

    /// Clear all mutable match state: points zeroed, hands and submissions
    /// returned to draw stock, piles recombined, rotation and round cleared.
    fn reset_to_lobby(&mut self) {
        for player in &mut self.players {
            player.points = 0;
            let hand = std::mem::take(&mut player.hand);
            self.decks.return_responses(hand);
            let submission = player.take_submission();
            self.decks.return_responses(submission);
        }
        self.decks.recombine();
        self.judge_order.clear();
        self.submission_order.clear();
        self.round = 0;
        self.current_prompt = None;
        self.in_progress = false;
        self.phase = MatchPhase::Lobby;
    }

    /// Snapshot for the renderer.
    pub fn current_view(&self) -> MatchView {
        let judge = self.judge().map(|p| PlayerSummary {
            id: p.id,
            name: p.name.clone(),
        });

        let prompt = self.current_prompt.as_ref().map(|p| PromptView {
            text: p.text.clone(),
            responses_required: p.required_responses(),
        });

        let waiting_on = if self.phase == MatchPhase::Submission {
            self.unfinished_players()
                .into_iter()
                .map(|p| PlayerSummary {
                    id: p.id,
                    name: p.name.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let submissions = if self.phase == MatchPhase::Judging {
            self.submission_order
                .iter()
                .filter_map(|id| self.player(*id))
                .map(|p| SubmissionView {
                    cards: p.submission.iter().map(|c| c.text.clone()).collect(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut scoreboard: Vec<ScoreEntry> = self
            .players
            .iter()
            .map(|p| ScoreEntry {
                id: p.id,
                name: p.name.clone(),
                points: p.points,
            })
            .collect();
        scoreboard.sort_by(|a, b| b.points.cmp(&a.points));

        MatchView {
            phase: self.phase,
            round: self.round,
            judge,
            prompt,
            waiting_on,
            submissions,
            scoreboard,
        }
    }
}
