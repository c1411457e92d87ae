//! Renderer snapshot types.
//!
//! After every mutating call the host pulls a [`MatchView`] and redraws its
//! UI from it, without reaching into engine internals.

use crate::card::UserId;
use crate::game::MatchPhase;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to redraw one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    pub phase: MatchPhase,
    /// Round counter, 0 while in the lobby
    pub round: u32,
    /// The current round's judge, set while a match is running
    pub judge: Option<PlayerSummary>,
    /// The active prompt, set while a round is running
    pub prompt: Option<PromptView>,
    /// Non-judge players who have not yet submitted this round
    pub waiting_on: Vec<PlayerSummary>,
    /// Anonymized submissions in their randomized presentation order;
    /// populated only while judging
    pub submissions: Vec<SubmissionView>,
    /// All players sorted by points descending
    pub scoreboard: Vec<ScoreEntry>,
}

/// Identity and display name of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: UserId,
    pub name: String,
}

/// The active prompt as shown to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptView {
    pub text: String,
    pub responses_required: usize,
}

/// One submission as presented to the judge. Deliberately carries no author
/// identity; the judge picks by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionView {
    pub cards: Vec<String>,
}

/// One scoreboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: UserId,
    pub name: String,
    pub points: u32,
}
