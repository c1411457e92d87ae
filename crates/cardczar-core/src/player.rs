//! Per-player roster state.

use crate::card::{ResponseCard, UserId};
use serde::{Deserialize, Serialize};

/// A single player's state within a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Opaque external user identity
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Response cards currently held
    pub hand: Vec<ResponseCard>,
    /// Accumulated points this match
    pub points: u32,
    /// Cards submitted for the current round; empty outside a submission
    /// window
    pub submission: Vec<ResponseCard>,
}

impl Player {
    /// Create a new player with no cards and zero points
    pub fn new(id: UserId, name: String) -> Self {
        Self {
            id,
            name,
            hand: Vec::new(),
            points: 0,
            submission: Vec::new(),
        }
    }

    /// Add dealt cards to the hand
    pub fn add_cards(&mut self, cards: Vec<ResponseCard>) {
        self.hand.extend(cards);
    }

    /// Whether this player has submitted for the current round
    pub fn has_submitted(&self) -> bool {
        !self.submission.is_empty()
    }

    /// Take this round's submission, leaving the player ready for the next
    pub fn take_submission(&mut self) -> Vec<ResponseCard> {
        std::mem::take(&mut self.submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::ResponseCard;

    fn card(id: u64) -> ResponseCard {
        ResponseCard {
            id,
            deck: 1,
            text: format!("card {}", id),
        }
    }

    #[test]
    fn test_new_player_is_empty() {
        let player = Player::new(42, "Alice".to_string());
        assert_eq!(player.points, 0);
        assert!(player.hand.is_empty());
        assert!(!player.has_submitted());
    }

    #[test]
    fn test_add_cards_grows_hand() {
        let mut player = Player::new(42, "Alice".to_string());
        player.add_cards(vec![card(1), card(2)]);
        player.add_cards(vec![card(3)]);
        assert_eq!(player.hand.len(), 3);
    }

    #[test]
    fn test_take_submission_clears_it() {
        let mut player = Player::new(42, "Alice".to_string());
        player.submission = vec![card(1), card(2)];
        assert!(player.has_submitted());

        let taken = player.take_submission();
        assert_eq!(taken.len(), 2);
        assert!(!player.has_submitted());
    }
}
