//! Card and deck records, and the catalog adapter the engine draws from.
//!
//! Cards are opaque immutable records handed to the engine at match creation.
//! The engine never persists or mutates them; it only moves them between
//! piles, hands, and submissions.

use serde::{Deserialize, Serialize};

/// Stable identity of a card within the catalog
pub type CardId = u64;

/// Stable identity of a deck within the catalog
pub type DeckId = u64;

/// Opaque external user identifier (e.g. a chat-platform user id)
pub type UserId = u64;

/// A named group of cards, optionally scoped to a single community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    /// Community the deck belongs to, or `None` for a global/shared deck
    pub community: Option<u64>,
}

/// A prompt card posing a fill-in-the-blank style statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCard {
    pub id: CardId,
    pub deck: DeckId,
    pub text: String,
    /// How many response cards this prompt calls for; `None` means 1
    pub responses_required: Option<u32>,
}

impl PromptCard {
    /// Number of response cards a player must submit for this prompt
    pub fn required_responses(&self) -> usize {
        self.responses_required.unwrap_or(1) as usize
    }
}

/// A response card played by a non-judge player to complete a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCard {
    pub id: CardId,
    pub deck: DeckId,
    pub text: String,
}

/// The cards a catalog yields for a set of decks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogCards {
    pub prompts: Vec<PromptCard>,
    pub responses: Vec<ResponseCard>,
}

impl CatalogCards {
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty() && self.responses.is_empty()
    }
}

/// Source of card records, grouped by deck.
///
/// Implemented by the host; the engine only ever calls this once per match,
/// at creation, and treats the result as immutable.
pub trait CardCatalog {
    /// All prompt and response cards belonging to the given decks.
    fn cards_for_decks(&self, deck_ids: &[DeckId]) -> CatalogCards;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_responses_defaults_to_one() {
        let prompt = PromptCard {
            id: 1,
            deck: 1,
            text: "____?".to_string(),
            responses_required: None,
        };
        assert_eq!(prompt.required_responses(), 1);

        let pick_two = PromptCard {
            responses_required: Some(2),
            ..prompt
        };
        assert_eq!(pick_two.required_responses(), 2);
    }
}
