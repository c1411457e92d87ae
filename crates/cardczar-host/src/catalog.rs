//! In-memory card catalog built from JSON deck documents.

use cardczar_core::{CardCatalog, CardId, CatalogCards, Deck, DeckId, PromptCard, ResponseCard};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Malformed deck document: {0}")]
    MalformedDeck(#[from] serde_json::Error),

    #[error("Deck id {0} already loaded")]
    DuplicateDeck(DeckId),
}

/// A deck as authored: one JSON document holding the deck record and its
/// card texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckDoc {
    pub id: DeckId,
    pub name: String,
    /// Community the deck is scoped to; omit for a global deck
    #[serde(default)]
    pub community: Option<u64>,
    pub prompts: Vec<PromptDoc>,
    pub responses: Vec<String>,
}

/// A prompt as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDoc {
    pub text: String,
    /// Response cards this prompt calls for; omit for the default of 1
    #[serde(default)]
    pub responses_required: Option<u32>,
}

/// An in-memory [`CardCatalog`] over any number of loaded decks.
///
/// Card ids are assigned at load time and stay stable for the catalog's
/// lifetime, which is all the engine requires of them.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    decks: Vec<Deck>,
    prompts: Vec<PromptCard>,
    responses: Vec<ResponseCard>,
    next_card_id: CardId,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one deck document.
    pub fn add_deck(&mut self, doc: DeckDoc) -> Result<(), CatalogError> {
        if self.decks.iter().any(|d| d.id == doc.id) {
            return Err(CatalogError::DuplicateDeck(doc.id));
        }

        self.decks.push(Deck {
            id: doc.id,
            name: doc.name,
            community: doc.community,
        });

        for prompt in doc.prompts {
            let id = self.next_id();
            self.prompts.push(PromptCard {
                id,
                deck: doc.id,
                text: prompt.text,
                responses_required: prompt.responses_required,
            });
        }
        for text in doc.responses {
            let id = self.next_id();
            self.responses.push(ResponseCard {
                id,
                deck: doc.id,
                text,
            });
        }

        Ok(())
    }

    /// Parse and load one deck from its JSON document.
    pub fn add_deck_json(&mut self, json: &str) -> Result<(), CatalogError> {
        let doc: DeckDoc = serde_json::from_str(json)?;
        self.add_deck(doc)
    }

    /// All loaded decks, for deck-selection UIs.
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    /// Decks visible to a community: its own plus the global ones.
    pub fn decks_for_community(&self, community: u64) -> Vec<&Deck> {
        self.decks
            .iter()
            .filter(|d| d.community.is_none() || d.community == Some(community))
            .collect()
    }

    fn next_id(&mut self) -> CardId {
        let id = self.next_card_id;
        self.next_card_id += 1;
        id
    }
}

impl CardCatalog for StaticCatalog {
    fn cards_for_decks(&self, deck_ids: &[DeckId]) -> CatalogCards {
        CatalogCards {
            prompts: self
                .prompts
                .iter()
                .filter(|c| deck_ids.contains(&c.deck))
                .cloned()
                .collect(),
            responses: self
                .responses
                .iter()
                .filter(|c| deck_ids.contains(&c.deck))
                .cloned()
                .collect(),
        }
    }
}
