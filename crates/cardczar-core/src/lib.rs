//! Cardczar - engine for a judged card-matching party game
//!
//! This crate provides the core game logic for Cardczar, including:
//! - The card catalog data model (prompt and response cards, decks)
//! - Draw/discard pile management with reshuffle-on-exhaustion
//! - Player roster and per-round submission bookkeeping
//! - The match state machine with judge rotation and full rule enforcement
//!
//! # Architecture
//!
//! The engine is platform-agnostic and owns no transport or persistence. A
//! host process creates one [`MatchState`] per match, feeds it player events,
//! and redraws its UI from [`MatchView`] snapshots after every mutation. All
//! mutating operations are synchronous and atomic: they either fully apply or
//! leave the match untouched.
//!
//! # Modules
//!
//! - [`card`]: card and deck records plus the catalog adapter trait
//! - [`deck`]: draw and discard pile management
//! - [`player`]: per-player roster state
//! - [`game`]: the match state machine and host-facing facade
//! - [`view`]: renderer snapshot types

pub mod card;
pub mod deck;
pub mod game;
pub mod player;
pub mod view;

// Re-export commonly used types
pub use card::{CardCatalog, CardId, CatalogCards, Deck, DeckId, PromptCard, ResponseCard, UserId};
pub use deck::DeckManager;
pub use game::{
    GameError, GameEvent, MatchPhase, MatchState, DEFAULT_POINTS_GOAL, MIN_PLAYERS,
    STARTING_HAND_SIZE,
};
pub use player::Player;
pub use view::{MatchView, PlayerSummary, PromptView, ScoreEntry, SubmissionView};
