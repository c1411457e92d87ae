//! Host-side plumbing for Cardczar matches.
//!
//! The engine in `cardczar-core` is a bare state machine; this crate is what
//! a chat-platform integration builds on: an in-memory card catalog loaded
//! from JSON deck documents, and a registry that owns one engine instance
//! per match and serializes all operations on it. Independent matches share
//! nothing and run in parallel.
//!
//! Transport, UI rendering, and command glue stay with the embedding
//! application.

pub mod catalog;
pub mod registry;

pub use catalog::{CatalogError, DeckDoc, PromptDoc, StaticCatalog};
pub use registry::{HostError, MatchRegistry};
