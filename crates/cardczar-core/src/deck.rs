//! Draw and discard pile management.
//!
//! The engine keeps two independent pairs of piles, one per card kind. Both
//! use the same policy: draw from the head of the draw pile, and when the
//! draw pile cannot satisfy a request, shuffle that kind's discard pile back
//! into its draw pile first. Reshuffling an empty discard pile is a no-op.

use crate::card::{PromptCard, ResponseCard};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Live draw and discard piles for one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckManager {
    prompt_draw: Vec<PromptCard>,
    prompt_discard: Vec<PromptCard>,
    response_draw: Vec<ResponseCard>,
    response_discard: Vec<ResponseCard>,
}

impl DeckManager {
    /// Seed the piles from catalog records. Piles are not shuffled here;
    /// [`shuffle`](Self::shuffle) runs once at match start.
    pub fn new(prompts: Vec<PromptCard>, responses: Vec<ResponseCard>) -> Self {
        Self {
            prompt_draw: prompts,
            prompt_discard: Vec::new(),
            response_draw: responses,
            response_discard: Vec::new(),
        }
    }

    /// Total prompt cards across both piles
    pub fn prompt_count(&self) -> usize {
        self.prompt_draw.len() + self.prompt_discard.len()
    }

    /// Total response cards across both piles (excluding cards out in hands)
    pub fn response_count(&self) -> usize {
        self.response_draw.len() + self.response_discard.len()
    }

    /// Shuffle both draw piles
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.prompt_draw.shuffle(rng);
        self.response_draw.shuffle(rng);
    }

    /// Draw up to `n` response cards from the head of the draw pile.
    ///
    /// If fewer than `n` remain, the response discard pile is shuffled and
    /// merged into the draw pile before drawing. Returns fewer than `n`
    /// cards only when draw and discard combined cannot cover the request.
    pub fn draw_responses<R: Rng>(&mut self, n: usize, rng: &mut R) -> Vec<ResponseCard> {
        if n > self.response_draw.len() && !self.response_discard.is_empty() {
            self.response_discard.shuffle(rng);
            self.response_draw.append(&mut self.response_discard);
        }
        let n = n.min(self.response_draw.len());
        self.response_draw.drain(..n).collect()
    }

    /// Draw the next prompt card, retiring it to the prompt discard pile.
    ///
    /// When the prompt draw pile is empty, the prompt discard pile is
    /// shuffled and becomes the new draw pile. Returns `None` only when the
    /// catalog supplied no prompt cards at all.
    pub fn draw_prompt<R: Rng>(&mut self, rng: &mut R) -> Option<PromptCard> {
        if self.prompt_draw.is_empty() {
            self.prompt_discard.shuffle(rng);
            self.prompt_draw.append(&mut self.prompt_discard);
        }
        if self.prompt_draw.is_empty() {
            return None;
        }
        let head = self.prompt_draw.remove(0);
        self.prompt_discard.push(head.clone());
        Some(head)
    }

    /// Retire submitted response cards to the discard pile
    pub fn discard_responses(&mut self, cards: Vec<ResponseCard>) {
        self.response_discard.extend(cards);
    }

    /// Return response cards (e.g. hands at match reset) to the draw pile
    pub fn return_responses(&mut self, cards: Vec<ResponseCard>) {
        self.response_draw.extend(cards);
    }

    /// Fold both discard piles back into their draw piles (match reset)
    pub fn recombine(&mut self) {
        self.response_draw.append(&mut self.response_discard);
        self.prompt_draw.append(&mut self.prompt_discard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardId, PromptCard, ResponseCard};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn responses(n: u64) -> Vec<ResponseCard> {
        (0..n)
            .map(|i| ResponseCard {
                id: i as CardId,
                deck: 1,
                text: format!("response {}", i),
            })
            .collect()
    }

    fn prompts(n: u64) -> Vec<PromptCard> {
        (0..n)
            .map(|i| PromptCard {
                id: 100 + i as CardId,
                deck: 1,
                text: format!("prompt {}", i),
                responses_required: None,
            })
            .collect()
    }

    #[test]
    fn test_draw_responses_from_draw_pile() {
        let mut decks = DeckManager::new(prompts(1), responses(10));
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = decks.draw_responses(3, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert_eq!(decks.response_count(), 7);
    }

    #[test]
    fn test_draw_responses_reshuffles_discard() {
        let mut decks = DeckManager::new(prompts(1), responses(4));
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = decks.draw_responses(3, &mut rng);
        decks.discard_responses(drawn);

        // Draw pile holds 1, discard holds 3; a draw of 2 must reshuffle
        let drawn = decks.draw_responses(2, &mut rng);
        assert_eq!(drawn.len(), 2);
        assert_eq!(decks.response_count(), 2);
    }

    #[test]
    fn test_draw_responses_short_when_exhausted() {
        let mut decks = DeckManager::new(prompts(1), responses(2));
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = decks.draw_responses(5, &mut rng);
        assert_eq!(drawn.len(), 2);
        assert_eq!(decks.response_count(), 0);
    }

    #[test]
    fn test_card_conservation_across_cycles() {
        let mut decks = DeckManager::new(prompts(3), responses(12));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            let drawn = decks.draw_responses(5, &mut rng);
            let held = drawn.len();
            decks.discard_responses(drawn);
            assert!(held <= 5);
            assert_eq!(decks.response_count(), 12);
        }
    }

    #[test]
    fn test_draw_prompt_cycles_through_own_discard() {
        let mut decks = DeckManager::new(prompts(2), responses(1));
        let mut rng = StdRng::seed_from_u64(9);

        let first = decks.draw_prompt(&mut rng).unwrap();
        let second = decks.draw_prompt(&mut rng).unwrap();
        assert_ne!(first.id, second.id);

        // Draw pile exhausted; third draw must come from the prompt discard,
        // never from the response pile
        let third = decks.draw_prompt(&mut rng).unwrap();
        assert!(third.id == first.id || third.id == second.id);
        assert_eq!(decks.prompt_count(), 2);
        assert_eq!(decks.response_count(), 1);
    }

    #[test]
    fn test_draw_prompt_empty_catalog() {
        let mut decks = DeckManager::new(Vec::new(), responses(1));
        let mut rng = StdRng::seed_from_u64(9);
        assert!(decks.draw_prompt(&mut rng).is_none());
    }

    #[test]
    fn test_recombine_restores_full_piles() {
        let mut decks = DeckManager::new(prompts(3), responses(6));
        let mut rng = StdRng::seed_from_u64(3);

        decks.draw_prompt(&mut rng).unwrap();
        let drawn = decks.draw_responses(4, &mut rng);
        decks.discard_responses(drawn[..2].to_vec());
        decks.return_responses(drawn[2..].to_vec());
        decks.recombine();

        assert_eq!(decks.prompt_count(), 3);
        assert_eq!(decks.response_count(), 6);
        // Everything is back in draw stock
        let drawn = decks.draw_responses(6, &mut rng);
        assert_eq!(drawn.len(), 6);
    }
}
