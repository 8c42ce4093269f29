//! Flashcard navigation.
//!
//! The viewer keeps a cursor into one subject's deck. Navigation clamps at
//! both ends and always turns the card face down.

use serde::{Deserialize, Serialize};

use crate::catalog::{Flashcard, FlashcardDeck};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardViewer {
    selected_subject: Option<String>,
    index: usize,
    flipped: bool,
    /// Size of the selected deck, captured at selection.
    #[serde(default)]
    card_count: usize,
}

impl FlashcardViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_subject(&self) -> Option<&str> {
        self.selected_subject.as_deref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    /// Point the viewer at a deck, or clear it with `None`.
    pub fn select(&mut self, deck: Option<&FlashcardDeck>) {
        self.selected_subject = deck.map(|d| d.subject.clone());
        self.card_count = deck.map(|d| d.cards.len()).unwrap_or(0);
        self.index = 0;
        self.flipped = false;
    }

    pub fn next(&mut self) {
        let last = self.card_count.saturating_sub(1);
        self.index = (self.index + 1).min(last);
        self.flipped = false;
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.flipped = false;
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// The card under the cursor, looked up in `deck`.
    pub fn current<'a>(&self, deck: &'a FlashcardDeck) -> Option<&'a Flashcard> {
        if self.selected_subject.as_deref() != Some(deck.subject.as_str()) {
            return None;
        }
        deck.cards.get(self.index)
    }
}
