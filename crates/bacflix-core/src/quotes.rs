//! Motivational quote rotation. Purely cosmetic.

use rand::Rng;

use crate::catalog::QUOTES;

#[derive(Debug, Clone)]
pub struct QuoteRotation {
    quotes: Vec<String>,
    current: usize,
}

impl Default for QuoteRotation {
    fn default() -> Self {
        Self::new(QUOTES.iter().map(|q| q.to_string()).collect())
    }
}

impl QuoteRotation {
    pub fn new(quotes: Vec<String>) -> Self {
        Self { quotes, current: 0 }
    }

    pub fn current(&self) -> &str {
        self.quotes.get(self.current).map(String::as_str).unwrap_or("")
    }

    /// Jump to a uniformly random quote. Repeats are allowed.
    pub fn rotate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &str {
        if !self.quotes.is_empty() {
            self.current = rng.gen_range(0..self.quotes.len());
        }
        self.current()
    }

    pub fn rotate(&mut self) -> &str {
        self.rotate_with(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn starts_at_first_quote() {
        assert_eq!(QuoteRotation::default().current(), QUOTES[0]);
    }

    #[test]
    fn rotate_stays_within_list() {
        let mut rotation = QuoteRotation::default();
        for _ in 0..50 {
            let quote = rotation.rotate().to_string();
            assert!(QUOTES.contains(&quote.as_str()));
        }
    }

    #[test]
    fn rotate_with_deterministic_rng() {
        let mut rotation = QuoteRotation::default();
        let mut rng = StepRng::new(0, 0);
        assert_eq!(rotation.rotate_with(&mut rng), QUOTES[0]);
    }

    #[test]
    fn empty_rotation_yields_empty_quote() {
        let mut rotation = QuoteRotation::new(Vec::new());
        assert_eq!(rotation.rotate(), "");
    }
}
