use rand::Rng;
use rand::seq::SliceRandom;

use crate::store::Word;

/// A self-quiz over a fixed, shuffled set of words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizState {
    pub words: Vec<Word>,
    pub cursor: usize,
}

impl QuizState {
    pub fn shuffled<R: Rng + ?Sized>(mut words: Vec<Word>, rng: &mut R) -> Self {
        words.shuffle(rng);
        Self { words, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.words.len()
    }

    /// The word being asked, or `None` once every word has been shown.
    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.cursor)
    }

    /// Move to the next word. Returns true on the step that finishes the quiz.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.cursor += 1;
        self.is_complete()
    }

    /// Keep the quiz's copy of a word in line with a confidence change.
    pub fn set_confidence(&mut self, word_id: i64, confidence: bool) {
        if let Some(word) = self.words.iter_mut().find(|w| w.id == word_id) {
            word.confidence = confidence;
        }
    }

    /// 1-based position for display, capped at the length.
    pub fn position(&self) -> usize {
        (self.cursor + 1).min(self.words.len())
    }
}
