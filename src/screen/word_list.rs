use crate::store::{ConfidenceFilter, Genre, Word};
use crate::ui::components::selection::Selection;

#[derive(Debug)]
pub struct WordListScreen {
    pub genre: Genre,
    pub words: Vec<Word>,
    pub filter: ConfidenceFilter,
    pub selection: Selection,
}

impl WordListScreen {
    pub fn new(genre: Genre, words: Vec<Word>, filter: ConfidenceFilter) -> Self {
        let selection = Selection::new(words.len());
        Self {
            genre,
            words,
            filter,
            selection,
        }
    }

    pub fn selected_word(&self) -> Option<&Word> {
        self.selection.index().and_then(|i| self.words.get(i))
    }

    pub fn confident_count(&self) -> usize {
        self.words.iter().filter(|w| w.confidence).count()
    }
}
