use crate::store::{Genre, Word};
use crate::ui::text_input::TextInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordField {
    Word,
    Details,
}

/// Add (no word) or edit (existing word) form for one genre.
#[derive(Debug)]
pub struct WordForm {
    pub genre: Genre,
    pub word: Option<Word>,
    pub word_input: TextInput,
    pub details_input: TextInput,
    pub focus: WordField,
}

impl WordForm {
    pub fn add(genre: Genre) -> Self {
        Self {
            genre,
            word: None,
            word_input: TextInput::new(""),
            details_input: TextInput::multiline(""),
            focus: WordField::Word,
        }
    }

    pub fn edit(genre: Genre, word: Word) -> Self {
        let word_input = TextInput::new(&word.word);
        let details_input = TextInput::multiline(&word.details);
        Self {
            genre,
            word: Some(word),
            word_input,
            details_input,
            focus: WordField::Word,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            WordField::Word => WordField::Details,
            WordField::Details => WordField::Word,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            WordField::Word => &mut self.word_input,
            WordField::Details => &mut self.details_input,
        }
    }
}
