//! One value per screen kind. A screen owns its widget state and the row
//! snapshots it was built from; it is replaced wholesale on every transition.

pub mod genre_form;
pub mod quiz;
pub mod start;
pub mod word_detail;
pub mod word_form;
pub mod word_list;

use crate::session::quiz::QuizState;
use crate::store::{ConfidenceFilter, Genre, Word};

pub use genre_form::GenreForm;
pub use quiz::QuizScreen;
pub use start::StartScreen;
pub use word_detail::WordDetailScreen;
pub use word_form::{WordField, WordForm};
pub use word_list::WordListScreen;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Start,
    AddGenre,
    EditGenre,
    WordList,
    AddWord,
    EditWord,
    WordDetail,
    WordCheck,
    WordCheckAnswer,
}

impl ScreenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenKind::Start => "start",
            ScreenKind::AddGenre => "add-genre",
            ScreenKind::EditGenre => "edit-genre",
            ScreenKind::WordList => "word-list",
            ScreenKind::AddWord => "add-word",
            ScreenKind::EditWord => "edit-word",
            ScreenKind::WordDetail => "word-detail",
            ScreenKind::WordCheck => "word-check",
            ScreenKind::WordCheckAnswer => "word-check-answer",
        }
    }
}

/// The screen currently attached to the terminal.
#[derive(Debug)]
pub enum Screen {
    Start(StartScreen),
    AddGenre(GenreForm),
    EditGenre(GenreForm),
    WordList(WordListScreen),
    AddWord(WordForm),
    EditWord(WordForm),
    WordDetail(WordDetailScreen),
    WordCheck(QuizScreen),
    WordCheckAnswer(QuizScreen),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Start(_) => ScreenKind::Start,
            Screen::AddGenre(_) => ScreenKind::AddGenre,
            Screen::EditGenre(_) => ScreenKind::EditGenre,
            Screen::WordList(_) => ScreenKind::WordList,
            Screen::AddWord(_) => ScreenKind::AddWord,
            Screen::EditWord(_) => ScreenKind::EditWord,
            Screen::WordDetail(_) => ScreenKind::WordDetail,
            Screen::WordCheck(_) => ScreenKind::WordCheck,
            Screen::WordCheckAnswer(_) => ScreenKind::WordCheckAnswer,
        }
    }

    /// The genre this screen is scoped to, if any.
    pub fn genre(&self) -> Option<&Genre> {
        match self {
            Screen::Start(_) | Screen::AddGenre(_) => None,
            Screen::EditGenre(form) => form.genre.as_ref(),
            Screen::WordList(s) => Some(&s.genre),
            Screen::AddWord(form) | Screen::EditWord(form) => Some(&form.genre),
            Screen::WordDetail(s) => Some(&s.genre),
            Screen::WordCheck(s) | Screen::WordCheckAnswer(s) => Some(&s.genre),
        }
    }
}

/// A request to replace the current screen, carrying what the target needs.
#[derive(Clone, Debug)]
pub enum ScreenRequest {
    Start,
    AddGenre,
    EditGenre(Genre),
    WordList {
        genre: Genre,
        words: Vec<Word>,
        filter: ConfidenceFilter,
    },
    AddWord(Genre),
    EditWord { genre: Genre, word: Word },
    WordDetail { genre: Genre, word: Word },
    WordCheck { genre: Genre, quiz: QuizState },
    WordCheckAnswer { genre: Genre, quiz: QuizState },
}

impl ScreenRequest {
    pub fn kind(&self) -> ScreenKind {
        match self {
            ScreenRequest::Start => ScreenKind::Start,
            ScreenRequest::AddGenre => ScreenKind::AddGenre,
            ScreenRequest::EditGenre(_) => ScreenKind::EditGenre,
            ScreenRequest::WordList { .. } => ScreenKind::WordList,
            ScreenRequest::AddWord(_) => ScreenKind::AddWord,
            ScreenRequest::EditWord { .. } => ScreenKind::EditWord,
            ScreenRequest::WordDetail { .. } => ScreenKind::WordDetail,
            ScreenRequest::WordCheck { .. } => ScreenKind::WordCheck,
            ScreenRequest::WordCheckAnswer { .. } => ScreenKind::WordCheckAnswer,
        }
    }
}
