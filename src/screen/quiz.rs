use crate::session::quiz::QuizState;
use crate::store::Genre;

/// Backs both the question and the answer screen; the quiz moves between
/// them by value.
#[derive(Debug)]
pub struct QuizScreen {
    pub genre: Genre,
    pub quiz: QuizState,
}

impl QuizScreen {
    pub fn new(genre: Genre, quiz: QuizState) -> Self {
        Self { genre, quiz }
    }
}
