use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::error::{Error, NavigationError, Result};
use crate::screen::{
    GenreForm, QuizScreen, Screen, ScreenRequest, StartScreen, WordDetailScreen, WordForm,
    WordListScreen,
};
use crate::session::quiz::QuizState;
use crate::store::{ConfidenceFilter, Genre, RecordStore, Word};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// A destructive action waiting for a yes/no answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingDelete {
    Genre(Genre),
    Word { genre: Genre, word: Word },
}

impl PendingDelete {
    pub fn prompt(&self) -> String {
        match self {
            PendingDelete::Genre(genre) => {
                format!("Delete genre \"{}\" and all of its words?", genre.name)
            }
            PendingDelete::Word { word, .. } => format!("Delete word \"{}\"?", word.word),
        }
    }
}

/// Owns the store and the single active screen, and is the only place the
/// active screen is replaced.
pub struct App {
    pub screen: Screen,
    pub store: RecordStore,
    pub config: Config,
    pub theme: Theme,
    pub status: Option<Status>,
    pub confirm: Option<PendingDelete>,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, store: RecordStore) -> Result<Self> {
        let theme = Theme::load(&config.theme).unwrap_or_default();
        let screen = Screen::Start(StartScreen::new(store.genres()?));
        Ok(Self {
            screen,
            store,
            config,
            theme,
            status: None,
            confirm: None,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        })
    }

    /// Replace the active screen. On error the current screen stays up.
    pub fn switch_to(&mut self, request: ScreenRequest) -> Result<()> {
        let from = self.screen.kind();
        let to = request.kind();
        let next = self.build(request)?;
        let previous = std::mem::replace(&mut self.screen, next);
        drop(previous);
        tracing::debug!(from = from.as_str(), to = to.as_str(), "switched screen");
        Ok(())
    }

    fn build(&self, request: ScreenRequest) -> Result<Screen> {
        let screen = match request {
            ScreenRequest::Start => Screen::Start(StartScreen::new(self.store.genres()?)),
            ScreenRequest::AddGenre => Screen::AddGenre(GenreForm::add()),
            ScreenRequest::EditGenre(genre) => {
                self.check_genre(&genre)?;
                Screen::EditGenre(GenreForm::edit(genre))
            }
            ScreenRequest::WordList {
                genre,
                words,
                filter,
            } => {
                self.check_genre(&genre)?;
                for word in &words {
                    check_word_in_genre(word, &genre)?;
                }
                Screen::WordList(WordListScreen::new(genre, words, filter))
            }
            ScreenRequest::AddWord(genre) => {
                self.check_genre(&genre)?;
                Screen::AddWord(WordForm::add(genre))
            }
            ScreenRequest::EditWord { genre, word } => {
                self.check_genre(&genre)?;
                check_word_in_genre(&word, &genre)?;
                Screen::EditWord(WordForm::edit(genre, word))
            }
            ScreenRequest::WordDetail { genre, word } => {
                self.check_genre(&genre)?;
                check_word_in_genre(&word, &genre)?;
                Screen::WordDetail(WordDetailScreen::new(genre, word))
            }
            ScreenRequest::WordCheck { genre, quiz } => {
                self.check_genre(&genre)?;
                if quiz.cursor > quiz.len() {
                    return Err(NavigationError::QuizCursorOutOfRange {
                        cursor: quiz.cursor,
                        len: quiz.len(),
                    }
                    .into());
                }
                Screen::WordCheck(QuizScreen::new(genre, quiz))
            }
            ScreenRequest::WordCheckAnswer { genre, quiz } => {
                self.check_genre(&genre)?;
                if quiz.is_complete() {
                    return Err(NavigationError::QuizFinished.into());
                }
                Screen::WordCheckAnswer(QuizScreen::new(genre, quiz))
            }
        };
        Ok(screen)
    }

    fn check_genre(&self, genre: &Genre) -> Result<()> {
        match self.store.genre(genre.id)? {
            Some(_) => Ok(()),
            None => Err(NavigationError::UnknownGenre(genre.id).into()),
        }
    }

    /// Re-read a genre's words and show them under `filter`.
    pub fn open_word_list(&mut self, genre: Genre, filter: ConfidenceFilter) -> Result<()> {
        let words = self.store.words_matching(genre.id, filter)?;
        self.switch_to(ScreenRequest::WordList {
            genre,
            words,
            filter,
        })
    }

    /// Shuffle `words` into a fresh quiz and show its first question.
    pub fn start_quiz(&mut self, genre: Genre, words: Vec<Word>) -> Result<()> {
        let quiz = QuizState::shuffled(words, &mut self.rng);
        tracing::debug!(genre = genre.id, len = quiz.len(), "starting quiz");
        self.switch_to(ScreenRequest::WordCheck { genre, quiz })
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    /// Show an error in the status line and log it.
    pub fn report(&mut self, error: &Error) {
        tracing::warn!(
            screen = self.screen.kind().as_str(),
            genre = ?self.screen.genre().map(|g| g.id),
            %error,
            "action failed"
        );
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: error.to_string(),
        });
    }

    /// Release the store. Call once the UI loop has ended.
    pub fn shutdown(self) -> Result<()> {
        self.store.close()?;
        Ok(())
    }
}

fn check_word_in_genre(word: &Word, genre: &Genre) -> Result<(), NavigationError> {
    if word.genre_id != genre.id {
        return Err(NavigationError::WordOutsideGenre {
            word_id: word.id,
            genre_id: genre.id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::ScreenKind;

    fn make_app() -> App {
        let store = RecordStore::open_in_memory().unwrap();
        App::new(Config::default(), store).unwrap()
    }

    fn add_genre(app: &App, name: &str) -> Genre {
        let id = app.store.add_genre(name).unwrap();
        app.store.genre(id).unwrap().unwrap()
    }

    fn add_word(app: &App, genre: &Genre, word: &str) -> Word {
        let id = app.store.add_word(genre.id, word, "", false).unwrap();
        app.store.word(id).unwrap().unwrap()
    }

    #[test]
    fn test_starts_on_start_screen() {
        let app = make_app();
        assert_eq!(app.screen.kind(), ScreenKind::Start);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_start_screen_reads_fresh_genres() {
        let mut app = make_app();
        add_genre(&app, "Animals");
        app.switch_to(ScreenRequest::Start).unwrap();
        let Screen::Start(start) = &app.screen else {
            panic!("expected start screen");
        };
        assert_eq!(start.genres.len(), 1);
        assert_eq!(start.genres[0].name, "Animals");
    }

    #[test]
    fn test_word_list_rejects_deleted_genre() {
        let mut app = make_app();
        let genre = add_genre(&app, "Animals");
        app.store.delete_genre(genre.id).unwrap();

        let err = app.open_word_list(genre.clone(), ConfidenceFilter::All).unwrap_err();
        assert!(matches!(
            err,
            Error::Navigation(NavigationError::UnknownGenre(id)) if id == genre.id
        ));
        assert_eq!(app.screen.kind(), ScreenKind::Start);
    }

    #[test]
    fn test_word_from_other_genre_rejected() {
        let mut app = make_app();
        let animals = add_genre(&app, "Animals");
        let plants = add_genre(&app, "Plants");
        let fern = add_word(&app, &plants, "Fern");

        let err = app
            .switch_to(ScreenRequest::WordDetail {
                genre: animals.clone(),
                word: fern.clone(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Navigation(NavigationError::WordOutsideGenre { .. })
        ));

        let err = app
            .switch_to(ScreenRequest::WordList {
                genre: animals,
                words: vec![fern],
                filter: ConfidenceFilter::All,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Navigation(NavigationError::WordOutsideGenre { .. })
        ));
        assert_eq!(app.screen.kind(), ScreenKind::Start);
    }

    #[test]
    fn test_quiz_cursor_bounds() {
        let mut app = make_app();
        let genre = add_genre(&app, "Animals");
        let cat = add_word(&app, &genre, "Cat");

        let quiz = QuizState {
            words: vec![cat.clone()],
            cursor: 2,
        };
        let err = app
            .switch_to(ScreenRequest::WordCheck {
                genre: genre.clone(),
                quiz,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Navigation(NavigationError::QuizCursorOutOfRange { cursor: 2, len: 1 })
        ));

        let finished = QuizState {
            words: vec![cat.clone()],
            cursor: 1,
        };
        app.switch_to(ScreenRequest::WordCheck {
            genre: genre.clone(),
            quiz: finished.clone(),
        })
        .unwrap();
        assert_eq!(app.screen.kind(), ScreenKind::WordCheck);

        let err = app
            .switch_to(ScreenRequest::WordCheckAnswer {
                genre,
                quiz: finished,
            })
            .unwrap_err();
        assert!(matches!(err, Error::Navigation(NavigationError::QuizFinished)));
        assert_eq!(app.screen.kind(), ScreenKind::WordCheck);
    }

    #[test]
    fn test_start_quiz_uses_all_given_words() {
        let mut app = make_app();
        let genre = add_genre(&app, "Animals");
        let words: Vec<Word> = ["Cat", "Dog", "Owl"]
            .iter()
            .map(|w| add_word(&app, &genre, w))
            .collect();

        app.start_quiz(genre, words.clone()).unwrap();
        let Screen::WordCheck(screen) = &app.screen else {
            panic!("expected quiz question screen");
        };
        assert_eq!(screen.quiz.cursor, 0);
        let mut ids: Vec<i64> = screen.quiz.words.iter().map(|w| w.id).collect();
        ids.sort();
        assert_eq!(ids, words.iter().map(|w| w.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_open_word_list_applies_filter() {
        let mut app = make_app();
        let genre = add_genre(&app, "Animals");
        let cat = add_word(&app, &genre, "Cat");
        add_word(&app, &genre, "Dog");
        app.store.update_word_confidence(cat.id, true).unwrap();

        app.open_word_list(genre, ConfidenceFilter::Confident).unwrap();
        let Screen::WordList(list) = &app.screen else {
            panic!("expected word list");
        };
        assert_eq!(list.filter, ConfidenceFilter::Confident);
        assert_eq!(list.words.len(), 1);
        assert_eq!(list.words[0].word, "Cat");
    }

    #[test]
    fn test_report_sets_error_status() {
        let mut app = make_app();
        app.report(&NavigationError::QuizFinished.into());
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "the quiz is already finished");
    }

    #[test]
    fn test_pending_delete_prompt_names_target() {
        let genre = Genre {
            id: 1,
            name: "Animals".to_string(),
        };
        assert!(PendingDelete::Genre(genre).prompt().contains("Animals"));
    }

    #[test]
    fn test_shutdown_closes_store() {
        let app = make_app();
        app.shutdown().unwrap();
    }
}
