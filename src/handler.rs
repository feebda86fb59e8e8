use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, PendingDelete};
use crate::error::Result;
use crate::screen::{Screen, ScreenRequest, WordField, WordListScreen, word_detail};
use crate::store::ConfidenceFilter;
use crate::ui::text_input::InputResult;
use crate::validate;

/// Route one key press to the active screen. Errors never escape: they are
/// logged and shown in the status line, and the screen stays as it was.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Confirmation dialog takes priority
    if app.confirm.is_some() {
        if let Err(err) = handle_confirm_key(app, key) {
            app.report(&err);
        }
        return;
    }

    app.status = None;
    let result = match app.screen {
        Screen::Start(_) => handle_start_key(app, key),
        Screen::AddGenre(_) | Screen::EditGenre(_) => handle_genre_form_key(app, key),
        Screen::WordList(_) => handle_word_list_key(app, key),
        Screen::AddWord(_) | Screen::EditWord(_) => handle_word_form_key(app, key),
        Screen::WordDetail(_) => handle_word_detail_key(app, key),
        Screen::WordCheck(_) => handle_word_check_key(app, key),
        Screen::WordCheckAnswer(_) => handle_word_answer_key(app, key),
    };
    if let Err(err) = result {
        app.report(&err);
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let Some(pending) = app.confirm.take() else {
                return Ok(());
            };
            match pending {
                PendingDelete::Genre(genre) => {
                    app.store.delete_genre(genre.id)?;
                    app.switch_to(ScreenRequest::Start)?;
                    app.set_info(format!("Deleted genre \"{}\"", genre.name));
                }
                PendingDelete::Word { genre, word } => {
                    app.store.delete_word(word.id)?;
                    app.open_word_list(genre, ConfidenceFilter::All)?;
                    app.set_info(format!("Deleted \"{}\"", word.word));
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm = None,
        _ => {}
    }
    Ok(())
}

fn handle_start_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let Screen::Start(screen) = &mut app.screen else {
        return Ok(());
    };
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => screen.selection.prev(),
        KeyCode::Down | KeyCode::Char('j') => screen.selection.next(),
        KeyCode::Char('a') | KeyCode::Char('+') => app.switch_to(ScreenRequest::AddGenre)?,
        KeyCode::Enter => {
            if let Some(genre) = screen.selected_genre().cloned() {
                app.open_word_list(genre, ConfidenceFilter::All)?;
            }
        }
        KeyCode::Char('e') => {
            if let Some(genre) = screen.selected_genre().cloned() {
                app.switch_to(ScreenRequest::EditGenre(genre))?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_genre_form_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let form = match &mut app.screen {
        Screen::AddGenre(form) | Screen::EditGenre(form) => form,
        _ => return Ok(()),
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
        if let Some(genre) = form.genre.clone() {
            app.confirm = Some(PendingDelete::Genre(genre));
        }
        return Ok(());
    }

    match form.name.handle(key) {
        InputResult::Cancel => app.switch_to(ScreenRequest::Start)?,
        InputResult::Submit => {
            let name = validate::required("genre name", form.name.value())?;
            match form.genre.as_ref().map(|g| g.id) {
                Some(id) => app.store.edit_genre(id, &name)?,
                None => {
                    app.store.add_genre(&name)?;
                }
            }
            app.switch_to(ScreenRequest::Start)?;
        }
        InputResult::Continue | InputResult::NextField | InputResult::PrevField => {}
    }
    Ok(())
}

fn handle_word_list_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let Screen::WordList(screen) = &mut app.screen else {
        return Ok(());
    };
    let genre = screen.genre.clone();
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => app.switch_to(ScreenRequest::Start)?,
        KeyCode::Up | KeyCode::Char('k') => screen.selection.prev(),
        KeyCode::Down | KeyCode::Char('j') => screen.selection.next(),
        KeyCode::Char('1') => app.open_word_list(genre, ConfidenceFilter::All)?,
        KeyCode::Char('2') => app.open_word_list(genre, ConfidenceFilter::Confident)?,
        KeyCode::Char('3') => app.open_word_list(genre, ConfidenceFilter::NotConfident)?,
        KeyCode::Char('a') | KeyCode::Char('+') => app.switch_to(ScreenRequest::AddWord(genre))?,
        KeyCode::Char('c') => {
            let words = screen.words.clone();
            app.start_quiz(genre, words)?;
        }
        KeyCode::Enter => {
            if let Some(word) = screen.selected_word().cloned() {
                app.switch_to(ScreenRequest::WordDetail { genre, word })?;
            }
        }
        KeyCode::Char('e') => {
            if let Some(word) = screen.selected_word().cloned() {
                app.switch_to(ScreenRequest::EditWord { genre, word })?;
            }
        }
        KeyCode::Char(' ') => {
            let Some(word) = screen.selected_word().cloned() else {
                return Ok(());
            };
            let filter = screen.filter;
            let selected = screen.selection.selected;
            app.store.update_word_confidence(word.id, !word.confidence)?;
            app.open_word_list(genre, filter)?;
            if let Screen::WordList(WordListScreen { selection, .. }) = &mut app.screen {
                selection.select(selected);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_word_form_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let form = match &mut app.screen {
        Screen::AddWord(form) | Screen::EditWord(form) => form,
        _ => return Ok(()),
    };
    let genre = form.genre.clone();

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
        if let Some(word) = form.word.clone() {
            app.confirm = Some(PendingDelete::Word { genre, word });
        }
        return Ok(());
    }

    let focus = form.focus;
    match form.focused_input().handle(key) {
        InputResult::Cancel => app.open_word_list(genre, ConfidenceFilter::All)?,
        InputResult::NextField | InputResult::PrevField => form.toggle_focus(),
        // Enter in the word field moves on; Ctrl+S saves from either field.
        InputResult::Submit
            if focus == WordField::Word && key.code == KeyCode::Enter =>
        {
            form.focus = WordField::Details;
        }
        InputResult::Submit => {
            let word = validate::required("word", form.word_input.value())?;
            let details = validate::free_text(form.details_input.value());
            match form.word.as_ref().map(|w| w.id) {
                Some(id) => app.store.edit_word(id, &word, &details)?,
                None => {
                    app.store.add_word(genre.id, &word, &details, false)?;
                }
            }
            app.open_word_list(genre, ConfidenceFilter::All)?;
        }
        InputResult::Continue => {}
    }
    Ok(())
}

fn handle_word_detail_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let Screen::WordDetail(screen) = &mut app.screen else {
        return Ok(());
    };
    let genre = screen.genre.clone();
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => app.open_word_list(genre, ConfidenceFilter::All)?,
        KeyCode::Up | KeyCode::Char('k') => screen.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => screen.scroll_down(),
        KeyCode::Char('e') => {
            let word = screen.word.clone();
            app.switch_to(ScreenRequest::EditWord { genre, word })?;
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Right | KeyCode::Char('l') => {
            let forward = matches!(key.code, KeyCode::Right | KeyCode::Char('l'));
            let current = screen.word.id;
            let words = app.store.words(genre.id)?;
            if let Some(word) = word_detail::neighbor(&words, current, forward).cloned() {
                app.switch_to(ScreenRequest::WordDetail { genre, word })?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_word_check_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let Screen::WordCheck(screen) = &mut app.screen else {
        return Ok(());
    };
    let genre = screen.genre.clone();
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => app.open_word_list(genre, ConfidenceFilter::All)?,
        KeyCode::Enter | KeyCode::Char(' ') if !screen.quiz.is_complete() => {
            let quiz = screen.quiz.clone();
            app.switch_to(ScreenRequest::WordCheckAnswer { genre, quiz })?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_word_answer_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let Screen::WordCheckAnswer(screen) = &mut app.screen else {
        return Ok(());
    };
    let genre = screen.genre.clone();
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => app.open_word_list(genre, ConfidenceFilter::All)?,
        KeyCode::Char(' ') | KeyCode::Char('c') => {
            let Some(word) = screen.quiz.current().cloned() else {
                return Ok(());
            };
            let confidence = !word.confidence;
            app.store.update_word_confidence(word.id, confidence)?;
            screen.quiz.set_confidence(word.id, confidence);
        }
        KeyCode::Enter | KeyCode::Char('n') => {
            let mut quiz = screen.quiz.clone();
            quiz.advance();
            app.switch_to(ScreenRequest::WordCheck { genre, quiz })?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StatusKind;
    use crate::config::Config;
    use crate::error::Error;
    use crate::screen::ScreenKind;
    use crate::store::{Genre, RecordStore};

    fn make_app() -> App {
        let store = RecordStore::open_in_memory().unwrap();
        App::new(Config::default(), store).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, ch: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn seeded(words: &[(&str, bool)]) -> (App, Genre) {
        let mut app = make_app();
        let id = app.store.add_genre("Animals").unwrap();
        for (word, confidence) in words {
            app.store
                .add_word(id, word, &format!("about {word}"), *confidence)
                .unwrap();
        }
        let genre = app.store.genre(id).unwrap().unwrap();
        app.switch_to(ScreenRequest::Start).unwrap();
        (app, genre)
    }

    #[test]
    fn test_add_genre_flow() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.screen.kind(), ScreenKind::AddGenre);
        type_text(&mut app, "Animals");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen.kind(), ScreenKind::Start);
        let names: Vec<String> = app.store.genres().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Animals"]);
        let Screen::Start(start) = &app.screen else {
            panic!("expected start screen");
        };
        assert_eq!(start.genres.len(), 1);
    }

    #[test]
    fn test_blank_genre_name_keeps_form() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('+'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen.kind(), ScreenKind::AddGenre);
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("genre name"));
        assert!(app.store.genres().unwrap().is_empty());
        let Screen::AddGenre(form) = &app.screen else {
            panic!("expected add genre form");
        };
        assert_eq!(form.name.value(), "   ");
    }

    #[test]
    fn test_rename_genre() {
        let (mut app, genre) = seeded(&[]);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.screen.kind(), ScreenKind::EditGenre);
        ctrl(&mut app, 'u');
        type_text(&mut app, "Pets");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen.kind(), ScreenKind::Start);
        assert_eq!(app.store.genre(genre.id).unwrap().unwrap().name, "Pets");
    }

    #[test]
    fn test_delete_genre_needs_confirmation() {
        let (mut app, genre) = seeded(&[("Cat", false)]);
        press(&mut app, KeyCode::Char('e'));
        ctrl(&mut app, 'd');
        assert!(app.confirm.is_some());

        press(&mut app, KeyCode::Char('n'));
        assert!(app.confirm.is_none());
        assert!(app.store.genre(genre.id).unwrap().is_some());
        assert_eq!(app.screen.kind(), ScreenKind::EditGenre);

        ctrl(&mut app, 'd');
        press(&mut app, KeyCode::Char('y'));
        assert!(app.store.genre(genre.id).unwrap().is_none());
        assert!(app.store.words(genre.id).unwrap().is_empty());
        assert_eq!(app.screen.kind(), ScreenKind::Start);
    }

    #[test]
    fn test_confirm_swallows_other_keys() {
        let (mut app, genre) = seeded(&[]);
        press(&mut app, KeyCode::Char('e'));
        ctrl(&mut app, 'd');
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert!(app.confirm.is_some());
        assert!(app.store.genre(genre.id).unwrap().is_some());
    }

    #[test]
    fn test_add_word_flow() {
        let (mut app, genre) = seeded(&[]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen.kind(), ScreenKind::WordList);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.screen.kind(), ScreenKind::AddWord);

        type_text(&mut app, "Cat");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "A small pet");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "meows");
        ctrl(&mut app, 's');

        assert_eq!(app.screen.kind(), ScreenKind::WordList);
        let words = app.store.words(genre.id).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "Cat");
        assert_eq!(words[0].details, "A small pet\nmeows");
        assert!(!words[0].confidence);
    }

    #[test]
    fn test_cancel_word_form_returns_to_list() {
        let (mut app, genre) = seeded(&[]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Cat");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen.kind(), ScreenKind::WordList);
        assert!(app.store.words(genre.id).unwrap().is_empty());
    }

    #[test]
    fn test_edit_and_delete_word() {
        let (mut app, genre) = seeded(&[("Cat", true), ("Dog", false)]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.screen.kind(), ScreenKind::EditWord);
        type_text(&mut app, "s");
        ctrl(&mut app, 's');

        let words = app.store.words(genre.id).unwrap();
        assert_eq!(words[0].word, "Cats");
        assert!(words[0].confidence);

        press(&mut app, KeyCode::Char('e'));
        ctrl(&mut app, 'd');
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.screen.kind(), ScreenKind::WordList);
        let words = app.store.words(genre.id).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "Dog");
    }

    #[test]
    fn test_toggle_confidence_in_list_writes_through() {
        let (mut app, genre) = seeded(&[("Cat", false), ("Dog", false)]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));

        let confident = app.store.filter_by_confidence(genre.id, true).unwrap();
        assert_eq!(confident.len(), 1);
        assert_eq!(confident[0].word, "Dog");
        let Screen::WordList(list) = &app.screen else {
            panic!("expected word list");
        };
        assert_eq!(list.selection.selected, 1);
        assert!(list.words[1].confidence);
    }

    #[test]
    fn test_filter_keys() {
        let (mut app, _) = seeded(&[("Cat", true), ("Dog", false), ("Owl", true)]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('3'));
        let Screen::WordList(list) = &app.screen else {
            panic!("expected word list");
        };
        assert_eq!(list.filter, ConfidenceFilter::NotConfident);
        assert_eq!(list.words.len(), 1);

        press(&mut app, KeyCode::Char('2'));
        let Screen::WordList(list) = &app.screen else {
            panic!("expected word list");
        };
        assert_eq!(list.words.len(), 2);
    }

    #[test]
    fn test_word_detail_wraps() {
        let (mut app, _) = seeded(&[("Cat", false), ("Dog", false)]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        let current = |app: &App| match &app.screen {
            Screen::WordDetail(s) => s.word.word.clone(),
            _ => panic!("expected word detail"),
        };
        assert_eq!(current(&app), "Cat");
        press(&mut app, KeyCode::Left);
        assert_eq!(current(&app), "Dog");
        press(&mut app, KeyCode::Right);
        assert_eq!(current(&app), "Cat");
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(current(&app), "Dog");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen.kind(), ScreenKind::WordList);
    }

    #[test]
    fn test_quiz_runs_to_completion() {
        let (mut app, genre) = seeded(&[("Cat", false), ("Dog", false), ("Owl", false)]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.screen.kind(), ScreenKind::WordCheck);

        for step in 0..3 {
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.screen.kind(), ScreenKind::WordCheckAnswer, "step {step}");
            if step == 0 {
                press(&mut app, KeyCode::Char(' '));
            }
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.screen.kind(), ScreenKind::WordCheck);
        }

        let Screen::WordCheck(screen) = &app.screen else {
            panic!("expected quiz screen");
        };
        assert!(screen.quiz.is_complete());
        // Answer is suppressed once finished.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen.kind(), ScreenKind::WordCheck);
        assert!(app.status.is_none());

        assert_eq!(app.store.filter_by_confidence(genre.id, true).unwrap().len(), 1);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen.kind(), ScreenKind::WordList);
    }

    #[test]
    fn test_quiz_over_filtered_list() {
        let (mut app, _) = seeded(&[("Cat", true), ("Dog", false), ("Owl", false)]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('c'));
        let Screen::WordCheck(screen) = &app.screen else {
            panic!("expected quiz screen");
        };
        assert_eq!(screen.quiz.len(), 2);
        assert!(screen.quiz.words.iter().all(|w| !w.confidence));
    }

    #[test]
    fn test_stale_genre_surfaces_error() {
        let (mut app, genre) = seeded(&[("Cat", false)]);
        press(&mut app, KeyCode::Enter);
        app.store.delete_genre(genre.id).unwrap();
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.screen.kind(), ScreenKind::WordList);
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        let expected: Error = crate::error::NavigationError::UnknownGenre(genre.id).into();
        assert_eq!(status.text, expected.to_string());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let (mut app, _) = seeded(&[]);
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = make_app();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert_eq!(app.screen.kind(), ScreenKind::Start);
    }
}
