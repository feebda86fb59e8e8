use crate::store::{Genre, Word};

#[derive(Debug)]
pub struct WordDetailScreen {
    pub genre: Genre,
    pub word: Word,
    /// First visible line of the details pane.
    pub scroll: u16,
}

impl WordDetailScreen {
    pub fn new(genre: Genre, word: Word) -> Self {
        Self {
            genre,
            word,
            scroll: 0,
        }
    }

    pub fn scroll_down(&mut self) {
        let lines = self.word.details.lines().count() as u16;
        if self.scroll + 1 < lines {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// The word after (or before) `current_id` in `words`, wrapping at both ends.
/// Falls back to the first word when `current_id` is no longer in the list.
pub fn neighbor(words: &[Word], current_id: i64, forward: bool) -> Option<&Word> {
    if words.is_empty() {
        return None;
    }
    let Some(index) = words.iter().position(|w| w.id == current_id) else {
        return words.first();
    };
    let len = words.len();
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    words.get(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ids: &[i64]) -> Vec<Word> {
        ids.iter()
            .map(|&id| Word {
                id,
                genre_id: 1,
                word: format!("w{id}"),
                details: String::new(),
                confidence: false,
            })
            .collect()
    }

    #[test]
    fn test_neighbor_wraps_forward() {
        let list = words(&[4, 7, 9]);
        assert_eq!(neighbor(&list, 4, true).map(|w| w.id), Some(7));
        assert_eq!(neighbor(&list, 9, true).map(|w| w.id), Some(4));
    }

    #[test]
    fn test_neighbor_wraps_backward() {
        let list = words(&[4, 7, 9]);
        assert_eq!(neighbor(&list, 7, false).map(|w| w.id), Some(4));
        assert_eq!(neighbor(&list, 4, false).map(|w| w.id), Some(9));
    }

    #[test]
    fn test_neighbor_single_and_missing() {
        let one = words(&[5]);
        assert_eq!(neighbor(&one, 5, true).map(|w| w.id), Some(5));
        assert_eq!(neighbor(&one, 5, false).map(|w| w.id), Some(5));
        let list = words(&[4, 7]);
        assert_eq!(neighbor(&list, 99, true).map(|w| w.id), Some(4));
        assert!(neighbor(&[], 1, true).is_none());
    }

    #[test]
    fn test_scroll_stays_within_details() {
        let mut screen = WordDetailScreen::new(
            Genre {
                id: 1,
                name: "g".to_string(),
            },
            Word {
                id: 1,
                genre_id: 1,
                word: "w".to_string(),
                details: "a\nb\nc".to_string(),
                confidence: false,
            },
        );
        screen.scroll_up();
        assert_eq!(screen.scroll, 0);
        for _ in 0..5 {
            screen.scroll_down();
        }
        assert_eq!(screen.scroll, 2);
    }
}
