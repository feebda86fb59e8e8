use crate::store::Genre;
use crate::ui::components::selection::Selection;

#[derive(Debug)]
pub struct StartScreen {
    pub genres: Vec<Genre>,
    pub selection: Selection,
}

impl StartScreen {
    pub fn new(genres: Vec<Genre>) -> Self {
        let selection = Selection::new(genres.len());
        Self { genres, selection }
    }

    pub fn selected_genre(&self) -> Option<&Genre> {
        self.selection.index().and_then(|i| self.genres.get(i))
    }
}
