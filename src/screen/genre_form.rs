use crate::store::Genre;
use crate::ui::text_input::TextInput;

/// Add (no genre) or rename (existing genre) form.
#[derive(Debug)]
pub struct GenreForm {
    pub genre: Option<Genre>,
    pub name: TextInput,
}

impl GenreForm {
    pub fn add() -> Self {
        Self {
            genre: None,
            name: TextInput::new(""),
        }
    }

    pub fn edit(genre: Genre) -> Self {
        let name = TextInput::new(&genre.name);
        Self {
            genre: Some(genre),
            name,
        }
    }
}
