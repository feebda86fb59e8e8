/// Cursor over a list of rows that wraps at both ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected: usize,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The selected index, or `None` for an empty list.
    pub fn index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.selected)
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.len - 1;
        }
    }

    /// Select `index`, clamped to the last row.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.len.saturating_sub(1));
    }
}
