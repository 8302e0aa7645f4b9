use crate::board::{Card, ColumnId};

/// Which field of the edit form currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
}

/// Working copy of a card under edit.
///
/// At most one session exists at a time (held as `Option<EditSession>` by
/// the app). Field edits land here and only reach the board on save; cancel
/// drops the session and the board never sees the typed text.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub column_id: ColumnId,
    pub card_id: String,
    pub title: String,
    pub description: String,
    pub field: EditField,
}

impl EditSession {
    /// Start editing a card, seeding the working copy from its current values
    pub fn start(column_id: ColumnId, card: &Card) -> Self {
        Self {
            column_id,
            card_id: card.id.clone(),
            title: card.title.clone(),
            description: card.description.clone().unwrap_or_default(),
            field: EditField::Title,
        }
    }

    /// Whether this session is editing the given card
    pub fn targets(&self, card_id: &str) -> bool {
        self.card_id == card_id
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            EditField::Title => EditField::Description,
            EditField::Description => EditField::Title,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.field {
            EditField::Title => self.title.push(c),
            EditField::Description => self.description.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.field {
            EditField::Title => {
                self.title.pop();
            }
            EditField::Description => {
                self.description.pop();
            }
        }
    }
}
