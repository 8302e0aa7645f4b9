use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a column on the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "inprogress",
            ColumnId::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(ColumnId::Todo),
            "inprogress" => Some(ColumnId::InProgress),
            "done" => Some(ColumnId::Done),
            _ => None,
        }
    }

    /// Display title for the column header
    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }

    /// Columns in board display order
    pub fn all() -> &'static [ColumnId] {
        &[ColumnId::Todo, ColumnId::InProgress, ColumnId::Done]
    }
}

/// A card on the kanban board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description,
            created_at: now,
            updated_at: now,
        }
    }

    fn seeded(id: &str, title: &str, description: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: Some(description.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A column holding cards in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn empty(id: ColumnId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            cards: vec![],
        }
    }
}

/// The whole board: fixed columns in fixed order.
///
/// Transitions are pure: each returns a new `Board` and leaves `self`
/// untouched. Malformed input (unknown ids, empty titles) yields an
/// unchanged copy rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// An empty board with the fixed column set
    pub fn new() -> Self {
        Self {
            columns: ColumnId::all().iter().map(|&id| Column::empty(id)).collect(),
        }
    }

    /// The initial board shown at startup
    pub fn seed() -> Self {
        let mut board = Self::new();
        board.columns[0].cards = vec![
            Card::seeded("task-1", "Setup project repository", "Initialize git and push to GitHub."),
            Card::seeded("task-2", "Define database schema", "Plan out the tables and relationships for tasks and users."),
            Card::seeded("task-3", "Create initial UI mockups", "Sketch basic layouts for the board and card views."),
        ];
        board.columns[1].cards = vec![
            Card::seeded("task-4", "Develop API for tasks", "Implement CRUD operations for tasks."),
            Card::seeded("task-5", "Build kanban column component", "Create a reusable component for columns."),
        ];
        board.columns[2].cards = vec![
            Card::seeded("task-6", "Choose a color scheme", "Decide on primary and secondary colors for the app."),
            Card::seeded("task-7", "Setup linter and formatter", "Configure lints and rustfmt for consistent code style."),
        ];
        board
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Find a card anywhere on the board
    pub fn card(&self, column_id: ColumnId, card_id: &str) -> Option<&Card> {
        self.column(column_id)
            .and_then(|c| c.cards.iter().find(|card| card.id == card_id))
    }

    /// Append a new card to the named column. A blank title is treated as
    /// a cancelled entry and returns the board unchanged.
    pub fn add_card(&self, column_id: ColumnId, title: &str, description: &str) -> Board {
        let title = title.trim();
        if title.is_empty() {
            tracing::debug!(column = column_id.as_str(), "add ignored: empty title");
            return self.clone();
        }

        let description = if description.trim().is_empty() {
            None
        } else {
            Some(description.to_string())
        };

        let card = Card::new(title, description);
        tracing::info!(column = column_id.as_str(), card = %card.id, "card added");

        let mut board = self.clone();
        if let Some(column) = board.columns.iter_mut().find(|c| c.id == column_id) {
            column.cards.push(card);
        }
        board
    }

    /// Remove a card from the named column. Unknown ids are a no-op, so
    /// repeated deletes of the same card are harmless.
    pub fn delete_card(&self, column_id: ColumnId, card_id: &str) -> Board {
        let mut board = self.clone();
        if let Some(column) = board.columns.iter_mut().find(|c| c.id == column_id) {
            let before = column.cards.len();
            column.cards.retain(|card| card.id != card_id);
            if column.cards.len() < before {
                tracing::info!(column = column_id.as_str(), card = card_id, "card deleted");
            }
        }
        board
    }

    /// Replace title and description of a card in place, keeping its id
    /// and position. Unknown ids are a no-op.
    pub fn update_card(
        &self,
        column_id: ColumnId,
        card_id: &str,
        title: &str,
        description: &str,
    ) -> Board {
        let mut board = self.clone();
        if let Some(column) = board.columns.iter_mut().find(|c| c.id == column_id) {
            if let Some(card) = column.cards.iter_mut().find(|card| card.id == card_id) {
                card.title = title.to_string();
                card.description = if description.is_empty() {
                    None
                } else {
                    Some(description.to_string())
                };
                card.updated_at = Utc::now();
                tracing::info!(column = column_id.as_str(), card = card_id, "card updated");
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
