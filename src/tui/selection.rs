use crate::board::{Board, Card, ColumnId};

/// Cursor position on the kanban board
#[derive(Debug)]
pub struct Selection {
    pub column: usize,
    pub row: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self { column: 0, row: 0 }
    }

    /// Id of the column under the cursor
    pub fn column_id(&self) -> ColumnId {
        ColumnId::all()
            .get(self.column)
            .copied()
            .unwrap_or(ColumnId::Todo)
    }

    /// The card under the cursor, if any
    pub fn card<'a>(&self, board: &'a Board) -> Option<&'a Card> {
        board
            .columns
            .get(self.column)
            .and_then(|c| c.cards.get(self.row))
    }

    /// Move selection left
    pub fn move_left(&mut self, board: &Board) {
        if self.column > 0 {
            self.column -= 1;
            self.clamp_row(board);
        }
    }

    /// Move selection right
    pub fn move_right(&mut self, board: &Board) {
        if self.column < ColumnId::all().len() - 1 {
            self.column += 1;
            self.clamp_row(board);
        }
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
        }
    }

    /// Move selection down
    pub fn move_down(&mut self, board: &Board) {
        let count = self.column_len(board);
        if self.row < count.saturating_sub(1) {
            self.row += 1;
        }
    }

    /// Ensure the row is valid for the current column
    pub fn clamp_row(&mut self, board: &Board) {
        let count = self.column_len(board);
        if count == 0 {
            self.row = 0;
        } else if self.row >= count {
            self.row = count - 1;
        }
    }

    fn column_len(&self, board: &Board) -> usize {
        board.columns.get(self.column).map_or(0, |c| c.cards.len())
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
