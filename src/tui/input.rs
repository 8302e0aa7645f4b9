/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode - navigating the board
    Normal,
    /// Entering a new card title
    InputTitle,
    /// Entering a new card description
    InputDescription,
}

impl Default for InputMode {
    fn default() -> Self {
        Self::Normal
    }
}
