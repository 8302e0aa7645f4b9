use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use std::io::{self, Stdout};

use crate::board::{Board, Card, ColumnId};
use crate::config::{Config, ThemeConfig};
use crate::edit::{EditField, EditSession};

use super::input::InputMode;
use super::selection::Selection;

/// Helper to convert hex color string to ratatui Color
fn hex_to_color(hex: &str) -> Color {
    ThemeConfig::parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Build footer help text based on current UI state
fn build_footer_text(state: &AppState) -> String {
    if state.delete_confirm.is_some() {
        return " [y] delete  [n/Esc] cancel ".to_string();
    }
    if state.edit_session.is_some() {
        return " [Tab] switch field  [Ctrl+s] save  [Esc] cancel ".to_string();
    }
    match state.input_mode {
        InputMode::Normal => {
            " [h/j/k/l] navigate  [o] new card  [Enter] edit  [x] delete  [q] quit ".to_string()
        }
        InputMode::InputTitle => " Enter card title... [Esc] cancel [Enter] next ".to_string(),
        InputMode::InputDescription => {
            " Enter card description (optional)... [Esc] cancel [Enter] save ".to_string()
        }
    }
}

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Card cell height on the board (1 title + 4 preview lines + 2 borders)
const CARD_HEIGHT: u16 = 7;

/// State for the delete confirmation popup
#[derive(Debug, Clone)]
struct DeleteConfirmPopup {
    column_id: ColumnId,
    card_id: String,
    card_title: String,
}

/// Application state (separate from terminal for borrow checker)
struct AppState {
    should_quit: bool,
    board: Board,
    selection: Selection,
    config: Config,
    // New-card input overlay
    input_mode: InputMode,
    input_buffer: String,
    input_cursor: usize, // Cursor position in input_buffer
    pending_card_title: String,
    // Card under edit, if any
    edit_session: Option<EditSession>,
    // Delete confirmation
    delete_confirm: Option<DeleteConfirmPopup>,
}

impl AppState {
    fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            board: Board::seed(),
            selection: Selection::new(),
            config,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_cursor: 0,
            pending_card_title: String::new(),
            edit_session: None,
            delete_confirm: None,
        }
    }

    /// Dispatch a key press to the active surface. Exactly one synchronous
    /// state transition happens per call.
    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        // Popups are modal and take priority over everything else
        if self.delete_confirm.is_some() {
            self.handle_delete_confirm_key(key.code);
            return;
        }

        if self.edit_session.is_some() {
            self.handle_edit_key(key);
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key.code),
            InputMode::InputTitle => self.handle_title_input(key.code),
            InputMode::InputDescription => self.handle_description_input(key.code),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('h') | KeyCode::Left => self.selection.move_left(&self.board),
            KeyCode::Char('l') | KeyCode::Right => self.selection.move_right(&self.board),
            KeyCode::Char('j') | KeyCode::Down => self.selection.move_down(&self.board),
            KeyCode::Char('k') | KeyCode::Up => self.selection.move_up(),
            KeyCode::Char('o') | KeyCode::Char('a') => {
                // New card in the selected column
                self.input_mode = InputMode::InputTitle;
                self.input_buffer.clear();
                self.input_cursor = 0;
                self.pending_card_title.clear();
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                // Edit the selected card
                if let Some(card) = self.selection.card(&self.board) {
                    self.edit_session =
                        Some(EditSession::start(self.selection.column_id(), card));
                }
            }
            KeyCode::Char('x') => {
                if let Some(card) = self.selection.card(&self.board) {
                    self.delete_confirm = Some(DeleteConfirmPopup {
                        column_id: self.selection.column_id(),
                        card_id: card.id.clone(),
                        card_title: card.title.clone(),
                    });
                }
            }
            _ => {}
        }
    }

    fn handle_title_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.reset_input(),
            KeyCode::Enter => {
                if self.input_buffer.trim().is_empty() {
                    // Empty title means the entry was abandoned
                    self.reset_input();
                } else {
                    self.pending_card_title = self.input_buffer.clone();
                    self.input_buffer.clear();
                    self.input_cursor = 0;
                    self.input_mode = InputMode::InputDescription;
                }
            }
            KeyCode::Left => self.input_cursor_left(),
            KeyCode::Right => self.input_cursor_right(),
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.input_cursor = self.input_buffer.len(),
            KeyCode::Backspace => self.input_backspace(),
            KeyCode::Char(c) => self.input_insert(c),
            _ => {}
        }
    }

    fn handle_description_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.reset_input(),
            KeyCode::Enter => {
                self.board = self.board.add_card(
                    self.selection.column_id(),
                    &self.pending_card_title,
                    &self.input_buffer,
                );
                self.reset_input();
            }
            KeyCode::Left => self.input_cursor_left(),
            KeyCode::Right => self.input_cursor_right(),
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.input_cursor = self.input_buffer.len(),
            KeyCode::Backspace => self.input_backspace(),
            KeyCode::Char(c) => self.input_insert(c),
            _ => {}
        }
    }

    // The cursor is a byte offset into input_buffer and must always sit on
    // a char boundary, so every move steps by the width of the adjacent
    // character rather than by one.

    fn input_cursor_left(&mut self) {
        if let Some(c) = self.input_buffer[..self.input_cursor].chars().next_back() {
            self.input_cursor -= c.len_utf8();
        }
    }

    fn input_cursor_right(&mut self) {
        if let Some(c) = self.input_buffer[self.input_cursor..].chars().next() {
            self.input_cursor += c.len_utf8();
        }
    }

    fn input_backspace(&mut self) {
        if let Some(c) = self.input_buffer[..self.input_cursor].chars().next_back() {
            self.input_cursor -= c.len_utf8();
            self.input_buffer.remove(self.input_cursor);
        }
    }

    fn input_insert(&mut self, c: char) {
        self.input_buffer.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    fn handle_edit_key(&mut self, key: crossterm::event::KeyEvent) {
        use crossterm::event::KeyModifiers;

        if let Some(ref mut session) = self.edit_session {
            match key.code {
                KeyCode::Esc => {
                    // Discard the working copy, board untouched
                    self.edit_session = None;
                }
                KeyCode::Tab => session.toggle_field(),
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.save_edit();
                }
                KeyCode::Enter => {
                    if session.field == EditField::Title {
                        // Enter in title: move to description editing
                        session.field = EditField::Description;
                    } else {
                        session.push_char('\n');
                    }
                }
                KeyCode::Backspace => session.pop_char(),
                KeyCode::Char(c) => session.push_char(c),
                _ => {}
            }
        }
    }

    fn handle_delete_confirm_key(&mut self, key: KeyCode) {
        if let Some(popup) = self.delete_confirm.clone() {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    // Confirmed - delete the card
                    self.delete_confirm = None;
                    self.perform_delete(popup.column_id, &popup.card_id);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    // Cancelled
                    self.delete_confirm = None;
                }
                _ => {}
            }
        }
    }

    /// Commit the edit session's working copy to the board. A no-op when the
    /// target card no longer exists (the store ignores unknown ids).
    fn save_edit(&mut self) {
        if let Some(session) = self.edit_session.take() {
            self.board = self.board.update_card(
                session.column_id,
                &session.card_id,
                &session.title,
                &session.description,
            );
        }
    }

    fn perform_delete(&mut self, column_id: ColumnId, card_id: &str) {
        self.board = self.board.delete_card(column_id, card_id);

        // An edit session pointing at the deleted card must not outlive it
        if self
            .edit_session
            .as_ref()
            .is_some_and(|s| s.targets(card_id))
        {
            self.edit_session = None;
        }

        self.selection.clamp_row(&self.board);
    }

    fn reset_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.pending_card_title.clear();
    }
}

pub struct App {
    terminal: Terminal,
    state: AppState,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state: AppState::new(config),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        while !self.state.should_quit {
            self.draw()?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.state.handle_key(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        self.terminal.draw(|frame| {
            let area = frame.area();
            Self::draw_board(state, frame, area);
        })?;

        Ok(())
    }

    fn draw_board(state: &AppState, frame: &mut Frame, area: Rect) {
        // Main layout: header, board, footer
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(area);

        // Header
        let header = Paragraph::new(" My Kanban Board ")
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Board columns (3 columns: To Do, In Progress, Done)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(chunks[1]);

        for (i, column) in state.board.columns.iter().enumerate() {
            let is_selected_column = state.selection.column == i;

            let title = format!(" {} ({}) ", column.title, column.cards.len());
            let (border_style, title_style) = if is_selected_column {
                (
                    Style::default().fg(hex_to_color(&state.config.theme.color_selected)),
                    Style::default().fg(hex_to_color(&state.config.theme.color_selected)),
                )
            } else {
                (
                    Style::default().fg(hex_to_color(&state.config.theme.color_normal)),
                    Style::default().fg(hex_to_color(&state.config.theme.color_column_header)),
                )
            };

            let max_visible_cards = (columns[i].height.saturating_sub(2) / CARD_HEIGHT) as usize;

            // Scroll so the selected card stays visible
            let scroll_offset = if is_selected_column && column.cards.len() > max_visible_cards {
                let selected = state.selection.row;
                if selected >= max_visible_cards {
                    selected - max_visible_cards + 1
                } else {
                    0
                }
            } else {
                0
            };

            let needs_scrollbar = column.cards.len() > max_visible_cards;

            // Draw column border
            let column_block = Block::default()
                .title(title)
                .title_style(title_style)
                .borders(Borders::ALL)
                .border_style(border_style);
            let inner_area = column_block.inner(columns[i]);
            frame.render_widget(column_block, columns[i]);

            // Render cards with scroll offset
            let visible_cards: Vec<_> = column
                .cards
                .iter()
                .skip(scroll_offset)
                .take(max_visible_cards)
                .collect();
            for (j, card) in visible_cards.iter().enumerate() {
                let actual_index = scroll_offset + j;
                let is_selected = is_selected_column && state.selection.row == actual_index;

                let card_area = Rect {
                    x: inner_area.x,
                    y: inner_area.y + (j as u16 * CARD_HEIGHT),
                    width: if needs_scrollbar {
                        inner_area.width.saturating_sub(1)
                    } else {
                        inner_area.width
                    },
                    height: CARD_HEIGHT.min(inner_area.height.saturating_sub(j as u16 * CARD_HEIGHT)),
                };

                if card_area.height < 3 {
                    break;
                }

                Self::draw_card(frame, card, card_area, is_selected, &state.config.theme);
            }

            // Draw scrollbar if needed (columns too small for one get none)
            if needs_scrollbar && inner_area.width > 0 && inner_area.height > 0 {
                let scrollbar_area = Rect {
                    x: inner_area.x + inner_area.width - 1,
                    y: inner_area.y,
                    width: 1,
                    height: inner_area.height,
                };

                let total_cards = column.cards.len();
                let scrollbar_height = inner_area.height as usize;
                let thumb_height = (max_visible_cards * scrollbar_height / total_cards).max(1);
                let thumb_pos = (scroll_offset * scrollbar_height / total_cards)
                    .min(scrollbar_height.saturating_sub(thumb_height));

                for y in 0..scrollbar_height {
                    let char = if y >= thumb_pos && y < thumb_pos + thumb_height {
                        "█"
                    } else {
                        "░"
                    };
                    let style = Style::default().fg(hex_to_color(&state.config.theme.color_dimmed));
                    frame.render_widget(
                        Paragraph::new(char).style(style),
                        Rect {
                            x: scrollbar_area.x,
                            y: scrollbar_area.y + y as u16,
                            width: 1,
                            height: 1,
                        },
                    );
                }
            }
        }

        // Footer with help
        let footer_text = build_footer_text(state);
        let footer = Paragraph::new(footer_text.as_str())
            .style(Style::default().fg(hex_to_color(&state.config.theme.color_dimmed)))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);

        // New-card input overlay
        if state.input_mode == InputMode::InputTitle
            || state.input_mode == InputMode::InputDescription
        {
            Self::draw_input_overlay(state, frame, area);
        }

        // Edit popup
        if let Some(ref session) = state.edit_session {
            Self::draw_edit_popup(session, frame, area, &state.config.theme);
        }

        // Delete confirmation popup
        if let Some(ref popup) = state.delete_confirm {
            Self::draw_delete_popup(popup, frame, area, &state.config.theme);
        }
    }

    fn draw_input_overlay(state: &AppState, frame: &mut Frame, area: Rect) {
        let input_area = centered_rect(50, 40, area);
        frame.render_widget(Clear, input_area);

        let column_title = state.selection.column_id().title();
        let title = format!(" New Card · {} ", column_title);
        let label = match state.input_mode {
            InputMode::InputTitle => "Title: ",
            _ => "Description: ",
        };

        // Insert cursor (█) at the correct position
        let (before_cursor, after_cursor) = state
            .input_buffer
            .split_at(state.input_cursor.min(state.input_buffer.len()));
        let full_text = if state.input_mode == InputMode::InputDescription {
            format!(
                "Title: {}\n\n{}{}█{}",
                state.pending_card_title, label, before_cursor, after_cursor
            )
        } else {
            format!("{}{}█{}", label, before_cursor, after_cursor)
        };

        let input = Paragraph::new(full_text)
            .style(Style::default().fg(hex_to_color(&state.config.theme.color_text)))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(
                        Style::default().fg(hex_to_color(&state.config.theme.color_selected)),
                    ),
            );
        frame.render_widget(input, input_area);
    }

    fn draw_edit_popup(session: &EditSession, frame: &mut Frame, area: Rect, theme: &ThemeConfig) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let popup_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title input
                Constraint::Min(0),    // Description input
                Constraint::Length(1), // Help line
            ])
            .margin(1)
            .split(popup_area);

        // Main border
        let main_block = Block::default()
            .title(" Edit Card ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(hex_to_color(&theme.color_popup_border)));
        frame.render_widget(main_block, popup_area);

        let editing_title = session.field == EditField::Title;

        // Title input
        let title_style = if editing_title {
            Style::default().fg(hex_to_color(&theme.color_selected))
        } else {
            Style::default().fg(Color::White)
        };
        let title_border = if editing_title {
            Style::default().fg(hex_to_color(&theme.color_selected))
        } else {
            Style::default().fg(hex_to_color(&theme.color_dimmed))
        };
        let title_cursor = if editing_title { "█" } else { "" };
        let title_input = Paragraph::new(format!("{}{}", session.title, title_cursor))
            .style(title_style)
            .block(
                Block::default()
                    .title(" Title ")
                    .borders(Borders::ALL)
                    .border_style(title_border),
            );
        frame.render_widget(title_input, popup_chunks[0]);

        // Description input
        let body_style = if !editing_title {
            Style::default().fg(hex_to_color(&theme.color_selected))
        } else {
            Style::default().fg(Color::White)
        };
        let body_border = if !editing_title {
            Style::default().fg(hex_to_color(&theme.color_selected))
        } else {
            Style::default().fg(hex_to_color(&theme.color_dimmed))
        };
        let body_cursor = if !editing_title { "█" } else { "" };
        let body_input = Paragraph::new(format!("{}{}", session.description, body_cursor))
            .style(body_style)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Description ")
                    .borders(Borders::ALL)
                    .border_style(body_border),
            );
        frame.render_widget(body_input, popup_chunks[1]);

        // Help line
        let help = Paragraph::new(" [Tab] switch field  [Ctrl+s] save  [Esc] cancel ")
            .style(Style::default().fg(hex_to_color(&theme.color_dimmed)));
        frame.render_widget(help, popup_chunks[2]);
    }

    fn draw_delete_popup(
        popup: &DeleteConfirmPopup,
        frame: &mut Frame,
        area: Rect,
        theme: &ThemeConfig,
    ) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let main_block = Block::default()
            .title(" Delete Card? ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(main_block, popup_area);

        let inner = popup_area.inner(ratatui::layout::Margin {
            horizontal: 2,
            vertical: 2,
        });
        let text = format!(
            "Are you sure you want to delete:\n\n\"{}\"\n\n[y] Yes, delete    [n/Esc] Cancel",
            popup.card_title
        );
        let content = Paragraph::new(text)
            .style(Style::default().fg(hex_to_color(&theme.color_text)))
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: false });
        frame.render_widget(content, inner);
    }

    fn draw_card(frame: &mut Frame, card: &Card, area: Rect, is_selected: bool, theme: &ThemeConfig) {
        let border_style = if is_selected {
            Style::default().fg(hex_to_color(&theme.color_selected))
        } else {
            Style::default().fg(hex_to_color(&theme.color_normal))
        };

        let title_style = if is_selected {
            Style::default().fg(hex_to_color(&theme.color_selected)).bold()
        } else {
            Style::default().fg(hex_to_color(&theme.color_text)).bold()
        };

        // Truncate title to fit (char-safe for UTF-8)
        let max_title_len = area.width.saturating_sub(4) as usize;
        let title: String = if card.title.chars().count() > max_title_len {
            let truncated: String = card.title.chars().take(max_title_len.saturating_sub(3)).collect();
            format!("{}...", truncated)
        } else {
            card.title.clone()
        };

        let border_type = if is_selected {
            BorderType::Thick
        } else {
            BorderType::Plain
        };

        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .border_type(border_type);
        let inner = card_block.inner(area);
        frame.render_widget(card_block, area);

        // Title line
        let title_line = Paragraph::new(title).style(title_style);
        let title_area = Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: 1,
        };
        frame.render_widget(title_line, title_area);

        // Preview area (below title) - description when present
        if inner.height > 1 {
            let preview_area = Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: inner.height.saturating_sub(1),
            };

            let preview_text = card.description.as_deref().unwrap_or("No description");

            // Truncate description to fit preview area
            let max_chars = (preview_area.width as usize) * (preview_area.height as usize);
            let truncated: String = if preview_text.chars().count() > max_chars {
                format!(
                    "{}...",
                    preview_text.chars().take(max_chars.saturating_sub(3)).collect::<String>()
                )
            } else {
                preview_text.to_string()
            };

            let preview = Paragraph::new(truncated)
                .style(Style::default().fg(hex_to_color(&theme.color_description)).italic())
                .wrap(Wrap { trim: true });
            frame.render_widget(preview, preview_area);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
