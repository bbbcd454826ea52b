//! Saved profiles screen — read-only table of persisted records.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

use crate::model::Profile;
use crate::storage::ProfileStore;
use crate::tui::action::Action;
use crate::tui::app::Screen;

/// State for the saved profiles screen.
#[derive(Debug, Clone, Default)]
pub struct SavedState {
    profiles: Vec<Profile>,
    selected: usize,
    error: Option<String>,
}

impl SavedState {
    /// Creates an empty saved-profiles state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads the profile collection from the store.
    ///
    /// A load failure keeps the previous rows and records the error for
    /// display.
    pub fn refresh(&mut self, store: &ProfileStore) {
        match store.load_profiles() {
            Ok(profiles) => {
                self.profiles = profiles;
                self.error = None;
                if self.selected >= self.profiles.len() {
                    self.selected = self.profiles.len().saturating_sub(1);
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if self.selected + 1 < self.profiles.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Esc | KeyCode::Char('q') => Action::Navigate(Screen::Entry),
            _ => Action::None,
        }
    }

    /// Returns the loaded profiles.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Returns the selected row index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Returns the load error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Renders the saved profiles screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_profile_list(state: &SavedState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Saved Profiles ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [table_area, error_area, footer_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    if state.profiles().is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No profiles saved yet.",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(empty, table_area);
    } else {
        let rows: Vec<Row> = state
            .profiles()
            .iter()
            .map(|p| {
                Row::new(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.email.clone(),
                    p.phone.clone(),
                    format!("{}, {}, {}", p.city, p.province, p.country),
                    p.created_at.format("%Y-%m-%d").to_string(),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(16),
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(10),
        ];

        let header = Row::new(vec!["Id", "Name", "Email", "Phone", "Location", "Created"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(Style::default().bg(Color::DarkGray));

        let mut table_state = TableState::default();
        table_state.select(Some(state.selected()));
        frame.render_stateful_widget(table, table_area, &mut table_state);
    }

    if let Some(err) = state.error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let footer = Paragraph::new(Line::from("Up/Down: select  Esc: back"))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use tempfile::tempdir;

    use super::*;
    use crate::model::{PictureFile, ProfileDraft, Province};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn store_with_profiles(n: usize) -> (tempfile::TempDir, ProfileStore) {
        let dir = tempdir().unwrap();
        let store = ProfileStore::with_path(dir.path().join("store")).unwrap();
        let png = dir.path().join("pic.png");
        fs::write(&png, b"\x89PNGfake").unwrap();
        for i in 0..n {
            let draft = ProfileDraft::new(
                format!("User{i}"),
                "user@example.com".to_string(),
                "1234567".to_string(),
                String::new(),
                "Pokhara".to_string(),
                String::new(),
                Province::P4,
                "Nepal".to_string(),
                PictureFile::from_path(&png),
            )
            .unwrap();
            store.append_profile(draft).unwrap();
        }
        (dir, store)
    }

    #[test]
    fn refresh_loads_all_profiles() {
        let (_dir, store) = store_with_profiles(3);
        let mut state = SavedState::new();
        state.refresh(&store);
        assert_eq!(state.profiles().len(), 3);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn refresh_on_empty_store() {
        let (_dir, store) = store_with_profiles(0);
        let mut state = SavedState::new();
        state.refresh(&store);
        assert_eq!(state.profiles().len(), 0);
    }

    #[test]
    fn refresh_records_load_error() {
        let (_dir, store) = store_with_profiles(0);
        fs::write(store.profiles_path(), "{corrupt").unwrap();
        let mut state = SavedState::new();
        state.refresh(&store);
        assert!(state.error().is_some());
    }

    #[test]
    fn selection_moves_and_clamps() {
        let (_dir, store) = store_with_profiles(2);
        let mut state = SavedState::new();
        state.refresh(&store);

        state.handle_key(press(KeyCode::Down));
        assert_eq!(state.selected(), 1);
        state.handle_key(press(KeyCode::Down));
        assert_eq!(state.selected(), 1);
        state.handle_key(press(KeyCode::Up));
        assert_eq!(state.selected(), 0);
        state.handle_key(press(KeyCode::Up));
        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn selection_clamped_after_refresh_shrinks_list() {
        let (_dir, store) = store_with_profiles(3);
        let mut state = SavedState::new();
        state.refresh(&store);
        state.handle_key(press(KeyCode::Down));
        state.handle_key(press(KeyCode::Down));
        assert_eq!(state.selected(), 2);

        fs::write(store.profiles_path(), "[]").unwrap();
        state.refresh(&store);
        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn esc_navigates_back_to_entry() {
        let mut state = SavedState::new();
        assert_eq!(
            state.handle_key(press(KeyCode::Esc)),
            Action::Navigate(Screen::Entry)
        );
    }

    #[test]
    fn q_navigates_back_to_entry() {
        let mut state = SavedState::new();
        assert_eq!(
            state.handle_key(press(KeyCode::Char('q'))),
            Action::Navigate(Screen::Entry)
        );
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render_list(state: &SavedState, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_profile_list(state, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn renders_empty_placeholder() {
            let state = SavedState::new();
            let output = render_list(&state, 100, 20);
            assert!(output.contains("No profiles saved yet."));
        }

        #[test]
        fn renders_profile_rows() {
            let (_dir, store) = store_with_profiles(2);
            let mut state = SavedState::new();
            state.refresh(&store);
            let output = render_list(&state, 110, 20);
            assert!(output.contains("User0"));
            assert!(output.contains("User1"));
            assert!(output.contains("user@example.com"));
            assert!(output.contains("Province 4"));
        }

        #[test]
        fn renders_error_line() {
            let (_dir, store) = store_with_profiles(0);
            fs::write(store.profiles_path(), "{corrupt").unwrap();
            let mut state = SavedState::new();
            state.refresh(&store);
            let output = render_list(&state, 100, 20);
            assert!(output.contains("JSON error"));
        }
    }
}
