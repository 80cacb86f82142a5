//! Application state and core TUI types.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use postboard_core::PresentationUnit;
use postboard_interface::{Board, FailureNotice, LayoutHints};

/// Application mode determines which view is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppMode {
    /// Grid view - browse post cards
    Grid,
    /// Detail view - one post in full
    Detail,
    /// Failure view - the run could not produce a board
    Failed,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Current mode
    pub mode: AppMode,
    /// Board title
    pub title: String,
    /// Layout hints from the pipeline
    pub layout: LayoutHints,
    /// Ranked units, in rank order
    pub units: Vec<PresentationUnit>,
    /// Currently selected card
    pub selected_index: usize,
    /// Non-blocking notice (dropped rows)
    pub notice: Option<String>,
    /// Failure details when the run failed
    pub failure: Option<FailureNotice>,
    /// Whether to quit the application
    pub should_quit: bool,
}

impl App {
    /// Builds the app state for a board, reading its units once.
    pub fn from_board(board: Board) -> Self {
        match board {
            Board::Ready(leaderboard) => {
                let (title, layout, notice, units) = leaderboard.into_parts();
                Self {
                    mode: AppMode::Grid,
                    title,
                    layout,
                    units: units.collect(),
                    selected_index: 0,
                    notice,
                    failure: None,
                    should_quit: false,
                }
            }
            Board::Failed(failure) => Self {
                mode: AppMode::Failed,
                title: failure.title().clone(),
                layout: LayoutHints::default(),
                units: Vec::new(),
                selected_index: 0,
                notice: None,
                failure: Some(failure),
                should_quit: false,
            },
        }
    }

    /// Number of card columns, at least one.
    pub fn columns(&self) -> usize {
        usize::from(*self.layout.columns()).max(1)
    }

    /// The selected unit, if any.
    pub fn selected(&self) -> Option<&PresentationUnit> {
        self.units.get(self.selected_index)
    }

    /// Move selection one card left.
    pub fn select_left(&mut self) {
        if self.selected_index % self.columns() > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection one card right.
    pub fn select_right(&mut self) {
        let next = self.selected_index + 1;
        if next % self.columns() != 0 && next < self.units.len() {
            self.selected_index = next;
        }
    }

    /// Move selection one row up.
    pub fn select_up(&mut self) {
        if self.selected_index >= self.columns() {
            self.selected_index -= self.columns();
        }
    }

    /// Move selection one row down.
    pub fn select_down(&mut self) {
        let next = self.selected_index + self.columns();
        if next < self.units.len() {
            self.selected_index = next;
        }
    }

    /// Enter detail view for the selected card.
    pub fn enter_detail(&mut self) {
        if self.mode == AppMode::Grid && self.selected().is_some() {
            self.mode = AppMode::Detail;
        }
    }

    /// Return to the grid, or quit when already there.
    pub fn back(&mut self) {
        match self.mode {
            AppMode::Detail => self.mode = AppMode::Grid,
            AppMode::Grid | AppMode::Failed => self.quit(),
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Applies a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Esc => self.back(),
            _ if self.mode != AppMode::Grid => {}
            KeyCode::Left | KeyCode::Char('h') => self.select_left(),
            KeyCode::Right | KeyCode::Char('l') => self.select_right(),
            KeyCode::Up | KeyCode::Char('k') => self.select_up(),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(),
            KeyCode::Enter => self.enter_detail(),
            _ => {}
        }
    }
}
