//! What the pipeline hands to a display surface.

use derive_getters::Getters;
use postboard_core::PresentationUnit;
use postboard_error::{PostboardError, PostboardErrorKind, PostboardResult};
use serde::{Deserialize, Serialize};

/// Ranked units, in rank order, readable exactly once.
pub type UnitStream = Box<dyn Iterator<Item = PresentationUnit> + Send>;

/// Layout hints a surface may honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct LayoutHints {
    /// Number of card columns
    columns: u16,
    /// Media width hint in pixels
    media_width: u32,
}

impl LayoutHints {
    /// Creates layout hints.
    pub fn new(columns: u16, media_width: u32) -> Self {
        Self {
            columns,
            media_width,
        }
    }
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self::new(2, 320)
    }
}

/// A successfully built leaderboard.
pub struct Leaderboard {
    title: String,
    layout: LayoutHints,
    units: UnitStream,
    notice: Option<String>,
}

impl Leaderboard {
    /// Creates a leaderboard.
    pub fn new(
        title: impl Into<String>,
        layout: LayoutHints,
        units: UnitStream,
        notice: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            layout,
            units,
            notice,
        }
    }

    /// Board title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Layout hints.
    pub fn layout(&self) -> LayoutHints {
        self.layout
    }

    /// Non-blocking notice (e.g. dropped rows).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Takes the unit stream, leaving the board's metadata behind.
    pub fn into_parts(self) -> (String, LayoutHints, Option<String>, UnitStream) {
        (self.title, self.layout, self.notice, self.units)
    }
}

impl std::fmt::Debug for Leaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Leaderboard")
            .field("title", &self.title)
            .field("layout", &self.layout)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}

/// Explicit failure state for a run that could not produce a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct FailureNotice {
    /// Board title
    title: String,
    /// Query identity, when the failure came from the source
    query: Option<String>,
    /// Human-readable cause
    message: String,
}

impl FailureNotice {
    /// Creates a failure notice.
    pub fn new(title: impl Into<String>, query: Option<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            query,
            message: message.into(),
        }
    }

    /// Builds a notice from a fatal pipeline error.
    pub fn from_error(title: impl Into<String>, err: &PostboardError) -> Self {
        let query = match err.kind() {
            PostboardErrorKind::Source(source) => Some(source.kind.query().to_string()),
            _ => None,
        };
        Self::new(title, query, err.to_string())
    }
}

/// The outcome of one pipeline run, as shown to a surface.
#[derive(Debug)]
pub enum Board {
    /// Ranked units ready for display
    Ready(Leaderboard),
    /// The run failed; show the failure, not an empty board
    Failed(FailureNotice),
}

impl Board {
    /// Whether the run failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Board::Failed(_))
    }
}

/// A display driver for leaderboards.
pub trait PresentationSurface {
    /// Shows the board. Consumes it: units are read exactly once.
    fn present(&mut self, board: Board) -> PostboardResult<()>;
}
