//! Plain-text presentation surface.

use postboard_core::{MediaDescriptor, PresentationUnit};
use postboard_error::{JsonError, OutputError, PostboardResult};
use postboard_interface::{Board, FailureNotice, LayoutHints, Leaderboard, PresentationSurface};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, instrument};

/// How a [`TextSurface`] prints boards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Human,
    /// JSON document
    Json,
}

/// Writes boards to any [`Write`] sink.
///
/// # Examples
///
/// ```
/// use postboard::{Board, FailureNotice, OutputFormat, PresentationSurface, TextSurface};
///
/// let mut surface = TextSurface::new(Vec::new(), OutputFormat::Human);
/// surface
///     .present(Board::Failed(FailureNotice::new("Top Posts", None, "no token")))
///     .unwrap();
/// let text = String::from_utf8(surface.into_inner()).unwrap();
/// assert!(text.contains("no token"));
/// ```
#[derive(Debug)]
pub struct TextSurface<W> {
    writer: W,
    format: OutputFormat,
}

impl TextSurface<io::Stdout> {
    /// A surface printing to stdout.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> TextSurface<W> {
    /// Creates a surface writing to `writer`.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Consumes the surface, returning the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_human(&mut self, board: Board) -> io::Result<()> {
        match board {
            Board::Ready(leaderboard) => {
                let (title, _, notice, units) = leaderboard.into_parts();
                writeln!(self.writer, "{}", title)?;
                writeln!(self.writer, "{:=<1$}", "", title.chars().count())?;
                let mut count = 0;
                for unit in units {
                    write_unit(&mut self.writer, &unit)?;
                    count += 1;
                }
                writeln!(self.writer, "{} posts", count)?;
                if let Some(notice) = notice {
                    writeln!(self.writer, "Note: {}", notice)?;
                }
            }
            Board::Failed(failure) => {
                writeln!(self.writer, "{}", failure.title())?;
                writeln!(self.writer, "{:=<1$}", "", failure.title().chars().count())?;
                writeln!(self.writer, "Error: the leaderboard could not be built")?;
                if let Some(query) = failure.query() {
                    writeln!(self.writer, "  Query: {}", query)?;
                }
                writeln!(self.writer, "  {}", failure.message())?;
            }
        }
        self.writer.flush()
    }

    fn write_json(&mut self, board: Board) -> PostboardResult<()> {
        let document = match board {
            Board::Ready(leaderboard) => BoardDocument::from_leaderboard(leaderboard),
            Board::Failed(error) => BoardDocument::Failed { error },
        };
        serde_json::to_writer_pretty(&mut self.writer, &document).map_err(JsonError::from)?;
        writeln!(self.writer).map_err(OutputError::from)?;
        self.writer.flush().map_err(OutputError::from)?;
        Ok(())
    }
}

impl<W: Write> PresentationSurface for TextSurface<W> {
    #[instrument(skip(self, board), fields(format = ?self.format, failed = board.is_failed()))]
    fn present(&mut self, board: Board) -> PostboardResult<()> {
        match self.format {
            OutputFormat::Human => self.write_human(board).map_err(OutputError::from)?,
            OutputFormat::Json => self.write_json(board)?,
        }
        debug!("Board written");
        Ok(())
    }
}

fn write_unit(w: &mut impl Write, unit: &PresentationUnit) -> io::Result<()> {
    writeln!(w, "#{:<3} {}  ({})", unit.rank(), unit.post_id(), unit.timestamp())?;
    if !unit.caption().is_empty() {
        writeln!(w, "     {}", unit.caption())?;
    }
    let metrics: Vec<String> = unit
        .metrics()
        .iter()
        .map(|m| format!("{}: {}", m.label(), m.value()))
        .collect();
    writeln!(w, "     {}", metrics.join(" | "))?;
    match unit.media() {
        MediaDescriptor::Image { uri, width } => writeln!(w, "     Image ({}px): {}", width, uri)?,
        MediaDescriptor::Video {
            uri,
            width,
            start_seconds,
        } => writeln!(w, "     Video ({}px, from {}s): {}", width, start_seconds, uri)?,
        MediaDescriptor::None => {}
    }
    writeln!(w)
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum BoardDocument {
    Ready {
        title: String,
        layout: LayoutHints,
        notice: Option<String>,
        units: Vec<PresentationUnit>,
    },
    Failed {
        error: FailureNotice,
    },
}

impl BoardDocument {
    fn from_leaderboard(leaderboard: Leaderboard) -> Self {
        let (title, layout, notice, units) = leaderboard.into_parts();
        BoardDocument::Ready {
            title,
            layout,
            notice,
            units: units.collect(),
        }
    }
}
