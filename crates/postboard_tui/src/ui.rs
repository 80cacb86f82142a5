//! UI rendering for TUI.

use crate::app::{App, AppMode};
use postboard_core::{MediaDescriptor, PresentationUnit};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Height of one post card, borders included.
pub const CARD_HEIGHT: u16 = 8;

/// Draw the main UI.
#[tracing::instrument(skip_all)]
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    match app.mode {
        AppMode::Grid => draw_grid_view(f, app, chunks[1]),
        AppMode::Detail => draw_detail_view(f, app, chunks[1]),
        AppMode::Failed => draw_failure_view(f, app, chunks[1]),
    }

    draw_status_bar(f, app, chunks[2]);
}

#[tracing::instrument(skip_all)]
fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(app.title.as_str())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Draw the status bar with the notice and help text.
#[tracing::instrument(skip_all)]
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Grid => "←↓↑→/hjkl: Navigate | Enter: Detail | Q: Quit",
        AppMode::Detail => "Esc: Back | Q: Quit",
        AppMode::Failed => "Esc/Q: Quit",
    };

    let mut spans = Vec::new();
    if let Some(notice) = &app.notice {
        spans.push(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(" | "));
    } else if app.mode != AppMode::Failed {
        spans.push(Span::raw(format!("{} posts | ", app.units.len())));
    }
    spans.push(Span::raw(help_text));

    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}

/// Draw the card grid, scrolled so the selected card is visible.
#[tracing::instrument(skip_all)]
fn draw_grid_view(f: &mut Frame, app: &App, area: Rect) {
    if app.units.is_empty() {
        let empty = Paragraph::new("No posts to show")
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let columns = app.columns();
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let selected_row = app.selected_index / columns;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);
    let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row_area);
        for (column, cell) in cells.iter().enumerate() {
            let index = (first_row + row_offset) * columns + column;
            if let Some(unit) = app.units.get(index) {
                draw_card(f, unit, index == app.selected_index, *cell);
            }
        }
    }
}

fn draw_card(f: &mut Frame, unit: &PresentationUnit, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let scorecards: Vec<String> = unit
        .metrics()
        .iter()
        .map(|m| format!("{}: {}", m.label(), m.value()))
        .collect();
    let lines = vec![
        Line::from(Span::styled(
            unit.timestamp().as_str(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(unit.caption().as_str()),
        Line::from(scorecards[..scorecards.len().min(3)].join("  ")),
        Line::from(scorecards[scorecards.len().min(3)..].join("  ")),
        Line::from(Span::styled(
            media_label(unit.media()),
            Style::default().fg(Color::Blue),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!("#{} {}", unit.rank(), unit.post_id())),
    );
    f.render_widget(card, area);
}

/// Draw the detail view.
#[tracing::instrument(skip_all)]
fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    let Some(unit) = app.selected() else {
        return;
    };

    let mut lines = vec![
        Line::from(format!("Rank: {}", unit.rank())),
        Line::from(format!("Post: {}", unit.post_id())),
        Line::from(format!("Published: {}", unit.timestamp())),
        Line::from(""),
    ];
    lines.extend(unit.metrics().iter().map(|m| {
        Line::from(vec![
            Span::styled(
                format!("{:<10}", m.label()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(m.value().as_str()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(media_label(unit.media())));
    lines.push(Line::from(""));
    lines.push(Line::from(unit.caption().as_str()));

    let detail = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Post Detail"))
        .wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

/// Draw the failure screen.
#[tracing::instrument(skip_all)]
fn draw_failure_view(f: &mut Frame, app: &App, area: Rect) {
    let red = Style::default().fg(Color::Red);
    let mut lines = vec![Line::from(Span::styled(
        "The leaderboard could not be built.",
        red.add_modifier(Modifier::BOLD),
    ))];
    if let Some(failure) = &app.failure {
        if let Some(query) = failure.query() {
            lines.push(Line::from(format!("Query: {}", query)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(failure.message().as_str()));
    }

    let failure = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(red)
                .title("Error"),
        )
        .style(red)
        .wrap(Wrap { trim: true });
    f.render_widget(failure, area);
}

fn media_label(media: &MediaDescriptor) -> String {
    match media {
        MediaDescriptor::Image { uri, width } => format!("Image ({}px): {}", width, uri),
        MediaDescriptor::Video {
            uri,
            width,
            start_seconds,
        } => format!("Video ({}px, from {}s): {}", width, start_seconds, uri),
        MediaDescriptor::None => "No media".to_string(),
    }
}
