use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use postboard_core::{MediaDescriptor, MetricValue, PresentationUnit};
use postboard_interface::{Board, FailureNotice, LayoutHints, Leaderboard};
use postboard_tui::{App, AppMode, Event, run_loop};
use ratatui::{Terminal, backend::TestBackend};

fn unit(rank: usize) -> PresentationUnit {
    PresentationUnit::new(
        rank,
        format!("post_{}", rank),
        format!("Caption {}", rank),
        "2024-05-09 16:00 UTC",
        vec![
            MetricValue::new("Reach", (1000 / rank).to_string()),
            MetricValue::new("Likes", "10"),
            MetricValue::new("Comments", "2"),
            MetricValue::new("Saved", "1"),
            MetricValue::new("Like Rate", "N/A"),
        ],
        MediaDescriptor::Image {
            uri: format!("https://cdn.example.com/{}.jpg", rank),
            width: 320,
        },
    )
}

fn ready_app(count: usize, columns: u16, notice: Option<&str>) -> App {
    let units: Vec<PresentationUnit> = (1..=count).map(unit).collect();
    App::from_board(Board::Ready(Leaderboard::new(
        "Top Posts",
        LayoutHints::new(columns, 320),
        Box::new(units.into_iter()),
        notice.map(str::to_string),
    )))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn screen(app: &App, width: u16, height: u16) -> anyhow::Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| postboard_tui::ui::draw(f, app))?;
    let buffer = terminal.backend().buffer();
    let text = buffer
        .content()
        .chunks(usize::from(width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(text)
}

#[test]
fn grid_navigation_follows_columns() {
    let mut app = ready_app(5, 2, None);
    assert_eq!(app.mode, AppMode::Grid);

    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.selected_index, 1);
    app.handle_key(key(KeyCode::Char('l')));
    assert_eq!(app.selected_index, 1, "right edge of the row");

    app.handle_key(key(KeyCode::Char('j')));
    assert_eq!(app.selected_index, 3);
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.selected_index, 3, "no card below");

    app.handle_key(key(KeyCode::Left));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.selected_index, 4);

    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Char('k')));
    assert_eq!(app.selected_index, 0);
    app.handle_key(key(KeyCode::Char('h')));
    assert_eq!(app.selected_index, 0);
}

#[test]
fn enter_and_escape_switch_views() {
    let mut app = ready_app(3, 3, None);
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.mode, AppMode::Detail);
    assert_eq!(app.selected().map(|u| u.post_id().as_str()), Some("post_2"));

    // Navigation is ignored in the detail view
    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.selected_index, 1);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.mode, AppMode::Grid);
    assert!(!app.should_quit);

    app.handle_key(key(KeyCode::Esc));
    assert!(app.should_quit);
}

#[test]
fn empty_board_has_no_detail() {
    let mut app = ready_app(0, 2, None);
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.mode, AppMode::Grid);
    assert!(app.selected().is_none());
}

#[test]
fn failed_board_opens_failure_view() {
    let app = App::from_board(Board::Failed(FailureNotice::new(
        "Top Posts",
        Some("demo.facebook_data.posts".to_string()),
        "Query rejected: Access Denied",
    )));
    assert_eq!(app.mode, AppMode::Failed);
    assert!(app.units.is_empty());
    assert_eq!(app.title, "Top Posts");
}

#[test]
fn draws_cards_and_notice() -> anyhow::Result<()> {
    let app = ready_app(3, 2, Some("1 row dropped (sample ids: p9)"));
    let text = screen(&app, 100, 30)?;

    assert!(text.contains("Top Posts"));
    assert!(text.contains("#1 post_1"));
    assert!(text.contains("#3 post_3"));
    assert!(text.contains("Reach: 1000"));
    assert!(text.contains("Caption 2"));
    assert!(text.contains("1 row dropped (sample ids: p9)"));
    Ok(())
}

#[test]
fn grid_scrolls_to_selection() -> anyhow::Result<()> {
    let mut app = ready_app(10, 1, None);
    for _ in 0..9 {
        app.handle_key(key(KeyCode::Down));
    }
    let text = screen(&app, 80, 22)?;
    assert!(text.contains("#10 post_10"));
    assert!(text.contains("#9 post_9"));
    assert!(!text.contains("#8 post_8"));
    Ok(())
}

#[test]
fn draws_detail_view() -> anyhow::Result<()> {
    let mut app = ready_app(2, 2, None);
    app.handle_key(key(KeyCode::Enter));
    let text = screen(&app, 100, 30)?;

    assert!(text.contains("Post Detail"));
    assert!(text.contains("Post: post_1"));
    assert!(text.contains("Like Rate"));
    assert!(text.contains("Image (320px): https://cdn.example.com/1.jpg"));
    Ok(())
}

#[test]
fn draws_failure_screen() -> anyhow::Result<()> {
    let app = App::from_board(Board::Failed(FailureNotice::new(
        "Top Posts",
        Some("demo.facebook_data.posts".to_string()),
        "Access Denied",
    )));
    let text = screen(&app, 100, 20)?;

    assert!(text.contains("could not be built"));
    assert!(text.contains("Query: demo.facebook_data.posts"));
    assert!(text.contains("Access Denied"));
    Ok(())
}

#[test]
fn loop_runs_until_quit() -> anyhow::Result<()> {
    let mut app = ready_app(4, 2, None);
    let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
    let mut script = vec![
        Some(Event::Key(key(KeyCode::Char('q')))),
        None,
        Some(Event::Key(key(KeyCode::Right))),
        Some(Event::Tick),
    ];

    run_loop(&mut terminal, &mut app, || Ok(script.pop().flatten()))?;

    assert!(app.should_quit);
    assert_eq!(app.selected_index, 1);
    assert!(script.is_empty());
    Ok(())
}
