use postboard_error::{ConfigError, PostboardError, SourceError, SourceErrorKind};
use postboard_interface::{Board, FailureNotice, LayoutHints, Leaderboard, PostQuery};

fn query(table: &str) -> PostQuery {
    PostQuery::builder()
        .table(table)
        .order_by("created_time")
        .limit(25u64)
        .build()
        .expect("query builds")
}

#[test]
fn renders_descending_query_by_default() {
    let sql = query("proj.dataset.posts").to_sql().unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `proj.dataset.posts` ORDER BY created_time DESC LIMIT 25"
    );
}

#[test]
fn renders_explicit_columns_and_ascending_order() {
    let q = PostQuery::builder()
        .table("posts")
        .columns(vec!["id".to_string(), "reach".to_string()])
        .order_by("reach")
        .descending(false)
        .limit(3u64)
        .build()
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT id, reach FROM `posts` ORDER BY reach ASC LIMIT 3"
    );
}

#[test]
fn rejects_injection_in_table_name() {
    let err = query("posts`; DROP TABLE x; --").to_sql().unwrap_err();
    assert!(matches!(err.kind, SourceErrorKind::QueryRejected { .. }));
}

#[test]
fn rejects_bad_order_column() {
    let q = PostQuery::builder()
        .table("posts")
        .order_by("reach desc, 1")
        .limit(3u64)
        .build()
        .unwrap();
    assert!(matches!(
        q.to_sql().unwrap_err().kind,
        SourceErrorKind::QueryRejected { .. }
    ));
}

#[test]
fn rejects_zero_row_cap() {
    let q = PostQuery::builder().table("posts").limit(0u64).build().unwrap();
    assert!(q.to_sql().is_err());
}

#[test]
fn builder_requires_row_cap() {
    assert!(PostQuery::builder().table("posts").build().is_err());
}

#[test]
fn failure_notice_keeps_query_identity() {
    let err = PostboardError::from(SourceError::unavailable("proj.dataset.posts", "timed out"));
    let notice = FailureNotice::from_error("Top Posts", &err);
    assert_eq!(notice.query().as_deref(), Some("proj.dataset.posts"));
    assert!(notice.message().contains("timed out"));

    let err = PostboardError::from(ConfigError::invalid("ranking.top_n", "must be at least 1"));
    let notice = FailureNotice::from_error("Top Posts", &err);
    assert_eq!(*notice.query(), None);
}

#[test]
fn leaderboard_hands_over_units_once() {
    let board = Leaderboard::new(
        "Top Posts",
        LayoutHints::default(),
        Box::new(std::iter::empty()),
        Some("1 row dropped".to_string()),
    );
    assert_eq!(board.notice(), Some("1 row dropped"));
    let (title, layout, notice, mut units) = board.into_parts();
    assert_eq!(title, "Top Posts");
    assert_eq!(*layout.columns(), 2);
    assert!(notice.is_some());
    assert!(units.next().is_none());
    assert!(Board::Failed(FailureNotice::new("t", None, "m")).is_failed());
}
