use postboard_core::{DropReport, LikeRate, MediaType, Post, PresentationUnit, MediaDescriptor, MetricValue};
use postboard_error::{RowError, RowErrorKind};

fn post(id: &str, reach: u64, likes: u64) -> Post {
    Post::builder()
        .id(id)
        .reach(reach)
        .like_count(likes)
        .build()
        .expect("post builds")
}

#[test]
fn like_rate_defined_iff_reach_positive() {
    for reach in [0u64, 1, 7, 100, 1_000_000] {
        for likes in [0u64, 1, 3, 50, 999] {
            let p = post("p", reach, likes);
            assert_eq!(p.like_rate().is_defined(), reach > 0);
            if let Some(rate) = p.like_rate().value() {
                assert!((rate - likes as f64 / reach as f64).abs() < 1e-12);
            }
        }
    }
}

#[test]
fn zero_reach_is_undefined_not_zero_or_nan() {
    let p = post("p", 0, 5);
    assert_eq!(*p.like_rate(), LikeRate::Undefined);
    assert_eq!(p.like_rate().value(), None);
}

#[test]
fn builder_requires_id() {
    assert!(Post::builder().reach(10u64).build().is_err());
}

#[test]
fn builder_defaults_optional_fields() {
    let p = post("only-id", 0, 0);
    assert_eq!(p.caption(), "");
    assert_eq!(p.source(), "");
    assert_eq!(*p.created_time(), None);
    assert!(!p.media_type().is_displayable());
}

#[test]
fn media_type_parsing_tolerates_unknown_values() {
    assert_eq!(MediaType::parse(" Video "), MediaType::Video);
    assert_eq!(MediaType::parse("CAROUSEL_ALBUM"), MediaType::Unrecognized("CAROUSEL_ALBUM".into()));
    assert_eq!(MediaType::parse(""), MediaType::default());
}

#[test]
fn like_rate_serializes_with_explicit_state() -> anyhow::Result<()> {
    let json = serde_json::to_value(LikeRate::Undefined)?;
    assert_eq!(json["state"], "undefined");
    let json = serde_json::to_value(LikeRate::Defined(0.5))?;
    assert_eq!(json["state"], "defined");
    assert_eq!(json["value"], 0.5);
    Ok(())
}

#[test]
fn drop_report_caps_samples_but_counts_everything() {
    let mut report = DropReport::default();
    for i in 0..8 {
        let kind = RowErrorKind::MissingField("reach".to_string());
        report.record(&RowError::new(i, Some(format!("p{i}")), kind));
    }
    assert_eq!(report.dropped(), 8);
    assert_eq!(report.samples().len(), postboard_core::DROP_SAMPLE_LIMIT);
    let notice = report.notice().expect("notice present");
    assert!(notice.starts_with("8 rows dropped"));
    assert!(notice.contains("p0"));
}

#[test]
fn drop_report_notice_without_ids() {
    let mut report = DropReport::default();
    assert_eq!(report.notice(), None);
    report.record(&RowError::new(0, None, RowErrorKind::MissingField("id".into())));
    assert_eq!(report.notice().as_deref(), Some("1 row dropped"));
}

#[test]
fn presentation_unit_metric_lookup() {
    let unit = PresentationUnit::new(
        1,
        "p1",
        "caption",
        "2024-05-01 12:00 UTC",
        vec![MetricValue::new("Reach", "100"), MetricValue::new("Like Rate", "N/A")],
        MediaDescriptor::None,
    );
    assert_eq!(unit.metric("Reach"), Some("100"));
    assert_eq!(unit.metric("Like Rate"), Some("N/A"));
    assert_eq!(unit.metric("Shares"), None);
    assert_eq!(unit.media().uri(), None);
}
