use postboard_error::{ConfigErrorKind, PostboardErrorKind};
use postboard_pipeline::{Pipeline, PostboardConfig, RankDirection, RankKey};
use std::io::Write;

fn write_config(contents: &str) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

fn invalid_field(result: postboard_error::PostboardResult<PostboardConfig>) -> String {
    match result.unwrap_err().kind() {
        PostboardErrorKind::Config(e) => match &e.kind {
            ConfigErrorKind::Invalid { field, .. } => field.clone(),
            other => panic!("expected invalid setting, got {}", other),
        },
        other => panic!("expected config error, got {}", other),
    }
}

#[test]
fn bundled_defaults_load() -> anyhow::Result<()> {
    let config = PostboardConfig::defaults()?;
    assert_eq!(
        config.source.qualified_table(),
        "bizbuddydemo-v1.facebook_data.lundys_postdata"
    );
    assert_eq!(config.source.order_by, "created_time");
    assert!(config.source.descending);
    assert_eq!(config.source.row_cap, 10);
    assert_eq!(config.ranking.key, RankKey::Reach);
    assert_eq!(config.ranking.direction, RankDirection::Descending);
    assert_eq!(config.ranking.top_n, 10);
    assert_eq!(config.render.columns, 2);
    assert_eq!(config.render.timestamp_format, "%Y-%m-%d %H:%M UTC");
    Ok(())
}

#[test]
fn file_overrides_apply_over_defaults() -> anyhow::Result<()> {
    let file = write_config(
        r#"
[ranking]
key = "like_rate"
top_n = 3

[render]
title = "Best of May"
"#,
    )?;

    let config = PostboardConfig::from_file(file.path())?;

    assert_eq!(config.ranking.key, RankKey::LikeRate);
    assert_eq!(config.ranking.top_n, 3);
    assert_eq!(config.render.title, "Best of May");
    assert_eq!(config.render.columns, 2);
    assert_eq!(config.source.table, "lundys_postdata");
    Ok(())
}

#[test]
fn rejects_zero_top_n() -> anyhow::Result<()> {
    let file = write_config("[ranking]\ntop_n = 0\n")?;
    assert_eq!(invalid_field(PostboardConfig::from_file(file.path())), "ranking.top_n");
    Ok(())
}

#[test]
fn rejects_zero_row_cap() -> anyhow::Result<()> {
    let file = write_config("[source]\nrow_cap = 0\n")?;
    assert_eq!(invalid_field(PostboardConfig::from_file(file.path())), "source.row_cap");
    Ok(())
}

#[test]
fn rejects_table_with_sql() -> anyhow::Result<()> {
    let file = write_config("[source]\ntable = \"posts; DROP TABLE posts\"\n")?;
    assert_eq!(invalid_field(PostboardConfig::from_file(file.path())), "source.table");
    Ok(())
}

#[test]
fn rejects_bad_timestamp_format() -> anyhow::Result<()> {
    let file = write_config("[render]\ntimestamp_format = \"%Q\"\n")?;
    assert_eq!(
        invalid_field(PostboardConfig::from_file(file.path())),
        "render.timestamp_format"
    );
    Ok(())
}

#[test]
fn unknown_rank_key_is_a_parse_error() -> anyhow::Result<()> {
    let file = write_config("[ranking]\nkey = \"shares\"\n")?;
    let err = PostboardConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(
        err.kind(),
        PostboardErrorKind::Config(e) if matches!(e.kind, ConfigErrorKind::Parse(_))
    ));
    Ok(())
}

#[test]
fn missing_file_is_a_load_error() {
    let err = PostboardConfig::from_file("/nonexistent/postboard.toml").unwrap_err();
    assert!(matches!(
        err.kind(),
        PostboardErrorKind::Config(e) if matches!(e.kind, ConfigErrorKind::Load(_))
    ));
}

#[test]
fn pipeline_follows_config() -> anyhow::Result<()> {
    let mut config = PostboardConfig::defaults()?;
    config.ranking.top_n = 4;
    config.render.media_width = 640;

    let pipeline = Pipeline::from_config(&config)?;

    assert_eq!(*pipeline.ranker().top_n(), 4);
    assert_eq!(pipeline.renderer().media_width(), 640);
    assert_eq!(pipeline.layout().media_width(), &640);
    assert_eq!(
        pipeline.adapter().query().to_sql()?,
        "SELECT * FROM `bizbuddydemo-v1.facebook_data.lundys_postdata` ORDER BY created_time DESC LIMIT 10"
    );
    Ok(())
}

#[test]
fn pipeline_rejects_invalid_config() -> anyhow::Result<()> {
    let mut config = PostboardConfig::defaults()?;
    config.render.columns = 0;
    assert!(Pipeline::from_config(&config).is_err());
    Ok(())
}
