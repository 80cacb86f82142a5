use postboard::{
    Board, FailureNotice, InMemoryExecutor, OutputFormat, Pipeline, PostboardConfig,
    PresentationSurface, TextSurface,
};
use serde_json::Value;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/posts.json")
}

async fn board(top_n: usize) -> anyhow::Result<Board> {
    let mut config = PostboardConfig::defaults()?;
    config.ranking.top_n = top_n;
    let pipeline = Pipeline::from_config(&config)?;
    let executor = InMemoryExecutor::from_path(fixture())?;
    Ok(pipeline.board(&executor).await)
}

fn render(board: Board, format: OutputFormat) -> anyhow::Result<String> {
    let mut surface = TextSurface::new(Vec::new(), format);
    surface.present(board)?;
    Ok(String::from_utf8(surface.into_inner())?)
}

#[tokio::test]
async fn human_output_lists_ranked_posts() -> anyhow::Result<()> {
    let text = render(board(3).await?, OutputFormat::Human)?;

    let first = text.find("17841400_0005").expect("top post listed");
    let second = text.find("17841400_0006").expect("second post listed");
    assert!(first < second);
    assert!(text.starts_with("Top Posts\n=========\n"));
    assert!(text.contains("Reach: 3120 | Likes: 198 | Comments: 44 | Saved: 27 | Like Rate: 6.35%"));
    assert!(text.contains("Video (320px, from 0s): https://cdn.example.com/posts/line.mp4"));
    assert!(text.contains("3 posts"));
    assert!(text.contains("Note: 1 row dropped (sample ids: 17841400_0002)"));
    Ok(())
}

#[tokio::test]
async fn json_output_reads_back() -> anyhow::Result<()> {
    let text = render(board(10).await?, OutputFormat::Json)?;
    let doc: Value = serde_json::from_str(&text)?;

    assert_eq!(doc["status"], "ready");
    assert_eq!(doc["title"], "Top Posts");
    let units = doc["units"].as_array().expect("units array");
    assert_eq!(units.len(), 5);
    assert_eq!(units[0]["post_id"], "17841400_0005");

    let last = &units[4];
    assert_eq!(last["post_id"], "17841400_0003");
    assert_eq!(last["metrics"][4]["value"], "N/A");

    let carousel = units
        .iter()
        .find(|u| u["post_id"] == "17841400_0004")
        .expect("carousel post ranked");
    assert_eq!(carousel["media"]["kind"], "none");
    Ok(())
}

#[test]
fn failure_prints_query_and_cause() -> anyhow::Result<()> {
    let failure = FailureNotice::new(
        "Top Posts",
        Some("bizbuddydemo-v1.facebook_data.lundys_postdata".to_string()),
        "POSTBOARD_ACCESS_TOKEN is not set",
    );

    let human = render(Board::Failed(failure.clone()), OutputFormat::Human)?;
    assert!(human.contains("could not be built"));
    assert!(human.contains("Query: bizbuddydemo-v1.facebook_data.lundys_postdata"));

    let json: Value = serde_json::from_str(&render(Board::Failed(failure), OutputFormat::Json)?)?;
    assert_eq!(json["status"], "failed");
    assert_eq!(json["error"]["message"], "POSTBOARD_ACCESS_TOKEN is not set");
    Ok(())
}
