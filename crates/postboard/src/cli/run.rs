//! Shared setup for commands that run the pipeline.

use super::commands::RunArgs;
use postboard::{
    BigQueryExecutor, Board, FailureNotice, InMemoryExecutor, Pipeline, PostboardConfig,
    PostboardResult, QueryExecutor, SourceError,
};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable holding the BigQuery bearer token.
pub const ACCESS_TOKEN_VAR: &str = "POSTBOARD_ACCESS_TOKEN";

/// Loads configuration and applies command-line overrides.
#[instrument(skip(args))]
pub fn load_config(path: Option<&Path>, args: &RunArgs) -> PostboardResult<PostboardConfig> {
    let mut config = match path {
        Some(path) => PostboardConfig::from_file(path)?,
        None => PostboardConfig::load()?,
    };
    if let Some(top_n) = args.top_n {
        config.ranking.top_n = top_n;
    }
    if let Some(key) = args.rank_by {
        config.ranking.key = key;
    }
    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

/// Picks the executor: the fixture file when given, BigQuery otherwise.
fn executor(config: &PostboardConfig, fixture: Option<&Path>) -> PostboardResult<Box<dyn QueryExecutor>> {
    if let Some(path) = fixture {
        info!(path = %path.display(), "Reading rows from fixture");
        return Ok(Box::new(InMemoryExecutor::from_path(path)?));
    }

    let token = std::env::var(ACCESS_TOKEN_VAR).map_err(|_| {
        SourceError::unavailable(
            config.source.qualified_table(),
            format!("{} is not set", ACCESS_TOKEN_VAR),
        )
    })?;
    let mut executor = BigQueryExecutor::new(config.source.project_id.clone(), token);
    if let Some(location) = &config.source.location {
        executor = executor.with_location(location.clone());
    }
    Ok(Box::new(executor))
}

/// Runs the pipeline once, folding every run failure into the board.
pub async fn build_board(config: &PostboardConfig, args: &RunArgs) -> PostboardResult<Board> {
    let pipeline = Pipeline::from_config(config)?;
    let board = match executor(config, args.fixture.as_deref()) {
        Ok(executor) => pipeline.board(executor.as_ref()).await,
        Err(e) => Board::Failed(FailureNotice::from_error(config.render.title.clone(), &e)),
    };
    Ok(board)
}
