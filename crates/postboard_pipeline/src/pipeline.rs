//! End-to-end run: fetch, derive, rank, render.

use crate::{Enriched, MetricDeriver, PostboardConfig, Ranker, Renderer};
use derive_builder::Builder;
use derive_getters::Getters;
use postboard_error::{ConfigError, PostboardError, PostboardResult};
use postboard_interface::{
    Board, FailureNotice, LayoutHints, Leaderboard, PresentationSurface, QueryExecutor,
};
use postboard_source::QuerySourceAdapter;
use tracing::{debug, error, info, instrument, warn};

/// Default board title.
pub const DEFAULT_TITLE: &str = "Top Posts";

/// One parameterised leaderboard pipeline.
///
/// A pipeline holds no per-run state: every [`run`](Pipeline::run) fetches
/// and builds its posts from scratch, so one pipeline can serve concurrent
/// runs.
///
/// # Examples
///
/// ```
/// # #[tokio::main]
/// # async fn main() {
/// use postboard_core::{Column, ColumnType, TabularResult};
/// use postboard_interface::PostQuery;
/// use postboard_pipeline::{Pipeline, RankKey, Ranker};
/// use postboard_source::{InMemoryExecutor, QuerySourceAdapter, required_columns};
/// use serde_json::json;
///
/// let columns = required_columns().map(|c| Column::new(c, ColumnType::String)).collect();
/// let rows = vec![json!({
///     "id": "p1", "created_time": null, "caption": "hi", "media_type": "IMAGE",
///     "source": "", "reach": 10, "like_count": 1, "comments_count": 0, "saved": 0
/// })];
/// let executor = InMemoryExecutor::new(TabularResult::from_json_rows(columns, rows).unwrap());
///
/// let query = PostQuery::builder().table("posts").limit(10u64).build().unwrap();
/// let pipeline = Pipeline::builder()
///     .adapter(QuerySourceAdapter::new(query))
///     .ranker(Ranker::new(RankKey::Reach, 5))
///     .build()
///     .unwrap();
///
/// let board = pipeline.run(&executor).await.unwrap();
/// let (title, _, notice, units) = board.into_parts();
/// assert_eq!(title, "Top Posts");
/// assert!(notice.is_none());
/// assert_eq!(units.count(), 1);
/// # }
/// ```
#[derive(Debug, Clone, Builder, Getters)]
#[builder(setter(into))]
pub struct Pipeline {
    /// Query source
    adapter: QuerySourceAdapter,
    /// Row to post conversion
    #[builder(default)]
    deriver: MetricDeriver,
    /// Ranking
    #[builder(default = "Ranker::new(crate::RankKey::Reach, 10)")]
    ranker: Ranker,
    /// Unit formatting
    #[builder(default)]
    renderer: Renderer,
    /// Board title
    #[builder(default = "DEFAULT_TITLE.to_string()")]
    title: String,
    /// Surface layout hints
    #[builder(default)]
    layout: LayoutHints,
}

impl Pipeline {
    /// Creates a new builder for `Pipeline`.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Assembles a pipeline from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the configuration is invalid.
    #[instrument(skip(config), fields(table = %config.source.qualified_table()))]
    pub fn from_config(config: &PostboardConfig) -> PostboardResult<Self> {
        config.validate()?;
        let pipeline = Self::builder()
            .adapter(QuerySourceAdapter::new(config.query()?))
            .ranker(config.ranker())
            .renderer(config.renderer())
            .title(config.render.title.clone())
            .layout(config.layout())
            .build()
            .map_err(|e| PostboardError::from(ConfigError::invalid("pipeline", e.to_string())))?;
        debug!(ranker = ?pipeline.ranker, "Pipeline assembled");
        Ok(pipeline)
    }

    /// Runs the pipeline once.
    ///
    /// Malformed rows are dropped and summarised in the board's notice.
    ///
    /// # Errors
    ///
    /// Returns the source error if the fetch fails; no partial board is built.
    #[instrument(skip(self, executor), fields(query = %self.adapter.query().label(), executor = executor.name()))]
    pub async fn run(&self, executor: &dyn QueryExecutor) -> PostboardResult<Leaderboard> {
        let result = self.adapter.fetch(executor).await?;
        let Enriched { posts, report } = self.deriver.derive(result);
        let ranked = self.ranker.rank(posts);
        let units = self.renderer.render(ranked);

        let notice = report.notice();
        if let Some(notice) = &notice {
            warn!(dropped = report.dropped(), notice = %notice, "Rows dropped during derivation");
        }
        info!(units = units.len(), "Leaderboard ready");

        Ok(Leaderboard::new(
            self.title.clone(),
            self.layout,
            Box::new(units),
            notice,
        ))
    }

    /// Runs the pipeline, turning a fatal error into a failure board.
    pub async fn board(&self, executor: &dyn QueryExecutor) -> Board {
        match self.run(executor).await {
            Ok(leaderboard) => Board::Ready(leaderboard),
            Err(e) => {
                error!(error = %e, "Pipeline run failed");
                Board::Failed(FailureNotice::from_error(self.title.clone(), &e))
            }
        }
    }

    /// Runs the pipeline and hands the outcome to `surface`.
    ///
    /// # Errors
    ///
    /// Returns only surface errors; run failures are presented, not returned.
    pub async fn present<S>(&self, executor: &dyn QueryExecutor, surface: &mut S) -> PostboardResult<()>
    where
        S: PresentationSurface + ?Sized,
    {
        let board = self.board(executor).await;
        surface.present(board)
    }
}
