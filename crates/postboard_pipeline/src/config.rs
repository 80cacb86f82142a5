//! Configuration for postboard runs.
//!
//! Sources, in order of precedence (later overrides earlier):
//! 1. Bundled defaults (`postboard.toml` shipped with the crate)
//! 2. `~/.config/postboard/postboard.toml`
//! 3. `./postboard.toml`
//!
//! User files are optional and skipped when absent.

use crate::{RankDirection, RankKey, Ranker, Renderer};
use config::{Config, File, FileFormat};
use postboard_error::{ConfigError, ConfigErrorKind, PostboardError, PostboardResult};
use postboard_interface::{LayoutHints, PostQuery};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../postboard.toml");

/// Where posts are read from.
///
/// ```toml
/// [source]
/// project_id = "bizbuddydemo-v1"
/// dataset = "facebook_data"
/// table = "lundys_postdata"
/// order_by = "created_time"
/// descending = true
/// row_cap = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Project that owns the dataset and is billed for queries
    pub project_id: String,
    /// Dataset holding the post table
    pub dataset: String,
    /// Post table or view
    pub table: String,
    /// Column the store orders rows by before capping
    pub order_by: String,
    /// Whether `order_by` sorts descending
    pub descending: bool,
    /// Hard cap on fetched rows
    pub row_cap: u64,
    /// Dataset location, when the store needs it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SourceConfig {
    /// Fully qualified `project.dataset.table` name.
    pub fn qualified_table(&self) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset, self.table)
    }
}

/// How posts are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RankingConfig {
    /// Ranking metric
    #[serde(default)]
    pub key: RankKey,
    /// Sort direction
    #[serde(default)]
    pub direction: RankDirection,
    /// Number of posts on the board
    pub top_n: usize,
}

/// How the board is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Board title
    pub title: String,
    /// Number of card columns
    pub columns: u16,
    /// Media width hint in pixels
    pub media_width: u32,
    /// `chrono` format string for post timestamps
    pub timestamp_format: String,
}

/// Top-level postboard configuration.
///
/// # Example
///
/// ```no_run
/// use postboard_pipeline::PostboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PostboardConfig::load()?;
/// println!("Ranking top {} by {}", config.ranking.top_n, config.ranking.key);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostboardConfig {
    /// `[source]` section
    pub source: SourceConfig,
    /// `[ranking]` section
    pub ranking: RankingConfig,
    /// `[render]` section
    pub render: RenderConfig,
}

impl PostboardConfig {
    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse or validate.
    pub fn defaults() -> PostboardResult<Self> {
        Self::from_builder(
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
        )
    }

    /// Loads bundled defaults overridden by one explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or the
    /// merged configuration is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> PostboardResult<Self> {
        debug!("Loading configuration from file");
        Self::from_builder(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref()).format(FileFormat::Toml)),
        )
    }

    /// Loads configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// configuration is invalid.
    #[instrument]
    pub fn load() -> PostboardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled defaults first, user files layered on top
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/postboard/postboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("postboard").required(false));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> PostboardResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot drive a run.
    ///
    /// # Errors
    ///
    /// Returns an `Invalid` config error naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("source.project_id", &self.source.project_id),
            ("source.dataset", &self.source.dataset),
            ("source.table", &self.source.table),
        ] {
            if value.is_empty()
                || !value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
            {
                return Err(ConfigError::invalid(
                    field,
                    format!("'{}' is not a valid identifier", value),
                ));
            }
        }
        if self.source.order_by.is_empty()
            || !self
                .source
                .order_by
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::invalid(
                "source.order_by",
                format!("'{}' is not a valid column name", self.source.order_by),
            ));
        }
        if self.source.row_cap == 0 {
            return Err(ConfigError::invalid("source.row_cap", "must be at least 1"));
        }
        if self.ranking.top_n == 0 {
            return Err(ConfigError::invalid("ranking.top_n", "must be at least 1"));
        }
        if self.render.columns == 0 {
            return Err(ConfigError::invalid("render.columns", "must be at least 1"));
        }
        if self.render.media_width == 0 {
            return Err(ConfigError::invalid("render.media_width", "must be at least 1"));
        }
        Renderer::try_new(self.render.timestamp_format.clone(), self.render.media_width)?;
        Ok(())
    }

    /// The post query described by `[source]`.
    ///
    /// # Errors
    ///
    /// Returns a config error if the query cannot be assembled.
    pub fn query(&self) -> PostboardResult<PostQuery> {
        PostQuery::builder()
            .table(self.source.qualified_table())
            .order_by(self.source.order_by.clone())
            .descending(self.source.descending)
            .limit(self.source.row_cap)
            .build()
            .map_err(|e| PostboardError::from(ConfigError::invalid("source", e.to_string())))
    }

    /// The ranker described by `[ranking]`.
    pub fn ranker(&self) -> Ranker {
        Ranker::new(self.ranking.key, self.ranking.top_n).with_direction(self.ranking.direction)
    }

    /// The renderer described by `[render]`.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.render.timestamp_format.clone(), self.render.media_width)
    }

    /// Layout hints for surfaces.
    pub fn layout(&self) -> LayoutHints {
        LayoutHints::new(self.render.columns, self.render.media_width)
    }
}
