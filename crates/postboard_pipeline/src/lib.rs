//! The postboard pipeline.
//!
//! A run fetches post rows through a [`QuerySourceAdapter`](postboard_source::QuerySourceAdapter),
//! derives each post's like rate ([`MetricDeriver`]), keeps the top N by a
//! chosen metric ([`Ranker`]) and formats them as presentation units
//! ([`Renderer`]). [`Pipeline`] wires the stages together from a
//! [`PostboardConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod deriver;
mod pipeline;
mod ranker;
mod renderer;

pub use config::{PostboardConfig, RankingConfig, RenderConfig, SourceConfig};
pub use deriver::{Enriched, MetricDeriver};
pub use pipeline::{DEFAULT_TITLE, Pipeline, PipelineBuilder, PipelineBuilderError};
pub use ranker::{RankDirection, RankKey, RankValue, RankedPost, Ranker};
pub use renderer::{
    DEFAULT_MEDIA_WIDTH, DEFAULT_TIMESTAMP_FORMAT, METRIC_LABELS, RenderStream, Renderer,
    UNKNOWN_TIMESTAMP, format_like_rate,
};
