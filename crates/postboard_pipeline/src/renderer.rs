//! Ranked posts to presentation units.

use crate::RankedPost;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use postboard_core::{
    LikeRate, MediaDescriptor, MediaType, MetricValue, NOT_AVAILABLE, Post, PresentationUnit,
};
use postboard_error::ConfigError;
use std::fmt::Write;
use tracing::{debug, instrument, warn};

/// Default `chrono` format for post timestamps.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Default media width hint in pixels.
pub const DEFAULT_MEDIA_WIDTH: u32 = 320;

/// Shown in place of a missing publication time.
pub const UNKNOWN_TIMESTAMP: &str = "unknown";

/// Metric labels, in display order.
pub const METRIC_LABELS: [&str; 5] = ["Reach", "Likes", "Comments", "Saved", "Like Rate"];

/// Maps ranked posts to [`PresentationUnit`]s.
///
/// Rendering is pure formatting; it performs no I/O.
///
/// # Examples
///
/// ```
/// use postboard_core::{MediaDescriptor, MediaType, Post};
/// use postboard_pipeline::{RankKey, Ranker, Renderer};
///
/// let post = Post::builder()
///     .id("p1")
///     .caption("Fish fry")
///     .media_type(MediaType::Video)
///     .source("https://cdn.example.com/fry.mp4")
///     .reach(200u64)
///     .like_count(20u64)
///     .build()
///     .unwrap();
/// let ranked = Ranker::new(RankKey::Reach, 10).rank(vec![post]);
///
/// let units: Vec<_> = Renderer::default().render(ranked).collect();
/// assert_eq!(units[0].metric("Like Rate"), Some("10.00%"));
/// assert_eq!(units[0].timestamp(), "unknown");
/// assert!(matches!(units[0].media(), MediaDescriptor::Video { start_seconds: 0, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    timestamp_format: String,
    media_width: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FORMAT, DEFAULT_MEDIA_WIDTH)
    }
}

impl Renderer {
    /// Creates a renderer.
    ///
    /// The format is not checked here; a timestamp it cannot produce
    /// renders as `unknown`.
    pub fn new(timestamp_format: impl Into<String>, media_width: u32) -> Self {
        Self {
            timestamp_format: timestamp_format.into(),
            media_width,
        }
    }

    /// Creates a renderer, rejecting a malformed timestamp format.
    ///
    /// # Errors
    ///
    /// Returns an invalid `render.timestamp_format` config error when the
    /// format contains an unknown specifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use postboard_pipeline::Renderer;
    ///
    /// assert!(Renderer::try_new("%d %b %Y", 320).is_ok());
    /// assert!(Renderer::try_new("%Q", 320).is_err());
    /// ```
    pub fn try_new(timestamp_format: impl Into<String>, media_width: u32) -> Result<Self, ConfigError> {
        let timestamp_format = timestamp_format.into();
        if StrftimeItems::new(&timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::invalid(
                "render.timestamp_format",
                format!("'{}' is not a valid format string", timestamp_format),
            ));
        }
        Ok(Self::new(timestamp_format, media_width))
    }

    /// Timestamp format string.
    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Media width hint.
    pub fn media_width(&self) -> u32 {
        self.media_width
    }

    /// Renders one post at `rank`.
    pub fn render_post(&self, rank: usize, post: &Post) -> PresentationUnit {
        let timestamp = post
            .created_time()
            .as_ref()
            .and_then(|t| self.format_timestamp(t))
            .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string());

        let metrics = vec![
            MetricValue::new(METRIC_LABELS[0], post.reach().to_string()),
            MetricValue::new(METRIC_LABELS[1], post.like_count().to_string()),
            MetricValue::new(METRIC_LABELS[2], post.comments_count().to_string()),
            MetricValue::new(METRIC_LABELS[3], post.saved().to_string()),
            MetricValue::new(METRIC_LABELS[4], format_like_rate(post.like_rate())),
        ];

        PresentationUnit::new(
            rank,
            post.id(),
            post.caption(),
            timestamp,
            metrics,
            self.media(post),
        )
    }

    /// Renders ranked posts as a one-shot stream, in rank order.
    #[instrument(skip_all, fields(posts = ranked.len()))]
    pub fn render(&self, ranked: Vec<RankedPost>) -> RenderStream {
        debug!("Rendering ranked posts");
        RenderStream {
            renderer: self.clone(),
            ranked: ranked.into_iter(),
        }
    }

    /// `None` when the format cannot be applied; see [`Renderer::try_new`].
    fn format_timestamp(&self, time: &DateTime<Utc>) -> Option<String> {
        let mut formatted = String::new();
        match write!(formatted, "{}", time.format(&self.timestamp_format)) {
            Ok(()) => Some(formatted),
            Err(_) => {
                warn!(format = %self.timestamp_format, "Timestamp format could not be applied");
                None
            }
        }
    }

    fn media(&self, post: &Post) -> MediaDescriptor {
        let uri = post.source().trim();
        if uri.is_empty() {
            return MediaDescriptor::None;
        }
        match post.media_type() {
            MediaType::Image => MediaDescriptor::Image {
                uri: uri.to_string(),
                width: self.media_width,
            },
            MediaType::Video => MediaDescriptor::Video {
                uri: uri.to_string(),
                width: self.media_width,
                start_seconds: 0,
            },
            MediaType::Unrecognized(_) => MediaDescriptor::None,
        }
    }
}

/// Formats a like rate as a percentage with two decimals.
///
/// # Examples
///
/// ```
/// use postboard_core::LikeRate;
/// use postboard_pipeline::format_like_rate;
///
/// assert_eq!(format_like_rate(&LikeRate::Defined(0.5)), "50.00%");
/// assert_eq!(format_like_rate(&LikeRate::Undefined), "N/A");
/// ```
pub fn format_like_rate(rate: &LikeRate) -> String {
    match rate {
        LikeRate::Defined(value) => format!("{:.2}%", value * 100.0),
        LikeRate::Undefined => NOT_AVAILABLE.to_string(),
    }
}

/// Presentation units in rank order, consumed once.
///
/// Not `Clone`: a surface reads each unit exactly once.
#[derive(Debug)]
pub struct RenderStream {
    renderer: Renderer,
    ranked: std::vec::IntoIter<RankedPost>,
}

impl Iterator for RenderStream {
    type Item = PresentationUnit;

    fn next(&mut self) -> Option<Self::Item> {
        let ranked = self.ranked.next()?;
        Some(self.renderer.render_post(*ranked.rank(), ranked.post()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ranked.size_hint()
    }
}

impl ExactSizeIterator for RenderStream {}
