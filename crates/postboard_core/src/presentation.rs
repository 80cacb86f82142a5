//! Presentation units handed to display surfaces.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Token shown in place of a metric that has no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// A labelled, already-formatted metric value.
///
/// # Examples
///
/// ```
/// use postboard_core::MetricValue;
///
/// let metric = MetricValue::new("Reach", "1200");
/// assert_eq!(metric.label(), "Reach");
/// assert_eq!(metric.value(), "1200");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct MetricValue {
    /// Human label
    label: String,
    /// Display value
    value: String,
}

impl MetricValue {
    /// Creates a metric value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The media element a unit should show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaDescriptor {
    /// An image
    Image {
        /// Asset URI
        uri: String,
        /// Display width hint in pixels
        width: u32,
    },
    /// A video
    Video {
        /// Asset URI
        uri: String,
        /// Display width hint in pixels
        width: u32,
        /// Playback start offset in seconds
        start_seconds: u32,
    },
    /// Nothing to show
    None,
}

impl MediaDescriptor {
    /// The asset URI, if there is media.
    pub fn uri(&self) -> Option<&str> {
        match self {
            MediaDescriptor::Image { uri, .. } | MediaDescriptor::Video { uri, .. } => Some(uri),
            MediaDescriptor::None => None,
        }
    }
}

/// Everything a surface needs to show one ranked post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PresentationUnit {
    /// 1-based position on the board
    rank: usize,
    /// Id of the post this unit shows
    post_id: String,
    /// Caption text
    caption: String,
    /// Formatted publication time
    timestamp: String,
    /// Metric scorecards, in display order
    metrics: Vec<MetricValue>,
    /// Media element
    media: MediaDescriptor,
}

impl PresentationUnit {
    /// Assembles a unit.
    pub fn new(
        rank: usize,
        post_id: impl Into<String>,
        caption: impl Into<String>,
        timestamp: impl Into<String>,
        metrics: Vec<MetricValue>,
        media: MediaDescriptor,
    ) -> Self {
        Self {
            rank,
            post_id: post_id.into(),
            caption: caption.into(),
            timestamp: timestamp.into(),
            metrics,
            media,
        }
    }

    /// Looks up a metric by its label.
    pub fn metric(&self, label: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.value.as_str())
    }
}
