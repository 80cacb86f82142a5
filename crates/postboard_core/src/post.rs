//! Post records and their derived engagement metrics.

use crate::MediaType;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Ratio of likes to reach.
///
/// The ratio only exists when the post reached somebody; a zero-reach post
/// carries an explicit [`LikeRate::Undefined`] instead of `NaN` or `0.0`.
///
/// # Examples
///
/// ```
/// use postboard_core::LikeRate;
///
/// assert_eq!(LikeRate::from_counts(10, 100), LikeRate::Defined(0.1));
/// assert_eq!(LikeRate::from_counts(5, 0), LikeRate::Undefined);
/// assert_eq!(LikeRate::Undefined.value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum LikeRate {
    /// `like_count / reach` for a post with non-zero reach
    Defined(f64),
    /// The post has zero reach
    #[default]
    Undefined,
}

impl LikeRate {
    /// Derives the rate from raw counts.
    pub fn from_counts(like_count: u64, reach: u64) -> Self {
        if reach > 0 {
            LikeRate::Defined(like_count as f64 / reach as f64)
        } else {
            LikeRate::Undefined
        }
    }

    /// The ratio, if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            LikeRate::Defined(rate) => Some(*rate),
            LikeRate::Undefined => None,
        }
    }

    /// Whether the ratio is defined.
    pub fn is_defined(&self) -> bool {
        matches!(self, LikeRate::Defined(_))
    }
}

/// One social-media post, as fetched for a single run.
///
/// `like_rate` has no setter: [`PostBuilder::build`] derives it from
/// `like_count` and `reach`, and a built post is never modified afterwards.
///
/// # Examples
///
/// ```
/// use postboard_core::{LikeRate, MediaType, Post};
///
/// let post = Post::builder()
///     .id("1784_001")
///     .caption("Friday fish fry")
///     .media_type(MediaType::Image)
///     .source("https://cdn.example.com/fish.jpg")
///     .reach(200u64)
///     .like_count(30u64)
///     .build()
///     .unwrap();
///
/// assert_eq!(post.id(), "1784_001");
/// assert_eq!(*post.like_rate(), LikeRate::Defined(0.15));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), build_fn(private, name = "build_fields"))]
pub struct Post {
    /// Opaque identifier, unique within a fetch
    id: String,
    /// Publication time
    #[builder(default, setter(into, strip_option))]
    created_time: Option<DateTime<Utc>>,
    /// Caption text (possibly empty)
    #[builder(default)]
    caption: String,
    /// Kind of attached media
    #[builder(default)]
    media_type: MediaType,
    /// URI of the media asset (possibly empty)
    #[builder(default)]
    source: String,
    /// Unique viewers
    #[builder(default)]
    reach: u64,
    /// Likes
    #[builder(default)]
    like_count: u64,
    /// Comments
    #[builder(default)]
    comments_count: u64,
    /// Saves
    #[builder(default)]
    saved: u64,
    /// Derived `like_count / reach`
    #[builder(setter(skip))]
    like_rate: LikeRate,
}

impl Post {
    /// Creates a new builder for `Post`.
    pub fn builder() -> PostBuilder {
        PostBuilder::default()
    }
}

impl PostBuilder {
    /// Builds the post and derives its engagement metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` was never set.
    pub fn build(&self) -> Result<Post, PostBuilderError> {
        let mut post = self.build_fields()?;
        post.like_rate = LikeRate::from_counts(post.like_count, post.reach);
        Ok(post)
    }
}
