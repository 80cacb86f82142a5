//! Top-N ranking of posts.

use derive_getters::Getters;
use postboard_core::Post;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Metric a leaderboard is ranked by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum RankKey {
    /// Unique viewers
    #[default]
    #[display("reach")]
    Reach,
    /// Likes
    #[display("like_count")]
    LikeCount,
    /// Comments
    #[display("comments_count")]
    CommentsCount,
    /// Saves
    #[display("saved")]
    Saved,
    /// Likes per unit of reach
    #[display("like_rate")]
    LikeRate,
}

impl RankKey {
    /// Configuration name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            RankKey::Reach => "reach",
            RankKey::LikeCount => "like_count",
            RankKey::CommentsCount => "comments_count",
            RankKey::Saved => "saved",
            RankKey::LikeRate => "like_rate",
        }
    }

    /// The post's value for this key, or `None` when it is undefined.
    pub fn value(&self, post: &Post) -> Option<RankValue> {
        match self {
            RankKey::Reach => Some(RankValue::Count(*post.reach())),
            RankKey::LikeCount => Some(RankValue::Count(*post.like_count())),
            RankKey::CommentsCount => Some(RankValue::Count(*post.comments_count())),
            RankKey::Saved => Some(RankValue::Count(*post.saved())),
            RankKey::LikeRate => post.like_rate().value().map(RankValue::Rate),
        }
    }
}

/// A ranking key value.
///
/// Counts compare as integers so large values keep their order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankValue {
    /// Raw count metric
    Count(u64),
    /// Derived ratio
    Rate(f64),
}

impl RankValue {
    /// Total order over values; counts sort below rates.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RankValue::Count(a), RankValue::Count(b)) => a.cmp(b),
            (RankValue::Rate(a), RankValue::Rate(b)) => a.total_cmp(b),
            (RankValue::Count(_), RankValue::Rate(_)) => Ordering::Less,
            (RankValue::Rate(_), RankValue::Count(_)) => Ordering::Greater,
        }
    }
}

impl std::str::FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reach" => Ok(RankKey::Reach),
            "like_count" | "likes" => Ok(RankKey::LikeCount),
            "comments_count" | "comments" => Ok(RankKey::CommentsCount),
            "saved" | "saves" => Ok(RankKey::Saved),
            "like_rate" => Ok(RankKey::LikeRate),
            other => Err(format!("Unknown rank key: {}", other)),
        }
    }
}

/// Sort direction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum RankDirection {
    /// Highest first
    #[default]
    #[display("descending")]
    Descending,
    /// Lowest first
    #[display("ascending")]
    Ascending,
}

/// A post with its 1-based position on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct RankedPost {
    /// 1-based rank
    rank: usize,
    /// The post
    post: Post,
}

impl RankedPost {
    /// Consumes the entry, yielding the post.
    pub fn into_post(self) -> Post {
        self.post
    }
}

/// Orders posts by a key and keeps the first `top_n`.
///
/// Sorting is stable: equal keys keep fetch order. Posts whose key is
/// undefined go last whichever the direction.
///
/// # Examples
///
/// ```
/// use postboard_core::Post;
/// use postboard_pipeline::{RankKey, Ranker};
///
/// let posts = [100u64, 0, 50]
///     .iter()
///     .enumerate()
///     .map(|(i, reach)| Post::builder().id(format!("p{}", i)).reach(*reach).build().unwrap())
///     .collect();
///
/// let ranked = Ranker::new(RankKey::Reach, 2).rank(posts);
/// let ids: Vec<_> = ranked.iter().map(|r| r.post().id().as_str()).collect();
/// assert_eq!(ids, vec!["p0", "p2"]);
/// assert_eq!(*ranked[1].rank(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Ranker {
    key: RankKey,
    direction: RankDirection,
    top_n: usize,
}

impl Ranker {
    /// Creates a descending ranker.
    pub fn new(key: RankKey, top_n: usize) -> Self {
        Self {
            key,
            direction: RankDirection::Descending,
            top_n,
        }
    }

    /// Sets the sort direction.
    pub fn with_direction(mut self, direction: RankDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Ranks `posts`, which must be in fetch order.
    #[instrument(skip(self, posts), fields(key = %self.key, top_n = self.top_n, posts = posts.len()))]
    pub fn rank(&self, posts: Vec<Post>) -> Vec<RankedPost> {
        let mut keyed: Vec<(usize, Option<RankValue>, Post)> = posts
            .into_iter()
            .enumerate()
            .map(|(index, post)| (index, self.key.value(&post), post))
            .collect();

        keyed.sort_by(|(ia, a, _), (ib, b, _)| {
            self.compare(a.as_ref(), b.as_ref()).then(ia.cmp(ib))
        });
        keyed.truncate(self.top_n);

        let ranked: Vec<RankedPost> = keyed
            .into_iter()
            .enumerate()
            .map(|(position, (_, _, post))| RankedPost {
                rank: position + 1,
                post,
            })
            .collect();

        debug!(ranked = ranked.len(), "Ranked posts");
        ranked
    }

    fn compare(&self, a: Option<&RankValue>, b: Option<&RankValue>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => match self.direction {
                RankDirection::Descending => b.total_cmp(a),
                RankDirection::Ascending => a.total_cmp(b),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
