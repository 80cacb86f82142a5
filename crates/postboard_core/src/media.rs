//! Media kinds attached to posts.

use serde::{Deserialize, Serialize};

/// Kind of media a post carries.
///
/// Values the pipeline does not know how to display are kept as
/// [`MediaType::Unrecognized`] rather than rejected, so a carousel or a
/// missing media type never costs a post its place on the board.
///
/// # Examples
///
/// ```
/// use postboard_core::MediaType;
///
/// assert_eq!(MediaType::parse("IMAGE"), MediaType::Image);
/// assert_eq!(MediaType::parse("video"), MediaType::Video);
/// assert_eq!(
///     MediaType::parse("carousel"),
///     MediaType::Unrecognized("carousel".to_string())
/// );
/// assert_eq!(format!("{}", MediaType::Image), "image");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Still image
    #[display("image")]
    Image,
    /// Video clip
    #[display("video")]
    Video,
    /// Anything else, verbatim as received (possibly empty)
    #[display("{}", _0)]
    Unrecognized(String),
}

impl MediaType {
    /// Parses a media type as the store reports it, ignoring case and
    /// surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("image") {
            MediaType::Image
        } else if trimmed.eq_ignore_ascii_case("video") {
            MediaType::Video
        } else {
            MediaType::Unrecognized(trimmed.to_string())
        }
    }

    /// Whether the renderer can show a media element for this kind.
    pub fn is_displayable(&self) -> bool {
        !matches!(self, MediaType::Unrecognized(_))
    }
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Unrecognized(String::new())
    }
}

impl From<&str> for MediaType {
    fn from(raw: &str) -> Self {
        MediaType::parse(raw)
    }
}
