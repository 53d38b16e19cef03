//! Video identifier parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Identifier of a hosted video.
///
/// Only ASCII letters, digits, `-` and `_` are accepted, which keeps the
/// identifier safe to embed in URLs and file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

/// Error returned when a string holds neither a video URL nor an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a video link or identifier: {0}")]
pub struct InvalidVideoId(pub String);

impl VideoId {
    /// Creates an identifier after validating its characters.
    pub fn new(id: &str) -> Option<Self> {
        let id = id.trim();
        let valid = !id.is_empty()
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| Self(id.to_string()))
    }

    /// Extracts the identifier from a share, watch, shorts or embed link.
    ///
    /// # Arguments
    ///
    /// * `link`: Video URL such as `https://youtu.be/<id>` or
    ///   `https://www.youtube.com/watch?v=<id>`
    ///
    /// # Returns
    ///
    /// Identifier when the link points at a single video
    pub fn from_url(link: &str) -> Option<Self> {
        let url = Url::parse(link.trim()).ok()?;
        let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

        match host {
            "youtu.be" => url.path_segments()?.next().and_then(Self::new),
            "youtube.com" | "youtube-nocookie.com" => {
                let mut segments = url.path_segments()?;
                match segments.next() {
                    Some("watch") => url
                        .query_pairs()
                        .find(|(key, _)| key == "v")
                        .and_then(|(_, value)| Self::new(&value)),
                    Some("shorts") | Some("embed") | Some("live") => {
                        segments.next().and_then(Self::new)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Preview image for the video.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }

    /// Canonical watch page for the video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = InvalidVideoId;

    /// Accepts either a video link or a bare identifier.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_url(value)
            .or_else(|| Self::new(value))
            .ok_or_else(|| InvalidVideoId(value.to_string()))
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
