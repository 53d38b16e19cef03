//! Transcript sources.
//!
//! A transcript source turns a video identifier into the full spoken text
//! of the video. The bundled [`LocalTranscripts`] store reads transcripts
//! saved on disk, either as the timed segment list returned by transcript
//! APIs (`<id>.json`) or as plain text (`<id>.txt`).

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::video::VideoId;

/// Failure to obtain a transcript for a video.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("no transcript found for video {0}")]
    NotFound(VideoId),

    #[error("transcripts are disabled for video {0}")]
    Disabled(VideoId),

    #[error("failed to read transcript {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed transcript segments in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of video transcripts.
pub trait TranscriptSource {
    /// Returns the full transcript text for a video.
    ///
    /// # Errors
    ///
    /// Returns error when the transcript is missing, disabled or unreadable
    fn fetch(&self, video: &VideoId) -> Result<String, TranscriptError>;
}

/// One timed caption entry of a transcript.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

/// Joins segment texts with single spaces in their original order.
///
/// Segment text is trimmed and segments without text are skipped.
pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transcript store backed by a directory of saved transcripts.
#[derive(Debug, Clone)]
pub struct LocalTranscripts {
    root: PathBuf,
}

impl LocalTranscripts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(path: &Path) -> Result<Option<String>, TranscriptError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TranscriptError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TranscriptSource for LocalTranscripts {
    fn fetch(&self, video: &VideoId) -> Result<String, TranscriptError> {
        let json_path = self.root.join(format!("{}.json", video));
        let text_path = self.root.join(format!("{}.txt", video));

        let transcript = if let Some(content) = Self::read(&json_path)? {
            debug!(path = %json_path.display(), "Reading transcript segments");
            let segments: Vec<TranscriptSegment> =
                serde_json::from_str(&content).map_err(|source| TranscriptError::Malformed {
                    path: json_path.clone(),
                    source,
                })?;
            join_segments(&segments)
        } else if let Some(content) = Self::read(&text_path)? {
            debug!(path = %text_path.display(), "Reading plain transcript");
            content.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            return Err(TranscriptError::NotFound(video.clone()));
        };

        if transcript.is_empty() {
            return Err(TranscriptError::Disabled(video.clone()));
        }

        Ok(transcript)
    }
}
