//! Notes page generation

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::assets::stylesheet;
use crate::components::layout::page_wrapper;
use crate::markdown::render;
use crate::prompts::Language;
use crate::video::VideoId;

/// MIME type of written notes pages.
pub const MIME_TYPE: &str = "text/html";

/// File stem used when no notes name is given.
pub const DEFAULT_FILE_STEM: &str = "video_summary";

/// Data container for notes page generation.
pub struct NotesPage<'a> {
    pub header_title: &'a str,
    pub language: Language,
    pub video: Option<&'a VideoId>,
    pub markdown: &'a str,
}

/// Generates the downloadable notes page.
///
/// Renders the notes Markdown to HTML and embeds it in the standard page
/// layout below the header and, when the video is known, a linked
/// thumbnail.
///
/// # Arguments
///
/// * `data`: Notes page data container
///
/// # Returns
///
/// Complete HTML markup for the notes page
pub fn generate(data: &NotesPage<'_>) -> Markup {
    let fragment = render(data.markdown);

    let body = html! {
        @if let Some(video) = data.video {
            a class="video-thumbnail" href=(video.watch_url()) {
                img src=(video.thumbnail_url()) alt=(format!("Thumbnail of video {}", video));
            }
        }
        (PreEscaped(fragment))
    };

    page_wrapper(data.language.code(), stylesheet(), data.header_title, body)
}

/// Returns the file name for a notes page.
///
/// Characters outside letters, digits, `-`, `_`, `.` and spaces are
/// replaced with `_` so the name cannot escape the output directory.
///
/// # Arguments
///
/// * `name`: Notes name chosen by the user, if any
///
/// # Returns
///
/// File name ending in `.html`
pub fn file_name(name: Option<&str>) -> String {
    let stem: String = name
        .map(str::trim)
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem = stem.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if stem.is_empty() {
        format!("{}.html", DEFAULT_FILE_STEM)
    } else if stem.ends_with(".html") {
        stem.to_string()
    } else {
        format!("{}.html", stem)
    }
}

/// Writes page markup into the output directory.
///
/// # Errors
///
/// Returns error if the directory cannot be created or the file cannot be
/// written
pub fn write(page: &str, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let path = output_dir.join(file_name);
    fs::write(&path, page)
        .with_context(|| format!("Failed to write notes page: {}", path.display()))?;

    debug!(path = %path.display(), bytes = page.len(), mime = MIME_TYPE, "Wrote notes page");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_embeds_rendered_notes() {
        // Arrange
        let data = NotesPage {
            header_title: "📘 Technical Notes",
            language: Language::default(),
            video: None,
            markdown: "### Summary\nSome **bold** text",
        };

        // Act
        let html = generate(&data).into_string();

        // Assert
        assert!(html.contains("<h1>📘 Technical Notes</h1>"));
        assert!(html.contains("<h2>Summary</h2>"));
        assert!(html.contains("<p>Some <strong>bold</strong> text</p>"));
        assert!(html.contains("<style>"));
        assert!(
            !html.contains("video-thumbnail\""),
            "No thumbnail without a video"
        );
    }

    #[test]
    fn test_generate_with_video_thumbnail() {
        // Arrange
        let video = VideoId::new("abc123").expect("Identifier should be valid");
        let data = NotesPage {
            header_title: "Notes",
            language: Language::from_code("hi").expect("Hindi should be registered"),
            video: Some(&video),
            markdown: "text",
        };

        // Act
        let html = generate(&data).into_string();

        // Assert
        assert!(html.contains("<html lang=\"hi\">"));
        assert!(html.contains("https://img.youtube.com/vi/abc123/0.jpg"));
        assert!(html.contains("href=\"https://www.youtube.com/watch?v=abc123\""));
    }

    #[test]
    fn test_file_name_default() {
        assert_eq!(file_name(None), "video_summary.html");
        assert_eq!(file_name(Some("   ")), "video_summary.html");
    }

    #[test]
    fn test_file_name_from_notes_name() {
        assert_eq!(file_name(Some("Rust Async")), "Rust Async.html");
        assert_eq!(file_name(Some("notes.html")), "notes.html");
    }

    #[test]
    fn test_file_name_replaces_path_separators() {
        // Arrange & Act
        let name = file_name(Some("../../etc/passwd"));

        // Assert
        assert!(!name.contains('/'));
        assert_eq!(name, "_.._etc_passwd.html");
    }

    #[test]
    fn test_write_creates_directory() {
        // Arrange
        let dir = TempDir::new().expect("Should create temp dir");
        let output = dir.path().join("nested").join("dist");

        // Act
        let path = write("<p>hi</p>", &output, "notes.html").expect("Should write page");

        // Assert
        assert_eq!(path, output.join("notes.html"));
        let content = fs::read_to_string(&path).expect("Should read page back");
        assert_eq!(content, "<p>hi</p>");
    }
}
