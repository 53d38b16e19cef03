//! Shared test utilities for integration tests.
//!
//! Provides fake collaborators and fixture helpers used across multiple
//! test files.

#![allow(dead_code)]

use anyhow::Result;
use std::cell::RefCell;
use std::path::Path;
use tubenotes::{GenerationError, NoteGenerator};

/// Generator replaying queued responses in order.
///
/// Records every prompt so tests can assert on what was sent.
pub struct ScriptedGenerator {
    responses: RefCell<Vec<Result<String, GenerationError>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().rev().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Generator answering every prompt with the same text.
    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl NoteGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop()
            .unwrap_or(Err(GenerationError::Empty))
    }
}

/// Writes file, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Reverses the escaping applied to code block content.
pub fn html_unescape(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Extracts the inner text of every `<pre><code ...>` element.
pub fn code_contents(html: &str) -> Vec<String> {
    let mut contents = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find("<pre><code") {
        let after_tag = &rest[start + "<pre><code".len()..];
        let Some(open_end) = after_tag.find('>') else {
            break;
        };
        let body = &after_tag[open_end + 1..];
        let Some(close) = body.find("</code></pre>") else {
            break;
        };
        contents.push(body[..close].to_string());
        rest = &body[close..];
    }

    contents
}
