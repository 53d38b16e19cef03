//! Markdown rendering for generated notes.
//!
//! This module converts the loosely structured Markdown produced by the
//! note generation model into an HTML fragment. It understands `###`
//! headings, bold spans, fenced code blocks, bullet and numbered lists,
//! and treats every other line as a paragraph. Rendering is a pure
//! function of its input and never fails.

mod fences;
mod inline;
mod renderer;

pub use fences::{CodeBlock, Extraction, Segment, extract_code_blocks, html_escape};
pub use inline::emphasize;
pub use renderer::{Line, ListState, PRACTICAL_INPUT_LIMIT, render};
