//! Line oriented Markdown to HTML rendering.

use tracing::trace;

use super::fences::{Extraction, Segment, extract_code_blocks};
use super::inline::{STRONG_OPEN, emphasize};

/// Largest input the renderer is expected to handle comfortably.
///
/// The whole document is buffered in memory several times over (input,
/// token stream, output lines), so inputs beyond a few hundred kilobytes
/// are outside the supported range. Larger inputs still render.
pub const PRACTICAL_INPUT_LIMIT: usize = 512 * 1024;

const HEADING_MARKER: &str = "### ";

/// Kind of list container currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    None,
    Bulleted,
    Numbered,
}

impl ListState {
    fn open_tag(self) -> Option<&'static str> {
        match self {
            ListState::None => None,
            ListState::Bulleted => Some("<ul>"),
            ListState::Numbered => Some("<ol>"),
        }
    }

    fn close_tag(self) -> Option<&'static str> {
        match self {
            ListState::None => None,
            ListState::Bulleted => Some("</ul>"),
            ListState::Numbered => Some("</ol>"),
        }
    }
}

/// Classification of a single trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Empty line or a heading marker with no text.
    Blank,
    Heading(String),
    NumberedItem(String),
    BulletItem(String),
    Paragraph(String),
}

impl Line {
    /// Classifies one line after trimming and bold substitution.
    ///
    /// Headings take precedence over list markers, and numbered items over
    /// bullets. A line starting with `-` or `*` that already holds a bold
    /// span is treated as a paragraph.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || is_empty_heading(trimmed) {
            return Line::Blank;
        }

        Self::from_parts(&emphasize(trimmed), "")
    }

    /// Classifies a line by its leading text, appending already rendered
    /// inline content to the element text.
    fn from_parts(lead: &str, tail: &str) -> Self {
        let join = |text: &str| format!("{}{}", text.trim_start(), tail);

        let heading = lead
            .strip_prefix(HEADING_MARKER)
            .map(join)
            .filter(|text| !text.trim().is_empty());
        if let Some(text) = heading {
            return Line::Heading(text.trim_end().to_string());
        }

        if let Some(text) = numbered_item_text(lead) {
            return Line::NumberedItem(join(text));
        }

        if lead.starts_with(['-', '*']) && !lead.contains(STRONG_OPEN) && !tail.contains(STRONG_OPEN)
        {
            return Line::BulletItem(join(lead.trim_start_matches(['-', '*'])));
        }

        Line::Paragraph(format!("{}{}", lead, tail))
    }
}

/// Line made only of one to three `#` characters.
fn is_empty_heading(line: &str) -> bool {
    let hashes = line.trim_end();
    (1..=3).contains(&hashes.len()) && hashes.bytes().all(|b| b == b'#')
}

/// Text after a `digits. ` prefix, if the line has one.
fn numbered_item_text(line: &str) -> Option<&str> {
    let after_digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() == line.len() {
        return None;
    }

    let after_dot = after_digits.strip_prefix('.')?;
    if !after_dot.starts_with(char::is_whitespace) {
        return None;
    }

    Some(after_dot.trim_start())
}

/// Accumulates output lines and tracks the open list container.
struct BlockWriter {
    lines: Vec<String>,
    list: ListState,
}

impl BlockWriter {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            list: ListState::None,
        }
    }

    fn push(&mut self, html: String) {
        self.lines.push(html);
    }

    fn push_block(&mut self, extraction: &Extraction<'_>, index: usize) {
        if let Some(block) = extraction.block(index) {
            self.lines.push(block.to_html());
        }
    }

    fn close_list(&mut self) {
        if let Some(tag) = self.list.close_tag() {
            self.lines.push(tag.to_string());
        }
        self.list = ListState::None;
    }

    fn ensure_list(&mut self, kind: ListState) {
        if self.list == kind {
            return;
        }
        self.close_list();
        if let Some(tag) = kind.open_tag() {
            self.lines.push(tag.to_string());
        }
        self.list = kind;
    }

    fn line(&mut self, line: Line) {
        match line {
            Line::Blank => self.close_list(),
            Line::Heading(text) => {
                self.close_list();
                self.push(format!("<h2>{text}</h2>"));
            }
            Line::NumberedItem(text) => {
                self.ensure_list(ListState::Numbered);
                self.push(format!("<li>{text}</li>"));
            }
            Line::BulletItem(text) => {
                self.ensure_list(ListState::Bulleted);
                self.push(format!("<li>{text}</li>"));
            }
            Line::Paragraph(text) => {
                self.close_list();
                self.push(format!("<p>{text}</p>"));
            }
        }
    }

    fn finish(mut self) -> String {
        self.close_list();
        self.lines.join("\n")
    }
}

/// Renders LLM produced Markdown into an HTML fragment.
///
/// Supports `###` headings, `**bold**` spans, fenced code blocks, bullet
/// lists, numbered lists and paragraphs. Code content is HTML escaped,
/// everything else passes through as written. The result is a fragment
/// with one element per line and no surrounding document.
///
/// # Arguments
///
/// * `markdown`: Generated notes text
///
/// # Returns
///
/// HTML fragment, empty for blank input
pub fn render(markdown: &str) -> String {
    let normalized = markdown.trim().replace("\r\n", "\n").replace('\r', "\n");
    let extraction = extract_code_blocks(&normalized);

    trace!(
        segments = extraction.segments.len(),
        code_blocks = extraction.blocks.len(),
        "Extracted fenced code blocks"
    );

    render_segments(&extraction)
}

fn render_segments(extraction: &Extraction<'_>) -> String {
    let mut writer = BlockWriter::new();

    for pieces in source_lines(&extraction.segments) {
        render_line(&mut writer, &trim_pieces(&pieces), extraction);
    }

    writer.finish()
}

/// Regroups the token stream into source lines.
///
/// A code block belongs to the line its opening fence starts on, and text
/// following the closing fence continues that line.
fn source_lines<'a>(segments: &[Segment<'a>]) -> Vec<Vec<Segment<'a>>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for segment in segments {
        match *segment {
            Segment::Text(text) => {
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        lines.push(std::mem::take(&mut current));
                    }
                    if !part.is_empty() {
                        current.push(Segment::Text(part));
                    }
                }
            }
            Segment::Code(index) => current.push(Segment::Code(index)),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Trims surrounding whitespace of a line, dropping text left empty.
fn trim_pieces<'a>(pieces: &[Segment<'a>]) -> Vec<Segment<'a>> {
    let mut trimmed = pieces.to_vec();

    if let Some(Segment::Text(text)) = trimmed.first_mut() {
        let lead: &'a str = *text;
        *text = lead.trim_start();
    }
    if let Some(Segment::Text(text)) = trimmed.last_mut() {
        let end: &'a str = *text;
        *text = end.trim_end();
    }

    trimmed.retain(|piece| !matches!(piece, Segment::Text(text) if text.is_empty()));
    trimmed
}

fn render_line(writer: &mut BlockWriter, pieces: &[Segment<'_>], extraction: &Extraction<'_>) {
    match pieces {
        [] => writer.line(Line::Blank),
        [Segment::Text(text)] => writer.line(Line::classify(text)),
        [Segment::Text(lead), rest @ ..] => {
            let tail = inline_html(rest, extraction);
            writer.line(Line::from_parts(&emphasize(lead), &tail));
        }
        [Segment::Code(_), ..] => {
            // Fence at line start: the blocks stand alone and the rest of the
            // line is rendered after them
            writer.close_list();
            let split = pieces
                .iter()
                .position(|piece| matches!(piece, Segment::Text(_)))
                .unwrap_or(pieces.len());
            for piece in &pieces[..split] {
                if let Segment::Code(index) = *piece {
                    writer.push_block(extraction, index);
                }
            }
            if split < pieces.len() {
                render_line(writer, &trim_pieces(&pieces[split..]), extraction);
            }
        }
    }
}

/// Renders trailing line pieces with bold substitution and code blocks.
fn inline_html(pieces: &[Segment<'_>], extraction: &Extraction<'_>) -> String {
    pieces
        .iter()
        .map(|piece| match *piece {
            Segment::Text(text) => emphasize(text),
            Segment::Code(index) => extraction
                .block(index)
                .map(|block| block.to_html())
                .unwrap_or_default(),
        })
        .collect()
}
