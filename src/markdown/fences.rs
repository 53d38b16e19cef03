//! Fenced code block extraction.

/// Marker that opens and closes a fenced block.
const FENCE: &str = "```";

/// Piece of working text produced by [`extract_code_blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text between (or around) fenced blocks.
    Text(&'a str),
    /// Index into [`Extraction::blocks`].
    Code(usize),
}

/// Fenced code block captured from the input.
///
/// Content is stored raw; escaping happens only when the block is emitted
/// as HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    language: String,
    content: String,
}

impl CodeBlock {
    fn new(language: &str, content: &str) -> Self {
        Self {
            language: language.to_lowercase(),
            content: content.trim_start_matches('\n').trim_end().to_string(),
        }
    }

    /// Language tag from the opening fence, lower cased. Empty when absent.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Raw block content without the fence lines.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Renders the block as a `pre`/`code` element with escaped content.
    pub fn to_html(&self) -> String {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            self.language,
            html_escape(&self.content)
        )
    }
}

/// Working text split into literal segments and extracted code blocks.
///
/// Segments appear in input order and reference blocks by discovery
/// index, so no sentinel text is ever written into the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction<'a> {
    pub segments: Vec<Segment<'a>>,
    pub blocks: Vec<CodeBlock>,
}

impl<'a> Extraction<'a> {
    /// Returns the block a [`Segment::Code`] index refers to.
    pub fn block(&self, index: usize) -> Option<&CodeBlock> {
        self.blocks.get(index)
    }
}

/// Splits text into literal segments and fenced code blocks.
///
/// An opening fence is three backticks, an optional language tag made of
/// word characters, then a line break. The block ends at the next three
/// backticks. A candidate opening fence that is not followed by a tag and
/// line break is skipped and the search resumes one character later. When
/// no closing fence follows, the remaining text stays literal.
///
/// # Arguments
///
/// * `text`: Document text with `\n` line endings
///
/// # Returns
///
/// Ordered segments plus the side table of extracted blocks
pub fn extract_code_blocks(text: &str) -> Extraction<'_> {
    let mut extraction = Extraction::default();
    let mut literal_start = 0;
    let mut search_pos = 0;

    while let Some(offset) = text[search_pos..].find(FENCE) {
        let fence_start = search_pos + offset;
        let lang_start = fence_start + FENCE.len();
        let lang_end = text[lang_start..]
            .find(|c: char| !is_word_char(c))
            .map_or(text.len(), |pos| lang_start + pos);

        if !text[lang_end..].starts_with('\n') {
            search_pos = fence_start + 1;
            continue;
        }

        let content_start = lang_end + 1;
        let Some(close_offset) = text[content_start..].find(FENCE) else {
            // Every later candidate would need a closing fence past this point
            break;
        };
        let content_end = content_start + close_offset;

        if fence_start > literal_start {
            extraction
                .segments
                .push(Segment::Text(&text[literal_start..fence_start]));
        }

        extraction.blocks.push(CodeBlock::new(
            &text[lang_start..lang_end],
            &text[content_start..content_end],
        ));
        extraction
            .segments
            .push(Segment::Code(extraction.blocks.len() - 1));

        literal_start = content_end + FENCE.len();
        search_pos = literal_start;
    }

    if literal_start < text.len() {
        extraction
            .segments
            .push(Segment::Text(&text[literal_start..]));
    }

    extraction
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Escapes HTML special characters.
///
/// # Arguments
///
/// * `text`: Plain text to escape
///
/// # Returns
///
/// HTML safe string
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_block_with_language() {
        // Arrange
        let text = "intro\n```rust\nfn main() {}\n```\noutro";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert_eq!(
            extraction.segments,
            vec![
                Segment::Text("intro\n"),
                Segment::Code(0),
                Segment::Text("\noutro"),
            ]
        );
        assert_eq!(extraction.blocks.len(), 1);
        assert_eq!(extraction.blocks[0].language(), "rust");
        assert_eq!(extraction.blocks[0].content(), "fn main() {}");
    }

    #[test]
    fn test_extract_block_without_language() {
        // Arrange
        let text = "```\nplain\n```";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert_eq!(extraction.segments, vec![Segment::Code(0)]);
        assert_eq!(extraction.blocks[0].language(), "");
        assert_eq!(
            extraction.blocks[0].to_html(),
            "<pre><code class=\"language-\">plain</code></pre>"
        );
    }

    #[test]
    fn test_extract_blocks_indexed_in_discovery_order() {
        // Arrange
        let text = "```bash\nls\n```\nbetween\n```python\nprint(1)\n```";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert_eq!(
            extraction.segments,
            vec![
                Segment::Code(0),
                Segment::Text("\nbetween\n"),
                Segment::Code(1),
            ]
        );
        assert_eq!(extraction.block(0).map(CodeBlock::language), Some("bash"));
        assert_eq!(extraction.block(1).map(CodeBlock::language), Some("python"));
        assert!(extraction.block(2).is_none());
    }

    #[test]
    fn test_extract_unterminated_fence_stays_literal() {
        // Arrange
        let text = "```python\nprint(1)";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert!(extraction.blocks.is_empty());
        assert_eq!(extraction.segments, vec![Segment::Text(text)]);
    }

    #[test]
    fn test_extract_fence_with_non_word_tag_is_skipped() {
        // Arrange
        let text = "```c++\nint x;\n```";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert!(
            extraction.blocks.is_empty(),
            "Tag with punctuation should not open a block"
        );
        assert_eq!(extraction.segments, vec![Segment::Text(text)]);
    }

    #[test]
    fn test_extract_retries_after_failed_candidate() {
        // Arrange: fourth backtick shifts the valid fence by one position
        let text = "````js\nlet a = 1;\n```";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert_eq!(extraction.blocks.len(), 1);
        assert_eq!(extraction.blocks[0].language(), "js");
        assert_eq!(extraction.segments, vec![Segment::Text("`"), Segment::Code(0)]);
    }

    #[test]
    fn test_extract_lowercases_language() {
        // Arrange
        let text = "```Python\nx = 1\n```";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert_eq!(extraction.blocks[0].language(), "python");
    }

    #[test]
    fn test_extract_empty_block() {
        // Arrange
        let text = "```\n```";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert_eq!(extraction.blocks.len(), 1);
        assert_eq!(extraction.blocks[0].content(), "");
    }

    #[test]
    fn test_extract_preserves_inner_indentation() {
        // Arrange
        let text = "```python\ndef f():\n    return 1\n```";

        // Act
        let extraction = extract_code_blocks(text);

        // Assert
        assert_eq!(extraction.blocks[0].content(), "def f():\n    return 1");
    }

    #[test]
    fn test_code_block_html_escapes_content() {
        // Arrange
        let text = "```html\n<script>alert(\"x\" & 'y')</script>\n```";

        // Act
        let html = extract_code_blocks(text).blocks[0].to_html();

        // Assert
        assert_eq!(
            html,
            "<pre><code class=\"language-html\">&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;</code></pre>"
        );
    }

    #[test]
    fn test_html_escape_plain_text_unchanged() {
        // Arrange & Act
        let escaped = html_escape("nothing special here");

        // Assert
        assert_eq!(escaped, "nothing special here");
    }
}
