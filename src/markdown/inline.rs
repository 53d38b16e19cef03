//! Inline bold span substitution.

const BOLD_MARKER: &str = "**";

/// Opening tag emitted for bold spans.
pub(crate) const STRONG_OPEN: &str = "<strong>";
const STRONG_CLOSE: &str = "</strong>";

/// Replaces every `**text**` pair in a line with a `strong` element.
///
/// Pairs are matched left to right with the shortest enclosed span. A
/// marker without a partner is left in place.
pub fn emphasize(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find(BOLD_MARKER) {
        let after_open = &rest[open + BOLD_MARKER.len()..];
        let Some(close) = after_open.find(BOLD_MARKER) else {
            break;
        };

        result.push_str(&rest[..open]);
        result.push_str(STRONG_OPEN);
        result.push_str(&after_open[..close]);
        result.push_str(STRONG_CLOSE);

        rest = &after_open[close + BOLD_MARKER.len()..];
    }

    result.push_str(rest);
    result
}
