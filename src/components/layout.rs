//! Page layout wrapper component

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Browser tab title of every generated page
pub const PAGE_TITLE: &str = "📝 TubeNotes AI";

/// Wraps page content with standard HTML structure
///
/// Provides DOCTYPE, html, head, and container structure. The stylesheet
/// is embedded so the written file is self contained and can be opened
/// or shared without any asset directory.
///
/// # Arguments
///
/// * `lang`: Document language code
/// * `stylesheet`: CSS rules placed in a `style` element
/// * `header`: Top level heading text
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(lang: &str, stylesheet: &str, header: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (PAGE_TITLE) }
                style { (PreEscaped(stylesheet)) }
            }
            body {
                div class="container" {
                    h1 { (header) }
                    (body)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wrapper_structure() {
        // Arrange
        let body = html! { p { "content" } };

        // Act
        let page = page_wrapper("en", "h1 { color: red; }", "Header <b>", body).into_string();

        // Assert
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<html lang=\"en\">"));
        assert!(page.contains("<title>📝 TubeNotes AI</title>"));
        assert!(page.contains("<style>h1 { color: red; }</style>"));
        assert!(
            page.contains("<h1>Header &lt;b&gt;</h1>"),
            "Header text should be escaped"
        );
        assert!(page.contains("<div class=\"container\"><h1>"));
        assert!(page.contains("<p>content</p>"));
    }
}
