//! Bundled stylesheet for generated pages

const NOTES: &str = include_str!("../assets/notes.css");

/// Stylesheet embedded in every notes page
pub fn stylesheet() -> &'static str {
    NOTES
}
