//! Page generation modules
//!
//! Each page module builds a complete document from rendered content and
//! the shared layout components, and knows how to write itself to disk.

pub mod notes;
