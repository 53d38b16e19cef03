//! Reusable HTML components for page generation
//!
//! Maud component functions shared by generated pages. Currently the
//! document layout wrapper, which owns the head, embedded stylesheet and
//! page header.

pub mod layout;
