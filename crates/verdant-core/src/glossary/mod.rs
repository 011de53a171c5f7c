//! Glossary browsing.
//!
//! `GlossaryBrowser` (in `browser`) fetches the term index from the remote
//! glossary service, orders it into sections, and tracks the active search.

pub mod browser;

pub use browser::{definition_path, sort_sections, GlossaryBrowser};
