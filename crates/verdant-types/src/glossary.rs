//! Glossary types for Verdant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw glossary payload: category name to the terms filed under it.
pub type GlossaryIndex = BTreeMap<String, Vec<String>>;

/// A titled group of glossary terms, as shown in the browse view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossarySection {
    pub title: String,
    pub terms: Vec<String>,
}

/// Which half of the glossary page is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlossaryView {
    /// No active query: browse all sections.
    Sections,
    /// A query is active: show search results.
    Results,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glossary_index_deserialize() {
        let json = r#"{"Energy":["Solar","Wind"],"Numbers & Others":["3R"]}"#;
        let index: GlossaryIndex = serde_json::from_str(json).unwrap();
        assert_eq!(index["Energy"], vec!["Solar", "Wind"]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_glossary_view_serde() {
        let json = serde_json::to_string(&GlossaryView::Results).unwrap();
        assert_eq!(json, "\"results\"");
    }
}
