//! Glossary page model: ordered sections, search state, definition links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, warn};

use verdant_types::glossary::{GlossaryIndex, GlossarySection, GlossaryView};

use crate::remote::GlossaryBackend;

/// Title of the section pinned to the top of the browse view.
const PINNED_SECTION: &str = "numbers & others";

/// Characters left unescaped in a definition link's query value.
const TERM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Convert a raw glossary index into display order.
///
/// The "numbers & others" section (any case) comes first; the rest follow by
/// title, compared case-insensitively. Terms keep their served order.
pub fn sort_sections(index: GlossaryIndex) -> Vec<GlossarySection> {
    let mut sections: Vec<GlossarySection> = index
        .into_iter()
        .map(|(title, terms)| GlossarySection { title, terms })
        .collect();

    sections.sort_by_cached_key(|s| {
        let folded = s.title.to_lowercase();
        (folded != PINNED_SECTION, folded)
    });
    sections
}

/// Link path of the definition page for `term`.
pub fn definition_path(term: &str) -> String {
    format!(
        "/glossary/definition?term={}",
        utf8_percent_encode(term, TERM_ENCODE_SET)
    )
}

/// State of the glossary page over a [`GlossaryBackend`].
pub struct GlossaryBrowser<B: GlossaryBackend> {
    backend: B,
    sections: Vec<GlossarySection>,
    query: String,
    results: Vec<String>,
    loading: bool,
}

impl<B: GlossaryBackend> GlossaryBrowser<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sections: Vec::new(),
            query: String::new(),
            results: Vec::new(),
            loading: false,
        }
    }

    pub fn sections(&self) -> &[GlossarySection] {
        &self.sections
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Which half of the page is visible.
    pub fn view(&self) -> GlossaryView {
        if self.query.trim().is_empty() {
            GlossaryView::Sections
        } else {
            GlossaryView::Results
        }
    }

    /// Fetch the glossary and replace the section list.
    ///
    /// A failed fetch leaves the list empty.
    #[tracing::instrument(name = "glossary_load", skip(self))]
    pub async fn load(&mut self) {
        self.loading = true;
        self.sections = match self.backend.fetch_glossary().await {
            Ok(index) => {
                let sections = sort_sections(index);
                debug!(sections = sections.len(), "Glossary loaded");
                sections
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch glossary");
                Vec::new()
            }
        };
        self.loading = false;
    }

    /// Record `query` and refresh the results.
    ///
    /// A blank query clears the results without contacting the service.
    #[tracing::instrument(name = "glossary_search", skip(self))]
    pub async fn search(&mut self, query: &str) {
        self.query = query.to_string();
        if query.trim().is_empty() {
            self.results.clear();
            return;
        }

        self.results = match self.backend.search(query).await {
            Ok(results) => {
                debug!(results = results.len(), "Glossary search complete");
                results
            }
            Err(e) => {
                warn!(error = %e, "Glossary search failed");
                Vec::new()
            }
        };
    }

    /// Clear the query and results, returning to the browse view.
    pub fn reset_search(&mut self) {
        self.query.clear();
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGlossaryBackend;

    fn index(entries: &[(&str, &[&str])]) -> GlossaryIndex {
        entries
            .iter()
            .map(|(title, terms)| {
                (
                    title.to_string(),
                    terms.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect()
    }

    fn titles(sections: &[GlossarySection]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_sort_sections_pins_numbers_first() {
        let sections = sort_sections(index(&[
            ("water", &["Greywater"]),
            ("Energy", &["Solar", "Wind"]),
            ("Numbers & Others", &["3R"]),
            ("biodiversity", &["Habitat"]),
        ]));
        assert_eq!(
            titles(&sections),
            vec!["Numbers & Others", "biodiversity", "Energy", "water"]
        );
        assert_eq!(sections[2].terms, vec!["Solar", "Wind"]);
    }

    #[test]
    fn test_sort_sections_without_pinned_section() {
        let sections = sort_sections(index(&[("b", &[]), ("A", &[]), ("c", &[])]));
        assert_eq!(titles(&sections), vec!["A", "b", "c"]);
    }

    #[test]
    fn test_definition_path_encodes_term() {
        assert_eq!(
            definition_path("Carbon footprint"),
            "/glossary/definition?term=Carbon%20footprint"
        );
        assert_eq!(
            definition_path("R&D (green)"),
            "/glossary/definition?term=R%26D%20(green)"
        );
        assert_eq!(definition_path("CO₂"), "/glossary/definition?term=CO%E2%82%82");
    }

    #[tokio::test]
    async fn test_load_orders_sections() {
        let backend = MockGlossaryBackend {
            index: Some(index(&[("Zero waste", &["Compost"]), ("numbers & others", &["5R"])])),
            ..Default::default()
        };
        let mut browser = GlossaryBrowser::new(backend);

        browser.load().await;
        assert_eq!(titles(browser.sections()), vec!["numbers & others", "Zero waste"]);
        assert!(!browser.is_loading());
    }

    #[tokio::test]
    async fn test_load_failure_leaves_empty_sections() {
        let mut browser = GlossaryBrowser::new(MockGlossaryBackend::default());
        browser.load().await;
        assert!(browser.sections().is_empty());
        assert!(!browser.is_loading());
    }

    #[tokio::test]
    async fn test_search_sets_results_and_view() {
        let backend = MockGlossaryBackend {
            results: Some(vec!["Solar panel".to_string(), "Solar farm".to_string()]),
            ..Default::default()
        };
        let searches = backend.searches.clone();
        let mut browser = GlossaryBrowser::new(backend);
        assert_eq!(browser.view(), GlossaryView::Sections);

        browser.search("solar").await;
        assert_eq!(browser.view(), GlossaryView::Results);
        assert_eq!(browser.query(), "solar");
        assert_eq!(browser.results().len(), 2);
        assert_eq!(*searches.lock().unwrap(), vec!["solar"]);
    }

    #[tokio::test]
    async fn test_blank_search_clears_without_request() {
        let backend = MockGlossaryBackend {
            results: Some(vec!["Wind".to_string()]),
            ..Default::default()
        };
        let searches = backend.searches.clone();
        let mut browser = GlossaryBrowser::new(backend);

        browser.search("wind").await;
        browser.search("   ").await;
        assert!(browser.results().is_empty());
        assert_eq!(browser.view(), GlossaryView::Sections);
        assert_eq!(searches.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_failure_yields_empty_results() {
        let mut browser = GlossaryBrowser::new(MockGlossaryBackend::default());
        browser.search("compost").await;
        assert!(browser.results().is_empty());
        assert_eq!(browser.view(), GlossaryView::Results);
    }

    #[tokio::test]
    async fn test_reset_search_returns_to_sections() {
        let backend = MockGlossaryBackend {
            results: Some(vec!["Wind".to_string()]),
            ..Default::default()
        };
        let mut browser = GlossaryBrowser::new(backend);
        browser.search("wind").await;

        browser.reset_search();
        assert_eq!(browser.query(), "");
        assert!(browser.results().is_empty());
        assert_eq!(browser.view(), GlossaryView::Sections);
    }
}
