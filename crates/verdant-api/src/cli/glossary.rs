//! Glossary CLI commands: browse sections, search, definition links.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use verdant_core::glossary::definition_path;

use crate::state::AppState;

/// Print every glossary section with its terms.
pub async fn show_glossary(state: &AppState, json: bool) -> Result<()> {
    let mut browser = state.glossary_browser()?;

    let spinner = super::chat::loop_runner::spinner("Loading glossary...");
    browser.load().await;
    spinner.finish_and_clear();

    let sections = browser.sections();
    if json {
        println!("{}", serde_json::to_string_pretty(sections)?);
        return Ok(());
    }

    if sections.is_empty() {
        println!();
        println!(
            "  {} No glossary terms available. Is the glossary service running at {}?",
            style("!").yellow().bold(),
            style(&state.config.glossary_api_url).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Section").fg(Color::White),
        Cell::new("Terms").fg(Color::White),
    ]);

    for section in sections {
        table.add_row(vec![
            Cell::new(&section.title).fg(Color::Cyan),
            Cell::new(section.terms.join(", ")).fg(Color::White),
        ]);
    }

    let term_count: usize = sections.iter().map(|s| s.terms.len()).sum();
    println!();
    println!("{table}");
    println!();
    println!(
        "  {} terms in {} sections",
        style(term_count).bold(),
        style(sections.len()).bold()
    );
    println!();

    Ok(())
}

/// Search the glossary and list matching terms with their definition links.
pub async fn search(state: &AppState, query: &str, json: bool) -> Result<()> {
    let mut browser = state.glossary_browser()?;
    browser.search(query).await;
    let results = browser.results();

    if json {
        let items: Vec<_> = results
            .iter()
            .map(|term| serde_json::json!({"term": term, "path": definition_path(term)}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!();
    if results.is_empty() {
        println!(
            "  {} No terms match '{}'.",
            style("i").blue().bold(),
            style(query.trim()).yellow()
        );
    } else {
        for term in results {
            println!(
                "  {}  {}",
                style(term).cyan(),
                style(definition_path(term)).dim()
            );
        }
    }
    println!();

    Ok(())
}

/// Print the definition link path for a term.
pub fn define(term: &str, json: bool) -> Result<()> {
    let path = definition_path(term);
    if json {
        println!("{}", serde_json::json!({"term": term, "path": path}));
    } else {
        println!("{path}");
    }
    Ok(())
}
