//! Page-level parsing: locate the title and content container in a fetched
//! document, flatten the content into typed nodes, and hand them to the
//! extractor for the record kind being queried.

pub mod extract;
pub mod nodes;
pub mod runs;

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::{Error, Result};
use crate::records::{DnDClass, Spell, SpellSummary, Subclass};
use nodes::{classify_children, collect_table_rows, ContentNode};

static PAGE_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".page-title").unwrap());
static PAGE_CONTENT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#page-content").unwrap());
static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

pub fn parse_class(html: &str) -> Result<DnDClass> {
    let document = Html::parse_document(html);
    let name = page_title(&document)?;
    let nodes = content_nodes(&document)?;
    extract::class::extract(name, &nodes)
}

pub fn parse_subclass(class_name: &str, html: &str) -> Result<Subclass> {
    let document = Html::parse_document(html);
    let title = page_title(&document)?;
    let nodes = content_nodes(&document)?;
    extract::subclass::extract(class_name, &title, &nodes)
}

pub fn parse_spell(html: &str) -> Result<Spell> {
    let document = Html::parse_document(html);
    let name = page_title(&document)?;
    let nodes = content_nodes(&document)?;
    extract::spell::extract(name, &nodes)
}

pub fn parse_spell_list(html: &str, short: bool) -> Result<Vec<SpellSummary>> {
    let document = Html::parse_document(html);
    let rows = collect_table_rows(&document);
    extract::spell_list::extract(&rows, short)
}

/// Link text of every subclass anchor (`/{class}:…`) on a class page,
/// deduplicated in document order.
pub fn parse_subclass_names(class_name: &str, html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let prefix = format!("/{}:", class_name.to_lowercase());
    let mut names: Vec<String> = Vec::new();
    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.starts_with(&prefix) {
            continue;
        }
        let text = anchor.text().collect::<String>().trim().to_string();
        if !text.is_empty() && !names.contains(&text) {
            names.push(text);
        }
    }
    names
}

fn page_title(document: &Html) -> Result<String> {
    document
        .select(&PAGE_TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| Error::layout("no page title element"))
}

fn content_nodes(document: &Html) -> Result<Vec<ContentNode>> {
    let root = document
        .select(&PAGE_CONTENT_SELECTOR)
        .next()
        .ok_or_else(|| Error::layout("no page content container"))?;
    Ok(classify_children(root))
}
