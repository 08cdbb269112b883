use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static FLOW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h1, h2, h3, h4, h5, ul, table").unwrap());
static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th, td").unwrap());
static LI_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

/// One direct child of the content container, classified by kind. Grouping
/// into features is implied only by document order and heading boundaries,
/// so downstream code works on flat `&[ContentNode]` slices.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Heading { level: u8, text: String },
    Paragraph(String),
    List(Vec<String>),
    Table(Vec<TableRow>),
    /// Wrapper element (div, blockquote, …): full text plus its classified
    /// heading/paragraph/list/table descendants, in document order.
    Container {
        text: String,
        children: Vec<ContentNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub header: bool,
    pub cells: Vec<String>,
}

impl ContentNode {
    /// Concatenated text of the node, the way the heuristics compare it.
    pub fn text(&self) -> String {
        match self {
            ContentNode::Heading { text, .. } => text.clone(),
            ContentNode::Paragraph(text) => text.clone(),
            ContentNode::List(items) => items.join("\n"),
            ContentNode::Table(rows) => rows
                .iter()
                .map(|r| r.cells.join(" "))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentNode::Container { text, .. } => text.clone(),
        }
    }

    /// Table rows carried by this node, whether it is a table itself or a
    /// wrapper with a table inside (the site wraps some tables in divs).
    pub fn table_rows(&self) -> Option<&[TableRow]> {
        match self {
            ContentNode::Table(rows) => Some(rows),
            ContentNode::Container { children, .. } => children
                .iter()
                .find_map(|c| match c {
                    ContentNode::Table(rows) => Some(rows.as_slice()),
                    _ => None,
                }),
            _ => None,
        }
    }
}

/// Classify the direct element children of `root`, discarding line breaks
/// and whitespace-only text.
pub fn classify_children(root: ElementRef) -> Vec<ContentNode> {
    root.children()
        .filter_map(ElementRef::wrap)
        .filter_map(classify_element)
        .collect()
}

fn classify_element(el: ElementRef) -> Option<ContentNode> {
    match el.value().name() {
        "h1" | "h2" | "h3" | "h4" | "h5" => Some(ContentNode::Heading {
            level: heading_level(el.value().name()),
            text: element_text(el),
        }),
        "p" => Some(ContentNode::Paragraph(element_text(el))),
        "ul" => Some(ContentNode::List(
            el.select(&LI_SELECTOR).map(element_text).collect(),
        )),
        "table" => Some(ContentNode::Table(table_rows(el))),
        "br" => None,
        _ => Some(ContentNode::Container {
            text: element_text(el),
            children: el
                .select(&FLOW_SELECTOR)
                .filter_map(classify_element)
                .collect(),
        }),
    }
}

fn heading_level(name: &str) -> u8 {
    name.as_bytes()[1] - b'0'
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn table_rows(el: ElementRef) -> Vec<TableRow> {
    el.select(&TR_SELECTOR)
        .map(|tr| TableRow {
            header: tr.select(&TH_SELECTOR).next().is_some(),
            cells: tr.select(&CELL_SELECTOR).map(element_text).collect(),
        })
        .collect()
}

/// Every table row in the document, in order. The spell-list page spreads
/// its per-level tables across wrapper markup, so rows are collected
/// document-wide rather than per content child.
pub fn collect_table_rows(document: &Html) -> Vec<TableRow> {
    document
        .select(&TR_SELECTOR)
        .map(|tr| TableRow {
            header: tr.select(&TH_SELECTOR).next().is_some(),
            cells: tr.select(&CELL_SELECTOR).map(element_text).collect(),
        })
        .collect()
}

/// Splice each Container's children in place of the container itself.
pub fn flatten_containers(nodes: &[ContentNode]) -> Vec<ContentNode> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            ContentNode::Container { children, .. } => out.extend(children.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    out
}
