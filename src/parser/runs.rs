//! Heading-delimited grouping: content children are split into runs at
//! heading boundaries, and each run is assembled into one Feature.

use crate::records::Feature;

use super::nodes::{ContentNode, TableRow};

/// Split nodes into runs. A run starts at a heading and extends to the node
/// before the next heading (or the end of input). Content before the first
/// heading forms a leading heading-less run; with zero headings there are
/// zero runs and callers must handle descriptive preambles themselves.
pub fn segment_runs(nodes: &[ContentNode]) -> Vec<&[ContentNode]> {
    let mut runs: Vec<&[ContentNode]> = Vec::new();
    let mut prev = 0;
    let mut any_heading = false;

    for (i, node) in nodes.iter().enumerate() {
        if matches!(node, ContentNode::Heading { .. }) {
            if i > prev {
                runs.push(&nodes[prev..i]);
            }
            prev = i;
            any_heading = true;
        }
    }

    if !any_heading {
        return Vec::new();
    }
    runs.push(&nodes[prev..]);
    runs
}

/// Read each row's cells in document order, keeping only rows that match
/// the widest observed column count. Merged-cell decorations and otherwise
/// malformed rows are dropped silently, never padded.
pub fn normalize_table(rows: &[TableRow]) -> Vec<Vec<String>> {
    let Some(width) = rows.iter().map(|r| r.cells.len()).max() else {
        return Vec::new();
    };
    rows.iter()
        .filter(|r| r.cells.len() == width)
        .map(|r| r.cells.clone())
        .collect()
}

/// Assemble one Feature per run. `skip_first` discards the run at index 0
/// entirely (used when it restates content the caller already captured).
pub fn assemble_features(runs: &[&[ContentNode]], skip_first: bool) -> Vec<Feature> {
    let runs = if skip_first && !runs.is_empty() {
        &runs[1..]
    } else {
        runs
    };
    runs.iter().map(|run| assemble_one(run)).collect()
}

fn assemble_one(run: &[ContentNode]) -> Feature {
    let mut title = String::new();
    let mut description = String::new();
    let mut table: Option<Vec<Vec<String>>> = None;

    for node in run {
        match node {
            // Last heading wins; in practice a run holds exactly one.
            ContentNode::Heading { text, .. } => title = text.clone(),
            ContentNode::Paragraph(text) => {
                description.push_str(text);
                description.push_str("\n\n");
            }
            ContentNode::List(items) => {
                let mut block = description.trim_end().to_string();
                for item in items {
                    block.push_str("\n\t• ");
                    block.push_str(item.trim());
                }
                description = block;
                description.push_str("\n\n");
            }
            ContentNode::Table(rows) => {
                if table.is_none() {
                    table = Some(normalize_table(rows));
                }
            }
            ContentNode::Container { .. } => {}
        }
    }

    Feature {
        title,
        description: description.trim_end().to_string(),
        table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(level: u8, text: &str) -> ContentNode {
        ContentNode::Heading {
            level,
            text: text.into(),
        }
    }

    fn p(text: &str) -> ContentNode {
        ContentNode::Paragraph(text.into())
    }

    fn row(cells: &[&str]) -> TableRow {
        TableRow {
            header: false,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn one_run_per_heading() {
        let nodes = vec![h(3, "A"), p("a1"), p("a2"), h(3, "B"), p("b1"), h(5, "C")];
        let runs = segment_runs(&nodes);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].len(), 3);
        assert_eq!(runs[1].len(), 2);
        assert_eq!(runs[2].len(), 1);
        let total: usize = runs.iter().map(|r| r.len()).sum();
        assert_eq!(total, nodes.len());
    }

    #[test]
    fn adjacent_headings_give_length_one_run() {
        let nodes = vec![h(3, "A"), h(3, "B"), p("b")];
        let runs = segment_runs(&nodes);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 1);
    }

    #[test]
    fn zero_headings_zero_runs() {
        let nodes = vec![p("only"), p("prose")];
        assert!(segment_runs(&nodes).is_empty());
    }

    #[test]
    fn leading_content_forms_headingless_run() {
        let nodes = vec![p("Source: X"), h(3, "A"), p("a")];
        let runs = segment_runs(&nodes);
        assert_eq!(runs.len(), 2);
        assert!(matches!(runs[0][0], ContentNode::Paragraph(_)));
        assert!(matches!(runs[1][0], ContentNode::Heading { .. }));
    }

    #[test]
    fn trailing_run_included() {
        let nodes = vec![h(3, "A"), p("a"), h(3, "Last"), p("tail")];
        let runs = segment_runs(&nodes);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].len(), 2);
    }

    #[test]
    fn normalize_uniform_table_unchanged() {
        let rows = vec![row(&["Level", "Prof"]), row(&["1", "+2"]), row(&["2", "+2"])];
        let grid = normalize_table(&rows);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0], vec!["Level", "Prof"]);
    }

    #[test]
    fn normalize_drops_divergent_rows() {
        let rows = vec![
            row(&["The Wizard"]),
            row(&["Level", "Prof", "Features"]),
            row(&["1", "+2", "Spellcasting"]),
        ];
        let grid = normalize_table(&rows);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][0], "Level");
    }

    #[test]
    fn normalize_empty_input() {
        assert!(normalize_table(&[]).is_empty());
    }

    #[test]
    fn assemble_paragraphs_and_list() {
        let run: Vec<ContentNode> = vec![
            h(3, "Bladesong"),
            p("You can invoke an elven magic."),
            ContentNode::List(vec!["Advantage on Acrobatics.".into(), "Bonus to AC.".into()]),
            p("It ends early if you are incapacitated."),
        ];
        let slice: &[ContentNode] = &run;
        let features = assemble_features(&[slice], false);
        assert_eq!(features.len(), 1);
        let f = &features[0];
        assert_eq!(f.title, "Bladesong");
        assert_eq!(
            f.description,
            "You can invoke an elven magic.\n\t• Advantage on Acrobatics.\n\t• Bonus to AC.\n\nIt ends early if you are incapacitated."
        );
        assert!(f.table.is_none());
    }

    #[test]
    fn assemble_keeps_first_table_only() {
        let run: Vec<ContentNode> = vec![
            h(3, "Slots"),
            ContentNode::Table(vec![row(&["a", "b"]), row(&["1", "2"])]),
            ContentNode::Table(vec![row(&["ignored"])]),
        ];
        let slice: &[ContentNode] = &run;
        let features = assemble_features(&[slice], false);
        let table = features[0].table.as_ref().unwrap();
        assert_eq!(table[0], vec!["a", "b"]);
    }

    #[test]
    fn skip_first_drops_run_zero() {
        let a: Vec<ContentNode> = vec![h(3, "Spellcasting"), p("dup")];
        let b: Vec<ContentNode> = vec![h(5, "Ritual Casting"), p("real")];
        let features = assemble_features(&[&a[..], &b[..]], true);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].title, "Ritual Casting");
    }

    #[test]
    fn assembly_is_idempotent() {
        let run: Vec<ContentNode> = vec![
            h(3, "A"),
            p("text"),
            ContentNode::List(vec!["x".into()]),
        ];
        let slice: &[ContentNode] = &run;
        let first = assemble_features(&[slice], false);
        let second = assemble_features(&[slice], false);
        assert_eq!(first, second);
    }
}
