use tracing::debug;

use crate::error::{Error, Result};
use crate::parser::nodes::{flatten_containers, ContentNode};
use crate::parser::runs::{assemble_features, normalize_table, segment_runs};
use crate::records::DnDClass;

/// Build a class record from a class page's content nodes. The page is
/// assumed to open with description paragraphs, then the multiclassing
/// paragraph, then the leveling table, then the heading-delimited features.
pub fn extract(class_name: String, nodes: &[ContentNode]) -> Result<DnDClass> {
    let k = nodes
        .iter()
        .take(3)
        .position(|n| n.text().to_lowercase().contains("multiclass"))
        .ok_or_else(|| {
            Error::layout("no multiclassing paragraph in the first three content blocks")
        })?;

    let description = nodes[..k]
        .iter()
        .map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ");
    let multiclass_requirement = nodes[k].text();

    let table_rows = nodes
        .get(k + 1)
        .and_then(|n| n.table_rows())
        .ok_or_else(|| Error::layout("no leveling table after the multiclassing paragraph"))?;
    let mut grid = normalize_table(table_rows);
    if grid.is_empty() {
        return Err(Error::layout("leveling table has no rows"));
    }
    let leveling_headers = grid.remove(0);
    let leveling_table = grid;

    let feature_nodes: Vec<ContentNode> = flatten_containers(&nodes[k + 2..])
        .into_iter()
        .filter(|n| {
            matches!(
                n,
                ContentNode::Heading { .. }
                    | ContentNode::Paragraph(_)
                    | ContentNode::List(_)
                    | ContentNode::Table(_)
            )
        })
        .collect();
    let runs = segment_runs(&feature_nodes);
    if let Some(first) = runs.first() {
        // The skipped run restates level-1 basics; log it so a page where
        // that convention does not hold is visible in the diagnostic log.
        debug!(
            "{}: skipping first feature run '{}'",
            class_name,
            first.first().map(|n| n.text()).unwrap_or_default()
        );
    }
    let features = assemble_features(&runs, true);

    Ok(DnDClass {
        class_name,
        description,
        multiclass_requirement,
        leveling_headers,
        leveling_table,
        features,
    })
}
