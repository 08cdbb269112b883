use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::parser::nodes::ContentNode;
use crate::parser::runs::{assemble_features, segment_runs};
use crate::records::Subclass;
use crate::text::title_case;

static SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Source.*:").unwrap());

/// Build a subclass record. Every node but the last carries description
/// prose; the last node wraps the feature content. The first synthesized
/// feature is metadata, not a real feature: it names the source book.
pub fn extract(class_name: &str, page_title: &str, nodes: &[ContentNode]) -> Result<Subclass> {
    let parent = title_case(class_name);
    let title_re = Regex::new(&format!("^{}.*:", regex::escape(&parent)))
        .map_err(|e| Error::layout(format!("bad subclass title pattern: {e}")))?;
    let title = title_re.replace(page_title, "").trim().to_string();

    let (feature_node, description_nodes) = nodes
        .split_last()
        .ok_or_else(|| Error::layout("subclass page has no content blocks"))?;
    let description = description_nodes
        .iter()
        .map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ");

    let feature_nodes: Vec<ContentNode> = match feature_node {
        ContentNode::Container { children, .. } => children
            .iter()
            .filter(|n| {
                matches!(n, ContentNode::Paragraph(_) | ContentNode::Heading { .. })
            })
            .cloned()
            .collect(),
        other => vec![other.clone()],
    };
    let runs = segment_runs(&feature_nodes);
    let mut features = assemble_features(&runs, false);
    if features.is_empty() {
        return Err(Error::layout("no feature runs on subclass page"));
    }

    let meta = features.remove(0);
    let source = SOURCE_RE.replace(&meta.description, "").trim().to_string();

    Ok(Subclass {
        class_name: parent,
        title,
        description,
        source,
        features,
    })
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

    fn container(children: Vec<ContentNode>) -> ContentNode {
        ContentNode::Container {
            text: children
                .iter()
                .map(|n| n.text())
                .collect::<Vec<_>>()
                .join("\n"),
            children,
        }
    }

    #[test]
    fn source_pulled_from_first_run() {
        let nodes = vec![
            p("Bladesingers master a tradition of elven magic."),
            container(vec![
                p("Source: Tasha's Cauldron of Everything"),
                h(3, "Training in War and Song"),
                p("You gain proficiency with a musical instrument."),
                h(3, "Bladesong"),
                p("You can invoke an elven magic."),
            ]),
        ];
        let sub = extract("wizard", "Wizard: Bladesinging", &nodes).unwrap();
        assert_eq!(sub.class_name, "Wizard");
        assert_eq!(sub.title, "Bladesinging");
        assert_eq!(sub.description, "Bladesingers master a tradition of elven magic.");
        assert_eq!(sub.source, "Tasha's Cauldron of Everything");
        assert_eq!(sub.features.len(), 2);
        assert_eq!(sub.features[0].title, "Training in War and Song");
    }

    #[test]
    fn title_prefix_stripped_with_extra_words() {
        let nodes = vec![
            p("desc"),
            container(vec![
                p("Source: Xanathar's Guide to Everything"),
                h(3, "Feature"),
                p("body"),
            ]),
        ];
        let sub = extract("fighter", "Fighter Archetype: Arcane Archer", &nodes).unwrap();
        assert_eq!(sub.title, "Arcane Archer");
    }

    #[test]
    fn empty_page_is_loud() {
        let err = extract("wizard", "Wizard: X", &[]).unwrap_err();
        assert!(matches!(err, Error::UnexpectedLayout(_)));
    }

    #[test]
    fn no_headings_in_container_is_loud() {
        let nodes = vec![p("desc"), container(vec![p("just prose")])];
        let err = extract("wizard", "Wizard: X", &nodes).unwrap_err();
        assert!(matches!(err, Error::UnexpectedLayout(_)));
    }

    #[test]
    fn non_paragraph_children_excluded_from_features() {
        let nodes = vec![
            p("desc"),
            container(vec![
                p("Source: PHB"),
                h(3, "Feature"),
                p("body"),
                ContentNode::List(vec!["not a feature fragment".into()]),
            ]),
        ];
        let sub = extract("cleric", "Cleric: Life Domain", &nodes).unwrap();
        assert_eq!(sub.features.len(), 1);
        assert_eq!(sub.features[0].description, "body");
    }
}
