use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::parser::nodes::{flatten_containers, ContentNode};
use crate::records::Spell;
use crate::text::capitalize_words;

static SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Source: (.*)").unwrap());
static LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9].*level) (.*)").unwrap());
static CANTRIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.*) (cantrip)$").unwrap());
static CASTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Casting Time:\s*(.*?)\s*Range:\s*(.*?)\s*Components:\s*(.*?)\s*Duration:\s*(.*)")
        .unwrap()
});

/// One classified paragraph/list fragment of a spell page. The classifier is
/// an ordered decision table: rules are tried in priority order and the
/// first match wins, so the policy stays auditable and testable per rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Source(String),
    LevelSchool { level: String, school: String },
    SpellLists(Vec<String>),
    CastingBlock {
        casting_time: String,
        spell_range: String,
        components: String,
        duration: String,
    },
    Bullets(Vec<String>),
    HigherLevel(String),
    Body(String),
}

/// Classify one content node. Unicode right single quotes are normalized to
/// ASCII apostrophes before matching.
pub fn classify_fragment(node: &ContentNode) -> Result<Fragment> {
    let text = node.text().replace('\u{2019}', "'");
    let trimmed = text.trim();

    if trimmed.starts_with("Source") {
        let caps = SOURCE_RE
            .captures(trimmed)
            .ok_or_else(|| Error::layout(format!("unlabeled source line: {trimmed:?}")))?;
        return Ok(Fragment::Source(caps[1].trim().to_string()));
    }

    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        let caps = LEVEL_RE
            .captures(trimmed)
            .ok_or_else(|| Error::layout(format!("unparseable level line: {trimmed:?}")))?;
        return Ok(Fragment::LevelSchool {
            level: caps[1].to_string(),
            school: caps[2].to_string(),
        });
    }

    if trimmed.ends_with("cantrip") {
        let caps = CANTRIP_RE
            .captures(trimmed)
            .ok_or_else(|| Error::layout(format!("unparseable cantrip line: {trimmed:?}")))?;
        return Ok(Fragment::LevelSchool {
            level: caps[2].to_string(),
            school: caps[1].to_string(),
        });
    }

    if trimmed.starts_with("Spell Lists") {
        let after = trimmed
            .find('.')
            .map(|i| &trimmed[i + 1..])
            .unwrap_or_default();
        let classes = after
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        return Ok(Fragment::SpellLists(classes));
    }

    if trimmed.contains("Casting Time: ") {
        let caps = CASTING_RE
            .captures(trimmed)
            .ok_or_else(|| Error::layout(format!("unparseable casting block: {trimmed:?}")))?;
        return Ok(Fragment::CastingBlock {
            casting_time: caps[1].trim().to_string(),
            spell_range: caps[2].trim().to_string(),
            components: caps[3].trim().to_string(),
            duration: caps[4].trim().to_string(),
        });
    }

    if let ContentNode::List(items) = node {
        return Ok(Fragment::Bullets(
            items.iter().map(|i| i.replace('\u{2019}', "'")).collect(),
        ));
    }

    if trimmed.contains("At Higher Levels.") {
        let rest = trimmed.replacen("At Higher Levels.", "", 1);
        return Ok(Fragment::HigherLevel(rest.trim().to_string()));
    }

    Ok(Fragment::Body(trimmed.to_string()))
}

/// Build a spell record by folding the classified fragments in page order.
/// Level and school are capitalized word by word on construction.
pub fn extract(name: String, nodes: &[ContentNode]) -> Result<Spell> {
    let mut spell = Spell {
        name,
        ..Default::default()
    };
    let mut effect = String::new();

    for node in flatten_containers(nodes) {
        if !matches!(node, ContentNode::Paragraph(_) | ContentNode::List(_)) {
            continue;
        }
        match classify_fragment(&node)? {
            Fragment::Source(source) => spell.source = source,
            Fragment::LevelSchool { level, school } => {
                spell.level = capitalize_words(&level);
                spell.school = capitalize_words(&school);
            }
            Fragment::SpellLists(classes) => spell.classes = classes,
            Fragment::CastingBlock {
                casting_time,
                spell_range,
                components,
                duration,
            } => {
                spell.casting_time = casting_time;
                spell.spell_range = spell_range;
                spell.components = components;
                spell.duration = duration;
            }
            Fragment::Bullets(items) => {
                for item in items {
                    effect.push_str("\t• ");
                    effect.push_str(item.trim());
                    effect.push('\n');
                }
                effect.push('\n');
            }
            Fragment::HigherLevel(text) => spell.higher_level_effect = Some(text),
            Fragment::Body(text) => {
                effect.push_str(&text);
                effect.push_str("\n\n");
            }
        }
    }

    spell.effect = effect.trim_end().to_string();
    Ok(spell)
}
