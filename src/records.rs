//! Immutable value records produced by extraction. Each is built once from a
//! single page's markup and never mutated. JSON output drops empty or absent
//! fields uniformly via the serde attributes below.

use serde::Serialize;

/// One named, described unit of class/subclass capability, optionally paired
/// with a table (e.g. spell slots per level). When `table` is present its
/// first row is the header and every retained row has the header's length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Vec<String>>>,
}

/// Base class data for a player class page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnDClass {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub multiclass_requirement: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leveling_headers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leveling_table: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
}

/// Subclass/archetype data. Belongs to its parent class by name only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subclass {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
}

/// Full spell data from an individual spell page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Spell {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub level: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub school: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub casting_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub spell_range: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub components: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub effect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub higher_level_effect: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

/// Abbreviated spell record used by spell-list queries. No effect text, no
/// source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpellSummary {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub level: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub school: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub casting_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub spell_range: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub components: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_dropped_from_json() {
        let spell = Spell {
            name: "Fire Bolt".into(),
            level: "Cantrip".into(),
            school: "Evocation".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&spell).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("name").unwrap(), "Fire Bolt");
        assert!(!obj.contains_key("source"));
        assert!(!obj.contains_key("higher_level_effect"));
        assert!(!obj.contains_key("classes"));
    }

    #[test]
    fn spell_json_round_trip_preserves_fields() {
        let spell = Spell {
            name: "Fireball".into(),
            source: "Player's Handbook".into(),
            level: "3Rd-level".into(),
            school: "Evocation".into(),
            casting_time: "1 action".into(),
            spell_range: "150 feet".into(),
            duration: "Instantaneous".into(),
            components: "V, S, M".into(),
            effect: "A bright streak flashes.\n\n\t• and burns.".into(),
            higher_level_effect: Some("The damage increases.".into()),
            classes: vec!["Sorcerer".into(), "Wizard".into()],
        };
        let value = serde_json::to_value(&spell).unwrap();
        assert_eq!(value["name"], "Fireball");
        assert_eq!(value["effect"], "A bright streak flashes.\n\n\t• and burns.");
        assert_eq!(value["higher_level_effect"], "The damage increases.");
        assert_eq!(value["classes"][1], "Wizard");
        assert_eq!(value["duration"], "Instantaneous");
    }

    #[test]
    fn feature_without_table_drops_key() {
        let feature = Feature {
            title: "Bladesong".into(),
            description: "You can invoke an elven magic.".into(),
            table: None,
        };
        let value = serde_json::to_value(&feature).unwrap();
        assert!(!value.as_object().unwrap().contains_key("table"));
    }
}
