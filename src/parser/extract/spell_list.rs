use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::parser::nodes::TableRow;
use crate::records::SpellSummary;
use crate::text::truncate;

static RITUAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"R$").unwrap());
static SCHOOL_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[CDGT]+$").unwrap());
static FEET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ -]+f[eo]+t").unwrap());

/// Build abbreviated spell records from a spell-list page's table rows. Each
/// header row bumps the running level counter (the first one lands on 0,
/// the cantrip block) and carries no data itself.
pub fn extract(rows: &[TableRow], short: bool) -> Result<Vec<SpellSummary>> {
    let mut level: i32 = -1;
    let mut spells = Vec::new();

    for row in rows {
        if row.header {
            level += 1;
            continue;
        }
        let [name, school, casting_time, spell_range, duration, components] =
            row.cells.as_slice()
        else {
            return Err(Error::layout(format!(
                "spell row with {} cells instead of 6",
                row.cells.len()
            )));
        };

        let mut name = name.clone();
        let mut school = school.clone();
        let mut casting_time = casting_time.clone();
        let mut duration = duration.clone();

        if short {
            name = truncate(&name, 15);
            school = school.chars().take(3).collect();
            casting_time = RITUAL_RE.replace(&casting_time, "(Rit)").to_string();
            casting_time = casting_time.replace("Bonus", "B").replace("Minute", "Min");
            duration = truncate(&duration, 10);
        } else {
            casting_time = RITUAL_RE.replace(&casting_time, "(Ritual)").to_string();
            school = SCHOOL_TAG_RE.replace(&school, "").to_string();
        }
        let spell_range = FEET_RE.replace_all(spell_range, " ft").to_string();

        spells.push(SpellSummary {
            name,
            level: if level == 0 {
                "Cantrip".to_string()
            } else {
                level.to_string()
            },
            school,
            casting_time,
            spell_range,
            duration,
            components: components.clone(),
        });
    }

    Ok(spells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(title: &str) -> TableRow {
        TableRow {
            header: true,
            cells: vec![title.to_string()],
        }
    }

    fn data(cells: [&str; 6]) -> TableRow {
        TableRow {
            header: false,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn level_counter_follows_header_rows() {
        let rows = vec![
            header("Cantrips"),
            data(["Acid Splash", "Conjuration", "1 Action", "60 feet", "Instantaneous", "V, S"]),
            data(["Fire Bolt", "Evocation", "1 Action", "120 feet", "Instantaneous", "V, S"]),
            header("1st Level"),
            data(["Alarm", "Abjuration", "1 Minute", "30 feet", "8 Hours", "V, S, M"]),
        ];
        let spells = extract(&rows, false).unwrap();
        assert_eq!(spells.len(), 3);
        assert_eq!(spells[0].level, "Cantrip");
        assert_eq!(spells[1].level, "Cantrip");
        assert_eq!(spells[2].level, "1");
    }

    #[test]
    fn long_mode_expands_ritual_and_strips_school_tags() {
        let rows = vec![
            header("1st Level"),
            data(["Alarm", "AbjurationD", "1 MinuteR", "30 feet", "8 Hours", "V, S, M"]),
        ];
        let spells = extract(&rows, false).unwrap();
        assert_eq!(spells[0].casting_time, "1 Minute(Ritual)");
        assert_eq!(spells[0].school, "Abjuration");
    }

    #[test]
    fn short_mode_abbreviates_columns() {
        let rows = vec![
            header("1st Level"),
            data([
                "Tashas Hideous Laughter",
                "Enchantment",
                "1 MinuteR",
                "30 feet",
                "Concentration, up to 1 minute",
                "V, S, M",
            ]),
        ];
        let spells = extract(&rows, true).unwrap();
        assert_eq!(spells[0].name, "Tashas Hideo...");
        assert_eq!(spells[0].school, "Enc");
        assert_eq!(spells[0].casting_time, "1 Min(Rit)");
        assert_eq!(spells[0].duration, "Concent...");
        assert_eq!(spells[0].duration.chars().count(), 10);
    }

    #[test]
    fn short_mode_abbreviates_bonus_action() {
        let rows = vec![
            header("1st Level"),
            data(["Shield", "Abjuration", "1 Bonus Action", "Self", "1 Round", "V, S"]),
        ];
        let spells = extract(&rows, true).unwrap();
        assert_eq!(spells[0].casting_time, "1 B Action");
    }

    #[test]
    fn feet_spelling_normalized() {
        let rows = vec![
            header("1st Level"),
            data(["Entangle", "Conjuration", "1 Action", "90 -feot", "1 Minute", "V, S"]),
        ];
        let spells = extract(&rows, false).unwrap();
        assert_eq!(spells[0].spell_range, "90 ft");
    }

    #[test]
    fn wrong_cell_count_is_loud() {
        let rows = vec![
            header("Cantrips"),
            TableRow {
                header: false,
                cells: vec!["only".into(), "five".into(), "cells".into(), "in".into(), "row".into()],
            },
        ];
        let err = extract(&rows, false).unwrap_err();
        assert!(matches!(err, Error::UnexpectedLayout(_)));
    }

    #[test]
    fn empty_rows_give_empty_list() {
        assert!(extract(&[], false).unwrap().is_empty());
    }
}
