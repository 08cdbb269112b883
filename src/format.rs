//! Pure, stateless rendering of extracted records. Text output uses a fixed
//! 80-column banner and content-width-aligned tables; CSV/TSV strip the
//! separator characters out of free text; JSON is the records' own
//! serialization (empty fields dropped).

use clap::ValueEnum;
use serde_json::json;

use crate::records::{DnDClass, Feature, Spell, SpellSummary, Subclass};

const BANNER_WIDTH: usize = 80;
const RULE_WIDTH: usize = 40;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Txt,
    Csv,
    Tsv,
    Json,
}

/// Filters applied to a spell-list query before rendering. In short mode a
/// filtered column is dropped from the output entirely.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub level: Option<String>,
    pub school: Option<String>,
    pub components: Vec<String>,
    pub short: bool,
}

pub fn spell(spell: &Spell, format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv => {
            let fields = [
                spell.name.clone(),
                spell.source.clone(),
                spell.level.clone(),
                spell.school.clone(),
                spell.casting_time.clone(),
                spell.spell_range.clone(),
                spell.duration.clone(),
                spell.components.clone(),
                strip_chars(&spell.effect, &[',', '\n', '\t']),
                strip_chars(spell.higher_level_effect.as_deref().unwrap_or(""), &[',', '\n', '\t']),
                spell.classes.join("|"),
            ];
            fields.join(",")
        }
        OutputFormat::Tsv => {
            let fields = [
                spell.name.clone(),
                spell.source.clone(),
                spell.level.clone(),
                spell.school.clone(),
                spell.casting_time.clone(),
                spell.spell_range.clone(),
                spell.duration.clone(),
                spell.components.clone(),
                strip_chars(&spell.effect, &['\n', '\t']),
                strip_chars(spell.higher_level_effect.as_deref().unwrap_or(""), &['\n', '\t']),
                spell.classes.join(","),
            ];
            fields.join("\t")
        }
        OutputFormat::Json => pretty_json(spell),
        OutputFormat::Txt => {
            let mut out = banner(&spell.name);
            out.push_str(&format!("Source:       {}\n", spell.source));
            out.push_str(&format!("Level:        {}\n", spell.level));
            out.push_str(&format!("School:       {}\n", spell.school));
            out.push_str(&format!("Casting Time: {}\n", spell.casting_time));
            out.push_str(&format!("Range:        {}\n", spell.spell_range));
            out.push_str(&format!("Components:   {}\n", spell.components));
            out.push_str(&format!("Duration:     {}\n", spell.duration));
            out.push_str(&format!("\n{}\n", spell.effect));
            if let Some(hle) = &spell.higher_level_effect {
                out.push_str(&format!("\nAt Higher Levels. {}\n", hle));
            }
            out.push_str(&format!("\nSpell Lists: {}\n", spell.classes.join(", ")));
            out
        }
    }
}

pub fn spell_list(spells: &[SpellSummary], query: &ListQuery, format: OutputFormat) -> String {
    let mut headers: Vec<String> = [
        "Name",
        "Level",
        "School",
        "Casting Time",
        "Range",
        "Duration",
        "Components",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();
    let mut rows: Vec<Vec<String>> = spells
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                s.level.clone(),
                s.school.clone(),
                s.casting_time.clone(),
                s.spell_range.clone(),
                s.duration.clone(),
                s.components.clone(),
            ]
        })
        .collect();

    if let Some(level) = &query.level {
        limit_rows(&mut headers, &mut rows, "Level", &[level.clone()], query.short);
    }
    if let Some(school) = &query.school {
        limit_rows(&mut headers, &mut rows, "School", &[school.clone()], query.short);
    }
    if !query.components.is_empty() {
        limit_rows(&mut headers, &mut rows, "Components", &query.components, query.short);
    }

    match format {
        OutputFormat::Csv => {
            let mut lines = vec![headers.join(",")];
            lines.extend(
                rows.iter()
                    .map(|row| {
                        row.iter()
                            .map(|cell| cell.replace(", ", "|"))
                            .collect::<Vec<_>>()
                            .join(",")
                    }),
            );
            lines.join("\n")
        }
        OutputFormat::Tsv => {
            let mut lines = vec![headers.join("\t")];
            lines.extend(rows.iter().map(|row| row.join("\t")));
            lines.join("\n")
        }
        OutputFormat::Json => {
            let value = json!({
                "Spell Count": rows.len(),
                "Spells": zip_rows(&headers, &rows),
            });
            serde_json::to_string_pretty(&value).unwrap_or_default()
        }
        OutputFormat::Txt => aligned(&headers, &rows),
    }
}

pub fn class(class: &DnDClass, format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv | OutputFormat::Tsv => features(&class.features, format),
        OutputFormat::Json => pretty_json(class),
        OutputFormat::Txt => {
            let mut out = banner(&class.class_name);
            out.push_str(&section("Description", &class.description));
            out.push_str(&section("Multiclass Requirement", &class.multiclass_requirement));
            out.push_str(&section(
                "Leveling Table",
                &aligned(&class.leveling_headers, &class.leveling_table),
            ));
            for f in &class.features {
                out.push_str(&feature_txt(f));
            }
            out
        }
    }
}

pub fn subclass(subclass: &Subclass, format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv | OutputFormat::Tsv => features(&subclass.features, format),
        OutputFormat::Json => pretty_json(subclass),
        OutputFormat::Txt => {
            let mut out = banner(&format!("{}: {}", subclass.class_name, subclass.title));
            out.push_str(&section("Description", &subclass.description));
            out.push_str(&section("Source", &subclass.source));
            for f in &subclass.features {
                out.push_str(&feature_txt(f));
            }
            out
        }
    }
}

pub fn features(features: &[Feature], format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv => features
            .iter()
            .map(|f| {
                format!(
                    "{},{}",
                    f.title,
                    strip_chars(&f.description, &[',', '\n', '\t']).trim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Tsv => features
            .iter()
            .map(|f| {
                format!(
                    "{}\t{}",
                    f.title,
                    strip_chars(&f.description, &['\n', '\t']).trim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&json!({ "features": features })).unwrap_or_default()
        }
        OutputFormat::Txt => features.iter().map(feature_txt).collect(),
    }
}

pub fn leveling(class: &DnDClass, format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv => {
            let mut lines = vec![class.leveling_headers.join(",")];
            lines.extend(class.leveling_table.iter().map(|row| row.join(",")));
            lines.join("\n")
        }
        OutputFormat::Tsv => {
            let mut lines = vec![class.leveling_headers.join("\t")];
            lines.extend(class.leveling_table.iter().map(|row| row.join("\t")));
            lines.join("\n")
        }
        OutputFormat::Json => {
            let value = json!({
                "class_name": class.class_name,
                "leveling_table": zip_rows(&class.leveling_headers, &class.leveling_table),
            });
            serde_json::to_string_pretty(&value).unwrap_or_default()
        }
        OutputFormat::Txt => aligned(&class.leveling_headers, &class.leveling_table),
    }
}

pub fn subclass_list(class_name: &str, names: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv => names.join(","),
        OutputFormat::Tsv => names.join("\t"),
        OutputFormat::Json => {
            let value = json!({ "class_name": class_name, "subclasses": names });
            serde_json::to_string_pretty(&value).unwrap_or_default()
        }
        OutputFormat::Txt => names.join("\n"),
    }
}

// ── Helpers ──

fn feature_txt(feature: &Feature) -> String {
    let mut out = String::new();
    if feature.title.is_empty() {
        out.push_str(&feature.description);
        out.push('\n');
    } else {
        out.push_str(&section(&feature.title, &feature.description));
    }
    if let Some(table) = &feature.table {
        if let Some((headers, rows)) = table.split_first() {
            let rows: Vec<Vec<String>> = rows.to_vec();
            out.push_str(&aligned(headers, &rows));
            out.push('\n');
        }
    }
    out
}

fn banner(title: &str) -> String {
    let padding = BANNER_WIDTH.saturating_sub(title.chars().count()) / 2;
    format!(
        "{rule}\n{pad}{title}\n{rule}\n",
        rule = "─".repeat(BANNER_WIDTH),
        pad = " ".repeat(padding),
    )
}

fn section(label: &str, body: &str) -> String {
    format!("{}\n{}\n{}\n\n", label, "─".repeat(RULE_WIDTH), body)
}

/// Column-aligned plain table: header row, dashed rule, data rows, with
/// widths computed from the content.
fn aligned(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(cell.chars().count());
                format!("{:<width$}", cell)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![
        render(headers),
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    ];
    lines.extend(rows.iter().map(|row| render(row)));
    lines.join("\n")
}

fn limit_rows(
    headers: &mut Vec<String>,
    rows: &mut Vec<Vec<String>>,
    column: &str,
    conditions: &[String],
    drop_column: bool,
) {
    let Some(index) = headers.iter().position(|h| h == column) else {
        return;
    };
    rows.retain(|row| {
        let cell = row.get(index).map(|c| c.to_lowercase()).unwrap_or_default();
        conditions
            .iter()
            .all(|cond| cell.contains(&cond.to_lowercase()))
    });
    if drop_column {
        headers.remove(index);
        for row in rows.iter_mut() {
            row.remove(index);
        }
    }
}

fn zip_rows(headers: &[String], rows: &[Vec<String>]) -> Vec<serde_json::Value> {
    rows.iter()
        .map(|row| {
            let map: serde_json::Map<String, serde_json::Value> = headers
                .iter()
                .zip(row.iter())
                .map(|(h, cell)| (h.clone(), json!(cell)))
                .collect();
            serde_json::Value::Object(map)
        })
        .collect()
}

fn strip_chars(s: &str, chars: &[char]) -> String {
    s.chars().filter(|c| !chars.contains(c)).collect()
}

fn pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
