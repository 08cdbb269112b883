//! One lookup function per query kind: build the page URL, fetch it, parse
//! the record. Fetch failures of any sort collapse to NotFound; only a
//! fetched page whose structure defies the extraction heuristics surfaces
//! as UnexpectedLayout.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fetch;
use crate::fetch::WIKIDOT_URI;
use crate::parser;
use crate::records::{DnDClass, Spell, SpellSummary, Subclass};
use crate::text::title_case;

pub fn class(class_name: &str) -> Result<DnDClass> {
    let uri = format!("{}/{}", WIKIDOT_URI, class_name.to_lowercase());
    let body = fetch_page(&uri, "class", &title_case(class_name))?;
    let class = parser::parse_class(&body)?;
    debug!("built record for class {}", class.class_name);
    Ok(class)
}

pub fn subclass(class_name: &str, subclass_name: &str) -> Result<Subclass> {
    let uri = format!(
        "{}/{}:{}",
        WIKIDOT_URI,
        class_name.to_lowercase(),
        subclass_name.to_lowercase().replace(' ', "-")
    );
    let label = format!("{}|{}", title_case(class_name), title_case(subclass_name));
    let body = fetch_page(&uri, "subclass", &label)?;
    let subclass = parser::parse_subclass(class_name, &body)?;
    debug!(
        "built record for subclass {}:{}",
        subclass.class_name, subclass.title
    );
    Ok(subclass)
}

pub fn spell(spell_name: &str) -> Result<Spell> {
    let slug = spell_name.to_lowercase().replace([' ', '/'], "-");
    let uri = format!("{}/spell:{}", WIKIDOT_URI, slug);
    let body = fetch_page(&uri, "spell", &title_case(spell_name))?;
    parser::parse_spell(&body)
}

/// Fetch the site-wide spell list, or one class's list when a class name is
/// given.
pub fn spell_list(class_name: Option<&str>, short: bool) -> Result<Vec<SpellSummary>> {
    let (uri, kind, label) = match class_name {
        Some(class) => (
            format!("{}/spells:{}", WIKIDOT_URI, class.to_lowercase()),
            "class",
            title_case(class),
        ),
        None => (
            format!("{}/spells", WIKIDOT_URI),
            "spell list",
            "Spells".to_string(),
        ),
    };
    let body = fetch_page(&uri, kind, &label)?;
    parser::parse_spell_list(&body, short)
}

/// Names of the subclasses linked from a class page.
pub fn subclass_names(class_name: &str) -> Result<Vec<String>> {
    let uri = format!("{}/{}", WIKIDOT_URI, class_name.to_lowercase());
    let body = fetch_page(&uri, "class", &title_case(class_name))?;
    Ok(parser::parse_subclass_names(class_name, &body))
}

fn fetch_page(uri: &str, kind: &'static str, name: &str) -> Result<String> {
    fetch::page(uri).map_err(|e| {
        warn!("fetch failed for {}: {:#}", uri, e);
        Error::not_found(kind, name.replace(':', ""))
    })
}
