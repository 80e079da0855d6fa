//! Record detail page.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use serde_json::Value;

use dexgen_shared::{FamilyTree, OrdinalEntry, Record, Transformation};

use crate::family::evolution_section;
use crate::markup::{document, escape, number, type_badges};
use crate::stats::stat_table;

/// Everything a record page shows.
#[derive(Debug, Clone, Copy)]
pub struct RecordPage<'a> {
    pub record: &'a Record,
    pub prev: Option<&'a OrdinalEntry>,
    pub next: Option<&'a OrdinalEntry>,
    /// `None` when the record belongs to no evolution line.
    pub family: Option<&'a FamilyTree>,
}

pub(crate) fn write_record_page(out: &mut String, page: &RecordPage<'_>) -> fmt::Result {
    let record = page.record;
    document(out, &record.name, |out| {
        navigation(out, page.prev, page.next)?;
        writeln!(
            out,
            "  <h1><span class=\"number\">{}</span> {}</h1>",
            number(record.index),
            escape(&record.name)
        )?;
        writeln!(out, "  <p class=\"category\">{}</p>", escape(&record.category))?;
        type_badges(out, "  ", &record.types)?;
        writeln!(out, "  <h2>Stats</h2>")?;
        stat_table(out, "  ", &record.stats)?;
        if !record.transformations.is_empty() {
            forms_section(out, &record.transformations)?;
        }
        evolution_section(out, page.family)
    })
}

fn navigation(
    out: &mut String,
    prev: Option<&OrdinalEntry>,
    next: Option<&OrdinalEntry>,
) -> fmt::Result {
    writeln!(out, "  <nav class=\"record-nav\">")?;
    neighbor_link(out, "prev", prev)?;
    writeln!(
        out,
        "    <a class=\"home\" href=\"{}\">Index</a>",
        crate::INDEX_FILE
    )?;
    neighbor_link(out, "next", next)?;
    writeln!(out, "  </nav>")
}

fn neighbor_link(out: &mut String, rel: &str, entry: Option<&OrdinalEntry>) -> fmt::Result {
    match entry {
        Some(entry) => writeln!(
            out,
            "    <a class=\"{rel}\" rel=\"{rel}\" href=\"{}\">{} {}</a>",
            escape(&entry.href()),
            number(entry.index),
            escape(&entry.name)
        ),
        None => writeln!(out, "    <span class=\"{rel}\"></span>"),
    }
}

fn forms_section(out: &mut String, forms: &[Transformation]) -> fmt::Result {
    writeln!(out, "  <section class=\"forms\">")?;
    writeln!(out, "    <h2>Forms</h2>")?;
    for form in forms {
        writeln!(out, "    <article class=\"form\">")?;
        writeln!(out, "      <h3>{}</h3>", escape(&form.name))?;
        type_badges(out, "      ", &form.types)?;
        stat_table(out, "      ", &form.stats)?;
        writeln!(out, "      <dl class=\"form-condition\">")?;
        writeln!(out, "        <dt>Activation</dt>")?;
        writeln!(
            out,
            "        <dd>{}</dd>",
            escape(&describe_condition(&form.condition.activation))
        )?;
        writeln!(out, "        <dt>Deactivation</dt>")?;
        writeln!(
            out,
            "        <dd>{}</dd>",
            escape(&describe_condition(&form.condition.deactivation))
        )?;
        writeln!(out, "      </dl>")?;
        writeln!(out, "    </article>")?;
    }
    writeln!(out, "  </section>")
}

/// `{weather: rain, held: Orb}` → `held: Orb; weather: rain`.
fn describe_condition(condition: &BTreeMap<String, Value>) -> String {
    if condition.is_empty() {
        return "none".to_string();
    }
    condition
        .iter()
        .map(|(key, value)| match value {
            Value::String(text) => format!("{key}: {text}"),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condition_description() {
        let mut condition = BTreeMap::new();
        assert_eq!(describe_condition(&condition), "none");

        condition.insert("weather".to_string(), json!("rain"));
        condition.insert("hp_below".to_string(), json!(50));
        assert_eq!(describe_condition(&condition), "hp_below: 50; weather: rain");
    }
}
