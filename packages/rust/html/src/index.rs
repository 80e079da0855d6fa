//! Index page: every record in ascending ordinal order.

use std::fmt::{self, Write};

use dexgen_shared::{OrdinalEntry, Record};

use crate::markup::{document, escape, number, type_badges};

/// One row of the index table.
#[derive(Debug, Clone, Copy)]
pub struct IndexRow<'a> {
    pub entry: &'a OrdinalEntry,
    pub record: &'a Record,
}

pub(crate) fn write_index_page(out: &mut String, title: &str, rows: &[IndexRow<'_>]) -> fmt::Result {
    let mut rows = rows.to_vec();
    rows.sort_by_key(|row| row.entry.index);

    document(out, title, |out| {
        writeln!(out, "  <h1>{}</h1>", escape(title))?;
        writeln!(out, "  <table class=\"index\">")?;
        writeln!(out, "    <thead>")?;
        writeln!(
            out,
            "      <tr><th>#</th><th>Name</th><th>Category</th><th>Types</th></tr>"
        )?;
        writeln!(out, "    </thead>")?;
        writeln!(out, "    <tbody>")?;
        for row in &rows {
            writeln!(out, "      <tr>")?;
            writeln!(out, "        <td>{}</td>", number(row.entry.index))?;
            writeln!(
                out,
                "        <td><a href=\"{}\">{}</a></td>",
                escape(&row.entry.href()),
                escape(&row.entry.name)
            )?;
            writeln!(out, "        <td>{}</td>", escape(&row.record.category))?;
            writeln!(out, "        <td>")?;
            type_badges(out, "          ", &row.record.types)?;
            writeln!(out, "        </td>")?;
            writeln!(out, "      </tr>")?;
        }
        writeln!(out, "    </tbody>")?;
        writeln!(out, "  </table>")
    })
}
