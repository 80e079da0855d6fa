//! Evolution section markup.

use std::fmt::{self, Write};

use dexgen_shared::{FamilyNode, FamilyTree};

use crate::markup::escape;

pub(crate) fn evolution_section(out: &mut String, family: Option<&FamilyTree>) -> fmt::Result {
    writeln!(out, "  <section class=\"evolution\">")?;
    writeln!(out, "    <h2>Evolution</h2>")?;
    match family {
        Some(tree) => {
            writeln!(out, "    <ul class=\"family\">")?;
            member(out, tree, &tree.base, None, 3)?;
            writeln!(out, "    </ul>")?;
        }
        None => writeln!(
            out,
            "    <p class=\"no-evolution\">This creature does not evolve.</p>"
        )?,
    }
    writeln!(out, "  </section>")
}

/// One `<li>`: the trigger that led here, the member, then its evolutions.
fn member(
    out: &mut String,
    tree: &FamilyTree,
    node: &FamilyNode,
    method: Option<&str>,
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    write!(out, "{indent}<li>")?;
    if let Some(method) = method {
        write!(out, "<span class=\"method\">{}</span> ", escape(method))?;
    }
    if node.name == tree.focus {
        write!(out, "<strong class=\"current\">{}</strong>", escape(&node.name))?;
    } else {
        write!(
            out,
            "<a href=\"{}.html\">{}</a>",
            escape(&node.file_key),
            escape(&node.name)
        )?;
    }

    if node.evolutions.is_empty() {
        return writeln!(out, "</li>");
    }

    writeln!(out)?;
    writeln!(out, "{indent}  <ul>")?;
    for branch in &node.evolutions {
        member(out, tree, &branch.node, Some(&branch.method), depth + 2)?;
    }
    writeln!(out, "{indent}  </ul>")?;
    writeln!(out, "{indent}</li>")
}
