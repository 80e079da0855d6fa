//! Family tree layout.
//!
//! Turns a resolved [`Family`] into a [`FamilyTree`] rooted at its base
//! member. Sibling branches are ordered by the target's global ordinal, never
//! by discovery order or name, so split evolutions render the same way on
//! every run.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, instrument};

use dexgen_shared::{DexError, FamilyBranch, FamilyNode, FamilyTree, Result};

use super::graph::EvolutionEdge;
use super::method::format_method;
use super::resolver::Family;
use crate::index::GlobalIndex;

/// Members of a family split by the direction of their edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyRoles<'g> {
    /// Only ever an edge source.
    pub roots: BTreeSet<&'g str>,
    /// Both a source and a target.
    pub intermediates: BTreeSet<&'g str>,
    /// Only ever an edge target.
    pub leaves: BTreeSet<&'g str>,
}

impl<'g> FamilyRoles<'g> {
    /// Partition the members of `family`.
    pub fn of(family: &Family<'g>) -> Self {
        let sources: BTreeSet<&str> = family.edges().iter().map(|&e| e.from.as_str()).collect();
        let targets: BTreeSet<&str> = family.edges().iter().map(|&e| e.to.as_str()).collect();

        Self {
            roots: sources.difference(&targets).copied().collect(),
            intermediates: sources.intersection(&targets).copied().collect(),
            leaves: targets.difference(&sources).copied().collect(),
        }
    }
}

/// Lay out `family` as a tree from its single base member.
///
/// `focus` is the record the page is being rendered for. Fails with
/// [`DexError::FamilyShape`] when the family has no base, more than one
/// base, or a cycle below the base.
#[instrument(skip(family, index), fields(edges = family.edges().len()))]
pub fn build_tree(family: &Family<'_>, focus: &str, index: &GlobalIndex) -> Result<FamilyTree> {
    let roles = FamilyRoles::of(family);
    let mut roots = roles.roots.iter();
    let base = match (roots.next(), roots.next()) {
        (Some(base), None) => *base,
        (None, _) => {
            return Err(DexError::family_shape(format!(
                "family of {focus} has no base member"
            )));
        }
        (Some(_), Some(_)) => {
            return Err(DexError::family_shape(format!(
                "family of {focus} has several base members: {}",
                roles.roots.iter().copied().collect::<Vec<_>>().join(", ")
            )));
        }
    };

    let mut outgoing: HashMap<&str, Vec<&EvolutionEdge>> = HashMap::new();
    for &edge in family.edges() {
        outgoing.entry(edge.from.as_str()).or_default().push(edge);
    }
    for branches in outgoing.values_mut() {
        // Stable, so equal ordinals keep discovery order.
        branches.sort_by_key(|edge| family.ordinal(&edge.to));
    }

    let layout = Layout {
        family,
        index,
        outgoing,
    };
    let mut path = Vec::new();
    let base = layout.node(base, &mut path)?;

    let tree = FamilyTree {
        focus: focus.to_string(),
        base,
    };

    // Every member must hang below the base; edges into the line from a
    // cycle leave the cycle out of the layout.
    let laid_out: BTreeSet<&str> = tree.members().into_iter().collect();
    let unreachable: Vec<&str> = family
        .members()
        .filter(|member| !laid_out.contains(member))
        .collect();
    if !unreachable.is_empty() {
        return Err(DexError::family_shape(format!(
            "family of {focus} has members unreachable from base {}: {}",
            tree.base.name,
            unreachable.join(", ")
        )));
    }

    debug!(base = %tree.base.name, depth = tree.depth(), "family tree built");

    Ok(tree)
}

struct Layout<'a, 'g> {
    family: &'a Family<'g>,
    index: &'a GlobalIndex,
    outgoing: HashMap<&'g str, Vec<&'g EvolutionEdge>>,
}

impl<'g> Layout<'_, 'g> {
    /// Build the subtree under `name`. `path` holds the members between the
    /// base and `name`.
    fn node(&self, name: &'g str, path: &mut Vec<&'g str>) -> Result<FamilyNode> {
        if path.contains(&name) {
            return Err(DexError::family_shape(format!(
                "evolution cycle through {name}"
            )));
        }

        let ordinal = self
            .family
            .ordinal(name)
            .ok_or_else(|| DexError::dangling(name))?;
        let file_key = self
            .index
            .by_name(name)
            .map(|entry| entry.file_key.clone())
            .ok_or_else(|| DexError::dangling(name))?;

        path.push(name);
        let mut evolutions = Vec::new();
        for &edge in self.outgoing.get(name).into_iter().flatten() {
            evolutions.push(FamilyBranch {
                method: format_method(&edge.method),
                node: self.node(edge.to.as_str(), path)?,
            });
        }
        path.pop();

        Ok(FamilyNode {
            name: name.to_string(),
            file_key,
            ordinal,
            evolutions,
        })
    }
}
