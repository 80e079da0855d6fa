//! Evolution family resolution.
//!
//! A family is the connected component of the evolution graph containing
//! the queried record, treating edges as undirected. It is identified by its
//! set of edge positions, so every member of a component resolves to the
//! same family no matter which one is asked for.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, instrument};

use dexgen_shared::{DexError, Result};

use super::graph::{EvolutionEdge, EvolutionGraph};
use crate::index::GlobalIndex;

/// The connected evolution family of one record.
#[derive(Debug, Clone)]
pub struct Family<'g> {
    /// Edge positions in the family; the family's identity.
    positions: BTreeSet<usize>,
    /// Edges in the order traversal found them.
    edges: Vec<&'g EvolutionEdge>,
    /// Member name to global ordinal. Only used for ordering.
    ordinals: BTreeMap<&'g str, u32>,
}

impl<'g> Family<'g> {
    pub fn positions(&self) -> &BTreeSet<usize> {
        &self.positions
    }

    /// Edges in discovery order. Not a rendering order.
    pub fn edges(&self) -> &[&'g EvolutionEdge] {
        &self.edges
    }

    pub fn ordinals(&self) -> &BTreeMap<&'g str, u32> {
        &self.ordinals
    }

    pub fn ordinal(&self, name: &str) -> Option<u32> {
        self.ordinals.get(name).copied()
    }

    /// Member names, in name order.
    pub fn members(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.ordinals.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }
}

impl EvolutionGraph {
    /// Resolve the family containing `name`.
    ///
    /// Returns `Ok(None)` when no edge touches `name`. Fails with
    /// [`DexError::DanglingReference`] if a member has no loaded record.
    #[instrument(skip(self, index))]
    pub fn resolve_family(&self, name: &str, index: &GlobalIndex) -> Result<Option<Family<'_>>> {
        let seed = self.adjacent(name);
        if seed.is_empty() {
            return Ok(None);
        }

        let mut visited_edges: HashSet<usize> = HashSet::new();
        let mut visited_names: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&str> = Vec::new();
        let mut edges: Vec<&EvolutionEdge> = Vec::new();

        for &position in seed {
            if visited_edges.insert(position) {
                let edge = self.edge(position);
                edges.push(edge);
                pending.push(edge.other(name));
            }
        }
        visited_names.insert(name);

        while let Some(current) = pending.pop() {
            if visited_names.contains(current) {
                continue;
            }
            for &position in self.adjacent(current) {
                if !visited_edges.insert(position) {
                    continue;
                }
                let edge = self.edge(position);
                edges.push(edge);

                let other = edge.other(current);
                if !visited_names.contains(other) {
                    pending.push(other);
                }
            }
            visited_names.insert(current);
        }

        let mut ordinals = BTreeMap::new();
        for &edge in &edges {
            for member in [edge.from.as_str(), edge.to.as_str()] {
                if ordinals.contains_key(member) {
                    continue;
                }
                let ordinal = index
                    .ordinal_of(member)
                    .ok_or_else(|| DexError::dangling(member))?;
                ordinals.insert(member, ordinal);
            }
        }

        debug!(
            edges = edges.len(),
            members = ordinals.len(),
            "family resolved"
        );

        Ok(Some(Family {
            positions: visited_edges.into_iter().collect(),
            edges,
            ordinals,
        }))
    }
}
