//! Evolution edge list and adjacency index.

use std::collections::HashMap;

use tracing::{debug, instrument};

use dexgen_shared::{EvolutionMethod, LoadedRecord};

/// Directed "evolves into" relation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionEdge {
    pub from: String,
    pub to: String,
    pub method: EvolutionMethod,
}

impl EvolutionEdge {
    /// The endpoint across the edge from `name`.
    pub fn other(&self, name: &str) -> &str {
        if self.from == name { &self.to } else { &self.from }
    }
}

/// Every evolution edge in the dataset plus a lookup from each participant
/// name to the positions of the edges it touches.
#[derive(Debug, Clone, Default)]
pub struct EvolutionGraph {
    edges: Vec<EvolutionEdge>,
    adjacency: HashMap<String, Vec<usize>>,
}

impl EvolutionGraph {
    /// Scan all records' declared evolutions.
    ///
    /// Edge order is discovery order: records in loader order, then each
    /// record's evolutions in declared order. Each edge is registered under
    /// both endpoints.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(records: &[LoadedRecord]) -> Self {
        let mut graph = Self::default();

        for loaded in records {
            let record = &loaded.record;
            for decl in &record.evolutions {
                graph.push(EvolutionEdge {
                    from: record.name.clone(),
                    to: decl.pokemon.name.clone(),
                    method: decl.method.clone(),
                });
            }
        }

        debug!(
            edges = graph.edges.len(),
            participants = graph.adjacency.len(),
            "evolution graph built"
        );
        graph
    }

    fn push(&mut self, edge: EvolutionEdge) {
        let position = self.edges.len();
        self.adjacency
            .entry(edge.from.clone())
            .or_default()
            .push(position);
        if edge.to != edge.from {
            self.adjacency
                .entry(edge.to.clone())
                .or_default()
                .push(position);
        }
        self.edges.push(edge);
    }

    /// All edges in discovery order.
    pub fn edges(&self) -> &[EvolutionEdge] {
        &self.edges
    }

    pub fn edge(&self, position: usize) -> &EvolutionEdge {
        &self.edges[position]
    }

    /// Positions of the edges `name` takes part in, as either endpoint.
    pub fn adjacent(&self, name: &str) -> &[usize] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    use dexgen_shared::{EvolutionDecl, EvolutionTarget, Record, Stats};

    pub(crate) fn level(n: u32) -> EvolutionMethod {
        EvolutionMethod {
            level: Some(n),
            ..EvolutionMethod::default()
        }
    }

    /// A record named `name` at `index` evolving into each `(target, method)`.
    pub(crate) fn record(name: &str, index: u32, evolutions: &[(&str, EvolutionMethod)]) -> LoadedRecord {
        LoadedRecord {
            record: Record {
                name: name.into(),
                index,
                category: "Test".into(),
                types: vec!["normal".into()],
                stats: Stats {
                    hp: 50,
                    attack: 50,
                    defense: 50,
                    special_attack: 50,
                    special_defense: 50,
                    speed: 50,
                },
                evolutions: evolutions
                    .iter()
                    .map(|(target, method)| EvolutionDecl {
                        pokemon: EvolutionTarget {
                            name: (*target).into(),
                        },
                        method: method.clone(),
                    })
                    .collect(),
                transformations: vec![],
            },
            source: PathBuf::from(format!("db/te/{name}.yaml")),
            file_key: format!("te{}", name.to_lowercase()),
        }
    }

    #[test]
    fn edges_in_discovery_order() {
        let records = vec![
            record("A", 1, &[("B", level(16))]),
            record("B", 2, &[("C", level(36))]),
            record("C", 3, &[]),
        ];
        let graph = EvolutionGraph::build(&records);

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edge(0).from, "A");
        assert_eq!(graph.edge(0).to, "B");
        assert_eq!(graph.edge(1).method, level(36));
    }

    #[test]
    fn adjacency_registers_both_endpoints() {
        let records = vec![
            record("A", 1, &[("B", level(16))]),
            record("B", 2, &[("C", level(36))]),
            record("C", 3, &[]),
        ];
        let graph = EvolutionGraph::build(&records);

        assert_eq!(graph.adjacent("A"), &[0]);
        assert_eq!(graph.adjacent("B"), &[0, 1]);
        assert_eq!(graph.adjacent("C"), &[1]);
        assert!(graph.adjacent("Z").is_empty());
    }

    #[test]
    fn split_evolution_shares_source() {
        let records = vec![
            record("D", 1, &[("F", level(20)), ("E", level(20))]),
            record("E", 2, &[]),
            record("F", 3, &[]),
        ];
        let graph = EvolutionGraph::build(&records);

        assert_eq!(graph.adjacent("D"), &[0, 1]);
        assert_eq!(graph.edge(0).other("D"), "F");
        assert_eq!(graph.edge(0).other("F"), "D");
    }
}
