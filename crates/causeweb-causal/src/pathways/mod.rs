//! Pathway enumeration: all acyclic multi-hop mechanism chains from
//! root nodes, bounded by depth.

use std::collections::{BTreeMap, HashMap};

use causeweb_core::models::{Pathway, PosteriorWeight};

use crate::graph::{AdjacencyEdge, MechanismGraph};

/// Enumerates root-to-leaf mechanism chains.
///
/// A root is a node that never appears as the target of any mechanism
/// edge in the current graph snapshot. Only mechanisms with a resolved
/// posterior weight are traversed; a pathway needs at least 2 of them.
#[derive(Debug, Clone, Copy)]
pub struct PathwayEnumerator {
    max_depth: usize,
}

impl PathwayEnumerator {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Enumerate pathways, keyed by a synthetic, deterministic id.
    ///
    /// The mechanism graph may contain cycles; any hop whose target is
    /// already on the current path is skipped.
    pub fn enumerate(
        &self,
        graph: &MechanismGraph,
        weights: &HashMap<String, PosteriorWeight>,
    ) -> BTreeMap<String, Pathway> {
        // Mechanisms without a computed weight are excluded from
        // traversal but do not break it: roots are still determined by
        // the full edge set.
        let eligible: BTreeMap<String, Vec<AdjacencyEdge>> = graph
            .adjacency()
            .into_iter()
            .map(|(node_id, edges)| {
                let kept: Vec<AdjacencyEdge> = edges
                    .into_iter()
                    .filter(|edge| weights.contains_key(&edge.mechanism_id))
                    .collect();
                (node_id, kept)
            })
            .collect();

        let targets = graph.target_node_ids();
        let mut roots: Vec<String> = graph
            .participating_node_ids()
            .into_iter()
            .filter(|node_id| !targets.contains(node_id))
            .collect();
        roots.sort();

        let mut pathways = BTreeMap::new();
        let mut counter = 0_usize;
        for root in roots {
            self.walk_from(&root, &eligible, &mut counter, &mut pathways);
        }
        pathways
    }

    /// Depth-first walk with an explicit stack; records a pathway at
    /// every dead end or depth limit with 2+ mechanisms accumulated.
    fn walk_from(
        &self,
        root: &str,
        eligible: &BTreeMap<String, Vec<AdjacencyEdge>>,
        counter: &mut usize,
        pathways: &mut BTreeMap<String, Pathway>,
    ) {
        let mut stack: Vec<(Vec<String>, Vec<String>)> =
            vec![(vec![root.to_string()], Vec::new())];

        while let Some((node_path, mechanism_path)) = stack.pop() {
            let Some(current) = node_path.last() else {
                continue;
            };

            let mut extended = false;
            if mechanism_path.len() < self.max_depth {
                if let Some(edges) = eligible.get(current) {
                    // Reverse push keeps DFS order aligned with the
                    // sorted adjacency, so pathway ids are stable.
                    for edge in edges.iter().rev() {
                        if node_path.contains(&edge.target_id) {
                            continue;
                        }
                        let mut next_nodes = node_path.clone();
                        next_nodes.push(edge.target_id.clone());
                        let mut next_mechanisms = mechanism_path.clone();
                        next_mechanisms.push(edge.mechanism_id.clone());
                        stack.push((next_nodes, next_mechanisms));
                        extended = true;
                    }
                }
            }

            if !extended && mechanism_path.len() >= 2 {
                *counter += 1;
                let id = format!("pw-{counter:04}");
                pathways.insert(
                    id.clone(),
                    Pathway {
                        id,
                        node_ids: node_path,
                        mechanism_ids: mechanism_path,
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeweb_core::models::{
        Direction, EvidenceGrade, EvidenceSummary, Mechanism, Node, Scale,
    };
    use causeweb_taxonomy::TaxonomyGraph;

    fn taxonomy(ids: &[&str]) -> TaxonomyGraph {
        let mut graph = TaxonomyGraph::new();
        for id in ids {
            graph.insert_node(Node {
                id: id.to_string(),
                name: id.to_string(),
                scale: Scale::new(1).unwrap(),
                category: "test".to_string(),
                description: String::new(),
            });
        }
        graph
    }

    fn mechanism(id: &str, from: &str, to: &str) -> Mechanism {
        Mechanism {
            id: id.to_string(),
            from_node_id: from.to_string(),
            to_node_id: to.to_string(),
            direction: Direction::Positive,
            category: "test".to_string(),
            evidence: EvidenceSummary {
                quality_grade: EvidenceGrade::A,
                n_studies: 1,
                effect_size: Some(1.2),
                ci_lower: Some(1.0),
                ci_upper: Some(1.4),
            },
        }
    }

    fn weight() -> PosteriorWeight {
        PosteriorWeight {
            mean: 1.2,
            ci_lower: 1.0,
            ci_upper: 1.4,
        }
    }

    fn weights_for(ids: &[&str]) -> HashMap<String, PosteriorWeight> {
        ids.iter().map(|id| (id.to_string(), weight())).collect()
    }

    fn chain_graph(hops: &[(&str, &str, &str)], node_ids: &[&str]) -> MechanismGraph {
        let taxonomy = taxonomy(node_ids);
        let mut graph = MechanismGraph::new();
        for (id, from, to) in hops {
            graph.add_mechanism(mechanism(id, from, to), &taxonomy).unwrap();
        }
        graph
    }

    #[test]
    fn chain_yields_single_pathway() {
        let graph = chain_graph(
            &[("m1", "a", "b"), ("m2", "b", "c"), ("m3", "c", "d")],
            &["a", "b", "c", "d"],
        );
        let pathways = PathwayEnumerator::new(5).enumerate(&graph, &weights_for(&["m1", "m2", "m3"]));

        assert_eq!(pathways.len(), 1);
        let pathway = pathways.values().next().unwrap();
        assert_eq!(pathway.mechanism_ids, vec!["m1", "m2", "m3"]);
        assert_eq!(pathway.node_ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn max_depth_one_yields_nothing() {
        let graph = chain_graph(
            &[("m1", "a", "b"), ("m2", "b", "c"), ("m3", "c", "d")],
            &["a", "b", "c", "d"],
        );
        let pathways = PathwayEnumerator::new(1).enumerate(&graph, &weights_for(&["m1", "m2", "m3"]));
        assert!(pathways.is_empty());
    }

    #[test]
    fn depth_bound_truncates_chains() {
        let graph = chain_graph(
            &[("m1", "a", "b"), ("m2", "b", "c"), ("m3", "c", "d")],
            &["a", "b", "c", "d"],
        );
        let pathways = PathwayEnumerator::new(2).enumerate(&graph, &weights_for(&["m1", "m2", "m3"]));
        assert_eq!(pathways.len(), 1);
        assert_eq!(
            pathways.values().next().unwrap().mechanism_ids,
            vec!["m1", "m2"]
        );
    }

    #[test]
    fn cycles_are_guarded() {
        // a → b → c → a: c's edge back to a must be skipped, leaving a→b→c.
        let graph = chain_graph(
            &[("m1", "a", "b"), ("m2", "b", "c"), ("m3", "c", "a")],
            &["a", "b", "c"],
        );
        // No root exists (every node is a target), so nothing enumerates.
        let pathways = PathwayEnumerator::new(5).enumerate(&graph, &weights_for(&["m1", "m2", "m3"]));
        assert!(pathways.is_empty());
    }

    #[test]
    fn side_cycle_does_not_hang_traversal() {
        // root → b, then b ⇄ c, plus c → d.
        let graph = chain_graph(
            &[
                ("m1", "root", "b"),
                ("m2", "b", "c"),
                ("m3", "c", "b"),
                ("m4", "c", "d"),
            ],
            &["root", "b", "c", "d"],
        );
        let pathways =
            PathwayEnumerator::new(5).enumerate(&graph, &weights_for(&["m1", "m2", "m3", "m4"]));
        assert_eq!(pathways.len(), 1);
        assert_eq!(
            pathways.values().next().unwrap().mechanism_ids,
            vec!["m1", "m2", "m4"]
        );
    }

    #[test]
    fn unweighted_mechanisms_excluded_without_breaking_traversal() {
        // Branch b→x is unweighted; the weighted b→c branch still walks.
        let graph = chain_graph(
            &[("m1", "a", "b"), ("m2", "b", "c"), ("m3", "b", "x"), ("m4", "c", "d")],
            &["a", "b", "c", "d", "x"],
        );
        let pathways =
            PathwayEnumerator::new(5).enumerate(&graph, &weights_for(&["m1", "m2", "m4"]));
        assert_eq!(pathways.len(), 1);
        assert_eq!(
            pathways.values().next().unwrap().mechanism_ids,
            vec!["m1", "m2", "m4"]
        );
    }

    #[test]
    fn branching_yields_one_pathway_per_leaf() {
        let graph = chain_graph(
            &[
                ("m1", "a", "b"),
                ("m2", "b", "c"),
                ("m3", "b", "d"),
            ],
            &["a", "b", "c", "d"],
        );
        let pathways =
            PathwayEnumerator::new(5).enumerate(&graph, &weights_for(&["m1", "m2", "m3"]));
        assert_eq!(pathways.len(), 2);
        let chains: Vec<Vec<String>> = pathways
            .values()
            .map(|p| p.mechanism_ids.clone())
            .collect();
        assert!(chains.contains(&vec!["m1".to_string(), "m2".to_string()]));
        assert!(chains.contains(&vec!["m1".to_string(), "m3".to_string()]));
    }
}
