//! Topology cache rebuilt on every graph mutation.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{Connection, OUTPUT_BUS_ID};

/// Precomputed evaluation plan: render order, per-node inbound sources, and
/// the set of nodes summed into the output bus.
#[derive(Default)]
pub(crate) struct Topology {
    pub(crate) render_order: Vec<String>,
    pub(crate) inbound_edges: HashMap<String, Vec<String>>,
    pub(crate) output_sources: Vec<String>,
}

impl Topology {
    /// Kahn's algorithm over the node subgraph (output-bus edges excluded).
    ///
    /// Nodes caught in a cycle are appended at the tail so they still render,
    /// one block late relative to their inputs; feedback loops are
    /// unsupported and callers must avoid them.
    pub(crate) fn rebuild<'a, N>(
        nodes: &'a HashMap<String, N>,
        connections: &'a [Connection],
    ) -> Self {
        let mut in_degree: HashMap<&'a str, usize> =
            nodes.keys().map(|id| (id.as_str(), 0)).collect();
        let mut adjacency: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        let mut inbound_edges: HashMap<String, Vec<String>> = HashMap::new();

        for connection in connections {
            if connection.destination == OUTPUT_BUS_ID {
                continue;
            }
            if !nodes.contains_key(&connection.source) {
                continue;
            }
            let Some(degree) = in_degree.get_mut(connection.destination.as_str()) else {
                continue;
            };
            *degree += 1;
            adjacency
                .entry(connection.source.as_str())
                .or_default()
                .push(connection.destination.as_str());
            inbound_edges
                .entry(connection.destination.clone())
                .or_default()
                .push(connection.source.clone());
        }

        let mut ready: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();

        let mut render_order = Vec::with_capacity(nodes.len());
        while let Some(id) = ready.pop_front() {
            render_order.push(id.to_string());
            if let Some(downstream) = adjacency.get(id) {
                for &dest in downstream {
                    let Some(degree) = in_degree.get_mut(dest) else {
                        continue;
                    };
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(dest);
                    }
                }
            }
        }

        if render_order.len() < nodes.len() {
            let placed: HashSet<&str> = render_order.iter().map(String::as_str).collect();
            let remaining: Vec<String> = nodes
                .keys()
                .filter(|id| !placed.contains(id.as_str()))
                .cloned()
                .collect();
            render_order.extend(remaining);
        }

        let mut output_sources: Vec<String> = connections
            .iter()
            .filter(|c| c.destination == OUTPUT_BUS_ID && nodes.contains_key(&c.source))
            .map(|c| c.source.clone())
            .collect();

        if output_sources.is_empty() {
            // No explicit output wiring: fall back to the sinks so the graph
            // is still audible.
            let with_outgoing: HashSet<&str> =
                connections.iter().map(|c| c.source.as_str()).collect();
            output_sources = render_order
                .iter()
                .filter(|id| !with_outgoing.contains(id.as_str()))
                .cloned()
                .collect();
        }

        Self {
            render_order,
            inbound_edges,
            output_sources,
        }
    }
}
