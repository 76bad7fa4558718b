//! Node removal and largest-connected-component extraction.
//!
//! Removal changes the canonical node order: all later indexing must go
//! through the reduced network returned here, never the original.
use crate::find_union::FindUnion;
use crate::network::Network;
use std::collections::{HashMap, HashSet};

/// Delete every node in `remove` (with its incident edges), then keep only
/// the largest connected component. An empty removal set leaves the network
/// untouched, disconnected or not.
pub fn remove_and_reduce(network: &Network, remove: &HashSet<String>) -> Network {
    if remove.is_empty() {
        return network.clone();
    }
    let removed = remove_nodes(network, remove);
    debug!(
        "REMOVE\t{}\t{}\tNodes",
        network.node_count(),
        removed.node_count()
    );
    largest_component(&removed)
}

/// Drop the listed nodes; survivors keep their relative canonical order.
pub fn remove_nodes(network: &Network, remove: &HashSet<String>) -> Network {
    let keep: Vec<usize> = (0..network.node_count())
        .filter(|&node| !remove.contains(network.name_of(node)))
        .collect();
    network.subnetwork(&keep)
}

/// Extract the largest connected component. Components are discovered by
/// scanning nodes in canonical order, so a size tie goes to the component
/// whose lowest-indexed member comes first. Survivors keep their relative
/// canonical order.
pub fn largest_component(network: &Network) -> Network {
    let node_count = network.node_count();
    if node_count == 0 {
        return network.clone();
    }
    let mut fu = FindUnion::new(node_count);
    for node in 0..node_count {
        for (nbr, _) in network.neighbors(node) {
            fu.unite(node, nbr);
        }
    }
    let mut seen: HashMap<usize, usize> = HashMap::new();
    let (mut best_root, mut best_size) = (fu.find(0), 0);
    for node in 0..node_count {
        let root = fu.find(node);
        if seen.contains_key(&root) {
            continue;
        }
        let size = fu.size(root);
        debug!("COMPONENT\t{}\t{}", seen.len(), size);
        seen.insert(root, size);
        if size > best_size {
            best_root = root;
            best_size = size;
        }
    }
    let keep: Vec<usize> = (0..node_count)
        .filter(|&node| fu.find(node) == best_root)
        .collect();
    debug!("COMPONENT\t{}\t{}\tPicked", seen.len(), keep.len());
    network.subnetwork(&keep)
}
