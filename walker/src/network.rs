//! Weighted, undirected PPI network with an owned node index.
//!
//! The node order is fixed at load time: a node gets the next free index the
//! first time it appears in the edge list (left column before right column,
//! lines in file order). Every matrix and probability vector downstream is
//! indexed through this mapping, so the order must never change after the
//! matrices are built.
use crate::error::WalkerError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Network {
    names: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<HashMap<usize, f64>>,
}

impl Network {
    /// Load a network from a tab- or whitespace-delimited edge list,
    /// `node_a node_b weight`, one edge per line.
    pub fn load(path: &Path) -> Result<Self, WalkerError> {
        debug!("OPEN\t{}", path.display());
        let reader = File::open(path)
            .map(BufReader::new)
            .map_err(|why| WalkerError::io(path, why))?;
        Self::from_edge_list(reader, path)
    }

    /// Parse an edge list from any reader. `path` is only used for error
    /// context. Duplicate lines for the same pair overwrite the weight, so
    /// the last occurrence wins.
    pub fn from_edge_list<R: BufRead>(reader: R, path: &Path) -> Result<Self, WalkerError> {
        let mut network = Network::default();
        for (offset, line) in reader.lines().enumerate() {
            let line = line.map_err(|why| WalkerError::io(path, why))?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                let msg = format!("expected 3 fields, found {}", fields.len());
                return Err(WalkerError::parse(path, offset + 1, msg));
            }
            let weight: f64 = fields[2].parse().map_err(|_| {
                let msg = format!("invalid edge weight: {}", fields[2]);
                WalkerError::parse(path, offset + 1, msg)
            })?;
            if !weight.is_finite() || weight < 0.0 {
                let msg = format!("edge weight must be a non-negative number: {weight}");
                return Err(WalkerError::parse(path, offset + 1, msg));
            }
            network.add_edge(fields[0], fields[1], weight);
        }
        debug!(
            "NETWORK\t{}\t{}\tLoaded",
            network.node_count(),
            network.edge_count()
        );
        Ok(network)
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        let ends: usize = self.adjacency.iter().map(|nbrs| nbrs.len()).sum();
        // self loops contribute one endpoint, every other edge two
        let loops = (0..self.node_count())
            .filter(|&i| self.adjacency[i].contains_key(&i))
            .count();
        (ends - loops) / 2 + loops
    }

    /// Node identifiers in canonical index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name_of(&self, node: usize) -> &str {
        &self.names[node]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn intern(&mut self, name: &str) -> usize {
        match self.index.get(name) {
            Some(&node) => node,
            None => {
                let node = self.names.len();
                self.names.push(name.to_string());
                self.index.insert(name.to_string(), node);
                self.adjacency.push(HashMap::new());
                node
            }
        }
    }

    /// Add an undirected weighted edge. Re-adding a pair overwrites the
    /// previous weight.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        let from = self.intern(from);
        let to = self.intern(to);
        self.adjacency[from].insert(to, weight);
        self.adjacency[to].insert(from, weight);
    }

    pub fn edge_weight(&self, from: usize, to: usize) -> Option<f64> {
        self.adjacency[from].get(&to).copied()
    }

    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency[node].iter().map(|(&nbr, &w)| (nbr, w))
    }

    /// Restrict the network to `keep`, which must be in ascending index
    /// order so that survivors retain their relative canonical order.
    pub fn subnetwork(&self, keep: &[usize]) -> Network {
        let mut remap = vec![usize::MAX; self.names.len()];
        let mut sub = Network::default();
        for &old in keep {
            remap[old] = sub.intern(&self.names[old]);
        }
        for &old in keep {
            for (nbr, weight) in self.neighbors(old) {
                if remap[nbr] != usize::MAX {
                    sub.adjacency[remap[old]].insert(remap[nbr], weight);
                }
            }
        }
        sub
    }
}
