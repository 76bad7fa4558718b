//! Dense adjacency and column-stochastic transition matrices.
//!
//! Matrices are indexed by the network's canonical node order. Column j of a
//! normalized matrix is the outgoing probability distribution of node j, so
//! every non-zero column sums to 1 and a zero-sum column stays all-zero.
use crate::error::WalkerError;
use crate::network::Network;
use nalgebra::DMatrix;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Symmetric weighted adjacency matrix of the network.
pub fn adjacency_matrix(network: &Network) -> DMatrix<f64> {
    let node_count = network.node_count();
    let mut adjacency = DMatrix::zeros(node_count, node_count);
    for node in 0..node_count {
        for (nbr, weight) in network.neighbors(node) {
            adjacency[(node, nbr)] = weight;
        }
    }
    adjacency
}

/// L1-normalize every column. Zero-sum columns are left as they are.
pub fn normalize_columns(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    let mut normalized = matrix.clone();
    for mut column in normalized.column_iter_mut() {
        let total: f64 = column.iter().sum();
        if total > 0.0 {
            for entry in column.iter_mut() {
                *entry /= total;
            }
        }
    }
    normalized
}

/// Build the original-graph matrices: the unnormalized adjacency and its
/// column-stochastic form.
pub fn build_og(network: &Network) -> (DMatrix<f64>, DMatrix<f64>) {
    let adjacency = adjacency_matrix(network);
    let og = normalize_columns(&adjacency);
    (adjacency, og)
}

/// Build the tissue-specific transition matrix from an expression file,
/// `node_id<TAB>flag` per line, where the flag literal `NA` marks a node as
/// unexpressed in the tissue.
pub fn build_tsg(
    network: &Network,
    adjacency: &DMatrix<f64>,
    path: &Path,
) -> Result<DMatrix<f64>, WalkerError> {
    debug!("OPEN\t{}", path.display());
    let reader = File::open(path)
        .map(BufReader::new)
        .map_err(|why| WalkerError::io(path, why))?;
    tissue_matrix(network, adjacency, reader, path)
}

/// The whole row and column of every unexpressed node are zeroed on a copy
/// of the unnormalized adjacency, severing the node from the walk while
/// keeping the index space aligned with the original-graph matrix. The copy
/// is then column-normalized like the original.
pub fn tissue_matrix<R: BufRead>(
    network: &Network,
    adjacency: &DMatrix<f64>,
    reader: R,
    path: &Path,
) -> Result<DMatrix<f64>, WalkerError> {
    let mut tsg = adjacency.clone();
    let mut severed = 0;
    for (offset, line) in reader.lines().enumerate() {
        let line = line.map_err(|why| WalkerError::io(path, why))?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() < 2 {
            let msg = format!("expected 2 tab-separated fields, found {}", fields.len());
            return Err(WalkerError::parse(path, offset + 1, msg));
        }
        if fields[1] != "NA" {
            continue;
        }
        if let Some(node) = network.index_of(fields[0]) {
            tsg.row_mut(node).fill(0.0);
            tsg.column_mut(node).fill(0.0);
            severed += 1;
        }
    }
    debug!("TSG\t{}\t{}\tSevered", network.node_count(), severed);
    Ok(normalize_columns(&tsg))
}
