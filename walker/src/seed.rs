//! Readers for the seed, node-order, and removal-list file formats.
use crate::error::WalkerError;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn load_seed_list(path: &Path) -> Result<Vec<String>, WalkerError> {
    debug!("OPEN\t{}", path.display());
    let reader = File::open(path)
        .map(BufReader::new)
        .map_err(|why| WalkerError::io(path, why))?;
    read_seed_list(reader, path)
}

/// One seed per line. Per-tissue seed files carry a label in the first
/// column, so the second field is the gene identifier when present and the
/// only field otherwise. Blank lines are skipped.
pub fn read_seed_list<R: BufRead>(reader: R, path: &Path) -> Result<Vec<String>, WalkerError> {
    let mut seeds = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|why| WalkerError::io(path, why))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.len() {
            0 => continue,
            1 => seeds.push(fields[0].to_string()),
            _ => seeds.push(fields[1].to_string()),
        }
    }
    Ok(seeds)
}

pub fn load_node_order(path: &Path) -> Result<Vec<String>, WalkerError> {
    debug!("OPEN\t{}", path.display());
    let reader = File::open(path)
        .map(BufReader::new)
        .map_err(|why| WalkerError::io(path, why))?;
    read_node_order(reader, path)
}

/// One identifier per line. The file lists connected components separated by
/// blank lines; only the first (largest) component is consumed.
pub fn read_node_order<R: BufRead>(reader: R, path: &Path) -> Result<Vec<String>, WalkerError> {
    let mut order = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|why| WalkerError::io(path, why))?;
        let name = line.trim();
        if name.is_empty() {
            break;
        }
        order.push(name.to_string());
    }
    Ok(order)
}

pub fn load_removal_list(path: &Path) -> Result<HashSet<String>, WalkerError> {
    debug!("OPEN\t{}", path.display());
    let reader = File::open(path)
        .map(BufReader::new)
        .map_err(|why| WalkerError::io(path, why))?;
    read_removal_list(reader, path)
}

/// One identifier per line; the first field counts, so annotated lines are
/// accepted too.
pub fn read_removal_list<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<HashSet<String>, WalkerError> {
    let mut remove = HashSet::new();
    for line in reader.lines() {
        let line = line.map_err(|why| WalkerError::io(path, why))?;
        if let Some(name) = line.split_whitespace().next() {
            remove.insert(name.to_string());
        }
    }
    Ok(remove)
}
