//! Batch runs -- one set of matrices, many seed files, a rayon worker pool.
//!
//! The matrices are built once and shared read-only; every seed set walks
//! with its own private probability vectors. One rank file is written per
//! seed file, plus a `summary.json` with run metadata.
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walker::error::WalkerError;
use walker::network::Network;
use walker::walk::{self, TransitionOperator, WalkConfig};
use walker::{matrix, rank, reduce, seed};

/// The batch profile. Paths are resolved as given, relative to the working
/// directory rather than to the profile file.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BatchProfile {
    /// Original PPI graph, in edge list format.
    graph: PathBuf,
    /// Each seed file yields one output in `out_dir`, named after the seed
    /// file's stem with the extension `rwr`.
    seed_files: Vec<PathBuf>,
    out_dir: PathBuf,
    /// Tissue expression list; enables the blended walk when present.
    low_list: Option<PathBuf>,
    #[serde(default)]
    remove: Vec<String>,
    #[serde(default = "default_restart_prob")]
    restart_prob: f64,
    #[serde(default = "default_og_prob")]
    og_prob: f64,
    max_rounds: Option<usize>,
    #[serde(default = "default_threads")]
    threads: usize,
}

fn default_restart_prob() -> f64 {
    0.7
}

fn default_og_prob() -> f64 {
    0.1
}

fn default_threads() -> usize {
    1
}

pub fn load_profile(path: &Path) -> Result<BatchProfile, WalkerError> {
    let text = std::fs::read_to_string(path).map_err(|why| WalkerError::io(path, why))?;
    toml::from_str(&text).map_err(|why| WalkerError::Profile {
        path: path.to_path_buf(),
        msg: why.to_string(),
    })
}

#[derive(Serialize, Debug)]
struct RunRecord {
    seed_file: PathBuf,
    output: PathBuf,
    seeds: usize,
    rounds: usize,
}

#[derive(Serialize, Debug)]
struct BatchSummary {
    graph: PathBuf,
    nodes: usize,
    runs: Vec<RunRecord>,
}

pub fn run_batch(profile: &BatchProfile) -> Result<(), WalkerError> {
    let BatchProfile {
        graph,
        seed_files,
        out_dir,
        low_list,
        remove,
        restart_prob,
        og_prob,
        max_rounds,
        threads,
    } = profile.clone();
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .unwrap();
    std::fs::create_dir_all(&out_dir).map_err(|why| WalkerError::io(&out_dir, why))?;
    let remove: HashSet<String> = remove.into_iter().collect();
    let network = Network::load(&graph)?;
    let network = reduce::remove_and_reduce(&network, &remove);
    let (adjacency, og) = matrix::build_og(&network);
    let op = match low_list {
        Some(path) => {
            let tsg = matrix::build_tsg(&network, &adjacency, &path)?;
            TransitionOperator::blended(og, tsg, og_prob)
        }
        None => TransitionOperator::Original(og),
    };
    let config = WalkConfig::new(restart_prob, max_rounds);
    // read every seed list up front so a bad file fails before any output
    let mut seed_sets = Vec::with_capacity(seed_files.len());
    for path in seed_files.iter() {
        let mut seeds = seed::load_seed_list(path)?;
        seeds.retain(|s| !remove.contains(s));
        seed_sets.push(seeds);
    }
    debug!("BATCH\t{}\t{}\tSeedSets", network.node_count(), seed_sets.len());
    let walks = walk::run_walks(&op, &network, &seed_sets, &config);
    let mut runs = Vec::with_capacity(walks.len());
    for ((seed_file, seeds), outcome) in seed_files.iter().zip(&seed_sets).zip(walks) {
        let walk = outcome?;
        let stem = seed_file.file_stem().unwrap_or_default();
        let output = out_dir.join(stem).with_extension("rwr");
        let mut wtr = File::create(&output)
            .map(BufWriter::new)
            .map_err(|why| WalkerError::io(&output, why))?;
        for name in rank::rank_descending(&walk.probabilities, network.names()) {
            writeln!(wtr, "{name}")?;
        }
        debug!("BATCH\t{}\t{}\tConverged", seed_file.display(), walk.rounds);
        runs.push(RunRecord {
            seed_file: seed_file.clone(),
            output,
            seeds: seeds.len(),
            rounds: walk.rounds,
        });
    }
    let summary = BatchSummary {
        graph,
        nodes: network.node_count(),
        runs,
    };
    let summary_path = out_dir.join("summary.json");
    let wtr = File::create(&summary_path)
        .map(BufWriter::new)
        .map_err(|why| WalkerError::io(&summary_path, why))?;
    serde_json::to_writer_pretty(wtr, &summary).map_err(std::io::Error::from)?;
    Ok(())
}
