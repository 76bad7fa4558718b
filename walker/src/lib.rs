//! walker -- tissue-specific random walk with restart over a PPI network.
//!
//! The pipeline is `network` -> `reduce` -> `matrix` -> `walk` -> `rank`:
//! load a weighted edge list, optionally remove nodes and keep the largest
//! connected component, turn the result into column-stochastic transition
//! matrices, run the restart-biased power iteration to convergence, and emit
//! a rank list of every node by its steady-state visitation probability.
//!
//! RWR formulation adapted from Kohler S, Bauer S, Horn D, Robinson PN.
//! Walking the interactome for prioritization of candidate disease genes.
//! Am J Hum Genet. 2008;82(4):949-58.
pub mod error;
pub mod find_union;
pub mod matrix;
pub mod network;
pub mod rank;
pub mod reduce;
pub mod seed;
pub mod walk;
#[macro_use]
extern crate log;
