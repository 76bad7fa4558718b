//! Random walk with restart over one or two transition operators.
//!
//! Per round, with restart probability r and original-graph probability g:
//!
//! ```text
//! p_(t+1) = r * p_0 + (1 - r) * (g * OG * p_t + (1 - g) * TSG * p_t)
//! ```
//!
//! (the walk term collapses to `OG * p_t` without a tissue matrix). The run
//! stops once the L1 norm of `p_(t+1) - p_t` drops below [`CONV_THRESHOLD`].
use crate::error::WalkerError;
use crate::network::Network;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

/// Convergence criterion, the same threshold as the original RWR paper.
pub const CONV_THRESHOLD: f64 = 1e-6;

/// The transition operator the walker advances along. Whether a
/// tissue-specific matrix takes part is decided here, by variant, once.
#[derive(Debug, Clone)]
pub enum TransitionOperator {
    /// Walk on the original graph only.
    Original(DMatrix<f64>),
    /// Walk on the original graph with probability `og_prob`, on the
    /// tissue-specific graph otherwise. Both matrices share the same
    /// canonical indexing.
    Blended {
        og: DMatrix<f64>,
        tsg: DMatrix<f64>,
        og_prob: f64,
    },
}

impl TransitionOperator {
    pub fn blended(og: DMatrix<f64>, tsg: DMatrix<f64>, og_prob: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&og_prob),
            "og_prob must be within [0,1]: {og_prob}"
        );
        assert_eq!(og.ncols(), tsg.ncols());
        TransitionOperator::Blended { og, tsg, og_prob }
    }

    pub fn node_count(&self) -> usize {
        match self {
            TransitionOperator::Original(og) => og.ncols(),
            TransitionOperator::Blended { og, .. } => og.ncols(),
        }
    }

    /// One step of the walk term.
    fn advance(&self, p_t: &DVector<f64>) -> DVector<f64> {
        match self {
            TransitionOperator::Original(og) => og * p_t,
            TransitionOperator::Blended { og, tsg, og_prob } => {
                (og * p_t) * *og_prob + (tsg * p_t) * (1.0 - og_prob)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WalkConfig {
    pub restart_prob: f64,
    /// Safety valve: give up after this many rounds instead of looping
    /// forever on pathological inputs. `None` reproduces the reference
    /// behavior of iterating without bound.
    pub max_rounds: Option<usize>,
}

impl WalkConfig {
    pub fn new(restart_prob: f64, max_rounds: Option<usize>) -> Self {
        assert!(
            (0.0..=1.0).contains(&restart_prob),
            "restart probability must be within [0,1]: {restart_prob}"
        );
        Self {
            restart_prob,
            max_rounds,
        }
    }
}

/// A converged walk.
#[derive(Debug, Clone)]
pub struct Walk {
    /// Steady-state visitation probabilities, in canonical node order.
    pub probabilities: DVector<f64>,
    pub rounds: usize,
}

/// The restart distribution: 1.0 at every seed index, 0 elsewhere. Each seed
/// gets full unit mass; a multi-seed vector is intentionally not
/// re-normalized. A seed missing from the network is fatal.
pub fn seed_vector(seeds: &[String], network: &Network) -> Result<DVector<f64>, WalkerError> {
    let mut p_0 = DVector::zeros(network.node_count());
    for seed in seeds {
        match network.index_of(seed) {
            Some(node) => p_0[node] = 1.0,
            None => {
                return Err(WalkerError::SeedNotFound {
                    node: seed.clone(),
                    seeds: seeds.to_vec(),
                })
            }
        }
    }
    Ok(p_0)
}

/// Iterate the restart recurrence to convergence.
pub fn run_walk(
    op: &TransitionOperator,
    p_0: &DVector<f64>,
    config: &WalkConfig,
) -> Result<Walk, WalkerError> {
    assert_eq!(op.node_count(), p_0.len());
    let restart_prob = config.restart_prob;
    let restart = p_0 * restart_prob;
    let mut p_t = p_0.clone();
    let mut rounds = 0;
    loop {
        rounds += 1;
        let p_next = &restart + op.advance(&p_t) * (1.0 - restart_prob);
        let diff_norm: f64 = p_next
            .iter()
            .zip(p_t.iter())
            .map(|(next, cur)| (next - cur).abs())
            .sum();
        trace!("ROUND\t{}\t{:.3e}", rounds, diff_norm);
        if diff_norm < CONV_THRESHOLD {
            debug!("CONVERGED\t{}\t{:.3e}", rounds, diff_norm);
            return Ok(Walk {
                probabilities: p_next,
                rounds,
            });
        }
        if config.max_rounds.map_or(false, |cap| rounds >= cap) {
            return Err(WalkerError::NoConvergence(rounds));
        }
        p_t = p_next;
    }
}

/// Run one walk per seed set in parallel. The matrices are shared read-only;
/// every worker owns its private probability vectors.
pub fn run_walks(
    op: &TransitionOperator,
    network: &Network,
    seed_sets: &[Vec<String>],
    config: &WalkConfig,
) -> Vec<Result<Walk, WalkerError>> {
    seed_sets
        .par_iter()
        .map(|seeds| seed_vector(seeds, network).and_then(|p_0| run_walk(op, &p_0, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix;

    fn triangle() -> Network {
        let mut net = Network::default();
        net.add_edge("A", "B", 1.0);
        net.add_edge("B", "C", 1.0);
        net.add_edge("A", "C", 1.0);
        net
    }

    fn og_operator(net: &Network) -> TransitionOperator {
        let (_, og) = matrix::build_og(net);
        TransitionOperator::Original(og)
    }

    fn seeds(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn restart_dominates_at_r_one() {
        let net = triangle();
        let p_0 = seed_vector(&seeds(&["A"]), &net).unwrap();
        let walk = run_walk(&og_operator(&net), &p_0, &WalkConfig::new(1.0, None)).unwrap();
        assert_eq!(walk.rounds, 1);
        assert_eq!(walk.probabilities, p_0);
    }

    #[test]
    fn triangle_seed_ranks_seed_first() {
        let net = triangle();
        let p_0 = seed_vector(&seeds(&["A"]), &net).unwrap();
        let walk = run_walk(&og_operator(&net), &p_0, &WalkConfig::new(0.7, None)).unwrap();
        let p = &walk.probabilities;
        assert!(p[0] > p[1]);
        assert!(p[0] > p[2]);
        // B and C are symmetric around A
        assert!((p[1] - p[2]).abs() < 1e-12);
    }

    #[test]
    fn multi_seed_mass_is_not_normalized() {
        let net = triangle();
        let p_0 = seed_vector(&seeds(&["A", "C"]), &net).unwrap();
        assert_eq!(p_0.sum(), 2.0);
        assert_eq!(p_0[0], 1.0);
        assert_eq!(p_0[2], 1.0);
    }

    #[test]
    fn seed_order_does_not_matter() {
        let net = triangle();
        let config = WalkConfig::new(0.7, None);
        let op = og_operator(&net);
        let forward = seed_vector(&seeds(&["A", "C"]), &net).unwrap();
        let backward = seed_vector(&seeds(&["C", "A"]), &net).unwrap();
        assert_eq!(forward, backward);
        let p_fwd = run_walk(&op, &forward, &config).unwrap().probabilities;
        let p_bwd = run_walk(&op, &backward, &config).unwrap().probabilities;
        assert_eq!(p_fwd, p_bwd);
    }

    #[test]
    fn unknown_seed_is_fatal_and_reports_the_seed_list() {
        let net = triangle();
        let err = seed_vector(&seeds(&["A", "GHOST"]), &net).unwrap_err();
        match err {
            WalkerError::SeedNotFound { node, seeds } => {
                assert_eq!(node, "GHOST");
                assert_eq!(seeds, vec!["A".to_string(), "GHOST".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn round_ceiling_aborts_the_walk() {
        let net = triangle();
        let p_0 = seed_vector(&seeds(&["A"]), &net).unwrap();
        let outcome = run_walk(&og_operator(&net), &p_0, &WalkConfig::new(0.1, Some(1)));
        assert!(matches!(outcome, Err(WalkerError::NoConvergence(1))));
    }

    #[test]
    fn blended_walk_starves_the_severed_node() {
        use std::io::Cursor;
        use std::path::Path;
        let net = triangle();
        let (adjacency, og) = matrix::build_og(&net);
        let tsg = matrix::tissue_matrix(
            &net,
            &adjacency,
            Cursor::new("C\tNA\n"),
            Path::new("low.tsv"),
        )
        .unwrap();
        let op = TransitionOperator::blended(og, tsg, 0.1);
        let p_0 = seed_vector(&seeds(&["A"]), &net).unwrap();
        let p = run_walk(&op, &p_0, &WalkConfig::new(0.7, None))
            .unwrap()
            .probabilities;
        // C is reachable only through the 0.1 original-graph share
        assert!(p[2] < p[1]);
        assert!(p[2] > 0.0);
    }

    #[test]
    fn parallel_runs_match_sequential_runs() {
        let net = triangle();
        let op = og_operator(&net);
        let config = WalkConfig::new(0.7, None);
        let seed_sets = vec![seeds(&["A"]), seeds(&["B"]), seeds(&["A", "C"])];
        let parallel = run_walks(&op, &net, &seed_sets, &config);
        for (seed_set, outcome) in seed_sets.iter().zip(parallel) {
            let p_0 = seed_vector(seed_set, &net).unwrap();
            let expected = run_walk(&op, &p_0, &config).unwrap();
            assert_eq!(outcome.unwrap().probabilities, expected.probabilities);
        }
    }

    #[test]
    #[should_panic]
    fn restart_prob_outside_unit_interval_panics() {
        WalkConfig::new(1.5, None);
    }

    #[test]
    fn triangle_rank_list_breaks_the_tie_by_node_order() {
        use crate::rank;
        let net = triangle();
        let p_0 = seed_vector(&seeds(&["A"]), &net).unwrap();
        let walk = run_walk(&og_operator(&net), &p_0, &WalkConfig::new(0.7, None)).unwrap();
        let ranked: Vec<&str> = rank::rank_descending(&walk.probabilities, net.names()).collect();
        assert_eq!(ranked, vec!["A", "B", "C"]);
    }

    #[test]
    fn removing_a_node_yields_a_ranking_without_it() {
        use crate::{rank, reduce};
        use std::collections::HashSet;
        let remove: HashSet<String> = std::iter::once("C".to_string()).collect();
        let net = reduce::remove_and_reduce(&triangle(), &remove);
        let p_0 = seed_vector(&seeds(&["A"]), &net).unwrap();
        let walk = run_walk(&og_operator(&net), &p_0, &WalkConfig::new(0.7, None)).unwrap();
        let ranked: Vec<&str> = rank::rank_descending(&walk.probabilities, net.names()).collect();
        assert_eq!(ranked, vec!["A", "B"]);
    }
}
