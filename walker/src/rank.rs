//! Rank emission from a converged probability vector.
use crate::error::WalkerError;
use crate::network::Network;
use nalgebra::DVector;
use std::cmp::Ordering;

/// Node identifiers from highest to lowest probability. The sort is stable
/// with no secondary key, so equal probabilities keep their canonical index
/// order. Pure function of its inputs; probabilities are neither
/// re-normalized nor rounded.
pub fn rank_descending<'a>(
    probabilities: &DVector<f64>,
    names: &'a [String],
) -> impl Iterator<Item = &'a str> {
    assert_eq!(probabilities.len(), names.len());
    let mut order: Vec<(usize, f64)> = probabilities.iter().copied().enumerate().collect();
    order.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    order.into_iter().map(move |(node, _)| names[node].as_str())
}

/// Probabilities in an explicit node order, for downstream tools that
/// assemble walk vectors into a matrix.
pub fn probabilities_in_order(
    probabilities: &DVector<f64>,
    network: &Network,
    order: &[String],
) -> Result<Vec<f64>, WalkerError> {
    order
        .iter()
        .map(|name| {
            network
                .index_of(name)
                .map(|node| probabilities[node])
                .ok_or_else(|| WalkerError::UnknownNode(name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn descending_order() {
        let p = DVector::from_vec(vec![0.1, 0.7, 0.2]);
        let names = names(&["A", "B", "C"]);
        let ranked: Vec<&str> = rank_descending(&p, &names).collect();
        assert_eq!(ranked, vec!["B", "C", "A"]);
    }

    #[test]
    fn ranking_is_a_permutation_of_the_node_set() {
        let p = DVector::from_vec(vec![0.3, 0.3, 0.1, 0.3]);
        let names = names(&["A", "B", "C", "D"]);
        let mut ranked: Vec<&str> = rank_descending(&p, &names).collect();
        assert_eq!(ranked.len(), names.len());
        ranked.sort_unstable();
        assert_eq!(ranked, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn ties_keep_canonical_order() {
        let p = DVector::from_vec(vec![0.2, 0.5, 0.2, 0.2]);
        let names = names(&["A", "B", "C", "D"]);
        let ranked: Vec<&str> = rank_descending(&p, &names).collect();
        assert_eq!(ranked, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn ranking_is_restartable() {
        let p = DVector::from_vec(vec![0.1, 0.7, 0.2]);
        let names = names(&["A", "B", "C"]);
        let first: Vec<&str> = rank_descending(&p, &names).collect();
        let second: Vec<&str> = rank_descending(&p, &names).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn probabilities_follow_the_given_order() {
        let mut net = Network::default();
        net.add_edge("A", "B", 1.0);
        net.add_edge("B", "C", 1.0);
        let p = DVector::from_vec(vec![0.5, 0.3, 0.2]);
        let order = names(&["C", "A"]);
        let probs = probabilities_in_order(&p, &net, &order).unwrap();
        assert_eq!(probs, vec![0.2, 0.5]);
    }

    #[test]
    fn unknown_node_in_order_is_fatal() {
        let mut net = Network::default();
        net.add_edge("A", "B", 1.0);
        let p = DVector::from_vec(vec![0.5, 0.5]);
        let err = probabilities_in_order(&p, &net, &names(&["GHOST"])).unwrap_err();
        assert!(matches!(err, WalkerError::UnknownNode(node) if node == "GHOST"));
    }
}
