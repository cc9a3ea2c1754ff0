//! Property tests for the height function and candidate selection.

use std::sync::Arc;

use forcepath::domain::models::{Candidate, HeightConfig};
use forcepath::services::{select_best, DistancePenalty, SocialPenalty};
use forcepath::{Force, ForceTable, HeightScorer, ScoringContext, StateVector};
use proptest::prelude::*;

const EPS: f64 = 1e-8;

fn vector(dim: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-5.0f64..5.0, dim)
}

fn scorer(forces: Vec<Vec<f64>>, centroid: Vec<f64>) -> Arc<dyn HeightScorer> {
    let forces = forces
        .into_iter()
        .enumerate()
        .map(|(i, v)| Force::new(format!("f{i}"), StateVector::new(v), 1.0))
        .collect();
    let table = ForceTable::new(forces).unwrap();
    let context =
        ScoringContext::new(table, StateVector::new(centroid), HeightConfig::default()).unwrap();
    Arc::new(context.height_calculator())
}

proptest! {
    #[test]
    fn distance_penalty_is_one_at_rest(v in vector(6), alpha in 0.0f64..4.0) {
        let current = StateVector::new(v);
        let penalty = DistancePenalty::new(alpha).penalty(&current, &current);
        prop_assert!((penalty - 1.0).abs() < 1e-12);
    }

    #[test]
    fn distance_penalty_never_below_one(a in vector(6), b in vector(6), alpha in 0.0f64..4.0) {
        let penalty = DistancePenalty::new(alpha).penalty(&StateVector::new(a), &StateVector::new(b));
        prop_assert!(penalty >= 1.0);
    }

    #[test]
    fn social_penalty_never_below_one(candidate in vector(6), centroid in vector(6)) {
        let penalty = SocialPenalty::new(StateVector::new(centroid), EPS)
            .penalty(&StateVector::new(candidate));
        prop_assert!(penalty >= 1.0 - 1e-9);
        prop_assert!(penalty.is_finite());
    }

    #[test]
    fn height_is_positive_and_finite(
        forces in prop::collection::vec(vector(4), 1..5),
        centroid in vector(4),
        candidate in vector(4),
        current in vector(4),
    ) {
        let scorer = scorer(forces, centroid);
        let height = scorer.height(&StateVector::new(candidate), &StateVector::new(current));
        prop_assert!(height > 0.0);
        prop_assert!(height.is_finite());
    }

    #[test]
    fn cosine_similarity_is_bounded(a in vector(8), b in vector(8)) {
        let cos = StateVector::new(a).cosine_similarity(&StateVector::new(b), EPS);
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&cos));
    }

    #[test]
    fn select_best_returns_first_minimum(heights in prop::collection::vec(0.0f64..10.0, 1..20)) {
        let candidates: Vec<Candidate> = heights
            .iter()
            .map(|&height| Candidate { vector: StateVector::new(vec![height]), height })
            .collect();
        let best = select_best(&candidates).unwrap();
        let minimum = heights.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(heights[best], minimum);
        prop_assert!(heights[..best].iter().all(|&h| h > minimum));
    }
}

#[test]
fn select_best_on_empty_population() {
    assert_eq!(select_best(&[]), None);
}

#[test]
fn aligned_candidate_scores_lower() {
    let scorer = scorer(vec![vec![1.0, 0.0], vec![0.8, 0.2]], vec![1.0, 0.1]);
    let current = StateVector::new(vec![0.5, 0.5]);
    let aligned = StateVector::new(vec![0.9, 0.1]);
    let opposed = StateVector::new(vec![-0.9, 0.1]);
    assert!(scorer.height(&aligned, &current) < scorer.height(&opposed, &current));
}
