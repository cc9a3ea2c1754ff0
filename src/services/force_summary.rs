//! Human-readable summaries of per-force alignment scores.

use crate::domain::models::{dominant_force, ForceScores};

/// The `k` highest-scoring forces, descending. Ties keep name order.
pub fn top_forces(scores: &ForceScores, k: usize) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = scores.iter().map(|(n, s)| (n.as_str(), *s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}

/// `Dominant forces: name (score 0.42), ...`
pub fn summarize_forces(scores: &ForceScores, k: usize) -> String {
    let phrases: Vec<String> = top_forces(scores, k)
        .into_iter()
        .map(|(name, score)| format!("{name} (score {score:.2})"))
        .collect();
    format!("Dominant forces: {}", phrases.join(", "))
}

/// `Trajectory leans toward the {name} axis.`
pub fn explain_direction(scores: &ForceScores) -> String {
    match dominant_force(scores) {
        Some(name) => format!("Trajectory leans toward the {name} axis."),
        None => "Trajectory has no dominant axis.".to_string(),
    }
}
