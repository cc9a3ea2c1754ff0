//! Prompt text shared by the narrators.

use crate::domain::ports::{ContextMatch, NarrationRequest, TrajectoryDigest};
use crate::services::force_summary::{explain_direction, summarize_forces};

/// System message for every narration request.
pub const SYSTEM_PROMPT: &str = "You are a social dynamics expert.
Your task is to describe the future state of a society based on the provided \"forces\" and \"context cues\".
The description must be:
1. Concrete and specific (avoid abstract or vague terms).
2. Based on the dominant forces and the nearest historical/social contexts provided.
3. A coherent paragraph describing the structural changes in society.
";

/// System message for whole-trajectory summaries.
pub const TRAJECTORY_SYSTEM_PROMPT: &str = "You are an expert in analyzing social change trajectories. \
Based on the input scenario and predicted steps, summarize the overall pattern of change. \
Focus on major trends, tensions, and stabilization processes.";

/// One `- sentence (sim 0.83)` line per context cue.
pub fn context_lines(contexts: &[ContextMatch]) -> Vec<String> {
    contexts
        .iter()
        .map(|c| format!("- {} (sim {:.2})", c.text, c.similarity))
        .collect()
}

/// The user message sent to the chat model.
pub fn user_prompt(request: &NarrationRequest, top_forces: usize) -> String {
    format!(
        "Current Dominant Forces:\n{forces}\n\n\
         Trajectory Direction:\n{direction}\n\n\
         Nearest Context Cues (Reference):\n{contexts}\n\n\
         Based on these, describe the specific social structure and daily life in this future society.",
        forces = summarize_forces(&request.force_scores, top_forces),
        direction = explain_direction(&request.force_scores),
        contexts = context_lines(&request.contexts).join("\n"),
    )
}

/// The user message for a whole-trajectory summary.
pub fn trajectory_prompt(digest: &TrajectoryDigest) -> String {
    format!(
        "Input Scenario: \"{input}\"\n\n\
         Predicted Trajectory:\n{steps}\n\n\
         Please provide a concise holistic summary of this trajectory.",
        input = digest.input,
        steps = digest.step_lines().join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ForceScores, StateVector};
    use crate::domain::ports::StepDigest;

    #[test]
    fn test_trajectory_prompt_lists_steps() {
        let digest = TrajectoryDigest {
            input: "Rents climb".into(),
            steps: vec![
                StepDigest {
                    step: 0,
                    summary: "Families move out.".into(),
                },
                StepDigest {
                    step: 1,
                    summary: "Co-ops form.".into(),
                },
            ],
        };
        assert_eq!(
            trajectory_prompt(&digest),
            "Input Scenario: \"Rents climb\"\n\nPredicted Trajectory:\n\
             Step 0: Families move out.\nStep 1: Co-ops form.\n\n\
             Please provide a concise holistic summary of this trajectory."
        );
    }

    #[test]
    fn test_user_prompt_sections() {
        let mut scores = ForceScores::new();
        scores.insert("trust".into(), 0.75);
        let request = NarrationRequest {
            force_scores: scores,
            vector: StateVector::new(vec![1.0]),
            contexts: vec![ContextMatch {
                text: "Neighbors share tools.".into(),
                similarity: 0.912,
            }],
        };

        let prompt = user_prompt(&request, 3);
        assert!(prompt.starts_with("Current Dominant Forces:\nDominant forces: trust (score 0.75)"));
        assert!(prompt.contains("Trajectory Direction:\nTrajectory leans toward the trust axis."));
        assert!(prompt.contains("- Neighbors share tools. (sim 0.91)"));
        assert!(prompt.ends_with("daily life in this future society."));
    }
}
