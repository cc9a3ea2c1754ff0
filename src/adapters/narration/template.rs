//! Offline narrator that renders the summary without a language model.

use async_trait::async_trait;

use super::prompt::context_lines;
use crate::domain::errors::DomainResult;
use crate::domain::ports::{NarrationRequest, Narrator, TrajectoryDigest};
use crate::services::force_summary::{explain_direction, summarize_forces};

/// Offline narrator built from the force summary helpers.
#[derive(Debug, Clone)]
pub struct TemplateNarrator {
    top_forces: usize,
}

impl TemplateNarrator {
    pub fn new(top_forces: usize) -> Self {
        Self { top_forces }
    }
}

impl Default for TemplateNarrator {
    fn default() -> Self {
        Self::new(3)
    }
}

#[async_trait]
impl Narrator for TemplateNarrator {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn narrate(&self, request: &NarrationRequest) -> DomainResult<String> {
        let mut text = format!(
            "{} {}",
            summarize_forces(&request.force_scores, self.top_forces),
            explain_direction(&request.force_scores)
        );
        let lines = context_lines(&request.contexts);
        if !lines.is_empty() {
            text.push_str("\nClosest references:\n");
            text.push_str(&lines.join("\n"));
        }
        Ok(text)
    }

    async fn summarize_trajectory(&self, digest: &TrajectoryDigest) -> DomainResult<String> {
        let mut text = format!(
            "Scenario \"{}\" over {} step(s):\n",
            digest.input,
            digest.steps.len()
        );
        text.push_str(&digest.step_lines().join("\n"));
        Ok(text)
    }
}
