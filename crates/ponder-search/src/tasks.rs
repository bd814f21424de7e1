//! Scoring notes against existing work items.

use tracing::debug;

use ponder_core::{ExistingTask, TaskMatch};
use ponder_inference::extract_keywords;
use ponder_inference::text::TermMatcher;

use crate::similarity::{SimilarityEngine, SimilarityQuery};

impl SimilarityEngine {
    /// Score one task: keyword overlap with title and body, plus the share of
    /// the note's tags that the task text mentions.
    pub fn score_task(&self, query: &SimilarityQuery, task: &ExistingTask) -> TaskMatch {
        let text = format!("{}\n{}", task.title, task.body);
        let mut reasons = Vec::new();

        let task_keywords = extract_keywords(&text);
        let content = self.content_score(&query.keywords, &task_keywords, &mut reasons);

        let mut tags = 0.0;
        if !query.tags.is_empty() {
            let matcher = TermMatcher::new(&text);
            let mentioned: Vec<&str> = query
                .tags
                .iter()
                .map(String::as_str)
                .filter(|tag| matcher.contains(&tag.to_lowercase()))
                .collect();
            if !mentioned.is_empty() {
                reasons.push(format!("task mentions tags: {}", mentioned.join(", ")));
                tags = mentioned.len() as f32 / query.tags.len() as f32 * self.config().tag_weight;
            }
        }

        TaskMatch {
            task: task.clone(),
            score: content + tags,
            reasons,
        }
    }

    /// Tasks above the inclusion threshold, best first.
    pub fn match_tasks(&self, query: &SimilarityQuery, tasks: &[ExistingTask]) -> Vec<TaskMatch> {
        let mut matches: Vec<TaskMatch> = tasks
            .iter()
            .map(|task| self.score_task(query, task))
            .filter(|m| m.score > self.config().inclusion_threshold)
            .collect();
        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.task.title.cmp(&b.task.title))
        });
        debug!(
            task_count = tasks.len(),
            result_count = matches.len(),
            "similarity: task scan complete"
        );
        matches
    }
}
