//! Pairwise note similarity.
//!
//! A score is the sum of four bounded signals: keyword overlap, tag overlap,
//! shared context, and recency of the existing note. Only the recency term
//! depends on which note is the query, so swapping two notes changes nothing
//! but that term.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, trace};
use uuid::Uuid;

use ponder_core::defaults::PREVIEW_LENGTH;
use ponder_core::{Error, Note, NoteDraft, Result, ScoreBreakdown, SimilarityResult};
use ponder_inference::extract_keywords;

use crate::config::SimilarityConfig;

/// The note being compared against the corpus, with its keywords extracted
/// once up front.
#[derive(Debug, Clone)]
pub struct SimilarityQuery {
    /// Set when the query is itself stored, so a scan can skip it
    pub note_id: Option<Uuid>,
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
    pub context_keywords: Vec<String>,
}

impl SimilarityQuery {
    pub fn new(content: &str, tags: &[String], context: Option<&str>) -> Self {
        Self {
            note_id: None,
            keywords: extract_keywords(content),
            tags: tags.to_vec(),
            context_keywords: context.map(extract_keywords).unwrap_or_default(),
        }
    }

    pub fn from_draft(draft: &NoteDraft) -> Self {
        Self::new(&draft.content, &draft.tags, draft.context.as_deref())
    }

    pub fn from_note(note: &Note) -> Self {
        Self {
            note_id: Some(note.id),
            ..Self::new(&note.content, &note.tags, note.context.as_deref())
        }
    }
}

/// Scores notes against a query.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    config: SimilarityConfig,
}

impl SimilarityEngine {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Score `existing` against `query` as seen at `now`.
    pub fn score(
        &self,
        query: &SimilarityQuery,
        existing: &Note,
        now: DateTime<Utc>,
    ) -> SimilarityResult {
        let mut reasons = Vec::new();

        let existing_keywords = extract_keywords(&existing.content);
        let content = self.content_score(&query.keywords, &existing_keywords, &mut reasons);
        let tags = self.tag_score(&query.tags, &existing.tags, &mut reasons);
        let existing_context = existing
            .context
            .as_deref()
            .map(extract_keywords)
            .unwrap_or_default();
        let context = self.context_score(&query.context_keywords, &existing_context, &mut reasons);
        let recency = self.recency_score(existing, now, &mut reasons);

        let breakdown = ScoreBreakdown {
            content,
            tags,
            context,
            recency,
        };
        let score = breakdown.total();
        trace!(note_id = %existing.id, score, "similarity: scored note");

        SimilarityResult {
            note_id: existing.id,
            preview: existing.preview(PREVIEW_LENGTH),
            created_at: existing.created_at,
            score,
            breakdown,
            reasons,
        }
    }

    /// Related notes above the inclusion threshold, best first.
    ///
    /// Ties go to the newer note. Fails with [`Error::AnalysisDegraded`] when
    /// the scan outlives `scan_budget_ms`.
    pub fn find_similar(
        &self,
        query: &SimilarityQuery,
        notes: &[Note],
        now: DateTime<Utc>,
    ) -> Result<Vec<SimilarityResult>> {
        let start = Instant::now();
        let budget = Duration::from_millis(self.config.scan_budget_ms);
        let mut results = Vec::new();

        for (scanned, note) in notes.iter().enumerate() {
            if start.elapsed() >= budget {
                return Err(Error::AnalysisDegraded(format!(
                    "similarity scan exceeded {} ms after {} of {} notes",
                    self.config.scan_budget_ms,
                    scanned,
                    notes.len()
                )));
            }
            if query.note_id == Some(note.id) {
                continue;
            }
            let result = self.score(query, note, now);
            if result.score > self.config.inclusion_threshold {
                results.push(result);
            }
        }

        sort_results(&mut results);
        debug!(
            corpus_size = notes.len(),
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "similarity: scan complete"
        );
        Ok(results)
    }

    /// Keyword overlap curve shared by note and task scoring.
    ///
    /// Jaccard overlap is scaled, clamped to 1 and squared, so one incidental
    /// shared word among many contributes little. Shared keywords are listed
    /// only when the unscaled overlap passes `keyword_reason_ratio`.
    pub(crate) fn content_score(
        &self,
        query: &[String],
        candidate: &[String],
        reasons: &mut Vec<String>,
    ) -> f32 {
        let candidate: HashSet<&str> = candidate.iter().map(String::as_str).collect();
        let query_set: HashSet<&str> = query.iter().map(String::as_str).collect();
        let union = query_set.union(&candidate).count();
        if union == 0 {
            return 0.0;
        }
        // query order keeps reasons stable
        let shared: Vec<&str> = query
            .iter()
            .map(String::as_str)
            .filter(|k| candidate.contains(k))
            .collect();
        let jaccard = shared.len() as f32 / union as f32;
        let scaled = (jaccard * self.config.content_overlap_scale).min(1.0);

        if jaccard > self.config.keyword_reason_ratio {
            let listed: Vec<&str> = shared
                .iter()
                .copied()
                .take(self.config.max_reason_keywords)
                .collect();
            reasons.push(format!("shared keywords: {}", listed.join(", ")));
        }
        scaled * scaled * self.config.content_weight
    }

    /// Tag overlap over case-folded sets, so swapping query and candidate
    /// never changes the result.
    fn tag_score(&self, query: &[String], candidate: &[String], reasons: &mut Vec<String>) -> f32 {
        let mut query_folded: Vec<String> = Vec::new();
        for tag in query.iter().map(|t| t.to_lowercase()) {
            if !query_folded.contains(&tag) {
                query_folded.push(tag);
            }
        }
        let candidate_set: HashSet<String> = candidate.iter().map(|t| t.to_lowercase()).collect();

        let largest = query_folded.len().max(candidate_set.len());
        if largest == 0 {
            return 0.0;
        }
        let shared: Vec<&str> = query_folded
            .iter()
            .filter(|t| candidate_set.contains(*t))
            .map(String::as_str)
            .collect();
        if shared.is_empty() {
            return 0.0;
        }
        reasons.push(format!("shared tags: {}", shared.join(", ")));
        shared.len() as f32 / largest as f32 * self.config.tag_weight
    }

    fn context_score(
        &self,
        query: &[String],
        candidate: &[String],
        reasons: &mut Vec<String>,
    ) -> f32 {
        let shared: Vec<&str> = query
            .iter()
            .filter(|k| candidate.contains(*k))
            .map(String::as_str)
            .collect();
        if shared.is_empty() {
            return 0.0;
        }
        let listed: Vec<&str> = shared
            .into_iter()
            .take(self.config.max_reason_context_terms)
            .collect();
        reasons.push(format!("same context: {}", listed.join(", ")));
        self.config.context_weight
    }

    fn recency_score(&self, existing: &Note, now: DateTime<Utc>, reasons: &mut Vec<String>) -> f32 {
        let window = self.config.recency_window_days;
        let age_days = existing.age_days(now) as f32;
        if window <= 0.0 || age_days >= window {
            return 0.0;
        }
        reasons.push(format!("captured {:.1} days ago", age_days));
        self.config.recency_weight * (1.0 - age_days / window)
    }
}

/// Score descending, then newer first, then id for a stable order.
fn sort_results(results: &mut [SimilarityResult]) {
    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.note_id.cmp(&a.note_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn note(content: &str, tags: &[&str], context: Option<&str>, age: ChronoDuration) -> Note {
        let created_at = Utc::now() - age;
        Note {
            id: Uuid::now_v7(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            context: context.map(str::to_string),
            created_at,
            updated_at: created_at,
            hash: String::new(),
        }
    }

    #[test]
    fn test_identical_old_notes_score_content_and_tags() {
        let engine = SimilarityEngine::default();
        let a = note("cache warmup strategy", &["perf"], None, ChronoDuration::days(30));
        let b = note("cache warmup strategy", &["perf"], None, ChronoDuration::days(30));
        let result = engine.score(&SimilarityQuery::from_note(&a), &b, Utc::now());
        assert!((result.breakdown.content - 40.0).abs() < 1e-4);
        assert!((result.breakdown.tags - 30.0).abs() < 1e-4);
        assert_eq!(result.breakdown.recency, 0.0);
        assert!(result.reasons[0].starts_with("shared keywords: cache, warmup, strategy"));
    }

    #[test]
    fn test_tag_overlap_uses_larger_set() {
        let engine = SimilarityEngine::default();
        let mut reasons = Vec::new();
        let query = vec!["a".to_string(), "b".to_string()];
        let candidate = vec!["B".to_string(), "c".to_string(), "d".to_string(), "e".to_string()];
        let score = engine.tag_score(&query, &candidate, &mut reasons);
        assert!((score - 7.5).abs() < 1e-4);
        assert_eq!(reasons, vec!["shared tags: b"]);
    }

    #[test]
    fn test_case_variant_tags_count_once() {
        let engine = SimilarityEngine::default();
        let a = vec!["api".to_string(), "API".to_string()];
        let b = vec!["api".to_string(), "db".to_string()];

        let mut reasons = Vec::new();
        let ab = engine.tag_score(&a, &b, &mut reasons);
        let ba = engine.tag_score(&b, &a, &mut Vec::new());
        assert!((ab - 15.0).abs() < 1e-4);
        assert!((ab - ba).abs() < 1e-5);
        assert_eq!(reasons, vec!["shared tags: api"]);
    }

    #[test]
    fn test_keyword_reason_needs_raw_overlap() {
        let engine = SimilarityEngine::default();
        let query: Vec<String> = ["alpha", "bravo", "charlie", "delta", "echo"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        // 1 of 9 shared: scores on the curve but is not named
        let weak: Vec<String> = ["alpha", "kilo", "lima", "mike", "oscar"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut reasons = Vec::new();
        assert!(engine.content_score(&query, &weak, &mut reasons) > 0.0);
        assert!(reasons.is_empty());

        // 3 of 7 shared
        let strong: Vec<String> = ["alpha", "bravo", "charlie", "zulu", "yankee"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        engine.content_score(&query, &strong, &mut reasons);
        assert_eq!(reasons, vec!["shared keywords: alpha, bravo, charlie"]);
    }

    #[test]
    fn test_context_is_flat_bonus() {
        let engine = SimilarityEngine::default();
        let a = note("alpha", &[], Some("payments incident review"), ChronoDuration::days(30));
        let b = note("omega", &[], Some("incident review notes"), ChronoDuration::days(30));
        let result = engine.score(&SimilarityQuery::from_note(&a), &b, Utc::now());
        assert_eq!(result.breakdown.context, 20.0);
        assert!(result.reasons.contains(&"same context: incident, review".to_string()));
    }

    #[test]
    fn test_context_requires_both_sides() {
        let engine = SimilarityEngine::default();
        let a = note("alpha", &[], Some("incident review"), ChronoDuration::days(30));
        let b = note("alpha", &[], None, ChronoDuration::days(30));
        let result = engine.score(&SimilarityQuery::from_note(&a), &b, Utc::now());
        assert_eq!(result.breakdown.context, 0.0);
    }

    #[test]
    fn test_recency_decays_linearly() {
        let engine = SimilarityEngine::default();
        let query = SimilarityQuery::new("x", &[], None);
        let now = Utc::now();
        let mut fresh = note("zzz", &[], None, ChronoDuration::zero());
        fresh.created_at = now;
        let half = note("zzz", &[], None, ChronoDuration::hours(84));
        let mut reasons = Vec::new();

        assert!((engine.recency_score(&fresh, now, &mut reasons) - 10.0).abs() < 1e-3);
        let half_score = engine.recency_score(&half, half.created_at + ChronoDuration::hours(84), &mut reasons);
        assert!((half_score - 5.0).abs() < 1e-3);
        let stale = note("zzz", &[], None, ChronoDuration::days(8));
        assert_eq!(engine.score(&query, &stale, now).breakdown.recency, 0.0);
    }

    #[test]
    fn test_empty_keyword_sets_score_zero() {
        let engine = SimilarityEngine::default();
        let mut reasons = Vec::new();
        assert_eq!(engine.content_score(&[], &[], &mut reasons), 0.0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_find_similar_skips_query_note_and_sorts() {
        let engine = SimilarityEngine::default();
        let query_note = note("retry backoff jitter", &["nats"], None, ChronoDuration::days(20));
        let strong = note("retry backoff jitter", &["nats"], None, ChronoDuration::days(20));
        let weaker = note("retry backoff policy", &[], None, ChronoDuration::days(20));
        let unrelated = note("lunch menu", &[], None, ChronoDuration::days(20));
        let notes = vec![
            unrelated,
            weaker.clone(),
            query_note.clone(),
            strong.clone(),
        ];

        let results = engine
            .find_similar(&SimilarityQuery::from_note(&query_note), &notes, Utc::now())
            .unwrap();
        let ids: Vec<Uuid> = results.iter().map(|r| r.note_id).collect();
        assert_eq!(ids, vec![strong.id, weaker.id]);
    }

    #[test]
    fn test_ties_prefer_newer_note() {
        let engine = SimilarityEngine::default();
        let older = note("deploy canary build", &[], None, ChronoDuration::days(40));
        let newer = note("deploy canary build", &[], None, ChronoDuration::days(20));
        let query = SimilarityQuery::new("deploy canary build", &[], None);
        let results = engine
            .find_similar(&query, &[older.clone(), newer.clone()], Utc::now())
            .unwrap();
        assert_eq!(results[0].note_id, newer.id);
        assert_eq!(results[1].note_id, older.id);
    }

    #[test]
    fn test_exhausted_budget_degrades() {
        let engine = SimilarityEngine::new(SimilarityConfig::default().with_scan_budget_ms(0));
        let notes = vec![note("anything", &[], None, ChronoDuration::days(1))];
        let err = engine
            .find_similar(&SimilarityQuery::new("anything", &[], None), &notes, Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::AnalysisDegraded(_)));
    }

    #[test]
    fn test_empty_corpus_is_fine_with_zero_budget() {
        let engine = SimilarityEngine::new(SimilarityConfig::default().with_scan_budget_ms(0));
        let results = engine
            .find_similar(&SimilarityQuery::new("anything", &[], None), &[], Utc::now())
            .unwrap();
        assert!(results.is_empty());
    }
}
