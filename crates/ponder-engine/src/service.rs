//! Capture pipeline and query entrypoints.
//!
//! A capture always persists the note. Analysis (similarity scan, task
//! catalog, decision) runs first and can only degrade the recommendation;
//! storage failures are the one fatal class.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use ponder_core::defaults::AGING_DAYS;
use ponder_core::{
    AgingReport, CorpusStats, Error, MatchCandidate, Note, NoteCriteria, NoteDraft,
    NoteRepository, Recommendation, Result, SimilarityResult, TaskCatalog,
};
use ponder_db::{clean_draft, hash_content, FileNoteRepository};
use ponder_inference::{analyze, assess_strategic_value, creation_complexity};
use ponder_search::{SimilarityConfig, SimilarityEngine, SimilarityQuery};

use crate::catalog::{JsonTaskCatalog, NoTaskCatalog};
use crate::config::{DecisionConfig, PonderConfig};
use crate::decision::{DecisionEngine, DecisionInput};
use crate::render;

/// A thought to capture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
    /// Restricts task matching to one repository
    #[serde(default)]
    pub repository: Option<String>,
}

impl CaptureRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }
}

/// Result of a capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub note: Note,
    pub recommendation: Recommendation,
    /// Related stored notes, best first
    pub related: Vec<SimilarityResult>,
    /// Human-readable rendering of the above
    pub summary: String,
}

/// Entry point tying the store, analyzers, and decision engine together.
pub struct ThoughtService {
    store: Arc<dyn NoteRepository>,
    catalog: Arc<dyn TaskCatalog>,
    similarity: SimilarityEngine,
    decision: DecisionEngine,
}

impl ThoughtService {
    /// Service with default thresholds.
    pub fn new(store: Arc<dyn NoteRepository>, catalog: Arc<dyn TaskCatalog>) -> Self {
        Self {
            store,
            catalog,
            similarity: SimilarityEngine::default(),
            decision: DecisionEngine::default(),
        }
    }

    /// File-backed service as described by `config`.
    pub fn from_config(config: &PonderConfig) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(FileNoteRepository::new(config.storage.storage_path()));
        let catalog: Arc<dyn TaskCatalog> = match &config.storage.task_catalog {
            Some(path) => Arc::new(JsonTaskCatalog::new(path)),
            None => Arc::new(NoTaskCatalog),
        };
        Ok(Self::new(store, catalog)
            .with_similarity_config(config.similarity.clone())
            .with_decision_config(config.decision.clone()))
    }

    pub fn with_similarity_config(mut self, config: SimilarityConfig) -> Self {
        self.similarity = SimilarityEngine::new(config);
        self
    }

    pub fn with_decision_config(mut self, config: DecisionConfig) -> Self {
        self.decision = DecisionEngine::new(config);
        self
    }

    /// Prepare storage. Safe to call repeatedly.
    pub async fn initialize(&self) -> Result<()> {
        self.store.initialize().await
    }

    /// Analyze, persist, and recommend.
    pub async fn capture(&self, request: CaptureRequest) -> Result<CaptureOutcome> {
        let start = Instant::now();
        let draft = clean_draft(NoteDraft {
            content: request.content,
            tags: request.tags,
            context: request.context,
        })?;

        let corpus = self.store.load_all().await;
        let (recommendation, related) = match self
            .recommend(&draft, request.repository.as_deref(), &corpus)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) if !e.is_fatal() => {
                warn!(error = %e, corpus_size = corpus.len(), "capture: analysis degraded");
                (Recommendation::degraded(e.to_string()), Vec::new())
            }
            Err(e) => return Err(e),
        };

        let note = self.store.store(draft).await?;
        let summary = render::capture_summary(&note, &recommendation, &related);

        info!(
            note_id = %note.id,
            action = recommendation.action.as_str(),
            degraded = recommendation.degraded,
            related_count = related.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "capture: completed"
        );
        Ok(CaptureOutcome {
            note,
            recommendation,
            related,
            summary,
        })
    }

    async fn recommend(
        &self,
        draft: &NoteDraft,
        repository: Option<&str>,
        corpus: &[Note],
    ) -> Result<(Recommendation, Vec<SimilarityResult>)> {
        let now = Utc::now();
        let features = analyze(&draft.content);
        let strategic_value = assess_strategic_value(&features, &draft.content);
        let creation_complexity = creation_complexity(&draft.content);

        let query = SimilarityQuery::from_draft(draft);
        let related = self.similarity.find_similar(&query, corpus, now)?;

        let hash = hash_content(&draft.content);
        let exact_duplicate = corpus
            .iter()
            .find(|n| n.hash == hash)
            .map(|n| self.similarity.score(&query, n, now));

        // an unavailable tracker is an analysis gap, not a storage failure
        let tasks = self
            .catalog
            .list_existing_tasks(repository)
            .await
            .map_err(|e| Error::AnalysisDegraded(format!("task catalog: {}", e)))?;
        let task_matches = self.similarity.match_tasks(&query, &tasks);

        let candidates: Vec<MatchCandidate> = related
            .iter()
            .cloned()
            .map(MatchCandidate::Note)
            .chain(task_matches.into_iter().map(MatchCandidate::Task))
            .collect();

        let recommendation = self.decision.decide(DecisionInput {
            features,
            strategic_value,
            creation_complexity,
            candidates,
            exact_duplicate,
        });
        Ok((recommendation, related))
    }

    pub async fn find_notes(&self, criteria: &NoteCriteria) -> Result<Vec<Note>> {
        self.store.find(criteria).await
    }

    pub async fn get_note(&self, id: Uuid) -> Result<Note> {
        self.store.get(id).await?.ok_or(Error::NoteNotFound(id))
    }

    /// Stored notes related to an existing note.
    pub async fn related_notes(&self, id: Uuid) -> Result<Vec<SimilarityResult>> {
        let note = self.get_note(id).await?;
        let corpus = self.store.load_all().await;
        self.similarity
            .find_similar(&SimilarityQuery::from_note(&note), &corpus, Utc::now())
    }

    pub async fn get_stats(&self) -> Result<CorpusStats> {
        self.store.stats().await
    }

    /// Aging report; `days_old` defaults to a week.
    pub async fn get_aging_report(&self, days_old: Option<u32>) -> Result<AgingReport> {
        self.store
            .aging_report(days_old.unwrap_or(AGING_DAYS))
            .await
    }

    pub async fn append_to_note(&self, id: Uuid, addendum: &str, tags: &[String]) -> Result<Note> {
        self.store.update_append(id, addendum, tags).await
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<bool> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticTaskCatalog;
    use ponder_core::{ExistingTask, RecommendedAction};
    use tempfile::TempDir;

    async fn service(tmp: &TempDir, catalog: Arc<dyn TaskCatalog>) -> ThoughtService {
        let store = Arc::new(FileNoteRepository::for_workspace(tmp.path()));
        let service = ThoughtService::new(store, catalog);
        service.initialize().await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_capture_into_empty_corpus_archives() {
        let tmp = TempDir::new().unwrap();
        let service = service(&tmp, Arc::new(NoTaskCatalog)).await;

        let outcome = service
            .capture(CaptureRequest::new("Try the other coffee place"))
            .await
            .unwrap();
        assert_eq!(outcome.recommendation.action, RecommendedAction::ArchiveOnly);
        assert!(!outcome.recommendation.degraded);
        assert!(outcome.related.is_empty());
        assert!(outcome.summary.contains("archive_only"));
        assert_eq!(service.get_stats().await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_exact_duplicate_merges() {
        let tmp = TempDir::new().unwrap();
        let service = service(&tmp, Arc::new(NoTaskCatalog)).await;

        let first = service
            .capture(CaptureRequest::new("Pin the toolchain version"))
            .await
            .unwrap();
        let second = service
            .capture(CaptureRequest::new("  Pin the toolchain version  "))
            .await
            .unwrap();

        assert_eq!(
            second.recommendation.action,
            RecommendedAction::MergeIntoExisting
        );
        match second.recommendation.best_match {
            Some(MatchCandidate::Note(n)) => assert_eq!(n.note_id, first.note.id),
            other => panic!("expected note match, got {:?}", other),
        }
        assert_eq!(service.get_stats().await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_task_match_drives_merge() {
        let tmp = TempDir::new().unwrap();
        let catalog = StaticTaskCatalog::new(vec![ExistingTask {
            title: "Cache search results in redis".to_string(),
            body: String::new(),
            repository: Some("search".to_string()),
            file_reference: Some("tasks/cache.md".to_string()),
        }]);
        let service = service(&tmp, Arc::new(catalog)).await;

        let outcome = service
            .capture(CaptureRequest::new("Cache search results in redis").with_repository("search"))
            .await
            .unwrap();
        assert_eq!(
            outcome.recommendation.action,
            RecommendedAction::MergeIntoExisting
        );
        assert!(matches!(
            outcome.recommendation.best_match,
            Some(MatchCandidate::Task(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_capture_is_rejected_and_not_stored() {
        let tmp = TempDir::new().unwrap();
        let service = service(&tmp, Arc::new(NoTaskCatalog)).await;
        let err = service.capture(CaptureRequest::new("   ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(service.get_stats().await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_get_note_unknown_id() {
        let tmp = TempDir::new().unwrap();
        let service = service(&tmp, Arc::new(NoTaskCatalog)).await;
        let id = Uuid::now_v7();
        assert!(matches!(
            service.get_note(id).await,
            Err(Error::NoteNotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_related_notes_excludes_self() {
        let tmp = TempDir::new().unwrap();
        let service = service(&tmp, Arc::new(NoTaskCatalog)).await;
        let a = service
            .capture(CaptureRequest::new("Tune connection pool size"))
            .await
            .unwrap();
        let b = service
            .capture(CaptureRequest::new("Connection pool size is too small"))
            .await
            .unwrap();

        let related = service.related_notes(a.note.id).await.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].note_id, b.note.id);
    }

    #[tokio::test]
    async fn test_from_config_uses_storage_dir() {
        let tmp = TempDir::new().unwrap();
        let mut config = PonderConfig::default();
        config.storage.storage_dir = Some(tmp.path().join("notes"));
        let service = ThoughtService::from_config(&config).unwrap();
        service.initialize().await.unwrap();
        assert!(tmp.path().join("notes").join("thoughts.json").exists());

        config.decision.related_match_threshold = 99.0;
        assert!(matches!(
            ThoughtService::from_config(&config),
            Err(Error::Config(_))
        ));
    }
}
