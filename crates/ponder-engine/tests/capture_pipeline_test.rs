//! End-to-end capture flows against a file-backed workspace.

use std::sync::Arc;

use ponder_db::FileNoteRepository;
use ponder_engine::{
    CaptureRequest, Error, MatchCandidate, NoTaskCatalog, NoteCriteria, PonderConfig,
    RecommendedAction, ThoughtService,
};
use ponder_search::SimilarityConfig;
use tempfile::TempDir;

async fn workspace_service(tmp: &TempDir) -> ThoughtService {
    let store = Arc::new(FileNoteRepository::for_workspace(tmp.path()));
    let service = ThoughtService::new(store, Arc::new(NoTaskCatalog));
    service.initialize().await.unwrap();
    service
}

#[tokio::test]
async fn test_follow_up_thought_merges_into_earlier_note() {
    let tmp = TempDir::new().unwrap();
    let service = workspace_service(&tmp).await;

    let first = service
        .capture(
            CaptureRequest::new("Implement retry logic with exponential backoff for NATS failures")
                .with_tags(["reliability"]),
        )
        .await
        .unwrap();
    let second = service
        .capture(
            CaptureRequest::new("Add circuit breaker and retry with backoff for message bus errors")
                .with_tags(["resilience"]),
        )
        .await
        .unwrap();

    let rec = &second.recommendation;
    assert_eq!(rec.action, RecommendedAction::MergeIntoExisting);
    assert!(!rec.degraded);
    match &rec.best_match {
        Some(MatchCandidate::Note(best)) => {
            assert_eq!(best.note_id, first.note.id);
            assert!(best.score > 35.0);
        }
        other => panic!("expected a note match, got {:?}", other),
    }
    assert!(rec.confidence >= 0.5 && rec.confidence <= 0.95);
    assert!(rec.features.is_some());

    assert_eq!(second.related.len(), 1);
    assert!(second.summary.contains("merge_into_existing"));
    assert!(second.summary.contains(&first.note.id.to_string()));
}

#[tokio::test]
async fn test_unrelated_thoughts_do_not_match() {
    let tmp = TempDir::new().unwrap();
    let service = workspace_service(&tmp).await;

    service
        .capture(CaptureRequest::new("Rename the billing dashboard colors"))
        .await
        .unwrap();
    let outcome = service
        .capture(CaptureRequest::new("Read the paper on vector clocks"))
        .await
        .unwrap();

    assert!(outcome.related.is_empty());
    assert!(outcome.recommendation.best_match.is_none());
    assert_ne!(
        outcome.recommendation.action,
        RecommendedAction::MergeIntoExisting
    );
}

#[tokio::test]
async fn test_missing_task_catalog_degrades_but_still_stores() {
    let tmp = TempDir::new().unwrap();
    let mut config = PonderConfig::default();
    config.storage.workspace_root = Some(tmp.path().to_path_buf());
    config.storage.task_catalog = Some(tmp.path().join("missing-tasks.json"));

    let service = ThoughtService::from_config(&config).unwrap();
    service.initialize().await.unwrap();

    let outcome = service
        .capture(CaptureRequest::new("Critical outage: redesign the distributed queue architecture"))
        .await
        .unwrap();

    let rec = &outcome.recommendation;
    assert!(rec.degraded);
    assert_eq!(rec.action, RecommendedAction::ArchiveOnly);
    assert!(rec.reason.contains("task catalog"));
    assert!(outcome.summary.contains("analysis degraded"));

    let stored = service.get_note(outcome.note.id).await.unwrap();
    assert_eq!(stored.content, outcome.note.content);
    assert_eq!(service.get_stats().await.unwrap().total, 1);
}

#[tokio::test]
async fn test_scan_deadline_degrades_but_still_stores() {
    let tmp = TempDir::new().unwrap();
    workspace_service(&tmp)
        .await
        .capture(CaptureRequest::new("Tune connection pool size"))
        .await
        .unwrap();

    // a zero budget expires before the first stored note is scored
    let store = Arc::new(FileNoteRepository::for_workspace(tmp.path()));
    let service = ThoughtService::new(store, Arc::new(NoTaskCatalog))
        .with_similarity_config(SimilarityConfig::default().with_scan_budget_ms(0));

    let outcome = service
        .capture(CaptureRequest::new("Connection pool size is too small"))
        .await
        .unwrap();

    let rec = &outcome.recommendation;
    assert!(rec.degraded);
    assert_eq!(rec.action, RecommendedAction::ArchiveOnly);
    assert!(rec.reason.contains("similarity scan exceeded"));
    assert!(outcome.related.is_empty());
    assert_eq!(service.get_stats().await.unwrap().total, 2);
    assert!(service.get_note(outcome.note.id).await.is_ok());
}

#[cfg(unix)]
#[tokio::test]
async fn test_unwritable_storage_fails_capture() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let service = workspace_service(&tmp).await;
    let storage_dir = tmp.path().join(".ponder");
    std::fs::set_permissions(&storage_dir, std::fs::Permissions::from_mode(0o555)).unwrap();

    // Root ignores permission bits; nothing to assert in that case.
    if std::fs::write(storage_dir.join("x"), b"x").is_ok() {
        return;
    }

    let result = service
        .capture(CaptureRequest::new("Document the release checklist"))
        .await;
    std::fs::set_permissions(&storage_dir, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(Error::StorageUnavailable(_))));
    assert_eq!(service.get_stats().await.unwrap().total, 0);
}

#[tokio::test]
async fn test_workspace_config_file_supplies_task_catalog() {
    let tmp = TempDir::new().unwrap();
    let ponder_dir = tmp.path().join(".ponder");
    std::fs::create_dir_all(&ponder_dir).unwrap();

    let catalog_path = tmp.path().join("tasks.json");
    std::fs::write(
        &catalog_path,
        r#"[{"title": "Rotate API tokens for the billing service", "repository": "billing"}]"#,
    )
    .unwrap();
    std::fs::write(
        ponder_dir.join("config.toml"),
        format!(
            "[storage]\ntask_catalog = {:?}\n",
            catalog_path.display().to_string()
        ),
    )
    .unwrap();

    let config = PonderConfig::load(tmp.path()).unwrap();
    assert_eq!(config.storage.task_catalog.as_deref(), Some(catalog_path.as_path()));

    let service = ThoughtService::from_config(&config).unwrap();
    service.initialize().await.unwrap();

    let outcome = service
        .capture(
            CaptureRequest::new("Rotate API tokens for the billing service")
                .with_repository("billing"),
        )
        .await
        .unwrap();
    assert_eq!(
        outcome.recommendation.action,
        RecommendedAction::MergeIntoExisting
    );
    match &outcome.recommendation.best_match {
        Some(MatchCandidate::Task(m)) => {
            assert_eq!(m.task.title, "Rotate API tokens for the billing service")
        }
        other => panic!("expected a task match, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_operations_over_captured_notes() {
    let tmp = TempDir::new().unwrap();
    let service = workspace_service(&tmp).await;

    let nats = service
        .capture(CaptureRequest::new("Tune NATS consumer prefetch").with_tags(["nats", "perf"]))
        .await
        .unwrap();
    service
        .capture(CaptureRequest::new("Profile the importer").with_tags(["perf"]))
        .await
        .unwrap();
    service
        .capture(CaptureRequest::new("Write onboarding guide").with_context("retro"))
        .await
        .unwrap();

    let perf = service
        .find_notes(&NoteCriteria {
            tags: Some(vec!["PERF".to_string()]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(perf.len(), 2);

    let by_context = service
        .find_notes(&NoteCriteria {
            content_substring: Some("RETRO".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_context.len(), 1);

    let stats = service.get_stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.recent_count, 3);
    assert_eq!(stats.top_tags[0].tag, "perf");
    assert_eq!(stats.top_tags[0].count, 2);

    let aging = service.get_aging_report(None).await.unwrap();
    assert_eq!(aging.days_old, 7);
    assert!(aging.aging.is_empty() && aging.stale.is_empty());
    assert_eq!(aging.stats.fresh_count, 3);

    let updated = service
        .append_to_note(
            nats.note.id,
            "Prefetch 256 looked best",
            &["nats".to_string(), "tuning".to_string()],
        )
        .await
        .unwrap();
    assert!(updated.content.starts_with("Tune NATS consumer prefetch"));
    assert!(updated.content.contains("Prefetch 256 looked best"));
    assert!(updated.tags.contains(&"tuning".to_string()));

    assert!(service.delete_note(nats.note.id).await.unwrap());
    assert!(!service.delete_note(nats.note.id).await.unwrap());
    assert!(matches!(
        service.get_note(nats.note.id).await,
        Err(Error::NoteNotFound(_))
    ));
    assert_eq!(service.get_stats().await.unwrap().total, 2);
}
