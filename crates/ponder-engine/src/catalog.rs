//! Task catalog implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use ponder_core::{Error, ExistingTask, Result, TaskCatalog};

/// Catalog with no tasks, for workspaces without a tracker.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTaskCatalog;

#[async_trait]
impl TaskCatalog for NoTaskCatalog {
    async fn list_existing_tasks(&self, _repository_scope: Option<&str>) -> Result<Vec<ExistingTask>> {
        Ok(Vec::new())
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticTaskCatalog {
    tasks: Vec<ExistingTask>,
}

impl StaticTaskCatalog {
    pub fn new(tasks: Vec<ExistingTask>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl TaskCatalog for StaticTaskCatalog {
    async fn list_existing_tasks(&self, repository_scope: Option<&str>) -> Result<Vec<ExistingTask>> {
        Ok(in_scope(&self.tasks, repository_scope))
    }
}

/// Catalog read from a JSON array of tasks on every call.
#[derive(Debug, Clone)]
pub struct JsonTaskCatalog {
    path: PathBuf,
}

impl JsonTaskCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TaskCatalog for JsonTaskCatalog {
    async fn list_existing_tasks(&self, repository_scope: Option<&str>) -> Result<Vec<ExistingTask>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(format!("task catalog {}", self.path.display()))
            } else {
                Error::Io(e)
            }
        })?;
        let tasks: Vec<ExistingTask> = serde_json::from_slice(&bytes)?;
        debug!(
            catalog_path = %self.path.display(),
            task_count = tasks.len(),
            "catalog: tasks loaded"
        );
        Ok(in_scope(&tasks, repository_scope))
    }
}

/// Tasks for `scope`; tasks without a repository belong to every scope.
fn in_scope(tasks: &[ExistingTask], scope: Option<&str>) -> Vec<ExistingTask> {
    tasks
        .iter()
        .filter(|task| match (scope, task.repository.as_deref()) {
            (Some(scope), Some(repo)) => scope == repo,
            _ => true,
        })
        .cloned()
        .collect()
}
