use crate::store::KeyValueStore;
use mentionhub_core::{AnalysisResult, CoreError, ProjectId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Last fetched analysis result per project, stored as JSON.
#[derive(Clone)]
pub struct MentionCache {
    store: Arc<dyn KeyValueStore>,
}

impl MentionCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn key_for(project_id: &ProjectId) -> String {
        format!("mentions-{}", project_id)
    }

    pub async fn store(
        &self,
        project_id: &ProjectId,
        result: &AnalysisResult,
    ) -> Result<(), CoreError> {
        let value = serde_json::to_string(result)?;
        self.store.set(&Self::key_for(project_id), &value).await?;
        debug!(
            "Cached {} mentions for project {}",
            result.matching_posts.len(),
            project_id
        );
        Ok(())
    }

    /// `Ok(None)` when nothing is cached or the entry no longer parses.
    pub async fn load(&self, project_id: &ProjectId) -> Result<Option<AnalysisResult>, CoreError> {
        let key = Self::key_for(project_id);
        let Some(raw) = self.store.get(&key).await? else {
            debug!("No cached mentions for project {}", project_id);
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                warn!("Ignoring unparsable cache entry {}: {}", key, e);
                Ok(None)
            }
        }
    }

    pub async fn remove(&self, project_id: &ProjectId) -> Result<(), CoreError> {
        self.store.remove(&Self::key_for(project_id)).await
    }
}
