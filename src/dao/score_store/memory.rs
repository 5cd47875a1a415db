use std::{cmp::Reverse, sync::Arc};

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::dao::{models::ScoreEntity, score_store::ScoreStore, storage::StorageResult};

/// In-process score store; history lives as long as the process.
#[derive(Clone, Default)]
pub struct MemoryScoreStore {
    scores: Arc<RwLock<Vec<ScoreEntity>>>,
}

impl MemoryScoreStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_score(&self, entry: ScoreEntity) -> BoxFuture<'static, StorageResult<()>> {
        let scores = self.scores.clone();
        Box::pin(async move {
            scores.write().await.push(entry);
            Ok(())
        })
    }

    fn list_scores(&self) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        let scores = self.scores.clone();
        Box::pin(async move {
            let mut listed = scores.read().await.clone();
            listed.sort_by_key(|entry| Reverse(entry.recorded_at));
            Ok(listed)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
