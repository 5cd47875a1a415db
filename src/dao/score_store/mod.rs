mod memory;

pub use memory::MemoryScoreStore;

use crate::dao::models::ScoreEntity;
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for final scores.
pub trait ScoreStore: Send + Sync {
    /// Persist one final score.
    fn save_score(&self, entry: ScoreEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Past scores, most recent first.
    fn list_scores(&self) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>>;
    /// Cheap liveness probe used by the health check.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
