/// Persisted record definitions.
pub mod models;
/// Score persistence and history retrieval.
pub mod score_store;
/// Errors shared by score store backends.
pub mod storage;
