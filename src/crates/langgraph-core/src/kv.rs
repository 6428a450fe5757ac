//! External key-value client for task status and cancellation signaling.
//!
//! The executor and request pipeline share a small amount of state through an
//! external store: a task's lifecycle status (`running`, `finished-with-success`,
//! `finished-with-error`) keyed by the task ID itself, and a cancellation marker
//! keyed by `task-<id>`. The asymmetry between the two key shapes is intentional
//! wire compatibility with the system this crate reimplements (see `DESIGN.md`)
//! and must be preserved by every implementation of [`KvClient`].
//!
//! The contract is deliberately thin and *eventual*: a `set` that races a `get`
//! is not required to be linearizable, only to eventually converge. Callers that
//! need a stronger guarantee must build it on top.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Errors surfaced by a [`KvClient`] implementation.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("key-value backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, KvError>;

/// Literal status values written under the bare task-ID key.
pub mod status {
    pub const RUNNING: &str = "running";
    pub const FINISHED_WITH_SUCCESS: &str = "finished-with-success";
    pub const FINISHED_WITH_ERROR: &str = "finished-with-error";
}

/// Literal value written under the `task-<id>` cancellation key.
pub const CANCELLED: &str = "cancelled";

/// Build the cancellation-marker key for a task ID.
pub fn cancellation_key(task_id: &str) -> String {
    format!("task-{task_id}")
}

/// A thin async contract over a remote key-value store.
///
/// Implementations must be `Send + Sync` so a single client can be shared
/// (typically behind an `Arc`) across every concurrent node activation of a
/// traversal, and across concurrently in-flight HTTP requests.
#[async_trait]
pub trait KvClient: Send + Sync {
    /// Write `value` under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Read the raw bytes stored at `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Convenience: has `task-<task_id>` been set to the literal `cancelled` marker?
    ///
    /// This is the exact check [`crate::node::check_for_continue`] performs. It
    /// is provided here too so callers that only hold a `KvClient` (e.g. the
    /// cancellation endpoint's sibling, status reporting) can reuse it.
    async fn is_cancelled(&self, task_id: &str) -> Result<bool> {
        let key = cancellation_key(task_id);
        let value = self.get(&key).await?;
        Ok(value.as_deref() == Some(CANCELLED.as_bytes()))
    }
}

/// Redis-backed [`KvClient`], the production implementation.
///
/// Grounded in the original system's `redis.asyncio.Redis(host=..., port=6379,
/// db=0)` client construction: a single connection manager shared across the
/// process, addressed purely by host (the port and database are fixed).
pub struct RedisKvClient {
    manager: redis::aio::ConnectionManager,
}

impl RedisKvClient {
    /// Connect to `redis://<host>:6379/0`, matching the original deployment's
    /// fixed port and database index.
    pub async fn connect(host: &str) -> Result<Self> {
        let url = format!("redis://{host}:6379/0");
        let client = redis::Client::open(url).map_err(|e| KvError::Backend(e.to_string()))?;
        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| KvError::Backend(e.to_string()))?;
        Ok(Self { manager })
    }
}

#[async_trait]
impl KvClient for RedisKvClient {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| KvError::Backend(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        redis::cmd("GET")
            .arg(key)
            .query_async::<_, Option<Vec<u8>>>(&mut conn)
            .await
            .map_err(|e| KvError::Backend(e.to_string()))
    }
}

/// In-process [`KvClient`] for tests and local development.
///
/// Not distributed, not persistent — one process, one map, guarded by a mutex.
#[derive(Default)]
pub struct InMemoryKvClient {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryKvClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvClient for InMemoryKvClient {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.as_bytes().to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancellation_key_has_task_prefix() {
        assert_eq!(cancellation_key("abc-123"), "task-abc-123");
    }

    #[tokio::test]
    async fn in_memory_client_round_trips() {
        let kv = InMemoryKvClient::new();
        kv.set("t1", status::RUNNING).await.unwrap();
        assert_eq!(kv.get("t1").await.unwrap(), Some(b"running".to_vec()));
    }

    #[tokio::test]
    async fn is_cancelled_false_when_unset() {
        let kv = InMemoryKvClient::new();
        assert!(!kv.is_cancelled("t1").await.unwrap());
    }

    #[tokio::test]
    async fn is_cancelled_true_after_marker_set() {
        let kv = InMemoryKvClient::new();
        kv.set(&cancellation_key("t1"), CANCELLED).await.unwrap();
        assert!(kv.is_cancelled("t1").await.unwrap());
    }
}
