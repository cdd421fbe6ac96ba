//! Remote puzzle storage behind `?id=` links.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cp_core::Puzzle;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A saved puzzle and its play statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPuzzle {
    pub id: Uuid,
    pub puzzle: Puzzle,
    pub created_at: DateTime<Utc>,
    pub play_count: u64,
}

#[async_trait]
pub trait PuzzleStore: Send + Sync {
    async fn save(&self, puzzle: Puzzle) -> anyhow::Result<StoredPuzzle>;
    async fn load(&self, id: Uuid) -> anyhow::Result<Option<StoredPuzzle>>;
    /// Count one play. Returns the new total, or `None` for an unknown id.
    async fn record_play(&self, id: Uuid) -> anyhow::Result<Option<u64>>;
    /// Newest first.
    async fn list(&self) -> anyhow::Result<Vec<StoredPuzzle>>;
}

#[derive(Debug, Default)]
pub struct InMemoryPuzzleStore {
    inner: RwLock<HashMap<Uuid, StoredPuzzle>>,
}

impl InMemoryPuzzleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.inner.read().len()
    }
}

#[async_trait]
impl PuzzleStore for InMemoryPuzzleStore {
    async fn save(&self, puzzle: Puzzle) -> anyhow::Result<StoredPuzzle> {
        let stored = StoredPuzzle {
            id: Uuid::new_v4(),
            puzzle,
            created_at: Utc::now(),
            play_count: 0,
        };
        self.inner.write().insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn load(&self, id: Uuid) -> anyhow::Result<Option<StoredPuzzle>> {
        Ok(self.inner.read().get(&id).cloned())
    }

    async fn record_play(&self, id: Uuid) -> anyhow::Result<Option<u64>> {
        let mut map = self.inner.write();
        Ok(map.get_mut(&id).map(|stored| {
            stored.play_count += 1;
            stored.play_count
        }))
    }

    async fn list(&self) -> anyhow::Result<Vec<StoredPuzzle>> {
        let mut all: Vec<StoredPuzzle> = self.inner.read().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}
