use log::debug;
use mlb_api::Team;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Team id → display name, shared by every request and rewritten wholesale by
/// the refresher. Cloning hands out another handle to the same directory.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    inner: Arc<RwLock<Snapshot>>,
}

/// Generation and size of the committed snapshot, read together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectorySummary {
    pub generation: u64,
    pub teams: usize,
}

/// One complete version of the directory. Generation 0 means nothing has been
/// fetched yet.
#[derive(Debug, Default)]
struct Snapshot {
    teams: HashMap<u32, String>,
    generation: u64,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of `id` in the currently committed snapshot.
    pub async fn resolve(&self, id: u32) -> Option<String> {
        self.inner.read().await.teams.get(&id).cloned()
    }

    /// Swap in a freshly fetched team set and return its generation.
    ///
    /// The map is built before the write lock is taken, so readers are only
    /// held off for the swap itself. Duplicate ids keep the last record.
    pub async fn replace(&self, entries: Vec<Team>) -> u64 {
        let mut teams = HashMap::with_capacity(entries.len());
        for team in entries {
            if let Some(previous) = teams.insert(team.id, team.name) {
                debug!("duplicate team id {} in directory fetch (dropped {previous:?})", team.id);
            }
        }

        let mut guard = self.inner.write().await;
        let generation = guard.generation + 1;
        *guard = Snapshot { teams, generation };
        generation
    }

    pub async fn summary(&self) -> DirectorySummary {
        let snapshot = self.inner.read().await;
        DirectorySummary { generation: snapshot.generation, teams: snapshot.teams.len() }
    }
}
