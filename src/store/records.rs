use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::foundation::error::PodiumResult;
use crate::scene::model::{PlayerEntry, PodiumRenderRequest, TournamentInfo};

/// Stored tournament. Place ids are never filled in by [`submit_podium`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRecord {
    /// Auto-increment id, starting at 1.
    pub id: u64,
    /// Tournament name.
    pub name: String,
    /// Date as submitted.
    pub date: String,
    /// Website URL.
    pub website_url: String,
    /// Player id of 1st place.
    pub first_place_id: Option<u64>,
    /// Player id of 2nd place.
    pub second_place_id: Option<u64>,
    /// Player id of 3rd place.
    pub third_place_id: Option<u64>,
}

/// Stored player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Auto-increment id, starting at 1.
    pub id: u64,
    /// Player name.
    pub name: String,
    /// Final score.
    pub score: i64,
    /// Portrait locator.
    pub image_url: String,
}

/// Result of [`submit_podium`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedPodium {
    /// Created tournament.
    pub tournament: TournamentRecord,
    /// Created players, rank order.
    pub players: Vec<PlayerRecord>,
}

/// Record storage for submitted podium forms.
pub trait RecordStore: Send + Sync {
    /// Insert a tournament and return it with its new id.
    fn create_tournament(&self, t: &TournamentInfo) -> PodiumResult<TournamentRecord>;
    /// Insert a player and return it with its new id.
    fn create_player(&self, p: &PlayerEntry) -> PodiumResult<PlayerRecord>;
    /// Look up a tournament.
    fn get_tournament(&self, id: u64) -> PodiumResult<Option<TournamentRecord>>;
    /// Look up a player.
    fn get_player(&self, id: u64) -> PodiumResult<Option<PlayerRecord>>;
}

#[derive(Debug)]
struct Table<T> {
    next_id: u64,
    rows: BTreeMap<u64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Process-local store; contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemRecordStore {
    tournaments: Mutex<Table<TournamentRecord>>,
    players: Mutex<Table<PlayerRecord>>,
}

impl MemRecordStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

// Rows are only inserted whole, so a poisoned table is still consistent.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordStore for MemRecordStore {
    fn create_tournament(&self, t: &TournamentInfo) -> PodiumResult<TournamentRecord> {
        let mut table = lock(&self.tournaments);
        let id = table.take_id();
        let rec = TournamentRecord {
            id,
            name: t.name.clone(),
            date: t.date.clone(),
            website_url: t.website_url.clone(),
            first_place_id: None,
            second_place_id: None,
            third_place_id: None,
        };
        table.rows.insert(id, rec.clone());
        Ok(rec)
    }

    fn create_player(&self, p: &PlayerEntry) -> PodiumResult<PlayerRecord> {
        let mut table = lock(&self.players);
        let id = table.take_id();
        let rec = PlayerRecord {
            id,
            name: p.name.clone(),
            score: p.score,
            image_url: p.image_url.clone(),
        };
        table.rows.insert(id, rec.clone());
        Ok(rec)
    }

    fn get_tournament(&self, id: u64) -> PodiumResult<Option<TournamentRecord>> {
        Ok(lock(&self.tournaments).rows.get(&id).cloned())
    }

    fn get_player(&self, id: u64) -> PodiumResult<Option<PlayerRecord>> {
        Ok(lock(&self.players).rows.get(&id).cloned())
    }
}

/// Validate a podium form and store its tournament and three players.
///
/// Nothing is stored when validation fails.
#[tracing::instrument(skip_all, fields(tournament = %req.tournament.name))]
pub fn submit_podium(
    store: &dyn RecordStore,
    req: &PodiumRenderRequest,
) -> PodiumResult<SubmittedPodium> {
    req.validate()?;
    let tournament = store.create_tournament(&req.tournament)?;
    let players = req
        .players
        .iter()
        .map(|p| store.create_player(p))
        .collect::<PodiumResult<Vec<_>>>()?;
    tracing::debug!(id = tournament.id, players = players.len(), "podium stored");
    Ok(SubmittedPodium {
        tournament,
        players,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/store/records.rs"]
mod tests;
