use crate::store::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry
{
    pub email: String,
    pub score: u32,
    pub stage: u32,
    pub date: String,
}

impl LeaderboardEntry
{
    pub fn new(email: &str, score: u32, stage: u32) -> Self
    {
        Self {
            email: email.to_string(),
            score,
            stage,
            date: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankingPolicy
{
    BestPerEmail,
    KeepAll,
}

impl RankingPolicy
{
    fn matches(self, entry: &LeaderboardEntry, email: &str, score: u32) -> bool
    {
        match self {
            RankingPolicy::BestPerEmail => entry.email == email,
            RankingPolicy::KeepAll => entry.email == email && entry.score == score,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LeaderboardConfig
{
    pub key: &'static str,
    pub capacity: usize,
    pub display: usize,
    pub policy: RankingPolicy,
}

pub const GEO_LEADERBOARD: LeaderboardConfig = LeaderboardConfig {
    key: "geo_rankings",
    capacity: 100,
    display: 10,
    policy: RankingPolicy::BestPerEmail,
};

pub const GUGUDAN_LEADERBOARD: LeaderboardConfig = LeaderboardConfig {
    key: "gugudan_rankings",
    capacity: 50,
    display: 50,
    policy: RankingPolicy::KeepAll,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedRow
{
    pub position: usize,
    pub entry: LeaderboardEntry,
    pub is_current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing
{
    pub rank: usize,
    pub rows: Vec<RankedRow>,
}

pub struct Leaderboard<S: KeyValueStore>
{
    store: S,
    config: LeaderboardConfig,
}

impl<S: KeyValueStore> Leaderboard<S>
{
    pub fn new(store: S, config: LeaderboardConfig) -> Self
    {
        Self { store, config }
    }

    pub fn load(&self) -> Vec<LeaderboardEntry>
    {
        let raw = match self.store.get(self.config.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = self.config.key, error = %err, "leaderboard unreadable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(key = self.config.key, error = %err, "leaderboard malformed, starting empty");
                Vec::new()
            }
        }
    }

    pub fn record(&mut self, entry: LeaderboardEntry) -> Result<Standing, StoreError>
    {
        let email = entry.email.clone();
        let score = entry.score;
        let mut entries = self.load();

        match self.config.policy {
            RankingPolicy::BestPerEmail => {
                upsert_best(&mut entries, entry);
                entries = dedupe_by_email(entries);
            }
            RankingPolicy::KeepAll => entries.push(entry),
        }
        sort_entries(&mut entries);

        let rank = entries
            .iter()
            .position(|e| self.config.policy.matches(e, &email, score))
            .map(|idx| idx + 1)
            .unwrap_or(0);

        let kept = &entries[..entries.len().min(self.config.capacity)];
        let encoded = serde_json::to_string(kept).map_err(|source| StoreError::Serialize {
            key: self.config.key.to_string(),
            source,
        })?;
        self.store.set(self.config.key, &encoded)?;

        info!(
            key = self.config.key,
            email = %email,
            score,
            rank,
            stored = kept.len(),
            "recorded score"
        );

        let rows = entries
            .iter()
            .take(self.config.display)
            .enumerate()
            .map(|(idx, e)| RankedRow {
                position: idx + 1,
                entry: e.clone(),
                is_current: self.config.policy.matches(e, &email, score),
            })
            .collect();

        Ok(Standing { rank, rows })
    }
}

fn upsert_best(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry)
{
    match entries.iter_mut().find(|e| e.email == entry.email) {
        Some(existing) => {
            if entry.score > existing.score {
                *existing = entry;
            }
        }
        None => entries.push(entry),
    }
}

fn dedupe_by_email(entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry>
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<LeaderboardEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match slots.get(&entry.email) {
            Some(&idx) => {
                if entry.score > unique[idx].score {
                    unique[idx] = entry;
                }
            }
            None => {
                slots.insert(entry.email.clone(), unique.len());
                unique.push(entry);
            }
        }
    }
    unique
}

fn sort_entries(entries: &mut [LeaderboardEntry])
{
    entries.sort_by(compare_entries);
}

fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering
{
    b.score.cmp(&a.score).then(b.stage.cmp(&a.stage))
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::store::MemoryStore;

    fn entry(email: &str, score: u32, stage: u32) -> LeaderboardEntry
    {
        LeaderboardEntry::new(email, score, stage)
    }

    fn geo(capacity: usize) -> Leaderboard<MemoryStore>
    {
        Leaderboard::new(
            MemoryStore::new(),
            LeaderboardConfig {
                capacity,
                ..GEO_LEADERBOARD
            },
        )
    }

    fn gugudan(capacity: usize) -> Leaderboard<MemoryStore>
    {
        Leaderboard::new(
            MemoryStore::new(),
            LeaderboardConfig {
                capacity,
                ..GUGUDAN_LEADERBOARD
            },
        )
    }

    fn assert_sorted(entries: &[LeaderboardEntry])
    {
        for pair in entries.windows(2) {
            assert_ne!(
                compare_entries(&pair[0], &pair[1]),
                Ordering::Greater,
                "{:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn missing_or_malformed_data_is_empty()
    {
        let mut board = geo(100);
        assert!(board.load().is_empty());

        board.store.set(GEO_LEADERBOARD.key, "{not json").unwrap();
        assert!(board.load().is_empty());

        let standing = board.record(entry("a@x.io", 10, 1)).unwrap();
        assert_eq!(standing.rank, 1);
        assert_eq!(board.load().len(), 1);
    }

    #[test]
    fn geo_keeps_best_score_per_email()
    {
        let mut board = geo(100);
        board.record(entry("a@x.io", 80, 2)).unwrap();
        board.record(entry("a@x.io", 120, 3)).unwrap();

        let stored = board.load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].score, 120);
        assert_eq!(stored[0].stage, 3);
    }

    #[test]
    fn geo_lower_score_does_not_replace()
    {
        let mut board = geo(100);
        board.record(entry("a@x.io", 300, 4)).unwrap();
        let standing = board.record(entry("a@x.io", 100, 2)).unwrap();

        let stored = board.load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].score, 300);
        assert_eq!(standing.rank, 1);
        assert!(standing.rows[0].is_current);
    }

    #[test]
    fn geo_collapses_duplicates_already_persisted()
    {
        let mut board = geo(100);
        let seeded = vec![entry("a@x.io", 50, 1), entry("b@x.io", 70, 1), entry("a@x.io", 90, 2)];
        board
            .store
            .set(GEO_LEADERBOARD.key, &serde_json::to_string(&seeded).unwrap())
            .unwrap();

        board.record(entry("c@x.io", 10, 1)).unwrap();
        let stored = board.load();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].email, "a@x.io");
        assert_eq!(stored[0].score, 90);
    }

    #[test]
    fn geo_invariants_hold_over_many_records()
    {
        let mut board = geo(5);
        let mut best: HashMap<String, u32> = HashMap::new();
        for round in 0..40u32 {
            let email = format!("p{}@x.io", round % 7);
            let score = (round * 37) % 500;
            board.record(entry(&email, score, round % 9 + 1)).unwrap();
            let slot = best.entry(email).or_insert(0);
            *slot = (*slot).max(score);
        }

        let stored = board.load();
        assert!(stored.len() <= 5);
        assert_sorted(&stored);
        let mut seen = std::collections::HashSet::new();
        for row in &stored {
            assert!(seen.insert(row.email.clone()), "duplicate {}", row.email);
            assert_eq!(row.score, best[&row.email]);
        }
    }

    #[test]
    fn ties_break_on_stage()
    {
        let mut board = geo(100);
        board.record(entry("low@x.io", 200, 2)).unwrap();
        board.record(entry("high@x.io", 200, 5)).unwrap();

        let stored = board.load();
        assert_eq!(stored[0].email, "high@x.io");
        assert_eq!(stored[1].email, "low@x.io");
    }

    #[test]
    fn gugudan_keeps_duplicates()
    {
        let mut board = gugudan(50);
        board.record(entry("a@x.io", 30, 4)).unwrap();
        board.record(entry("a@x.io", 50, 6)).unwrap();
        let standing = board.record(entry("a@x.io", 40, 5)).unwrap();

        let stored = board.load();
        assert_eq!(stored.len(), 3);
        assert_sorted(&stored);
        assert_eq!(standing.rank, 2);
        let current: Vec<_> = standing.rows.iter().filter(|r| r.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].entry.score, 40);
    }

    #[test]
    fn gugudan_caps_persisted_list()
    {
        let mut board = gugudan(3);
        for score in [10, 40, 20, 30, 50] {
            board.record(entry("a@x.io", score, 1)).unwrap();
        }

        let stored = board.load();
        let scores: Vec<u32> = stored.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 40, 30]);
    }

    #[test]
    fn rank_is_within_sorted_list()
    {
        let mut board = gugudan(50);
        for (idx, score) in [70, 10, 90, 40].into_iter().enumerate() {
            let standing = board.record(entry(&format!("p{idx}@x.io"), score, 1)).unwrap();
            assert!(standing.rank >= 1);
            assert!(standing.rank <= board.load().len());
        }
        let standing = board.record(entry("new@x.io", 50, 1)).unwrap();
        assert_eq!(standing.rank, 3);
    }

    #[test]
    fn display_is_limited_and_highlights_current()
    {
        let mut board = geo(100);
        for idx in 0..15u32 {
            board.record(entry(&format!("p{idx}@x.io"), 1000 - idx * 10, 1)).unwrap();
        }
        let standing = board.record(entry("me@x.io", 995, 1)).unwrap();

        assert_eq!(standing.rows.len(), 10);
        assert_eq!(standing.rank, 2);
        assert_eq!(standing.rows[1].position, 2);
        assert!(standing.rows[1].is_current);
        assert_eq!(standing.rows.iter().filter(|r| r.is_current).count(), 1);
    }

    #[test]
    fn persisted_json_uses_plain_field_names()
    {
        let mut board = geo(100);
        board.record(entry("a@x.io", 100, 2)).unwrap();
        let raw = board.store.get(GEO_LEADERBOARD.key).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let row = &value[0];
        assert_eq!(row["email"], "a@x.io");
        assert_eq!(row["score"], 100);
        assert_eq!(row["stage"], 2);
        assert!(row["date"].is_string());
    }
}
