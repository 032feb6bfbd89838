use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Entries kept per bucket.
pub const MAX_ENTRIES: usize = 10;

/// High scores are kept separately for each mode and difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bucket {
    pub mode: ModeKind,
    pub difficulty: Difficulty,
}

impl Bucket {
    pub const fn new(mode: ModeKind, difficulty: Difficulty) -> Self {
        Self { mode, difficulty }
    }

    /// Every bucket, classic first.
    pub fn all() -> impl Iterator<Item = Bucket> {
        ModeKind::ALL.into_iter().flat_map(|mode| {
            Difficulty::ALL
                .into_iter()
                .map(move |difficulty| Bucket::new(mode, difficulty))
        })
    }

    /// Stable key used in the persisted table, e.g. `classic/easy`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.mode, self.difficulty)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub initials: String,
    /// Completion time in seconds.
    pub time: u32,
    /// Unix timestamp of when the game was won.
    pub timestamp: i64,
}

impl HighScoreEntry {
    pub fn new(name: &str, time: u32, timestamp: i64) -> Self {
        Self {
            name: name.trim().to_string(),
            initials: initials_of(name),
            time,
            timestamp,
        }
    }
}

/// First letter of up to three words, uppercased. `???` when there are none.
fn initials_of(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(3)
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "???".to_string()
    } else {
        initials
    }
}

/// Ten fastest times per bucket, each bucket sorted ascending by time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    buckets: BTreeMap<String, Vec<HighScoreEntry>>,
}

impl HighScoreTable {
    /// Parses a persisted table. Malformed data yields an empty table.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(mut table) => {
                table.normalize();
                table
            }
            Err(err) => {
                log::warn!("Discarding malformed high score data: {}", err);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|_| GameError::Encode)
    }

    pub fn entries(&self, bucket: Bucket) -> &[HighScoreEntry] {
        self.buckets
            .get(&bucket.key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Whether `time` would make it into the bucket.
    pub fn qualifies(&self, bucket: Bucket, time: u32) -> bool {
        let entries = self.entries(bucket);
        entries.len() < MAX_ENTRIES || entries.last().is_some_and(|last| time < last.time)
    }

    /// Adds an entry, returning its 0-based rank if it was kept.
    ///
    /// Ties keep the older entry first.
    pub fn insert(&mut self, bucket: Bucket, entry: HighScoreEntry) -> Option<usize> {
        let entries = self.buckets.entry(bucket.key()).or_default();
        let rank = entries.partition_point(|existing| existing.time <= entry.time);
        if rank >= MAX_ENTRIES {
            return None;
        }
        entries.insert(rank, entry);
        entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    fn normalize(&mut self) {
        for entries in self.buckets.values_mut() {
            entries.sort_by_key(|entry| entry.time);
            entries.truncate(MAX_ENTRIES);
        }
    }
}

/// Where the high score table lives between sessions.
pub trait HighScoreStore {
    type Error;

    fn load(&self) -> HighScoreTable;

    fn save(&mut self, table: &HighScoreTable) -> core::result::Result<(), Self::Error>;

    /// Read-modify-write of a single entry. Returns the rank it landed at, if any.
    fn record(
        &mut self,
        bucket: Bucket,
        entry: HighScoreEntry,
    ) -> core::result::Result<Option<usize>, Self::Error> {
        let mut table = self.load();
        let rank = table.insert(bucket, entry);
        if rank.is_some() {
            self.save(&table)?;
        }
        Ok(rank)
    }
}

/// Keeps the table as a serialized blob in memory, like a key-value store would.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    type Error = GameError;

    fn load(&self) -> HighScoreTable {
        self.blob
            .as_deref()
            .map(HighScoreTable::from_json)
            .unwrap_or_default()
    }

    fn save(&mut self, table: &HighScoreTable) -> Result<()> {
        self.blob = Some(table.to_json()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC_EASY: Bucket = Bucket::new(ModeKind::Classic, Difficulty::Easy);

    fn entry(time: u32) -> HighScoreEntry {
        HighScoreEntry::new("Ada Lovelace", time, 1_700_000_000)
    }

    #[test]
    fn initials_come_from_words() {
        assert_eq!(entry(1).initials, "AL");
        assert_eq!(HighScoreEntry::new("  jo  ", 1, 0).initials, "J");
        assert_eq!(HighScoreEntry::new("a b c d", 1, 0).initials, "ABC");
        assert_eq!(HighScoreEntry::new("", 1, 0).initials, "???");
    }

    #[test]
    fn insert_keeps_ascending_order() {
        let mut table = HighScoreTable::default();

        assert_eq!(table.insert(CLASSIC_EASY, entry(30)), Some(0));
        assert_eq!(table.insert(CLASSIC_EASY, entry(10)), Some(0));
        assert_eq!(table.insert(CLASSIC_EASY, entry(20)), Some(1));

        let times: Vec<_> = table.entries(CLASSIC_EASY).iter().map(|e| e.time).collect();
        assert_eq!(times, [10, 20, 30]);
    }

    #[test]
    fn ties_rank_after_existing_entries() {
        let mut table = HighScoreTable::default();
        table.insert(CLASSIC_EASY, HighScoreEntry::new("first", 15, 1));

        assert_eq!(table.insert(CLASSIC_EASY, HighScoreEntry::new("second", 15, 2)), Some(1));
        assert_eq!(table.entries(CLASSIC_EASY)[0].name, "first");
    }

    #[test]
    fn bucket_is_capped_at_ten() {
        let mut table = HighScoreTable::default();
        for time in (1..=25).rev() {
            table.insert(CLASSIC_EASY, entry(time));
        }

        let times: Vec<_> = table.entries(CLASSIC_EASY).iter().map(|e| e.time).collect();
        assert_eq!(times, (1..=10).collect::<Vec<_>>());
        assert!(!table.qualifies(CLASSIC_EASY, 10));
        assert!(table.qualifies(CLASSIC_EASY, 9));
        assert_eq!(table.insert(CLASSIC_EASY, entry(11)), None);
    }

    #[test]
    fn buckets_are_independent() {
        let mut table = HighScoreTable::default();
        let time_attack_hard = Bucket::new(ModeKind::TimeAttack, Difficulty::Hard);

        table.insert(time_attack_hard, entry(99));

        assert!(table.entries(CLASSIC_EASY).is_empty());
        assert_eq!(table.entries(time_attack_hard).len(), 1);
        assert_eq!(time_attack_hard.key(), "time-attack/hard");
    }

    #[test]
    fn malformed_json_is_an_empty_table() {
        assert!(HighScoreTable::from_json("{not json").is_empty());
        assert!(HighScoreTable::from_json("[1, 2, 3]").is_empty());
    }

    #[test]
    fn loading_sorts_and_caps_buckets() {
        let mut entries = Vec::new();
        for time in (1..=12).rev() {
            entries.push(entry(time));
        }
        let mut buckets = BTreeMap::new();
        buckets.insert(CLASSIC_EASY.key(), entries);
        let json = serde_json::to_string(&buckets).unwrap();

        let table = HighScoreTable::from_json(&json);

        let times: Vec<_> = table.entries(CLASSIC_EASY).iter().map(|e| e.time).collect();
        assert_eq!(times, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn memory_store_round_trips_through_its_blob() {
        let mut store = MemoryStore::default();

        assert_eq!(store.record(CLASSIC_EASY, entry(42)), Ok(Some(0)));
        assert!(store.blob().is_some_and(|blob| blob.contains("classic/easy")));
        assert_eq!(store.load().entries(CLASSIC_EASY)[0].time, 42);
    }

    #[test]
    fn memory_store_with_garbage_loads_empty() {
        let store = MemoryStore::with_blob("garbage");
        assert!(store.load().is_empty());
    }
}
