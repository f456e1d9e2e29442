//! Keyed cache of read results.
//!
//! Each read is cached under a [`QueryKey`]. A cached value younger than the
//! stale time is served without contacting the endpoint; invalidation makes
//! the next read refetch regardless of age.

use {
    esports_bets_types::{Bet, LeaderboardEntry},
    std::{collections::HashMap, future::Future, time::Duration},
    tokio::{sync::RwLock, time::Instant},
    tracing::debug,
};

pub const DEFAULT_STALE_TIME: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Bets,
    PlayerPoints(Option<String>),
    Leaderboard,
}

/// Groups keys for invalidation, regardless of parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryScope {
    Bets,
    PlayerPoints,
    Leaderboard,
}

impl QueryKey {
    pub fn scope(&self) -> QueryScope {
        match self {
            Self::Bets => QueryScope::Bets,
            Self::PlayerPoints(_) => QueryScope::PlayerPoints,
            Self::Leaderboard => QueryScope::Leaderboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Disabled, or never run
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Bets(Vec<Bet>),
    Points(i64),
    Leaderboard(Vec<LeaderboardEntry>),
}

/// Values that can live in the cache.
pub trait Cached: Clone + Default {
    fn into_data(self) -> QueryData;
    fn from_data(data: &QueryData) -> Option<Self>;
}

impl Cached for Vec<Bet> {
    fn into_data(self) -> QueryData {
        QueryData::Bets(self)
    }

    fn from_data(data: &QueryData) -> Option<Self> {
        match data {
            QueryData::Bets(bets) => Some(bets.clone()),
            _ => None,
        }
    }
}

impl Cached for i64 {
    fn into_data(self) -> QueryData {
        QueryData::Points(self)
    }

    fn from_data(data: &QueryData) -> Option<Self> {
        match data {
            QueryData::Points(points) => Some(*points),
            _ => None,
        }
    }
}

impl Cached for Vec<LeaderboardEntry> {
    fn into_data(self) -> QueryData {
        QueryData::Leaderboard(self)
    }

    fn from_data(data: &QueryData) -> Option<Self> {
        match data {
            QueryData::Leaderboard(entries) => Some(entries.clone()),
            _ => None,
        }
    }
}

/// What a caller sees of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub status: QueryStatus,
    pub error: Option<String>,
    pub updated_at: Option<Instant>,
}

impl<T: Cached> QueryState<T> {
    fn idle() -> Self {
        Self {
            data: None,
            status: QueryStatus::Idle,
            error: None,
            updated_at: None,
        }
    }

    /// The data, or the zero value while there is none.
    pub fn data_or_default(&self) -> T {
        self.data.clone().unwrap_or_default()
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub enabled: bool,
    pub stale_time: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time: DEFAULT_STALE_TIME,
        }
    }
}

impl QueryOptions {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[derive(Debug)]
struct Entry {
    data: Option<QueryData>,
    status: QueryStatus,
    error: Option<String>,
    updated_at: Option<Instant>,
    invalidated: bool,
    /// Bumped by every invalidation
    generation: u64,
}

impl Entry {
    fn new() -> Self {
        Self {
            data: None,
            status: QueryStatus::Idle,
            error: None,
            updated_at: None,
            invalidated: false,
            generation: 0,
        }
    }

    fn is_fresh(&self, stale_time: Duration) -> bool {
        self.status == QueryStatus::Success
            && !self.invalidated
            && self
                .updated_at
                .is_some_and(|updated_at| updated_at.elapsed() < stale_time)
    }

    fn state<T: Cached>(&self) -> QueryState<T> {
        QueryState {
            data: self.data.as_ref().and_then(T::from_data),
            status: self.status,
            error: self.error.clone(),
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct QueryClient {
    entries: RwLock<HashMap<QueryKey, Entry>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key` if it is fresh, otherwise runs
    /// `fetcher` and caches its outcome. Disabled queries return an idle
    /// state without running `fetcher`.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, options: QueryOptions, fetcher: F) -> QueryState<T>
    where
        T: Cached,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, String>>,
    {
        if !options.enabled {
            return self
                .entries
                .read()
                .await
                .get(&key)
                .map(Entry::state)
                .unwrap_or_else(QueryState::idle);
        }

        let generation = {
            let mut entries = self.entries.write().await;
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            if entry.is_fresh(options.stale_time) {
                debug!("Cache hit for {:?}", key);
                return entry.state();
            }
            entry.status = QueryStatus::Loading;
            entry.generation
        };

        debug!("Fetching {:?}", key);
        let outcome = fetcher().await;

        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        match outcome {
            Ok(value) => {
                entry.data = Some(value.into_data());
                entry.status = QueryStatus::Success;
                entry.error = None;
                // Invalidated while fetching: the value may predate the
                // invalidation, so the next read still refetches
                if entry.generation == generation {
                    entry.updated_at = Some(Instant::now());
                    entry.invalidated = false;
                } else {
                    debug!("{:?} was invalidated while fetching", key);
                }
            }
            // Previous data stays visible next to the error
            Err(message) => {
                entry.status = QueryStatus::Error;
                entry.error = Some(message);
            }
        }
        entry.state()
    }

    /// Current state of `key` without fetching.
    pub async fn state<T: Cached>(&self, key: &QueryKey) -> QueryState<T> {
        self.entries
            .read()
            .await
            .get(key)
            .map(Entry::state)
            .unwrap_or_else(QueryState::idle)
    }

    /// Forces the next read of every key in `scope` to refetch.
    pub async fn invalidate(&self, scope: QueryScope) {
        let mut entries = self.entries.write().await;
        for (key, entry) in entries.iter_mut() {
            if key.scope() == scope {
                entry.invalidated = true;
                entry.generation += 1;
            }
        }
    }

    pub async fn is_invalidated(&self, key: &QueryKey) -> bool {
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| entry.invalidated)
    }

    /// Keys that would be refetched by their next read.
    pub async fn stale_keys(&self, stale_time: Duration) -> Vec<QueryKey> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|(_, entry)| entry.status != QueryStatus::Idle && !entry.is_fresh(stale_time))
            .map(|(key, _)| key.clone())
            .collect()
    }
}
