use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::scoring::weights::WeightVector;
use crate::structures::rowset::table::RowSet;

/// everything the process remembers about one upload interaction.
/// `rowset` is the table as parsed; `scored` is the latest successful
/// calculator output, absent until the first recalculation succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionEntry {
    pub rowset: RowSet,
    pub scored: Option<RowSet>,
    pub weights: WeightVector,
    pub last_touched: DateTime<Utc>,
}

impl SessionEntry {
    pub fn new(rowset: RowSet) -> Self {
        SessionEntry {
            rowset,
            scored: None,
            weights: WeightVector::default(),
            last_touched: Utc::now(),
        }
    }
}

/// a transient, in-process mapping from session token to uploaded data.
/// Nothing here survives a restart; this is a scratch pad, not a system
/// of record.
#[cfg_attr(test, automock)]
pub trait SessionStore: Send + Sync {
    /// stores an entry, overwriting any prior entry for that token
    fn put(&self, token: &str, entry: SessionEntry);

    /// a clone of the entry, refreshing its recency
    fn get(&self, token: &str) -> Option<SessionEntry>;

    /// returns whether the token was present
    fn remove(&self, token: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// capacity-bounded in-memory store. Inserting a new token at capacity
/// evicts the least recently touched session; overwriting an existing
/// token never evicts.
pub struct MemoryStore {
    capacity: usize,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(config::SESSION_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            capacity,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    fn put(&self, token: &str, mut entry: SessionEntry) {
        entry.last_touched = Utc::now();

        let mut sessions = self.sessions.write().expect("session store lock poisoned");

        if !sessions.contains_key(token) && self.capacity > 0 && sessions.len() >= self.capacity {
            let stalest = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_touched)
                .map(|(t, _)| t.clone());

            if let Some(stale_token) = stalest {
                sessions.remove(&stale_token);
                log::info!("session store at capacity, evicted '{stale_token}'");
            }
        }

        sessions.insert(token.to_string(), entry);
    }

    fn get(&self, token: &str) -> Option<SessionEntry> {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");

        let entry = sessions.get_mut(token)?;
        entry.last_touched = Utc::now();
        Some(entry.clone())
    }

    fn remove(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        sessions.remove(token).is_some()
    }

    fn len(&self) -> usize {
        let sessions = self.sessions.read().expect("session store lock poisoned");
        sessions.len()
    }
}
