//! # Vote store
//!
//! Durable record of shown shades, votes and per-user base colors.
//!
//! ## Requirements
//!
//! - Survives restarts
//! - Concurrent vote inserts never lose writes
//! - O(1) user and global averages
//! - Exact lookup of a user by saved base color
//!
//! ## Implementation
//!
//! - [`RedisStore`] for deployments, [`MemoryStore`] for tests and local runs
//! - Votes and shown shades are append-only, one hash per record plus id logs
//! - Yes votes also bump running channel sums per user and globally, so an
//!   average is a single hash read; the truncated mean of the sums equals the
//!   mean of the vote list
//! - Multi-key writes run as one Lua script, atomic on the server
//! - Base colors are a `user -> color` hash plus a `color -> users` sorted set
//!   ordered by save sequence
//! - Every vote refreshes the voter's base color from their sums inside the
//!   same write, so a stored base color is always the average at save time
//!
//! ## Limitations
//!
//! The scripts derive some key names at run time (`vote:<id>` from the id
//! counter, `base_color:<hex>` from the stored color) instead of receiving
//! them in `KEYS`. That is fine on a single redis node but breaks cluster
//! slot routing and ACL key patterns narrower than `~*`.
use chrono::{DateTime, Utc};
use redis::RedisError;
use thiserror::Error;
use tracing::info;

pub mod memory;
pub mod migrations;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use crate::{
    color::Rgb,
    config::{Config, StorageBackend},
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Corrupt record {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: u64,
    pub user_id: String,
    pub hex_color: String,
    pub is_anika_blue: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownShade {
    pub id: u64,
    pub user_id: String,
    pub hex_color: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Average {
    pub color: Rgb,
    pub count: u64,
}

/// A stored vote and the voter's average right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedVote {
    pub id: u64,
    pub user_average: Option<Average>,
}

pub enum Store {
    Redis(RedisStore),
    Memory(MemoryStore),
}

impl Store {
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        match config.storage {
            StorageBackend::Redis => {
                info!("Connecting to redis at {}", config.redis_url);
                Ok(Self::Redis(RedisStore::connect(&config.redis_url).await?))
            }
            StorageBackend::Memory => {
                info!("Using in-memory store, votes will not survive a restart");
                Ok(Self::Memory(MemoryStore::default()))
            }
        }
    }

    pub async fn record_shown(&self, user_id: &str, color: Rgb) -> Result<u64, StoreError> {
        match self {
            Self::Redis(store) => store.record_shown(user_id, color).await,
            Self::Memory(store) => Ok(store.record_shown(user_id, color)),
        }
    }

    /// Appends one vote and, atomically with it, sets the voter's base color
    /// to their new average. Skips never reach the store.
    pub async fn record_vote(
        &self,
        user_id: &str,
        color: Rgb,
        is_anika_blue: bool,
    ) -> Result<RecordedVote, StoreError> {
        match self {
            Self::Redis(store) => store.record_vote(user_id, color, is_anika_blue).await,
            Self::Memory(store) => Ok(store.record_vote(user_id, color, is_anika_blue)),
        }
    }

    /// Mean of the user's yes votes, `None` before the first one.
    pub async fn user_average(&self, user_id: &str) -> Result<Option<Average>, StoreError> {
        match self {
            Self::Redis(store) => store.user_average(user_id).await,
            Self::Memory(store) => Ok(store.user_average(user_id)),
        }
    }

    pub async fn global_average(&self) -> Result<Option<Average>, StoreError> {
        match self {
            Self::Redis(store) => store.global_average().await,
            Self::Memory(store) => Ok(store.global_average()),
        }
    }

    pub async fn set_base_color(&self, user_id: &str, color: Rgb) -> Result<(), StoreError> {
        match self {
            Self::Redis(store) => store.set_base_color(user_id, color).await,
            Self::Memory(store) => {
                store.set_base_color(user_id, color);
                Ok(())
            }
        }
    }

    /// Stores the user's current average as their base color, `None` if they
    /// have no yes votes.
    pub async fn save_base_color(&self, user_id: &str) -> Result<Option<Average>, StoreError> {
        match self {
            Self::Redis(store) => store.save_base_color(user_id).await,
            Self::Memory(store) => Ok(store.save_base_color(user_id)),
        }
    }

    pub async fn get_base_color(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::Redis(store) => store.get_base_color(user_id).await,
            Self::Memory(store) => Ok(store.get_base_color(user_id)),
        }
    }

    /// Exact match against stored `#rrggbb` values. The earliest saver wins
    /// when several users share a color.
    pub async fn find_user_by_base_color(&self, hex: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::Redis(store) => store.find_user_by_base_color(hex).await,
            Self::Memory(store) => Ok(store.find_user_by_base_color(hex)),
        }
    }

    pub async fn user_votes(&self, user_id: &str) -> Result<Vec<Vote>, StoreError> {
        match self {
            Self::Redis(store) => store.user_votes(user_id).await,
            Self::Memory(store) => Ok(store.user_votes(user_id)),
        }
    }

    pub async fn shown_count(&self, user_id: &str) -> Result<u64, StoreError> {
        match self {
            Self::Redis(store) => store.shown_count(user_id).await,
            Self::Memory(store) => Ok(store.shown_count(user_id)),
        }
    }
}
