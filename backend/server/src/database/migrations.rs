//! Versioned upgrades of the redis key layout, applied in order at startup.
use std::collections::HashMap;

use redis::{AsyncCommands, aio::ConnectionManager};
use tracing::{info, warn};

use super::{
    StoreError,
    redis_store::{
        GLOBAL_AVERAGE_KEY, VOTES_KEY, read_votes, user_average_key, user_votes_key,
    },
};
use crate::color::{ChannelSums, Rgb};

pub const SCHEMA_VERSION_KEY: &str = "schema:version";
pub const LEGACY_VOTES_KEY: &str = "choices";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    RenameLegacyChoices,
    BackfillRunningAverages,
}

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub step: Step,
}

pub static MIGRATIONS: [Migration; 2] = [
    Migration {
        version: 1,
        name: "rename-legacy-choices",
        step: Step::RenameLegacyChoices,
    },
    Migration {
        version: 2,
        name: "backfill-running-averages",
        step: Step::BackfillRunningAverages,
    },
];

pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Migrations newer than `current`, oldest first.
pub fn pending(current: u32) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS
        .iter()
        .filter(move |migration| migration.version > current)
}

/// Applies every pending migration and returns the resulting version.
pub async fn run_migrations(con: &mut ConnectionManager) -> Result<u32, StoreError> {
    let stored: Option<u32> = con.get(SCHEMA_VERSION_KEY).await?;
    let mut version = stored.unwrap_or(0);

    for migration in pending(version) {
        info!(
            "Applying migration {} ({})",
            migration.version, migration.name
        );

        apply(con, migration.step).await?;
        let _: () = con.set(SCHEMA_VERSION_KEY, migration.version).await?;
        version = migration.version;
    }

    info!("Redis schema at version {version}");

    Ok(version)
}

async fn apply(con: &mut ConnectionManager, step: Step) -> Result<(), StoreError> {
    match step {
        Step::RenameLegacyChoices => rename_legacy_choices(con).await,
        Step::BackfillRunningAverages => backfill_running_averages(con).await,
    }
}

async fn rename_legacy_choices(con: &mut ConnectionManager) -> Result<(), StoreError> {
    let has_votes: bool = con.exists(VOTES_KEY).await?;
    let has_legacy: bool = con.exists(LEGACY_VOTES_KEY).await?;

    if !has_votes && has_legacy {
        info!("Renaming legacy {LEGACY_VOTES_KEY} log to {VOTES_KEY}");
        let _: () = con.rename(LEGACY_VOTES_KEY, VOTES_KEY).await?;
    }

    Ok(())
}

/// Rebuilds per-user vote logs and running sums from the global vote log.
async fn backfill_running_averages(con: &mut ConnectionManager) -> Result<(), StoreError> {
    let ids: Vec<u64> = con.lrange(VOTES_KEY, 0, -1).await?;
    let votes = read_votes(con, ids).await?;

    let mut global = ChannelSums::default();
    let mut users: HashMap<String, (Vec<u64>, ChannelSums)> = HashMap::new();

    for vote in &votes {
        let (ids, sums) = users.entry(vote.user_id.clone()).or_default();
        ids.push(vote.id);

        if !vote.is_anika_blue {
            continue;
        }

        match Rgb::parse_hex(&vote.hex_color) {
            Ok(color) => {
                sums.add(color);
                global.add(color);
            }
            Err(e) => warn!("Skipping vote {} in backfill: {e}", vote.id),
        }
    }

    let mut pipe = redis::pipe();
    pipe.atomic();

    pipe.del(GLOBAL_AVERAGE_KEY).ignore();
    write_sums(&mut pipe, GLOBAL_AVERAGE_KEY, &global);

    for (user_id, (ids, sums)) in &users {
        let votes_key = user_votes_key(user_id);
        let average_key = user_average_key(user_id);

        pipe.del(&votes_key).ignore();
        pipe.rpush(&votes_key, ids).ignore();
        pipe.del(&average_key).ignore();
        write_sums(&mut pipe, &average_key, sums);
    }

    let _: () = pipe.query_async(con).await?;

    info!(
        "Backfilled running averages for {} votes across {} users",
        votes.len(),
        users.len()
    );

    Ok(())
}

fn write_sums(pipe: &mut redis::Pipeline, key: &str, sums: &ChannelSums) {
    if sums.count == 0 {
        return;
    }

    pipe.hset_multiple(
        key,
        &[
            ("r", sums.r),
            ("g", sums.g),
            ("b", sums.b),
            ("count", sums.count),
        ],
    )
    .ignore();
}
