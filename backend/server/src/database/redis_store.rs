use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, NaiveDateTime, Utc};
use redis::{
    AsyncCommands, Client, RedisError, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tracing::debug;

use super::{Average, RecordedVote, StoreError, Vote, migrations::run_migrations};
use crate::color::{ChannelSums, Rgb, normalize_hex};

pub const VOTES_KEY: &str = "votes";
pub const VOTE_ID_KEY: &str = "votes:next_id";
pub const VOTE_PREFIX: &str = "vote:";
pub const SHOWN_KEY: &str = "shown_shades";
pub const SHOWN_ID_KEY: &str = "shown_shades:next_id";
pub const SHOWN_PREFIX: &str = "shown_shade:";
pub const GLOBAL_AVERAGE_KEY: &str = "averages:global";
pub const BASE_COLORS_KEY: &str = "user_base_colors";
pub const BASE_COLORS_UPDATED_KEY: &str = "user_base_colors:updated";
pub const BASE_COLOR_SEQUENCE_KEY: &str = "user_base_colors:sequence";
pub const BASE_COLOR_INDEX_PREFIX: &str = "base_color:";

pub fn vote_key(id: u64) -> String {
    format!("{VOTE_PREFIX}{id}")
}

pub fn user_votes_key(user_id: &str) -> String {
    format!("votes:user:{user_id}")
}

pub fn user_average_key(user_id: &str) -> String {
    format!("averages:user:{user_id}")
}

fn user_shown_key(user_id: &str) -> String {
    format!("shown_shades:user:{user_id}")
}

fn base_color_index_key(hex: &str) -> String {
    format!("{BASE_COLOR_INDEX_PREFIX}{hex}")
}

// Recomputes the truncated mean of the user's sums and makes it their base
// color. Expects locals: id, user, timestamp, user_sums, base_colors,
// sequence_key, updated_key, index_prefix.
// Replies {id, r, g, b, count}, count 0 when the user has no yes votes.
macro_rules! upsert_base_color_from_sums {
    () => {
        r#"
local sums = redis.call('HMGET', user_sums, 'r', 'g', 'b', 'count')
local count = tonumber(sums[4]) or 0
if count == 0 then
    return {id, 0, 0, 0, 0}
end
local r = math.floor((tonumber(sums[1]) or 0) / count)
local g = math.floor((tonumber(sums[2]) or 0) / count)
local b = math.floor((tonumber(sums[3]) or 0) / count)
local hex = string.format('#%02x%02x%02x', r, g, b)
local previous = redis.call('HGET', base_colors, user)
if previous then
    redis.call('ZREM', index_prefix .. previous, user)
end
local sequence = redis.call('INCR', sequence_key)
redis.call('HSET', base_colors, user, hex)
redis.call('HSET', updated_key, user, timestamp)
redis.call('ZADD', index_prefix .. hex, sequence, user)
return {id, r, g, b, count}
"#
    };
}

// KEYS: id counter, vote log, user vote log, global sums, user sums,
//       base colors, save sequence, update timestamps
// ARGV: user id, hex, is_anika_blue, timestamp, r, g, b, record prefix,
//       index prefix
const RECORD_VOTE: &str = concat!(
    r#"
local id = redis.call('INCR', KEYS[1])
redis.call('HSET', ARGV[8] .. id,
    'user_id', ARGV[1],
    'hex_color', ARGV[2],
    'is_anika_blue', ARGV[3],
    'timestamp', ARGV[4])
redis.call('RPUSH', KEYS[2], id)
redis.call('RPUSH', KEYS[3], id)
if ARGV[3] == '1' then
    for i = 4, 5 do
        redis.call('HINCRBY', KEYS[i], 'r', ARGV[5])
        redis.call('HINCRBY', KEYS[i], 'g', ARGV[6])
        redis.call('HINCRBY', KEYS[i], 'b', ARGV[7])
        redis.call('HINCRBY', KEYS[i], 'count', 1)
    end
end
local user, timestamp, index_prefix = ARGV[1], ARGV[4], ARGV[9]
local user_sums, base_colors, sequence_key, updated_key = KEYS[5], KEYS[6], KEYS[7], KEYS[8]
"#,
    upsert_base_color_from_sums!()
);

// KEYS: user sums, base colors, save sequence, update timestamps
// ARGV: user id, timestamp, index prefix
const SAVE_BASE_COLOR: &str = concat!(
    r#"
local id = 0
local user, timestamp, index_prefix = ARGV[1], ARGV[2], ARGV[3]
local user_sums, base_colors, sequence_key, updated_key = KEYS[1], KEYS[2], KEYS[3], KEYS[4]
"#,
    upsert_base_color_from_sums!()
);

// KEYS: id counter, shown log, user shown log
// ARGV: user id, hex, timestamp, record prefix
const RECORD_SHOWN: &str = r#"
local id = redis.call('INCR', KEYS[1])
redis.call('HSET', ARGV[4] .. id,
    'user_id', ARGV[1],
    'hex_color', ARGV[2],
    'timestamp', ARGV[3])
redis.call('RPUSH', KEYS[2], id)
redis.call('RPUSH', KEYS[3], id)
return id
"#;

// KEYS: base colors, save sequence, update timestamps
// ARGV: user id, hex, timestamp, index prefix
const SET_BASE_COLOR: &str = r#"
local previous = redis.call('HGET', KEYS[1], ARGV[1])
if previous then
    redis.call('ZREM', ARGV[4] .. previous, ARGV[1])
end
local sequence = redis.call('INCR', KEYS[2])
redis.call('HSET', KEYS[1], ARGV[1], ARGV[2])
redis.call('HSET', KEYS[3], ARGV[1], ARGV[3])
redis.call('ZADD', ARGV[4] .. ARGV[2], sequence, ARGV[1])
return sequence
"#;

/// `{id, r, g, b, count}` reply of the scripts that refresh a base color.
type UpsertReply = (u64, u8, u8, u8, u64);

fn average_from_reply((_, r, g, b, count): UpsertReply) -> Option<Average> {
    (count > 0).then(|| Average {
        color: Rgb::new(r, g, b),
        count,
    })
}

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, RedisError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(500));

    let client = Client::open(redis_url)?;

    client.get_connection_manager_with_config(config).await
}

/// Redis-backed store. Cloning shares the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    record_vote: Script,
    record_shown: Script,
    set_base_color: Script,
    save_base_color: Script,
}

impl RedisStore {
    /// Connects and brings the key layout up to the latest schema version.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let mut connection = init_redis(redis_url).await?;
        run_migrations(&mut connection).await?;

        Ok(Self::new(connection))
    }

    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            connection,
            record_vote: Script::new(RECORD_VOTE),
            record_shown: Script::new(RECORD_SHOWN),
            set_base_color: Script::new(SET_BASE_COLOR),
            save_base_color: Script::new(SAVE_BASE_COLOR),
        }
    }

    pub async fn record_shown(&self, user_id: &str, color: Rgb) -> Result<u64, StoreError> {
        let mut con = self.connection.clone();

        let id: u64 = self
            .record_shown
            .key(SHOWN_ID_KEY)
            .key(SHOWN_KEY)
            .key(user_shown_key(user_id))
            .arg(user_id)
            .arg(color.to_hex())
            .arg(Utc::now().to_rfc3339())
            .arg(SHOWN_PREFIX)
            .invoke_async(&mut con)
            .await?;

        Ok(id)
    }

    /// Stores the vote and, in the same script, refreshes the voter's base
    /// color from their updated sums.
    pub async fn record_vote(
        &self,
        user_id: &str,
        color: Rgb,
        is_anika_blue: bool,
    ) -> Result<RecordedVote, StoreError> {
        let mut con = self.connection.clone();

        let reply: UpsertReply = self
            .record_vote
            .key(VOTE_ID_KEY)
            .key(VOTES_KEY)
            .key(user_votes_key(user_id))
            .key(GLOBAL_AVERAGE_KEY)
            .key(user_average_key(user_id))
            .key(BASE_COLORS_KEY)
            .key(BASE_COLOR_SEQUENCE_KEY)
            .key(BASE_COLORS_UPDATED_KEY)
            .arg(user_id)
            .arg(color.to_hex())
            .arg(if is_anika_blue { "1" } else { "0" })
            .arg(Utc::now().to_rfc3339())
            .arg(u32::from(color.r))
            .arg(u32::from(color.g))
            .arg(u32::from(color.b))
            .arg(VOTE_PREFIX)
            .arg(BASE_COLOR_INDEX_PREFIX)
            .invoke_async(&mut con)
            .await?;

        let id = reply.0;
        debug!("Stored vote {id} for {user_id}");

        Ok(RecordedVote {
            id,
            user_average: average_from_reply(reply),
        })
    }

    pub async fn user_average(&self, user_id: &str) -> Result<Option<Average>, StoreError> {
        self.read_average(&user_average_key(user_id)).await
    }

    pub async fn global_average(&self) -> Result<Option<Average>, StoreError> {
        self.read_average(GLOBAL_AVERAGE_KEY).await
    }

    async fn read_average(&self, key: &str) -> Result<Option<Average>, StoreError> {
        let mut con = self.connection.clone();
        let fields: HashMap<String, u64> = con.hgetall(key).await?;

        Ok(sums_from_fields(&fields)
            .average()
            .map(|(color, count)| Average { color, count }))
    }

    pub async fn set_base_color(&self, user_id: &str, color: Rgb) -> Result<(), StoreError> {
        let mut con = self.connection.clone();

        let _sequence: u64 = self
            .set_base_color
            .key(BASE_COLORS_KEY)
            .key(BASE_COLOR_SEQUENCE_KEY)
            .key(BASE_COLORS_UPDATED_KEY)
            .arg(user_id)
            .arg(color.to_hex())
            .arg(Utc::now().to_rfc3339())
            .arg(BASE_COLOR_INDEX_PREFIX)
            .invoke_async(&mut con)
            .await?;

        Ok(())
    }

    /// Makes the user's current average their base color in one script.
    pub async fn save_base_color(&self, user_id: &str) -> Result<Option<Average>, StoreError> {
        let mut con = self.connection.clone();

        let reply: UpsertReply = self
            .save_base_color
            .key(user_average_key(user_id))
            .key(BASE_COLORS_KEY)
            .key(BASE_COLOR_SEQUENCE_KEY)
            .key(BASE_COLORS_UPDATED_KEY)
            .arg(user_id)
            .arg(Utc::now().to_rfc3339())
            .arg(BASE_COLOR_INDEX_PREFIX)
            .invoke_async(&mut con)
            .await?;

        Ok(average_from_reply(reply))
    }

    pub async fn get_base_color(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        let mut con = self.connection.clone();

        Ok(con.hget(BASE_COLORS_KEY, user_id).await?)
    }

    pub async fn find_user_by_base_color(&self, hex: &str) -> Result<Option<String>, StoreError> {
        let mut con = self.connection.clone();
        let users: Vec<String> = con.zrange(base_color_index_key(hex), 0, 0).await?;

        Ok(users.into_iter().next())
    }

    pub async fn user_votes(&self, user_id: &str) -> Result<Vec<Vote>, StoreError> {
        let mut con = self.connection.clone();
        let ids: Vec<u64> = con.lrange(user_votes_key(user_id), 0, -1).await?;

        read_votes(&mut con, ids).await
    }

    pub async fn shown_count(&self, user_id: &str) -> Result<u64, StoreError> {
        let mut con = self.connection.clone();

        Ok(con.llen(user_shown_key(user_id)).await?)
    }
}

/// Loads the vote hashes for `ids` in one pipelined round-trip.
pub async fn read_votes(con: &mut ConnectionManager, ids: Vec<u64>) -> Result<Vec<Vote>, StoreError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut pipe = redis::pipe();
    for id in &ids {
        pipe.hgetall(vote_key(*id));
    }
    let records: Vec<HashMap<String, String>> = pipe.query_async(con).await?;

    ids.into_iter()
        .zip(records)
        .map(|(id, fields)| parse_vote(id, &fields))
        .collect()
}

fn sums_from_fields(fields: &HashMap<String, u64>) -> ChannelSums {
    let field = |name: &str| fields.get(name).copied().unwrap_or(0);

    ChannelSums {
        r: field("r"),
        g: field("g"),
        b: field("b"),
        count: field("count"),
    }
}

pub fn parse_vote(id: u64, fields: &HashMap<String, String>) -> Result<Vote, StoreError> {
    let key = vote_key(id);
    let corrupt = |reason: String| StoreError::Corrupt {
        key: key.clone(),
        reason,
    };
    let field = |name: &str| {
        fields
            .get(name)
            .ok_or_else(|| corrupt(format!("missing field {name}")))
    };

    let hex_color = normalize_hex(field("hex_color")?).map_err(|e| corrupt(e.to_string()))?;
    let is_anika_blue = matches!(field("is_anika_blue")?.as_str(), "1" | "true");
    let timestamp = parse_timestamp(field("timestamp")?)
        .ok_or_else(|| corrupt("unreadable timestamp".to_string()))?;

    Ok(Vote {
        id,
        user_id: field("user_id")?.clone(),
        hex_color,
        is_anika_blue,
        timestamp,
    })
}

/// RFC 3339, or the `YYYY-MM-DD HH:MM:SS` form older records were written in.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_vote() {
        let vote = parse_vote(
            3,
            &fields(&[
                ("user_id", "abc"),
                ("hex_color", "#0000FF"),
                ("is_anika_blue", "1"),
                ("timestamp", "2024-05-01T12:00:00+00:00"),
            ]),
        )
        .unwrap();

        assert_eq!(vote.id, 3);
        assert_eq!(vote.user_id, "abc");
        assert_eq!(vote.hex_color, "#0000ff");
        assert!(vote.is_anika_blue);
    }

    #[test]
    fn test_parse_vote_legacy_timestamp() {
        let vote = parse_vote(
            1,
            &fields(&[
                ("user_id", "abc"),
                ("hex_color", "#000099"),
                ("is_anika_blue", "0"),
                ("timestamp", "2024-05-01 12:00:00"),
            ]),
        )
        .unwrap();

        assert!(!vote.is_anika_blue);
        assert_eq!(vote.timestamp.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_parse_vote_missing_field() {
        let err = parse_vote(9, &fields(&[("user_id", "abc")])).unwrap_err();

        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "vote:9"));
    }

    #[test]
    fn test_average_from_reply() {
        assert_eq!(
            average_from_reply((7, 0, 0, 204, 2)),
            Some(Average {
                color: Rgb::new(0, 0, 204),
                count: 2
            })
        );
        assert_eq!(average_from_reply((8, 0, 0, 0, 0)), None);
    }

    #[test]
    fn test_sums_from_fields() {
        let fields: HashMap<String, u64> = [("r", 2), ("g", 4), ("b", 409), ("count", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        assert_eq!(
            sums_from_fields(&fields).average(),
            Some((Rgb::new(1, 2, 204), 2))
        );
        assert_eq!(sums_from_fields(&HashMap::new()).average(), None);
    }
}
