use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;

use super::{Average, RecordedVote, ShownShade, Vote};
use crate::color::{ChannelSums, Rgb};

struct BaseColor {
    hex: String,
    sequence: u64,
}

#[derive(Default)]
struct Tables {
    votes: Vec<Vote>,
    shown: Vec<ShownShade>,
    base_colors: HashMap<String, BaseColor>,
    user_sums: HashMap<String, ChannelSums>,
    global_sums: ChannelSums,
    base_color_sequence: u64,
}

impl Tables {
    fn user_average(&self, user_id: &str) -> Option<Average> {
        self.user_sums
            .get(user_id)
            .and_then(ChannelSums::average)
            .map(|(color, count)| Average { color, count })
    }

    fn upsert_base_color(&mut self, user_id: &str, color: Rgb) {
        self.base_color_sequence += 1;

        let record = BaseColor {
            hex: color.to_hex(),
            sequence: self.base_color_sequence,
        };
        self.base_colors.insert(user_id.to_string(), record);
    }

    fn refresh_base_color(&mut self, user_id: &str) -> Option<Average> {
        let average = self.user_average(user_id)?;
        self.upsert_base_color(user_id, average.color);

        Some(average)
    }
}

/// In-process store. A single lock covers every table, so each operation is
/// atomic with respect to the others.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn record_shown(&self, user_id: &str, color: Rgb) -> u64 {
        let mut tables = self.tables.lock();
        let id = tables.shown.len() as u64 + 1;

        tables.shown.push(ShownShade {
            id,
            user_id: user_id.to_string(),
            hex_color: color.to_hex(),
            timestamp: Utc::now(),
        });

        id
    }

    pub fn record_vote(&self, user_id: &str, color: Rgb, is_anika_blue: bool) -> RecordedVote {
        let mut tables = self.tables.lock();
        let id = tables.votes.len() as u64 + 1;

        tables.votes.push(Vote {
            id,
            user_id: user_id.to_string(),
            hex_color: color.to_hex(),
            is_anika_blue,
            timestamp: Utc::now(),
        });

        if is_anika_blue {
            tables.global_sums.add(color);
            tables
                .user_sums
                .entry(user_id.to_string())
                .or_default()
                .add(color);
        }

        RecordedVote {
            id,
            user_average: tables.refresh_base_color(user_id),
        }
    }

    pub fn user_average(&self, user_id: &str) -> Option<Average> {
        self.tables.lock().user_average(user_id)
    }

    pub fn global_average(&self) -> Option<Average> {
        let tables = self.tables.lock();

        tables
            .global_sums
            .average()
            .map(|(color, count)| Average { color, count })
    }

    pub fn set_base_color(&self, user_id: &str, color: Rgb) {
        self.tables.lock().upsert_base_color(user_id, color);
    }

    pub fn save_base_color(&self, user_id: &str) -> Option<Average> {
        self.tables.lock().refresh_base_color(user_id)
    }

    pub fn get_base_color(&self, user_id: &str) -> Option<String> {
        let tables = self.tables.lock();

        tables.base_colors.get(user_id).map(|record| record.hex.clone())
    }

    pub fn find_user_by_base_color(&self, hex: &str) -> Option<String> {
        let tables = self.tables.lock();

        tables
            .base_colors
            .iter()
            .filter(|(_, record)| record.hex == hex)
            .min_by_key(|(_, record)| record.sequence)
            .map(|(user_id, _)| user_id.clone())
    }

    pub fn user_votes(&self, user_id: &str) -> Vec<Vote> {
        let tables = self.tables.lock();

        tables
            .votes
            .iter()
            .filter(|vote| vote.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn shown_count(&self, user_id: &str) -> u64 {
        let tables = self.tables.lock();

        tables
            .shown
            .iter()
            .filter(|shade| shade.user_id == user_id)
            .count() as u64
    }
}
