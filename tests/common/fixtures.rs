#![allow(dead_code)]

use serde_json::json;
use verity::storage::{InferenceStats, MinerResponseRecord, RequestRecord};

pub const DEFAULT_BLOCK: u64 = 3_500_000;
pub const FIXED_TIMESTAMP: &str = "2026-01-01T00:00:00+00:00";
pub const GROUND_TRUTH: &str = "The quick brown fox jumps over the lazy dog.";

pub fn request(r_nanoid: &str) -> RequestRecord {
    RequestRecord {
        r_nanoid: r_nanoid.to_string(),
        block: DEFAULT_BLOCK,
        timestamp: FIXED_TIMESTAMP.to_string(),
        sampling_params: json!({"max_new_tokens": 128, "temperature": 0.01, "seed": 42}),
        ground_truth: json!({ "text": GROUND_TRUTH }),
    }
}

#[derive(Debug, Default)]
pub struct MinerRecordBuilder {
    r_nanoid: Option<String>,
    uid: Option<u16>,
    response: Option<String>,
    verified: Option<bool>,
    version: Option<String>,
}

impl MinerRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn r_nanoid(mut self, id: &str) -> Self {
        self.r_nanoid = Some(id.to_string());
        self
    }

    pub fn uid(mut self, uid: u16) -> Self {
        self.uid = Some(uid);
        self
    }

    pub fn response(mut self, response: &str) -> Self {
        self.response = Some(response.to_string());
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn build(self) -> MinerResponseRecord {
        let uid = self.uid.unwrap_or(0);
        let response = self.response.unwrap_or_else(|| GROUND_TRUTH.to_string());
        let tokens = response
            .split_inclusive(' ')
            .map(str::to_string)
            .collect::<Vec<_>>();

        MinerResponseRecord {
            r_nanoid: self.r_nanoid.unwrap_or_else(|| "request-0".to_string()),
            hotkey: format!("5Hotkey{uid:04}"),
            coldkey: format!("5Coldkey{uid:04}"),
            block: DEFAULT_BLOCK + 1,
            uid,
            stats: InferenceStats {
                time_to_first_token: 0.25,
                time_for_all_tokens: 2.0,
                total_time: 2.25,
                tokens_per_second: tokens.len() as f64 / 2.0,
                tokens,
                response,
                verified: self.verified.unwrap_or(true),
            },
            version: self.version.unwrap_or_else(|| "1.0.0".to_string()),
        }
    }
}
