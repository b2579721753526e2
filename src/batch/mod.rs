//! Line-oriented batch verification.
//!
//! Each input line is a JSON [`VerificationJob`]; each output line is a JSON
//! [`JobOutcome`]. Malformed lines and persistence failures are logged and skipped so a
//! single bad record never stops the batch.

#[cfg(test)]
mod tests;

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use crate::storage::{InferenceStats, MinerResponseRecord, RecordStore, RequestRecord};
use crate::verification::{TokenVerifier, Verdict};

/// A candidate/reference pair, optionally tagged with the miner that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationJob {
    /// Caller-supplied id echoed in the outcome.
    #[serde(default)]
    pub id: Option<String>,
    pub candidate: String,
    pub reference: String,
    #[serde(default)]
    pub block: u64,
    #[serde(default)]
    pub sampling_params: Value,
    #[serde(default)]
    pub miner: Option<MinerInfo>,
}

/// Identity and timings of the miner that produced a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerInfo {
    pub hotkey: String,
    pub coldkey: String,
    pub uid: u16,
    pub version: String,
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub time_to_first_token: f64,
    #[serde(default)]
    pub time_for_all_tokens: f64,
    #[serde(default)]
    pub total_time: f64,
    #[serde(default)]
    pub tokens_per_second: f64,
}

/// Result line written for each job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub verified: bool,
    pub verdict: Verdict,
}

/// Counters for one [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub verified: usize,
    pub malformed: usize,
    pub persist_failures: usize,
}

impl VerificationJob {
    /// Verifies the job and builds the records describing it.
    pub fn evaluate(
        &self,
        verifier: &TokenVerifier,
    ) -> (JobOutcome, RequestRecord, Option<MinerResponseRecord>) {
        let verdict = verifier.verify(&self.candidate, &self.reference);

        let outcome = JobOutcome {
            id: self.id.clone(),
            verified: verdict.is_verified(),
            verdict,
        };

        let mut request = RequestRecord::new(
            self.block,
            self.sampling_params.clone(),
            json!({ "text": self.reference }),
        );
        if let Some(id) = &self.id {
            request.r_nanoid = id.clone();
        }

        let miner = self.miner.as_ref().map(|info| {
            let mut stats = InferenceStats {
                time_to_first_token: info.time_to_first_token,
                time_for_all_tokens: info.time_for_all_tokens,
                total_time: info.total_time,
                tokens_per_second: info.tokens_per_second,
                tokens: info.tokens.clone(),
                response: self.candidate.clone(),
                verified: false,
            };
            stats.apply_verdict(&verdict);

            MinerResponseRecord {
                r_nanoid: request.r_nanoid.clone(),
                hotkey: info.hotkey.clone(),
                coldkey: info.coldkey.clone(),
                block: self.block,
                uid: info.uid,
                stats,
                version: info.version.clone(),
            }
        });

        (outcome, request, miner)
    }
}

/// Verifies every job read from `input`, writing one outcome line per job to `output`.
///
/// When `store` is set, each job is persisted as it is processed.
pub fn run<R, W>(
    input: R,
    mut output: W,
    verifier: &TokenVerifier,
    store: Option<&dyn RecordStore>,
) -> io::Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = RunSummary::default();

    for (index, line) in input.split(b'\n').enumerate() {
        let bytes = line?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line,
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping job that is not valid UTF-8");
                summary.malformed += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let job: VerificationJob = match serde_json::from_str(line) {
            Ok(job) => job,
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping malformed job");
                summary.malformed += 1;
                continue;
            }
        };

        let (outcome, request, miner) = job.evaluate(verifier);
        debug!(line = index + 1, verdict = %outcome.verdict, "Job evaluated");

        summary.processed += 1;
        if outcome.verified {
            summary.verified += 1;
        }

        if let Some(store) = store {
            let miners: Vec<MinerResponseRecord> = miner.into_iter().collect();
            if let Err(e) = store.add_records(&miners, std::slice::from_ref(&request)) {
                error!(r_nanoid = %request.r_nanoid, error = %e, "Failed to persist job");
                summary.persist_failures += 1;
            }
        }

        serde_json::to_writer(&mut output, &outcome)?;
        output.write_all(b"\n")?;
    }

    output.flush()?;

    info!(
        processed = summary.processed,
        verified = summary.verified,
        malformed = summary.malformed,
        persist_failures = summary.persist_failures,
        "Batch complete"
    );

    Ok(summary)
}
