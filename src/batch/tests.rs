use super::*;
use crate::storage::{MemoryStore, StorageError};

fn outcomes(output: &[u8]) -> Vec<JobOutcome> {
    std::str::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_run_writes_one_outcome_per_job() {
    let input = concat!(
        r#"{"id": "a", "candidate": "hello world", "reference": "hello world"}"#,
        "\n",
        r#"{"id": "b", "candidate": "hallo werld", "reference": "hello world"}"#,
        "\n",
        r#"{"candidate": "hello", "reference": "hello world this is much longer text"}"#,
        "\n",
    );
    let mut output = Vec::new();
    let verifier: TokenVerifier = TokenVerifier::default();

    let summary = run(input.as_bytes(), &mut output, &verifier, None).unwrap();

    assert_eq!(
        summary,
        RunSummary {
            processed: 3,
            verified: 1,
            malformed: 0,
            persist_failures: 0,
        }
    );

    let results = outcomes(&output);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].id.as_deref(), Some("a"));
    assert!(results[0].verified);
    assert!(matches!(results[1].verdict, Verdict::Rejected { .. }));
    assert_eq!(results[2].id, None);
    assert!(matches!(results[2].verdict, Verdict::TooShort { .. }));
}

#[test]
fn test_run_skips_malformed_and_blank_lines() {
    let input = concat!(
        "not json\n",
        "\n",
        r#"{"candidate": "only candidate"}"#,
        "\n",
        r#"{"candidate": "same", "reference": "same"}"#,
        "\n",
    );
    let mut output = Vec::new();
    let verifier: TokenVerifier = TokenVerifier::default();

    let summary = run(input.as_bytes(), &mut output, &verifier, None).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.malformed, 2);
    assert_eq!(outcomes(&output).len(), 1);
}

#[test]
fn test_run_skips_invalid_utf8_and_continues() {
    let mut input = b"{\"candidate\": \"caf\xff\", \"reference\": \"cafe\"}\n".to_vec();
    input.extend_from_slice(br#"{"id": "next", "candidate": "same", "reference": "same"}"#);
    input.push(b'\n');
    let mut output = Vec::new();
    let verifier: TokenVerifier = TokenVerifier::default();

    let summary = run(input.as_slice(), &mut output, &verifier, None).unwrap();

    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.processed, 1);

    let results = outcomes(&output);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id.as_deref(), Some("next"));
    assert!(results[0].verified);
}

#[test]
fn test_outcome_omits_missing_id() {
    let outcome = JobOutcome {
        id: None,
        verified: true,
        verdict: Verdict::Verified { score: 1.0 },
    };
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(!json.contains("\"id\""));
}

#[test]
fn test_evaluate_builds_records() {
    let job = VerificationJob {
        id: Some("req-42".to_string()),
        candidate: "The quick brown fox".to_string(),
        reference: "The quick brown fox".to_string(),
        block: 77,
        sampling_params: json!({"seed": 1}),
        miner: Some(MinerInfo {
            hotkey: "hk".to_string(),
            coldkey: "ck".to_string(),
            uid: 9,
            version: "1.0.0".to_string(),
            tokens: vec!["The".to_string()],
            time_to_first_token: 0.5,
            time_for_all_tokens: 1.0,
            total_time: 1.5,
            tokens_per_second: 10.0,
        }),
    };
    let verifier: TokenVerifier = TokenVerifier::default();

    let (outcome, request, miner) = job.evaluate(&verifier);

    assert!(outcome.verified);
    assert_eq!(request.r_nanoid, "req-42");
    assert_eq!(request.block, 77);
    assert_eq!(request.ground_truth["text"], "The quick brown fox");

    let miner = miner.expect("miner record");
    assert_eq!(miner.r_nanoid, "req-42");
    assert_eq!(miner.uid, 9);
    assert!(miner.stats.verified);
    assert_eq!(miner.stats.response, "The quick brown fox");
}

#[test]
fn test_run_persists_jobs() {
    let store = MemoryStore::new();
    store.setup().unwrap();

    let input = concat!(
        r#"{"id": "r1", "candidate": "abc", "reference": "abc", "miner": {"hotkey": "h", "coldkey": "c", "uid": 1, "version": "1"}}"#,
        "\n",
        r#"{"id": "r2", "candidate": "xyz", "reference": "abc"}"#,
        "\n",
    );
    let verifier: TokenVerifier = TokenVerifier::default();

    let summary = run(
        input.as_bytes(),
        Vec::new(),
        &verifier,
        Some(&store as &dyn RecordStore),
    )
    .unwrap();

    assert_eq!(summary.persist_failures, 0);
    assert_eq!(store.request_count(), 2);
    assert_eq!(store.miner_response_count(), 1);

    let miners = store.load_miner_responses().unwrap();
    assert_eq!(miners[0].record.r_nanoid, "r1");
    assert!(miners[0].record.stats.verified);
}

#[test]
fn test_run_continues_after_persist_failure() {
    let store = MemoryStore::new();
    store.setup().unwrap();

    // The second job reuses the first id and is rejected by the store.
    let input = concat!(
        r#"{"id": "dup", "candidate": "abc", "reference": "abc"}"#,
        "\n",
        r#"{"id": "dup", "candidate": "abc", "reference": "abc"}"#,
        "\n",
        r#"{"id": "ok", "candidate": "abc", "reference": "abc"}"#,
        "\n",
    );
    let mut output = Vec::new();
    let verifier: TokenVerifier = TokenVerifier::default();

    let summary = run(
        input.as_bytes(),
        &mut output,
        &verifier,
        Some(&store as &dyn RecordStore),
    )
    .unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.persist_failures, 1);
    assert_eq!(outcomes(&output).len(), 3);
    assert_eq!(store.request_count(), 2);
}

#[test]
fn test_run_counts_failures_when_store_not_ready() {
    let store = MemoryStore::new();
    let input = r#"{"candidate": "abc", "reference": "abc"}"#;
    let verifier: TokenVerifier = TokenVerifier::default();

    let summary = run(
        input.as_bytes(),
        Vec::new(),
        &verifier,
        Some(&store as &dyn RecordStore),
    )
    .unwrap();

    assert_eq!(summary.persist_failures, 1);
    assert!(matches!(
        store.load_requests(),
        Err(StorageError::NotInitialized { .. })
    ));
}
