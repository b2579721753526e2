use bitvec::prelude::*;

use crate::constants::{
    MATCH_WINDOW_FACTOR, WINKLER_BOOST_THRESHOLD, WINKLER_MAX_PREFIX, WINKLER_PREFIX_SCALE,
};

/// Maximum offset at which two characters may still match.
///
/// Computed as `floor(max(len1, len2) * 0.75) - 1`. The result is `-1` when both inputs
/// have at most one character, which leaves every scan range empty.
#[inline]
pub fn match_window(len1: usize, len2: usize) -> isize {
    (len1.max(len2) as f64 * MATCH_WINDOW_FACTOR).floor() as isize - 1
}

/// Jaro similarity of `s1` and `s2`.
///
/// Identical inputs (including two empty strings) score exactly `1.0`; otherwise an
/// empty input scores `0.0`.
pub fn jaro_distance(s1: &str, s2: &str) -> f64 {
    if s1 == s2 {
        return 1.0;
    }

    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (len1, len2) = (a.len(), b.len());

    if len1 == 0 || len2 == 0 {
        return 0.0;
    }

    let window = match_window(len1, len2);
    let mut matched_a = bitvec![0; len1];
    let mut matched_b = bitvec![0; len2];
    let mut matches = 0usize;

    // First unmatched hit inside the window wins; later candidates are never considered.
    for (i, &ch) in a.iter().enumerate() {
        let lo = (i as isize - window).max(0) as usize;
        let hi = ((i as isize + window + 1).max(0) as usize).min(len2);

        for j in lo..hi {
            if b[j] == ch && !matched_b[j] {
                matched_a.set(i, true);
                matched_b.set(j, true);
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0.0_f64;
    let mut cursor = 0usize;

    for i in 0..len1 {
        if matched_a[i] {
            // Both masks hold `matches` bits, so the cursor stays in bounds.
            while !matched_b[cursor] {
                cursor += 1;
            }
            if a[i] != b[cursor] {
                transpositions += 1.0;
            }
            cursor += 1;
        }
        transpositions /= 2.0;
    }

    let m = matches as f64;
    (m / len1 as f64 + m / len2 as f64 + (m - transpositions) / m) / 3.0
}

/// Jaro-Winkler similarity of `s1` and `s2`.
///
/// Scores above `0.7` are boosted by `0.25` per shared leading character (at most 4) of
/// the remaining distance to `1.0`. A full four-character prefix therefore lifts any
/// boosted score to `1.0`.
pub fn jaro_winkler(s1: &str, s2: &str) -> f64 {
    let mut distance = jaro_distance(s1, s2);

    if distance > WINKLER_BOOST_THRESHOLD {
        let prefix = common_prefix_len(s1, s2).min(WINKLER_MAX_PREFIX);
        distance += WINKLER_PREFIX_SCALE * prefix as f64 * (1.0 - distance);
    }

    distance
}

/// Number of leading characters `s1` and `s2` share.
#[inline]
pub fn common_prefix_len(s1: &str, s2: &str) -> usize {
    s1.chars()
        .zip(s2.chars())
        .take_while(|(a, b)| a == b)
        .count()
}
