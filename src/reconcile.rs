//! Pairs local archives with remote archives.
//!
//! Matching runs in two phases. The first pairs records sharing an identity
//! key (a mod id or a heuristic name) with similarity `1.0`. The second
//! greedily pairs whatever is left by filename similarity, walking the
//! remaining local records from last to first and giving each one the most
//! similar remaining remote record. The greedy walk is order dependent and
//! is not a globally optimal assignment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ArchiveRecord, MatchResult, ReconciliationReport};

/// Lowest filename similarity accepted by the fuzzy phase by default.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Tuning knobs for [`reconcile_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Inclusive lower bound on fuzzy similarity.
    pub threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Length-normalized Levenshtein similarity in `[0, 1]`.
///
/// Equal strings (including two empty ones) score `1.0`.
pub fn filename_similarity(lhs: &str, rhs: &str) -> f64 {
    if lhs == rhs {
        return 1.0;
    }
    strsim::normalized_levenshtein(lhs, rhs)
}

/// Reconciles two inventories with [`MatchOptions::default`].
pub fn reconcile<'a>(
    local: &'a [ArchiveRecord],
    remote: &'a [ArchiveRecord],
) -> ReconciliationReport<'a> {
    reconcile_with(local, remote, &MatchOptions::default())
}

/// Reconciles two inventories.
///
/// Every remote record ends up in exactly one match or in
/// `unmatched_remote`. A local record that claims several remote records
/// through different mod ids appears in several matches and never in
/// `unmatched_local`.
pub fn reconcile_with<'a>(
    local: &'a [ArchiveRecord],
    remote: &'a [ArchiveRecord],
    options: &MatchOptions,
) -> ReconciliationReport<'a> {
    let mut claimed = vec![false; remote.len()];
    let mut local_matched = vec![false; local.len()];
    let mut matches = Vec::new();

    // Phase 1: exact identity keys.
    let key_index = index_identity_keys(remote);
    for (local_index, record) in local.iter().enumerate() {
        for key in record.identity_keys() {
            let Some(&remote_index) = key_index.get(key) else {
                continue;
            };
            if claimed[remote_index] {
                continue;
            }
            claimed[remote_index] = true;
            local_matched[local_index] = true;
            debug!(
                local = %record.file_name,
                remote = %remote[remote_index].file_name,
                key,
                "exact identity match"
            );
            matches.push(MatchResult {
                local: record,
                remote: &remote[remote_index],
                similarity: 1.0,
            });
        }
    }

    // Phase 2: fuzzy filenames over the leftovers, local side in reverse.
    let mut remaining_remote: Vec<usize> = (0..remote.len())
        .filter(|&index| !claimed[index])
        .collect();
    let pending_local: Vec<usize> = (0..local.len())
        .rev()
        .filter(|&index| !local_matched[index])
        .collect();

    for local_index in pending_local {
        let record = &local[local_index];
        let Some((slot, similarity)) = best_candidate(record, remote, &remaining_remote) else {
            continue;
        };
        if similarity < options.threshold {
            continue;
        }
        let remote_index = remaining_remote.remove(slot);
        claimed[remote_index] = true;
        local_matched[local_index] = true;
        debug!(
            local = %record.file_name,
            remote = %remote[remote_index].file_name,
            similarity,
            "fuzzy filename match"
        );
        matches.push(MatchResult {
            local: record,
            remote: &remote[remote_index],
            similarity,
        });
    }

    let unmatched_local = unclaimed(local, &local_matched);
    let unmatched_remote = unclaimed(remote, &claimed);
    debug!(
        matched = matches.len(),
        unmatched_local = unmatched_local.len(),
        unmatched_remote = unmatched_remote.len(),
        "reconciliation finished"
    );

    ReconciliationReport {
        matches,
        unmatched_local,
        unmatched_remote,
    }
}

/// Maps every identity key to the first remote record registering it.
fn index_identity_keys(remote: &[ArchiveRecord]) -> HashMap<&str, usize> {
    let mut index = HashMap::new();
    for (position, record) in remote.iter().enumerate() {
        for key in record.identity_keys() {
            index.entry(key).or_insert(position);
        }
    }
    index
}

/// Highest scoring remaining remote record as `(slot in remaining, score)`.
/// Ties keep the earliest candidate.
fn best_candidate(
    record: &ArchiveRecord,
    remote: &[ArchiveRecord],
    remaining: &[usize],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (slot, &remote_index) in remaining.iter().enumerate() {
        let score = filename_similarity(&record.file_name, &remote[remote_index].file_name);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((slot, score)),
        }
    }
    best
}

fn unclaimed<'a>(records: &'a [ArchiveRecord], taken: &[bool]) -> Vec<&'a ArchiveRecord> {
    records
        .iter()
        .zip(taken)
        .filter(|(_, taken)| !**taken)
        .map(|(record, _)| record)
        .collect()
}
