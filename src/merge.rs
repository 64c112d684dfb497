//! Dedup and bounded merge of normalized entries.
//!
//! Links are write-once per feed: once a link has been stored it is never
//! re-added or updated in place, even if the upstream content changed.

use std::collections::HashSet;

use crate::entry::Entry;

/// Keep only entries whose link is not already known, dropping intra-batch
/// duplicates as well (first occurrence in feed order wins). The surviving
/// batch is sorted by publication time, newest first; the sort is stable so
/// same-instant entries keep their feed-supplied order.
pub fn filter_new(known: &HashSet<String>, fresh: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    let mut new_batch: Vec<Entry> = fresh
        .into_iter()
        .filter(|entry| !known.contains(&entry.link) && seen.insert(entry.link.clone()))
        .collect();

    new_batch.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    new_batch
}

/// Prepend the new batch to history (new-before-old), truncate to
/// `max_entries` discarding the tail, and sort the survivors newest-first
/// for rendering. `usize::MAX` is the unbounded sentinel.
pub fn merge_bounded(new_batch: Vec<Entry>, history: Vec<Entry>, max_entries: usize) -> Vec<Entry> {
    let mut merged = new_batch;
    merged.extend(history);
    merged.truncate(max_entries);
    merged.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    merged
}
