// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::Record;

/// Indices of `records` whose searchable fields contain `query`,
/// case-insensitively, in catalog order. An empty query matches everything.
///
/// Pure function of its inputs; callers re-run it on every query-text change
/// and on every category switch.
pub fn filter_view(records: &[Record], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..records.len()).collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.matches(&needle))
        .map(|(index, _)| index)
        .collect()
}
