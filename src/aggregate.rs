use std::collections::HashMap;

use crate::models::{DependencyCount, OutputRecord, NPM_ECOSYSTEM};

/// Count how often each `name@version` was emitted across all rows.
///
/// Each group is tagged with its percentile rank among all group counts.
/// Sorted by count (highest first), then name and version.
pub fn count_references<'a, I>(records: I) -> Vec<DependencyCount>
where
    I: IntoIterator<Item = &'a OutputRecord>,
{
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for record in records {
        *counts
            .entry((record.name.as_str(), record.version.as_str()))
            .or_insert(0) += 1;
    }

    let mut sorted_counts: Vec<usize> = counts.values().copied().filter(|c| *c > 0).collect();
    sorted_counts.sort_unstable();
    let ranks: HashMap<usize, u32> = compute_percentile_ranks(&sorted_counts)
        .into_iter()
        .collect();

    let mut grouped: Vec<DependencyCount> = counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|((name, version), count)| DependencyCount {
            name: name.to_string(),
            version: version.to_string(),
            count,
            percentile_rank: ranks.get(&count).copied().unwrap_or(100),
            ecosystem_backend: NPM_ECOSYSTEM.to_string(),
        })
        .collect();

    grouped.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.version.cmp(&b.version))
    });
    grouped
}

/// Percentile rank of every distinct element of a sorted slice.
///
/// The rank of an element is the share of the slice taken by it and every
/// element before it, as a whole percentage rounded half to even. Pairs are
/// returned in first-seen order.
pub fn compute_percentile_ranks<T>(sorted: &[T]) -> Vec<(T, u32)>
where
    T: PartialEq + Clone,
{
    let mut freq: Vec<(T, usize)> = Vec::new();
    for elem in sorted {
        match freq.iter_mut().find(|(seen, _)| seen == elem) {
            Some((_, count)) => *count += 1,
            None => freq.push((elem.clone(), 1)),
        }
    }

    let total = sorted.len() as f64;
    let mut percentile = 0.0_f64;
    freq.into_iter()
        .map(|(elem, count)| {
            percentile += count as f64 / total;
            (elem, (percentile * 100.0).round_ties_even() as u32)
        })
        .collect()
}
