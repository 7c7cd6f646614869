//! Segment usage counts.

use std::collections::BTreeMap;

use cg_trips::Trip;

/// Trips per base segment id.  A trip counts once per segment however often
/// it uses it.
pub type UsageMap = BTreeMap<u64, u32>;

pub fn usage_count<'a, I>(trips: I) -> UsageMap
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut usage = UsageMap::new();
    for trip in trips {
        // `Trip::sections` holds no duplicates.
        for &base in &trip.sections {
            *usage.entry(base).or_insert(0) += 1;
        }
    }
    usage
}

/// Segments used by at least `min_usage` trips, busiest first.
pub fn high_usage(usage: &UsageMap, min_usage: u32) -> Vec<(u64, u32)> {
    let mut busy: Vec<(u64, u32)> = usage
        .iter()
        .filter(|&(_, &count)| count >= min_usage)
        .map(|(&id, &count)| (id, count))
        .collect();
    busy.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    busy
}
