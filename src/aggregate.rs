use crate::model::{Field, Insight, Measure, SeriesPoint};
use std::collections::HashMap;

/// Averaging series keep at most this many buckets.
const AVERAGE_CAP: usize = 15;
/// Counting series keep at most this many buckets.
const COUNT_CAP: usize = 10;

/// Group records by a categorical field and average a numeric measure per
/// bucket.
///
/// Records whose bucket value is blank are dropped entirely. Each point
/// carries the bucket mean rounded to one decimal place and the number of
/// contributing records. Points are sorted by value descending, ties keeping
/// first-occurrence order, and capped at 15.
pub fn group_average(records: &[Insight], bucket: Field, measure: Measure) -> Vec<SeriesPoint> {
    // Accumulate (sum, count) per bucket; a separate list keeps the order in
    // which buckets first appeared so tie-breaking stays deterministic.
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for record in records {
        let key = bucket.get(record);
        if key.trim().is_empty() {
            continue;
        }
        let entry = sums.entry(key).or_insert_with(|| {
            order.push(key);
            (0.0, 0)
        });
        entry.0 += measure.get(record);
        entry.1 += 1;
    }

    let mut points: Vec<SeriesPoint> = order
        .into_iter()
        .map(|name| {
            let (sum, count) = sums[name];
            SeriesPoint {
                name: name.to_string(),
                value: round1(sum / count as f64),
                count: Some(count),
            }
        })
        .collect();

    sort_descending(&mut points);
    points.truncate(AVERAGE_CAP);
    points
}

/// Group records by a categorical field and count bucket sizes.
///
/// Blank bucket values are dropped. Points are sorted by value descending,
/// ties keeping first-occurrence order, and capped at 10.
pub fn group_count(records: &[Insight], bucket: Field) -> Vec<SeriesPoint> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for record in records {
        let key = bucket.get(record);
        if key.trim().is_empty() {
            continue;
        }
        *counts.entry(key).or_insert_with(|| {
            order.push(key);
            0
        }) += 1;
    }

    let mut points: Vec<SeriesPoint> = order
        .into_iter()
        .map(|name| SeriesPoint {
            name: name.to_string(),
            value: counts[name] as f64,
            count: None,
        })
        .collect();

    sort_descending(&mut points);
    points.truncate(COUNT_CAP);
    points
}

/// Distinct non-blank values of a field, sorted ascending. Computed from the
/// unfiltered collection so filter option lists stay stable while the user
/// narrows the view.
pub fn unique_values(records: &[Insight], field: Field) -> Vec<String> {
    let mut values: Vec<String> = records
        .iter()
        .map(|r| field.get(r))
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
        .collect();
    values.sort();
    values.dedup();
    values
}

// Stable sort, so equal values keep the insertion order of the input.
fn sort_descending(points: &mut [SeriesPoint]) {
    points.sort_by(|a, b| b.value.total_cmp(&a.value));
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
