use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::level::ScoreLevel;

/// Descriptive statistics for one group of score observations.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StatisticalDataPoint {
    pub name: String,
    pub count: usize,
    /// Mean numeric level; 0 when the group is empty
    pub average: f64,
    /// Nearest-rank median, kept as a level for display
    pub median: ScoreLevel,
    pub lower_quartile: f64,
    pub upper_quartile: f64,
    /// Observations per level, always holding all five levels
    pub counts: BTreeMap<ScoreLevel, usize>,
}

impl StatisticalDataPoint {
    pub fn count_of(&self, level: ScoreLevel) -> usize {
        self.counts.get(&level).copied().unwrap_or(0)
    }
}

fn empty_counts() -> BTreeMap<ScoreLevel, usize> {
    ScoreLevel::ALL.iter().map(|&level| (level, 0)).collect()
}

/// Linear-interpolated order statistic over levels already sorted by number.
///
/// Position is `(n - 1) * p`; the fractional part interpolates towards the
/// next element, or stays on the last one when there is no next. Returns 0
/// for an empty slice. `p` is clamped to `0..=1`; NaN counts as 0.
pub fn quartile(sorted: &[ScoreLevel], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };

    let position = (sorted.len() - 1) as f64 * p;
    let base = position.floor() as usize;
    let rest = position - base as f64;

    let lower = f64::from(sorted[base].to_number());
    match sorted.get(base + 1) {
        Some(next) => lower + rest * (f64::from(next.to_number()) - lower),
        None => lower,
    }
}

/// Summarize a group of score levels for charting.
pub fn summarize(name: &str, scores: &[ScoreLevel]) -> StatisticalDataPoint {
    let mut sorted = scores.to_vec();
    // stable, equal levels keep input order
    sorted.sort_by_key(|level| level.to_number());

    let mut counts = empty_counts();

    if sorted.is_empty() {
        return StatisticalDataPoint {
            name: name.to_string(),
            count: 0,
            average: 0.0,
            median: ScoreLevel::VeryGood,
            lower_quartile: 0.0,
            upper_quartile: 0.0,
            counts,
        };
    }

    for level in &sorted {
        *counts.entry(*level).or_insert(0) += 1;
    }

    let total: u32 = sorted.iter().map(|l| u32::from(l.to_number())).sum();
    let average = f64::from(total) / sorted.len() as f64;

    StatisticalDataPoint {
        name: name.to_string(),
        count: sorted.len(),
        average,
        median: sorted[sorted.len() / 2],
        lower_quartile: quartile(&sorted, 0.25),
        upper_quartile: quartile(&sorted, 0.75),
        counts,
    }
}
