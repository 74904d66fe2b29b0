use serde::Serialize;

use crate::{data::StatisticRecord, region::RegionCode};

/// One row of the descending statistic ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub rank: usize,
    pub code: RegionCode,
    pub value: f64,
}

/// The `n` largest statistics, descending; ties ordered by code.
pub fn top_n(statistics: &StatisticRecord, n: usize) -> Vec<RankEntry> {
    let mut entries: Vec<(&RegionCode, f64)> = statistics.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (code, value))| RankEntry { rank: i + 1, code: code.clone(), value })
        .collect()
}
