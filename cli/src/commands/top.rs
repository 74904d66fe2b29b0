use std::fs;

use anyhow::{Context, Result};
use migramap::{top_n, EngineConfig, StatisticRecord, StatisticsDataset};

use crate::cli::{Cli, TopArgs};

pub fn run(_cli: &Cli, args: &TopArgs) -> Result<()> {
    let bytes = fs::read(&args.statistics)
        .with_context(|| format!("Failed to read statistics: {}", args.statistics.display()))?;
    let dataset: StatisticsDataset = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse statistics: {}", args.statistics.display()))?;

    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };

    let record = StatisticRecord::from_dataset(&dataset, &config.normalizer());
    for entry in top_n(&record, args.count.unwrap_or(config.ranking_size)) {
        println!("{:>3}. {:<4} {:>12}", entry.rank, entry.code.as_str(), format_count(entry.value));
    }
    Ok(())
}

/// Round to a whole number and group thousands with spaces: 1234567 -> "1 234 567".
pub(crate) fn format_count(value: f64) -> String {
    let digits = format!("{:.0}", value.max(0.0));
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 { out.push(' ') }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_count;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1 000");
        assert_eq!(format_count(1234567.4), "1 234 567");
        assert_eq!(format_count(-5.0), "0");
    }
}
