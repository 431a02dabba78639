use std::collections::BTreeMap;

use serde::Serialize;

use super::model::FundingDataset;

// ---------------------------------------------------------------------------
// DashboardSummary – everything the central panel renders
// ---------------------------------------------------------------------------

/// Aggregates over the filtered view. Recomputed from scratch on every
/// filter change; holds no references into the dataset.
///
/// All `Option` fields are `None` when the filtered set is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Number of filtered records.
    pub count: usize,
    /// Sum of funding_millions; 0.0 when empty.
    pub total_millions: f64,
    /// Mean funding_millions.
    pub average_millions: Option<f64>,
    /// Most frequent Industry value; ties go to the lexicographically
    /// smallest industry.
    pub mode_industry: Option<String>,
    /// Summed funding_millions per Industry.
    pub by_industry: BTreeMap<String, f64>,
    /// Summed funding_millions per Year.
    pub by_year: BTreeMap<i32, f64>,
    /// Summed funding_millions per City.
    pub by_city: BTreeMap<String, f64>,
    /// Industry with the largest summed funding_millions.
    pub top_industry: Option<String>,
    /// City with the largest summed funding_millions.
    pub top_city: Option<String>,
    /// Funding stage with the largest summed funding_millions.
    pub top_stage: Option<String>,
}

impl DashboardSummary {
    /// Aggregate the records selected by `indices`.
    ///
    /// Pure: `(dataset, indices) -> summary`, no state carried between
    /// invocations.
    pub fn compute(dataset: &FundingDataset, indices: &[usize]) -> Self {
        if indices.is_empty() {
            return DashboardSummary::default();
        }

        let mut total = 0.0;
        let mut industry_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut by_industry: BTreeMap<String, f64> = BTreeMap::new();
        let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
        let mut by_city: BTreeMap<String, f64> = BTreeMap::new();
        let mut by_stage: BTreeMap<String, f64> = BTreeMap::new();

        for &idx in indices {
            let rec = &dataset.records[idx];
            total += rec.funding_millions;
            *industry_counts.entry(&rec.industry).or_default() += 1;
            *by_industry.entry(rec.industry.clone()).or_default() += rec.funding_millions;
            *by_year.entry(rec.year).or_default() += rec.funding_millions;
            *by_city.entry(rec.city.clone()).or_default() += rec.funding_millions;
            *by_stage.entry(rec.stage.clone()).or_default() += rec.funding_millions;
        }

        let count = indices.len();
        let mode_industry = max_by_value(&industry_counts, |&n| n as f64);
        let top_industry = max_by_value(&by_industry, |&v| v);
        let top_city = max_by_value(&by_city, |&v| v);
        let top_stage = max_by_value(&by_stage, |&v| v);

        DashboardSummary {
            count,
            total_millions: total,
            average_millions: Some(total / count as f64),
            mode_industry,
            by_industry,
            by_year,
            by_city,
            top_industry,
            top_city,
            top_stage,
        }
    }
}

/// Key with the maximum measure. Iteration is in key order and only a
/// strictly greater measure replaces the current best, so ties resolve to
/// the lexicographically smallest key.
fn max_by_value<K, V, F>(map: &BTreeMap<K, V>, measure: F) -> Option<String>
where
    K: Ord + ToString,
    F: Fn(&V) -> f64,
{
    let mut best: Option<(&K, f64)> = None;
    for (key, val) in map {
        let m = measure(val);
        match best {
            Some((_, best_m)) if m <= best_m => {}
            _ => best = Some((key, m)),
        }
    }
    best.map(|(key, _)| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FundingRecord;

    fn record(industry: &str, stage: &str, year: i32, amount: f64, city: &str) -> FundingRecord {
        FundingRecord {
            industry: industry.to_string(),
            stage: stage.to_string(),
            year,
            amount,
            contact_email: None,
            city: city.to_string(),
            email_domain: None,
            funding_millions: amount / 1_000_000.0,
        }
    }

    #[test]
    fn single_fintech_row_example() {
        // Filtering {Fintech 2019 5M, Health 2020 2M} down to Fintech only.
        let ds = FundingDataset::from_records(vec![
            record("Fintech", "Seed", 2019, 5_000_000.0, "Pune"),
            record("Health", "Seed", 2020, 2_000_000.0, "Delhi"),
        ]);
        let summary = DashboardSummary::compute(&ds, &[0]);

        assert_eq!(summary.count, 1);
        assert!((summary.total_millions - 5.0).abs() < 1e-9);
        assert!((summary.average_millions.unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(summary.mode_industry.as_deref(), Some("Fintech"));
    }

    #[test]
    fn empty_selection_reports_safe_defaults() {
        let ds = FundingDataset::from_records(vec![record(
            "Fintech", "Seed", 2019, 5e6, "Pune",
        )]);
        let summary = DashboardSummary::compute(&ds, &[]);

        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_millions, 0.0);
        assert_eq!(summary.average_millions, None);
        assert_eq!(summary.mode_industry, None);
        assert_eq!(summary.top_industry, None);
        assert_eq!(summary.top_city, None);
        assert_eq!(summary.top_stage, None);
        assert!(summary.by_industry.is_empty());
        assert!(summary.by_year.is_empty());
        assert!(summary.by_city.is_empty());
    }

    #[test]
    fn grouped_sums_match_per_key_totals() {
        let ds = FundingDataset::from_records(vec![
            record("Fintech", "Seed", 2019, 1e6, "Pune"),
            record("Fintech", "Series A", 2020, 2e6, "Delhi"),
            record("Health", "Seed", 2020, 4e6, "Pune"),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let summary = DashboardSummary::compute(&ds, &indices);

        for (industry, sum) in &summary.by_industry {
            let expected: f64 = ds
                .records
                .iter()
                .filter(|r| &r.industry == industry)
                .map(|r| r.funding_millions)
                .sum();
            assert!((sum - expected).abs() < 1e-9);
        }
        assert!((summary.by_year[&2020] - 6.0).abs() < 1e-9);
        assert!((summary.by_city["Pune"] - 5.0).abs() < 1e-9);
        assert!((summary.total_millions - 7.0).abs() < 1e-9);
    }

    #[test]
    fn insights_pick_largest_sums() {
        let ds = FundingDataset::from_records(vec![
            record("Fintech", "Seed", 2019, 1e6, "Pune"),
            record("Health", "Series B", 2020, 9e6, "Delhi"),
            record("Fintech", "Seed", 2021, 3e6, "Pune"),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let summary = DashboardSummary::compute(&ds, &indices);

        assert_eq!(summary.top_industry.as_deref(), Some("Health"));
        assert_eq!(summary.top_city.as_deref(), Some("Delhi"));
        assert_eq!(summary.top_stage.as_deref(), Some("Series B"));
        // Mode counts occurrences, not sums.
        assert_eq!(summary.mode_industry.as_deref(), Some("Fintech"));
    }

    #[test]
    fn ties_resolve_to_lexicographically_smallest_key() {
        let ds = FundingDataset::from_records(vec![
            record("Retail", "Seed", 2019, 2e6, "Pune"),
            record("Health", "Angel", 2019, 2e6, "Delhi"),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let summary = DashboardSummary::compute(&ds, &indices);

        assert_eq!(summary.mode_industry.as_deref(), Some("Health"));
        assert_eq!(summary.top_industry.as_deref(), Some("Health"));
        assert_eq!(summary.top_city.as_deref(), Some("Delhi"));
        assert_eq!(summary.top_stage.as_deref(), Some("Angel"));
    }
}
