use std::collections::BTreeSet;

use super::model::{FundingDataset, FundingRecord};

// ---------------------------------------------------------------------------
// Filter configuration: three conjunctive predicates
// ---------------------------------------------------------------------------

/// Default year window shown on first load. A fixed constant, not derived
/// from the data, so it may exclude rows outside 2018–2025.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2018, 2025);

/// The three sidebar filters. A record passes when its industry and stage
/// are in the selected sets and its year lies in the inclusive range.
/// Deselecting every value of a set filter is legal and matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub industries: BTreeSet<String>,
    pub stages: BTreeSet<String>,
    /// Inclusive `(low, high)` year range.
    pub year_range: (i32, i32),
}

impl FilterConfig {
    /// Initial configuration for a freshly loaded dataset: every industry
    /// and stage selected, year window at [`DEFAULT_YEAR_RANGE`] clamped
    /// into the data's year bounds.
    pub fn all_selected(dataset: &FundingDataset) -> Self {
        let year_range = match dataset.year_bounds {
            Some((lo, hi)) => (
                DEFAULT_YEAR_RANGE.0.clamp(lo, hi),
                DEFAULT_YEAR_RANGE.1.clamp(lo, hi),
            ),
            None => DEFAULT_YEAR_RANGE,
        };
        FilterConfig {
            industries: dataset.industries.clone(),
            stages: dataset.stages.clone(),
            year_range,
        }
    }

    /// Whether a single record satisfies all three predicates.
    pub fn matches(&self, rec: &FundingRecord) -> bool {
        self.industries.contains(&rec.industry)
            && self.stages.contains(&rec.stage)
            && rec.year >= self.year_range.0
            && rec.year <= self.year_range.1
    }
}

/// Return indices of records that pass all active filters, in dataset
/// order. An empty result is a valid state, not an error.
pub fn filtered_indices(dataset: &FundingDataset, filters: &FilterConfig) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(industry: &str, stage: &str, year: i32, city: &str) -> FundingRecord {
        FundingRecord {
            industry: industry.to_string(),
            stage: stage.to_string(),
            year,
            amount: 1e6,
            contact_email: None,
            city: city.to_string(),
            email_domain: None,
            funding_millions: 1.0,
        }
    }

    fn dataset() -> FundingDataset {
        FundingDataset::from_records(vec![
            record("Fintech", "Seed", 2016, "Pune"),
            record("Fintech", "Series A", 2019, "Delhi"),
            record("Health", "Seed", 2020, "Delhi"),
            record("Retail", "Series B", 2024, "Mumbai"),
        ])
    }

    #[test]
    fn all_selected_with_full_year_span_returns_everything() {
        let ds = dataset();
        let mut filters = FilterConfig::all_selected(&ds);
        filters.year_range = ds.year_bounds.unwrap();
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3]);
    }

    #[test]
    fn default_year_window_clamps_into_data_bounds() {
        let ds = dataset();
        let filters = FilterConfig::all_selected(&ds);
        // Data spans 2016..=2024, so the default 2018..=2025 clamps to 2018..=2024
        // and the 2016 row falls outside it.
        assert_eq!(filters.year_range, (2018, 2024));
        assert_eq!(filtered_indices(&ds, &filters), vec![1, 2, 3]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let ds = dataset();
        let mut filters = FilterConfig::all_selected(&ds);
        filters.industries = ["Fintech".to_string()].into();
        filters.stages = ["Seed".to_string()].into();
        filters.year_range = (2016, 2024);
        // Only the Fintech/Seed/2016 row satisfies all three.
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);
    }

    #[test]
    fn filter_is_sound_and_complete() {
        let ds = dataset();
        let mut filters = FilterConfig::all_selected(&ds);
        filters.industries = ["Fintech".to_string(), "Health".to_string()].into();
        filters.year_range = (2019, 2020);

        let indices = filtered_indices(&ds, &filters);
        for (i, rec) in ds.records.iter().enumerate() {
            assert_eq!(indices.contains(&i), filters.matches(rec));
        }
    }

    #[test]
    fn disjoint_industry_set_yields_empty_result() {
        let ds = dataset();
        let mut filters = FilterConfig::all_selected(&ds);
        filters.industries = ["Aerospace".to_string()].into();
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let ds = dataset();
        let mut filters = FilterConfig::all_selected(&ds);
        filters.stages.clear();
        assert!(filtered_indices(&ds, &filters).is_empty());
    }
}
