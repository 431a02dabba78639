use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// RawRecord – one parsed input row, before cleaning
// ---------------------------------------------------------------------------

/// A funding event exactly as it appears in the source file.
///
/// `contact_email` is `None` when the cell is empty or null in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub industry: String,
    pub stage: String,
    pub year: i32,
    /// Funding amount in source currency units (not millions).
    pub amount: f64,
    pub contact_email: Option<String>,
    pub city: String,
}

impl RawRecord {
    /// Hashable identity over all input columns, used for exact-duplicate
    /// removal. The float amount is keyed by its bit pattern.
    pub(crate) fn dedup_key(&self) -> (String, String, i32, u64, Option<String>, String) {
        (
            self.industry.clone(),
            self.stage.clone(),
            self.year,
            self.amount.to_bits(),
            self.contact_email.clone(),
            self.city.clone(),
        )
    }
}

// ---------------------------------------------------------------------------
// FundingRecord – a cleaned row with derived columns
// ---------------------------------------------------------------------------

/// A cleaned funding event. `email_domain` and `funding_millions` are
/// recomputed from the raw columns on every load, never read from the file.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingRecord {
    pub industry: String,
    pub stage: String,
    pub year: i32,
    pub amount: f64,
    pub contact_email: Option<String>,
    pub city: String,
    /// Substring after the first `@` of the email; `None` when the email is
    /// missing, has no `@`, or nothing follows the `@`.
    pub email_domain: Option<String>,
    /// `amount / 1_000_000`.
    pub funding_millions: f64,
}

// ---------------------------------------------------------------------------
// FundingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed category indices.
///
/// Read-only after construction; filtering produces index views into
/// `records` and never mutates it.
#[derive(Debug, Clone)]
pub struct FundingDataset {
    /// All cleaned records (rows).
    pub records: Vec<FundingRecord>,
    /// Sorted distinct Industry values.
    pub industries: BTreeSet<String>,
    /// Sorted distinct Funding_Stage values.
    pub stages: BTreeSet<String>,
    /// Sorted distinct City values.
    pub cities: BTreeSet<String>,
    /// Inclusive year bounds present in the data, `None` when empty.
    pub year_bounds: Option<(i32, i32)>,
}

impl FundingDataset {
    /// Build the category indices from cleaned records.
    pub fn from_records(records: Vec<FundingRecord>) -> Self {
        let mut industries = BTreeSet::new();
        let mut stages = BTreeSet::new();
        let mut cities = BTreeSet::new();
        let mut year_bounds: Option<(i32, i32)> = None;

        for rec in &records {
            industries.insert(rec.industry.clone());
            stages.insert(rec.stage.clone());
            cities.insert(rec.city.clone());
            year_bounds = Some(match year_bounds {
                None => (rec.year, rec.year),
                Some((lo, hi)) => (lo.min(rec.year), hi.max(rec.year)),
            });
        }

        FundingDataset {
            records,
            industries,
            stages,
            cities,
            year_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
