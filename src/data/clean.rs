use std::collections::HashSet;

use super::model::{FundingRecord, RawRecord};

// ---------------------------------------------------------------------------
// Cleaning: deduplicate + derive computed columns
// ---------------------------------------------------------------------------

/// Clean raw rows into [`FundingRecord`]s.
///
/// * Exact duplicates (all input columns equal) are dropped; the first
///   occurrence wins and the order of surviving rows is unchanged.
/// * `email_domain` and `funding_millions` are derived per row.
///
/// Cleaning already-clean data is a no-op apart from recomputing the
/// derived columns, so the stage is idempotent.
pub fn clean(raw: Vec<RawRecord>) -> Vec<FundingRecord> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .filter(|rec| seen.insert(rec.dedup_key()))
        .map(derive)
        .collect()
}

fn derive(raw: RawRecord) -> FundingRecord {
    let email_domain = raw.contact_email.as_deref().and_then(email_domain);
    let funding_millions = raw.amount / 1_000_000.0;
    FundingRecord {
        industry: raw.industry,
        stage: raw.stage,
        year: raw.year,
        amount: raw.amount,
        contact_email: raw.contact_email,
        city: raw.city,
        email_domain,
        funding_millions,
    }
}

/// Extract the domain part of an email address: everything after the first
/// `@`. Returns `None` for addresses without an `@` or with nothing after
/// it, instead of treating them as an error.
pub fn email_domain(email: &str) -> Option<String> {
    match email.split_once('@') {
        Some((_, domain)) if !domain.is_empty() => Some(domain.to_string()),
        _ => None,
    }
}
