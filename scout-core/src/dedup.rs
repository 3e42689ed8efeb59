//! Cross-provider de-duplication and record merging.
//!
//! Records are grouped by registrable (root) domain. Each group collapses
//! into a single record: the newest member is the base, scalar gaps are
//! backfilled from older members, sources are unioned, signals are
//! de-duplicated by id, and scores are averaged with extra weight on the
//! newest member.

use std::collections::HashMap;

use scout_types::{CompanyRecord, FitScore, Signal};

/// Weight given to the newest record's score when averaging scores across
/// merged duplicates. Older members weigh `1.0` each.
pub const NEWEST_SCORE_WEIGHT: f64 = 1.5;

/// Merge duplicate companies using [`NEWEST_SCORE_WEIGHT`].
#[must_use]
pub fn dedupe_companies(records: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
    dedupe_companies_with(records, NEWEST_SCORE_WEIGHT)
}

/// Merge duplicate companies, weighting the newest member's score by
/// `newest_weight` when averaging.
///
/// Output order follows the first appearance of each root domain in the
/// input, so upstream ranking decisions survive the merge.
#[must_use]
pub fn dedupe_companies_with(
    records: Vec<CompanyRecord>,
    newest_weight: f64,
) -> Vec<CompanyRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<CompanyRecord>> = HashMap::new();

    for record in records {
        let root = record.domain.root().to_string();
        groups
            .entry(root.clone())
            .or_insert_with(|| {
                order.push(root);
                Vec::new()
            })
            .push(record);
    }

    order
        .into_iter()
        .map(|root| {
            let group = groups.remove(&root).unwrap_or_default();
            merge_group(group, newest_weight)
        })
        .collect()
}

fn merge_group(mut group: Vec<CompanyRecord>, newest_weight: f64) -> CompanyRecord {
    debug_assert!(!group.is_empty());
    // Newest first; the sort is stable so same-timestamp records keep input order.
    group.sort_by(|a, b| b.last_refreshed.cmp(&a.last_refreshed));

    let merged_fit = merge_scores(&group, newest_weight);

    let mut iter = group.into_iter();
    let mut base = match iter.next() {
        Some(first) => first,
        None => unreachable!("merge_group called with empty group"),
    };

    for older in iter {
        for source in older.sources {
            if !base.sources.contains(&source) {
                base.sources.push(source);
            }
        }
        for signal in older.signals {
            if !base.signals.iter().any(|s| s.id == signal.id) {
                base.signals.push(signal);
            }
        }
        base.description = base.description.or(older.description);
        base.vertical = base.vertical.or(older.vertical);
        base.region = base.region.or(older.region);
        base.employee_count = base.employee_count.or(older.employee_count);
        base.revenue_usd = base.revenue_usd.or(older.revenue_usd);
        base.founded_year = base.founded_year.or(older.founded_year);
        base.phone = base.phone.or(older.phone);
        base.logo_url = base.logo_url.or(older.logo_url);
        base.relevance = match (base.relevance, older.relevance) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        base.contact_count = match (base.contact_count, older.contact_count) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        base.crm = base.crm.or(older.crm);
        base.exact_match |= older.exact_match;
    }

    base.signals.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
    base.fit = merged_fit;
    base
}

/// Weighted average of the group's scores: the newest scored member weighs
/// `newest_weight`, every other scored member weighs `1.0`. The breakdown is
/// taken from the newest scored member; the averaged total replaces its
/// score. Members without a score do not participate.
fn merge_scores(newest_first: &[CompanyRecord], newest_weight: f64) -> Option<FitScore> {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut breakdown: Option<&FitScore> = None;

    for record in newest_first {
        if let Some(fit) = &record.fit {
            let weight = if breakdown.is_none() {
                newest_weight
            } else {
                1.0
            };
            weighted_sum += f64::from(fit.score) * weight;
            weight_total += weight;
            if breakdown.is_none() {
                breakdown = Some(fit);
            }
        }
    }

    breakdown.map(|fit| FitScore {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        score: (weighted_sum / weight_total).round().clamp(0.0, 100.0) as u8,
        breakdown: fit.breakdown.clone(),
    })
}

/// De-duplicate a flat signal list by id, keeping first occurrence.
#[must_use]
pub fn dedupe_signals(signals: Vec<Signal>) -> Vec<Signal> {
    let mut seen = std::collections::HashSet::new();
    signals
        .into_iter()
        .filter(|s| seen.insert(s.id.clone()))
        .collect()
}
