//! Weighted fit scoring against a target profile.

use scout_types::{
    CompanyRecord, CrmStanding, FitScore, ScoreFactor, ScoringWeights, SizeBucket, TargetCriteria,
};

/// Score a company against the target criteria.
///
/// The final score is the sum of the factor contributions, rounded and
/// clamped to `[0, 100]`. The breakdown keeps the true unclamped points for
/// every evaluated factor, ordered positives first (descending), then
/// negatives by magnitude, so a clamped score remains auditable.
///
/// Criteria dimensions that are empty (no verticals configured, no size
/// bucket, ...) are skipped entirely rather than scored as misses.
#[must_use]
pub fn score_company(
    company: &CompanyRecord,
    weights: &ScoringWeights,
    criteria: &TargetCriteria,
) -> FitScore {
    let mut breakdown: Vec<ScoreFactor> = Vec::new();

    if !criteria.verticals.is_empty() {
        let matched = company
            .vertical
            .as_deref()
            .is_some_and(|v| criteria.verticals.iter().any(|c| contains_ci(v, c)));
        breakdown.push(factor(
            "vertical match",
            matched,
            if matched { weights.vertical_match } else { 0.0 },
        ));
    }

    if let Some(target_size) = criteria.size {
        let matched = company
            .employee_count
            .is_some_and(|n| SizeBucket::from_employee_count(n) == target_size);
        breakdown.push(factor(
            "size match",
            matched,
            if matched { weights.size_match } else { 0.0 },
        ));
    }

    if !criteria.regions.is_empty() {
        let matched = company
            .region
            .as_deref()
            .is_some_and(|r| criteria.regions.iter().any(|c| contains_ci(r, c)));
        breakdown.push(factor(
            "region match",
            matched,
            if matched { weights.region_match } else { 0.0 },
        ));
    }

    let has_buying_signal = company.signals.iter().any(|s| s.kind.is_buying_signal());
    if has_buying_signal {
        breakdown.push(factor("buying signals", true, weights.buying_signal));
    }

    if let Some(relevance) = company.relevance {
        let clamped = relevance.clamp(0.0, 1.0);
        breakdown.push(factor(
            "search relevance",
            clamped > 0.0,
            clamped * weights.relevance_max,
        ));
    }

    match company.crm.as_ref().map(|c| c.standing) {
        Some(CrmStanding::ActiveLead | CrmStanding::OpenOpportunity) => {
            breakdown.push(factor("active in crm", true, weights.active_lead));
        }
        Some(CrmStanding::Customer) => {
            breakdown.push(factor(
                "existing customer",
                true,
                -weights.customer_penalty,
            ));
        }
        _ => {}
    }

    if !criteria.negative_keywords.is_empty() && has_negative_keyword(company, criteria) {
        breakdown.push(factor(
            "negative keywords",
            true,
            -weights.negative_keyword,
        ));
    }

    sort_breakdown(&mut breakdown);

    let total: f64 = breakdown.iter().map(|f| f.points).sum();
    FitScore {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        score: total.round().clamp(0.0, 100.0) as u8,
        breakdown,
    }
}

fn factor(label: &str, matched: bool, points: f64) -> ScoreFactor {
    ScoreFactor {
        label: label.to_string(),
        points,
        matched,
    }
}

/// Positives first (descending by points), then negatives ordered by
/// magnitude (most negative first).
fn sort_breakdown(breakdown: &mut [ScoreFactor]) {
    breakdown.sort_by(|a, b| {
        match (a.points >= 0.0, b.points >= 0.0) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            (true, true) => b
                .points
                .partial_cmp(&a.points)
                .unwrap_or(std::cmp::Ordering::Equal),
            (false, false) => a
                .points
                .partial_cmp(&b.points)
                .unwrap_or(std::cmp::Ordering::Equal),
        }
    });
}

fn has_negative_keyword(company: &CompanyRecord, criteria: &TargetCriteria) -> bool {
    criteria.negative_keywords.iter().any(|kw| {
        contains_ci(&company.name, kw)
            || company
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, kw))
            || company
                .signals
                .iter()
                .any(|s| contains_ci(&s.title, kw))
    })
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
