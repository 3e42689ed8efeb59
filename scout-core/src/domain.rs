//! Domain noise filtering.

pub use scout_types::Domain;

/// Root domains that never identify a prospect company: social networks,
/// aggregators, job boards, and encyclopedias that dominate generic web
/// search results.
const NOISE_ROOTS: &[&str] = &[
    "linkedin.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "youtube.com",
    "tiktok.com",
    "wikipedia.org",
    "crunchbase.com",
    "pitchbook.com",
    "glassdoor.com",
    "indeed.com",
    "medium.com",
    "reddit.com",
    "quora.com",
    "yelp.com",
    "amazon.com",
    "google.com",
];

/// Whether a domain belongs to the noise blocklist and should be dropped
/// from discovery results.
#[must_use]
pub fn is_noise_domain(domain: &Domain) -> bool {
    NOISE_ROOTS.contains(&domain.root())
}
