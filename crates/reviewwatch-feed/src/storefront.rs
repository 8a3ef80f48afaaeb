//! Static table of App Store storefront country codes.
//!
//! The review feed is served per storefront; this is the fixed set of region
//! codes the feed answers for. Process-wide immutable configuration, not
//! runtime-derived state.

pub(crate) const ALL_CODES: &[&str] = &[
    "DZ", "AO", "AI", "AG", "AR", "AM", "AU", "AT", "AZ", "BH", "BD", "BB", "BY", "BE", "BZ",
    "BM", "BO", "BW", "BR", "VG", "BN", "BG", "CA", "KY", "CL", "CN", "CO", "CR", "CI", "HR",
    "CY", "CZ", "DK", "DM", "DO", "EC", "EG", "SV", "EE", "FI", "FR", "DE", "GH", "GR", "GD",
    "GT", "GY", "HN", "HK", "HU", "IS", "IN", "ID", "IE", "IL", "IT", "JM", "JP", "JO", "KZ",
    "KE", "KR", "KW", "LV", "LB", "LI", "LT", "LU", "MO", "MK", "MG", "MY", "MV", "ML", "MT",
    "MU", "MX", "MD", "MS", "NP", "NL", "NZ", "NI", "NE", "NG", "NO", "OM", "PK", "PA", "PY",
    "PE", "PH", "PL", "PT", "QA", "RO", "RU", "SA", "SN", "RS", "SG", "SK", "SI", "ZA", "ES",
    "LK", "KN", "LC", "VC", "SR", "SE", "CH", "TW", "TZ", "TH", "BS", "TT", "TN", "TR", "TC",
    "UG", "GB", "UA", "AE", "UY", "US", "UZ", "VE", "VN", "YE",
];

/// One App Store storefront region.
///
/// Only constructible from the static table, so every `Storefront` value is a
/// supported region by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Storefront(&'static str);

impl Storefront {
    /// Iterates over every supported storefront.
    pub fn all() -> impl Iterator<Item = Storefront> {
        ALL_CODES.iter().copied().map(Storefront)
    }

    /// Looks up a storefront by its two-letter code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Storefront> {
        ALL_CODES
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(code))
            .map(Storefront)
    }

    /// The canonical upper-case storefront code.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.0
    }

    /// Lower-case form used in feed URLs.
    pub(crate) fn url_segment(self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl std::fmt::Display for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
