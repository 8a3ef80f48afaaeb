//! Domain types shared across the workspace.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid app id {0:?}: expected a non-empty string of digits")]
    InvalidAppId(String),
}

/// Validated App Store application identifier.
///
/// The storefront feed addresses apps by their numeric id; [`AppId::parse`]
/// rejects anything that is not a non-empty ASCII digit string once, at the
/// CLI boundary, so the rest of the pipeline never re-validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppId(String);

impl AppId {
    /// Parses and validates a raw app id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAppId`] if `raw` is empty or contains a
    /// non-digit character.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidAppId(raw.to_owned()));
        }
        Ok(Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single customer review parsed from a storefront feed.
///
/// Immutable once constructed. The same review is visible from every
/// storefront feed that was live when it was fetched; duplicates under one
/// `id` carry identical content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub id: i64,
    /// Star rating, always in `1..=5`.
    pub rating: u8,
    pub title: String,
    pub author: String,
    pub body: String,
    /// Content-type label carried by the feed entry (e.g. `"Application"`).
    pub content_type: String,
}

/// A review confirmed absent from the seen store at reconciliation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReviewEvent {
    pub review: ReviewRecord,
}
