//! Wire-format types for the customer-reviews feed.
//!
//! The feed wraps everything in a `{"feed": ...}` envelope and renders every
//! scalar as a `{"label": "..."}` object — ids and ratings arrive as strings
//! and are converted to numbers at this boundary. The `entry` key may be a
//! list, a single bare object, or absent entirely; all three shapes are
//! accepted. Unknown keys (links, vote counts, version, feed metadata) are
//! ignored.

use serde::Deserialize;

use reviewwatch_core::ReviewRecord;

use crate::error::FeedError;

/// Top-level envelope of one storefront's review feed.
#[derive(Debug, Deserialize)]
pub struct ReviewFeedDocument {
    pub feed: ReviewFeed,
}

/// The feed payload. Only the entries matter; the surrounding metadata
/// (author, icon, links, update stamp) is dropped during deserialization.
#[derive(Debug, Deserialize)]
pub struct ReviewFeed {
    #[serde(default, deserialize_with = "one_or_many")]
    pub entry: Vec<FeedEntry>,
}

/// One review entry as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct FeedEntry {
    pub id: LabelValue,
    #[serde(rename = "im:rating")]
    pub rating: LabelValue,
    pub title: LabelValue,
    pub author: EntryAuthor,
    pub content: LabelValue,
    #[serde(rename = "im:contentType")]
    pub content_type: ContentType,
}

/// The `{"label": "..."}` wrapper the feed uses for scalar values.
#[derive(Debug, Deserialize)]
pub struct LabelValue {
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryAuthor {
    pub name: LabelValue,
}

/// Content-type metadata; the value lives in `attributes.label`.
#[derive(Debug, Deserialize)]
pub struct ContentType {
    #[serde(default)]
    pub attributes: ContentTypeAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentTypeAttributes {
    #[serde(default)]
    pub label: String,
}

/// Accepts `entry` as a list, a single bare object, or an explicit null.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<FeedEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<FeedEntry>),
        One(Box<FeedEntry>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(entries)) => entries,
        Some(OneOrMany::One(entry)) => vec![*entry],
    })
}

impl FeedEntry {
    /// Converts a wire entry into a domain [`ReviewRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidEntry`] when the id is not a 64-bit
    /// integer or the rating is not an integer in `1..=5`.
    pub fn into_record(self) -> Result<ReviewRecord, FeedError> {
        let id = self
            .id
            .label
            .parse::<i64>()
            .map_err(|e| FeedError::InvalidEntry {
                review_id: self.id.label.clone(),
                reason: format!("id is not a 64-bit integer: {e}"),
            })?;

        let rating = self
            .rating
            .label
            .parse::<u8>()
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| FeedError::InvalidEntry {
                review_id: self.id.label.clone(),
                reason: format!("rating {:?} is not an integer in 1..=5", self.rating.label),
            })?;

        Ok(ReviewRecord {
            id,
            rating,
            title: self.title.label,
            author: self.author.name.label,
            body: self.content.label,
            content_type: self.content_type.attributes.label,
        })
    }
}
