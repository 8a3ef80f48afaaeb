//! Fetching and merging App Store customer-review feeds.
//!
//! [`FeedClient`] pulls one storefront's most-recent-reviews feed;
//! [`fetch_recent_reviews_all_storefronts`] fans that out across the full
//! [`Storefront`] table and merges the results into a single candidate map
//! keyed by review id.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod storefront;
pub mod types;

mod retry;

pub use aggregate::fetch_recent_reviews_all_storefronts;
pub use client::FeedClient;
pub use error::FeedError;
pub use storefront::Storefront;
pub use types::{FeedEntry, ReviewFeedDocument};
