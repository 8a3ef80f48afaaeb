//! Fan-out fetch across every storefront, merged into one candidate map.

use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};

use reviewwatch_core::{AppId, ReviewRecord};

use crate::client::FeedClient;
use crate::error::FeedError;
use crate::storefront::Storefront;

/// Fetches the most-recent-reviews feed of every supported storefront and
/// merges the results into one map keyed by review id.
///
/// A review visible from several storefronts collapses to a single entry:
/// keyed insertion with last-write-wins, which is safe because records under
/// one id are content-identical across storefronts. `BTreeMap` keys give
/// ascending-id iteration independent of fetch completion order, so the
/// merged content never depends on network timing.
///
/// Fetches run concurrently, bounded by `max_concurrent` (values below 1 are
/// clamped to 1).
///
/// **All-or-nothing semantics**: any storefront failure aborts the run and
/// discards records merged from storefronts that already completed — a
/// partial candidate set would silently hide the failed storefront's reviews
/// from deduplication.
///
/// # Errors
///
/// Propagates the first [`FeedError`] any storefront fetch returned.
pub async fn fetch_recent_reviews_all_storefronts(
    client: &FeedClient,
    app_id: &AppId,
    max_concurrent: usize,
) -> Result<BTreeMap<i64, ReviewRecord>, FeedError> {
    let max_concurrent = max_concurrent.max(1);

    let results: Vec<(Storefront, Result<Vec<ReviewRecord>, FeedError>)> =
        stream::iter(Storefront::all())
            .map(|storefront| async move {
                (
                    storefront,
                    client.fetch_recent_reviews(app_id, storefront).await,
                )
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

    let mut merged = BTreeMap::new();
    for (storefront, result) in results {
        match result {
            Ok(reviews) => {
                tracing::debug!(
                    storefront = %storefront,
                    count = reviews.len(),
                    "merged storefront feed"
                );
                for review in reviews {
                    merged.insert(review.id, review);
                }
            }
            Err(e) => {
                tracing::error!(
                    storefront = %storefront,
                    error = %e,
                    "storefront feed fetch failed — aborting run"
                );
                return Err(e);
            }
        }
    }

    Ok(merged)
}
