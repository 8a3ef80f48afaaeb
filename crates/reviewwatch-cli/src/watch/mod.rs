//! The reconciliation pass: fetch, merge, seen-store check, events.

use reviewwatch_core::{AppId, NewReviewEvent};
use reviewwatch_feed::{fetch_recent_reviews_all_storefronts, FeedClient};
use reviewwatch_store::SeenStore;

/// Finds the reviews that have never been reported for this app.
///
/// Fetches and merges every storefront feed, then walks the merged set in
/// ascending review-id order, recording each id in the seen store. Only ids
/// the store had not recorded before produce an event, so repeated runs over
/// an unchanged feed produce nothing. Events come back ordered by review id.
///
/// # Errors
///
/// Returns an error if any storefront fetch fails (the whole run aborts, see
/// [`fetch_recent_reviews_all_storefronts`]) or if the seen store cannot be
/// written.
pub(crate) async fn find_new_reviews(
    client: &FeedClient,
    store: &SeenStore,
    app_id: &AppId,
    max_concurrent_storefronts: usize,
) -> anyhow::Result<Vec<NewReviewEvent>> {
    let candidates =
        fetch_recent_reviews_all_storefronts(client, app_id, max_concurrent_storefronts).await?;
    tracing::debug!(app_id = %app_id, candidates = candidates.len(), "merged storefront feeds");

    let mut events = Vec::new();
    for (_, review) in candidates {
        if store.try_mark_seen(review.id).await? {
            tracing::info!(review_id = review.id, rating = review.rating, "new review");
            events.push(NewReviewEvent { review });
        }
    }

    Ok(events)
}

#[cfg(test)]
#[path = "watch_test.rs"]
mod tests;
