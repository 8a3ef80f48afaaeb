//! Console sink: one summary line per new review.

use reviewwatch_core::NewReviewEvent;

pub(crate) fn print_review(event: &NewReviewEvent) {
    println!("{}", summary_line(event));
}

fn summary_line(event: &NewReviewEvent) -> String {
    let review = &event.review;
    format!("{}: {}: {}", review.id, review.rating, review.title)
}
