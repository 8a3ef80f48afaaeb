//! Email sink: SMTP delivery of one message per new review.

use std::path::Path;

use anyhow::Context;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;

use reviewwatch_core::{AppId, NewReviewEvent};

/// Connection and addressing parameters for outbound review emails, read
/// from the YAML file passed with `--config`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub receiver: String,
    pub from: String,
}

impl EmailConfig {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read email config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("email config {} is not valid YAML", path.display()))?;
        Ok(config)
    }
}

/// Sends one email describing a new review.
///
/// Subject: `New review for <app name>: (<rating>): <title>`.
pub(crate) async fn send_review(
    config: &EmailConfig,
    event: &NewReviewEvent,
    app_id: &AppId,
    app_name: &str,
) -> anyhow::Result<()> {
    let review = &event.review;
    let subject = format!(
        "New review for {app_name}: ({}): {}",
        review.rating, review.title
    );

    let message = Message::builder()
        .from(
            config
                .from
                .parse::<Mailbox>()
                .context("invalid 'from' address in email config")?,
        )
        .to(config
            .receiver
            .parse::<Mailbox>()
            .context("invalid 'receiver' address in email config")?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html_body(event, app_id))?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        .with_context(|| format!("could not configure SMTP relay {}", config.host))?
        .port(config.port)
        .credentials(Credentials::new(config.user.clone(), config.password.clone()))
        .build();

    transport
        .send(message)
        .await
        .with_context(|| format!("sending notification for review {} failed", review.id))?;
    tracing::debug!(review_id = review.id, "sent review email");
    Ok(())
}

/// HTML body: star rating, author, title, body, and a link to the App Store
/// Connect ratings page for the app.
fn html_body(event: &NewReviewEvent, app_id: &AppId) -> String {
    let review = &event.review;
    let stars = "⭐".repeat(usize::from(review.rating));
    format!(
        "<html><head></head><body>\
         <p>Rating: {stars}</p>\
         <p>{}: <b>{}</b></p>\
         <p>{}</p>\
         <p><a href=\"https://appstoreconnect.apple.com/WebObjects/iTunesConnect.woa/ra/ng/app/{app_id}/activity/ios/ratingsResponses\">Open App Store Connect Reviews Page</a></p>\
         </body></html>",
        review.author, review.title, review.body
    )
}

#[cfg(test)]
mod tests {
    use reviewwatch_core::ReviewRecord;

    use super::*;

    fn event() -> NewReviewEvent {
        NewReviewEvent {
            review: ReviewRecord {
                id: 901,
                rating: 3,
                title: "Mixed feelings".to_owned(),
                author: "bob".to_owned(),
                body: "Good but drains battery.".to_owned(),
                content_type: "Application".to_owned(),
            },
        }
    }

    #[test]
    fn html_body_renders_stars_author_and_deep_link() {
        let app_id = AppId::parse("284882215").unwrap();
        let body = html_body(&event(), &app_id);

        assert!(body.contains("⭐⭐⭐"), "three stars for a rating of 3");
        assert!(!body.contains("⭐⭐⭐⭐"), "no fourth star");
        assert!(body.contains("bob: <b>Mixed feelings</b>"));
        assert!(body.contains("Good but drains battery."));
        assert!(body.contains(
            "https://appstoreconnect.apple.com/WebObjects/iTunesConnect.woa/ra/ng/app/284882215/activity/ios/ratingsResponses"
        ));
    }

    #[test]
    fn email_config_parses_yaml() {
        let yaml = "\
host: smtp.example.com
port: 587
user: watcher
password: hunter2
receiver: team@example.com
from: noreply@example.com
";
        let config: EmailConfig = serde_yaml::from_str(yaml).expect("config should parse");
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 587);
        assert_eq!(config.receiver, "team@example.com");
    }
}
