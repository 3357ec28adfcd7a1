//! Quote notification webhook
//!
//! Best-effort: the notification is fired from a spawned task after the
//! quote is persisted, and a delivery failure only produces a log line.
//! The form submission never fails because of the webhook.

use klussite_common::db::models::QuoteRequest;
use serde_json::json;
use tracing::{info, warn};

/// Fire-and-forget notification about a new quote request
pub fn spawn_quote_notification(http: reqwest::Client, webhook: String, quote: &QuoteRequest) {
    let payload = json!({
        "subject": format!("Nieuwe offerte aanvraag - {}", quote.service),
        "quote_id": quote.id,
        "name": quote.name,
        "email": quote.email,
        "phone": quote.phone,
        "service": quote.service,
        "description": quote.description,
        "submitted_date": quote.submitted_date,
    });
    let quote_id = quote.id.clone();

    tokio::spawn(async move {
        match http.post(&webhook).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                info!(quote_id = %quote_id, "Quote notification delivered");
            }
            Ok(response) => {
                warn!(
                    quote_id = %quote_id,
                    status = %response.status(),
                    "Quote notification rejected by webhook"
                );
            }
            Err(e) => {
                warn!(quote_id = %quote_id, error = %e, "Quote notification failed");
            }
        }
    });
}
