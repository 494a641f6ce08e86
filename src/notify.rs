// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat webhook notification.
//!
//! ```text
//! Notifier::notify(repo, sha, env, webhook)
//!        |
//!        v
//!   POST webhook  {"text": "... `0123456` ... https://github.com/<repo>/commit/<sha>"}
//!        |
//!   2xx -> Ok    other -> NetworkError::HttpError
//!
//! Global client: OnceLock, connection pool, keep-alive
//! ```

use crate::error::{NetworkError, TriggerResult};
use reqwest::{Client, Url};
use serde::Serialize;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Number of revision characters shown in messages.
pub const SHORT_REVISION_LEN: usize = 7;

/// Global HTTP client - initialized once, reused for every notification.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!(
                "orchestrator-trigger/{}",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// First characters of a revision, as shown in chat.
#[must_use]
pub fn short_revision(revision: &str) -> &str {
    revision
        .char_indices()
        .nth(SHORT_REVISION_LEN)
        .map_or(revision, |(end, _)| &revision[..end])
}

/// Link to a commit on GitHub.
#[must_use]
pub fn commit_url(repository: &str, revision: &str) -> String {
    format!("https://github.com/{repository}/commit/{revision}")
}

/// Text posted to the webhook for a dispatched run.
#[must_use]
pub fn notification_text(repository: &str, revision: &str, environment_name: &str) -> String {
    format!(
        "Triggered *{environment_name}* build of {repository} at `{}`: {}",
        short_revision(revision),
        commit_url(repository, revision)
    )
}

/// Webhook sender.
pub struct Notifier {
    client: Client,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    /// Create a notifier sharing the global HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
        }
    }

    /// Posts the run notification to `webhook_url`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the URL is invalid, the request fails, or
    /// the webhook answers with a non-success status. Nothing is retried.
    pub async fn notify(
        &self,
        repository: &str,
        revision: &str,
        environment_name: &str,
        webhook_url: &str,
    ) -> TriggerResult<()> {
        let url = Url::parse(webhook_url)
            .map_err(|e| NetworkError::InvalidUrl(format!("webhook url: {e}")))?;

        let text = notification_text(repository, revision, environment_name);
        debug!(%text, "posting notification");

        let response = self
            .client
            .post(url)
            .json(&WebhookPayload { text: &text })
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url: redact(response.url()),
            }
            .into());
        }

        info!(environment = environment_name, "notification sent");
        Ok(())
    }
}

/// Webhook URLs embed their secret in the path; keep only scheme and host.
fn redact(url: &Url) -> String {
    format!("{}://{}/...", url.scheme(), url.host_str().unwrap_or(""))
}
