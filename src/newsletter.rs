//! Newsletter subscription proxy.
//!
//! A thin pass-through to the third-party subscriber API: validate that an
//! email was supplied, forward it with the server-held credential, and map
//! the upstream status to success or failure. No retries, no backoff - a
//! duplicate subscribe is the upstream service's problem, not ours.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::json;
use thiserror::Error;

use crate::config::NewsletterConfig;
use crate::debug;

/// Errors from a subscription attempt.
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// The request carried no email. Client error; no upstream call is made.
    #[error("email is a required field")]
    MissingEmail,

    /// Upstream answered with a non-success status.
    #[error("upstream subscriber API returned status {0}")]
    Upstream(u16),

    /// Upstream unreachable or the request failed in transit.
    #[error("failed to reach upstream subscriber API")]
    Transport(#[from] reqwest::Error),
}

impl NewsletterError {
    /// Whether this should surface as a client error (4xx) rather than a
    /// generic server error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingEmail)
    }
}

/// Stateless forwarder to the subscriber API.
///
/// Configuration is injected at construction; the proxy reads no process
/// environment, which keeps it testable against a fake endpoint.
pub struct NewsletterProxy {
    config: NewsletterConfig,
    client: Client,
}

impl NewsletterProxy {
    pub fn new(config: NewsletterConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Forward one subscription request upstream.
    ///
    /// 200/201 from upstream counts as success; anything else is an
    /// [`NewsletterError::Upstream`] with the detail logged server-side
    /// only, so upstream internals never leak to the caller.
    pub fn subscribe(&self, email: &str) -> Result<(), NewsletterError> {
        if email.trim().is_empty() {
            return Err(NewsletterError::MissingEmail);
        }

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&json!({ "email": email }));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        match status {
            200 | 201 => Ok(()),
            _ => {
                let detail = response.text().unwrap_or_default();
                debug!("newsletter"; "upstream {status}: {detail}");
                Err(NewsletterError::Upstream(status))
            }
        }
    }
}
