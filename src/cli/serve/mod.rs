//! Development server: static output plus the newsletter endpoint.
//!
//! Every route except `POST /api/newsletter` is read-only static file
//! serving of the built output directory. The newsletter route is the
//! single external integration: it forwards the posted email through
//! [`NewsletterProxy`] and reports `{"success":true}` or `{"error":...}`.

mod response;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde_json::json;
use tiny_http::{Method, Request, Server};

use crate::config::SiteConfig;
use crate::log;
use crate::newsletter::NewsletterProxy;
use response::{respond_empty, respond_json, respond_static};

/// Bind and run the server until Ctrl+C (blocking).
pub fn run(config: &SiteConfig) -> Result<()> {
    let addr = SocketAddr::new(config.serve.interface, config.serve.port);
    let server =
        Arc::new(Server::http(addr).map_err(|e| anyhow!("failed to bind {addr}: {e}"))?);
    let proxy = Arc::new(NewsletterProxy::new(config.newsletter.clone()));
    let output_dir = Arc::new(config.output_dir());

    // Ctrl+C unblocks incoming_requests() so the loop drains and returns
    {
        let server = Arc::clone(&server);
        ctrlc::set_handler(move || server.unblock())?;
    }

    log!("serve"; "http://{addr}");

    // Thread pool so a slow upstream newsletter call cannot block page loads
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build()?;

    for request in server.incoming_requests() {
        let proxy = Arc::clone(&proxy);
        let output_dir = Arc::clone(&output_dir);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &output_dir, &proxy) {
                log!("serve"; "request error: {e}");
            }
        });
    }

    log!("serve"; "shutting down");
    Ok(())
}

/// Handle a single HTTP request.
fn handle_request(request: Request, output_dir: &Path, proxy: &NewsletterProxy) -> Result<()> {
    let route = request.url().split(['?', '#']).next().unwrap_or("/");

    match (request.method().clone(), route) {
        (Method::Post, "/api/newsletter") => handle_newsletter(request, proxy),
        (Method::Get | Method::Head, _) => respond_static(request, output_dir),
        _ => respond_empty(request, 405, crate::utils::mime::types::PLAIN),
    }
}

/// Expected body of a subscription request. A missing `email` key is
/// treated the same as an empty one.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubscribeBody {
    email: String,
}

fn handle_newsletter(mut request: Request, proxy: &NewsletterProxy) -> Result<()> {
    let body: SubscribeBody =
        serde_json::from_reader(request.as_reader()).unwrap_or_default();

    match proxy.subscribe(&body.email) {
        Ok(()) => respond_json(request, 200, &json!({ "success": true })),
        Err(e) => {
            // Detail stays in the server log; the caller gets the category
            log!("newsletter"; "subscribe failed: {e}");
            let status = if e.is_client_error() { 400 } else { 500 };
            respond_json(request, status, &json!({ "error": e.to_string() }))
        }
    }
}
