//! HTTP response handlers.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Request, Response};

use crate::utils::mime;

/// Respond with a static file from the output directory, or 404.
pub fn respond_static(request: Request, output_dir: &Path) -> Result<()> {
    match resolve(output_dir, request.url()) {
        Some(path) => respond_file(request, &path),
        None => respond_not_found(request),
    }
}

/// Map a request URL to a file under the output directory.
///
/// Directory URLs resolve to their `index.html`. Traversal segments are
/// rejected outright rather than normalized.
fn resolve(output_dir: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or("/");
    if path.split('/').any(|segment| segment == "..") {
        return None;
    }

    let mut candidate = output_dir.join(path.trim_start_matches('/'));
    if candidate.is_dir() {
        candidate = candidate.join("index.html");
    }
    candidate.is_file().then_some(candidate)
}

/// Respond with a file's contents and detected MIME type.
fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if *request.method() == Method::Head {
        return respond_empty(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let response = Response::from_data(body)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());
    request.respond(response)?;
    Ok(())
}

/// Respond with a JSON body.
pub fn respond_json(request: Request, status: u16, body: &serde_json::Value) -> Result<()> {
    let response = Response::from_string(body.to_string())
        .with_status_code(status)
        .with_header(Header::from_bytes("Content-Type", mime::types::JSON).unwrap());
    request.respond(response)?;
    Ok(())
}

/// Respond with a plain 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    let response = Response::from_string("404 Not Found")
        .with_status_code(404)
        .with_header(Header::from_bytes("Content-Type", mime::types::PLAIN).unwrap());
    request.respond(response)?;
    Ok(())
}

/// Respond with a status code and no body.
pub fn respond_empty(request: Request, status: u16, content_type: &str) -> Result<()> {
    let response = Response::empty(status)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());
    request.respond(response)?;
    Ok(())
}
