//! Local producer endpoint serving an existing scan file
//!
//! `GET /api/state` returns the snapshot with an `ETag` and honors
//! `If-None-Match`; `GET /api/mtime` returns the file's modification time,
//! which the sync controller uses as its freshness marker.

use crate::shared::error::DashError;
use crate::shared::Result;
use crate::system_state::services::SnapshotParser;
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const DEFAULT_SCAN_PATH: &str = ".preflight/scan.json";
pub const DEFAULT_SERVE_ADDR: &str = "127.0.0.1:8787";

struct AppState {
    scan_path: PathBuf,
}

/// Build the router (for testing without binding to a port).
pub fn router(scan_path: &Path) -> Router {
    let state = Arc::new(AppState {
        scan_path: scan_path.to_path_buf(),
    });
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/mtime", get(get_mtime))
        .with_state(state)
}

/// Binds `addr` and serves until `shutdown` resolves
pub async fn serve<F>(addr: &str, scan_path: &Path, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| DashError::BindError {
            addr: addr.to_string(),
            details: e.to_string(),
        })?;
    eprintln!("📡 Serving {} on http://{}", scan_path.display(), addr);
    serve_on(listener, scan_path, shutdown).await
}

/// Serves on an already bound listener until `shutdown` resolves
pub async fn serve_on<F>(listener: TcpListener, scan_path: &Path, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, scan = %scan_path.display(), "producer endpoint listening");
    }
    axum::serve(listener, router(scan_path))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

fn plain(status: StatusCode, message: String) -> Response {
    (status, message).into_response()
}

fn not_found(path: &Path) -> Response {
    plain(
        StatusCode::NOT_FOUND,
        format!("Scan file not found: {}. Run a scan first.", path.display()),
    )
}

/// Strong validator for a scan body: its fingerprint when present,
/// otherwise the SHA-256 of the bytes
fn entity_tag(fingerprint: Option<&str>, body: &[u8]) -> String {
    match fingerprint {
        Some(fp) => format!("\"{}\"", fp.trim_matches('"')),
        None => format!("\"{}\"", hex::encode(Sha256::digest(body))),
    }
}

/// `If-None-Match` comparison (weak comparison, lists and `*` supported)
fn matches_if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let wanted = etag.trim_start_matches("W/").trim_matches('"');
    value.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.trim_start_matches("W/").trim_matches('"') == wanted
    })
}

async fn get_state(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let body = match tokio::fs::read(&state.scan_path).await {
        Ok(body) => body,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return not_found(&state.scan_path),
        Err(e) => {
            return plain(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unable to read scan file: {}", e),
            )
        }
    };

    let snapshot = match SnapshotParser::parse(&body, None) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "refusing to serve corrupt scan file");
            return plain(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Corrupt scan file: {}", e),
            );
        }
    };

    let etag = entity_tag(snapshot.change_token(), &body);
    let Ok(etag_value) = HeaderValue::from_str(&etag) else {
        return plain(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Scan fingerprint is not a valid header value".to_string(),
        );
    };

    if matches_if_none_match(&headers, &etag) {
        return (StatusCode::NOT_MODIFIED, [(ETAG, etag_value)]).into_response();
    }

    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (ETAG, etag_value),
        ],
        body,
    )
        .into_response()
}

async fn get_mtime(State(state): State<Arc<AppState>>) -> Response {
    let modified = match tokio::fs::metadata(&state.scan_path).await {
        Ok(metadata) => metadata.modified(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return not_found(&state.scan_path),
        Err(e) => Err(e),
    };

    match modified {
        Ok(time) => {
            let timestamp =
                DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Nanos, true);
            Json(serde_json::json!({ "timestamp": timestamp })).into_response()
        }
        Err(e) => plain(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unable to read scan file metadata: {}", e),
        ),
    }
}
