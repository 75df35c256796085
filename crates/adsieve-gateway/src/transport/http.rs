//! HTTP handlers for the intercept hook and list management.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use adsieve_core::error::{AdsieveError, ClientCode};
use adsieve_core::AdvertiseInfo;

use crate::app_state::AppState;
use crate::dispatch::ReplySink;
use crate::lists::ListKind;
use crate::pipeline::Interceptor;

/// Response header carrying the verdict label.
pub const VERDICT_HEADER: HeaderName = HeaderName::from_static("x-adsieve-verdict");

/// Error wrapper rendering `{"error": CODE, "message": ...}`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AdsieveError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::Malformed => StatusCode::BAD_REQUEST,
            ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ClientCode::Storage | ClientCode::UnsupportedVersion | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Run store-touching work off the async workers; the file store does
/// synchronous I/O.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> adsieve_core::Result<T> + Send + 'static,
{
    let res = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AdsieveError::Internal(format!("blocking task failed: {e}")))?;
    Ok(res?)
}

/// `POST /v1/intercept`: raw request bytes in, (possibly stripped) bytes out.
pub async fn intercept(State(app): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let interceptor = app.interceptor();
    let outcome = blocking(move || Ok(interceptor.handle(body))).await?;

    let (sink, rx) = ReplySink::new();
    let outcome = Interceptor::dispatch(outcome, &sink).await?;
    let payload = rx
        .await
        .map_err(|_| AdsieveError::Internal("reply sink dropped".into()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/x-protobuf"),
            (VERDICT_HEADER, outcome.label()),
        ],
        payload,
    )
        .into_response())
}

/// `GET /v1/lists`
pub async fn get_lists(State(app): State<AppState>) -> Result<Json<AdvertiseInfo>, ApiError> {
    let lists = app.lists();
    Ok(Json(blocking(move || lists.snapshot()).await?))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListEntry {
    pub field: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ListUpdate {
    pub list: &'static str,
    pub field: String,
    pub added: bool,
}

/// `POST /v1/lists/allow`
pub async fn allow(
    State(app): State<AppState>,
    Json(entry): Json<ListEntry>,
) -> Result<Json<ListUpdate>, ApiError> {
    append(&app, ListKind::Allow, entry).await
}

/// `POST /v1/lists/deny`
pub async fn deny(
    State(app): State<AppState>,
    Json(entry): Json<ListEntry>,
) -> Result<Json<ListUpdate>, ApiError> {
    append(&app, ListKind::Deny, entry).await
}

async fn append(
    app: &AppState,
    kind: ListKind,
    entry: ListEntry,
) -> Result<Json<ListUpdate>, ApiError> {
    let lists = app.lists();
    let field = entry.field;
    let (added, field) = blocking(move || {
        let added = lists.append(kind, &field)?;
        Ok((added, field))
    })
    .await?;
    if added {
        app.metrics().list_updates.inc(&[("list", kind.as_str())]);
    }
    Ok(Json(ListUpdate {
        list: kind.as_str(),
        field,
        added,
    }))
}
