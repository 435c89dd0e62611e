//! Request handlers for `/{path}`.
//!
//! `GET` serves the stored body, `POST` stores a JSON value, `PUT` stores
//! the raw request body, `DELETE` removes the value.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Json, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pathstore_types::{PathKey, StoredValue, DEFAULT_BINARY_CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Body of a `POST` write.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WriteRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_type: String,
    /// Standard base64; when present it becomes the binary payload.
    #[serde(default)]
    pub data: Option<String>,
}

impl WriteRequest {
    fn into_value(self) -> ServerResult<StoredValue> {
        let binary_data = self
            .data
            .map(|encoded| STANDARD.decode(encoded))
            .transpose()
            .map_err(|_| ServerError::Validation("Invalid JSON".into()))?;
        Ok(StoredValue {
            text_content: self.content,
            content_type: self.content_type,
            binary_data,
        })
    }
}

/// Body of a successful write or delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl WriteResponse {
    fn success(message: String) -> Self {
        Self {
            status: "success".into(),
            message,
            size: None,
        }
    }
}

fn path_key(raw: String) -> ServerResult<PathKey> {
    PathKey::new(raw).map_err(|_| ServerError::Validation("Path is required".into()))
}

/// Requests to `/` carry no path.
pub async fn missing_path() -> ServerError {
    ServerError::Validation("Path is required".into())
}

/// `GET /{path}`: stored body with the stored content type.
pub async fn get_value(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ServerResult<Response> {
    let key = path_key(raw)?;
    let value = state.with_store(move |store| store.get(&key)).await??;

    let content_type = HeaderValue::from_str(&value.content_type).map_err(|e| {
        ServerError::Internal(format!("stored content type is not a valid header: {e}"))
    })?;
    let mut response = value.into_body().into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    Ok(response)
}

/// `POST /{path}`: JSON `{"content": ..., "content_type": ..., "data": ...}`.
pub async fn post_value(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> ServerResult<Json<WriteResponse>> {
    let key = path_key(raw)?;
    let request: WriteRequest = serde_json::from_slice(&body)
        .map_err(|_| ServerError::Validation("Invalid JSON".into()))?;
    if request.content_type.is_empty() {
        return Err(ServerError::Validation("content_type is required".into()));
    }

    let value = request.into_value()?;
    let message = format!("Data stored at path: {key}");
    state
        .with_store(move |store| store.put(&key, &value))
        .await?
        .map_err(ServerError::store_failure("Failed to store data"))?;

    info!(%message, "stored json value");
    Ok(Json(WriteResponse::success(message)))
}

/// `PUT /{path}`: raw body, content type from the request header.
pub async fn put_value(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ServerResult<Json<WriteResponse>> {
    let key = path_key(raw)?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| DEFAULT_BINARY_CONTENT_TYPE.to_string());

    let size = body.len();
    let value = StoredValue::binary(body.to_vec(), content_type);
    let message = format!("Data stored at path: {key}");
    state
        .with_store(move |store| store.put(&key, &value))
        .await?
        .map_err(ServerError::store_failure("Failed to store data"))?;

    info!(%message, size, "stored raw value");
    Ok(Json(WriteResponse {
        size: Some(format!("{size} bytes")),
        ..WriteResponse::success(message)
    }))
}

/// `DELETE /{path}`: 404 if nothing is stored there.
pub async fn delete_value(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ServerResult<Json<WriteResponse>> {
    let key = path_key(raw)?;

    let existing = key.clone();
    state.with_store(move |store| store.get(&existing)).await??;

    let message = format!("Data deleted at path: {key}");
    state
        .with_store(move |store| store.delete(&key))
        .await?
        .map_err(ServerError::store_failure("Failed to delete data"))?;

    info!(%message, "deleted value");
    Ok(Json(WriteResponse::success(message)))
}
