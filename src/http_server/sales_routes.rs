//! Sales HTTP Routes
//!
//! CRUD endpoints for the sales record table under `/penjualan`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::observability::{Logger, MetricsRegistry};
use crate::sales::{
    validate_fields, validate_patch, FieldViolation, SalesError, SalesId, SalesRecord, SalesStore,
};

// ==================
// Shared State
// ==================

/// Sales state shared across handlers
pub struct SalesState {
    pub store: SalesStore,
    pub metrics: Arc<MetricsRegistry>,
}

impl SalesState {
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            store: SalesStore::new(),
            metrics,
        }
    }
}

impl Default for SalesState {
    fn default() -> Self {
        Self::new(Arc::new(MetricsRegistry::new()))
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type ErrorReply = (StatusCode, Json<Value>);
type ApiResult<T> = Result<(StatusCode, Json<T>), ErrorReply>;

// ==================
// Sales Routes
// ==================

/// Create sales routes
pub fn sales_routes(state: Arc<SalesState>) -> Router {
    Router::new()
        .route(
            "/penjualan",
            get(list_handler)
                .post(create_handler)
                .delete(clear_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/penjualan/:id",
            put(replace_handler)
                .patch(patch_handler)
                .delete(delete_handler)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Decode a request body into a JSON object.
///
/// The body is parsed whatever its content type. An empty body is an empty
/// object so that every required field reports as missing.
fn decode_body(body: &Bytes) -> Result<Map<String, Value>, SalesError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(SalesError::Validation(vec![FieldViolation::new(
            "body",
            "",
            "request body must be a JSON object",
        )])),
    }
}

/// Ids that are not a base-10 integer match no record.
///
/// Stricter than prefix parsing: `1abc` and `1.5` do not resolve to record 1.
fn parse_id(raw: &str) -> Result<SalesId, SalesError> {
    raw.parse::<SalesId>().map_err(|_| SalesError::NotFound)
}

/// Map an error to its reply, counting and logging it on the way
fn reject(state: &SalesState, op: &str, err: SalesError) -> ErrorReply {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match &err {
        SalesError::Validation(violations) => {
            state.metrics.increment_validation_failures();
            let count = violations.len().to_string();
            Logger::warn("VALIDATION_REJECTED", &[("op", op), ("violations", count.as_str())]);
            json!({ "errors": violations })
        }
        SalesError::NotFound => {
            state.metrics.increment_not_found();
            json!({ "message": err.to_string() })
        }
        SalesError::StorageError(detail) => {
            Logger::error("STORE_LOCK_POISONED", &[("op", op), ("detail", detail.as_str())]);
            json!({ "message": "internal server error" })
        }
    };

    (status, Json(body))
}

/// Reply for a body that could not be buffered, e.g. over the size limit
fn reject_body(op: &str, rejection: BytesRejection) -> ErrorReply {
    let status = rejection.status();
    Logger::warn(
        "REQUEST_BODY_REJECTED",
        &[("op", op), ("status", status.as_str())],
    );

    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "request body too large".to_string()
    } else {
        rejection.body_text()
    };

    (status, Json(json!({ "message": message })))
}

// ==================
// Handlers
// ==================

async fn list_handler(State(state): State<Arc<SalesState>>) -> ApiResult<Value> {
    let records = state.store.list().map_err(|e| reject(&state, "list", e))?;

    if records.is_empty() {
        return Ok((StatusCode::OK, Json(json!(MessageResponse::new("no sales data")))));
    }

    Ok((StatusCode::OK, Json(json!(records))))
}

async fn create_handler(
    State(state): State<Arc<SalesState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<SalesRecord> {
    let body = body.map_err(|e| reject_body("create", e))?;
    let fields = decode_body(&body)
        .and_then(|map| validate_fields(&map))
        .map_err(|e| reject(&state, "create", e))?;

    let record = state
        .store
        .create(fields)
        .map_err(|e| reject(&state, "create", e))?;

    state.metrics.increment_created();
    Logger::info("SALES_RECORD_CREATED", &[("id", record.id.to_string().as_str())]);

    Ok((StatusCode::CREATED, Json(record)))
}

async fn replace_handler(
    State(state): State<Arc<SalesState>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<SalesRecord> {
    let body = body.map_err(|e| reject_body("replace", e))?;

    // Validation is reported before the id is looked up
    let record = decode_body(&body)
        .and_then(|map| validate_fields(&map))
        .and_then(|fields| state.store.replace(parse_id(&id)?, fields))
        .map_err(|e| reject(&state, "replace", e))?;

    state.metrics.increment_replaced();
    Logger::info("SALES_RECORD_REPLACED", &[("id", record.id.to_string().as_str())]);

    Ok((StatusCode::OK, Json(record)))
}

async fn patch_handler(
    State(state): State<Arc<SalesState>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<SalesRecord> {
    let body = body.map_err(|e| reject_body("patch", e))?;
    let record = decode_body(&body)
        .and_then(|map| validate_patch(&map))
        .and_then(|patch| state.store.patch(parse_id(&id)?, patch))
        .map_err(|e| reject(&state, "patch", e))?;

    state.metrics.increment_patched();
    Logger::info("SALES_RECORD_PATCHED", &[("id", record.id.to_string().as_str())]);

    Ok((StatusCode::OK, Json(record)))
}

async fn delete_handler(
    State(state): State<Arc<SalesState>>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let record = parse_id(&id)
        .and_then(|id| state.store.delete(id))
        .map_err(|e| reject(&state, "delete", e))?;

    state.metrics.increment_deleted();
    Logger::info("SALES_RECORD_DELETED", &[("id", record.id.to_string().as_str())]);

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("sales data successfully deleted")),
    ))
}

async fn clear_handler(State(state): State<Arc<SalesState>>) -> ApiResult<MessageResponse> {
    let removed = state.store.clear().map_err(|e| reject(&state, "clear", e))?;

    state.metrics.increment_clears();
    Logger::info("SALES_STORE_CLEARED", &[("removed", removed.to_string().as_str())]);

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("all sales data has been deleted")),
    ))
}

async fn method_not_allowed() -> ErrorReply {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "method not allowed" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_body() {
        assert!(decode_body(&Bytes::new()).unwrap().is_empty());
        assert!(decode_body(&Bytes::from_static(b"  \n")).unwrap().is_empty());
    }

    #[test]
    fn test_decode_object_body() {
        let map = decode_body(&Bytes::from_static(br#"{"namaBarang":"Pen"}"#)).unwrap();
        assert_eq!(map["namaBarang"], "Pen");
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        let cases: [&[u8]; 3] = [b"[1,2]", b"\"text\"", b"{not json"];
        for raw in cases {
            match decode_body(&Bytes::copy_from_slice(raw)) {
                Err(SalesError::Validation(v)) => assert_eq!(v[0].path, "body"),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert!(matches!(parse_id("abc"), Err(SalesError::NotFound)));
        assert!(matches!(parse_id("-1"), Err(SalesError::NotFound)));
        assert!(matches!(parse_id("1.5"), Err(SalesError::NotFound)));
    }

    #[test]
    fn test_reject_validation_shape() {
        let state = SalesState::default();
        let (status, Json(body)) = reject(
            &state,
            "create",
            SalesError::Validation(vec![FieldViolation::new("namaPembeli", "", "required")]),
        );

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["path"], "namaPembeli");
        assert_eq!(state.metrics.snapshot(0).validation_failures, 1);
    }

    #[test]
    fn test_reject_storage_error_is_generic() {
        let state = SalesState::default();
        let (status, Json(body)) = reject(
            &state,
            "list",
            SalesError::StorageError("Lock poisoned".into()),
        );

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }
}
