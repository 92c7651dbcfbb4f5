//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, ProbeQuery, PropertyRecord};
use crate::error::ExportError;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// `GET /classes` → 200 + class names in declaration order
pub async fn list_classes(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .reader
            .list_element_classes()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

/// `GET /classes/{class}/properties` → 200 + property names, or 404
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    Path(class): Path<String>,
) -> ApiResult<Vec<String>> {
    let properties = state
        .reader
        .list_element_properties(&class)
        .map_err(error_response)?;
    Ok(Json(properties.into_iter().map(str::to_string).collect()))
}

/// `GET /classes/{class}/properties/{property}` → 200 + `PropertyRecord`, or 404
///
/// `?name=bus2&value=1.1` adds `store_name` / `store_value` to the record.
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path((class, property)): Path<(String, String)>,
    Query(probe): Query<ProbeQuery>,
) -> ApiResult<PropertyRecord> {
    let prop = state
        .reader
        .get_element_property(&class, &property)
        .map_err(error_response)?;

    let mut record = PropertyRecord::from(prop);
    record.store_name = probe.name.as_deref().map(|n| prop.should_store_name(n));
    record.store_value = probe.value.map(|v| prop.should_store_value(v));
    Ok(Json(record))
}

/// `GET /publications` → 200 + publication list
pub async fn list_publications(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.reader.publication_list().to_vec())
}

fn error_response(err: ExportError) -> (StatusCode, Json<ErrorResponse>) {
    let status = if err.is_invalid_parameter() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
