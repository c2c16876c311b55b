use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use service::medicine::{AveragePrice, Catalog, NOT_FOUND_MESSAGE};

use crate::errors::ApiError;
use crate::state::ServerState;

/// Form body of `/create` and `/update`. A non-numeric price is rejected by
/// the extractor (422) before the handler runs.
#[derive(Debug, Deserialize)]
pub struct MedicineForm {
    pub name: String,
    pub price: f64,
}

/// Form body of `/delete`.
#[derive(Debug, Deserialize)]
pub struct NameForm {
    pub name: String,
}

// Misses are reported in the body with a 200, never via the status code.
fn not_found() -> Json<Value> {
    Json(json!({ "error": NOT_FOUND_MESSAGE }))
}

fn done(action: &str, name: &str) -> Json<Value> {
    Json(json!({ "message": format!("Medicine {action} successfully with name: {name}") }))
}

#[utoipa::path(get, path = "/medicines", tag = "medicines", responses((status = 200, description = "Whole medicines document", body = crate::openapi::CatalogDoc), (status = 500, description = "Data file missing or malformed", body = crate::openapi::ErrorDoc)))]
pub async fn list_all(State(state): State<ServerState>) -> Result<Json<Catalog>, ApiError> {
    let catalog = state.medicines.list_all().await?;
    debug!(count = catalog.medicines().map(Vec::len).unwrap_or_default(), "list medicines");
    Ok(Json(catalog))
}

#[utoipa::path(
    get,
    path = "/medicines/{name}",
    tag = "medicines",
    params(("name" = String, Path, description = "Exact, case-sensitive medicine name")),
    responses(
        (status = 200, description = "The first medicine with that name, or `{\"error\": \"Medicine not found\"}`", body = crate::openapi::MedicineDoc),
        (status = 500, description = "Data file missing or malformed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    match state.medicines.get_by_name(&name).await? {
        Some(med) => Ok(Json(med).into_response()),
        None => Ok(not_found().into_response()),
    }
}

#[utoipa::path(
    post,
    path = "/create",
    tag = "medicines",
    request_body(content = crate::openapi::MedicineFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Appended to the end of the list", body = crate::openapi::MessageDoc),
        (status = 422, description = "Missing field or price is not a finite number"),
        (status = 500, description = "Data file missing or malformed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Form(input): Form<MedicineForm>,
) -> Result<Json<Value>, ApiError> {
    let created = state.medicines.create(input.name, input.price).await?;
    Ok(done("created", &created.name))
}

#[utoipa::path(
    post,
    path = "/update",
    tag = "medicines",
    request_body(content = crate::openapi::MedicineFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Price of the first match replaced, or `{\"error\": \"Medicine not found\"}`", body = crate::openapi::MessageDoc),
        (status = 422, description = "Missing field or price is not a finite number"),
        (status = 500, description = "Data file missing or malformed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Form(input): Form<MedicineForm>,
) -> Result<Json<Value>, ApiError> {
    if state.medicines.update(&input.name, input.price).await? {
        Ok(done("updated", &input.name))
    } else {
        Ok(not_found())
    }
}

#[utoipa::path(
    delete,
    path = "/delete",
    tag = "medicines",
    request_body(content = crate::openapi::NameFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "First match removed, or `{\"error\": \"Medicine not found\"}`", body = crate::openapi::MessageDoc),
        (status = 500, description = "Data file missing or malformed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Form(input): Form<NameForm>,
) -> Result<Json<Value>, ApiError> {
    if state.medicines.delete(&input.name).await? {
        Ok(done("deleted", &input.name))
    } else {
        Ok(not_found())
    }
}

#[utoipa::path(get, path = "/average-price", tag = "medicines", responses((status = 200, description = "Mean of numeric prices rounded to 2 decimals; null when there are none", body = crate::openapi::AveragePriceDoc), (status = 500, description = "Data file missing or not JSON", body = crate::openapi::ErrorDoc)))]
pub async fn average_price(State(state): State<ServerState>) -> Result<Json<AveragePrice>, ApiError> {
    Ok(Json(state.medicines.average_price().await?))
}
