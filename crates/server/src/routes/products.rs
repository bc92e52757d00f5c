use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use models::product::{Model as Product, ProductInput};
use serde::{Deserialize, Serialize};
use service::errors::ServiceError;
use tracing::{debug, info, warn};

use crate::{errors::JsonApiError, state::AppState};

/// Confirmation returned by a successful delete.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses((status = 200, description = "All products", body = [crate::openapi::ProductDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let products = state.products.list_products().await?;
    info!(count = products.len(), "products listed");
    for p in &products {
        debug!(product = ?p, "listed product");
    }
    Ok(Json(products))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Created, with assigned productId", body = crate::openapi::ProductDoc),
        (status = 400, description = "Malformed body", body = crate::errors::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let Json(input) = payload?;
    info!(product = ?input, "product to add");
    let created = state.products.save_product(input.without_id()).await?;
    info!(product_id = created.product_id, "product created");
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ProductDoc),
        (status = 404, description = "Product not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let Path(id) = path?;
    let product = state
        .products
        .find_product_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Product"))?;
    Ok(Json(product))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Malformed body", body = crate::errors::ErrorBody),
        (status = 404, description = "ProductID not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let Path(id) = path?;
    let Json(changes) = payload?;
    let existing = state
        .products
        .find_product_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found_id("ProductID", id))?;

    // only description, price and quantity come from the payload
    let merged = existing.merge(changes);
    let saved = state.products.save_product(merged.into()).await?;
    info!(product_id = saved.product_id, "product updated");
    Ok(Json(saved))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted", body = DeleteResponse),
        (status = 404, description = "ProductID not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeleteResponse>, JsonApiError> {
    let Path(id) = path?;
    let existing = state
        .products
        .find_product_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found_id("ProductID", id))?;

    let removed = state.products.delete_product_by_id(existing.product_id).await?;
    if removed {
        info!(product_id = existing.product_id, "product deleted");
    } else {
        warn!(product_id = existing.product_id, "product already gone at delete time");
    }
    Ok(Json(DeleteResponse { deleted: true }))
}
