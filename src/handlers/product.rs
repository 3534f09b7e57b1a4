use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use sea_orm::DbErr;
use tracing::{error, info};

use crate::models::error::ErrorResponse;
use crate::models::product::{NewObservation, NewProduct, Observation, Product};
use crate::AppState;

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn database_error(e: DbErr) -> HandlerError {
    error!(error = %e, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Database error: {}", e),
        }),
    )
}

fn bad_request(message: String) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, HandlerError> {
    let products = state
        .repository
        .list_products()
        .await
        .map_err(database_error)?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, HandlerError> {
    let product = state
        .repository
        .find_product(id)
        .await
        .map_err(database_error)?;

    product.map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Product {} not found", id),
            }),
        )
    })
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), HandlerError> {
    payload.validate().map_err(bad_request)?;

    let product = state
        .repository
        .insert_product(payload)
        .await
        .map_err(database_error)?;

    info!(id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_prices(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<Vec<Observation>>, HandlerError> {
    let observations = state
        .repository
        .list_observations(product_id)
        .await
        .map_err(database_error)?;

    Ok(Json(observations))
}

pub async fn create_price(
    State(state): State<AppState>,
    Json(payload): Json<NewObservation>,
) -> Result<(StatusCode, HeaderMap, Json<Observation>), HandlerError> {
    payload.validate().map_err(bad_request)?;

    let observation = state
        .repository
        .insert_observation(payload)
        .await
        .map_err(database_error)?;

    info!(
        id = observation.id,
        product_id = observation.product_id,
        year = observation.year,
        "Price observation created"
    );

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/precios/{}", observation.id)) {
        headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(observation)))
}
