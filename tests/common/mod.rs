use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use canasta_backend::models::product::{NewObservation, NewProduct};
use canasta_backend::services::memory_store::InMemoryStore;
use canasta_backend::services::store::PriceSeriesRepository;
use canasta_backend::AppState;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory store
pub fn build_test_router(store: &InMemoryStore) -> Router {
    let store = Arc::new(store.clone());
    canasta_backend::router(AppState::new(store.clone(), store))
}

/// Store holding one product per entry, each with its (year, price, quantity) observations
#[allow(dead_code)]
pub async fn seed_store(products: &[&[(i32, Decimal, i32)]]) -> InMemoryStore {
    let store = InMemoryStore::new();

    for (i, observations) in products.iter().enumerate() {
        let product = store
            .insert_product(NewProduct {
                name: format!("Producto {}", i + 1),
                unit_of_measure: "kg".to_string(),
                category: None,
            })
            .await
            .expect("insert product");

        for (year, price, quantity) in observations.iter() {
            store
                .insert_observation(NewObservation {
                    product_id: product.id,
                    year: *year,
                    price: *price,
                    quantity_consumed: *quantity,
                })
                .await
                .expect("insert observation");
        }
    }

    store
}

/// Send a request and decode the JSON body (Null for empty bodies)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}
