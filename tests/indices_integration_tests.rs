mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

use crate::common::{build_test_router, seed_store, send};

/// Single product: base 10 x 5, current 12 x 6
#[tokio::test]
async fn test_laspeyres_paasche_fisher_sequence() {
    let store = seed_store(&[&[(2020, dec!(10), 5), (2021, dec!(12), 6)]]).await;
    let app = build_test_router(&store);

    let (status, json) = send(&app, "POST", "/indices/laspeyres/2020/2021", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["indice"].as_f64(), Some(120.0));
    assert_eq!(json["interpretacion"], "Inflacion");

    let (status, json) = send(&app, "POST", "/indices/paasche/2020/2021", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["indice"].as_f64(), Some(120.0));
    assert_eq!(json["interpretacion"], "Inflacion");

    let (status, json) = send(&app, "POST", "/indices/fisher/2020/2021", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["indice"].as_f64(), Some(120.0));
    assert_eq!(json["interpretacion"], "Inflación");
}

#[tokio::test]
async fn test_fisher_before_prerequisites_is_bad_request() {
    let store = seed_store(&[&[(2020, dec!(10), 5), (2021, dec!(12), 6)]]).await;
    let app = build_test_router(&store);

    let (status, json) = send(&app, "POST", "/indices/fisher/2020/2021", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Debe calcular primero los índices Laspeyres y Paasche para el mismo periodo."
    );

    // Still missing Paasche
    send(&app, "POST", "/indices/laspeyres/2020/2021", None).await;
    let (status, _) = send(&app, "POST", "/indices/fisher/2020/2021", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_falling_prices_are_deflation() {
    let store = seed_store(&[
        &[(2020, dec!(20), 2), (2021, dec!(15), 2)],
        &[(2020, dec!(5), 4), (2021, dec!(5), 4)],
    ])
    .await;
    let app = build_test_router(&store);

    // (15*2 + 5*4) / (20*2 + 5*4) * 100 = 83.33
    let (status, json) = send(&app, "POST", "/indices/laspeyres/2020/2021", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["indice"].as_f64(), Some(83.33));
    assert_eq!(json["interpretacion"], "Deflacion");
}

#[tokio::test]
async fn test_empty_basket_yields_zero() {
    let store = seed_store(&[]).await;
    let app = build_test_router(&store);

    let (status, json) = send(&app, "POST", "/indices/paasche/2020/2021", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["indice"].as_f64(), Some(0.0));
    assert_eq!(json["interpretacion"], "Deflacion");
}

#[tokio::test]
async fn test_compare_returns_every_stored_record() {
    let store = seed_store(&[&[(2020, dec!(10), 5), (2021, dec!(12), 6)]]).await;
    let app = build_test_router(&store);

    send(&app, "POST", "/indices/laspeyres/2020/2021", None).await;
    send(&app, "POST", "/indices/laspeyres/2020/2021", None).await;
    send(&app, "POST", "/indices/paasche/2020/2021", None).await;
    send(&app, "POST", "/indices/fisher/2020/2021", None).await;

    let (status, json) = send(&app, "GET", "/indices/comparar/2020/2021", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 4);

    let kinds: Vec<&str> = entries.iter().map(|e| e["tipo"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["Laspeyres", "Laspeyres", "Paasche", "Fisher"]);

    let first = &entries[0];
    assert_eq!(first["valor"].as_f64(), Some(120.0));
    assert_eq!(first["diferencia"].as_f64(), Some(20.0));
    assert_eq!(
        first["interpretacion"],
        "Los precios agregados (Laspeyres) tuvieron un aumento del 20.00% usando cantidades del año base como ponderación."
    );
    assert_eq!(first["formula"], "Formula: ∑(Pₜ × Q₀) / ∑(P₀ × Q₀) × 100");

    let (_, json) = send(&app, "GET", "/indices/comparar/2021/2022", None).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_formula_lookup() {
    let store = seed_store(&[]).await;
    let app = build_test_router(&store);

    let (status, json) = send(&app, "GET", "/indices/formula/fisher", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["formula"], "Formula: √(Laspeyres × Paasche)");

    let (_, json) = send(&app, "GET", "/indices/formula/carli", None).await;
    assert_eq!(json["tipo"], "carli");
    assert_eq!(json["formula"], "Formula no disponible");
}

#[tokio::test]
async fn test_overflowing_basket_is_unprocessable() {
    let store = seed_store(&[
        &[(2020, dec!(0.0001), 1), (2021, dec!(99999999999999.9999), 1)],
        &[(2020, dec!(0), 2_000_000_000), (2021, dec!(99999999999999.9999), 2_000_000_000)],
    ])
    .await;
    let app = build_test_router(&store);

    let (status, json) = send(&app, "POST", "/indices/laspeyres/2020/2021", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("overflowed"));

    let (_, json) = send(&app, "GET", "/indices/comparar/2020/2021", None).await;
    assert_eq!(json, json!([]));
}
