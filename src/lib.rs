// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::index_engine::IndexEngine;
use services::store::{IndexStore, PriceSeriesRepository};

#[derive(Clone)]
pub struct AppState {
    pub engine: IndexEngine,
    pub repository: Arc<dyn PriceSeriesRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn PriceSeriesRepository>, index_store: Arc<dyn IndexStore>) -> Self {
        Self {
            engine: IndexEngine::new(repository.clone(), index_store),
            repository,
        }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod computed_indices;
    pub mod prices;
    pub mod products;
}

pub mod services {
    pub mod store;
    pub mod sea_orm_store;
    pub mod memory_store;
    pub mod index_calculator;
    pub mod interpretation;
    pub mod comparison;
    pub mod index_engine;
}

pub mod models {
    pub mod error;
    pub mod index;
    pub mod product;
}

pub mod handlers {
    pub mod index;
    pub mod product;
}

pub mod config;
pub mod error;

async fn hello_canasta() -> &'static str {
    "Hello from Canasta price index backend!"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_canasta))
        .route(
            "/productos",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route("/productos/{id}", get(handlers::product::get_product))
        .route("/precios", post(handlers::product::create_price))
        .route("/precios/{producto_id}", get(handlers::product::list_prices))
        .route(
            "/indices/laspeyres/{anio_base}/{anio_actual}",
            post(handlers::index::compute_laspeyres),
        )
        .route(
            "/indices/paasche/{anio_base}/{anio_actual}",
            post(handlers::index::compute_paasche),
        )
        .route(
            "/indices/fisher/{anio_base}/{anio_actual}",
            post(handlers::index::compute_fisher),
        )
        .route(
            "/indices/comparar/{anio_base}/{anio_actual}",
            get(handlers::index::compare_indices),
        )
        .route("/indices/formula/{tipo}", get(handlers::index::get_formula))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
