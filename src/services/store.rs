//! Storage collaborators of the index engine.
//!
//! The engine only talks to these traits; `SeaOrmStore` backs them with
//! Postgres and `InMemoryStore` keeps everything in process.

use sea_orm::DbErr;

use crate::models::index::{ComputedIndex, IndexKind, NewComputedIndex};
use crate::models::product::{NewObservation, NewProduct, Observation, Product};

#[async_trait::async_trait]
pub trait PriceSeriesRepository: Send + Sync {
    /// All products with their observations nested, observations in storage order.
    async fn list_products(&self) -> Result<Vec<Product>, DbErr>;

    async fn find_product(&self, id: i32) -> Result<Option<Product>, DbErr>;

    async fn list_observations(&self, product_id: i32) -> Result<Vec<Observation>, DbErr>;

    async fn insert_product(&self, product: NewProduct) -> Result<Product, DbErr>;

    /// Fails when `observation.product_id` does not name an existing product.
    async fn insert_observation(&self, observation: NewObservation) -> Result<Observation, DbErr>;
}

#[async_trait::async_trait]
pub trait IndexStore: Send + Sync {
    /// Appends a record. Never replaces an existing one.
    async fn insert(&self, record: NewComputedIndex) -> Result<ComputedIndex, DbErr>;

    /// Most recent record of `kind` for the period (latest `computed_at`, then highest id).
    async fn find_latest(
        &self,
        kind: IndexKind,
        base_year: i32,
        current_year: i32,
    ) -> Result<Option<ComputedIndex>, DbErr>;

    /// Every record for the period in storage order, duplicates included.
    async fn find_all(
        &self,
        base_year: i32,
        current_year: i32,
    ) -> Result<Vec<ComputedIndex>, DbErr>;
}
