//! In-process store backing both collaborator traits.
//!
//! Used when no database is configured and by tests.

use parking_lot::RwLock;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::DbErr;
use std::sync::Arc;

use crate::entities::products;
use crate::models::index::{ComputedIndex, IndexKind, NewComputedIndex};
use crate::models::product::{NewObservation, NewProduct, Observation, Product};
use crate::services::store::{IndexStore, PriceSeriesRepository};

/// Scale of `computed_indices.value` (`numeric(18, 4)`)
const INDEX_VALUE_SCALE: u32 = 4;

/// Round like a Postgres `numeric` column: midpoint away from zero.
fn to_column_scale(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(INDEX_VALUE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Default)]
struct Tables {
    products: Vec<products::Model>,
    observations: Vec<Observation>,
    indices: Vec<ComputedIndex>,
    next_product_id: i32,
    next_observation_id: i32,
    next_index_id: i32,
}

impl Tables {
    fn observations_of(&self, product_id: i32) -> Vec<Observation> {
        self.observations
            .iter()
            .filter(|o| o.product_id == product_id)
            .cloned()
            .collect()
    }

    fn assemble(&self, model: &products::Model) -> Product {
        Product::from_parts(model.clone(), self.observations_of(model.id))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PriceSeriesRepository for InMemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, DbErr> {
        let tables = self.tables.read();
        Ok(tables.products.iter().map(|p| tables.assemble(p)).collect())
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, DbErr> {
        let tables = self.tables.read();
        Ok(tables
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.assemble(p)))
    }

    async fn list_observations(&self, product_id: i32) -> Result<Vec<Observation>, DbErr> {
        Ok(self.tables.read().observations_of(product_id))
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, DbErr> {
        let mut tables = self.tables.write();
        tables.next_product_id += 1;

        let model = products::Model {
            id: tables.next_product_id,
            name: product.name,
            unit_of_measure: product.unit_of_measure,
            category: product.category,
        };
        tables.products.push(model.clone());

        Ok(Product::from_parts(model, vec![]))
    }

    async fn insert_observation(&self, observation: NewObservation) -> Result<Observation, DbErr> {
        let mut tables = self.tables.write();

        if !tables.products.iter().any(|p| p.id == observation.product_id) {
            return Err(DbErr::RecordNotInserted);
        }

        tables.next_observation_id += 1;
        let stored = Observation {
            id: tables.next_observation_id,
            product_id: observation.product_id,
            year: observation.year,
            price: observation.price,
            quantity_consumed: observation.quantity_consumed,
        };
        tables.observations.push(stored.clone());

        Ok(stored)
    }
}

#[async_trait::async_trait]
impl IndexStore for InMemoryStore {
    async fn insert(&self, record: NewComputedIndex) -> Result<ComputedIndex, DbErr> {
        let mut tables = self.tables.write();
        tables.next_index_id += 1;

        let stored = ComputedIndex {
            id: tables.next_index_id,
            kind: record.kind,
            base_year: record.base_year,
            current_year: record.current_year,
            value: to_column_scale(record.value),
            computed_at: record.computed_at,
        };
        tables.indices.push(stored.clone());

        Ok(stored)
    }

    async fn find_latest(
        &self,
        kind: IndexKind,
        base_year: i32,
        current_year: i32,
    ) -> Result<Option<ComputedIndex>, DbErr> {
        let tables = self.tables.read();
        Ok(tables
            .indices
            .iter()
            .filter(|i| i.kind == kind && i.base_year == base_year && i.current_year == current_year)
            .max_by_key(|i| (i.computed_at, i.id))
            .cloned())
    }

    async fn find_all(
        &self,
        base_year: i32,
        current_year: i32,
    ) -> Result<Vec<ComputedIndex>, DbErr> {
        let tables = self.tables.read();
        Ok(tables
            .indices
            .iter()
            .filter(|i| i.base_year == base_year && i.current_year == current_year)
            .cloned()
            .collect())
    }
}
