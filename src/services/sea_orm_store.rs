//! Postgres-backed collaborators via SeaORM.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

use crate::entities::{computed_indices, prelude::*, prices, products};
use crate::models::index::{ComputedIndex, IndexKind, NewComputedIndex};
use crate::models::product::{NewObservation, NewProduct, Observation, Product};
use crate::services::store::{IndexStore, PriceSeriesRepository};

pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl PriceSeriesRepository for SeaOrmStore {
    async fn list_products(&self) -> Result<Vec<Product>, DbErr> {
        let product_rows = Products::find()
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?;

        let price_rows = Prices::find()
            .order_by_asc(prices::Column::Id)
            .all(&self.db)
            .await?;

        let mut by_product: HashMap<i32, Vec<Observation>> = HashMap::new();
        for row in price_rows {
            by_product
                .entry(row.product_id)
                .or_default()
                .push(Observation::from(row));
        }

        Ok(product_rows
            .into_iter()
            .map(|model| {
                let observations = by_product.remove(&model.id).unwrap_or_default();
                Product::from_parts(model, observations)
            })
            .collect())
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, DbErr> {
        let Some(model) = Products::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let observations = self.list_observations(id).await?;
        Ok(Some(Product::from_parts(model, observations)))
    }

    async fn list_observations(&self, product_id: i32) -> Result<Vec<Observation>, DbErr> {
        let rows = Prices::find()
            .filter(prices::Column::ProductId.eq(product_id))
            .order_by_asc(prices::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Observation::from).collect())
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, DbErr> {
        let model = products::ActiveModel {
            name: Set(product.name),
            unit_of_measure: Set(product.unit_of_measure),
            category: Set(product.category),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(Product::from_parts(model, vec![]))
    }

    async fn insert_observation(&self, observation: NewObservation) -> Result<Observation, DbErr> {
        let model = prices::ActiveModel {
            product_id: Set(observation.product_id),
            year: Set(observation.year),
            value: Set(observation.price),
            quantity_consumed: Set(observation.quantity_consumed),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(Observation::from(model))
    }
}

#[async_trait::async_trait]
impl IndexStore for SeaOrmStore {
    async fn insert(&self, record: NewComputedIndex) -> Result<ComputedIndex, DbErr> {
        let model = computed_indices::ActiveModel {
            index_type: Set(record.kind),
            base_year: Set(record.base_year),
            current_year: Set(record.current_year),
            value: Set(record.value),
            computed_at: Set(record.computed_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(ComputedIndex::from(model))
    }

    async fn find_latest(
        &self,
        kind: IndexKind,
        base_year: i32,
        current_year: i32,
    ) -> Result<Option<ComputedIndex>, DbErr> {
        let row = ComputedIndices::find()
            .filter(computed_indices::Column::IndexType.eq(kind))
            .filter(computed_indices::Column::BaseYear.eq(base_year))
            .filter(computed_indices::Column::CurrentYear.eq(current_year))
            .order_by_desc(computed_indices::Column::ComputedAt)
            .order_by_desc(computed_indices::Column::Id)
            .one(&self.db)
            .await?;

        Ok(row.map(ComputedIndex::from))
    }

    async fn find_all(
        &self,
        base_year: i32,
        current_year: i32,
    ) -> Result<Vec<ComputedIndex>, DbErr> {
        let rows = ComputedIndices::find()
            .filter(computed_indices::Column::BaseYear.eq(base_year))
            .filter(computed_indices::Column::CurrentYear.eq(current_year))
            .order_by_asc(computed_indices::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(ComputedIndex::from).collect())
    }
}
