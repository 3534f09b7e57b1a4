//! `SeaORM` Entity for computed_indices table (append-only)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::index::IndexKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "computed_indices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub index_type: IndexKind,
    pub base_year: i32,
    pub current_year: i32,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub value: Decimal,
    pub computed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
