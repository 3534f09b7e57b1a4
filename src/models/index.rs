use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of price index. Closed set; stored by name in `computed_indices.index_type`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum IndexKind {
    #[sea_orm(string_value = "Laspeyres")]
    Laspeyres,
    #[sea_orm(string_value = "Paasche")]
    Paasche,
    #[sea_orm(string_value = "Fisher")]
    Fisher,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Laspeyres => "Laspeyres",
            IndexKind::Paasche => "Paasche",
            IndexKind::Fisher => "Fisher",
        }
    }

    /// Case-insensitive lookup of a free-form label such as a path segment.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "laspeyres" => Some(IndexKind::Laspeyres),
            "paasche" => Some(IndexKind::Paasche),
            "fisher" => Some(IndexKind::Fisher),
            _ => None,
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted index value. Records are never updated; the same
/// (kind, base_year, current_year) may appear any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedIndex {
    pub id: i32,
    pub kind: IndexKind,
    pub base_year: i32,
    pub current_year: i32,
    pub value: Decimal,
    pub computed_at: DateTime<Utc>,
}

/// Record handed to the index store before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComputedIndex {
    pub kind: IndexKind,
    pub base_year: i32,
    pub current_year: i32,
    pub value: Decimal,
    pub computed_at: DateTime<Utc>,
}

impl From<crate::entities::computed_indices::Model> for ComputedIndex {
    fn from(model: crate::entities::computed_indices::Model) -> Self {
        Self {
            id: model.id,
            kind: model.index_type,
            base_year: model.base_year,
            current_year: model.current_year,
            value: model.value,
            computed_at: model.computed_at,
        }
    }
}

/// Result of a single index computation as returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOutcome {
    pub kind: IndexKind,
    /// Rounded to 2 decimal places
    pub value: Decimal,
    pub tag: &'static str,
}

/// A stored record decorated for period comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub kind: IndexKind,
    pub value: Decimal,
    pub deviation: Decimal,
    pub narrative: String,
    pub formula: &'static str,
}

// ---------------------------------------------------------------------------
// HTTP payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    #[serde(rename = "indice", with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(rename = "interpretacion")]
    pub tag: String,
}

impl From<IndexOutcome> for IndexResponse {
    fn from(outcome: IndexOutcome) -> Self {
        Self {
            value: outcome.value,
            tag: outcome.tag.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponseEntry {
    #[serde(rename = "tipo")]
    pub kind: IndexKind,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(rename = "diferencia", with = "rust_decimal::serde::float")]
    pub deviation: Decimal,
    #[serde(rename = "interpretacion")]
    pub narrative: String,
    pub formula: String,
}

impl From<ComparisonEntry> for ComparisonResponseEntry {
    fn from(entry: ComparisonEntry) -> Self {
        Self {
            kind: entry.kind,
            value: entry.value,
            deviation: entry.deviation,
            narrative: entry.narrative,
            formula: entry.formula.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaResponse {
    #[serde(rename = "tipo")]
    pub label: String,
    pub formula: String,
}
