//! Price index engine
//!
//! Computes Laspeyres and Paasche values from the product basket, derives
//! Fisher from the latest stored pair, and decorates stored results for
//! period comparison. Every computation appends exactly one record to the
//! index store; concurrent requests for the same period simply add more rows.

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::IndexError;
use crate::models::index::{ComparisonEntry, IndexKind, IndexOutcome, NewComputedIndex};
use crate::services::comparison;
use crate::services::index_calculator::{self, WeightPeriod};
use crate::services::store::{IndexStore, PriceSeriesRepository};

#[derive(Clone)]
pub struct IndexEngine {
    repository: Arc<dyn PriceSeriesRepository>,
    store: Arc<dyn IndexStore>,
}

impl IndexEngine {
    pub fn new(repository: Arc<dyn PriceSeriesRepository>, store: Arc<dyn IndexStore>) -> Self {
        Self { repository, store }
    }

    pub async fn compute_laspeyres(
        &self,
        base_year: i32,
        current_year: i32,
    ) -> Result<IndexOutcome, IndexError> {
        self.compute_weighted(IndexKind::Laspeyres, WeightPeriod::Base, base_year, current_year)
            .await
    }

    pub async fn compute_paasche(
        &self,
        base_year: i32,
        current_year: i32,
    ) -> Result<IndexOutcome, IndexError> {
        self.compute_weighted(IndexKind::Paasche, WeightPeriod::Current, base_year, current_year)
            .await
    }

    /// Geometric mean of the most recent stored Laspeyres and Paasche values
    /// for the exact same period. Both must have been computed beforehand.
    pub async fn compute_fisher(
        &self,
        base_year: i32,
        current_year: i32,
    ) -> Result<IndexOutcome, IndexError> {
        let laspeyres = self
            .store
            .find_latest(IndexKind::Laspeyres, base_year, current_year)
            .await?;
        let paasche = self
            .store
            .find_latest(IndexKind::Paasche, base_year, current_year)
            .await?;

        let (Some(laspeyres), Some(paasche)) = (laspeyres, paasche) else {
            warn!(
                base_year,
                current_year, "Fisher requested before Laspeyres and Paasche were computed"
            );
            return Err(IndexError::MissingPrerequisite {
                base_year,
                current_year,
            });
        };

        let value = index_calculator::fisher(laspeyres.value, paasche.value);
        debug!(
            laspeyres_id = laspeyres.id,
            paasche_id = paasche.id,
            "Fisher: sqrt({} x {}) = {}",
            laspeyres.value,
            paasche.value,
            value
        );

        self.persist(IndexKind::Fisher, base_year, current_year, value)
            .await
    }

    /// Every stored record for the period, decorated with its deviation from
    /// 100 and narrative. Duplicates are returned as stored.
    pub async fn compare_indices(
        &self,
        base_year: i32,
        current_year: i32,
    ) -> Result<Vec<ComparisonEntry>, IndexError> {
        let records = self.store.find_all(base_year, current_year).await?;
        info!(
            base_year,
            current_year,
            count = records.len(),
            "Comparing stored indices"
        );

        Ok(comparison::compare(&records))
    }

    async fn compute_weighted(
        &self,
        kind: IndexKind,
        weights: WeightPeriod,
        base_year: i32,
        current_year: i32,
    ) -> Result<IndexOutcome, IndexError> {
        let products = self.repository.list_products().await?;
        let overflow = || {
            warn!(base_year, current_year, "{} basket overflowed", kind);
            IndexError::Overflow {
                kind,
                base_year,
                current_year,
            }
        };

        let sums = index_calculator::basket_sums(base_year, current_year, &products, weights)
            .ok_or_else(overflow)?;

        debug!(
            products = products.len(),
            "{}: numerator = {}, denominator = {}",
            kind,
            sums.numerator,
            sums.denominator
        );

        if sums.denominator.is_zero() {
            warn!(
                base_year,
                current_year, "{} denominator is zero, index value set to 0", kind
            );
        }

        let value = sums.index_value().ok_or_else(overflow)?;

        self.persist(kind, base_year, current_year, value).await
    }

    async fn persist(
        &self,
        kind: IndexKind,
        base_year: i32,
        current_year: i32,
        value: Decimal,
    ) -> Result<IndexOutcome, IndexError> {
        let record = self
            .store
            .insert(NewComputedIndex {
                kind,
                base_year,
                current_year,
                value,
                computed_at: Utc::now(),
            })
            .await?;

        info!(
            id = record.id,
            base_year,
            current_year,
            "Stored {} index value {}",
            kind,
            value
        );

        Ok(IndexOutcome {
            kind,
            value: index_calculator::round_for_display(value),
            tag: index_calculator::trend_tag(kind, value),
        })
    }
}
