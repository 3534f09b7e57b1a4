use sea_orm::DbErr;
use thiserror::Error;

use crate::models::index::IndexKind;

#[derive(Error, Debug)]
pub enum IndexError {
    /// Fisher was requested before Laspeyres and Paasche exist for the period
    #[error("Debe calcular primero los índices Laspeyres y Paasche para el mismo periodo.")]
    MissingPrerequisite { base_year: i32, current_year: i32 },

    /// Basket sums or the index ratio do not fit a `Decimal`
    #[error("{kind} index overflowed for base year {base_year} and current year {current_year}")]
    Overflow {
        kind: IndexKind,
        base_year: i32,
        current_year: i32,
    },

    /// Repository or index store failure, passed through unchanged
    #[error("Database error: {0}")]
    Collaborator(#[from] DbErr),
}
