//! Narrative and formula text for stored index values.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::index::IndexKind;

pub const DIRECTION_INCREASE: &str = "aumento";
pub const DIRECTION_DECREASE: &str = "disminución";
pub const UNKNOWN_INDEX: &str = "Indice no reconocido";
pub const UNKNOWN_FORMULA: &str = "Formula no disponible";

/// Distance from the neutral baseline of 100
pub fn deviation(value: Decimal) -> Decimal {
    value - Decimal::ONE_HUNDRED
}

/// "aumento" only when the deviation is strictly positive
pub fn direction(deviation: Decimal) -> &'static str {
    if deviation > Decimal::ZERO {
        DIRECTION_INCREASE
    } else {
        DIRECTION_DECREASE
    }
}

/// Absolute deviation with exactly two decimals, midpoints away from zero.
fn magnitude(deviation: Decimal) -> String {
    let mut magnitude = deviation
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    magnitude.rescale(2);
    magnitude.to_string()
}

pub fn interpret(kind: IndexKind, value: Decimal) -> String {
    let change = deviation(value);
    let direction = direction(change);
    let magnitude = magnitude(change);

    match kind {
        IndexKind::Laspeyres => format!(
            "Los precios agregados ({}) tuvieron un {} del {}% usando cantidades del año base como ponderación.",
            kind, direction, magnitude
        ),
        IndexKind::Paasche => format!(
            "Los precios agregados ({}) tuvieron un {} del {}% usando cantidades del año actual como ponderación.",
            kind, direction, magnitude
        ),
        IndexKind::Fisher => format!(
            "El indice {} (media geometrica) muestra un {} del {}%.",
            kind, direction, magnitude
        ),
    }
}

/// Like [`interpret`] for a free-form type label; unknown labels get a fixed fallback.
#[cfg(test)]
fn interpret_label(label: &str, value: Decimal) -> String {
    match IndexKind::parse_label(label) {
        Some(kind) => interpret(kind, value),
        None => UNKNOWN_INDEX.to_string(),
    }
}

pub fn formula(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::Laspeyres => "Formula: ∑(Pₜ × Q₀) / ∑(P₀ × Q₀) × 100",
        IndexKind::Paasche => "Formula: ∑(Pₜ × Qₜ) / ∑(P₀ × Qₜ) × 100",
        IndexKind::Fisher => "Formula: √(Laspeyres × Paasche)",
    }
}

pub fn formula_for_label(label: &str) -> &'static str {
    IndexKind::parse_label(label)
        .map(formula)
        .unwrap_or(UNKNOWN_FORMULA)
}
