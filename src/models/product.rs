use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{prices, products};

/// A yearly (price, quantity consumed) data point of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: i32,
    #[serde(rename = "productoId")]
    pub product_id: i32,
    #[serde(rename = "anio")]
    pub year: i32,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "cantidadConsumida")]
    pub quantity_consumed: i32,
}

impl From<prices::Model> for Observation {
    fn from(model: prices::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            year: model.year,
            price: model.value,
            quantity_consumed: model.quantity_consumed,
        }
    }
}

/// A basket product together with its observations in storage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "unidadMedida")]
    pub unit_of_measure: String,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "precios")]
    pub observations: Vec<Observation>,
}

impl Product {
    pub fn from_parts(model: products::Model, observations: Vec<Observation>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            unit_of_measure: model.unit_of_measure,
            category: model.category,
            observations,
        }
    }

    /// Observation recorded for `year`. When a product carries several
    /// observations for the same year the first one in storage order wins.
    pub fn observation_for(&self, year: i32) -> Option<&Observation> {
        self.observations.iter().find(|o| o.year == year)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "unidadMedida")]
    pub unit_of_measure: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("nombre must not be empty".to_string());
        }
        if self.unit_of_measure.trim().is_empty() {
            return Err("unidadMedida must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewObservation {
    #[serde(rename = "productoId")]
    pub product_id: i32,
    #[serde(rename = "anio")]
    pub year: i32,
    #[serde(rename = "valor")]
    pub price: Decimal,
    #[serde(rename = "cantidadConsumida")]
    pub quantity_consumed: i32,
}

impl NewObservation {
    /// Quantities and prices are non-negative
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity_consumed < 0 {
            return Err(format!(
                "cantidadConsumida must be non-negative, got {}",
                self.quantity_consumed
            ));
        }
        if self.price < Decimal::ZERO {
            return Err(format!("valor must be non-negative, got {}", self.price));
        }
        Ok(())
    }
}
