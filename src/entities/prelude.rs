pub use super::computed_indices::Entity as ComputedIndices;
pub use super::prices::Entity as Prices;
pub use super::products::Entity as Products;
