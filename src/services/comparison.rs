use crate::models::index::{ComparisonEntry, ComputedIndex};
use crate::services::interpretation;

impl From<&ComputedIndex> for ComparisonEntry {
    fn from(record: &ComputedIndex) -> Self {
        Self {
            kind: record.kind,
            value: record.value,
            deviation: interpretation::deviation(record.value),
            narrative: interpretation::interpret(record.kind, record.value),
            formula: interpretation::formula(record.kind),
        }
    }
}

/// One entry per stored record, in the order given. Duplicates are kept.
pub fn compare(records: &[ComputedIndex]) -> Vec<ComparisonEntry> {
    records.iter().map(ComparisonEntry::from).collect()
}
