use crate::core::Catalog;
use crate::models::{BreedRecord, SizeFilter};

/// Check if a breed passes the size selector of a preference vector
#[inline]
pub fn matches_size(record: &BreedRecord, size: SizeFilter) -> bool {
    size.admits(record.size_category())
}

/// Records surviving the size filter, in catalog order
pub fn filter_by_size(catalog: &Catalog, size: SizeFilter) -> impl Iterator<Item = &BreedRecord> {
    catalog.iter().filter(move |record| matches_size(record, size))
}
