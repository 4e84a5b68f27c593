//! Catalog reference data.

use common::CatalogItemId;
use serde::{Deserialize, Serialize};

/// The current record of a sellable product.
///
/// Immutable reference data from this crate's point of view; orders take a
/// snapshot of it rather than holding a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// The catalog item id.
    pub id: CatalogItemId,

    /// Human-readable product name.
    pub name: String,

    /// Catalog-relative picture path (e.g. `"widget.png"`).
    pub picture_uri: String,
}

impl CatalogItem {
    /// Creates a catalog record.
    pub fn new(id: CatalogItemId, name: impl Into<String>, picture_uri: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            picture_uri: picture_uri.into(),
        }
    }
}
