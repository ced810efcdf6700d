//! Static translation input.

/// Locale file catalog
pub mod catalog;

pub use catalog::{
    CatalogError,
    StaticCatalog,
};
