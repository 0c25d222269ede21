//! Card catalog and loaders
//!
//! Catalog storage, the spreadsheet (.tsv) loader and catalog search

pub mod catalog;
pub mod query;
pub mod sheet;

pub use catalog::{CardCatalog, CardDatabase, SharedCatalog};
pub use query::CardQuery;
pub use sheet::SheetLoader;
