//! Managed resource types and the catalog that collects them.
//!
//! A [`ManagedResource`] is one declarative unit (a package, a service, a
//! file, ...) handed to an external convergence engine. Resources of one
//! evaluation are gathered in a [`Catalog`] keyed by `kind[name]`.

mod catalog;
pub mod names;
mod types;

pub use catalog::{Catalog, CatalogError};
pub use types::*;
