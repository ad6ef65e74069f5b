use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::types::{ManagedResource, ResourceKind, reference};
use crate::util::hash::Hashable;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("duplicate resource: {0}")]
  Duplicate(String),
}

/// The complete resource set of one evaluation.
///
/// Keyed by `kind[name]`. [`BTreeMap`] keeps serialization, and therefore the
/// catalog hash, deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
  pub resources: BTreeMap<String, ManagedResource>,
}

impl Hashable for Catalog {}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a resource.
  ///
  /// # Errors
  ///
  /// [`CatalogError::Duplicate`] if a resource with the same kind and name is
  /// already present.
  pub fn insert(&mut self, resource: ManagedResource) -> Result<(), CatalogError> {
    let key = resource.reference();
    if self.resources.contains_key(&key) {
      return Err(CatalogError::Duplicate(key));
    }
    trace!(resource = %key, "adding resource");
    self.resources.insert(key, resource);
    Ok(())
  }

  pub fn extend(&mut self, resources: impl IntoIterator<Item = ManagedResource>) -> Result<(), CatalogError> {
    for resource in resources {
      self.insert(resource)?;
    }
    Ok(())
  }

  pub fn get(&self, kind: ResourceKind, name: &str) -> Option<&ManagedResource> {
    self.resources.get(&reference(kind, name))
  }

  pub fn iter(&self) -> impl Iterator<Item = &ManagedResource> {
    self.resources.values()
  }

  pub fn len(&self) -> usize {
    self.resources.len()
  }

  pub fn is_empty(&self) -> bool {
    self.resources.is_empty()
  }

  /// Number of resources per kind.
  pub fn count_by_kind(&self) -> BTreeMap<ResourceKind, usize> {
    let mut counts = BTreeMap::new();
    for resource in self.iter() {
      *counts.entry(resource.kind).or_insert(0) += 1;
    }
    counts
  }
}
