use crate::ser::{NullSerializerHandle, PropertyId};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Where a resolved null serializer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullResolutionOrigin {
  /// Declared on the property itself.
  Property,
  /// Chosen by the provider's [`NullValueStrategy`].
  Strategy,
  /// The provider's default null serializer.
  Provider,
  Baseline,
}

/// Provider-level lookup that may pick a null serializer per property.
///
/// `property` is `None` for root values and tree nodes. Returning `None` falls through to the
/// provider's default null serializer.
pub trait NullValueStrategy: Send + Sync {
  fn find_null_serializer(&self, property: Option<&PropertyId>) -> Option<NullSerializerHandle>;
}

impl<F> NullValueStrategy for F
where
  F: Fn(Option<&PropertyId>) -> Option<NullSerializerHandle> + Send + Sync,
{
  fn find_null_serializer(&self, property: Option<&PropertyId>) -> Option<NullSerializerHandle> {
    self(property)
  }
}

/// Picks a null serializer by property name, whatever the declaring type.
#[derive(Debug, Clone, Default)]
pub struct PropertyNameNullStrategy {
  by_name: BTreeMap<String, NullSerializerHandle>,
}

impl PropertyNameNullStrategy {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, name: impl Into<String>, serializer: impl Into<NullSerializerHandle>) -> Self {
    self.by_name.insert(name.into(), serializer.into());
    self
  }
}

impl NullValueStrategy for PropertyNameNullStrategy {
  fn find_null_serializer(&self, property: Option<&PropertyId>) -> Option<NullSerializerHandle> {
    property.and_then(|p| self.by_name.get(p.name()).cloned())
  }
}

#[derive(Clone)]
pub struct NullValueStrategyHandle(Arc<dyn NullValueStrategy>);

impl NullValueStrategyHandle {
  pub fn new(strategy: impl NullValueStrategy + 'static) -> Self {
    NullValueStrategyHandle(Arc::new(strategy))
  }

  pub fn find_null_serializer(&self, property: Option<&PropertyId>) -> Option<NullSerializerHandle> {
    self.0.find_null_serializer(property)
  }
}

impl Debug for NullValueStrategyHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "NullValueStrategyHandle")
  }
}

impl PartialEq for NullValueStrategyHandle {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl Eq for NullValueStrategyHandle {}
