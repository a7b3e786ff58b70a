use crate::ser::{SerializationConfig, SerializationProvider};
use std::sync::Arc;

/// Produces the provider owned by one serialization session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderFactory;

impl ProviderFactory {
  /// Copies `parent`'s default null serializer handle and shares its strategy and plan cache.
  /// The derived provider owns its own slot: setting a null serializer on it leaves `parent`
  /// and every sibling unchanged, and vice versa.
  pub fn derive_for_session(parent: &SerializationProvider, config: Arc<SerializationConfig>) -> SerializationProvider {
    tracing::trace!(
      "derive_for_session: null_serializer_override = {}, strategy = {}",
      parent.null_serializer.is_some(),
      parent.strategy.is_some()
    );
    SerializationProvider {
      null_serializer: parent.null_serializer.clone(),
      strategy: parent.strategy.clone(),
      plans: parent.plans.clone(),
      config,
    }
  }
}
