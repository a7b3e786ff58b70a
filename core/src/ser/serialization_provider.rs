use crate::ser::{
  NullResolutionOrigin, NullSerializerHandle, NullValueStrategy, NullValueStrategyHandle, PropertyId,
  ProviderFactory, SerializationConfig, SerializationPlanCache,
};
use std::sync::Arc;

/// Decides which null serializer writes each absent value of one session.
///
/// Resolution order, most specific first:
///
/// 1. a null serializer declared on the property,
/// 2. the provider's [`NullValueStrategy`], then its default null serializer,
/// 3. the baseline, writing `null`.
///
/// Root values and tree nodes have no property and start at step 2.
///
/// A provider is owned by one session. [`ProviderFactory`] derives a fresh one per session, so
/// changing the default null serializer here is never seen by other sessions.
#[derive(Debug)]
pub struct SerializationProvider {
  pub(crate) null_serializer: Option<NullSerializerHandle>,
  pub(crate) strategy: Option<NullValueStrategyHandle>,
  pub(crate) plans: Arc<SerializationPlanCache>,
  pub(crate) config: Arc<SerializationConfig>,
}

impl Default for SerializationProvider {
  fn default() -> Self {
    Self::new(
      Arc::new(SerializationPlanCache::default()),
      Arc::new(SerializationConfig::default()),
    )
  }
}

impl SerializationProvider {
  pub fn new(plans: Arc<SerializationPlanCache>, config: Arc<SerializationConfig>) -> Self {
    Self {
      null_serializer: None,
      strategy: None,
      plans,
      config,
    }
  }

  pub fn with_null_value_strategy(mut self, strategy: impl NullValueStrategy + 'static) -> Self {
    self.set_null_value_strategy(NullValueStrategyHandle::new(strategy));
    self
  }

  pub fn set_null_value_strategy(&mut self, strategy: NullValueStrategyHandle) {
    self.strategy = Some(strategy);
  }

  pub fn null_value_strategy(&self) -> Option<&NullValueStrategyHandle> {
    self.strategy.as_ref()
  }

  /// Replaces the default null serializer of this provider only.
  pub fn set_null_serializer(&mut self, serializer: impl Into<NullSerializerHandle>) {
    let serializer = serializer.into();
    tracing::debug!("Setting provider null serializer: {:?}", serializer);
    self.null_serializer = Some(serializer);
  }

  pub fn clear_null_serializer(&mut self) {
    self.null_serializer = None;
  }

  pub fn has_null_serializer_override(&self) -> bool {
    self.null_serializer.is_some()
  }

  /// The default null serializer in effect: the configured one, or the baseline.
  pub fn null_serializer(&self) -> NullSerializerHandle {
    self
      .null_serializer
      .clone()
      .unwrap_or_else(NullSerializerHandle::baseline)
  }

  pub fn plans(&self) -> &Arc<SerializationPlanCache> {
    &self.plans
  }

  pub fn config(&self) -> &SerializationConfig {
    &self.config
  }

  pub fn create_instance(&self, config: Arc<SerializationConfig>) -> SerializationProvider {
    ProviderFactory::derive_for_session(self, config)
  }

  /// Picks the null serializer for `property`, or for a root value or tree node when `None`.
  ///
  /// Property overrides are discovered through the plan cache, so a declaration applies only
  /// once its type has been planned. Until then the property resolves like any other.
  pub fn resolve_null_serializer(&self, property: Option<&PropertyId>) -> NullSerializerHandle {
    self.resolve_null_serializer_with_origin(property).0
  }

  pub fn resolve_null_serializer_with_origin(
    &self,
    property: Option<&PropertyId>,
  ) -> (NullSerializerHandle, NullResolutionOrigin) {
    let (serializer, origin) = self.find_null_serializer(property);
    tracing::trace!(
      "resolve_null_serializer: property = {}, origin = {:?}",
      property.map_or_else(|| "<none>".to_string(), |p| p.to_string()),
      origin
    );
    (serializer, origin)
  }

  fn find_null_serializer(&self, property: Option<&PropertyId>) -> (NullSerializerHandle, NullResolutionOrigin) {
    if let Some(serializer) = property.and_then(|p| self.plans.lookup_override(p)) {
      return (serializer, NullResolutionOrigin::Property);
    }
    if let Some(serializer) = self.strategy.as_ref().and_then(|s| s.find_null_serializer(property)) {
      return (serializer, NullResolutionOrigin::Strategy);
    }
    match self.null_serializer.as_ref() {
      Some(serializer) => (serializer.clone(), NullResolutionOrigin::Provider),
      None => (NullSerializerHandle::baseline(), NullResolutionOrigin::Baseline),
    }
  }
}

static_assertions::assert_impl_all!(SerializationProvider: Send, Sync);
