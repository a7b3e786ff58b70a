use crate::ser::{ConfigurationError, NullSerializerHandle, SuppressingNullSerializer};
use std::collections::BTreeMap;

pub const DEFAULT_NULL_SERIALIZER_NAME: &str = "default";
pub const SUPPRESS_NULL_SERIALIZER_NAME: &str = "suppress";

/// Named null serializers that property declarations and mapper settings refer to.
///
/// `"default"` maps to the baseline and `"suppress"` to [`SuppressingNullSerializer`].
#[derive(Debug, Clone)]
pub struct NullSerializerCatalog {
  entries: BTreeMap<String, NullSerializerHandle>,
}

impl Default for NullSerializerCatalog {
  fn default() -> Self {
    let mut entries = BTreeMap::new();
    entries.insert(
      DEFAULT_NULL_SERIALIZER_NAME.to_string(),
      NullSerializerHandle::baseline(),
    );
    entries.insert(
      SUPPRESS_NULL_SERIALIZER_NAME.to_string(),
      NullSerializerHandle::new(SuppressingNullSerializer),
    );
    Self { entries }
  }
}

impl NullSerializerCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(
    &mut self,
    name: impl Into<String>,
    serializer: NullSerializerHandle,
  ) -> Result<(), ConfigurationError> {
    let name = name.into();
    if self.entries.contains_key(&name) {
      return Err(ConfigurationError::DuplicateNullSerializer(name));
    }
    tracing::debug!("Registering null serializer: name = {}", name);
    self.entries.insert(name, serializer);
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&NullSerializerHandle> {
    self.entries.get(name)
  }

  /// Looks up `name`, reporting `referrer` in the error when it is missing.
  pub fn resolve(&self, name: &str, referrer: &str) -> Result<NullSerializerHandle, ConfigurationError> {
    self
      .entries
      .get(name)
      .cloned()
      .ok_or_else(|| ConfigurationError::UnknownNullSerializer {
        name: name.to_string(),
        referrer: referrer.to_string(),
      })
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }
}
