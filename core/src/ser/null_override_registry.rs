use crate::ser::{
  ConfigurationError, ConstantNullSerializer, NullOverride, NullSerializerCatalog, NullSerializerHandle, PropertyId,
  TypeDescriptor,
};
use std::collections::btree_map::Iter;
use std::collections::{BTreeMap, BTreeSet};

/// Property-level null serializers of one type.
///
/// Built once from the type's descriptor and never modified afterwards, so it is shared by
/// reference across every session. Repeated lookups of the same property return the same
/// serializer instance.
#[derive(Debug, Clone)]
pub struct PropertyNullOverrideRegistry {
  type_name: String,
  overrides: BTreeMap<PropertyId, NullSerializerHandle>,
}

impl PropertyNullOverrideRegistry {
  pub fn empty(type_name: impl Into<String>) -> Self {
    Self {
      type_name: type_name.into(),
      overrides: BTreeMap::new(),
    }
  }

  pub fn from_descriptor(
    descriptor: &TypeDescriptor,
    catalog: &NullSerializerCatalog,
  ) -> Result<Self, ConfigurationError> {
    let mut seen = BTreeSet::new();
    let mut overrides = BTreeMap::new();
    for property in descriptor.properties() {
      let property_id = descriptor.property_id(property.name());
      if !seen.insert(property.name()) {
        return Err(ConfigurationError::DuplicateProperty(property_id));
      }
      let Some(null_override) = property.null_override() else {
        continue;
      };
      let serializer = Self::resolve_override(&property_id, null_override, catalog)?;
      overrides.insert(property_id, serializer);
    }
    Ok(Self {
      type_name: descriptor.type_name().to_string(),
      overrides,
    })
  }

  fn resolve_override(
    property_id: &PropertyId,
    null_override: &NullOverride,
    catalog: &NullSerializerCatalog,
  ) -> Result<NullSerializerHandle, ConfigurationError> {
    match null_override {
      NullOverride::Named(name) => catalog.resolve(name, &property_id.to_string()),
      NullOverride::Constant(raw) => ConstantNullSerializer::from_json(raw)
        .map(NullSerializerHandle::new)
        .map_err(|err| ConfigurationError::InvalidNullConstant {
          referrer: property_id.to_string(),
          reason: err.to_string(),
        }),
      NullOverride::Serializer(serializer) => Ok(serializer.clone()),
    }
  }

  pub fn lookup(&self, property: &PropertyId) -> Option<&NullSerializerHandle> {
    self.overrides.get(property)
  }

  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  pub fn len(&self) -> usize {
    self.overrides.len()
  }

  pub fn is_empty(&self) -> bool {
    self.overrides.is_empty()
  }

  pub fn iter(&self) -> Iter<'_, PropertyId, NullSerializerHandle> {
    self.overrides.iter()
  }
}
