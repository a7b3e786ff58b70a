use crate::ser::{
  ConfigurationError, JsonBean, NullSerializerCatalog, NullSerializerHandle, PropertyId, PropertyNullOverrideRegistry,
  TypeDescriptor,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use nexus_json_utils_rs::collections::DashMapExtension;
use std::any::TypeId;
use std::sync::Arc;

/// How one bean type is written: its properties in order, plus their declared null overrides.
#[derive(Debug)]
pub struct SerializationPlan {
  type_name: String,
  properties: Vec<PropertyId>,
  overrides: Arc<PropertyNullOverrideRegistry>,
}

impl SerializationPlan {
  pub fn build(descriptor: &TypeDescriptor, catalog: &NullSerializerCatalog) -> Result<Self, ConfigurationError> {
    let overrides = PropertyNullOverrideRegistry::from_descriptor(descriptor, catalog)?;
    let properties = descriptor
      .properties()
      .iter()
      .map(|p| descriptor.property_id(p.name()))
      .collect();
    Ok(Self {
      type_name: descriptor.type_name().to_string(),
      properties,
      overrides: Arc::new(overrides),
    })
  }

  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  pub fn properties(&self) -> &[PropertyId] {
    &self.properties
  }

  pub fn overrides(&self) -> &Arc<PropertyNullOverrideRegistry> {
    &self.overrides
  }
}

/// Lazily built plans, one per bean type, together with the override registries they own,
/// indexed by type name for property lookups.
#[derive(Debug, Default)]
pub struct SerializationPlanCache {
  catalog: NullSerializerCatalog,
  plans: DashMap<TypeId, Arc<SerializationPlan>>,
  registries: DashMap<String, Arc<PropertyNullOverrideRegistry>>,
}

impl SerializationPlanCache {
  pub fn new(catalog: NullSerializerCatalog) -> Self {
    Self {
      catalog,
      plans: DashMap::new(),
      registries: DashMap::new(),
    }
  }

  pub fn catalog(&self) -> &NullSerializerCatalog {
    &self.catalog
  }

  /// Returns the plan for `T`, introspecting the type on first use.
  ///
  /// Type names key the property overrides, so a second bean type describing itself under an
  /// already planned name is rejected and never replaces the first type's registry.
  pub fn plan_for<T: JsonBean>(&self) -> Result<Arc<SerializationPlan>, ConfigurationError> {
    let (plan, _) = self.plans.load_or_try_store_with(TypeId::of::<T>(), || -> Result<_, ConfigurationError> {
      let descriptor = T::type_descriptor();
      tracing::debug!(
        "Building serialization plan: type_name = {}, properties = {}",
        descriptor.type_name(),
        descriptor.properties().len()
      );
      let plan = Arc::new(SerializationPlan::build(&descriptor, &self.catalog)?);
      match self.registries.entry(plan.type_name().to_string()) {
        Entry::Occupied(_) => return Err(ConfigurationError::DuplicateTypeName(plan.type_name().to_string())),
        Entry::Vacant(entry) => {
          entry.insert(plan.overrides().clone());
        }
      }
      Ok(plan)
    })?;
    Ok(plan)
  }

  pub fn registry_for(&self, type_name: &str) -> Option<Arc<PropertyNullOverrideRegistry>> {
    self.registries.get(type_name).map(|entry| entry.value().clone())
  }

  /// The property-level null serializer declared for `property`, if its type has been planned.
  pub fn lookup_override(&self, property: &PropertyId) -> Option<NullSerializerHandle> {
    self
      .registries
      .get(property.declaring_type())
      .and_then(|registry| registry.lookup(property).cloned())
  }

  pub fn len(&self) -> usize {
    self.plans.len()
  }

  pub fn is_empty(&self) -> bool {
    self.plans.is_empty()
  }
}
