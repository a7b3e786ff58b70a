use crate::ser::{NullSerializerHandle, PropertyId};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Debug, Formatter};

/// Declared null handling for one property, as found during introspection.
#[derive(Debug, Clone)]
pub enum NullOverride {
  /// A serializer registered under this name in the mapper's catalog.
  Named(String),
  /// Raw JSON text written in place of null.
  Constant(String),
  Serializer(NullSerializerHandle),
}

#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
  name: String,
  null_override: Option<NullOverride>,
}

impl PropertyDescriptor {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      null_override: None,
    }
  }

  pub fn null_using(mut self, serializer: impl Into<NullSerializerHandle>) -> Self {
    self.null_override = Some(NullOverride::Serializer(serializer.into()));
    self
  }

  pub fn null_using_named(mut self, name: impl Into<String>) -> Self {
    self.null_override = Some(NullOverride::Named(name.into()));
    self
  }

  pub fn null_using_constant(mut self, raw_json: impl Into<String>) -> Self {
    self.null_override = Some(NullOverride::Constant(raw_json.into()));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn null_override(&self) -> Option<&NullOverride> {
    self.null_override.as_ref()
  }
}

/// Serialized shape of a bean type: its name and its properties in output order.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
  type_name: String,
  properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
  pub fn new(type_name: impl Into<String>) -> Self {
    Self {
      type_name: type_name.into(),
      properties: Vec::new(),
    }
  }

  pub fn of<T: ?Sized>() -> Self {
    Self::new(std::any::type_name::<T>())
  }

  pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
    self.properties.push(property);
    self
  }

  pub fn property(self, name: impl Into<String>) -> Self {
    self.with_property(PropertyDescriptor::new(name))
  }

  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  pub fn properties(&self) -> &[PropertyDescriptor] {
    &self.properties
  }

  pub fn property_id(&self, name: &str) -> PropertyId {
    PropertyId::new(self.type_name.clone(), name)
  }
}

/// A present value, serialized through serde.
pub trait PresentValue {
  fn to_json_value(&self) -> Result<Value, serde_json::Error>;
}

impl<T: Serialize + ?Sized> PresentValue for T {
  fn to_json_value(&self) -> Result<Value, serde_json::Error> {
    serde_json::to_value(self)
  }
}

/// The content of one value slot: absent, or a value for the ordinary serialization path.
#[derive(Clone, Copy)]
pub enum ValueSlot<'a> {
  Null,
  Present(&'a dyn PresentValue),
}

impl<'a> ValueSlot<'a> {
  pub fn present<T: Serialize>(value: &'a T) -> Self {
    ValueSlot::Present(value)
  }

  pub fn is_null(&self) -> bool {
    matches!(self, ValueSlot::Null)
  }
}

impl<'a, T: Serialize> From<&'a Option<T>> for ValueSlot<'a> {
  fn from(value: &'a Option<T>) -> Self {
    match value {
      Some(v) => ValueSlot::Present(v),
      None => ValueSlot::Null,
    }
  }
}

impl Debug for ValueSlot<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ValueSlot::Null => write!(f, "Null"),
      ValueSlot::Present(_) => write!(f, "Present(..)"),
    }
  }
}

/// A type serialized property by property.
pub trait JsonBean: 'static {
  /// Describes the serialized shape. Invoked at most once per plan cache.
  fn type_descriptor() -> TypeDescriptor
  where
    Self: Sized;

  /// The current value of the named property. Unknown names read as null.
  fn property_value(&self, name: &str) -> ValueSlot<'_>;
}
