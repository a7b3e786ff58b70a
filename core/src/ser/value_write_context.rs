use crate::ser::{JsonBean, JsonSink, PropertyId, SerializationError, SerializationProvider, ValueSlot, WritePosition};
use serde_json::Value;
use std::io;

/// Writes values of one session to a sink, sending every null through the provider.
pub struct ValueWriteContext<'a, S: JsonSink> {
  provider: &'a SerializationProvider,
  sink: &'a mut S,
}

impl<'a, S: JsonSink> ValueWriteContext<'a, S> {
  pub fn new(provider: &'a SerializationProvider, sink: &'a mut S) -> Self {
    Self { provider, sink }
  }

  pub fn provider(&self) -> &SerializationProvider {
    self.provider
  }

  /// Writes the value of one slot. `property` is `None` for root values and tree nodes.
  ///
  /// A present value that serializes to JSON null is written as a null of the same slot.
  pub fn write_value_for_property(
    &mut self,
    slot: ValueSlot<'_>,
    property: Option<&PropertyId>,
  ) -> Result<(), SerializationError> {
    match slot {
      ValueSlot::Null => self.write_null(property),
      ValueSlot::Present(value) => {
        let value = value.to_json_value()?;
        if value.is_null() {
          self.write_null(property)
        } else {
          self.write_tree(&value)
        }
      }
    }
  }

  pub fn write_root_null(&mut self) -> Result<(), SerializationError> {
    self.write_null(None)
  }

  /// Writes a tree. Nulls anywhere inside it are resolved without a property.
  pub fn write_tree(&mut self, value: &Value) -> Result<(), SerializationError> {
    match value {
      Value::Null => self.write_null(None)?,
      Value::Array(items) => {
        self.sink.write_start_array()?;
        for item in items {
          self.write_tree(item)?;
        }
        self.sink.write_end_array()?;
      }
      Value::Object(entries) => {
        self.sink.write_start_object()?;
        for (key, item) in entries {
          self.sink.write_field_name(key)?;
          self.write_tree(item)?;
        }
        self.sink.write_end_object()?;
      }
      scalar => self.sink.write_value(scalar)?,
    }
    Ok(())
  }

  pub fn write_bean<T: JsonBean>(&mut self, bean: &T) -> Result<(), SerializationError> {
    let plan = self.provider.plans().plan_for::<T>()?;
    let include_nulls = self.provider.config().includes_null_properties();
    self.sink.write_start_object()?;
    for property in plan.properties() {
      let slot = bean.property_value(property.name());
      if !include_nulls && Self::is_null(&slot)? {
        tracing::trace!("write_bean: skipping null property {}", property);
        continue;
      }
      self.sink.write_field_name(property.name())?;
      self.write_value_for_property(slot, Some(property))?;
    }
    self.sink.write_end_object()?;
    Ok(())
  }

  pub fn write_optional_bean<T: JsonBean>(&mut self, bean: Option<&T>) -> Result<(), SerializationError> {
    match bean {
      Some(bean) => self.write_bean(bean),
      None => self.write_root_null(),
    }
  }

  fn write_null(&mut self, property: Option<&PropertyId>) -> Result<(), SerializationError> {
    let serializer = self.provider.resolve_null_serializer(property);
    let before = self.sink.position();
    serializer
      .write_null(&mut *self.sink)
      .map_err(|err| Self::rejected_null_output(err, property))?;
    let after = self.sink.position();
    if self.provider.config().verify_null_output {
      Self::verify_null_output(before, after, property)?;
    }
    if after.depth == before.depth && after.values == before.values {
      if let Some(name) = self.sink.discard_pending_field() {
        tracing::debug!("Null serializer wrote nothing; field {} suppressed", name);
      }
    }
    Ok(())
  }

  fn is_null(slot: &ValueSlot<'_>) -> Result<bool, SerializationError> {
    match slot {
      ValueSlot::Null => Ok(true),
      ValueSlot::Present(value) => Ok(value.to_json_value()?.is_null()),
    }
  }

  /// The sink refuses structurally invalid tokens with `InvalidData`, e.g. a second value in a
  /// field or at the root.
  fn rejected_null_output(err: io::Error, property: Option<&PropertyId>) -> SerializationError {
    if err.kind() != io::ErrorKind::InvalidData {
      return SerializationError::Io(err);
    }
    SerializationError::InvalidNullOutput {
      target: Self::target(property),
      reason: err.to_string(),
    }
  }

  fn target(property: Option<&PropertyId>) -> String {
    property.map_or_else(|| "tree value".to_string(), |p| p.to_string())
  }

  fn verify_null_output(
    before: WritePosition,
    after: WritePosition,
    property: Option<&PropertyId>,
  ) -> Result<(), SerializationError> {
    let target = || Self::target(property);
    if after.depth != before.depth {
      return Err(SerializationError::InvalidNullOutput {
        target: target(),
        reason: format!("nesting depth changed from {} to {}", before.depth, after.depth),
      });
    }
    let written = after.values.saturating_sub(before.values);
    if written > 1 {
      return Err(SerializationError::InvalidNullOutput {
        target: target(),
        reason: format!("wrote {} values, at most one is allowed", written),
      });
    }
    Ok(())
  }
}
