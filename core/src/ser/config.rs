use crate::ser::ConfigOption;

/// Whether null bean properties are written at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inclusion {
  /// Null properties go through null serializer resolution.
  #[default]
  Always,
  /// Null properties are skipped before any null serializer is resolved.
  NonNull,
}

/// Immutable settings of a serialization session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationConfig {
  pub property_inclusion: Inclusion,
  /// Reject null serializers that write more than one value or leave a scope open.
  pub verify_null_output: bool,
}

impl Default for SerializationConfig {
  fn default() -> Self {
    SerializationConfig {
      property_inclusion: Inclusion::Always,
      verify_null_output: true,
    }
  }
}

impl SerializationConfig {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> SerializationConfig {
    let mut config = SerializationConfig::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn includes_null_properties(&self) -> bool {
    self.property_inclusion == Inclusion::Always
  }
}
