use crate::ser::PropertyId;
use std::io;
use thiserror::Error;

/// A null serializer reference that cannot be turned into a working serializer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
  #[error("Unknown null serializer `{name}` referenced by {referrer}")]
  UnknownNullSerializer { name: String, referrer: String },
  #[error("Invalid constant null value for {referrer}: {reason}")]
  InvalidNullConstant { referrer: String, reason: String },
  #[error("Duplicate property: {0}")]
  DuplicateProperty(PropertyId),
  #[error("Null serializer `{0}` is already registered")]
  DuplicateNullSerializer(String),
  #[error("Type name `{0}` is already used by another bean type")]
  DuplicateTypeName(String),
}

#[derive(Debug, Error)]
pub enum SerializationError {
  #[error("I/O failure: {0}")]
  Io(#[from] io::Error),
  #[error("Value conversion failed: {0}")]
  Value(#[from] serde_json::Error),
  #[error("Configuration error: {0}")]
  Configuration(#[from] ConfigurationError),
  #[error("Null serializer for {target} produced invalid output: {reason}")]
  InvalidNullOutput { target: String, reason: String },
}

impl SerializationError {
  pub fn is_io(&self) -> bool {
    matches!(self, SerializationError::Io(_))
  }
}

static_assertions::assert_impl_all!(ConfigurationError: Send, Sync);
static_assertions::assert_impl_all!(SerializationError: Send, Sync);
