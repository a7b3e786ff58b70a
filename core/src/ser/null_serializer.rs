use crate::ser::JsonSink;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::io;
use std::sync::Arc;

/// Writes the representation of an absent value.
///
/// Implementations see only the sink: the value is absent, and provider state is off limits.
/// They write exactly one JSON value, or nothing to suppress the slot, and fail only when the
/// sink fails.
pub trait NullSerializer: Send + Sync {
  fn write_null(&self, sink: &mut dyn JsonSink) -> io::Result<()>;
}

/// Writes the literal `null` token.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNullSerializer;

impl NullSerializer for DefaultNullSerializer {
  fn write_null(&self, sink: &mut dyn JsonSink) -> io::Result<()> {
    sink.write_null()
  }
}

/// Writes a fixed JSON value in place of every null.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantNullSerializer {
  value: Value,
}

impl ConstantNullSerializer {
  pub fn new(value: Value) -> Self {
    Self { value }
  }

  pub fn string(value: impl Into<String>) -> Self {
    Self::new(Value::String(value.into()))
  }

  /// Parses `raw` once; the parsed value is reused for every write.
  pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(raw).map(Self::new)
  }

  pub fn value(&self) -> &Value {
    &self.value
  }
}

impl NullSerializer for ConstantNullSerializer {
  fn write_null(&self, sink: &mut dyn JsonSink) -> io::Result<()> {
    sink.write_value(&self.value)
  }
}

/// Writes nothing. A property resolved to this serializer is left out entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppressingNullSerializer;

impl NullSerializer for SuppressingNullSerializer {
  fn write_null(&self, _sink: &mut dyn JsonSink) -> io::Result<()> {
    Ok(())
  }
}

/// Adapts a closure to [`NullSerializer`].
pub struct FnNullSerializer<F>(F);

impl<F> FnNullSerializer<F>
where
  F: Fn(&mut dyn JsonSink) -> io::Result<()> + Send + Sync,
{
  pub fn new(f: F) -> Self {
    Self(f)
  }
}

impl<F> NullSerializer for FnNullSerializer<F>
where
  F: Fn(&mut dyn JsonSink) -> io::Result<()> + Send + Sync,
{
  fn write_null(&self, sink: &mut dyn JsonSink) -> io::Result<()> {
    (self.0)(sink)
  }
}

static BASELINE: Lazy<NullSerializerHandle> = Lazy::new(|| NullSerializerHandle::new(DefaultNullSerializer));

/// Shared reference to a [`NullSerializer`]. Two handles are equal when they point at the same
/// serializer instance.
#[derive(Clone)]
pub struct NullSerializerHandle(Arc<dyn NullSerializer>);

impl NullSerializerHandle {
  pub fn new(serializer: impl NullSerializer + 'static) -> Self {
    NullSerializerHandle(Arc::new(serializer))
  }

  pub fn from_arc(serializer: Arc<dyn NullSerializer>) -> Self {
    NullSerializerHandle(serializer)
  }

  pub fn from_fn<F>(f: F) -> Self
  where
    F: Fn(&mut dyn JsonSink) -> io::Result<()> + Send + Sync + 'static, {
    Self::new(FnNullSerializer::new(f))
  }

  /// The built-in serializer writing `null`. Always the same instance.
  pub fn baseline() -> Self {
    BASELINE.clone()
  }

  pub fn is_baseline(&self) -> bool {
    self == &*BASELINE
  }

  pub fn write_null(&self, sink: &mut dyn JsonSink) -> io::Result<()> {
    self.0.write_null(sink)
  }

  fn addr(&self) -> *const () {
    Arc::as_ptr(&self.0) as *const ()
  }
}

impl Debug for NullSerializerHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "NullSerializerHandle({:p})", self.addr())
  }
}

impl PartialEq for NullSerializerHandle {
  fn eq(&self, other: &Self) -> bool {
    self.addr() == other.addr()
  }
}

impl Eq for NullSerializerHandle {}

impl Hash for NullSerializerHandle {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.addr().hash(state);
  }
}

impl<S: NullSerializer + 'static> From<S> for NullSerializerHandle {
  fn from(serializer: S) -> Self {
    NullSerializerHandle::new(serializer)
  }
}

static_assertions::assert_impl_all!(NullSerializerHandle: Send, Sync);
