use serde_json::{Number, Value};
use std::io;

/// Where a sink currently stands: how deeply nested it is and how many values have been started
/// in the innermost open scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePosition {
  pub depth: usize,
  pub values: usize,
}

/// Streaming destination for JSON tokens.
///
/// A field name written with [`write_field_name`](JsonSink::write_field_name) is deferred until
/// the next value token, so a slot whose value writes nothing can drop its name with
/// [`discard_pending_field`](JsonSink::discard_pending_field).
pub trait JsonSink {
  fn write_null(&mut self) -> io::Result<()>;
  fn write_bool(&mut self, value: bool) -> io::Result<()>;
  fn write_number(&mut self, value: &Number) -> io::Result<()>;
  fn write_string(&mut self, value: &str) -> io::Result<()>;
  fn write_start_object(&mut self) -> io::Result<()>;
  fn write_end_object(&mut self) -> io::Result<()>;
  fn write_start_array(&mut self) -> io::Result<()>;
  fn write_end_array(&mut self) -> io::Result<()>;
  fn write_field_name(&mut self, name: &str) -> io::Result<()>;
  fn discard_pending_field(&mut self) -> Option<String>;
  fn position(&self) -> WritePosition;

  /// Writes a complete value verbatim. Nulls inside `value` are written as literal `null`.
  fn write_value(&mut self, value: &Value) -> io::Result<()> {
    match value {
      Value::Null => self.write_null(),
      Value::Bool(b) => self.write_bool(*b),
      Value::Number(n) => self.write_number(n),
      Value::String(s) => self.write_string(s),
      Value::Array(items) => {
        self.write_start_array()?;
        for item in items {
          self.write_value(item)?;
        }
        self.write_end_array()
      }
      Value::Object(entries) => {
        self.write_start_object()?;
        for (key, item) in entries {
          self.write_field_name(key)?;
          self.write_value(item)?;
        }
        self.write_end_object()
      }
    }
  }
}
