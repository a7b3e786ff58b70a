use crate::ser::{JsonSink, WritePosition};
use serde_json::Number;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
  Root,
  Object,
  Array,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
  scope: Scope,
  values: usize,
}

fn invalid(message: impl Into<String>) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidData, message.into())
}

/// Compact JSON writer over any [`Write`].
///
/// Rejects structurally invalid token sequences: a value inside an object without a field
/// name, a second root value, or a mismatched end token.
#[derive(Debug)]
pub struct JsonGenerator<W: Write> {
  out: W,
  stack: Vec<Frame>,
  pending_field: Option<String>,
}

impl<W: Write> JsonGenerator<W> {
  pub fn new(out: W) -> Self {
    Self {
      out,
      stack: vec![Frame {
        scope: Scope::Root,
        values: 0,
      }],
      pending_field: None,
    }
  }

  pub fn get_ref(&self) -> &W {
    &self.out
  }

  /// Flushes and returns the underlying writer. Fails if a scope or field name is still open.
  pub fn finish(mut self) -> io::Result<W> {
    if self.stack.len() != 1 {
      return Err(invalid(format!("{} scope(s) left open", self.stack.len() - 1)));
    }
    if let Some(name) = self.pending_field.take() {
      return Err(invalid(format!("field `{}` has no value", name)));
    }
    self.out.flush()?;
    Ok(self.out)
  }

  fn top_mut(&mut self) -> &mut Frame {
    let last = self.stack.len() - 1;
    &mut self.stack[last]
  }

  fn before_value(&mut self) -> io::Result<()> {
    let frame = *self.top_mut();
    match frame.scope {
      Scope::Root => {
        if frame.values > 0 {
          return Err(invalid("a root value has already been written"));
        }
      }
      Scope::Object => {
        let name = self
          .pending_field
          .take()
          .ok_or_else(|| invalid("value written inside an object without a field name"))?;
        if frame.values > 0 {
          self.out.write_all(b",")?;
        }
        serde_json::to_writer(&mut self.out, &name)?;
        self.out.write_all(b":")?;
      }
      Scope::Array => {
        if frame.values > 0 {
          self.out.write_all(b",")?;
        }
      }
    }
    self.top_mut().values += 1;
    Ok(())
  }

  fn end_scope(&mut self, expected: Scope, token: &[u8]) -> io::Result<()> {
    let frame = *self.top_mut();
    if frame.scope != expected {
      return Err(invalid(format!("cannot close {:?} while in {:?}", expected, frame.scope)));
    }
    if let Some(name) = self.pending_field.as_ref() {
      return Err(invalid(format!("field `{}` has no value", name)));
    }
    self.stack.pop();
    self.out.write_all(token)
  }
}

impl<W: Write> JsonSink for JsonGenerator<W> {
  fn write_null(&mut self) -> io::Result<()> {
    self.before_value()?;
    self.out.write_all(b"null")
  }

  fn write_bool(&mut self, value: bool) -> io::Result<()> {
    self.before_value()?;
    let token: &[u8] = if value { b"true" } else { b"false" };
    self.out.write_all(token)
  }

  fn write_number(&mut self, value: &Number) -> io::Result<()> {
    self.before_value()?;
    write!(self.out, "{}", value)
  }

  fn write_string(&mut self, value: &str) -> io::Result<()> {
    self.before_value()?;
    serde_json::to_writer(&mut self.out, value)?;
    Ok(())
  }

  fn write_start_object(&mut self) -> io::Result<()> {
    self.before_value()?;
    self.out.write_all(b"{")?;
    self.stack.push(Frame {
      scope: Scope::Object,
      values: 0,
    });
    Ok(())
  }

  fn write_end_object(&mut self) -> io::Result<()> {
    self.end_scope(Scope::Object, b"}")
  }

  fn write_start_array(&mut self) -> io::Result<()> {
    self.before_value()?;
    self.out.write_all(b"[")?;
    self.stack.push(Frame {
      scope: Scope::Array,
      values: 0,
    });
    Ok(())
  }

  fn write_end_array(&mut self) -> io::Result<()> {
    self.end_scope(Scope::Array, b"]")
  }

  fn write_field_name(&mut self, name: &str) -> io::Result<()> {
    if self.top_mut().scope != Scope::Object {
      return Err(invalid(format!("field `{}` written outside of an object", name)));
    }
    if let Some(pending) = self.pending_field.as_ref() {
      return Err(invalid(format!("field `{}` has no value", pending)));
    }
    self.pending_field = Some(name.to_string());
    Ok(())
  }

  fn discard_pending_field(&mut self) -> Option<String> {
    self.pending_field.take()
  }

  fn position(&self) -> WritePosition {
    let frame = self.stack[self.stack.len() - 1];
    WritePosition {
      depth: self.stack.len() - 1,
      values: frame.values,
    }
  }
}
