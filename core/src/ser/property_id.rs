use std::fmt::{Display, Formatter};

/// Identifies one serialized field of one type.
///
/// Ordered by declaring type first, then by field name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId {
  declaring_type: String,
  name: String,
}

impl PropertyId {
  pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      declaring_type: declaring_type.into(),
      name: name.into(),
    }
  }

  pub fn declaring_type(&self) -> &str {
    &self.declaring_type
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

impl Display for PropertyId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}.{}", self.declaring_type, self.name)
  }
}
