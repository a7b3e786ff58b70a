use crate::ser::{Inclusion, SerializationConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOption {
  SetPropertyInclusion(Inclusion),
  SetVerifyNullOutput(bool),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut SerializationConfig) {
    match self {
      ConfigOption::SetPropertyInclusion(inclusion) => {
        config.property_inclusion = *inclusion;
      }
      ConfigOption::SetVerifyNullOutput(verify) => {
        config.verify_null_output = *verify;
      }
    }
  }

  pub fn with_property_inclusion(inclusion: Inclusion) -> ConfigOption {
    ConfigOption::SetPropertyInclusion(inclusion)
  }

  pub fn with_verify_null_output(verify: bool) -> ConfigOption {
    ConfigOption::SetVerifyNullOutput(verify)
  }
}
