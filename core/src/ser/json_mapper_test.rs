use crate::ser::{
  ConfigOption, ConfigurationError, ConstantNullSerializer, Inclusion, JsonBean, JsonMapper, PropertyDescriptor,
  SerializationError, TypeDescriptor, ValueSlot,
};
use serde_json::json;
use std::sync::Arc;

struct Labeled {
  label: Option<String>,
  count: Option<u32>,
}

impl JsonBean for Labeled {
  fn type_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Labeled")
      .with_property(PropertyDescriptor::new("label").null_using_named("dash"))
      .property("count")
  }

  fn property_value(&self, name: &str) -> ValueSlot<'_> {
    match name {
      "label" => (&self.label).into(),
      "count" => (&self.count).into(),
      _ => ValueSlot::Null,
    }
  }
}

struct Orphan;

impl JsonBean for Orphan {
  fn type_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Orphan").with_property(PropertyDescriptor::new("a").null_using_named("unregistered"))
  }

  fn property_value(&self, _name: &str) -> ValueSlot<'_> {
    ValueSlot::Null
  }
}

struct Greeting {
  a: Option<String>,
}

impl JsonBean for Greeting {
  fn type_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Message")
      .with_property(PropertyDescriptor::new("a").null_using(ConstantNullSerializer::string("foobar")))
  }

  fn property_value(&self, name: &str) -> ValueSlot<'_> {
    match name {
      "a" => (&self.a).into(),
      _ => ValueSlot::Null,
    }
  }
}

struct Farewell {
  a: Option<String>,
}

impl JsonBean for Farewell {
  fn type_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Message").property("a")
  }

  fn property_value(&self, name: &str) -> ValueSlot<'_> {
    match name {
      "a" => (&self.a).into(),
      _ => ValueSlot::Null,
    }
  }
}

fn empty() -> Labeled {
  Labeled { label: None, count: None }
}

#[test]
fn test_registered_serializer_is_used_by_property_declaration() {
  let mapper = JsonMapper::builder()
    .register_null_serializer("dash", ConstantNullSerializer::string("-"))
    .build()
    .expect("build");
  assert_eq!(
    mapper.write_value_as_string(Some(&empty())).unwrap(),
    r#"{"label":"-","count":null}"#
  );
}

#[test]
fn test_default_null_serializer_by_name() {
  let mapper = JsonMapper::builder()
    .register_null_serializer("dash", ConstantNullSerializer::string("-"))
    .null_serializer_named("dash")
    .build()
    .expect("build");
  assert_eq!(mapper.write_null_as_string().unwrap(), r#""-""#);
  assert!(mapper.provider().has_null_serializer_override());
}

#[test]
fn test_unknown_default_name_fails_build() {
  let err = JsonMapper::builder().null_serializer_named("nope").build().expect_err("unknown");
  assert!(matches!(err, ConfigurationError::UnknownNullSerializer { ref name, .. } if name == "nope"));
}

#[test]
fn test_duplicate_registration_fails_build() {
  let err = JsonMapper::builder()
    .register_null_serializer("suppress", ConstantNullSerializer::string("x"))
    .build()
    .expect_err("duplicate");
  assert_eq!(err, ConfigurationError::DuplicateNullSerializer("suppress".to_string()));
}

#[test]
fn test_unresolvable_property_declaration_surfaces_on_write() {
  let mapper = JsonMapper::new();
  let err = mapper.write_value_as_string(Some(&Orphan)).expect_err("unknown");
  assert!(matches!(
    err,
    SerializationError::Configuration(ConfigurationError::UnknownNullSerializer { .. })
  ));
}

#[test]
fn test_session_customization_does_not_leak() {
  let mapper = JsonMapper::new();
  let session = mapper.session().with_null_serializer(ConstantNullSerializer::string("foobar"));
  assert_eq!(session.write_null_as_string().unwrap(), r#""foobar""#);
  assert_eq!(mapper.write_null_as_string().unwrap(), "null");

  let mut session = mapper.session();
  session
    .provider_mut()
    .set_null_serializer(ConstantNullSerializer::new(json!([])));
  assert_eq!(session.write_tree_as_string(&json!({"a": null})).unwrap(), r#"{"a":[]}"#);
  assert_eq!(mapper.write_tree_as_string(&json!({"a": null})).unwrap(), r#"{"a":null}"#);
}

#[test]
fn test_inclusion_option_applies_to_every_session() {
  let mapper = JsonMapper::builder()
    .register_null_serializer("dash", ConstantNullSerializer::string("-"))
    .option(ConfigOption::with_property_inclusion(Inclusion::NonNull))
    .build()
    .expect("build");
  let value = Labeled {
    label: None,
    count: Some(2),
  };
  assert_eq!(mapper.write_value_as_string(Some(&value)).unwrap(), r#"{"count":2}"#);
  assert_eq!(mapper.config().property_inclusion, Inclusion::NonNull);
  assert_eq!(mapper.session().provider().config(), mapper.provider().config());
}

#[test]
fn test_write_to_writer_returns_it() {
  let mapper = JsonMapper::new();
  let out = mapper.write_tree(Vec::new(), &json!([null, true])).unwrap();
  assert_eq!(out, b"[null,true]");
  let out = mapper.write_value::<_, Labeled>(Vec::new(), None).unwrap();
  assert_eq!(out, b"null");
}

#[test]
fn test_clones_share_plan_cache() {
  let mapper = JsonMapper::builder()
    .register_null_serializer("dash", ConstantNullSerializer::string("-"))
    .build()
    .expect("build");
  let clone = mapper.clone();
  mapper.write_value_as_string(Some(&empty())).unwrap();
  assert!(Arc::ptr_eq(mapper.provider().plans(), clone.provider().plans()));
  assert_eq!(clone.provider().plans().len(), 1);
}

#[test]
fn test_declared_override_survives_type_name_reuse() {
  let mapper = JsonMapper::new();
  let greeting = Greeting { a: None };
  assert_eq!(mapper.write_value_as_string(Some(&greeting)).unwrap(), r#"{"a":"foobar"}"#);

  let err = mapper
    .write_value_as_string(Some(&Farewell { a: None }))
    .expect_err("type name in use");
  assert!(matches!(
    err,
    SerializationError::Configuration(ConfigurationError::DuplicateTypeName(ref name)) if name == "Message"
  ));

  assert_eq!(mapper.write_value_as_string(Some(&greeting)).unwrap(), r#"{"a":"foobar"}"#);
}
