use crate::ser::{
  ConfigurationError, JsonBean, NullSerializerCatalog, PropertyDescriptor, PropertyId, SerializationPlanCache,
  TypeDescriptor, ValueSlot,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

static COUNTED_DESCRIPTIONS: AtomicUsize = AtomicUsize::new(0);
static RACED_DESCRIPTIONS: AtomicUsize = AtomicUsize::new(0);

struct Counted;

impl JsonBean for Counted {
  fn type_descriptor() -> TypeDescriptor {
    COUNTED_DESCRIPTIONS.fetch_add(1, Ordering::SeqCst);
    TypeDescriptor::new("Counted")
      .property("first")
      .with_property(PropertyDescriptor::new("second").null_using_named("suppress"))
  }

  fn property_value(&self, _name: &str) -> ValueSlot<'_> {
    ValueSlot::Null
  }
}

struct Raced;

impl JsonBean for Raced {
  fn type_descriptor() -> TypeDescriptor {
    RACED_DESCRIPTIONS.fetch_add(1, Ordering::SeqCst);
    TypeDescriptor::new("Raced").property("a")
  }

  fn property_value(&self, _name: &str) -> ValueSlot<'_> {
    ValueSlot::Null
  }
}

struct Indexed;

impl JsonBean for Indexed {
  fn type_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Indexed")
      .property("first")
      .with_property(PropertyDescriptor::new("second").null_using_named("suppress"))
  }

  fn property_value(&self, _name: &str) -> ValueSlot<'_> {
    ValueSlot::Null
  }
}

struct SharedFirst;

impl JsonBean for SharedFirst {
  fn type_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Shared").with_property(PropertyDescriptor::new("a").null_using_named("suppress"))
  }

  fn property_value(&self, _name: &str) -> ValueSlot<'_> {
    ValueSlot::Null
  }
}

struct SharedSecond;

impl JsonBean for SharedSecond {
  fn type_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Shared").property("a")
  }

  fn property_value(&self, _name: &str) -> ValueSlot<'_> {
    ValueSlot::Null
  }
}

struct Broken;

impl JsonBean for Broken {
  fn type_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Broken").with_property(PropertyDescriptor::new("a").null_using_named("missing"))
  }

  fn property_value(&self, _name: &str) -> ValueSlot<'_> {
    ValueSlot::Null
  }
}

#[test]
fn test_plan_is_built_once_and_shared() {
  let cache = SerializationPlanCache::new(NullSerializerCatalog::new());
  let first = cache.plan_for::<Counted>().expect("plan");
  let second = cache.plan_for::<Counted>().expect("plan");

  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(COUNTED_DESCRIPTIONS.load(Ordering::SeqCst), 1);
  assert_eq!(cache.len(), 1);
  assert_eq!(
    first.properties(),
    &[PropertyId::new("Counted", "first"), PropertyId::new("Counted", "second")]
  );
}

#[test]
fn test_registry_is_indexed_by_type_name() {
  let cache = SerializationPlanCache::default();
  assert!(cache.registry_for("Indexed").is_none());
  assert!(cache.lookup_override(&PropertyId::new("Indexed", "second")).is_none());

  let plan = cache.plan_for::<Indexed>().expect("plan");
  let registry = cache.registry_for("Indexed").expect("registry");
  assert!(Arc::ptr_eq(plan.overrides(), &registry));
  assert_eq!(
    cache.lookup_override(&PropertyId::new("Indexed", "second")).as_ref(),
    cache.catalog().get("suppress")
  );
  assert!(cache.lookup_override(&PropertyId::new("Indexed", "first")).is_none());
}

#[test]
fn test_reused_type_name_keeps_first_registry() {
  let cache = SerializationPlanCache::default();
  let property = PropertyId::new("Shared", "a");
  let plan = cache.plan_for::<SharedFirst>().expect("plan");
  let declared = cache.lookup_override(&property).expect("declared override");

  let err = cache.plan_for::<SharedSecond>().expect_err("type name in use");
  assert_eq!(err, ConfigurationError::DuplicateTypeName("Shared".to_string()));
  assert_eq!(cache.len(), 1);

  let registry = cache.registry_for("Shared").expect("registry");
  assert!(Arc::ptr_eq(plan.overrides(), &registry));
  assert_eq!(cache.lookup_override(&property), Some(declared));
}

#[test]
fn test_concurrent_first_use_introspects_once() {
  let cache = Arc::new(SerializationPlanCache::default());
  let handles = (0..8)
    .map(|_| {
      let cache = cache.clone();
      thread::spawn(move || cache.plan_for::<Raced>().expect("plan"))
    })
    .collect::<Vec<_>>();
  let plans = handles.into_iter().map(|h| h.join().unwrap()).collect::<Vec<_>>();

  assert_eq!(RACED_DESCRIPTIONS.load(Ordering::SeqCst), 1);
  assert!(plans.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn test_configuration_error_is_not_cached() {
  let cache = SerializationPlanCache::default();
  let err = cache.plan_for::<Broken>().expect_err("unknown serializer");
  assert!(matches!(err, ConfigurationError::UnknownNullSerializer { .. }));
  assert!(cache.is_empty());
  assert!(cache.plan_for::<Broken>().is_err());
}
