use crate::ser::{
  ConfigOption, ConfigurationError, JsonBean, JsonGenerator, NullSerializerCatalog, NullSerializerHandle,
  NullValueStrategy, NullValueStrategyHandle, ProviderFactory, SerializationConfig, SerializationError,
  SerializationPlanCache, SerializationProvider, ValueWriteContext,
};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Arc;

/// Long-lived, shareable serialization configuration.
///
/// Every write derives its own [`SerializationProvider`] from the mapper's provider, so a mapper
/// can be shared across threads while each call customizes its session freely.
#[derive(Debug, Clone)]
pub struct JsonMapper {
  provider: Arc<SerializationProvider>,
}

impl Default for JsonMapper {
  fn default() -> Self {
    Self::from_provider(SerializationProvider::default())
  }
}

impl JsonMapper {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn builder() -> JsonMapperBuilder {
    JsonMapperBuilder::default()
  }

  /// Uses `provider` as the parent of every session. Its config becomes the mapper's config.
  pub fn from_provider(provider: SerializationProvider) -> Self {
    Self {
      provider: Arc::new(provider),
    }
  }

  pub fn provider(&self) -> &SerializationProvider {
    &self.provider
  }

  pub fn config(&self) -> &SerializationConfig {
    self.provider.config()
  }

  /// Starts a session whose provider may be customized before its single write.
  pub fn session(&self) -> SerializationSession {
    SerializationSession {
      provider: ProviderFactory::derive_for_session(&self.provider, self.provider.config.clone()),
    }
  }

  pub fn write_null_as_string(&self) -> Result<String, SerializationError> {
    self.session().write_null_as_string()
  }

  pub fn write_value_as_string<T: JsonBean>(&self, value: Option<&T>) -> Result<String, SerializationError> {
    self.session().write_value_as_string(value)
  }

  pub fn write_tree_as_string(&self, value: &Value) -> Result<String, SerializationError> {
    self.session().write_tree_as_string(value)
  }

  pub fn write_value<W: Write, T: JsonBean>(&self, writer: W, value: Option<&T>) -> Result<W, SerializationError> {
    self.session().write_value(writer, value)
  }

  pub fn write_tree<W: Write>(&self, writer: W, value: &Value) -> Result<W, SerializationError> {
    self.session().write_tree(writer, value)
  }
}

/// One top-level write with its own provider.
#[derive(Debug)]
pub struct SerializationSession {
  provider: SerializationProvider,
}

impl SerializationSession {
  pub fn provider(&self) -> &SerializationProvider {
    &self.provider
  }

  pub fn provider_mut(&mut self) -> &mut SerializationProvider {
    &mut self.provider
  }

  pub fn with_null_serializer(mut self, serializer: impl Into<NullSerializerHandle>) -> Self {
    self.provider.set_null_serializer(serializer);
    self
  }

  pub fn write_null<W: Write>(self, writer: W) -> Result<W, SerializationError> {
    self.write_with(writer, |ctx| ctx.write_root_null())
  }

  pub fn write_value<W: Write, T: JsonBean>(self, writer: W, value: Option<&T>) -> Result<W, SerializationError> {
    self.write_with(writer, |ctx| ctx.write_optional_bean(value))
  }

  pub fn write_tree<W: Write>(self, writer: W, value: &Value) -> Result<W, SerializationError> {
    self.write_with(writer, |ctx| ctx.write_tree(value))
  }

  pub fn write_null_as_string(self) -> Result<String, SerializationError> {
    into_string(self.write_null(Vec::new())?)
  }

  pub fn write_value_as_string<T: JsonBean>(self, value: Option<&T>) -> Result<String, SerializationError> {
    into_string(self.write_value(Vec::new(), value)?)
  }

  pub fn write_tree_as_string(self, value: &Value) -> Result<String, SerializationError> {
    into_string(self.write_tree(Vec::new(), value)?)
  }

  fn write_with<W, F>(self, writer: W, f: F) -> Result<W, SerializationError>
  where
    W: Write,
    F: FnOnce(&mut ValueWriteContext<'_, JsonGenerator<W>>) -> Result<(), SerializationError>, {
    let mut generator = JsonGenerator::new(writer);
    let mut ctx = ValueWriteContext::new(&self.provider, &mut generator);
    f(&mut ctx)?;
    Ok(generator.finish()?)
  }
}

fn into_string(bytes: Vec<u8>) -> Result<String, SerializationError> {
  String::from_utf8(bytes).map_err(|err| SerializationError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

enum DefaultNullSetting {
  Handle(NullSerializerHandle),
  Named(String),
}

#[derive(Default)]
pub struct JsonMapperBuilder {
  registrations: Vec<(String, NullSerializerHandle)>,
  null_serializer: Option<DefaultNullSetting>,
  strategy: Option<NullValueStrategyHandle>,
  options: Vec<ConfigOption>,
}

impl JsonMapperBuilder {
  /// Makes `serializer` available to property declarations under `name`.
  pub fn register_null_serializer(mut self, name: impl Into<String>, serializer: impl Into<NullSerializerHandle>) -> Self {
    self.registrations.push((name.into(), serializer.into()));
    self
  }

  pub fn null_serializer(mut self, serializer: impl Into<NullSerializerHandle>) -> Self {
    self.null_serializer = Some(DefaultNullSetting::Handle(serializer.into()));
    self
  }

  /// Uses the catalog entry `name` as the default null serializer; resolved by [`build`](Self::build).
  pub fn null_serializer_named(mut self, name: impl Into<String>) -> Self {
    self.null_serializer = Some(DefaultNullSetting::Named(name.into()));
    self
  }

  pub fn null_value_strategy(mut self, strategy: impl NullValueStrategy + 'static) -> Self {
    self.strategy = Some(NullValueStrategyHandle::new(strategy));
    self
  }

  pub fn option(mut self, option: ConfigOption) -> Self {
    self.options.push(option);
    self
  }

  pub fn build(self) -> Result<JsonMapper, ConfigurationError> {
    let mut catalog = NullSerializerCatalog::new();
    for (name, serializer) in self.registrations {
      catalog.register(name, serializer)?;
    }
    let null_serializer = match self.null_serializer {
      None => None,
      Some(DefaultNullSetting::Handle(serializer)) => Some(serializer),
      Some(DefaultNullSetting::Named(name)) => Some(catalog.resolve(&name, "default null serializer")?),
    };
    let config = Arc::new(SerializationConfig::from(self.options));
    let mut provider = SerializationProvider::new(Arc::new(SerializationPlanCache::new(catalog)), config);
    if let Some(serializer) = null_serializer {
      provider.set_null_serializer(serializer);
    }
    if let Some(strategy) = self.strategy {
      provider.set_null_value_strategy(strategy);
    }
    tracing::debug!(
      "Built JsonMapper: null_serializer_override = {}, strategy = {}, config = {:?}",
      provider.has_null_serializer_override(),
      provider.null_value_strategy().is_some(),
      provider.config()
    );
    Ok(JsonMapper::from_provider(provider))
  }
}

static_assertions::assert_impl_all!(JsonMapper: Send, Sync);
