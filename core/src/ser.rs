mod config;
mod config_option;
mod error;
mod json_generator;
mod json_mapper;
#[cfg(test)]
mod json_mapper_test;
mod json_sink;
mod null_override_registry;
mod null_serializer;
mod null_serializer_catalog;
mod null_value_strategy;
mod property_id;
mod provider_factory;
mod serialization_plan;
#[cfg(test)]
mod serialization_plan_test;
mod serialization_provider;
mod type_descriptor;
mod value_write_context;

pub use {
  self::config::*, self::config_option::*, self::error::*, self::json_generator::*, self::json_mapper::*,
  self::json_sink::*, self::null_override_registry::*, self::null_serializer::*, self::null_serializer_catalog::*,
  self::null_value_strategy::*, self::property_id::*, self::provider_factory::*, self::serialization_plan::*,
  self::serialization_provider::*, self::type_descriptor::*, self::value_write_context::*,
};
