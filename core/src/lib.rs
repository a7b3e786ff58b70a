//! Null-value resolution core for the Nexus JSON serializer.

pub mod ser;

pub use ser::*;
