//! Shared helpers for the Nexus JSON crates.

pub mod collections;
