//! # mme-schema - Model Mapping Schema Validation
//!
//! Owns the single JSON Schema the editor validates against: the
//! FHIRConnect `model-mapping.schema.json`, bundled into the binary at
//! build time. Operators may point the tools at a different schema file;
//! either way the schema is compiled exactly once into a [`ModelSchema`]
//! and shared read-only from then on.
//!
//! ## Reporting
//!
//! [`ModelSchema::violations`] walks the whole instance and returns every
//! violation, never just the first. Each [`Violation`] renders as
//! `"<instance_path> <message>"`, the format shown in the editor's result
//! region.
//!
//! ## Crate Policy
//!
//! - No network access during compilation: external `$ref`s resolve only
//!   against schemas that sit next to the loaded schema file.
//! - No dependencies on other `mme-*` crates.

pub mod validate;

pub use validate::{ModelSchema, SchemaError, Violation, BUNDLED_SCHEMA_NAME};
