//! # Schema Validation
//!
//! Compiles the model mapping schema into a reusable validator and
//! reports violations against arbitrary JSON values.
//!
//! ## Draft Detection
//!
//! The draft is taken from the schema's `$schema` keyword. The bundled
//! schema declares draft-07; schemas without `$schema` fall back to the
//! `jsonschema` crate's default (2020-12).
//!
//! ## Schema Resolution
//!
//! Internal `$ref`s of the form `#/definitions/<name>` are resolved by the
//! jsonschema crate natively. External references are served from a local
//! registry: every `*.schema.json` file in the directory of a schema loaded
//! through [`ModelSchema::from_path`]. Anything else fails compilation.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// File name of the schema embedded in the binary.
pub const BUNDLED_SCHEMA_NAME: &str = "model-mapping.schema.json";

const BUNDLED_SCHEMA: &str = include_str!("../../../schemas/model-mapping.schema.json");

/// Resolves external `$ref`s against an in-memory registry only.
///
/// Keeps compilation offline: an unknown URI is an error, not a fetch.
struct OfflineRetriever {
    /// Map from URI (or bare file name) to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        Err(format!("schema '{uri_str}' is not available offline").into())
    }
}

/// Error while loading or compiling a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or is not JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    Load {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema is JSON but not a compilable JSON Schema.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    Build {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error while scanning the schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value; empty at the document root.
    pub instance_path: String,
    /// JSON Pointer within the schema to the keyword that failed.
    pub schema_path: String,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.instance_path, self.message)
    }
}

/// The fixed schema, compiled once.
///
/// `ModelSchema` is immutable and `Send + Sync`; editor sessions hold it
/// behind an `Arc` so any number of sessions can share one compilation.
pub struct ModelSchema {
    name: String,
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSchema")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ModelSchema {
    /// Compile the schema embedded at build time.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded schema is corrupt, which the test suite
    /// rules out.
    pub fn bundled() -> Result<Self, SchemaError> {
        let value: Value =
            serde_json::from_str(BUNDLED_SCHEMA).map_err(|e| SchemaError::Load {
                schema_name: BUNDLED_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::compile(BUNDLED_SCHEMA_NAME, value, HashMap::new())
    }

    /// Compile an in-memory schema with no external references available.
    pub fn from_value(name: impl Into<String>, schema: Value) -> Result<Self, SchemaError> {
        Self::compile(&name.into(), schema, HashMap::new())
    }

    /// Load and compile a schema file.
    ///
    /// Every other `*.schema.json` file in the same directory is registered
    /// for `$ref` resolution, under its file name and under its `$id`.
    /// Siblings that cannot be read or parsed are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Load`] if the file cannot be read or parsed,
    /// [`SchemaError::Build`] if it does not compile.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(BUNDLED_SCHEMA_NAME)
            .to_string();

        let schema = read_schema_file(path, &name)?;

        let mut registry = HashMap::new();
        if let Some(dir) = path.parent().filter(|d| d.is_dir()) {
            for entry in std::fs::read_dir(dir)? {
                let sibling = entry?.path();
                let Some(sibling_name) = sibling.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if sibling_name == name || !sibling_name.ends_with(".schema.json") {
                    continue;
                }
                let value = match read_schema_file(&sibling, sibling_name) {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(
                            schema = %sibling_name,
                            error = %e,
                            "skipping unreadable sibling schema"
                        );
                        continue;
                    }
                };
                if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
                    registry.insert(id.to_string(), value.clone());
                }
                registry.insert(sibling_name.to_string(), value);
            }
        }

        Self::compile(&name, schema, registry)
    }

    fn compile(
        name: &str,
        schema: Value,
        registry: HashMap<String, Value>,
    ) -> Result<Self, SchemaError> {
        let registered = registry.len();
        let mut opts = jsonschema::options();
        opts.with_retriever(OfflineRetriever {
            schemas_by_uri: registry,
        });

        let validator = opts.build(&schema).map_err(|e| SchemaError::Build {
            schema_name: name.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(schema = %name, registered, "compiled model schema");

        Ok(Self {
            name: name.to_string(),
            schema,
            validator,
        })
    }

    /// Schema label: its file name, or [`BUNDLED_SCHEMA_NAME`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw schema document, as handed to form renderers.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Whether `instance` conforms.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Every violation of `instance`, in the validator's traversal order.
    ///
    /// Empty if and only if the instance conforms.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }
}

fn read_schema_file(path: &Path, name: &str) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Load {
        schema_name: name.to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    serde_json::from_str(&content).map_err(|e| SchemaError::Load {
        schema_name: name.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}
