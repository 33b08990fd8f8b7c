//! # Editor Session
//!
//! Owns the document text, view mode and validation result, and mediates
//! between the two editing views and the schema.

use std::path::Path;
use std::sync::Arc;

use mme_schema::ModelSchema;
use serde_json::Value;

use crate::error::SessionError;
use crate::export::Export;
use crate::load::{read_document, LoadOutcome, LoadTicket};
use crate::mode::ViewMode;
use crate::snapshot::{derive_form_snapshot, is_truthy};
use crate::validation::ValidationResult;

/// Document text of a fresh session.
pub const INITIAL_TEXT: &str = "{}";

/// One editing session over one document.
///
/// `generation` advances on every text mutation and every started load;
/// a load completes only if its ticket still carries the current
/// generation.
#[derive(Debug)]
pub struct EditorSession {
    schema: Arc<ModelSchema>,
    text: String,
    mode: ViewMode,
    validation: ValidationResult,
    generation: u64,
}

impl EditorSession {
    /// Start a session with [`INITIAL_TEXT`] in code mode.
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self::with_text(schema, INITIAL_TEXT)
    }

    /// Start a session over existing text.
    pub fn with_text(schema: Arc<ModelSchema>, text: impl Into<String>) -> Self {
        Self {
            schema,
            text: text.into(),
            mode: ViewMode::default(),
            validation: ValidationResult::Unknown,
            generation: 0,
        }
    }

    /// Start a session against the bundled model mapping schema.
    pub fn bundled() -> Result<Self, SessionError> {
        Ok(Self::new(Arc::new(ModelSchema::bundled()?)))
    }

    /// The schema this session validates against.
    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// Current document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mounted view.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Result of the last validation, or `Unknown` if the text changed since.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Replace the document text verbatim. Code edits and loads land here.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touch();
        tracing::debug!(
            generation = self.generation,
            len = self.text.len(),
            "document text replaced"
        );
    }

    /// Replace the document text with form output, indented by two spaces.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Serialization`] if the value cannot be
    /// serialized; the text is left unchanged in that case.
    pub fn set_from_form(&mut self, form: &Value) -> Result<(), SessionError> {
        let text = serde_json::to_string_pretty(form)?;
        self.set_text(text);
        Ok(())
    }

    /// Switch the mounted view. Text and validation are untouched.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "view mode switched");
        }
        self.mode = mode;
    }

    /// Parse the text and check it against the schema.
    ///
    /// A parse failure yields `Invalid` with the parser's message as the
    /// only entry. Otherwise every schema violation contributes one
    /// `"<instance_path> <message>"` entry.
    pub fn validate(&mut self) -> &ValidationResult {
        self.validation = match serde_json::from_str::<Value>(&self.text) {
            Err(e) => ValidationResult::Invalid(vec![e.to_string()]),
            Ok(instance) => {
                let messages: Vec<String> = self
                    .schema
                    .violations(&instance)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                if messages.is_empty() {
                    ValidationResult::Valid
                } else {
                    ValidationResult::Invalid(messages)
                }
            }
        };

        tracing::debug!(
            schema = %self.schema.name(),
            valid = self.validation.is_valid(),
            errors = self.validation.messages().len(),
            "document validated"
        );

        &self.validation
    }

    /// The export artifact for the current text, unvalidated.
    pub fn download(&self) -> Export {
        Export::new(self.text.clone())
    }

    /// The value the form view should display.
    pub fn form_snapshot(&self) -> Value {
        derive_form_snapshot(&self.text)
    }

    /// Whether the validate trigger is offered.
    ///
    /// In form mode it is withheld while the snapshot is JSON-falsy
    /// (`null`, `false`, `0`, `""`). [`validate`](Self::validate) itself
    /// never checks this.
    pub fn validate_enabled(&self) -> bool {
        match self.mode {
            ViewMode::Code => true,
            ViewMode::Form => is_truthy(&self.form_snapshot()),
        }
    }

    /// Start a load. The returned ticket is invalidated by any later
    /// `begin_load` or text mutation.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Finish a load started with [`begin_load`](Self::begin_load).
    ///
    /// Stale tickets are discarded regardless of the read result. A failed
    /// read leaves the session as it was.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        contents: Result<String, String>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding superseded load"
            );
            return LoadOutcome::Superseded;
        }

        match contents {
            Ok(text) => {
                self.set_text(text);
                LoadOutcome::Applied
            }
            Err(reason) => {
                tracing::warn!(%reason, "document load failed; keeping current text");
                LoadOutcome::Failed(reason)
            }
        }
    }

    /// Read `path` and load it into the session.
    pub async fn load_file(&mut self, path: &Path) -> LoadOutcome {
        let ticket = self.begin_load();
        let contents = read_document(path).await.map_err(|e| e.to_string());
        self.complete_load(ticket, contents)
    }

    fn touch(&mut self) {
        self.validation = ValidationResult::Unknown;
        self.generation += 1;
    }
}
