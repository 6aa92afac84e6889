//! Generative text service boundary
//!
//!     A generative service can be asked to produce more Space text, which is then appended
//!     to the working document and re-parsed. This module holds everything on our side of
//!     that boundary: the instruction and prompt text, the request shape, the [`Generator`]
//!     trait a client implements, and the append operation.
//!
//!     No client ships here. Retries, timeouts and transport failures belong to whoever
//!     implements [`Generator`]; they come back as a [`GenerateError`] value. The parser is
//!     never on that path: it only ever sees the final text.

use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Instruction sent with every request, asking the service to answer in Space format only.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a console tool in the spirit of 'cat' or 'sed'.
RULES:
1. Keep the vocabulary small. Prefer the plainest, most direct word.
2. Keep sentences short. No filler.
3. Keep terms in a strict, predictable order.
4. Answer ONLY in the ⫻ Space format.

Format:
⫻{name}/{type}:{place}
{content}

Common types:
- meta: context or summary
- json: data store
- utf8: raw text
- list: bullet points

Example answer:
⫻status/meta:0
SUCCESS. Processed inputs.

⫻data/json:store
{\"processed_count\": 4}

Questions are answered inside a ⫻ section as well.
Nothing may appear outside ⫻ sections.
";

/// A three-record example document, useful as a starting point.
pub const STARTER_TEMPLATE: &str = "\
⫻content/meta-template-examples:0
Templates for ⫻ sections in the Space format are structured to ensure clarity.

⫻const/json:store
{\"key\":\"value\", \"other_parameter\":123}

⫻context/tag:meta
{explanatory note, context-setting, or system-reminder}";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Build the user prompt, framing the current document as context when there is one.
pub fn compose_prompt(command: &str, context: Option<&str>) -> String {
    match context.filter(|c| !c.trim().is_empty()) {
        Some(context) => format!("CONTEXT INPUT:\n{context}\n\nUSER COMMAND:\n{command}"),
        None => format!("USER COMMAND:\n{command}"),
    }
}

/// Everything a generator needs for one call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
}

impl GenerationRequest {
    /// Request with the default instruction, model and temperature.
    pub fn new(command: &str, context: Option<&str>) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: compose_prompt(command, context),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Failure reported by a generator
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The client is missing credentials or setup
    NotConfigured(String),
    /// The service or transport failed
    Service(String),
    /// The service answered with nothing
    EmptyResponse,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NotConfigured(msg) => write!(f, "Generator not configured: {msg}"),
            GenerateError::Service(msg) => write!(f, "Generator error: {msg}"),
            GenerateError::EmptyResponse => write!(f, "No response generated."),
        }
    }
}

impl std::error::Error for GenerateError {}

/// A client of a generative text service
pub trait Generator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}

impl<F> Generator for F
where
    F: Fn(&GenerationRequest) -> Result<String, GenerateError>,
{
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        self(request)
    }
}

/// Render a failure as a record, for callers that surface errors inside the document.
pub fn error_record_text(err: &GenerateError) -> String {
    match err {
        GenerateError::EmptyResponse => format!("⫻error/meta:alert\n{err}"),
        _ => format!("⫻error/meta:system\n{err}"),
    }
}

/// Append generated text to a document: both sides trimmed, one blank line between them.
pub fn append_generated(document: &str, generated: &str) -> String {
    let document = document.trim();
    let generated = generated.trim();
    match (document.is_empty(), generated.is_empty()) {
        (true, _) => generated.to_string(),
        (false, true) => document.to_string(),
        (false, false) => format!("{document}\n\n{generated}"),
    }
}

/// Run a generator and append its output to the document.
///
/// A blank answer counts as [`GenerateError::EmptyResponse`]. Errors are returned unchanged
/// and the document is left alone.
pub fn generate_into<G: Generator + ?Sized>(
    generator: &G,
    request: &GenerationRequest,
    document: &str,
) -> Result<String, GenerateError> {
    debug!(model = %request.model, "requesting generated records");
    let generated = generator.generate(request)?;
    if generated.trim().is_empty() {
        return Err(GenerateError::EmptyResponse);
    }
    Ok(append_generated(document, &generated))
}
