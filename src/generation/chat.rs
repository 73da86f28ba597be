//! # Chat-Backed Content Source
//!
//! Asks a completion model for passcodes and passenger rosters using the
//! prompts in `generation::prompts`, then cleans up what comes back before
//! parsing it. Responses are treated as hostile until decoded: code fences
//! are stripped, the wagon passcode is redacted out of passenger text, and a
//! completion that still fails to parse surfaces as a descriptive error
//! instead of flowing onward as data.

use crate::generation::{prompts, ContentSource};
use crate::llm::{CompletionModel, ModelConfig};
use crate::train::PassengerRecord;
use crate::{RailgenError, RailgenResult};
use log::debug;
use rand::rngs::StdRng;
use serde::Deserialize;

/// Placeholder substituted for the passcode in passenger responses.
const REDACTED: &str = "<redacted>";

/// Wire shape of the passcode completion.
#[derive(Debug, Deserialize)]
struct PasscodeResponse {
    /// Theme echoed back by the model; logged, never trusted
    #[serde(default)]
    theme: String,
    /// The requested passcode batch
    passcodes: Vec<String>,
}

/// Content source backed by a chat completion model.
///
/// Generic over the model so tests can script it and embedders can plug in
/// a real transport. The rng parameters of [`ContentSource`] are unused
/// here; creativity comes from the model's own sampling.
#[derive(Debug)]
pub struct ChatContentSource<M> {
    model: M,
    config: ModelConfig,
}

impl<M: CompletionModel> ChatContentSource<M> {
    /// Creates a source with the default model settings.
    pub fn new(model: M) -> Self {
        Self::with_config(model, ModelConfig::default())
    }

    /// Creates a source with explicit model settings.
    pub fn with_config(model: M, config: ModelConfig) -> Self {
        Self { model, config }
    }

    /// Gets the underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: CompletionModel> ContentSource for ChatContentSource<M> {
    fn passcodes(&self, theme: &str, count: u32, _rng: &mut StdRng) -> RailgenResult<Vec<String>> {
        let request = self.config.request(prompts::passcode_prompt(theme, count));
        debug!("passcode request {} for theme '{theme}'", request.id);

        let raw = self.model.complete(&request)?;
        let cleaned = strip_code_fences(&raw);
        let parsed: PasscodeResponse = serde_json::from_str(&cleaned)
            .map_err(|err| decode_error("passcode", &cleaned, &err))?;

        if !parsed.theme.is_empty() && parsed.theme != theme {
            debug!("model echoed theme '{}' for requested '{theme}'", parsed.theme);
        }
        Ok(parsed.passcodes)
    }

    fn passengers(
        &self,
        passcode: &str,
        count: u32,
        _rng: &mut StdRng,
    ) -> RailgenResult<Vec<PassengerRecord>> {
        let request = self.config.request(prompts::passenger_prompt(passcode, count));
        debug!("passenger request {} for {count} passenger(s)", request.id);

        let raw = self.model.complete(&request)?;
        let cleaned = redact_passcode(&strip_code_fences(&raw), passcode);
        let passengers: Vec<PassengerRecord> = serde_json::from_str(&cleaned)
            .map_err(|err| decode_error("passenger", &cleaned, &err))?;

        debug!("decoded {} passenger(s)", passengers.len());
        Ok(passengers)
    }

    fn source_type(&self) -> &'static str {
        "chat"
    }
}

/// Removes the markdown code fences models like to wrap JSON in.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "").replace("\n```", "")
}

/// Replaces every occurrence of the passcode with the redaction placeholder.
fn redact_passcode(text: &str, passcode: &str) -> String {
    // Replacing an empty needle would splice the placeholder between every
    // character.
    if passcode.is_empty() {
        return text.to_string();
    }
    text.replace(passcode, REDACTED)
}

fn decode_error(kind: &str, text: &str, err: &serde_json::Error) -> RailgenError {
    RailgenError::GenerationFailed(format!(
        "failed to decode {kind} response ({err}): {}",
        snippet(text)
    ))
}

/// Leading portion of a response, for error messages.
fn snippet(text: &str) -> String {
    const LIMIT: usize = 120;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        let head: String = text.chars().take(LIMIT).collect();
        format!("{head}...")
    }
}
