//! # Model Boundary
//!
//! The seam between content generation and whatever large language model
//! backs it. Generation code talks to a [`CompletionModel`] and never to a
//! transport, so the chat-backed content source can run against a real
//! endpoint, a scripted stand-in, or anything else an embedder provides.
//!
//! [`ScriptedModel`] is the in-tree implementation: it replays a fixed queue
//! of responses and records every request it saw, which is all the pipeline
//! tests need.

use crate::{config, RailgenError, RailgenResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use uuid::Uuid;

/// Configuration for the chat completion backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// API endpoint, if the backing transport wants one
    pub endpoint: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature for generation
    pub temperature: f32,
    /// Maximum tokens per completion
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: config::DEFAULT_MODEL.to_string(),
            temperature: config::DEFAULT_TEMPERATURE,
            max_tokens: config::DEFAULT_MAX_TOKENS,
        }
    }
}

impl ModelConfig {
    /// Builds a request for one prompt under this configuration.
    ///
    /// Each request gets a fresh id so logs and scripted replays can be
    /// correlated with the call that produced them.
    pub fn request(&self, prompt: impl Into<String>) -> CompletionRequest {
        CompletionRequest {
            id: Uuid::new_v4(),
            model: self.model.clone(),
            prompt: prompt.into(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// One prompt on its way to a completion model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Request id for tracking
    pub id: Uuid,
    /// Model identifier
    pub model: String,
    /// Full prompt text
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens for the completion
    pub max_tokens: u32,
}

/// A chat completion backend.
///
/// Implementations return the raw completion text; callers own all parsing
/// and cleanup of what comes back.
pub trait CompletionModel {
    /// Runs one request to completion.
    fn complete(&self, request: &CompletionRequest) -> RailgenResult<String>;
}

/// Replays a fixed queue of canned responses.
///
/// Responses are handed out in the order they were loaded; asking for more
/// than were scripted is an error rather than a silent empty string, so a
/// test that under-provisions its script fails loudly.
///
/// # Examples
///
/// ```
/// use railgen::llm::{CompletionModel, ModelConfig, ScriptedModel};
///
/// let model = ScriptedModel::new(vec!["first".to_string(), "second".to_string()]);
/// let config = ModelConfig::default();
/// assert_eq!(model.complete(&config.request("a")).unwrap(), "first");
/// assert_eq!(model.complete(&config.request("b")).unwrap(), "second");
/// assert!(model.complete(&config.request("c")).is_err());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedModel {
    responses: RefCell<VecDeque<String>>,
    calls: RefCell<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    /// Creates a model that will replay `responses` in order.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Requests seen so far, oldest first.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.borrow().clone()
    }

    /// Number of scripted responses not yet handed out.
    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl CompletionModel for ScriptedModel {
    fn complete(&self, request: &CompletionRequest) -> RailgenResult<String> {
        self.calls.borrow_mut().push(request.clone());
        self.responses.borrow_mut().pop_front().ok_or_else(|| {
            RailgenError::Model(format!("no scripted response left for request {}", request.id))
        })
    }
}
