//! # Railgen
//!
//! Procedural content generation for a train game: themed wagons, passcodes,
//! and passenger rosters, reshaped into the denormalized JSON views the game
//! client consumes.
//!
//! ## Architecture Overview
//!
//! The crate is organized around a small number of concepts:
//!
//! - **Wire records**: `WagonRecord` / `PassengerRecord`, the raw generation
//!   output with lenient-by-default JSON parsing
//! - **Transcoding**: per-wagon conversion of one record into three output
//!   fragments (names, player details, placement)
//! - **Aggregation**: folding fragments across an ordered wagon sequence into
//!   the three top-level documents, cross-referenced by deterministic keys
//! - **Generation**: the content-generator collaborator, seamed behind
//!   `ContentSource` with an LLM-backed and an offline implementation
//! - **Completion seam**: the raw text-model boundary (`CompletionModel`),
//!   kept transport-free so embedders wire their own client
//!
//! Randomness is always injected as a caller-owned `StdRng`, so placement
//! draws and offline sampling are reproducible under a fixed seed.

pub mod generation;
pub mod llm;
pub mod train;
pub mod transcode;

// Explicit re-exports for the types most embedders touch.
pub use generation::{
    ChatContentSource, ContentSource, GenerationConfig, LocalContentSource, TrainGenerator,
};
pub use llm::{CompletionModel, CompletionRequest, ModelConfig, ScriptedModel};
pub use train::{PassengerRecord, PlayerKey, WagonKey, WagonRecord};
pub use transcode::{
    convert_train, transcode_wagon, NameEntry, NamesDocument, PersonPlacement,
    PlayerDetailsDocument, PlayerProfile, Sex, TrainDocuments, WagonFragments, WagonsDocument,
};

/// Core error type for the railgen crate.
#[derive(thiserror::Error, Debug)]
pub enum RailgenError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters failed validation
    #[error("Invalid generation config: {0}")]
    InvalidConfig(String),

    /// Two wagons in one input sequence share an id
    #[error("Duplicate wagon id: {0}")]
    DuplicateWagonId(u32),

    /// Model output could not be decoded into the requested shape
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Completion backend reported a failure
    #[error("Model error: {0}")]
    Model(String),
}

/// Result type used throughout the railgen codebase.
pub type RailgenResult<T> = Result<T, RailgenError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation configuration constants.
pub mod config {
    /// Minimum number of wagons in one train
    pub const MIN_WAGONS: u32 = 1;

    /// Maximum number of wagons in one train
    pub const MAX_WAGONS: u32 = 10;

    /// Default wagon count when none is requested
    pub const DEFAULT_WAGON_COUNT: u32 = 5;

    /// Default lower bound of the per-wagon passenger range
    pub const DEFAULT_MIN_PASSENGERS: u32 = 2;

    /// Default upper bound of the per-wagon passenger range
    pub const DEFAULT_MAX_PASSENGERS: u32 = 5;

    /// Default completion model name
    pub const DEFAULT_MODEL: &str = "mistral-large-latest";

    /// Default completion token budget
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;

    /// Default completion sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.8;
}
