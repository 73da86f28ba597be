//! # Generation Module
//!
//! Produces the raw wagon sequence that the transcoding pipeline reshapes.
//!
//! The module is split along the content seam: [`TrainGenerator`] owns the
//! orchestration (validation, tutorial wagon, id assignment, per-wagon
//! passenger counts) and delegates the creative part to a [`ContentSource`].
//! Two sources ship: a chat-prompted one backed by a completion model
//! (`generation::chat`) and an offline sampler (`generation::local`).

pub mod chat;
pub mod local;
pub mod prompts;

pub use chat::ChatContentSource;
pub use local::LocalContentSource;

use crate::config;
use crate::train::{tutorial_wagon, PassengerRecord, WagonRecord};
use crate::{RailgenError, RailgenResult};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for one train generation run.
///
/// Controls how many wagons are produced and how full each one is. The
/// tutorial wagon is always prepended on top of `wagon_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Theme stamped onto every generated wagon
    pub theme: String,
    /// Number of themed wagons to generate (1 to 10)
    pub wagon_count: u32,
    /// Minimum passengers per wagon (inclusive)
    pub min_passengers: u32,
    /// Maximum passengers per wagon (inclusive)
    pub max_passengers: u32,
}

impl GenerationConfig {
    /// Creates a configuration with the default wagon and passenger counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use railgen::GenerationConfig;
    ///
    /// let config = GenerationConfig::new("Pirates");
    /// assert_eq!(config.wagon_count, 5);
    /// assert!(config.min_passengers <= config.max_passengers);
    /// ```
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            wagon_count: config::DEFAULT_WAGON_COUNT,
            min_passengers: config::DEFAULT_MIN_PASSENGERS,
            max_passengers: config::DEFAULT_MAX_PASSENGERS,
        }
    }

    /// Creates a small configuration for tests.
    pub fn for_testing(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            wagon_count: 2,
            min_passengers: 1,
            max_passengers: 2,
        }
    }

    /// Checks the parameter ranges before any source call is made.
    pub fn validate(&self) -> RailgenResult<()> {
        if self.wagon_count < config::MIN_WAGONS || self.wagon_count > config::MAX_WAGONS {
            return Err(RailgenError::InvalidConfig(format!(
                "wagon count must be between {} and {}, got {}",
                config::MIN_WAGONS,
                config::MAX_WAGONS,
                self.wagon_count
            )));
        }
        if self.min_passengers > self.max_passengers {
            return Err(RailgenError::InvalidConfig(format!(
                "minimum passengers ({}) cannot exceed maximum passengers ({})",
                self.min_passengers, self.max_passengers
            )));
        }
        Ok(())
    }
}

/// A provider of themed creative content.
///
/// Implementations answer two questions: which passcodes guard the wagons of
/// a themed train, and who rides behind a given passcode. The rng parameter
/// keeps sampling sources reproducible; model-backed sources may ignore it.
pub trait ContentSource {
    /// Generates `count` passcodes for a theme.
    fn passcodes(&self, theme: &str, count: u32, rng: &mut StdRng) -> RailgenResult<Vec<String>>;

    /// Generates `count` passengers for a wagon guarded by `passcode`.
    fn passengers(
        &self,
        passcode: &str,
        count: u32,
        rng: &mut StdRng,
    ) -> RailgenResult<Vec<PassengerRecord>>;

    /// Gets the source type name for logging.
    fn source_type(&self) -> &'static str;
}

/// Orchestrates content generation into an ordered wagon sequence.
///
/// The generator owns no creative decisions itself. It validates the
/// configuration, asks the source for one passcode batch, then builds one
/// wagon per returned passcode with a passenger count drawn uniformly from
/// the configured inclusive range. The fixed tutorial wagon always comes
/// first; themed wagons get ids 1..=N in passcode order and carry the
/// caller's theme, not whatever the source echoed back.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use railgen::{GenerationConfig, LocalContentSource, TrainGenerator};
///
/// let generator = TrainGenerator::new(LocalContentSource::new());
/// let config = GenerationConfig::for_testing("Pirates");
/// let mut rng = StdRng::seed_from_u64(7);
/// let wagons = generator.generate(&config, &mut rng).unwrap();
/// assert_eq!(wagons[0].id, 0);
/// assert_eq!(wagons[0].passcode, "start");
/// ```
pub struct TrainGenerator<S> {
    source: S,
}

impl<S: ContentSource> TrainGenerator<S> {
    /// Creates a generator over a content source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Gets the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generates the full wagon sequence for one train.
    ///
    /// A passcode batch shorter or longer than requested is tolerated: the
    /// returned batch drives how many themed wagons exist. Source errors
    /// abort the run with nothing partial returned.
    pub fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> RailgenResult<Vec<WagonRecord>> {
        config.validate()?;
        info!(
            "generating {} wagon(s) for theme '{}' via {}",
            config.wagon_count,
            config.theme,
            self.source.source_type()
        );

        let passcodes = self.source.passcodes(&config.theme, config.wagon_count, rng)?;
        if passcodes.len() != config.wagon_count as usize {
            warn!(
                "requested {} passcodes but source returned {}; continuing with the returned batch",
                config.wagon_count,
                passcodes.len()
            );
        }

        let mut wagons = Vec::with_capacity(passcodes.len() + 1);
        wagons.push(tutorial_wagon());

        for (index, passcode) in passcodes.into_iter().enumerate() {
            let count = rng.gen_range(config.min_passengers..=config.max_passengers);
            debug!("wagon {}: requesting {} passenger(s)", index + 1, count);
            let passengers = self.source.passengers(&passcode, count, rng)?;
            wagons.push(WagonRecord {
                id: index as u32 + 1,
                theme: config.theme.clone(),
                passcode,
                passengers,
            });
        }

        Ok(wagons)
    }
}

/// One entry in the visual character-model catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterModel {
    /// Wire tag, e.g. `character-female-a`
    pub tag: &'static str,
    /// Appearance description shown to the model when prompting
    pub description: &'static str,
}

/// The twelve character models the game client can render.
///
/// Tags encode the sex used by downstream inference; descriptions feed the
/// passenger prompt so a model picks a fitting appearance.
pub const CHARACTER_MODELS: [CharacterModel; 12] = [
    CharacterModel {
        tag: "character-female-a",
        description: "A dark-skinned woman with a high bun hairstyle, wearing a purple and orange outfit. She is holding two blue weapons or tools, possibly a warrior or fighter.",
    },
    CharacterModel {
        tag: "character-female-b",
        description: "A young girl with orange hair tied into two pigtails, wearing a yellow and purple sporty outfit. She looks energetic, possibly an athlete or fitness enthusiast.",
    },
    CharacterModel {
        tag: "character-female-c",
        description: "An elderly woman with gray hair in a bun, wearing a blue and red dress. She has a warm and wise appearance, resembling a grandmotherly figure.",
    },
    CharacterModel {
        tag: "character-female-d",
        description: "A woman with blonde hair styled in a tight bun, wearing a gray business suit. She appears professional, possibly a corporate worker or manager.",
    },
    CharacterModel {
        tag: "character-female-e",
        description: "A woman with dark hair in a ponytail, dressed in a white lab coat with blue gloves. She likely represents a doctor or scientist.",
    },
    CharacterModel {
        tag: "character-female-f",
        description: "A red-haired woman with long, wavy hair, wearing a black and yellow vest with purple pants. She looks adventurous, possibly an engineer, explorer, or worker.",
    },
    CharacterModel {
        tag: "character-male-a",
        description: "Dark-skinned man with glasses and a beaded hairstyle, wearing a green shirt with orange and white stripes, along with yellow sneakers (casual or scholarly figure).",
    },
    CharacterModel {
        tag: "character-male-b",
        description: "Bald man with a large red beard, wearing a red shirt and blue pants (possibly a strong worker, blacksmith, or adventurer).",
    },
    CharacterModel {
        tag: "character-male-c",
        description: "Man with a mustache, wearing a blue police uniform with a cap and badge (police officer or security personnel).",
    },
    CharacterModel {
        tag: "character-male-d",
        description: "Blonde-haired man in a black suit with a red tie (businessman, politician, or corporate executive).",
    },
    CharacterModel {
        tag: "character-male-e",
        description: "Brown-haired man with glasses, wearing a white lab coat and a yellow tool belt (scientist, mechanic, or engineer).",
    },
    CharacterModel {
        tag: "character-male-f",
        description: "Dark-haired young man with a mustache, wearing a green vest and brown pants (possibly an explorer, traveler, or adventurer).",
    },
];
