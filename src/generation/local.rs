//! # Offline Content Source
//!
//! Samples passcodes and passenger rosters from built-in tables using the
//! injected rng, so a train can be generated with no model behind it. This
//! is the default source for the command-line binary.
//!
//! Sampled rosters never mention the wagon passcode; weaving clues into the
//! stories is the chat source's job.

use crate::generation::{ContentSource, CHARACTER_MODELS};
use crate::train::PassengerRecord;
use crate::RailgenResult;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

const PASSCODE_WORDS: &[&str] = &[
    "Lantern", "Ember", "Crescent", "Thicket", "Meridian", "Sable", "Quarry", "Harbor", "Cipher",
    "Velvet", "Orchard", "Tempest", "Galleon", "Obsidian", "Juniper", "Parallax", "Bastion",
    "Wisteria", "Cobalt", "Vesper", "Marrow", "Solstice", "Gossamer", "Drifter",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Eleanor", "Margaret", "Beatrice", "Clara", "Josephine", "Adelaide", "Florence", "Harriet",
    "Rosalind", "Vivian", "Cordelia", "Imogen", "Matilda", "Sylvia", "Edith", "Penelope",
];

const MALE_FIRST_NAMES: &[&str] = &[
    "Victor", "Edmund", "Theodore", "August", "Silas", "Barnaby", "Reginald", "Clarence",
    "Percival", "Rupert", "Ambrose", "Casper", "Leopold", "Horace", "Emmett", "Lionel",
];

const LAST_NAMES: &[&str] = &[
    "Sterling", "Brooks", "Hartford", "Archer", "Whitlock", "Maxwell", "Pemberton", "Ashford",
    "Caldwell", "Montague", "Fairbanks", "Holloway", "Kingsley", "Thornton", "Beaumont",
    "Lockhart", "Ravenscroft", "Winslow",
];

const PROFESSIONS: &[&str] = &[
    "Mining Magnate", "Investigative Journalist", "Retired Cartographer", "Stage Magician",
    "Botanist", "Telegraph Operator", "Antiquities Dealer", "Railway Engineer", "Portrait Painter",
    "Apothecary", "Opera Singer", "Clockmaker", "Archivist", "Customs Inspector",
    "Traveling Physician", "Locksmith",
];

const PERSONALITY_TRAITS: &[&str] = &[
    "ambitious", "cunning", "charismatic", "tenacious", "curious", "ethical", "secretive",
    "gregarious", "melancholic", "meticulous", "impulsive", "wry", "guarded", "earnest",
    "restless", "shrewd",
];

const ROLES: &[&str] = &[
    "Travels the line every season and knows every conductor by name.",
    "Boarded at the last stop carrying a case that never leaves their lap.",
    "Keeps a detailed journal of everyone who passes through the wagon.",
    "Claims to be on holiday but studies the timetable obsessively.",
    "Escorts a crate of fragile cargo listed under someone else's name.",
    "Knows the previous occupant of this compartment and will not say how.",
    "Works the dining car by day and disappears entirely after dark.",
    "Is returning home after years abroad with more luggage than memories.",
    "Watches the corridor through the reflection in the window.",
    "Sends a telegram from every station the train stops at.",
];

const SECRETS: &[&str] = &[
    "Carries a ticket for a destination the line discontinued years ago.",
    "Is traveling under a name that does not match the monogram on their case.",
    "Paid for silence once already and suspects the price is about to go up.",
    "Memorized the combination to a safe they have never officially seen.",
    "Recognized another passenger at boarding and has avoided them since.",
    "Keeps a letter that would end a career if it ever reached a newspaper.",
    "Knows which stop the missing courier actually got off at.",
    "Has crossed this border twelve times under three different papers.",
    "Sold the same map to two rival collectors and took the night train out.",
    "Heard the conductor whisper a word that was not on any schedule.",
];

/// Content source that samples everything from built-in tables.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use railgen::generation::ContentSource;
/// use railgen::LocalContentSource;
///
/// let source = LocalContentSource::new();
/// let mut rng = StdRng::seed_from_u64(3);
/// let passcodes = source.passcodes("Pirates", 4, &mut rng).unwrap();
/// assert_eq!(passcodes.len(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocalContentSource;

impl LocalContentSource {
    /// Creates the sampling source.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalContentSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSource for LocalContentSource {
    fn passcodes(&self, theme: &str, count: u32, rng: &mut StdRng) -> RailgenResult<Vec<String>> {
        debug!("sampling {count} passcode(s) for theme '{theme}'");

        // Sampling without replacement keeps the batch unique; a request
        // beyond the pool comes back short and the generator tolerates it.
        let mut pool: Vec<&str> = PASSCODE_WORDS.to_vec();
        let take = (count as usize).min(pool.len());
        let mut passcodes = Vec::with_capacity(take);
        for _ in 0..take {
            let index = rng.gen_range(0..pool.len());
            passcodes.push(pool.swap_remove(index).to_string());
        }
        Ok(passcodes)
    }

    fn passengers(
        &self,
        _passcode: &str,
        count: u32,
        rng: &mut StdRng,
    ) -> RailgenResult<Vec<PassengerRecord>> {
        let mut seen = HashSet::new();
        let mut passengers = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let model = CHARACTER_MODELS[rng.gen_range(0..CHARACTER_MODELS.len())];
            let first_pool = if model.tag.contains("female") {
                FEMALE_FIRST_NAMES
            } else {
                MALE_FIRST_NAMES
            };

            let mut name = sample_name(first_pool, rng);
            let mut attempts = 0;
            while seen.contains(&name) && attempts < 8 {
                name = sample_name(first_pool, rng);
                attempts += 1;
            }
            seen.insert(name.clone());

            passengers.push(PassengerRecord {
                name,
                age: rng.gen_range(18..=70),
                profession: pick(PROFESSIONS, rng).to_string(),
                personality: sample_personality(rng),
                role: pick(ROLES, rng).to_string(),
                mystery_intrigue: pick(SECRETS, rng).to_string(),
                character_model: model.tag.to_string(),
            });
        }
        Ok(passengers)
    }

    fn source_type(&self) -> &'static str {
        "local"
    }
}

fn pick<'a>(pool: &[&'a str], rng: &mut StdRng) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn sample_name(first_pool: &[&str], rng: &mut StdRng) -> String {
    format!("{} {}", pick(first_pool, rng), pick(LAST_NAMES, rng))
}

/// Three distinct traits in the "Ambitious, curious, and wry" shape.
fn sample_personality(rng: &mut StdRng) -> String {
    let mut pool: Vec<&str> = PERSONALITY_TRAITS.to_vec();
    let mut traits = Vec::with_capacity(3);
    for _ in 0..3 {
        let index = rng.gen_range(0..pool.len());
        traits.push(pool.swap_remove(index));
    }
    format!("{}, {}, and {}", capitalize(traits[0]), traits[1], traits[2])
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
