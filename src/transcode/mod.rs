//! # Transcoding
//!
//! The reshaping core: converts raw wagon records into the three denormalized
//! views the game client consumes.
//!
//! Each wagon is transcoded independently into a [`WagonFragments`] triple
//! holding its contribution to each view, and the fragments are folded in
//! input order into the top-level documents (see [`documents`]). All three
//! views address the same seat through the `wagon-{id}` / `player-{index}`
//! key pair, so a client can join them back together without any other
//! identifier system.
//!
//! Transcoding is pure apart from the placement draws, which come from a
//! caller-owned rng so a fixed seed reproduces a layout exactly.

pub mod documents;
pub mod naming;

pub use documents::{
    convert_train, DetailsFragment, NamesDocument, NamesFragment, PlayerDetailsDocument,
    TrainDocuments, WagonsDocument,
};
pub use naming::{infer_sex, split_full_name, Sex};

use crate::train::{PlayerKey, WagonRecord};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Derived name view of one passenger, keyed by player index in the
/// names document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameEntry {
    /// Everything before the last name token, titles included
    pub first_name: String,
    /// Last whitespace-separated token of the full name
    pub last_name: String,
    /// Sex inferred from the character-model tag
    pub sex: Sex,
    /// The raw name field, unmodified
    pub full_name: String,
}

/// Derived biography view of one passenger, keyed by player index in the
/// player-details document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Biographical fields copied from the passenger record
    pub profile: Profile,
}

/// The biographical fields of a [`PlayerProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub profession: String,
    pub personality: String,
    pub role: String,
    pub mystery_intrigue: String,
}

/// Spatial view of one passenger inside a wagon.
///
/// `position` components and `rotation` are uniform draws over [0, 1],
/// rounded to two decimal digits; they are gameplay flavor, not simulation
/// state. `uid` is the composite seat identifier
/// `wagon-{wagonId}-player-{playerIndex}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonPlacement {
    pub uid: String,
    pub position: [f64; 2],
    pub rotation: f64,
    pub model_type: String,
    /// Reserved for the game client; always empty at generation time
    pub items: Vec<String>,
}

/// One wagon's entry in the wagons document: identity, passcode, and the
/// placed people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagonEntry {
    pub id: u32,
    pub theme: String,
    pub passcode: String,
    pub people: Vec<PersonPlacement>,
}

/// One wagon's contribution to the three output documents.
///
/// The three fragments always cover the same set of (wagon, player)
/// coordinates: every passenger of the source record appears exactly once in
/// each, at the same 1-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct WagonFragments {
    /// Entry list for the names document
    pub names: NamesFragment,
    /// Entry list for the player-details document
    pub details: DetailsFragment,
    /// Entry for the wagons document
    pub placement: WagonEntry,
}

/// Converts one wagon record into its three output fragments.
///
/// Player indices are assigned sequentially from 1 in roster order; the
/// record's field values flow through unmodified apart from the derived name
/// split and sex. The rng feeds the placement draws only.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use railgen::train::WagonRecord;
/// use railgen::transcode::transcode_wagon;
///
/// let wagon: WagonRecord = serde_json::from_str(
///     r#"{"id": 3, "theme": "Mystery", "passcode": "Fog",
///         "passengers": [{}, {"name": "Eve Archer"}]}"#,
/// )
/// .unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
/// let fragments = transcode_wagon(&wagon, &mut rng);
/// assert_eq!(fragments.placement.people[1].uid, "wagon-3-player-2");
/// ```
pub fn transcode_wagon(record: &WagonRecord, rng: &mut StdRng) -> WagonFragments {
    let wagon_key = record.key();
    let mut names = Vec::with_capacity(record.passengers.len());
    let mut details = Vec::with_capacity(record.passengers.len());
    let mut people = Vec::with_capacity(record.passengers.len());

    for (index, passenger) in record.passengers.iter().enumerate() {
        let player_key = PlayerKey::from_index(index);
        let (first_name, last_name) = split_full_name(&passenger.name);

        names.push(NameEntry {
            first_name,
            last_name,
            sex: infer_sex(&passenger.character_model),
            full_name: passenger.name.clone(),
        });

        details.push(PlayerProfile {
            profile: Profile {
                name: passenger.name.clone(),
                age: passenger.age,
                profession: passenger.profession.clone(),
                personality: passenger.personality.clone(),
                role: passenger.role.clone(),
                mystery_intrigue: passenger.mystery_intrigue.clone(),
            },
        });

        people.push(PersonPlacement {
            uid: wagon_key.person_uid(player_key),
            position: [round2(rng.gen()), round2(rng.gen())],
            rotation: round2(rng.gen()),
            model_type: passenger.character_model.clone(),
            items: Vec::new(),
        });
    }

    WagonFragments {
        names: NamesFragment {
            wagon: wagon_key,
            players: names,
        },
        details: DetailsFragment {
            wagon: wagon_key,
            players: details,
        },
        placement: WagonEntry {
            id: record.id,
            theme: record.theme.clone(),
            passcode: record.passcode.clone(),
            people,
        },
    }
}

/// Rounds to two decimal digits.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
