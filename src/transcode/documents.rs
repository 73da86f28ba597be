//! # Output Documents
//!
//! The aggregated views of one train, under the dictionary-of-dictionaries
//! topology: the names and player-details documents serialize as JSON maps
//! keyed `wagon-{id}` then `player-{index}`, and the wagons document is an
//! ordered JSON array of placement entries.
//!
//! Fragments are held in input order in plain vectors and the JSON maps are
//! emitted by hand-rolled `Serialize` impls, so wagon order in the serialized
//! output always matches the input sequence even though the topology is a
//! map. A repeated wagon id would silently collapse two wagons into one key,
//! so aggregation rejects it outright instead of overwriting.

use crate::train::{PlayerKey, WagonKey, WagonRecord};
use crate::transcode::{transcode_wagon, NameEntry, PlayerProfile, WagonEntry};
use crate::{RailgenError, RailgenResult};
use rand::rngs::StdRng;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// One wagon's roster in the names document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamesFragment {
    /// Document key of the source wagon
    pub wagon: WagonKey,
    /// Name entries in player-index order
    pub players: Vec<NameEntry>,
}

impl NamesFragment {
    /// Entry for a 1-based player key, if that seat exists.
    pub fn player(&self, key: PlayerKey) -> Option<&NameEntry> {
        self.players.get(key.0.checked_sub(1)? as usize)
    }
}

/// One wagon's roster in the player-details document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsFragment {
    /// Document key of the source wagon
    pub wagon: WagonKey,
    /// Profiles in player-index order
    pub players: Vec<PlayerProfile>,
}

impl DetailsFragment {
    /// Profile for a 1-based player key, if that seat exists.
    pub fn player(&self, key: PlayerKey) -> Option<&PlayerProfile> {
        self.players.get(key.0.checked_sub(1)? as usize)
    }
}

/// The names document: `{ "wagon-N": { "player-M": NameEntry } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamesDocument {
    fragments: Vec<NamesFragment>,
}

impl NamesDocument {
    /// Number of wagons in the document.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// True when no wagons have been aggregated.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragment for one wagon key.
    pub fn get(&self, key: WagonKey) -> Option<&NamesFragment> {
        self.fragments.iter().find(|fragment| fragment.wagon == key)
    }

    /// Fragments in input wagon order.
    pub fn iter(&self) -> impl Iterator<Item = &NamesFragment> {
        self.fragments.iter()
    }
}

impl Serialize for NamesDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fragments.len()))?;
        for fragment in &self.fragments {
            map.serialize_entry(&fragment.wagon, &PlayerKeyedSeq(&fragment.players))?;
        }
        map.end()
    }
}

/// The player-details document: `{ "wagon-N": { "player-M": {profile} } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDetailsDocument {
    fragments: Vec<DetailsFragment>,
}

impl PlayerDetailsDocument {
    /// Number of wagons in the document.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// True when no wagons have been aggregated.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragment for one wagon key.
    pub fn get(&self, key: WagonKey) -> Option<&DetailsFragment> {
        self.fragments.iter().find(|fragment| fragment.wagon == key)
    }

    /// Fragments in input wagon order.
    pub fn iter(&self) -> impl Iterator<Item = &DetailsFragment> {
        self.fragments.iter()
    }
}

impl Serialize for PlayerDetailsDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fragments.len()))?;
        for fragment in &self.fragments {
            map.serialize_entry(&fragment.wagon, &PlayerKeyedSeq(&fragment.players))?;
        }
        map.end()
    }
}

/// The wagons document: ordered array of placement entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WagonsDocument {
    entries: Vec<WagonEntry>,
}

impl WagonsDocument {
    /// Number of wagons in the document.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no wagons have been aggregated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry whose id matches one wagon key.
    pub fn get(&self, key: WagonKey) -> Option<&WagonEntry> {
        self.entries.iter().find(|entry| entry.id == key.0)
    }

    /// Entries in input wagon order.
    pub fn iter(&self) -> impl Iterator<Item = &WagonEntry> {
        self.entries.iter()
    }
}

/// All three documents for one train.
///
/// Serializes as the combined object the original tooling persists, with the
/// fixed key order `player_details`, `wagons`, `names`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainDocuments {
    pub player_details: PlayerDetailsDocument,
    pub wagons: WagonsDocument,
    pub names: NamesDocument,
}

/// Folds an ordered wagon sequence into the three output documents.
///
/// Wagons are transcoded in input order and their fragments appended, so
/// every document lists wagons in the same order the records arrived. A
/// repeated wagon id aborts the whole conversion with
/// [`RailgenError::DuplicateWagonId`]; nothing partial is returned.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use railgen::train::{tutorial_wagon, WagonKey};
/// use railgen::transcode::convert_train;
///
/// let records = vec![tutorial_wagon()];
/// let mut rng = StdRng::seed_from_u64(1);
/// let documents = convert_train(&records, &mut rng).unwrap();
/// assert!(documents.names.get(WagonKey(0)).is_some());
/// ```
pub fn convert_train(records: &[WagonRecord], rng: &mut StdRng) -> RailgenResult<TrainDocuments> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut names = NamesDocument::default();
    let mut player_details = PlayerDetailsDocument::default();
    let mut wagons = WagonsDocument::default();

    for record in records {
        if !seen.insert(record.id) {
            return Err(RailgenError::DuplicateWagonId(record.id));
        }
        let fragments = transcode_wagon(record, rng);
        names.fragments.push(fragments.names);
        player_details.fragments.push(fragments.details);
        wagons.entries.push(fragments.placement);
    }

    Ok(TrainDocuments {
        player_details,
        wagons,
        names,
    })
}

/// Serializes a player-index-ordered slice as a JSON map keyed `player-1`,
/// `player-2`, ... in slice order.
struct PlayerKeyedSeq<'a, T>(&'a [T]);

impl<T: Serialize> Serialize for PlayerKeyedSeq<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, entry) in self.0.iter().enumerate() {
            map.serialize_entry(&PlayerKey::from_index(index), entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::{json, Value};

    fn record(id: u32, passenger_names: &[&str]) -> WagonRecord {
        let passengers = passenger_names
            .iter()
            .map(|name| json!({ "name": name, "characer_model": "character-female-a" }))
            .collect::<Vec<_>>();
        serde_json::from_value(json!({
            "id": id,
            "theme": "Mystery",
            "passcode": "Fog",
            "passengers": passengers
        }))
        .unwrap()
    }

    #[test]
    fn test_every_coordinate_appears_once_in_each_document() {
        let records = vec![
            record(0, &[]),
            record(1, &["Eve Archer", "Thomas Maxwell"]),
            record(2, &["Solo"]),
        ];
        let mut rng = StdRng::seed_from_u64(11);
        let documents = convert_train(&records, &mut rng).unwrap();

        for source in &records {
            let key = source.key();
            let names = documents.names.get(key).unwrap();
            let details = documents.player_details.get(key).unwrap();
            let entry = documents.wagons.get(key).unwrap();
            assert_eq!(names.players.len(), source.passengers.len());
            assert_eq!(details.players.len(), source.passengers.len());
            assert_eq!(entry.people.len(), source.passengers.len());
        }
        assert_eq!(documents.names.len(), 3);
        assert_eq!(documents.player_details.len(), 3);
        assert_eq!(documents.wagons.len(), 3);
    }

    #[test]
    fn test_duplicate_wagon_id_is_rejected() {
        let records = vec![record(1, &["A B"]), record(1, &["C D"])];
        let mut rng = StdRng::seed_from_u64(4);
        match convert_train(&records, &mut rng) {
            Err(RailgenError::DuplicateWagonId(1)) => {}
            other => panic!("expected DuplicateWagonId(1), got {other:?}"),
        }
    }

    #[test]
    fn test_wagon_order_matches_input_not_key_sort() {
        // Lexicographic key order would put wagon-10 before wagon-2.
        let records = vec![record(2, &[]), record(10, &[]), record(1, &[])];
        let mut rng = StdRng::seed_from_u64(8);
        let documents = convert_train(&records, &mut rng).unwrap();

        let text = serde_json::to_string(&documents.names).unwrap();
        let pos_2 = text.find("\"wagon-2\"").unwrap();
        let pos_10 = text.find("\"wagon-10\"").unwrap();
        let pos_1 = text.find("\"wagon-1\"").unwrap();
        assert!(pos_2 < pos_10 && pos_10 < pos_1);

        let ids: Vec<u32> = documents.wagons.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![2, 10, 1]);
    }

    #[test]
    fn test_names_round_trip_scenario() {
        let records = vec![record(1, &["Eve Archer"])];
        let mut rng = StdRng::seed_from_u64(21);
        let documents = convert_train(&records, &mut rng).unwrap();

        let value: Value =
            serde_json::from_str(&serde_json::to_string(&documents.names).unwrap()).unwrap();
        assert_eq!(
            value["wagon-1"]["player-1"],
            json!({
                "firstName": "Eve",
                "lastName": "Archer",
                "sex": "female",
                "fullName": "Eve Archer"
            })
        );
    }

    #[test]
    fn test_details_document_nests_profile() {
        let records = vec![record(1, &["Eve Archer"])];
        let mut rng = StdRng::seed_from_u64(22);
        let documents = convert_train(&records, &mut rng).unwrap();

        let value: Value =
            serde_json::from_str(&serde_json::to_string(&documents.player_details).unwrap())
                .unwrap();
        let profile = &value["wagon-1"]["player-1"]["profile"];
        assert_eq!(profile["name"], "Eve Archer");
        assert_eq!(profile["age"], 0);
        assert_eq!(profile["profession"], "");
        assert_eq!(profile["mystery_intrigue"], "");
    }

    #[test]
    fn test_wagons_document_is_an_array() {
        let records = vec![record(0, &[]), record(1, &["Eve Archer"])];
        let mut rng = StdRng::seed_from_u64(23);
        let documents = convert_train(&records, &mut rng).unwrap();

        let value: Value =
            serde_json::from_str(&serde_json::to_string(&documents.wagons).unwrap()).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["id"], 0);
        assert_eq!(entries[1]["id"], 1);
        assert_eq!(entries[1]["people"][0]["uid"], "wagon-1-player-1");
        assert_eq!(entries[1]["people"][0]["items"], json!([]));
    }

    #[test]
    fn test_combined_document_key_order() {
        let records = vec![record(0, &[])];
        let mut rng = StdRng::seed_from_u64(24);
        let documents = convert_train(&records, &mut rng).unwrap();

        let text = serde_json::to_string(&documents).unwrap();
        let pos_details = text.find("\"player_details\"").unwrap();
        let pos_wagons = text.find("\"wagons\"").unwrap();
        let pos_names = text.find("\"names\"").unwrap();
        assert!(pos_details < pos_wagons && pos_wagons < pos_names);
    }

    #[test]
    fn test_empty_input_yields_empty_documents() {
        let mut rng = StdRng::seed_from_u64(25);
        let documents = convert_train(&[], &mut rng).unwrap();

        assert!(documents.names.is_empty());
        assert!(documents.player_details.is_empty());
        assert!(documents.wagons.is_empty());
        assert_eq!(serde_json::to_string(&documents.names).unwrap(), "{}");
        assert_eq!(serde_json::to_string(&documents.wagons).unwrap(), "[]");
    }

    #[test]
    fn test_fragment_player_lookup() {
        let records = vec![record(5, &["Eve Archer", "Thomas Maxwell"])];
        let mut rng = StdRng::seed_from_u64(26);
        let documents = convert_train(&records, &mut rng).unwrap();

        let fragment = documents.names.get(WagonKey(5)).unwrap();
        assert_eq!(fragment.player(PlayerKey(2)).unwrap().full_name, "Thomas Maxwell");
        assert!(fragment.player(PlayerKey(3)).is_none());
        assert!(fragment.player(PlayerKey(0)).is_none());
    }
}
