//! # Train Records
//!
//! Wire-format records for one generated train: the ordered wagon sequence
//! produced by the content generator and consumed by the transcoder, plus the
//! deterministic keys that cross-reference the output documents.
//!
//! Parsing is lenient: any missing or wrong-typed field falls back to a
//! default, so a partially filled record never aborts a conversion. The one
//! structural requirement is shape. A wagon or passenger must be a JSON
//! object and `passengers` must be an array, otherwise deserialization fails
//! fast.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Theme of the fixed tutorial wagon prepended to every generated train.
pub const TUTORIAL_THEME: &str = "Tutorial (Start)";

/// Passcode of the fixed tutorial wagon.
pub const TUTORIAL_PASSCODE: &str = "start";

/// One wagon of the train: a themed segment guarded by a passcode, carrying
/// an ordered passenger roster.
///
/// # Examples
///
/// ```
/// use railgen::train::WagonRecord;
///
/// // Missing fields are defaulted, never rejected.
/// let wagon: WagonRecord = serde_json::from_str("{}").unwrap();
/// assert_eq!(wagon.id, 0);
/// assert_eq!(wagon.theme, "Unknown Theme");
/// assert_eq!(wagon.passcode, "no-passcode");
/// assert!(wagon.passengers.is_empty());
///
/// // Wrong-typed optional fields degrade to the same defaults.
/// let wagon: WagonRecord = serde_json::from_str(r#"{"theme": 42}"#).unwrap();
/// assert_eq!(wagon.theme, "Unknown Theme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagonRecord {
    /// Wagon id; 0 is reserved for the tutorial wagon
    #[serde(default, deserialize_with = "lenient_u32")]
    pub id: u32,
    /// Theme the wagon was generated under
    #[serde(default = "default_theme", deserialize_with = "lenient_theme")]
    pub theme: String,
    /// Passcode guarding the wagon
    #[serde(default = "default_passcode", deserialize_with = "lenient_passcode")]
    pub passcode: String,
    /// Passenger roster in generation order
    #[serde(default)]
    pub passengers: Vec<PassengerRecord>,
}

impl WagonRecord {
    /// Key of this wagon in the output documents.
    pub fn key(&self) -> WagonKey {
        WagonKey(self.id)
    }
}

/// One generated passenger, as emitted by the content generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    /// Full name, possibly with a title ("Dr. Amelia Hartford")
    #[serde(default = "default_name", deserialize_with = "lenient_name")]
    pub name: String,
    /// Age in years
    #[serde(default, deserialize_with = "lenient_u32")]
    pub age: u32,
    /// Profession in the fictional world
    #[serde(default, deserialize_with = "lenient_text")]
    pub profession: String,
    /// Three-adjective character sketch
    #[serde(default, deserialize_with = "lenient_text")]
    pub personality: String,
    /// Role in the wagon's story
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,
    /// Secret, motive, or mystery
    #[serde(default, deserialize_with = "lenient_text")]
    pub mystery_intrigue: String,
    /// Visual model tag ("character-female-a" .. "character-male-f").
    /// The wire key is misspelled upstream; the correct spelling is accepted
    /// as an alias on input.
    #[serde(
        rename = "characer_model",
        alias = "character_model",
        default = "default_character_model",
        deserialize_with = "lenient_character_model"
    )]
    pub character_model: String,
}

impl Default for PassengerRecord {
    /// Same values the serde field defaults produce for an empty object.
    fn default() -> Self {
        Self {
            name: default_name(),
            age: 0,
            profession: String::new(),
            personality: String::new(),
            role: String::new(),
            mystery_intrigue: String::new(),
            character_model: default_character_model(),
        }
    }
}

fn default_theme() -> String {
    "Unknown Theme".to_string()
}

fn default_passcode() -> String {
    "no-passcode".to_string()
}

fn default_name() -> String {
    "Unknown".to_string()
}

fn default_character_model() -> String {
    "character-unknown".to_string()
}

/// Consumes the field's value whole, then maps it to the field default when
/// it is not the expected type. Absent fields never reach here; serde applies
/// the `default` attribute for those.
fn lenient_field<'de, D, T, F>(deserializer: D, fallback: F) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|_| fallback()))
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    lenient_field(deserializer, || 0)
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_field(deserializer, String::new)
}

fn lenient_theme<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_field(deserializer, default_theme)
}

fn lenient_passcode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_field(deserializer, default_passcode)
}

fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_field(deserializer, default_name)
}

fn lenient_character_model<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_field(deserializer, default_character_model)
}

/// The fixed wagon every train starts with: id 0, no passengers, passcode
/// "start". The generator prepends it before any themed wagons.
pub fn tutorial_wagon() -> WagonRecord {
    WagonRecord {
        id: 0,
        theme: TUTORIAL_THEME.to_string(),
        passcode: TUTORIAL_PASSCODE.to_string(),
        passengers: Vec::new(),
    }
}

/// Deterministic wagon identifier, rendered as `wagon-{id}`.
///
/// Together with [`PlayerKey`] this is the only cross-reference mechanism
/// between the three output documents.
///
/// # Examples
///
/// ```
/// use railgen::train::{PlayerKey, WagonKey};
///
/// let key = WagonKey(3);
/// assert_eq!(key.to_string(), "wagon-3");
/// assert_eq!(key.person_uid(PlayerKey(2)), "wagon-3-player-2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WagonKey(pub u32);

impl WagonKey {
    /// Composite identifier for one seat, `wagon-{id}-player-{index}`.
    pub fn person_uid(&self, player: PlayerKey) -> String {
        format!("{}-{}", self, player)
    }
}

impl fmt::Display for WagonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wagon-{}", self.0)
    }
}

impl Serialize for WagonKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Deterministic player identifier within one wagon, rendered as
/// `player-{index}`. Indices are 1-based and assigned in roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerKey(pub u32);

impl PlayerKey {
    /// Key for the zero-based roster position `index`.
    pub fn from_index(index: usize) -> Self {
        PlayerKey(index as u32 + 1)
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

impl Serialize for PlayerKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let wagon: WagonRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(wagon.id, 0);
        assert_eq!(wagon.theme, "Unknown Theme");
        assert_eq!(wagon.passcode, "no-passcode");
        assert!(wagon.passengers.is_empty());

        let passenger: PassengerRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(passenger.name, "Unknown");
        assert_eq!(passenger.age, 0);
        assert_eq!(passenger.profession, "");
        assert_eq!(passenger.character_model, "character-unknown");
    }

    #[test]
    fn test_wrong_typed_fields_default() {
        let wagon: WagonRecord = serde_json::from_value(json!({
            "id": "seven",
            "theme": 42,
            "passcode": ["Fog"]
        }))
        .unwrap();
        assert_eq!(wagon.id, 0);
        assert_eq!(wagon.theme, "Unknown Theme");
        assert_eq!(wagon.passcode, "no-passcode");

        let passenger: PassengerRecord = serde_json::from_value(json!({
            "name": "Eve Archer",
            "age": "twenty",
            "profession": 9,
            "characer_model": false
        }))
        .unwrap();
        assert_eq!(passenger.name, "Eve Archer");
        assert_eq!(passenger.age, 0);
        assert_eq!(passenger.profession, "");
        assert_eq!(passenger.character_model, "character-unknown");
    }

    #[test]
    fn test_null_fields_default() {
        let wagon: WagonRecord = serde_json::from_value(json!({
            "theme": null,
            "passcode": null
        }))
        .unwrap();
        assert_eq!(wagon.theme, "Unknown Theme");
        assert_eq!(wagon.passcode, "no-passcode");
    }

    #[test]
    fn test_non_array_passengers_rejected() {
        let result = serde_json::from_value::<WagonRecord>(json!({
            "id": 1,
            "passengers": "not a list"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_object_passenger_rejected() {
        let result = serde_json::from_value::<WagonRecord>(json!({
            "id": 1,
            "passengers": [42]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_object_wagon_rejected() {
        assert!(serde_json::from_value::<WagonRecord>(json!(42)).is_err());
        assert!(serde_json::from_value::<WagonRecord>(json!("wagon")).is_err());
    }

    #[test]
    fn test_character_model_wire_spelling() {
        // The upstream generator emits the misspelled key.
        let passenger: PassengerRecord = serde_json::from_value(json!({
            "name": "Eve Archer",
            "characer_model": "character-female-a"
        }))
        .unwrap();
        assert_eq!(passenger.character_model, "character-female-a");

        // The correct spelling is tolerated on input.
        let passenger: PassengerRecord = serde_json::from_value(json!({
            "character_model": "character-male-b"
        }))
        .unwrap();
        assert_eq!(passenger.character_model, "character-male-b");

        // Serialization sticks to the wire spelling so round-trips are stable.
        let value = serde_json::to_value(&passenger).unwrap();
        assert!(value.get("characer_model").is_some());
        assert!(value.get("character_model").is_none());
    }

    #[test]
    fn test_record_round_trip() {
        let wagon = WagonRecord {
            id: 4,
            theme: "Mystery".to_string(),
            passcode: "Fog".to_string(),
            passengers: vec![PassengerRecord {
                name: "Victor Sterling".to_string(),
                age: 55,
                profession: "Mining Magnate".to_string(),
                personality: "Ambitious, cunning, and charismatic".to_string(),
                role: "Owns a vast mining empire".to_string(),
                mystery_intrigue: "Trades in unregistered metals".to_string(),
                character_model: "character-male-f".to_string(),
            }],
        };
        let text = serde_json::to_string(&wagon).unwrap();
        let parsed: WagonRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, wagon);
    }

    #[test]
    fn test_keys_render_deterministically() {
        assert_eq!(WagonKey(0).to_string(), "wagon-0");
        assert_eq!(WagonKey(10).to_string(), "wagon-10");
        assert_eq!(PlayerKey(1).to_string(), "player-1");
        assert_eq!(PlayerKey::from_index(0), PlayerKey(1));
        assert_eq!(PlayerKey::from_index(6), PlayerKey(7));
    }

    #[test]
    fn test_person_uid_format() {
        assert_eq!(WagonKey(3).person_uid(PlayerKey(2)), "wagon-3-player-2");
    }

    #[test]
    fn test_keys_serialize_as_strings() {
        assert_eq!(serde_json::to_value(WagonKey(7)).unwrap(), json!("wagon-7"));
        assert_eq!(serde_json::to_value(PlayerKey(1)).unwrap(), json!("player-1"));
    }

    #[test]
    fn test_tutorial_wagon_shape() {
        let wagon = tutorial_wagon();
        assert_eq!(wagon.id, 0);
        assert_eq!(wagon.theme, "Tutorial (Start)");
        assert_eq!(wagon.passcode, "start");
        assert!(wagon.passengers.is_empty());
    }
}
