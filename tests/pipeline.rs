//! End-to-end tests covering generation through document aggregation, plus
//! the on-disk round trip the command-line tool performs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use railgen::llm::ScriptedModel;
use railgen::train::WagonKey;
use railgen::{
    convert_train, ChatContentSource, GenerationConfig, LocalContentSource, RailgenError,
    RailgenResult, TrainGenerator, WagonRecord,
};

#[test]
fn test_offline_pipeline_produces_consistent_documents() -> RailgenResult<()> {
    let mut config = GenerationConfig::new("Mystery");
    config.wagon_count = 4;
    config.min_passengers = 2;
    config.max_passengers = 3;

    let generator = TrainGenerator::new(LocalContentSource::new());
    let mut rng = StdRng::seed_from_u64(99);
    let records = generator.generate(&config, &mut rng)?;

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].id, 0);
    assert_eq!(records[0].passcode, "start");
    for wagon in records.iter().skip(1) {
        assert!((2..=3).contains(&wagon.passengers.len()));
        assert_eq!(wagon.theme, "Mystery");
    }

    let documents = convert_train(&records, &mut rng)?;
    for record in &records {
        let key = record.key();
        let names = documents.names.get(key).expect("names fragment");
        let details = documents.player_details.get(key).expect("details fragment");
        let entry = documents.wagons.get(key).expect("wagons entry");

        assert_eq!(names.players.len(), record.passengers.len());
        assert_eq!(details.players.len(), record.passengers.len());
        assert_eq!(entry.people.len(), record.passengers.len());

        for (index, person) in entry.people.iter().enumerate() {
            assert_eq!(person.uid, format!("wagon-{}-player-{}", record.id, index + 1));
        }
    }
    Ok(())
}

#[test]
fn test_scripted_chat_pipeline_end_to_end() -> RailgenResult<()> {
    // One passcode batch, then one roster per wagon. The second roster
    // mentions its own passcode, which must come out redacted.
    let model = ScriptedModel::new(vec![
        "```json\n{\"theme\": \"Mystery\", \"passcodes\": [\"Fog\", \"Lantern\"]}\n```".to_string(),
        concat!(
            "[{\"name\": \"Eve Archer\", \"age\": 29, ",
            "\"profession\": \"Detective\", ",
            "\"characer_model\": \"character-female-a\"}]"
        )
        .to_string(),
        concat!(
            "```json\n",
            "[{\"name\": \"Thomas Maxwell\", \"age\": 41, ",
            "\"role\": \"Keeps a Lantern lit at every stop.\", ",
            "\"characer_model\": \"character-male-c\"}]",
            "\n```"
        )
        .to_string(),
    ]);

    let mut config = GenerationConfig::new("Mystery");
    config.wagon_count = 2;
    config.min_passengers = 1;
    config.max_passengers = 1;

    let generator = TrainGenerator::new(ChatContentSource::new(model));
    let mut rng = StdRng::seed_from_u64(17);
    let records = generator.generate(&config, &mut rng)?;

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].passcode, "Fog");
    assert_eq!(records[2].passcode, "Lantern");
    assert_eq!(records[2].passengers[0].role, "Keeps a <redacted> lit at every stop.");

    let documents = convert_train(&records, &mut rng)?;
    let names = documents.names.get(WagonKey(1)).expect("wagon-1 names");
    assert_eq!(names.players[0].first_name, "Eve");
    assert_eq!(names.players[0].last_name, "Archer");
    assert_eq!(names.players[0].sex.to_string(), "female");

    let details = documents
        .player_details
        .get(WagonKey(2))
        .expect("wagon-2 details");
    assert_eq!(details.players[0].profile.name, "Thomas Maxwell");
    assert_eq!(details.players[0].profile.age, 41);

    // One passcode request plus one roster request per wagon, nothing left
    // in the script.
    let model = generator.source().model();
    assert_eq!(model.calls().len(), 3);
    assert_eq!(model.remaining(), 0);
    Ok(())
}

#[test]
fn test_wagon_records_round_trip_through_disk() -> RailgenResult<()> {
    let config = GenerationConfig::for_testing("Harbor");
    let generator = TrainGenerator::new(LocalContentSource::new());
    let mut rng = StdRng::seed_from_u64(5);
    let records = generator.generate(&config, &mut rng)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("wagons.json");
    std::fs::write(&path, serde_json::to_string_pretty(&records)?)?;

    let text = std::fs::read_to_string(&path)?;
    let loaded: Vec<WagonRecord> = serde_json::from_str(&text)?;
    assert_eq!(loaded, records);

    let documents = convert_train(&loaded, &mut rng)?;
    assert_eq!(documents.wagons.len(), records.len());
    Ok(())
}

#[test]
fn test_merging_the_same_file_twice_is_rejected() -> RailgenResult<()> {
    let config = GenerationConfig::for_testing("Harbor");
    let generator = TrainGenerator::new(LocalContentSource::new());
    let mut rng = StdRng::seed_from_u64(6);
    let records = generator.generate(&config, &mut rng)?;

    // The convert subcommand concatenates input files; feeding the same
    // sequence twice repeats every wagon id.
    let mut merged = records.clone();
    merged.extend(records);

    match convert_train(&merged, &mut rng) {
        Err(RailgenError::DuplicateWagonId(0)) => Ok(()),
        other => panic!("expected DuplicateWagonId(0), got {other:?}"),
    }
}

#[test]
fn test_malformed_wagon_file_fails_fast() {
    // passengers must be an array
    let text = r#"[{"id": 1, "passengers": {"name": "Eve"}}]"#;
    assert!(serde_json::from_str::<Vec<WagonRecord>>(text).is_err());

    // a wagon must be an object
    let text = r#"[42]"#;
    assert!(serde_json::from_str::<Vec<WagonRecord>>(text).is_err());
}

#[test]
fn test_wrong_typed_optional_fields_convert_with_defaults() -> RailgenResult<()> {
    // Mistyped optional fields degrade to their defaults; only the structural
    // shape of a wagon file can fail a conversion.
    let text = r#"[
        {"id": 1, "theme": 42, "passengers": [{"name": "Eve Archer", "age": "twenty"}]}
    ]"#;
    let records: Vec<WagonRecord> = serde_json::from_str(text)?;
    assert_eq!(records[0].theme, "Unknown Theme");
    assert_eq!(records[0].passengers[0].age, 0);

    let mut rng = StdRng::seed_from_u64(31);
    let documents = convert_train(&records, &mut rng)?;
    let details = documents
        .player_details
        .get(WagonKey(1))
        .expect("wagon-1 details");
    assert_eq!(details.players[0].profile.name, "Eve Archer");
    assert_eq!(details.players[0].profile.age, 0);
    Ok(())
}

#[test]
fn test_combined_document_serializes_all_sections() -> RailgenResult<()> {
    let config = GenerationConfig::for_testing("Cipher");
    let generator = TrainGenerator::new(LocalContentSource::new());
    let mut rng = StdRng::seed_from_u64(7);
    let records = generator.generate(&config, &mut rng)?;
    let documents = convert_train(&records, &mut rng)?;

    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string_pretty(&documents)?)?;
    let object = value.as_object().expect("combined object");
    assert_eq!(object.len(), 3);
    assert!(object.contains_key("player_details"));
    assert!(object.contains_key("wagons"));
    assert!(object.contains_key("names"));

    assert!(value["names"]["wagon-0"]
        .as_object()
        .expect("tutorial names entry")
        .is_empty());
    assert!(value["wagons"][0]["people"]
        .as_array()
        .expect("tutorial people")
        .is_empty());
    Ok(())
}
