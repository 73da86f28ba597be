//! # Prompt Construction
//!
//! Builds the chat prompts the model-backed content source sends. The texts
//! ask for JSON only and embed a worked example of the exact shape expected
//! back; the response hygiene in `generation::chat` still assumes neither
//! request is honored perfectly.

use crate::generation::CHARACTER_MODELS;

/// Worked example embedded in the passcode prompt.
const PASSCODE_EXAMPLE: &str = r#"{
    "theme": "Pirates",
    "passcodes": ["Treasure", "Rum", "Skull", "Compass", "Anchor"]
}"#;

/// Worked example embedded in the passenger prompt. The character-model key
/// is deliberately the misspelled wire form.
const PASSENGER_EXAMPLE: &str = r#"[
    {
        "name": "Victor Sterling",
        "age": 55,
        "profession": "Mining Magnate",
        "personality": "Ambitious, cunning, and charismatic",
        "role": "Owns a vast mining empire, recently discovered a new vein of precious metal.",
        "mystery_intrigue": "Secretly trades in unregistered precious metals, hiding a fortune in a secure vault. In love with Eleanor Brooks",
        "characer_model": "character-male-f"
    },
    {
        "name": "Eleanor Brooks",
        "age": 32,
        "profession": "Investigative Journalist",
        "personality": "Tenacious, curious, and ethical",
        "role": "Investigates corruption in the mining industry, follows a lead on a hidden stash of radiant metal bars.",
        "mystery_intrigue": "Uncovers a network of illegal precious metal trades, putting her life in danger. Hates Victor Sterling because of his unethical practices.",
        "characer_model": "character-female-f"
    }
]"#;

/// Builds the prompt requesting `count` passcodes for a theme.
pub fn passcode_prompt(theme: &str, count: u32) -> String {
    format!(
        "This is a video game about a player trying to reach the locomotive of a train \
         by finding a passcode for each wagon.\n\
         You are tasked with generating unique passcodes for the wagons based on the theme \
         '{theme}', to make the game more engaging, fun, and with a sense of progression, \
         from easiest to hardest.\n\
         Each passcode should be unique enough to not be related to each other but still be \
         connected to the theme.\n\
         Generate exactly {count} unique and creative passcodes for the wagons. Each passcode must:\n\
         1. Be related to the theme.\n\
         2. Be unique, interesting, and creative.\n\
         3. Be one word, letters only (no spaces or special characters).\n\
         No explanation needed, just the theme and passcodes in a JSON object format.\n\
         Example for the theme \"Pirates\" and 5 passcodes:\n\
         {PASSCODE_EXAMPLE}\n\
         Now, generate a theme and passcodes."
    )
}

/// Builds the prompt requesting `count` passengers for a wagon guarded by
/// `passcode`. Lists the full character-model catalog so the completion can
/// pick fitting appearances.
pub fn passenger_prompt(passcode: &str, count: u32) -> String {
    let catalog = CHARACTER_MODELS
        .iter()
        .map(|model| format!("- {}: {}", model.tag, model.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Passengers are in a wagon. The player can interact with them to learn more about \
         their stories.\n\
         The following is a list of passengers on a train wagon. The wagon is protected by \
         the passcode \"{passcode}\".\n\
         Their stories are intertwined, and each passenger has a unique role and mystery, \
         all related to the theme and the passcode.\n\
         The player must be able to guess the passcode by talking to the passengers and \
         uncovering their secrets.\n\
         Passengers should be diverse, with different backgrounds, professions, and motives.\n\
         Passengers' stories should be engaging, mysterious, and intriguing, adding depth to \
         the game, while also providing clues to the passcode.\n\
         Passengers' stories can be connected to each other.\n\
         Passengers are aware of each other's presence in the wagon.\n\
         The passcode shouldn't be too obvious but should be guessable based on the \
         passengers' stories.\n\
         The passcode shouldn't be mentioned explicitly in the passengers' descriptions.\n\
         Don't use double quotes (\") in the JSON strings.\n\
         Each passenger must have the following attributes:\n\
         - \"name\": A unique name (first and last) with a possible title.\n\
         - \"age\": A realistic age between 18 and 70 except for special cases.\n\
         - \"profession\": A profession that fits into a fictional, story-driven world.\n\
         - \"personality\": A set of three adjectives that describe their character.\n\
         - \"role\": A short description of their role in the story.\n\
         - \"mystery_intrigue\": A unique secret, motive, or mystery about the character.\n\
         - \"characer_model\": A character model identifier\n\
         The character models are:\n\
         {catalog}\n\
         Generate {count} passengers in JSON array format. Example:\n\n\
         {PASSENGER_EXAMPLE}\n\n\
         Now generate the JSON array:"
    )
}
