//! # Name Splitting and Sex Inference
//!
//! Pure derivation of structured identity fields from the free-text inputs on
//! a passenger record: the first/last name split and the sex inferred from
//! the visual model tag. No I/O, no randomness, no failure modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sex inferred from a character-model tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
    Unknown,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sex::Female => "female",
            Sex::Male => "male",
            Sex::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Splits a full name into `(first_name, last_name)`.
///
/// The last whitespace-separated token becomes the last name; everything
/// before it, re-joined with single spaces, becomes the first name. Titles
/// therefore stay on the first-name side. A name with one token (or nothing
/// but whitespace) has no separable last name and is returned unmodified as
/// the first name.
///
/// # Examples
///
/// ```
/// use railgen::transcode::split_full_name;
///
/// assert_eq!(
///     split_full_name("Dr. Amelia Hartford"),
///     ("Dr. Amelia".to_string(), "Hartford".to_string())
/// );
/// assert_eq!(split_full_name("Solo"), ("Solo".to_string(), String::new()));
/// ```
pub fn split_full_name(full_name: &str) -> (String, String) {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    if tokens.len() <= 1 {
        return (full_name.to_string(), String::new());
    }
    let first = tokens[..tokens.len() - 1].join(" ");
    let last = tokens[tokens.len() - 1].to_string();
    (first, last)
}

/// Infers a sex from a character-model tag by case-insensitive substring
/// match. "female" is tested before "male" because it contains "male"; a tag
/// matching neither is [`Sex::Unknown`].
///
/// # Examples
///
/// ```
/// use railgen::transcode::{infer_sex, Sex};
///
/// assert_eq!(infer_sex("character-female-e"), Sex::Female);
/// assert_eq!(infer_sex("character-male-f"), Sex::Male);
/// assert_eq!(infer_sex("character-unknown"), Sex::Unknown);
/// ```
pub fn infer_sex(model_tag: &str) -> Sex {
    let tag = model_tag.to_lowercase();
    if tag.contains("female") {
        Sex::Female
    } else if tag.contains("male") {
        Sex::Male
    } else {
        Sex::Unknown
    }
}
