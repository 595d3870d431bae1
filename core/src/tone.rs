/// Keyword-based tone detection
///
/// Classifies free text into a coarse register used to steer reply style.
use serde::{Deserialize, Serialize};
use std::fmt;

const CASUAL_KEYWORDS: &[&str] = &["hey", "yo", "bro", "dude", "lol", "thanks", "cool"];
const FORMAL_KEYWORDS: &[&str] = &["regards", "sincerely", "dear", "please", "thank you"];

/// Register of an inbound message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    Formal,
    #[default]
    Neutral,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Formal => "formal",
            Tone::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `text`. Keywords match anywhere in the lower-cased text, so "you"
/// counts as casual through "yo". Casual keywords win over formal ones.
pub fn detect_tone(text: &str) -> Tone {
    let lowered = text.to_lowercase();

    if contains_any(&lowered, CASUAL_KEYWORDS) {
        Tone::Casual
    } else if contains_any(&lowered, FORMAL_KEYWORDS) {
        Tone::Formal
    } else {
        Tone::Neutral
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}
