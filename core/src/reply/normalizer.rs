use rand::seq::SliceRandom;

use crate::tone::Tone;

pub const MAX_REPLY_WORDS: usize = 20;
pub const ELLIPSIS: &str = "...";

/// Substituted when cleaning leaves nothing behind
pub const CLEAN_FALLBACKS: [&str; 3] = [
    "Thanks — I’ll take a look.",
    "I’ll check and get back to you shortly.",
    "Thanks for the update; I’ll handle it.",
];

const TRAILING_PUNCTUATION: &[char] = &[' ', ',', '.', ';', ':'];

/// Uniformly pick one phrase from a fixed fallback set
pub fn pick_fallback(phrases: &[&'static str]) -> String {
    phrases
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}

/// Normalize raw model output into the final reply text. Never returns an empty string.
pub fn clean_reply(raw: &str, tone: Tone) -> String {
    let mut text = collapse_whitespace(raw);
    text = strip_outer_quotes(&text);

    if tone != Tone::Casual {
        let without_emoji: String = text.chars().filter(|c| !is_emoji(*c)).collect();
        text = collapse_whitespace(&without_emoji);
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > MAX_REPLY_WORDS {
        let kept = words[..MAX_REPLY_WORDS].join(" ");
        text = format!("{}{}", kept.trim_end_matches(TRAILING_PUNCTUATION), ELLIPSIS);
    }

    if text.is_empty() {
        return pick_fallback(&CLEAN_FALLBACKS);
    }
    text
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Only a single matching pair wrapping the whole string is removed
fn strip_outer_quotes(text: &str) -> String {
    if text.chars().count() < 2 {
        return text.to_string();
    }
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim().to_string();
        }
    }
    text.to_string()
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F6FF | 0x1F900..=0x1F9FF | 0x2600..=0x26FF
    )
}
