//! Core data models for the trainers.
//! Words come from the static catalog asset; progress is what survives in local storage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder a gap-fill sentence uses for the missing word.
pub const GAP_MARKER: &str = "___";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// One spelling challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    /// Exact target spelling, compared case-sensitively.
    pub word: String,
    pub audio_url: String,
    /// Letter tiles: every character of `word` plus optional decoys.
    pub letters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Hints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
}

impl Word {
    pub fn hint(&self) -> Option<&str> {
        self.hint
            .as_deref()
            .or_else(|| self.hints.as_ref().and_then(|h| h.tip.as_deref()))
            .filter(|h| !h.trim().is_empty())
    }

    /// Number of characters the player has to assemble.
    pub fn target_len(&self) -> usize {
        self.word.chars().count()
    }

    /// Text before and after the gap, if the sentence has exactly one marker.
    pub fn gap_parts(&self) -> Option<(&str, &str)> {
        let sentence = self.sentence.as_deref()?;
        let (before, after) = sentence.split_once(GAP_MARKER)?;
        if after.contains(GAP_MARKER) {
            return None;
        }
        Some((before, after))
    }
}

pub type MistakeMap = BTreeMap<String, u32>;

/// What the progress store keeps per storage key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mistakes: Option<MistakeMap>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedbackTone {
    #[default]
    Neutral,
    Success,
    Error,
}

/// Feedback line shown under the spelling input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    None,
    /// Letter tapped although every slot is already filled.
    InputFull,
    EmptyAttempt,
    MissingLetters(usize),
    TooManyLetters,
    Hint(String),
    TryAgain,
    Solved,
    AudioUnavailable,
}

impl Feedback {
    pub fn tone(&self) -> FeedbackTone {
        match self {
            Feedback::None => FeedbackTone::Neutral,
            Feedback::Solved => FeedbackTone::Success,
            _ => FeedbackTone::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.tone() == FeedbackTone::Error
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::None => Ok(()),
            Feedback::InputFull => f.write_str("Du hast bereits alle Buchstaben gewählt."),
            Feedback::EmptyAttempt => f.write_str("Bitte beginne mit dem ersten Buchstaben."),
            Feedback::MissingLetters(n) => write!(
                f,
                "Dir fehlen noch {n} Buchstabe{}.",
                if *n == 1 { "" } else { "n" }
            ),
            Feedback::TooManyLetters => f.write_str("Du hast zu viele Buchstaben gewählt."),
            Feedback::Hint(tip) => write!(f, "Schon nah dran! Hinweis: {tip}"),
            Feedback::TryAgain => f.write_str("Versuch es noch einmal."),
            Feedback::Solved => f.write_str("Sehr gut! Weiter so."),
            Feedback::AudioUnavailable => {
                f.write_str("Audio nicht verfügbar – bitte Lehrkraft informieren.")
            }
        }
    }
}
