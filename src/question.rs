//! Question model - the canonical record every loader produces
//!
//! A question carries four positionally fixed choice slots (A-D). Source
//! formats name and order their options in many ways; by the time a
//! `Question` exists, they have all been mapped onto these slots.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the four multiple-choice positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceSlot {
    A,
    B,
    C,
    D,
}

impl ChoiceSlot {
    /// Get the letter for this slot
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceSlot::A => "A",
            ChoiceSlot::B => "B",
            ChoiceSlot::C => "C",
            ChoiceSlot::D => "D",
        }
    }

    /// Zero-based position of the slot
    pub fn index(&self) -> usize {
        match self {
            ChoiceSlot::A => 0,
            ChoiceSlot::B => 1,
            ChoiceSlot::C => 2,
            ChoiceSlot::D => 3,
        }
    }

    /// Get all slots in positional order
    pub fn all() -> &'static [ChoiceSlot] {
        &[ChoiceSlot::A, ChoiceSlot::B, ChoiceSlot::C, ChoiceSlot::D]
    }

    /// Map a player-typed letter onto a slot, ignoring case and surrounding whitespace.
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter.trim().to_ascii_uppercase().as_str() {
            "A" => Some(ChoiceSlot::A),
            "B" => Some(ChoiceSlot::B),
            "C" => Some(ChoiceSlot::C),
            "D" => Some(ChoiceSlot::D),
            _ => None,
        }
    }
}

impl FromStr for ChoiceSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_letter(s).ok_or_else(|| Error::Parse(format!("Unknown choice letter: {}", s)))
    }
}

impl std::fmt::Display for ChoiceSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A trivia question in canonical form.
///
/// Everything except `asked` is fixed once a loader hands the question out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque identifier, taken from the source or generated
    pub id: String,
    /// Grouping key on the board (may be empty)
    pub category: String,
    /// Point value
    pub value: i32,
    /// The prompt shown to players (empty for malformed records)
    pub text: String,
    /// Stored answer: a choice letter or the full answer text
    pub answer: Option<String>,
    pub choice_a: Option<String>,
    pub choice_b: Option<String>,
    pub choice_c: Option<String>,
    pub choice_d: Option<String>,
    /// Set by the session once the question has been played
    #[serde(default)]
    pub asked: bool,
}

impl Default for Question {
    fn default() -> Self {
        Self {
            id: new_question_id(),
            category: String::new(),
            value: 0,
            text: String::new(),
            answer: None,
            choice_a: None,
            choice_b: None,
            choice_c: None,
            choice_d: None,
            asked: false,
        }
    }
}

impl Question {
    /// Create a question with no answer and no choices
    pub fn new(category: impl Into<String>, value: i32, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the stored answer (blank answers leave it unset)
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = non_blank(Some(answer.into()));
        self
    }

    /// Set the text of one choice slot
    pub fn with_choice(mut self, slot: ChoiceSlot, text: impl Into<String>) -> Self {
        self.set_choice(slot, Some(text.into()));
        self
    }

    /// Replace a choice slot. Blank text clears the slot.
    pub fn set_choice(&mut self, slot: ChoiceSlot, text: Option<String>) {
        let text = non_blank(text);
        match slot {
            ChoiceSlot::A => self.choice_a = text,
            ChoiceSlot::B => self.choice_b = text,
            ChoiceSlot::C => self.choice_c = text,
            ChoiceSlot::D => self.choice_d = text,
        }
    }

    /// Text bound to a slot, if set
    pub fn choice(&self, slot: ChoiceSlot) -> Option<&str> {
        match slot {
            ChoiceSlot::A => self.choice_a.as_deref(),
            ChoiceSlot::B => self.choice_b.as_deref(),
            ChoiceSlot::C => self.choice_c.as_deref(),
            ChoiceSlot::D => self.choice_d.as_deref(),
        }
    }

    /// Text bound to a letter such as `"b"`; `None` for non-letters and empty slots.
    pub fn choice_for_letter(&self, letter: &str) -> Option<&str> {
        ChoiceSlot::from_letter(letter).and_then(|slot| self.choice(slot))
    }

    /// All set choices in slot order
    pub fn choices(&self) -> impl Iterator<Item = (ChoiceSlot, &str)> + '_ {
        ChoiceSlot::all()
            .iter()
            .filter_map(|slot| self.choice(*slot).map(|text| (*slot, text)))
    }

    /// Whether any choice slot is set
    pub fn is_multiple_choice(&self) -> bool {
        self.choices().next().is_some()
    }

    /// Stored answer with surrounding whitespace removed; `None` when unset or blank
    pub fn stored_answer(&self) -> Option<&str> {
        self.answer
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// Get a short description for display
    pub fn short_description(&self) -> String {
        format!("{} for {}: {}", self.category, self.value, self.text)
    }
}

/// Generate a fresh question identifier
pub fn new_question_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Trim and collapse empty strings to `None`.
pub(crate) fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
