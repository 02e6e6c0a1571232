//! Key/value document loader
//!
//! Reads a JSON array of loosely typed question records. Every record found
//! in the array becomes a question; missing fields fall back to defaults
//! instead of dropping the record.

use crate::question::{ChoiceSlot, Question, new_question_id, non_blank};
use crate::{Error, Result};
use serde_json::{Map, Value};
use super::fields;
use super::framework::{Format, QuestionLoader};

/// JSON question loader
#[derive(Debug, Default)]
pub struct JsonLoader;

impl JsonLoader {
    pub fn new() -> Self {
        Self
    }
}

impl QuestionLoader for JsonLoader {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, content: &str) -> Result<Vec<Question>> {
        let root: Value = serde_json::from_str(content)
            .map_err(|e| Error::Parse(format!("invalid JSON: {}", e)))?;

        match root {
            Value::Array(records) => Ok(records.iter().map(question_from_record).collect()),
            other => {
                tracing::warn!(
                    "Expected a JSON array of questions, found {}; no questions loaded",
                    kind_name(&other)
                );
                Ok(Vec::new())
            }
        }
    }
}

/// Build a question from one key/value record.
///
/// Choice precedence, per slot, later sources overriding earlier ones:
/// 1. a positional `choices` array
/// 2. an `Options` object keyed by letter or `OptionX`
/// 3. flat `choiceX` / `OptionX` fields on the record
///
/// Non-object records yield an all-default question.
pub fn question_from_record(record: &Value) -> Question {
    let Some(record) = record.as_object() else {
        return Question::default();
    };

    let mut question = scalar_fields(record);

    if let Some(list) = fields::lookup(record, fields::CHOICES).and_then(Value::as_array) {
        for (slot, item) in ChoiceSlot::all().iter().zip(list) {
            override_choice(&mut question, *slot, fields::scalar_text(item));
        }
    }

    if let Some(options) = fields::lookup_object(record, fields::OPTIONS) {
        for slot in ChoiceSlot::all() {
            override_choice(&mut question, *slot, fields::lookup_text(options, fields::option_keys(*slot)));
        }
    }

    for slot in ChoiceSlot::all() {
        override_choice(&mut question, *slot, fields::lookup_text(record, fields::flat_choice_keys(*slot)));
    }

    question
}

/// Category, value, text, answer and id; choices left unset
pub(crate) fn scalar_fields(record: &Map<String, Value>) -> Question {
    Question {
        id: fields::lookup_text(record, fields::ID)
            .and_then(|id| non_blank(Some(id)))
            .unwrap_or_else(new_question_id),
        category: fields::lookup_text(record, fields::CATEGORY).unwrap_or_default(),
        value: fields::lookup_value(record, fields::VALUE),
        text: fields::lookup_text(record, fields::TEXT).unwrap_or_default(),
        answer: non_blank(fields::lookup_text(record, fields::ANSWER)),
        ..Question::default()
    }
}

/// Replace a slot only when the new source actually provides text
fn override_choice(question: &mut Question, slot: ChoiceSlot, text: Option<String>) {
    if let Some(text) = non_blank(text) {
        question.set_choice(slot, Some(text));
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
