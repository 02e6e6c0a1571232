//! Field-name equivalence table
//!
//! Question files written by hand disagree on key names (`answer`, `Answer`,
//! `CorrectAnswer`, ...). Every logical field has an ordered list of candidate
//! keys; the first candidate holding a non-null value wins. There is no
//! merging across candidates.

use crate::question::ChoiceSlot;
use serde_json::{Map, Value};

pub const ID: &[&str] = &["id", "Id", "ID"];
pub const CATEGORY: &[&str] = &["category", "Category"];
pub const VALUE: &[&str] = &["value", "Value"];
pub const TEXT: &[&str] = &["question", "Question", "QuestionText", "questionText"];
pub const ANSWER: &[&str] = &["answer", "Answer", "CorrectAnswer", "correctAnswer", "Correctanswer"];

/// Key of a positional array of choice texts
pub const CHOICES: &[&str] = &["choices", "Choices"];

/// Key of a nested object holding the options
pub const OPTIONS: &[&str] = &["Options", "options"];

/// Keys that mark an object node as a question during a tree search
pub const QUESTION_MARKERS: &[&str] = &["Category", "category", "QuestionText", "question", "Question"];

/// Flat choice keys on the record itself
pub fn flat_choice_keys(slot: ChoiceSlot) -> &'static [&'static str] {
    match slot {
        ChoiceSlot::A => &["choiceA", "choicea", "OptionA", "optionA", "Optiona", "optiona"],
        ChoiceSlot::B => &["choiceB", "choiceb", "OptionB", "optionB", "Optionb", "optionb"],
        ChoiceSlot::C => &["choiceC", "choicec", "OptionC", "optionC", "Optionc", "optionc"],
        ChoiceSlot::D => &["choiceD", "choiced", "OptionD", "optionD", "Optiond", "optiond"],
    }
}

/// Choice keys inside an options object
pub fn option_keys(slot: ChoiceSlot) -> &'static [&'static str] {
    match slot {
        ChoiceSlot::A => &["A", "a", "OptionA", "optionA", "Optiona", "optiona"],
        ChoiceSlot::B => &["B", "b", "OptionB", "optionB", "Optionb", "optionb"],
        ChoiceSlot::C => &["C", "c", "OptionC", "optionC", "Optionc", "optionc"],
        ChoiceSlot::D => &["D", "d", "OptionD", "optionD", "Optiond", "optiond"],
    }
}

/// First non-null value among `candidates`
pub fn lookup<'a>(record: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .find_map(|key| record.get(*key).filter(|v| !v.is_null()))
}

/// Scalar value rendered as text. Containers have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text of the first matching candidate
pub fn lookup_text(record: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    lookup(record, candidates).and_then(scalar_text)
}

/// Integer point value of the first matching candidate, 0 when absent or unparseable
pub fn lookup_value(record: &Map<String, Value>, candidates: &[&str]) -> i32 {
    lookup_text(record, candidates)
        .and_then(|text| text.trim().parse::<i32>().ok())
        .unwrap_or(0)
}

/// First candidate that holds an object
pub fn lookup_object<'a>(record: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Map<String, Value>> {
    lookup(record, candidates).and_then(Value::as_object)
}

/// Whether any candidate key holds a scalar. A key holding a container is a
/// wrapper that happens to share a field name, not the field itself.
fn has_scalar(record: &Map<String, Value>, candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|key| matches!(record.get(*key), Some(v) if !v.is_array() && !v.is_object()))
}

/// Whether an object node looks like a question
pub fn is_question_node(record: &Map<String, Value>) -> bool {
    has_scalar(record, QUESTION_MARKERS)
}

/// Whether a record carries any recognised question field
pub fn has_question_field(record: &Map<String, Value>) -> bool {
    [ID, CATEGORY, VALUE, TEXT, ANSWER]
        .iter()
        .any(|candidates| has_scalar(record, candidates))
        || lookup(record, CHOICES).is_some_and(Value::is_array)
        || lookup_object(record, OPTIONS).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_candidate_wins() {
        let record = obj(json!({"Answer": "second", "answer": "first"}));
        assert_eq!(lookup_text(&record, ANSWER).as_deref(), Some("first"));
    }

    #[test]
    fn test_null_falls_through() {
        let record = obj(json!({"question": null, "QuestionText": "Real text"}));
        assert_eq!(lookup_text(&record, TEXT).as_deref(), Some("Real text"));
    }

    #[test]
    fn test_value_parsing() {
        assert_eq!(lookup_value(&obj(json!({"value": 400})), VALUE), 400);
        assert_eq!(lookup_value(&obj(json!({"Value": " 300 "})), VALUE), 300);
        assert_eq!(lookup_value(&obj(json!({"value": "lots"})), VALUE), 0);
        assert_eq!(lookup_value(&obj(json!({"value": 2.5})), VALUE), 0);
        assert_eq!(lookup_value(&obj(json!({})), VALUE), 0);
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(scalar_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(scalar_text(&json!({"a": 1})), None);
    }

    #[test]
    fn test_question_markers() {
        assert!(is_question_node(&obj(json!({"QuestionText": "?"}))));
        assert!(is_question_node(&obj(json!({"Category": ""}))));
        assert!(!is_question_node(&obj(json!({"Answer": "x"}))));
        assert!(!is_question_node(&obj(json!({"question": {"Category": "Art"}}))));
        assert!(!is_question_node(&obj(json!({"question": [{"Category": "Art"}]}))));
    }

    #[test]
    fn test_question_fields_ignore_wrappers() {
        assert!(has_question_field(&obj(json!({"Answer": "x"}))));
        assert!(has_question_field(&obj(json!({"choices": ["a", "b"]}))));
        assert!(has_question_field(&obj(json!({"Options": {"A": "a"}}))));
        assert!(!has_question_field(&obj(json!({"question": {"Answer": "x"}}))));
        assert!(!has_question_field(&obj(json!({"choices": "a"}))));
    }
}
