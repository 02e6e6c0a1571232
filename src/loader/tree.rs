//! Question discovery in a generic labeled tree
//!
//! Markup documents arrive in several historical layouts. Three shapes are
//! tried in order and the first that yields questions wins:
//!
//! 1. `List`: the root is a list of question records
//! 2. `Wrapped`: the root has a `questions` child holding that list
//! 3. `Nested`: a depth-first search for question-looking objects anywhere
//!
//! Every record a shape finds becomes a question, even when all of its
//! fields end up defaulted.

use crate::question::{ChoiceSlot, Question, non_blank};
use serde_json::{Map, Value};
use super::fields;
use super::json::{question_from_record, scalar_fields};

/// Key of the wrapped question list
const WRAPPED_KEY: &str = "questions";

/// Layout a tree was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Root is a list of question records
    List,
    /// Root object holds the list under `questions`
    Wrapped,
    /// Question nodes found by searching the whole tree
    Nested,
}

impl Shape {
    /// Get all shapes in the order they are attempted
    pub fn all() -> &'static [Shape] {
        &[Shape::List, Shape::Wrapped, Shape::Nested]
    }

    /// Try to read the tree as this shape. `None` when the shape does not apply.
    pub fn attempt(&self, root: &Value) -> Option<Vec<Question>> {
        match self {
            Shape::List => {
                let records = record_list(root)?;
                Some(records.into_iter().map(question_from_record).collect())
            }
            Shape::Wrapped => {
                let wrapped = root.as_object()?.get(WRAPPED_KEY)?;
                let records = record_list(wrapped)?;
                Some(records.into_iter().map(question_from_record).collect())
            }
            Shape::Nested => {
                let mut found = Vec::new();
                collect_question_nodes(root, &mut found);
                Some(found.into_iter().map(question_from_node).collect())
            }
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Shape::List => "list",
            Shape::Wrapped => "wrapped",
            Shape::Nested => "nested",
        };
        write!(f, "{}", name)
    }
}

/// Questions extracted from a tree, with the shape that produced them
#[derive(Debug, Default)]
pub struct TreeExtraction {
    /// `None` when no shape yielded anything
    pub shape: Option<Shape>,
    pub questions: Vec<Question>,
}

/// Run the shapes in order and keep the first non-empty result
pub fn extract(root: &Value) -> TreeExtraction {
    for shape in Shape::all() {
        match shape.attempt(root) {
            Some(questions) if !questions.is_empty() => {
                tracing::debug!("Read {} questions as {} shape", questions.len(), shape);
                return TreeExtraction {
                    shape: Some(*shape),
                    questions,
                };
            }
            _ => tracing::debug!("Tree does not match {} shape", shape),
        }
    }

    tracing::warn!("No question records found in document");
    TreeExtraction::default()
}

/// A non-empty list of question records.
///
/// Besides a plain array this accepts the way a repeated markup element is
/// encoded: an object with exactly one container entry holding either the
/// array, or a lone object when the element occurs once. Scalar siblings of
/// that entry are attributes and do not count. At least one record must
/// carry a question field, so lists of unrelated containers fall through to
/// the nested search.
fn record_list(node: &Value) -> Option<Vec<&Value>> {
    let list: Vec<&Value> = match node {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => {
            let mut containers = map.values().filter(|v| v.is_array() || v.is_object());
            let only = containers.next()?;
            if containers.next().is_some() {
                return None;
            }
            match only {
                Value::Array(items) => items.iter().collect(),
                single => vec![single],
            }
        }
        _ => return None,
    };

    let all_records = !list.is_empty() && list.iter().all(|v| v.is_object());
    let any_question = list
        .iter()
        .filter_map(|v| v.as_object())
        .any(fields::has_question_field);

    if all_records && any_question {
        Some(list)
    } else {
        None
    }
}

/// Pre-order search. A question node ends the descent on its branch.
fn collect_question_nodes<'a>(node: &'a Value, out: &mut Vec<&'a Map<String, Value>>) {
    match node {
        Value::Object(map) => {
            if fields::is_question_node(map) {
                out.push(map);
                return;
            }
            for child in map.values() {
                collect_question_nodes(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_question_nodes(item, out);
            }
        }
        _ => {}
    }
}

/// Build a question from a discovered node.
///
/// Choices come from a nested options object first and fall back to flat
/// option fields on the node itself.
fn question_from_node(node: &Map<String, Value>) -> Question {
    let mut question = scalar_fields(node);
    let options = fields::lookup_object(node, fields::OPTIONS);

    for slot in ChoiceSlot::all() {
        let nested = options.and_then(|o| non_blank(fields::lookup_text(o, fields::option_keys(*slot))));
        let text = nested.or_else(|| fields::lookup_text(node, fields::flat_choice_keys(*slot)));
        question.set_choice(*slot, text);
    }

    question
}
