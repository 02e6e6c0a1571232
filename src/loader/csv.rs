//! Delimited-text loader
//!
//! Rows look like `category,value,question,answer[,A,B,C,D]` or
//! `category,value,question,A,B,C,D,answer`. Which of the two an 8-column row
//! uses is not declared anywhere, so it is sniffed from the content:
//! if column 3 repeats one of columns 4..=7 it is the answer, otherwise the
//! answer is the last column. A row whose real answer happens to equal an
//! option text in the other layout is misread; this is a known limitation.
//!
//! Rows with fewer than four columns are dropped.

use crate::Result;
use crate::question::{ChoiceSlot, Question, non_blank};
use super::framework::{Format, QuestionLoader};

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Fewer columns than this and the row is dropped
const MIN_FIELDS: usize = 4;

/// Rows this wide need the column layout sniffed
const AMBIGUOUS_WIDTH: usize = 8;

/// Header keywords, matched case-insensitively against the first row
const HEADER_KEYWORDS: &[&str] = &["category", "question"];

/// CSV question loader
pub struct CsvLoader {
    delimiter: char,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    /// Create a loader splitting on commas
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Create a loader splitting on a custom delimiter
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Parse a single data row. `None` means the row is malformed and dropped.
    pub fn parse_row(&self, line: &str) -> Option<Question> {
        let fields: Vec<String> = split_line(line, self.delimiter)
            .iter()
            .map(|f| clean_field(f))
            .collect();

        if fields.len() < MIN_FIELDS {
            return None;
        }

        let field = |idx: usize| fields.get(idx).cloned();

        let (answer, choices) = if fields.len() >= AMBIGUOUS_WIDTH {
            let candidate = &fields[3];
            let answer_first = fields[4..AMBIGUOUS_WIDTH]
                .iter()
                .any(|choice| choice.to_lowercase() == candidate.to_lowercase());

            if answer_first {
                (field(3), [field(4), field(5), field(6), field(7)])
            } else {
                (field(7), [field(3), field(4), field(5), field(6)])
            }
        } else {
            (field(3), [field(4), field(5), field(6), field(7)])
        };

        let mut question = Question {
            category: fields[0].clone(),
            value: fields[1].parse::<i32>().unwrap_or(0),
            text: fields[2].clone(),
            answer: non_blank(answer),
            ..Question::default()
        };
        for (slot, text) in ChoiceSlot::all().iter().zip(choices) {
            question.set_choice(*slot, text);
        }

        Some(question)
    }
}

impl QuestionLoader for CsvLoader {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn parse(&self, content: &str) -> Result<Vec<Question>> {
        let mut questions = Vec::new();
        let mut first_row = true;

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if first_row {
                first_row = false;
                if looks_like_header(line) {
                    tracing::debug!("Skipping header row: {}", line);
                    continue;
                }
            }

            match self.parse_row(line) {
                Some(question) => questions.push(question),
                None => tracing::debug!("Dropping malformed row {}: {}", idx + 1, line),
            }
        }

        Ok(questions)
    }
}

/// Whether a row is a header row
fn looks_like_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Split a line on `delimiter`, honouring double quotes.
///
/// Inside quotes the delimiter is literal and `""` is an escaped quote.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut out = Vec::new();
    if line.is_empty() {
        return out;
    }

    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delimiter && !in_quotes {
            out.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    out.push(current);
    out
}

/// Trim a field and strip surrounding quote characters
fn clean_field(field: &str) -> String {
    field.trim().trim_matches('"').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<Question> {
        CsvLoader::new().parse(content).unwrap()
    }

    #[test]
    fn test_split_respects_quotes() {
        let fields = split_line(r#"Quotes,100,"Who said ""Eureka""?","Archimedes, probably""#, ',');
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[2], r#"Who said "Eureka"?"#);
        assert_eq!(fields[3], "Archimedes, probably");
    }

    #[test]
    fn test_split_keeps_empty_fields() {
        assert_eq!(split_line("a,,b,", ','), vec!["a", "", "b", ""]);
        assert!(split_line("", ',').is_empty());
    }

    #[test]
    fn test_answer_first_layout_when_answer_repeats_a_choice() {
        let questions = parse("Geography,200,What is the capital of France?,Paris,London,Paris,Rome,Berlin");

        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.category, "Geography");
        assert_eq!(q.value, 200);
        assert_eq!(q.text, "What is the capital of France?");
        assert_eq!(q.answer.as_deref(), Some("Paris"));
        assert_eq!(q.choice(ChoiceSlot::A), Some("London"));
        assert_eq!(q.choice(ChoiceSlot::B), Some("Paris"));
        assert_eq!(q.choice(ChoiceSlot::C), Some("Rome"));
        assert_eq!(q.choice(ChoiceSlot::D), Some("Berlin"));
    }

    #[test]
    fn test_answer_matching_third_choice_selects_answer_first_layout() {
        let q = &parse("Science,300,Red planet?,Mars,Venus,Earth,mars,Jupiter")[0];
        assert_eq!(q.answer.as_deref(), Some("Mars"));
        assert_eq!(q.choice(ChoiceSlot::C), Some("mars"));
    }

    #[test]
    fn test_answer_last_layout() {
        let q = &parse("Science,300,Red planet?,Venus,Mars,Earth,Jupiter,B")[0];
        assert_eq!(q.answer.as_deref(), Some("B"));
        assert_eq!(q.choice(ChoiceSlot::A), Some("Venus"));
        assert_eq!(q.choice(ChoiceSlot::D), Some("Jupiter"));
    }

    #[test]
    fn test_short_rows() {
        let questions = parse("Math,100,2+2?,4\nMath,200,3+3?,6,5,6");
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].answer.as_deref(), Some("4"));
        assert!(!questions[0].is_multiple_choice());
        assert_eq!(questions[1].choice(ChoiceSlot::B), Some("6"));
        assert_eq!(questions[1].choice(ChoiceSlot::C), None);
    }

    #[test]
    fn test_header_only_detected_on_first_row() {
        let content = "Category,Value,Question,Answer\nTrivia,100,Which question?,This one\n";
        let questions = parse(content);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Which question?");

        // No header: the first row is data
        let questions = parse("Art,100,Painter of the Mona Lisa?,Da Vinci");
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_blank_and_malformed_rows_are_dropped() {
        let content = "\n  \nArt,100,Painter of the Mona Lisa?,Da Vinci\nbroken,row\nArt,200,Starry Night?,Van Gogh\n";
        let questions = parse(content);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].value, 200);
    }

    #[test]
    fn test_unparseable_value_and_empty_answer() {
        let q = &parse("Music,lots,Who wrote Hey Jude?,,A,,C")[0];
        assert_eq!(q.value, 0);
        assert!(q.answer.is_none());
        assert_eq!(q.choice(ChoiceSlot::A), Some("A"));
        assert_eq!(q.choice(ChoiceSlot::B), None);
    }

    #[test]
    fn test_custom_delimiter() {
        let loader = CsvLoader::with_delimiter(';');
        let questions = loader.parse("Food;150;Main ingredient of guacamole?;Avocado").unwrap();
        assert_eq!(questions[0].answer.as_deref(), Some("Avocado"));
    }

    #[test]
    fn test_reparse_is_identical_apart_from_ids() {
        let content = "Geography,200,Capital of Spain?,Madrid,Madrid,Lisbon,Rome,Paris";
        let mut first = parse(content);
        let mut second = parse(content);
        for q in first.iter_mut().chain(second.iter_mut()) {
            q.id.clear();
        }
        assert_eq!(first, second);
    }
}
