use crate::question::Question;
use crate::session::Player;
use tabled::{settings::Style, Table, Tabled};

/// One board cell as shown by `trivia load`
#[derive(Tabled)]
pub struct BoardRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Value")]
    pub value: i32,
    #[tabled(rename = "Question")]
    pub text: String,
    #[tabled(rename = "Choices")]
    pub choices: String,
    #[tabled(rename = "Answer")]
    pub answer: String,
}

impl From<&Question> for BoardRow {
    fn from(question: &Question) -> Self {
        Self {
            category: question.category.clone(),
            value: question.value,
            text: question.text.clone(),
            choices: question
                .choices()
                .map(|(slot, text)| format!("{}) {}", slot, text))
                .collect::<Vec<_>>()
                .join("  "),
            answer: question.answer.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Player")]
    pub label: String,
    #[tabled(rename = "Score")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            label: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn board_table<'a>(questions: impl IntoIterator<Item = &'a Question>) -> String {
    let rows: Vec<BoardRow> = questions.into_iter().map(BoardRow::from).collect();
    if rows.is_empty() {
        return String::new();
    }
    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn scores_table(players: &[Player]) -> String {
    let mut builder = TableBuilder::new();
    for player in players {
        builder.add_row(&player.name, &player.score.to_string());
    }
    builder.build()
}
