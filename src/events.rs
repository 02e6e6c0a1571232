//! Game event log
//!
//! Sessions report what happens (players joining, questions picked, answers
//! scored) to an optional `EventSink`. Sinks only observe; a failing sink
//! never changes the game.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// CSV header written to a fresh log file
pub const CSV_HEADER: &str =
    "Case_ID,Player_ID,Activity,Timestamp,Category,Question_Value,Answer_Given,Result,Score_After_Play";

/// Actor id used for events not caused by a player
pub const SYSTEM_ACTOR: &str = "SYSTEM";

/// Kinds of game activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Launch,
    LoadQuestions,
    PlayerJoin,
    PlayerJoinAttempt,
    StartGame,
    SelectCategory,
    SelectQuestion,
    ScoreUpdated,
    Answer,
    EndGame,
    GenerateReport,
    ExitGame,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Launch => "LAUNCH",
            Activity::LoadQuestions => "LOAD_QUESTIONS",
            Activity::PlayerJoin => "PLAYER_JOIN",
            Activity::PlayerJoinAttempt => "PLAYER_JOIN_ATTEMPT",
            Activity::StartGame => "START_GAME",
            Activity::SelectCategory => "SELECT_CATEGORY",
            Activity::SelectQuestion => "SELECT_QUESTION",
            Activity::ScoreUpdated => "SCORE_UPDATED",
            Activity::Answer => "ANSWER",
            Activity::EndGame => "END_GAME",
            Activity::GenerateReport => "GENERATE_REPORT",
            Activity::ExitGame => "EXIT_GAME",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One observed game event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    pub case_id: String,
    pub actor_id: String,
    pub activity: Activity,
    pub category: String,
    pub value: Option<i32>,
    pub given: String,
    pub result: String,
    pub score_after: i32,
}

impl GameEvent {
    /// An event with empty category/answer, result `OK` and score 0
    pub fn new(case_id: impl Into<String>, actor_id: impl Into<String>, activity: Activity) -> Self {
        Self {
            case_id: case_id.into(),
            actor_id: actor_id.into(),
            activity,
            category: String::new(),
            value: None,
            given: String::new(),
            result: "OK".to_string(),
            score_after: 0,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_given(mut self, given: impl Into<String>) -> Self {
        self.given = given.into();
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = result.into();
        self
    }

    pub fn with_score(mut self, score: i32) -> Self {
        self.score_after = score;
        self
    }

    /// Render as a CSV row stamped with `timestamp`
    pub fn to_csv_row(&self, timestamp: &str) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{}",
            sanitize(&self.case_id),
            sanitize(&self.actor_id),
            self.activity,
            sanitize(timestamp),
            sanitize(&self.category),
            self.value.map(|v| v.to_string()).unwrap_or_default(),
            sanitize(&self.given),
            sanitize(&self.result),
            self.score_after
        )
    }
}

/// Receiver of game events
pub trait EventSink {
    fn record(&mut self, event: &GameEvent);
}

/// Appends events to a CSV file, writing the header when the file is empty
pub struct CsvEventLog {
    path: PathBuf,
}

impl CsvEventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &GameEvent) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if file.metadata()?.len() == 0 {
            writeln!(file, "{}", CSV_HEADER)?;
        }
        let timestamp = chrono::Local::now().to_rfc3339();
        writeln!(file, "{}", event.to_csv_row(&timestamp))
    }
}

impl EventSink for CsvEventLog {
    fn record(&mut self, event: &GameEvent) {
        if let Err(e) = self.append(event) {
            tracing::warn!("Failed to write event log {}: {}", self.path.display(), e);
        }
    }
}

/// Commas and line breaks would split the row
fn sanitize(field: &str) -> String {
    field.replace([',', '\n', '\r'], " ")
}
