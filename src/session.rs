//! Game session - board, players and turn history
//!
//! A session owns everything one game needs. There is no global state: the
//! caller creates a session, loads a board into it and plays turns through it.

use crate::config::TriviaConfig;
use crate::events::{Activity, EventSink, GameEvent, SYSTEM_ACTOR};
use crate::loader::registry_with_delimiter;
use crate::question::Question;
use crate::scoring::{AnswerResolver, ScoringStrategy};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A player and their running score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub score: i32,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
        }
    }

    pub fn add_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add(delta);
    }
}

/// What happened in one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub player_id: String,
    pub player_name: String,
    pub category: String,
    pub value: i32,
    pub question_text: String,
    pub choices: [Option<String>; 4],
    pub answer_given: String,
    pub correct: bool,
    pub points_earned: i32,
    pub running_total: i32,
    pub timestamp: DateTime<Utc>,
}

/// One category column: value → question, ascending
#[derive(Debug, Clone)]
struct Column {
    category: String,
    questions: BTreeMap<i32, Question>,
}

/// A single game
pub struct GameSession {
    case_id: String,
    board: Vec<Column>,
    players: Vec<Player>,
    turns: Vec<TurnRecord>,
    max_players: usize,
    csv_delimiter: char,
    scoring: Box<dyn ScoringStrategy>,
    events: Option<Box<dyn EventSink>>,
}

impl GameSession {
    /// Create an empty session configured from `config`
    pub fn new(config: &TriviaConfig) -> Self {
        Self {
            case_id: uuid::Uuid::new_v4().to_string(),
            board: Vec::new(),
            players: Vec::new(),
            turns: Vec::new(),
            max_players: config.max_players(),
            csv_delimiter: config.csv_delimiter(),
            scoring: Box::new(AnswerResolver::new(config.negative_on_wrong())),
            events: None,
        }
    }

    /// Attach an event sink
    pub fn with_events(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Some(Box::new(sink));
        self
    }

    /// Replace the scoring strategy
    pub fn with_scoring(mut self, strategy: impl ScoringStrategy + 'static) -> Self {
        self.scoring = Box::new(strategy);
        self
    }

    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// Send an event to the sink, if any
    pub fn log(&mut self, event: GameEvent) {
        if let Some(sink) = self.events.as_mut() {
            sink.record(&event);
        }
    }

    /// Start an event for this session
    pub fn event(&self, actor_id: &str, activity: Activity) -> GameEvent {
        GameEvent::new(self.case_id.clone(), actor_id, activity)
    }

    /// Load a question file onto the board, replacing any previous board
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let questions = registry_with_delimiter(self.csv_delimiter).load_file(path)?;
        let count = self.load_questions(questions);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let event = self.event(SYSTEM_ACTOR, Activity::LoadQuestions).with_given(name);
        self.log(event);
        Ok(count)
    }

    /// Arrange questions on the board, replacing any previous board.
    ///
    /// Categories keep their first-seen order; a later question with the same
    /// category and value replaces the earlier one. Returns the board size.
    pub fn load_questions(&mut self, questions: Vec<Question>) -> usize {
        self.board.clear();
        for question in questions {
            let idx = match self.board.iter().position(|c| c.category == question.category) {
                Some(idx) => idx,
                None => {
                    self.board.push(Column {
                        category: question.category.clone(),
                        questions: BTreeMap::new(),
                    });
                    self.board.len() - 1
                }
            };
            if let Some(replaced) = self.board[idx].questions.insert(question.value, question) {
                tracing::debug!("Replaced duplicate question: {}", replaced.short_description());
            }
        }
        self.board.iter().map(|c| c.questions.len()).sum()
    }

    /// Add a player, enforcing the player limit
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<&Player> {
        let name = name.into();
        let id = format!("P{}", self.players.len() + 1);

        if self.players.len() >= self.max_players {
            let event = self
                .event(&id, Activity::PlayerJoinAttempt)
                .with_given(name)
                .with_result("FAILED_MAX_PLAYERS")
                .with_score(self.total_score());
            self.log(event);
            return Err(Error::Session(format!(
                "Cannot add more than {} players",
                self.max_players
            )));
        }

        let event = self.event(&id, Activity::PlayerJoin).with_given(name.clone());
        self.log(event);
        self.players.push(Player::new(id, name));
        Ok(&self.players[self.players.len() - 1])
    }

    /// Categories in board order
    pub fn categories(&self) -> Vec<&str> {
        self.board.iter().map(|c| c.category.as_str()).collect()
    }

    /// All values in a category, ascending
    pub fn values(&self, category: &str) -> Vec<i32> {
        self.column(category)
            .map(|c| c.questions.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Values in a category whose question has not been asked yet
    pub fn open_values(&self, category: &str) -> Vec<i32> {
        self.column(category)
            .map(|c| {
                c.questions
                    .iter()
                    .filter(|(_, q)| !q.asked)
                    .map(|(v, _)| *v)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn question(&self, category: &str, value: i32) -> Option<&Question> {
        self.column(category)?.questions.get(&value)
    }

    /// All questions in board order
    pub fn questions(&self) -> impl Iterator<Item = &Question> + '_ {
        self.board.iter().flat_map(|c| c.questions.values())
    }

    pub fn all_answered(&self) -> bool {
        self.questions().all(|q| q.asked)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    pub fn total_score(&self) -> i32 {
        self.players.iter().fold(0, |total, p| total.saturating_add(p.score))
    }

    /// Play one question for one player.
    ///
    /// The question is marked asked, the score delta applied and the turn
    /// recorded. Playing an unknown or already asked question is an error and
    /// changes nothing.
    pub fn play_turn(&mut self, player_index: usize, category: &str, value: i32, answer: &str) -> Result<TurnRecord> {
        if player_index >= self.players.len() {
            return Err(Error::Session(format!("No player at position {}", player_index + 1)));
        }

        let column = self
            .board
            .iter_mut()
            .find(|c| c.category == category)
            .ok_or_else(|| Error::Session(format!("Unknown category: {}", category)))?;
        let question = column
            .questions
            .get_mut(&value)
            .ok_or_else(|| Error::Session(format!("No {} question in {}", value, category)))?;
        if question.asked {
            return Err(Error::Session(format!("{} for {} was already asked", category, value)));
        }

        let outcome = self.scoring.evaluate(question, Some(answer));
        question.asked = true;

        let player = &mut self.players[player_index];
        player.add_score(outcome.delta);

        let record = TurnRecord {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            category: question.category.clone(),
            value: question.value,
            question_text: question.text.clone(),
            choices: [
                question.choice_a.clone(),
                question.choice_b.clone(),
                question.choice_c.clone(),
                question.choice_d.clone(),
            ],
            answer_given: answer.to_string(),
            correct: outcome.correct,
            points_earned: outcome.delta,
            running_total: player.score,
            timestamp: Utc::now(),
        };

        let result = if record.correct { "CORRECT" } else { "WRONG" };
        for activity in [Activity::ScoreUpdated, Activity::Answer] {
            let event = self
                .event(&record.player_id, activity)
                .with_category(record.category.clone())
                .with_value(record.value)
                .with_given(record.answer_given.clone())
                .with_result(result)
                .with_score(record.running_total);
            self.log(event);
        }

        self.turns.push(record.clone());
        Ok(record)
    }

    fn column(&self, category: &str) -> Option<&Column> {
        self.board.iter().find(|c| c.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::ChoiceSlot;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorded(Rc<RefCell<Vec<GameEvent>>>);

    impl EventSink for Recorded {
        fn record(&mut self, event: &GameEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    fn board() -> Vec<Question> {
        vec![
            Question::new("Geography", 200, "Capital of France?")
                .with_answer("Paris")
                .with_choice(ChoiceSlot::A, "London")
                .with_choice(ChoiceSlot::B, "Paris"),
            Question::new("Math", 100, "2+2?").with_answer("4"),
            Question::new("Geography", 100, "Longest river?").with_answer("Nile"),
        ]
    }

    fn session() -> GameSession {
        let mut session = GameSession::new(&TriviaConfig::default());
        session.load_questions(board());
        session
    }

    #[test]
    fn test_board_layout() {
        let session = session();
        assert_eq!(session.categories(), vec!["Geography", "Math"]);
        assert_eq!(session.values("Geography"), vec![100, 200]);
        assert!(session.values("History").is_empty());
        assert_eq!(session.questions().count(), 3);
    }

    #[test]
    fn test_duplicate_slot_replaces_earlier_question() {
        let mut session = GameSession::new(&TriviaConfig::default());
        let size = session.load_questions(vec![
            Question::new("Math", 100, "old"),
            Question::new("Math", 100, "new"),
        ]);
        assert_eq!(size, 1);
        assert_eq!(session.question("Math", 100).unwrap().text, "new");
    }

    #[test]
    fn test_player_limit() {
        let config = TriviaConfig {
            max_players: Some(2),
            ..TriviaConfig::default()
        };
        let mut session = GameSession::new(&config);
        assert_eq!(session.add_player("Ada").unwrap().id, "P1");
        session.add_player("Grace").unwrap();
        assert!(matches!(session.add_player("Linus"), Err(Error::Session(_))));
        assert_eq!(session.players().len(), 2);
    }

    #[test]
    fn test_play_turn_scores_and_marks_asked() {
        let mut session = session();
        session.add_player("Ada").unwrap();

        let turn = session.play_turn(0, "Geography", 200, "B").unwrap();
        assert!(turn.correct);
        assert_eq!(turn.points_earned, 200);
        assert_eq!(turn.running_total, 200);
        assert_eq!(turn.choices[1].as_deref(), Some("Paris"));
        assert!(session.question("Geography", 200).unwrap().asked);
        assert_eq!(session.open_values("Geography"), vec![100]);

        let turn = session.play_turn(0, "Math", 100, "5").unwrap();
        assert!(!turn.correct);
        assert_eq!(turn.running_total, 100);
        assert_eq!(session.turns().len(), 2);
    }

    #[test]
    fn test_question_is_played_once() {
        let mut session = session();
        session.add_player("Ada").unwrap();
        session.play_turn(0, "Math", 100, "4").unwrap();

        let err = session.play_turn(0, "Math", 100, "4").unwrap_err();
        assert!(matches!(err, Error::Session(_)));
        assert_eq!(session.players()[0].score, 100);
    }

    #[test]
    fn test_invalid_turns() {
        let mut session = session();
        assert!(session.play_turn(0, "Math", 100, "4").is_err());
        session.add_player("Ada").unwrap();
        assert!(session.play_turn(0, "History", 100, "x").is_err());
        assert!(session.play_turn(0, "Math", 300, "x").is_err());
        assert_eq!(session.turns().len(), 0);
    }

    #[test]
    fn test_scores_saturate_at_the_extremes() {
        let mut session = GameSession::new(&TriviaConfig::default());
        session.load_questions(vec![
            Question::new("Math", i32::MIN, "Hard?").with_answer("42"),
            Question::new("Math", i32::MAX, "Harder?").with_answer("42"),
        ]);
        session.add_player("Ada").unwrap();
        session.add_player("Grace").unwrap();

        let turn = session.play_turn(0, "Math", i32::MIN, "43").unwrap();
        assert_eq!(turn.points_earned, i32::MAX);
        let turn = session.play_turn(0, "Math", i32::MAX, "42").unwrap();
        assert_eq!(turn.running_total, i32::MAX);
        assert_eq!(session.total_score(), i32::MAX);
    }

    struct Generous;

    impl ScoringStrategy for Generous {
        fn evaluate(&self, question: &Question, _given: Option<&str>) -> crate::scoring::Outcome {
            crate::scoring::Outcome {
                correct: true,
                delta: question.value,
            }
        }
    }

    #[test]
    fn test_custom_scoring_strategy() {
        let mut session = GameSession::new(&TriviaConfig::default()).with_scoring(Generous);
        session.load_questions(board());
        session.add_player("Ada").unwrap();

        let turn = session.play_turn(0, "Math", 100, "anything").unwrap();
        assert!(turn.correct);
        assert_eq!(session.players()[0].score, 100);
    }

    #[test]
    fn test_all_answered() {
        let mut session = session();
        session.add_player("Ada").unwrap();
        assert!(!session.all_answered());
        session.play_turn(0, "Geography", 100, "Nile").unwrap();
        session.play_turn(0, "Geography", 200, "Paris").unwrap();
        session.play_turn(0, "Math", 100, "4").unwrap();
        assert!(session.all_answered());
        assert_eq!(session.total_score(), 400);
    }

    #[test]
    fn test_events_are_reported() {
        let sink = Recorded::default();
        let mut session = GameSession::new(&TriviaConfig::default()).with_events(sink.clone());
        session.load_questions(board());
        session.add_player("Ada").unwrap();
        session.play_turn(0, "Math", 100, "four").unwrap();

        let events = sink.0.borrow();
        let activities: Vec<Activity> = events.iter().map(|e| e.activity).collect();
        assert_eq!(activities, vec![Activity::PlayerJoin, Activity::ScoreUpdated, Activity::Answer]);
        assert_eq!(events[2].result, "WRONG");
        assert_eq!(events[2].score_after, -100);
        assert!(events.iter().all(|e| e.case_id == session.case_id()));
    }

    #[test]
    fn test_load_file_uses_configured_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.csv");
        std::fs::write(&path, "Food;150;Main ingredient of guacamole?;Avocado\n").unwrap();

        let config = TriviaConfig {
            csv_delimiter: Some(';'),
            ..TriviaConfig::default()
        };
        let mut session = GameSession::new(&config);
        assert_eq!(session.load_file(&path).unwrap(), 1);
        assert_eq!(session.categories(), vec!["Food"]);
    }
}
