//! # Trivia - multi-format question loading and answer resolution
//!
//! Trivia provides:
//! - A canonical question model shared by every input format
//! - Loaders for delimited text (CSV), key/value documents (JSON) and markup trees (XML)
//! - An answer resolver that scores letter and free-text answers alike
//! - A game session with players, turns, an event log and a summary report

pub mod question;
pub mod loader;
pub mod scoring;
pub mod session;
pub mod events;
pub mod report;
pub mod console;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use question::{ChoiceSlot, Question};
pub use loader::{Format, LoaderRegistry, QuestionLoader, default_registry, load_questions};
pub use scoring::{AnswerResolver, Outcome, ScoringStrategy};
pub use session::{GameSession, Player, TurnRecord};

/// Result type alias for Trivia operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Trivia operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Config error: {0}")]
    Config(String),
}
