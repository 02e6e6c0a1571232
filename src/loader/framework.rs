//! Core loader framework
//!
//! Defines the trait every format loader implements and the registry that
//! maps a file to its loader.

use crate::question::Question;
use crate::{Error, Result};
use std::path::Path;

/// Supported question file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Json,
    Xml,
}

impl Format {
    /// File suffix bound to this format, including the dot
    pub fn suffix(&self) -> &'static str {
        match self {
            Format::Csv => ".csv",
            Format::Json => ".json",
            Format::Xml => ".xml",
        }
    }

    /// Get all formats
    pub fn all() -> &'static [Format] {
        &[Format::Csv, Format::Json, Format::Xml]
    }

    /// Detect the format from a file name suffix, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|format| name.ends_with(format.suffix()))
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Csv => "CSV",
            Format::Json => "JSON",
            Format::Xml => "XML",
        };
        write!(f, "{}", name)
    }
}

/// Trait for question loaders
///
/// Loaders are pure: content in, questions out. Content-level problems are
/// recovered inside the loader; only a document that cannot be read as its
/// format at all is an error.
pub trait QuestionLoader: Send + Sync {
    /// The format this loader reads
    fn format(&self) -> Format;

    /// Check if this loader can handle a file
    fn can_handle(&self, path: &Path) -> bool {
        Format::from_path(path) == Some(self.format())
    }

    /// Parse file content into questions, in source order
    fn parse(&self, content: &str) -> Result<Vec<Question>>;
}

/// Registry of question loaders
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn QuestionLoader>>,
}

impl LoaderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader
    pub fn register(&mut self, loader: impl QuestionLoader + 'static) {
        self.loaders.push(Box::new(loader));
    }

    /// Find a loader for a file
    pub fn find_loader(&self, path: &Path) -> Option<&dyn QuestionLoader> {
        self.loaders
            .iter()
            .find(|l| l.can_handle(path))
            .map(|l| l.as_ref())
    }

    /// Get all registered loaders
    pub fn loaders(&self) -> &[Box<dyn QuestionLoader>] {
        &self.loaders
    }

    /// Load a file with the loader bound to its suffix.
    ///
    /// Unsupported suffixes are rejected before the file is opened.
    pub fn load_file(&self, path: &Path) -> Result<Vec<Question>> {
        let loader = self
            .find_loader(path)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;

        let content = std::fs::read_to_string(path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let questions = loader.parse(content)?;

        tracing::info!(
            "Loaded {} questions from {} ({})",
            questions.len(),
            path.display(),
            loader.format()
        );
        Ok(questions)
    }
}

/// Create a default registry with all built-in loaders
pub fn default_registry() -> LoaderRegistry {
    registry_with_delimiter(super::csv::DEFAULT_DELIMITER)
}

/// Create a registry whose CSV loader splits on `delimiter`
pub fn registry_with_delimiter(delimiter: char) -> LoaderRegistry {
    let mut registry = LoaderRegistry::new();
    registry.register(super::csv::CsvLoader::with_delimiter(delimiter));
    registry.register(super::json::JsonLoader::new());
    registry.register(super::xml::XmlLoader::new());
    registry
}

/// Load questions from a file using the default registry
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<Question>> {
    default_registry().load_file(path.as_ref())
}
