//! Question Loader Framework
//!
//! Each supported file format provides a `QuestionLoader` that turns raw file
//! content into canonical `Question`s. The registry picks a loader from the
//! file name suffix; the rest of the game never sees format-specific logic.

pub mod framework;
pub mod fields;
pub mod csv;
pub mod json;
pub mod tree;
pub mod xml;

pub use framework::{Format, QuestionLoader, LoaderRegistry, default_registry, load_questions, registry_with_delimiter};
pub use csv::CsvLoader;
pub use json::JsonLoader;
pub use tree::{Shape, TreeExtraction};
pub use xml::XmlLoader;
