//! Question Book Core - procedural Grade 10 math item generator
//!
//! Generates randomized, always-solvable quiz items (scalar, multiple choice and
//! table input) per curriculum topic, plus the shape-aware grading that consumes them.
//! Randomness is injected, so a seeded RNG reproduces an item exactly.

pub mod answer;
pub mod catalog;
pub mod config;
pub mod construct;
pub mod diagram;
pub mod error;
pub mod generators;
pub mod grading;
pub mod item;
pub mod logging;
pub mod numeric;
pub mod options;
#[cfg(feature = "python")]
mod python;

pub use answer::Answer;
pub use catalog::{generate, generate_by_label, generate_question_book, Topic, TopicSet, CHAPTERS};
pub use config::QuestionBookConfig;
pub use error::{GenerateError, Result};
pub use grading::{score_response, ItemScore, RowResult};
pub use item::{Cell, Choice, InputType, ItemKind, QuestionItem, Row, Variant};
pub use numeric::Fraction;
pub use options::{build_options, MAX_JITTER_ATTEMPTS, OPTION_COUNT};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Question Book Python Module
#[cfg(feature = "python")]
#[pymodule]
fn questionbook_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    logging::init();

    // Generation
    m.add_function(wrap_pyfunction!(python::py_generate_question, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_list_topics, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_generate_question_book, m)?)?;

    // Grading
    m.add_function(wrap_pyfunction!(python::py_score_response, m)?)?;

    Ok(())
}
