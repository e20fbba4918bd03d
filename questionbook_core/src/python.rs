//! Python bindings, built with the `python` feature

use crate::catalog::{self, Topic};
use crate::config::QuestionBookConfig;
use crate::error::GenerateError;
use crate::grading;
use crate::item::QuestionItem;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

impl From<GenerateError> for PyErr {
    fn from(err: GenerateError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ============= Python Binding =============

#[pyfunction]
#[pyo3(name = "generate_question", signature = (topic, seed=None))]
pub fn py_generate_question(topic: &str, seed: Option<u64>) -> PyResult<String> {
    let mut rng = seeded(seed);
    let item = catalog::generate_by_label(topic, &mut rng)?;
    Ok(serde_json::to_string(&item).map_err(GenerateError::from)?)
}

#[pyfunction]
#[pyo3(name = "list_topics")]
pub fn py_list_topics() -> Vec<&'static str> {
    Topic::ALL.iter().map(|t| t.label()).collect()
}

/// One JSON document per chapter slot
#[pyfunction]
#[pyo3(name = "generate_question_book", signature = (seed=None, questions_per_topic=None))]
pub fn py_generate_question_book(seed: Option<u64>, questions_per_topic: Option<usize>) -> PyResult<Vec<String>> {
    let defaults = QuestionBookConfig::from_env();
    let config = QuestionBookConfig {
        seed: seed.or(defaults.seed),
        questions_per_topic: questions_per_topic.unwrap_or(defaults.questions_per_topic),
        ..defaults
    };
    catalog::generate_question_book(&config)?
        .iter()
        .map(|set| serde_json::to_string(set).map_err(|e| GenerateError::from(e).into()))
        .collect()
}

#[pyfunction]
#[pyo3(name = "score_response")]
pub fn py_score_response(item_json: &str, response: &str) -> PyResult<f64> {
    let item: QuestionItem = serde_json::from_str(item_json).map_err(GenerateError::from)?;
    let threshold = QuestionBookConfig::from_env().near_miss_threshold;
    Ok(grading::score_response_with(&item, response, threshold)?.score)
}
