//! Shape-aware scoring of a captured response against an item's answer

use crate::answer::{value_as_i64, value_as_text, Answer};
use crate::config::QuestionBookConfig;
use crate::error::{GenerateError, Result};
use crate::item::{ItemKind, QuestionItem};
use crate::numeric::Fraction;
use serde::Serialize;
use serde_json::Value;
use strsim::{jaro_winkler, levenshtein, normalized_levenshtein};

/// Tolerance for numeric row answers such as `"0.50"` against `"0.5"`
const NUMERIC_TOLERANCE: f64 = 1e-4;

/// Credit for one table row (or the single answer of a scalar / mcq item)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowResult {
    pub index: usize,
    /// Earned credit in `[0, 1]`
    pub credit: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemScore {
    /// Mean row credit in `[0, 1]`
    pub score: f64,
    pub rows: Vec<RowResult>,
}

impl ItemScore {
    pub fn is_correct(&self) -> bool {
        self.score >= 1.0
    }
}

/// Score `response` with the default near-miss threshold
pub fn score_response(item: &QuestionItem, response: &str) -> Result<ItemScore> {
    score_response_with(item, response, QuestionBookConfig::default().near_miss_threshold)
}

/// Score `response` against `item`.
///
/// Scalar and mcq responses are the raw answer text. Table responses are a JSON
/// object keyed `"0".."n-1"`, one entry per row.
pub fn score_response_with(item: &QuestionItem, response: &str, near_miss_threshold: f64) -> Result<ItemScore> {
    let rows = match item.kind {
        ItemKind::Scalar | ItemKind::Mcq => {
            let given = Value::String(response.to_string());
            vec![score_row(0, &item.answer, Some(&given), near_miss_threshold)]
        }
        ItemKind::TableInput => {
            let Answer::Rows(expected) = &item.answer else {
                return Err(GenerateError::MalformedResponse {
                    reason: "table item without a row answer map".to_string(),
                });
            };
            let parsed: Value = serde_json::from_str(response)?;
            let Value::Object(map) = parsed else {
                return Err(GenerateError::MalformedResponse {
                    reason: "table response must be a JSON object keyed by row index".to_string(),
                });
            };
            expected
                .iter()
                .enumerate()
                .map(|(i, answer)| score_row(i, answer, map.get(&i.to_string()), near_miss_threshold))
                .collect()
        }
    };

    let score = if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|r| r.credit).sum::<f64>() / rows.len() as f64
    };
    Ok(ItemScore { score, rows })
}

fn score_row(index: usize, expected: &Answer, given: Option<&Value>, threshold: f64) -> RowResult {
    let result = |credit: f64, feedback: String| RowResult { index, credit, feedback };

    let Some(given) = given.filter(|v| !is_blank(v)) else {
        return result(0.0, "No answer".to_string());
    };

    match expected {
        Answer::Scalar(text) => match value_as_text(given) {
            Some(response) => {
                let (credit, feedback) = compare_text(&response, text, threshold);
                result(credit, feedback)
            }
            None => result(0.0, format!("Incorrect. Expected: '{}'", text)),
        },
        Answer::Fraction(fraction) => match parse_fraction(given) {
            Some(response) if response == *fraction => result(1.0, "Perfect! ✓".to_string()),
            _ => result(0.0, format!("Incorrect. Expected: '{}'", fraction)),
        },
        Answer::Coordinate { .. } | Answer::Fields(_) => {
            let Value::Object(wanted) = expected.to_value() else {
                return result(0.0, "Unsupported answer shape".to_string());
            };
            let Value::Object(got) = given else {
                return result(0.0, format!("Incorrect. Expected: {}", expected.encode()));
            };
            let matched = wanted
                .iter()
                .filter(|(key, value)| {
                    let want = value_as_text(value).unwrap_or_default();
                    got.get(key.as_str())
                        .and_then(value_as_text)
                        .is_some_and(|have| have.trim() == want.trim())
                })
                .count();
            let credit = matched as f64 / wanted.len() as f64;
            let feedback = if matched == wanted.len() {
                "Perfect! ✓".to_string()
            } else {
                format!("{} of {} parts correct. Expected: {}", matched, wanted.len(), expected.encode())
            };
            result(credit, feedback)
        }
        Answer::Rows(_) => result(0.0, "Nested row answers are not gradable".to_string()),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.values().all(is_blank),
        _ => false,
    }
}

/// `{num, den}` object or `"n/d"` text; a zero denominator or an `i64::MIN` part is never a valid fraction
fn parse_fraction(value: &Value) -> Option<Fraction> {
    let (num, den) = match value {
        Value::Object(map) => (value_as_i64(map.get("num")?)?, value_as_i64(map.get("den")?)?),
        Value::String(s) => {
            let (n, d) = s.split_once('/')?;
            (n.trim().parse().ok()?, d.trim().parse().ok()?)
        }
        _ => return None,
    };
    Fraction::checked_new(num, den)
}

fn compare_text(response: &str, expected: &str, threshold: f64) -> (f64, String) {
    let (response, expected) = (response.trim(), expected.trim());
    if response == expected {
        return (1.0, "Perfect! ✓".to_string());
    }

    if let (Ok(a), Ok(b)) = (response.parse::<f64>(), expected.parse::<f64>()) {
        if (a - b).abs() < NUMERIC_TOLERANCE {
            return (1.0, "Perfect! ✓".to_string());
        }
        return (0.0, format!("Incorrect. Expected: '{}'", expected));
    }

    let similarity = similarity(response, expected);
    if similarity >= threshold {
        let distance = levenshtein(&response.to_lowercase(), &expected.to_lowercase());
        (0.0, format!("Almost! {} characters off. Expected: '{}'", distance, expected))
    } else {
        (0.0, format!("Incorrect. Expected: '{}'", expected))
    }
}

/// Normalized Levenshtein blended with Jaro-Winkler, case-insensitive
pub fn similarity(a: &str, b: &str) -> f64 {
    let (a, b) = (a.trim().to_lowercase(), b.trim().to_lowercase());
    normalized_levenshtein(&a, &b) * 0.4 + jaro_winkler(&a, &b) * 0.6
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Choice, InputType, Row, Variant};

    fn fraction_item() -> QuestionItem {
        QuestionItem::table(
            "Probability",
            "Two dice",
            vec![Row::new("Probability =", Answer::Fraction(Fraction::new(1, 6)))],
        )
        .with_variant(Variant::Fraction)
    }

    #[test]
    fn scalar_answers_match_exactly_after_trim() {
        let item = QuestionItem::scalar("Clocks", "angle?", "135");
        assert_eq!(score_response(&item, " 135 ").unwrap().score, 1.0);
        assert_eq!(score_response(&item, "").unwrap().score, 0.0);
        assert_eq!(score_response(&item, "134").unwrap().score, 0.0);
    }

    #[test]
    fn mcq_response_is_the_option_value() {
        let correct = Choice::new("1/4", "$\\frac{1}{4}$");
        let options = vec![
            correct.clone(),
            Choice::new("4", "$4$"),
            Choice::new("-4", "$-4$"),
            Choice::new("-1/4", "$-\\frac{1}{4}$"),
        ];
        let item = QuestionItem::mcq("Laws of Exponents", "q", &correct, options);
        assert!(score_response(&item, "1/4").unwrap().is_correct());
        assert_eq!(score_response(&item, "4").unwrap().score, 0.0);
        assert_eq!(score_response(&item, "-1/4").unwrap().score, 0.0);
    }

    #[test]
    fn fractions_compare_after_reduction() {
        let item = fraction_item();
        assert!(score_response(&item, r#"{"0":{"num":"6","den":"36"}}"#).unwrap().is_correct());
        assert!(score_response(&item, r#"{"0":{"num":"1","den":"6"}}"#).unwrap().is_correct());
        assert_eq!(score_response(&item, r#"{"0":{"num":"1","den":"0"}}"#).unwrap().score, 0.0);
        assert_eq!(score_response(&item, r#"{"0":{"num":"1","den":"5"}}"#).unwrap().score, 0.0);
    }

    #[test]
    fn out_of_range_fraction_parts_score_zero() {
        let item = fraction_item();
        for response in [
            r#"{"0":{"num":"-9223372036854775808","den":"1"}}"#,
            r#"{"0":{"num":"1","den":"-9223372036854775808"}}"#,
            r#"{"0":{"num":-9223372036854775808,"den":6}}"#,
            r#"{"0":"-9223372036854775808/6"}"#,
        ] {
            let score = score_response(&item, response).unwrap();
            assert_eq!(score.score, 0.0, "{}", response);
        }
    }

    #[test]
    fn field_rows_earn_partial_credit() {
        let item = QuestionItem::table(
            "Perimeter and Area",
            "",
            vec![
                Row::new("Square", Answer::fields([("perimeter", 20), ("area", 25)])),
                Row::new("P = ", Answer::Coordinate { x: -1, y: 3 }),
            ],
        );
        let score = score_response(
            &item,
            r#"{"0":{"perimeter":"20","area":"24"},"1":{"x":"-1","y":"3"}}"#,
        )
        .unwrap();
        assert_eq!(score.rows[0].credit, 0.5);
        assert_eq!(score.rows[1].credit, 1.0);
        assert_eq!(score.score, 0.75);
    }

    #[test]
    fn numeric_rows_tolerate_trailing_zeros() {
        let item = QuestionItem::table("Decimals", "", vec![Row::new("a", Answer::scalar("0.5"))]);
        assert!(score_response(&item, r#"{"0":"0.50"}"#).unwrap().is_correct());
        assert!(score_response(&item, r#"{"0":0.5}"#).unwrap().is_correct());
    }

    #[test]
    fn near_miss_gets_a_hint_but_no_credit() {
        let item = QuestionItem::table(
            "Locating a point in a Cartesian Plane",
            "",
            vec![Row::new("$(-3, 5)$", Answer::scalar("Quadrant-2"))
                .with_choices(InputType::Select, &["Quadrant-1", "Quadrant-2"])],
        );
        let score = score_response(&item, r#"{"0":"quadrant 2"}"#).unwrap();
        assert_eq!(score.score, 0.0);
        assert!(score.rows[0].feedback.starts_with("Almost!"), "{}", score.rows[0].feedback);
    }

    #[test]
    fn malformed_table_response_is_an_error() {
        let item = fraction_item();
        assert!(matches!(
            score_response(&item, "[1, 2]"),
            Err(GenerateError::MalformedResponse { .. })
        ));
        assert!(matches!(score_response(&item, "not json"), Err(GenerateError::Json(_))));
    }

    #[test]
    fn missing_rows_score_zero() {
        let item = QuestionItem::table(
            "Quadratic Equations",
            "",
            vec![Row::new("x1", Answer::scalar("4")), Row::new("x2", Answer::scalar("7"))],
        );
        let score = score_response(&item, r#"{"0":"4"}"#).unwrap();
        assert_eq!(score.score, 0.5);
        assert_eq!(score.rows[1].feedback, "No answer");
    }
}
