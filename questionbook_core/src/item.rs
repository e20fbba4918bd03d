//! The self-describing question item handed to rendering and grading

use crate::answer::{self, Answer};
use crate::options::OPTION_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Input widget family the renderer must use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Scalar,
    Mcq,
    TableInput,
}

/// Structured sub-widget used for every row of a table item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Fraction,
    Coordinate,
    DoubleInput,
}

/// Closed-choice row input; rows without one take free numeric entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Select,
    Radio,
}

/// Operand cell of an equation-style row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Fraction { n: i64, d: i64 },
    Text(String),
}

impl Cell {
    pub fn text(value: impl ToString) -> Self {
        Cell::Text(value.to_string())
    }
}

/// One MCQ choice; `value` is compared, `label` is displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Value and label are the same text
    pub fn plain(value: impl ToString) -> Self {
        let value = value.to_string();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub text: String,
    pub answer: Answer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Cell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Cell>,
}

impl Row {
    pub fn new(text: impl Into<String>, answer: Answer) -> Self {
        Self {
            text: text.into(),
            answer,
            input_type: None,
            options: Vec::new(),
            image: None,
            unit: None,
            left: None,
            op: None,
            right: None,
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_image(mut self, image: String) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_choices(mut self, input_type: InputType, options: &[&str]) -> Self {
        self.input_type = Some(input_type);
        self.options = options.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Equation-style row `left op right = ?`
    pub fn with_operands(mut self, left: Cell, op: &str, right: Cell) -> Self {
        self.left = Some(left);
        self.op = Some(op.to_string());
        self.right = Some(right);
        self
    }
}

/// A generated question. Created fresh per request, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub question: String,
    #[serde(
        serialize_with = "answer::serialize_transport",
        deserialize_with = "answer::deserialize_transport"
    )]
    pub answer: Answer,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_keys: Vec<String>,
}

impl QuestionItem {
    pub fn scalar(topic: &str, question: impl Into<String>, answer: impl ToString) -> Self {
        Self {
            kind: ItemKind::Scalar,
            question: question.into(),
            answer: Answer::scalar(answer),
            options: Vec::new(),
            rows: Vec::new(),
            topic: topic.to_string(),
            variant: None,
            headers: Vec::new(),
            input_keys: Vec::new(),
        }
    }

    /// `options` must already contain `correct`
    pub fn mcq(topic: &str, question: impl Into<String>, correct: &Choice, options: Vec<Choice>) -> Self {
        Self {
            kind: ItemKind::Mcq,
            answer: Answer::Scalar(correct.value.clone()),
            options,
            ..Self::scalar(topic, question, "")
        }
    }

    /// Table item whose answer map is derived from the rows, so the two never disagree
    pub fn table(topic: &str, question: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            kind: ItemKind::TableInput,
            answer: Answer::Rows(rows.iter().map(|r| r.answer.clone()).collect()),
            rows,
            ..Self::scalar(topic, question, "")
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_columns(mut self, headers: &[&str], input_keys: &[&str]) -> Self {
        self.headers = headers.iter().map(|s| s.to_string()).collect();
        self.input_keys = input_keys.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Every structural rule an item must satisfy; empty when the item is well formed
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();

        match self.kind {
            ItemKind::Mcq => {
                if self.options.len() != OPTION_COUNT {
                    problems.push(format!("mcq has {} options", self.options.len()));
                }
                let unique: HashSet<&str> = self.options.iter().map(|o| o.value.as_str()).collect();
                if unique.len() != self.options.len() {
                    problems.push("mcq option values are not distinct".to_string());
                }
                let correct = self.answer.encode();
                let hits = self.options.iter().filter(|o| o.value == correct).count();
                if hits != 1 {
                    problems.push(format!("correct value present {} times", hits));
                }
            }
            ItemKind::TableInput => {
                if self.rows.is_empty() {
                    problems.push("table item has no rows".to_string());
                }
                match &self.answer {
                    Answer::Rows(answers) => {
                        if answers.len() != self.rows.len() {
                            problems.push(format!(
                                "answer map has {} keys for {} rows",
                                answers.len(),
                                self.rows.len()
                            ));
                        }
                        for (i, (row, expected)) in self.rows.iter().zip(answers).enumerate() {
                            if &row.answer != expected {
                                problems.push(format!("row {} answer differs from answer map", i));
                            }
                        }
                    }
                    _ => problems.push("table item answer is not a row map".to_string()),
                }
                for (i, row) in self.rows.iter().enumerate() {
                    if row.input_type.is_some() {
                        let Answer::Scalar(value) = &row.answer else {
                            problems.push(format!("row {} closed choice has structured answer", i));
                            continue;
                        };
                        if !row.options.contains(value) {
                            problems.push(format!("row {} answer '{}' is not among its options", i, value));
                        }
                    }
                }
            }
            ItemKind::Scalar => {
                if self.answer.encode().trim().is_empty() {
                    problems.push("scalar item has an empty answer".to_string());
                }
            }
        }

        collect_fraction_problems(&self.answer, &mut problems);
        problems
    }
}

fn collect_fraction_problems(answer: &Answer, problems: &mut Vec<String>) {
    match answer {
        Answer::Fraction(f) => {
            if f.den() <= 0 || crate::numeric::gcd(f.num(), f.den()) != 1 {
                problems.push(format!("fraction {} is not canonical", f));
            }
        }
        Answer::Rows(rows) => rows.iter().for_each(|r| collect_fraction_problems(r, problems)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Fraction;

    #[test]
    fn table_answer_mirrors_rows() {
        let item = QuestionItem::table(
            "Fractions",
            "",
            vec![
                Row::new("a", Answer::Fraction(Fraction::new(5, 12))),
                Row::new("b", Answer::Fraction(Fraction::new(1, 2))),
            ],
        )
        .with_variant(Variant::Fraction);

        assert!(item.invariant_violations().is_empty());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "tableInput");
        assert_eq!(json["variant"], "fraction");
        assert_eq!(json["answer"], r#"{"0":{"den":"12","num":"5"},"1":{"den":"2","num":"1"}}"#);
        assert_eq!(json["rows"][0]["answer"]["num"], "5");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn wire_round_trip() {
        let item = QuestionItem::table(
            "Locating a point in a Cartesian Plane",
            "Select the quadrant",
            vec![Row::new("$(-3, 5)$", Answer::scalar("Quadrant-2"))
                .with_choices(InputType::Select, &["Quadrant-1", "Quadrant-2"])],
        );
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""inputType":"select""#));
        let back: QuestionItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn detects_broken_mcq() {
        let correct = Choice::plain("12");
        let item = QuestionItem::mcq("t", "q", &correct, vec![correct.clone(), Choice::plain("12")]);
        let problems = item.invariant_violations();
        assert!(problems.iter().any(|p| p.contains("2 options")));
        assert!(problems.iter().any(|p| p.contains("not distinct")));
    }

    #[test]
    fn detects_answer_outside_closed_choices() {
        let item = QuestionItem::table(
            "Miscellaneous",
            "True or False",
            vec![Row::new("x", Answer::scalar("Maybe")).with_choices(InputType::Radio, &["True", "False"])],
        );
        assert_eq!(item.invariant_violations().len(), 1);
    }
}
