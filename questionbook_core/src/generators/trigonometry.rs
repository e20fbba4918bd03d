//! Trigonometric ratios from exact lookup tables

use crate::answer::Answer;
use crate::catalog::Topic;
use crate::error::Result;
use crate::item::{QuestionItem, Row, Variant};
use crate::numeric::{pick, shuffle, Fraction};
use rand::Rng;

/// Primitive triples `(opposite, adjacent, hypotenuse)`
const RATIO_TRIPLES: [(i64, i64, i64); 3] = [(3, 4, 5), (5, 12, 13), (8, 15, 17)];

/// Standard angles at which each function takes an integer value
const STANDARD_VALUES: [(&str, [(&str, &str); 2]); 6] = [
    ("\\sin", [("0^\\circ", "0"), ("90^\\circ", "1")]),
    ("\\cos", [("0^\\circ", "1"), ("90^\\circ", "0")]),
    ("\\tan", [("0^\\circ", "0"), ("45^\\circ", "1")]),
    ("\\cot", [("45^\\circ", "1"), ("90^\\circ", "0")]),
    ("\\sec", [("0^\\circ", "1"), ("60^\\circ", "2")]),
    ("\\text{cosec}", [("30^\\circ", "2"), ("90^\\circ", "1")]),
];

/// Given `sin A`, find cos, tan, sec and cot as reduced fractions
pub fn trigonometry<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let (mut opp, mut adj, hyp) = *pick(rng, &RATIO_TRIPLES);
    if rng.gen_bool(0.5) {
        std::mem::swap(&mut opp, &mut adj);
    }

    let ratios = [
        ("\\cos A", Fraction::new(adj, hyp)),
        ("\\tan A", Fraction::new(opp, adj)),
        ("\\sec A", Fraction::new(hyp, adj)),
        ("\\cot A", Fraction::new(adj, opp)),
    ];
    let rows = ratios
        .iter()
        .map(|(label, value)| Row::new(format!("${} =$", label), Answer::Fraction(*value)))
        .collect();

    let question = format!(
        "If $\\sin A = \\frac{{{}}}{{{}}}$ then match the following trigonometric ratios:",
        opp, hyp
    );
    Ok(QuestionItem::table(Topic::Trigonometry.label(), question, rows).with_variant(Variant::Fraction))
}

pub fn trig_ratios<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let mut functions = STANDARD_VALUES;
    shuffle(rng, &mut functions);

    let rows = functions
        .iter()
        .map(|(function, choices)| {
            let (angle, value) = *pick(rng, choices);
            Row::new(format!("${}({}) =$", function, angle), Answer::scalar(value))
        })
        .collect();

    Ok(QuestionItem::table(
        Topic::TrigRatios.label(),
        "Find the values of the following:",
        rows,
    ))
}
