//! Number sense: whole numbers, integers, fractions, decimals, LCM/HCF, ratios,
//! roots, exponents and order of operations

use crate::answer::Answer;
use crate::catalog::Topic;
use crate::construct::{ExactDivision, FractionOp};
use crate::error::Result;
use crate::item::{Cell, Choice, QuestionItem, Row, Variant};
use crate::numeric::{format_fixed, gcd, lcm, random_int, random_sign, sample_distinct, Fraction, MAX_RESAMPLE_ATTEMPTS};
use crate::options::build_options;
use rand::Rng;
use tracing::warn;

fn operation_row(left: Cell, op: &str, right: Cell, answer: Answer) -> Row {
    let text = format!("${} {} {}$", cell_text(&left), op, cell_text(&right));
    Row::new(text, answer).with_operands(left, op, right)
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Fraction { n, d } => format!("\\frac{{{}}}{{{}}}", n, d),
    }
}

pub fn natural_whole_numbers<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let mut rows = Vec::with_capacity(4);

    let (a, b) = (random_int(rng, 10, 99), random_int(rng, 10, 99));
    rows.push(operation_row(Cell::text(a), "+", Cell::text(b), Answer::scalar(a + b)));

    let (a, b) = (random_int(rng, 100, 999), random_int(rng, 10, 99));
    rows.push(operation_row(Cell::text(a), "-", Cell::text(b), Answer::scalar(a - b)));

    let (a, b) = (random_int(rng, 10, 20), random_int(rng, 2, 9));
    rows.push(operation_row(Cell::text(a), "×", Cell::text(b), Answer::scalar(a * b)));

    let div = ExactDivision::from_quotient(random_int(rng, 10, 50), random_int(rng, 2, 15));
    rows.push(operation_row(
        Cell::text(div.dividend),
        "÷",
        Cell::text(div.divisor),
        Answer::scalar(div.quotient),
    ));

    Ok(QuestionItem::table(Topic::NaturalWholeNumbers.label(), "", rows))
}

pub fn integers<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let paren = |v: i64| Cell::Text(format!("({})", v));
    let mut rows = Vec::with_capacity(4);

    let (a, b) = (-random_int(rng, 2, 20), -random_int(rng, 2, 20));
    rows.push(operation_row(paren(a), "+", paren(b), Answer::scalar(a + b)));

    let (a, b) = (-random_int(rng, 2, 20), -random_int(rng, 2, 20));
    rows.push(operation_row(paren(a), "-", paren(b), Answer::scalar(a - b)));

    let (a, b) = (-random_int(rng, 2, 12), -random_int(rng, 2, 12));
    rows.push(operation_row(paren(a), "×", paren(b), Answer::scalar(a * b)));

    let div = ExactDivision::from_quotient(-random_int(rng, 2, 12), random_int(rng, 2, 10));
    rows.push(operation_row(
        paren(div.dividend),
        "÷",
        paren(div.divisor),
        Answer::scalar(div.quotient),
    ));

    Ok(QuestionItem::table(Topic::Integers.label(), "", rows))
}

fn proper_fraction<R: Rng + ?Sized>(rng: &mut R) -> Fraction {
    let d = random_int(rng, 2, 9);
    Fraction::new(random_int(rng, 1, d - 1), d)
}

/// Two proper fractions whose reduced denominators differ
fn unlike_pair<R: Rng + ?Sized>(rng: &mut R) -> (Fraction, Fraction) {
    let first = proper_fraction(rng);
    for _ in 0..MAX_RESAMPLE_ATTEMPTS {
        let second = proper_fraction(rng);
        if second.den() != first.den() {
            return (first, second);
        }
    }
    warn!(first = %first, "unlike denominator sampling exhausted");
    let den = if first.den() == 2 { 3 } else { 2 };
    (first, Fraction::new(1, den))
}

pub fn fractions<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let cell = |f: Fraction| Cell::Fraction { n: f.num(), d: f.den() };

    let rows = FractionOp::ALL
        .iter()
        .map(|op| {
            let (mut left, mut right) = unlike_pair(rng);
            if *op == FractionOp::Sub && left.less_than(&right) {
                std::mem::swap(&mut left, &mut right);
            }
            let result = op.apply(left, right);
            operation_row(cell(left), op.symbol(), cell(right), Answer::Fraction(result))
        })
        .collect();

    Ok(QuestionItem::table(Topic::Fractions.label(), "", rows).with_variant(Variant::Fraction))
}

/// Decimal rows computed in hundredths so the answers carry no float error
pub fn decimals<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let mut rows = Vec::with_capacity(4);

    let a = random_int(rng, 10, 99);
    let b_tenths = random_int(rng, 10, 99);
    rows.push(operation_row(
        Cell::Text(format_fixed(a, 2)),
        "+",
        Cell::Text(format_fixed(b_tenths, 1)),
        Answer::Scalar(format_fixed(a + b_tenths * 10, 2)),
    ));

    let (a, b) = (random_int(rng, 50, 99), random_int(rng, 10, 40));
    rows.push(operation_row(
        Cell::Text(format_fixed(a, 2)),
        "-",
        Cell::Text(format_fixed(b, 2)),
        Answer::Scalar(format_fixed(a - b, 2)),
    ));

    let (a, b) = (random_int(rng, 1, 9), random_int(rng, 1, 9));
    rows.push(operation_row(
        Cell::Text(format_fixed(a, 1)),
        "×",
        Cell::Text(format_fixed(b, 1)),
        Answer::Scalar(format_fixed(a * b, 2)),
    ));

    // Both operands in tenths, so the quotient is the plain integer quotient.
    let div = ExactDivision::from_quotient(random_int(rng, 2, 9), random_int(rng, 2, 9));
    rows.push(operation_row(
        Cell::Text(format_fixed(div.dividend, 1)),
        "÷",
        Cell::Text(format_fixed(div.divisor, 1)),
        Answer::scalar(div.quotient),
    ));

    Ok(QuestionItem::table(Topic::Decimals.label(), "", rows))
}

fn lcm_pair_row<R: Rng + ?Sized>(rng: &mut R) -> Row {
    let pair = sample_distinct(rng, 4..=15, 2);
    Row::new(
        format!("Find the LCM of ${}, {}$", pair[0], pair[1]),
        Answer::scalar(lcm(pair[0], pair[1])),
    )
}

fn hcf_pair_row<R: Rng + ?Sized>(rng: &mut R) -> Row {
    let mut chosen = None;
    for _ in 0..MAX_RESAMPLE_ATTEMPTS {
        let (a, b) = (random_int(rng, 12, 40), random_int(rng, 12, 40));
        if a != b && gcd(a, b) > 1 {
            chosen = Some((a, b));
            break;
        }
    }
    let (a, b) = chosen.unwrap_or_else(|| {
        warn!("hcf pair sampling exhausted, using fallback pair");
        (12, 18)
    });
    Row::new(format!("Find the HCF of ${}, {}$", a, b), Answer::scalar(gcd(a, b)))
}

pub fn lcm_rows<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let first = lcm_pair_row(rng);
    let triple = sample_distinct(rng, 3..=10, 3);
    let second = Row::new(
        format!("Find the LCM of ${}, {}, {}$", triple[0], triple[1], triple[2]),
        Answer::scalar(lcm(triple[0], lcm(triple[1], triple[2]))),
    );
    Ok(QuestionItem::table(Topic::Lcm.label(), "", vec![first, second]))
}

pub fn hcf_rows<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let first = hcf_pair_row(rng);
    let factor = random_int(rng, 2, 6);
    let values: Vec<i64> = sample_distinct(rng, 3..=9, 3).iter().map(|m| m * factor).collect();
    let second = Row::new(
        format!("Find the HCF of ${}, {}, {}$", values[0], values[1], values[2]),
        Answer::scalar(gcd(values[0], gcd(values[1], values[2]))),
    );
    Ok(QuestionItem::table(Topic::Hcf.label(), "", vec![first, second]))
}

pub fn lcm_and_hcf<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let rows = vec![lcm_pair_row(rng), hcf_pair_row(rng)];
    Ok(QuestionItem::table(Topic::LcmAndHcf.label(), "", rows))
}

pub fn ratio_proportion<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let a = random_int(rng, 2, 5);
    let b = random_int(rng, 2, 5);
    let x = random_int(rng, 5, 12);
    // Scale x by a whenever b*x/a would not be whole.
    let x = if (b * x) % a == 0 { x } else { x * a };
    let proportion = Row::new(
        format!("If ${}:{} :: {}:x$, find $x$", a, b, x),
        Answer::scalar(b * x / a),
    );

    let total = (random_int(rng, 20, 100) + 4) / 5 * 5;
    let share = Row::new(
        format!("Divide ${}$ in ratio $2:3$. Value of second part?", total),
        Answer::scalar(total / 5 * 3),
    );

    Ok(QuestionItem::table(Topic::RatioProportion.label(), "", vec![proportion, share]))
}

pub fn square_roots<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let n1 = random_int(rng, 11, 30);
    let square = Row::new(format!("Find the value of $({})^2$", n1), Answer::scalar(n1 * n1));

    let n2 = if rng.gen_bool(0.3) {
        n1
    } else {
        let n = random_int(rng, 2, 30);
        if n == n1 {
            random_int(rng, 2, 30)
        } else {
            n
        }
    };
    let root = Row::new(format!("Find the value of $\\sqrt{{{}}}$", n2 * n2), Answer::scalar(n2));

    Ok(QuestionItem::table(Topic::SquareRoots.label(), "", vec![square, root]))
}

pub fn cube_roots<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let n1 = random_sign(rng) * random_int(rng, 2, 5);
    let cube = Row::new(format!("Find the value of $({})^3$", n1), Answer::scalar(n1.pow(3)));

    let n2 = random_sign(rng) * random_int(rng, 2, 5);
    let root = Row::new(format!("Find the value of $\\sqrt[3]{{{}}}$", n2.pow(3)), Answer::scalar(n2));

    Ok(QuestionItem::table(Topic::CubeRoots.label(), "", vec![cube, root]))
}

/// `(-a)^(-n)` as an MCQ over exact signed unit fractions
pub fn exponents<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let base = -random_int(rng, 2, 5);
    let exp = random_int(rng, 2, 3);
    let power = base.pow(exp as u32);
    let question = format!("Find the value of $({})^{{{}}}$", base, -exp);

    let integer = |n: i64| Choice::new(n.to_string(), format!("${}$", n));
    let fraction = |f: Fraction| Choice::new(f.to_string(), format!("${}$", f.to_latex()));
    let correct = fraction(Fraction::new(1, power));
    let distractors = vec![integer(power), integer(-power), fraction(Fraction::new(-1, power))];

    let options = build_options(rng, &correct, distractors)?;
    Ok(QuestionItem::mcq(Topic::Exponents.label(), question, &correct, options))
}

pub fn bodmas<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let (a, b, c) = (random_int(rng, 2, 9), random_int(rng, 2, 9), random_int(rng, 2, 9));
    let simple = Row::new(
        format!("Evaluate: ${} + {} \\times {}$", a, b, c),
        Answer::scalar(a + b * c),
    );

    let a = random_int(rng, 2, 10);
    let b = random_int(rng, 2, 5);
    let c = random_int(rng, 6, 12);
    let d = random_int(rng, 2, 5);
    let bracketed = Row::new(
        format!("Evaluate: ${} + {} \\times ({} - {})$", a, b, c, d),
        Answer::scalar(a + b * (c - d)),
    );

    Ok(QuestionItem::table(Topic::Bodmas.label(), "", vec![simple, bracketed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::printed_integers;
    use crate::item::ItemKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scalar(answer: &Answer) -> i64 {
        match answer {
            Answer::Scalar(s) => s.parse().unwrap(),
            other => panic!("expected scalar, got {:?}", other),
        }
    }

    fn operand(cell: &Option<Cell>) -> i64 {
        match cell {
            Some(Cell::Text(s)) => s.trim_matches(|c| c == '(' || c == ')').parse().unwrap(),
            other => panic!("expected text operand, got {:?}", other),
        }
    }

    #[test]
    fn whole_number_rows_recompute() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            for item in [natural_whole_numbers(&mut rng).unwrap(), integers(&mut rng).unwrap()] {
                assert_eq!(item.rows.len(), 4);
                for row in &item.rows {
                    let (l, r) = (operand(&row.left), operand(&row.right));
                    let expected = match row.op.as_deref() {
                        Some("+") => l + r,
                        Some("-") => l - r,
                        Some("×") => l * r,
                        Some("÷") => {
                            assert_ne!(r, 0);
                            assert_eq!(l % r, 0);
                            l / r
                        }
                        other => panic!("unexpected op {:?}", other),
                    };
                    assert_eq!(scalar(&row.answer), expected);
                }
            }
        }
    }

    #[test]
    fn fraction_rows_are_reduced_and_non_negative() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let item = fractions(&mut rng).unwrap();
            assert_eq!(item.variant, Some(Variant::Fraction));
            for row in &item.rows {
                let (Some(Cell::Fraction { n: ln, d: ld }), Some(Cell::Fraction { n: rn, d: rd })) = (&row.left, &row.right) else {
                    panic!("fraction operands expected");
                };
                assert_ne!(ld, rd);
                let Answer::Fraction(result) = row.answer else {
                    panic!("fraction answer expected");
                };
                assert_eq!(gcd(result.num(), result.den()), 1);
                assert!(result.den() > 0 && result.num() >= 0);
                let left = Fraction::new(*ln, *ld);
                let right = Fraction::new(*rn, *rd);
                let op = FractionOp::ALL.iter().find(|op| Some(op.symbol()) == row.op.as_deref()).unwrap();
                assert_eq!(op.apply(left, right), result);
            }
        }
    }

    #[test]
    fn decimals_use_fixed_precision() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let item = decimals(&mut rng).unwrap();
            for row in &item.rows[..3] {
                let Answer::Scalar(s) = &row.answer else { panic!() };
                let (_, frac) = s.split_once('.').unwrap();
                assert_eq!(frac.len(), 2, "{} should have two places", s);
            }
            let Some(Cell::Text(dividend)) = &item.rows[3].left else { panic!() };
            let Some(Cell::Text(divisor)) = &item.rows[3].right else { panic!() };
            let tenths = |s: &str| s.replace('.', "").parse::<i64>().unwrap();
            assert_eq!(tenths(dividend) / tenths(divisor), scalar(&item.rows[3].answer));
            assert_eq!(tenths(dividend) % tenths(divisor), 0);
        }
    }

    #[test]
    fn lcm_and_hcf_of_six_and_eight() {
        assert_eq!(lcm(6, 8), 24);
        assert_eq!(gcd(6, 8), 2);
    }

    #[test]
    fn hcf_rows_have_nontrivial_common_factor() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let item = hcf_rows(&mut rng).unwrap();
            assert!(scalar(&item.rows[0].answer) > 1);
            assert!(scalar(&item.rows[1].answer) >= 2);
            let item = lcm_rows(&mut rng).unwrap();
            assert!(scalar(&item.rows[0].answer) >= 4);
        }
    }

    #[test]
    fn ratio_answers_are_whole() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let item = ratio_proportion(&mut rng).unwrap();
            assert_eq!(item.rows.len(), 2);
            assert!(item.rows[1].text.contains("ratio $2:3$"));
            assert!(scalar(&item.rows[0].answer) > 0);
        }
    }

    #[test]
    fn exponent_answer_is_the_power_of_the_printed_base() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            let item = exponents(&mut rng).unwrap();
            assert_eq!(item.kind, ItemKind::Mcq);
            assert!(item.invariant_violations().is_empty(), "{:?}", item.invariant_violations());

            let [base, exp] = printed_integers(&item.question)[..] else { panic!("{}", item.question) };
            assert!(base < 0 && exp < 0);
            let expected = Fraction::new(1, base.pow(exp.unsigned_abs() as u32));
            assert_eq!(item.answer, Answer::Scalar(expected.to_string()));

            let correct = item.options.iter().find(|o| o.value == expected.to_string()).unwrap();
            assert_eq!(correct.label, format!("${}$", expected.to_latex()));
            assert!(item.options.iter().all(|o| o.label.starts_with('$')));
        }
    }

    #[test]
    fn roots_invert_powers() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let item = square_roots(&mut rng).unwrap();
            let root = scalar(&item.rows[1].answer);
            assert!(item.rows[1].text.contains(&format!("{{{}}}", root * root)));

            let item = cube_roots(&mut rng).unwrap();
            let root = scalar(&item.rows[1].answer);
            assert!(item.rows[1].text.contains(&format!("{{{}}}", root.pow(3))));
        }
    }
}
