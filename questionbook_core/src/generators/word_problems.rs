//! Word problems and miscellany: clocks, identities, dice, ages, numbers

use crate::answer::Answer;
use crate::catalog::Topic;
use crate::error::Result;
use crate::item::{InputType, QuestionItem, Row, Variant};
use crate::numeric::{random_int, shuffle, Fraction};
use rand::Rng;

/// Statements that look plausible but are false
const IDENTITY_POOL: [(&str, &str); 4] = [
    ("$\\sqrt{a} + \\sqrt{b} = \\sqrt{a+b}$", "False"),
    ("$-3^2 = 9$", "False"),
    ("$\\frac{a}{a+b} = \\frac{a}{a} + \\frac{a}{b}$", "False"),
    ("$(a+b)^2 = a^2 + b^2$", "False"),
];

const TRUE_FALSE: [&str; 2] = ["True", "False"];

/// Angle between the hands at `hour:minute`, in half degrees
pub fn clock_angle_half_degrees(hour: i64, minute: i64) -> i64 {
    let raw = (60 * hour - 11 * minute).abs();
    raw.min(720 - raw)
}

fn format_half_degrees(half: i64) -> String {
    if half % 2 == 0 {
        (half / 2).to_string()
    } else {
        format!("{}.5", half / 2)
    }
}

pub fn clocks<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let hour = random_int(rng, 1, 12);
    let minute = 5 * random_int(rng, 0, 11);
    let angle = format_half_degrees(clock_angle_half_degrees(hour, minute));

    let question = format!(
        "What is the angle between the hour hand and minute hand on a clock when the time is ${}:{:02}$ ?",
        hour, minute
    );
    let rows = vec![Row::new("$Angle =$", Answer::Scalar(angle)).with_unit("degrees")];
    Ok(QuestionItem::table(Topic::Clocks.label(), question, rows))
}

/// Three distinct statements from the identity pool
pub fn true_false<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let mut pool = IDENTITY_POOL;
    shuffle(rng, &mut pool);

    let rows = pool[..3]
        .iter()
        .map(|(statement, verdict)| {
            Row::new(*statement, Answer::scalar(verdict)).with_choices(InputType::Radio, &TRUE_FALSE)
        })
        .collect();
    Ok(QuestionItem::table(Topic::TrueFalse.label(), "True or False", rows))
}

/// Probability that two dice sum to `target`, by counting all 36 outcomes
pub fn dice_sum_probability(target: i64) -> Fraction {
    let favourable = (1..=6)
        .flat_map(|a| (1..=6).map(move |b| a + b))
        .filter(|&sum| sum == target)
        .count() as i64;
    Fraction::new(favourable, 36)
}

pub fn dice_probability<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let target = random_int(rng, 2, 12);
    let question = format!(
        "Two dice are thrown at the same time. What is the probability that the sum of numbers on the dice is ${}$ ?",
        target
    );
    let rows = vec![Row::new("Probability =", Answer::Fraction(dice_sum_probability(target)))];
    Ok(QuestionItem::table(Topic::DiceProbability.label(), question, rows).with_variant(Variant::Fraction))
}

/// Father is `now` times the son's age and `later` times it after `years`.
/// Only the two patterns with `now - later = 1` are used, which keeps both ages whole.
pub fn age_problem<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let (now, later, years, son) = if rng.gen_bool(0.5) {
        let years = random_int(rng, 4, 8);
        (4, 3, years, 2 * years)
    } else {
        let years = random_int(rng, 5, 12);
        (3, 2, years, years)
    };
    let father = now * son;
    debug_assert_eq!(father + years, later * (son + years));

    let multiple = match later {
        2 => "twice".to_string(),
        3 => "three times".to_string(),
        n => format!("${}$ times", n),
    };
    let question = format!(
        "Robert's father is ${}$ times as old as Robert. After ${}$ years, father will be {} as old as Robert. \
         Find their present ages.",
        now, years, multiple
    );
    let rows = vec![
        Row::new("Robert's age =", Answer::scalar(son)),
        Row::new("Robert's father's age =", Answer::scalar(father)),
    ];
    Ok(QuestionItem::table(Topic::AgeProblem.label(), question, rows))
}

pub fn number_square_problem<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let n = random_int(rng, 3, 12);
    let question = format!(
        "The sum of a positive number and its square is ${}$. Find the number.",
        n + n * n
    );
    let rows = vec![Row::new("Number =", Answer::scalar(n))];
    Ok(QuestionItem::table(Topic::NumberSquareProblem.label(), question, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn clock_angle_at_three_and_half_past_one() {
        assert_eq!(format_half_degrees(clock_angle_half_degrees(3, 0)), "90");
        assert_eq!(format_half_degrees(clock_angle_half_degrees(1, 30)), "135");
        assert_eq!(format_half_degrees(clock_angle_half_degrees(12, 5)), "27.5");
        assert_eq!(format_half_degrees(clock_angle_half_degrees(6, 0)), "180");
    }

    #[test]
    fn clock_angle_never_exceeds_half_turn() {
        let mut rng = StdRng::seed_from_u64(51);
        for _ in 0..200 {
            let item = clocks(&mut rng).unwrap();
            let angle: f64 = item.rows[0].answer.encode().parse().unwrap();
            assert!((0.0..=180.0).contains(&angle));
        }
    }

    #[test]
    fn dice_sum_of_seven() {
        let p = dice_sum_probability(7);
        assert_eq!((p.num(), p.den()), (1, 6));
        assert_eq!(dice_sum_probability(2), Fraction::new(1, 36));
        let total = (2..=12).map(dice_sum_probability).fold(Fraction::new(0, 1), |acc, p| acc + p);
        assert_eq!(total, Fraction::new(1, 1));
    }

    #[test]
    fn true_false_rows_are_distinct_radio_choices() {
        let mut rng = StdRng::seed_from_u64(52);
        for _ in 0..100 {
            let item = true_false(&mut rng).unwrap();
            assert_eq!(item.rows.len(), 3);
            assert!(item.invariant_violations().is_empty());
            let texts: HashSet<&str> = item.rows.iter().map(|r| r.text.as_str()).collect();
            assert_eq!(texts.len(), 3);
        }
    }

    #[test]
    fn ages_satisfy_both_statements() {
        let mut rng = StdRng::seed_from_u64(53);
        for _ in 0..100 {
            let item = age_problem(&mut rng).unwrap();
            let son: i64 = item.rows[0].answer.encode().parse().unwrap();
            let father: i64 = item.rows[1].answer.encode().parse().unwrap();
            assert!(father == 4 * son || father == 3 * son);
        }
    }

    #[test]
    fn number_square_answer_is_the_positive_root() {
        let mut rng = StdRng::seed_from_u64(54);
        let item = number_square_problem(&mut rng).unwrap();
        let n: i64 = item.rows[0].answer.encode().parse().unwrap();
        assert!(item.question.contains(&format!("${}$", n + n * n)));
    }
}
