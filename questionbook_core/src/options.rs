//! MCQ option assembly: the correct choice plus unique distractors

use crate::error::{GenerateError, Result};
use crate::item::Choice;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::warn;

/// Choices shown for every MCQ item
pub const OPTION_COUNT: usize = 4;

/// Synthetic distractors tried before giving up
pub const MAX_JITTER_ATTEMPTS: usize = 20;

/// Build exactly [`OPTION_COUNT`] shuffled choices with pairwise distinct values.
///
/// Candidates are admitted in order while their value is unseen. If the pool runs
/// short, distractors are synthesized from the correct value: numeric values are
/// moved by `±k`, anything else gets a ` k` suffix, for `k = 1..=MAX_JITTER_ATTEMPTS`.
/// Uniqueness is decided on `value` alone.
pub fn build_options<R, I>(rng: &mut R, correct: &Choice, candidates: I) -> Result<Vec<Choice>>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = Choice>,
{
    let mut options = vec![correct.clone()];
    let mut seen: HashSet<String> = HashSet::from([correct.value.clone()]);

    for candidate in candidates {
        if options.len() >= OPTION_COUNT {
            break;
        }
        if seen.insert(candidate.value.clone()) {
            options.push(candidate);
        }
    }

    let mut attempt = 0;
    while options.len() < OPTION_COUNT && attempt < MAX_JITTER_ATTEMPTS {
        attempt += 1;
        let synthetic = jitter(rng, correct, attempt as i64);
        if seen.insert(synthetic.value.clone()) {
            options.push(synthetic);
        }
    }

    if options.len() < OPTION_COUNT {
        warn!(correct = %correct.value, found = options.len(), "distractor synthesis exhausted");
        return Err(GenerateError::DistractorStarvation {
            correct: correct.value.clone(),
            found: options.len(),
            required: OPTION_COUNT,
        });
    }

    options.shuffle(rng);
    options.truncate(OPTION_COUNT);
    Ok(options)
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, correct: &Choice, step: i64) -> Choice {
    let sign = if rng.gen_bool(0.5) { 1 } else { -1 };

    if let Ok(n) = correct.value.trim().parse::<i64>() {
        return Choice::plain(n + sign * step);
    }
    if let Ok(x) = correct.value.trim().parse::<f64>() {
        if x.is_finite() {
            return Choice::plain(x + (sign * step) as f64);
        }
    }

    Choice::new(
        format!("{} {}", correct.value, step),
        format!("{} {}", correct.label, step),
    )
}
