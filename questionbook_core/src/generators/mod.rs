//! One generator per curriculum topic, grouped by family.
//!
//! Every generator has the shape `fn<R: Rng + ?Sized>(&mut R) -> Result<QuestionItem>`
//! and touches no state besides the injected RNG.

pub mod algebra;
pub mod arithmetic;
pub mod geometry;
pub mod trigonometry;
pub mod word_problems;

/// Signed integers in the order they appear in rendered text. A `-` counts as a
/// sign only when a digit follows it directly.
#[cfg(test)]
pub(crate) fn printed_integers(text: &str) -> Vec<i64> {
    let mut found = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let starts_negative = c == '-' && current.is_empty() && chars.peek().is_some_and(|n| n.is_ascii_digit());
        if c.is_ascii_digit() || starts_negative {
            current.push(c);
        } else if !current.is_empty() {
            found.push(current.parse().unwrap());
            current.clear();
        }
    }
    if !current.is_empty() {
        found.push(current.parse().unwrap());
    }
    found
}
