//! Integer helpers shared by every generator

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::ops::{Add, Div, Mul, RangeInclusive, Sub};
use tracing::warn;

/// Upper bound on resampling loops that wait for distinct operands
pub const MAX_RESAMPLE_ATTEMPTS: usize = 100;

/// Uniform integer in `min..=max`
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max)
}

/// In-place uniform permutation (Fisher-Yates)
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    items.shuffle(rng);
}

/// Pick one element uniformly. `items` must be non-empty.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Coin flip returning `1` or `-1`
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    if rng.gen_bool(0.5) {
        1
    } else {
        -1
    }
}

pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// Draw `count` distinct integers from `range`.
///
/// Resamples at most [`MAX_RESAMPLE_ATTEMPTS`] times, then fills the remaining
/// slots with the smallest unused values of the range.
pub fn sample_distinct<R: Rng + ?Sized>(rng: &mut R, range: RangeInclusive<i64>, count: usize) -> Vec<i64> {
    let span = (range.end() - range.start() + 1).max(0) as usize;
    debug_assert!(count <= span, "cannot draw {} distinct values from {:?}", count, range);

    let mut picked: Vec<i64> = Vec::with_capacity(count);
    let mut attempts = 0;
    while picked.len() < count && attempts < MAX_RESAMPLE_ATTEMPTS {
        let candidate = rng.gen_range(range.clone());
        if !picked.contains(&candidate) {
            picked.push(candidate);
        }
        attempts += 1;
    }

    if picked.len() < count {
        warn!(range = ?range, count, "distinct sampling exhausted, filling from range start");
        for value in range {
            if picked.len() >= count {
                break;
            }
            if !picked.contains(&value) {
                picked.push(value);
            }
        }
    }
    picked
}

/// A fraction kept in lowest terms with a positive denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Reduce `num/den`. The denominator must be non-zero.
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "fraction denominator must be non-zero");
        let common = gcd(num, den);
        let sign = if den < 0 { -1 } else { 1 };
        Self {
            num: sign * num / common,
            den: sign * den / common,
        }
    }

    /// Like [`Fraction::new`] but `None` for a zero denominator or a component
    /// whose magnitude does not fit in `i64` (`i64::MIN`)
    pub fn checked_new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        num.checked_abs()?;
        den.checked_abs()?;
        Some(Self::new(num, den))
    }

    pub fn num(&self) -> i64 {
        self.num
    }

    pub fn den(&self) -> i64 {
        self.den
    }

    /// Cross-multiplied comparison, exact for any denominators
    pub fn less_than(&self, other: &Self) -> bool {
        self.num * other.den < other.num * self.den
    }

    /// LaTeX form such as `\frac{3}{4}` or `-\frac{1}{8}`
    pub fn to_latex(&self) -> String {
        if self.den == 1 {
            return self.num.to_string();
        }
        let sign = if self.num < 0 { "-" } else { "" };
        format!("{}\\frac{{{}}}{{{}}}", sign, self.num.abs(), self.den)
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, other: Self) -> Self {
        Self::new(self.num * other.den + other.num * self.den, self.den * other.den)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, other: Self) -> Self {
        Self::new(self.num * other.den - other.num * self.den, self.den * other.den)
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, other: Self) -> Self {
        Self::new(self.num * other.num, self.den * other.den)
    }
}

/// `other` must be non-zero.
impl Div for Fraction {
    type Output = Fraction;

    fn div(self, other: Self) -> Self {
        Self::new(self.num * other.den, self.den * other.num)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Format an integer scaled by `10^places` as a fixed-point decimal string.
///
/// `format_fixed(125, 2)` is `"1.25"`, `format_fixed(-5, 1)` is `"-0.5"`.
pub fn format_fixed(scaled: i64, places: u32) -> String {
    if places == 0 {
        return scaled.to_string();
    }
    let factor = 10_i64.pow(places);
    let sign = if scaled < 0 { "-" } else { "" };
    let abs = scaled.abs();
    format!(
        "{}{}.{:0width$}",
        sign,
        abs / factor,
        abs % factor,
        width = places as usize
    )
}

/// Format a sum of `coefficient * variable` terms the way a textbook writes it.
///
/// Zero terms vanish, unit coefficients are implied, and an empty variable
/// marks a constant. `[(1, "x"), (-2, "y"), (3, "")]` becomes `"x - 2y + 3"`.
pub fn format_linear_expression(terms: &[(i64, &str)]) -> String {
    let mut expression = String::new();
    for &(coeff, variable) in terms {
        if coeff == 0 {
            continue;
        }
        if expression.is_empty() {
            if coeff < 0 {
                expression.push('-');
            }
        } else {
            expression.push_str(if coeff < 0 { " - " } else { " + " });
        }
        let abs = coeff.abs();
        if variable.is_empty() || abs != 1 {
            expression.push_str(&abs.to_string());
        }
        expression.push_str(variable);
    }

    if expression.is_empty() {
        "0".to_string()
    } else {
        expression
    }
}
