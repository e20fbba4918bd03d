//! Derive-then-forward builders
//!
//! Each builder takes the intended answer first and derives the problem
//! parameters that force it, so a generator never has to test feasibility.

use crate::numeric::{format_linear_expression, pick, random_int, random_sign, Fraction};
use rand::Rng;
use tracing::{debug, warn};

/// `ax + b = c` with integer solution `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearEquation {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub x: i64,
}

impl LinearEquation {
    /// `a` must be non-zero
    pub fn from_solution(x: i64, a: i64, b: i64) -> Self {
        debug_assert!(a != 0);
        debug!(x, a, b, "linear equation from solution");
        Self { a, b, c: a * x + b, x }
    }

    /// Solve the emitted equation forward
    pub fn solve(&self) -> Option<i64> {
        let rhs = self.c - self.b;
        (self.a != 0 && rhs % self.a == 0).then(|| rhs / self.a)
    }

    pub fn render(&self) -> String {
        format!("{} = {}", format_linear_expression(&[(self.a, "x"), (self.b, "")]), self.c)
    }
}

/// `a - (b - cx) = dx + e` with `c != d`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketEquation {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
    pub e: i64,
    pub x: i64,
}

impl BracketEquation {
    pub fn from_solution(x: i64, a: i64, b: i64, c: i64, d: i64) -> Self {
        debug_assert!(c != d, "equal x coefficients make the equation an identity");
        Self {
            a,
            b,
            c,
            d,
            e: (a - b) + x * (c - d),
            x,
        }
    }

    pub fn solve(&self) -> Option<i64> {
        // (c - d) x = e - (a - b)
        let coeff = self.c - self.d;
        let rhs = self.e - (self.a - self.b);
        (coeff != 0 && rhs % coeff == 0).then(|| rhs / coeff)
    }

    pub fn render(&self) -> String {
        let sign = if self.e >= 0 { '+' } else { '-' };
        format!(
            "{} - ({} - {}x) = {}x {} {}",
            self.a,
            self.b,
            self.c,
            self.d,
            sign,
            self.e.abs()
        )
    }
}

/// `x^2 - (r1 + r2)x + r1 r2 = 0` with `r1 <= r2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadraticEquation {
    pub r1: i64,
    pub r2: i64,
}

impl QuadraticEquation {
    pub fn from_roots(a: i64, b: i64) -> Self {
        debug!(a, b, "quadratic from roots");
        Self {
            r1: a.min(b),
            r2: a.max(b),
        }
    }

    pub fn sum(&self) -> i64 {
        self.r1 + self.r2
    }

    pub fn product(&self) -> i64 {
        self.r1 * self.r2
    }

    /// Left-hand side at `x`
    pub fn evaluate(&self, x: i64) -> i64 {
        x * x - self.sum() * x + self.product()
    }

    pub fn render(&self) -> String {
        format!(
            "{} = 0",
            format_linear_expression(&[(1, "x^2"), (-self.sum(), "x"), (self.product(), "")])
        )
    }
}

/// `a1 x + b1 y = c1`, `a2 x + b2 y = c2` with a unique integer solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimultaneousSystem {
    pub a1: i64,
    pub b1: i64,
    pub c1: i64,
    pub a2: i64,
    pub b2: i64,
    pub c2: i64,
    pub x: i64,
    pub y: i64,
}

/// Determinant draws before the curated fallback is used
pub const MAX_SYSTEM_ATTEMPTS: usize = 100;

impl SimultaneousSystem {
    pub fn from_solution(x: i64, y: i64, (a1, b1): (i64, i64), (a2, b2): (i64, i64)) -> Self {
        Self {
            a1,
            b1,
            c1: a1 * x + b1 * y,
            a2,
            b2,
            c2: a2 * x + b2 * y,
            x,
            y,
        }
    }

    pub fn determinant(&self) -> i64 {
        self.a1 * self.b2 - self.a2 * self.b1
    }

    /// Cramer's rule; `None` for singular systems or non-integer solutions
    pub fn solve(&self) -> Option<(i64, i64)> {
        let det = self.determinant();
        if det == 0 {
            return None;
        }
        let dx = self.c1 * self.b2 - self.c2 * self.b1;
        let dy = self.a1 * self.c2 - self.a2 * self.c1;
        (dx % det == 0 && dy % det == 0).then(|| (dx / det, dy / det))
    }

    /// Random solution in `1..=10` with coefficients `±(2..=9)` on y.
    ///
    /// Resamples until the determinant is non-zero and neither right-hand side is
    /// zero, bounded by [`MAX_SYSTEM_ATTEMPTS`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        for _ in 0..MAX_SYSTEM_ATTEMPTS {
            let x = random_int(rng, 1, 10);
            let y = random_int(rng, 1, 10);
            let first = (random_int(rng, 2, 9), random_sign(rng) * random_int(rng, 2, 9));
            let second = (random_int(rng, 2, 9), random_sign(rng) * random_int(rng, 2, 9));
            let system = Self::from_solution(x, y, first, second);
            if system.determinant() != 0 && system.c1 != 0 && system.c2 != 0 {
                return system;
            }
        }
        warn!("simultaneous system sampling exhausted, using fallback");
        Self::from_solution(3, 2, (5, -4), (7, 4))
    }

    pub fn render(&self) -> String {
        format!(
            "\\begin{{cases}} {} = {} \\\\ {} = {} \\end{{cases}}",
            format_linear_expression(&[(self.a1, "x"), (self.b1, "y")]),
            self.c1,
            format_linear_expression(&[(self.a2, "x"), (self.b2, "y")]),
            self.c2
        )
    }
}

/// The four fraction operations with their display symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl FractionOp {
    pub const ALL: [FractionOp; 4] = [FractionOp::Add, FractionOp::Sub, FractionOp::Mul, FractionOp::Div];

    pub fn symbol(&self) -> &'static str {
        match self {
            FractionOp::Add => "+",
            FractionOp::Sub => "-",
            FractionOp::Mul => "×",
            FractionOp::Div => "÷",
        }
    }

    /// Reduced result; for `Div` the right operand must be non-zero
    pub fn apply(&self, left: Fraction, right: Fraction) -> Fraction {
        match self {
            FractionOp::Add => left + right,
            FractionOp::Sub => left - right,
            FractionOp::Mul => left * right,
            FractionOp::Div => left / right,
        }
    }
}

/// `dividend ÷ divisor = quotient`, picked from the quotient side so it is always exact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactDivision {
    pub dividend: i64,
    pub divisor: i64,
    pub quotient: i64,
}

impl ExactDivision {
    /// `divisor` must be non-zero
    pub fn from_quotient(quotient: i64, divisor: i64) -> Self {
        debug_assert!(divisor != 0);
        Self {
            dividend: quotient * divisor,
            divisor,
            quotient,
        }
    }
}

/// Small Pythagorean triples `(leg, leg, hypotenuse)`
pub const PYTHAGOREAN_TRIPLES: [(i64, i64, i64); 6] = [
    (3, 4, 5),
    (5, 12, 13),
    (6, 8, 10),
    (8, 15, 17),
    (9, 12, 15),
    (12, 16, 20),
];

/// Every right triangle with integer sides, `base <= max_base`, `height <= max_height`
pub fn integer_right_triangles(max_base: i64, max_height: i64) -> Vec<(i64, i64, i64)> {
    let mut found = Vec::new();
    for base in 1..=max_base {
        for height in 1..=max_height {
            if let Some(hyp) = exact_sqrt(base * base + height * height) {
                found.push((base, height, hyp));
            }
        }
    }
    found
}

/// Integer square root when `n` is a perfect square
pub fn exact_sqrt(n: i64) -> Option<i64> {
    if n < 0 {
        return None;
    }
    let mut root = (n as f64).sqrt() as i64;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    (root * root == n).then_some(root)
}

/// Coordinates `c1 != c2` in `-5..=5` whose difference is a multiple of `step`,
/// so the section point along that axis is an integer.
pub fn section_pair<R: Rng + ?Sized>(rng: &mut R, step: i64) -> (i64, i64) {
    debug_assert!((1..=10).contains(&step));
    let c1 = random_int(rng, -5, 5);
    let candidates: Vec<i64> = (-5..=5)
        .filter(|&c2| c2 != c1 && (c2 - c1) % step == 0)
        .collect();
    if candidates.is_empty() {
        // Always in range for steps up to 5.
        let c2 = if c1 > 0 { c1 - step } else { c1 + step };
        return (c1, c2);
    }
    (c1, *pick(rng, &candidates))
}
