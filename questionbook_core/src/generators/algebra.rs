//! Algebraic expressions and equations, all built from the answer backwards

use crate::answer::Answer;
use crate::catalog::Topic;
use crate::construct::{BracketEquation, LinearEquation, QuadraticEquation, SimultaneousSystem};
use crate::error::Result;
use crate::item::{Choice, QuestionItem, Row};
use crate::numeric::{format_linear_expression, random_int};
use crate::options::build_options;
use rand::Rng;

/// Plain expression as the value, wrapped in `$..$` for display
fn latex_choice(expression: String) -> Choice {
    let label = format!("${}$", expression);
    Choice::new(expression, label)
}

/// `(a1x - b1y + c1z) + (a2x + b2y + c2z)` collected into one expression
pub fn algebraic_addition<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let first = [random_int(rng, 5, 15), -random_int(rng, 2, 9), random_int(rng, 2, 9)];
    let second = [-random_int(rng, 2, 9), random_int(rng, 5, 15), -random_int(rng, 5, 15)];
    let expr = |c: [i64; 3]| format_linear_expression(&[(c[0], "x"), (c[1], "y"), (c[2], "z")]);

    let question = format!("$({}) + ({})$", expr(first), expr(second));
    let [x, y, z] = [first[0] + second[0], first[1] + second[1], first[2] + second[2]];

    let correct = latex_choice(expr([x, y, z]));
    let distractors = vec![
        latex_choice(expr([x, y - 2, z])),
        latex_choice(expr([x + 1, y, z])),
        latex_choice(expr([x, y, z + 2])),
        latex_choice(expr([x + 2, y + 2, z + 2])),
    ];

    let options = build_options(rng, &correct, distractors)?;
    Ok(QuestionItem::mcq(Topic::AlgebraicAddition.label(), question, &correct, options))
}

/// `(ax + by)(cx - dy) = ac x^2 + (bc - ad) xy - bd y^2`
pub fn algebraic_multiplication<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let a = random_int(rng, 2, 5);
    let b = random_int(rng, 2, 5);
    let c = random_int(rng, 2, 5);
    let d = random_int(rng, 2, 5);

    let question = format!("$({}x + {}y)({}x - {}y)$", a, b, c, d);
    let product = |square: i64, cross: i64, last: i64| {
        format_linear_expression(&[(square, "x^2"), (cross, "xy"), (last, "y^2")])
    };

    let (square, cross, last) = (a * c, b * c - a * d, -b * d);
    let correct = latex_choice(product(square, cross, last));
    let distractors = vec![
        latex_choice(product(square, cross - 2, last)),
        latex_choice(product(square, cross, -last)),
        latex_choice(product(square + 1, cross, last)),
        latex_choice(product(square, cross.abs() + 5, last)),
    ];

    let options = build_options(rng, &correct, distractors)?;
    Ok(QuestionItem::mcq(Topic::AlgebraicMultiplication.label(), question, &correct, options))
}

pub fn algebraic_division<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let k = random_int(rng, 2, 5);
    let a = random_int(rng, 2, 5);
    let b = random_int(rng, 5, 20);
    let binomial = Row::new(
        format!("$({}x - {}) \\div ({}x - {})$", k * a, k * b, a, b),
        Answer::scalar(k),
    );

    let k = random_int(rng, 3, 9);
    let c = random_int(rng, 3, 9);
    let monomial = Row::new(
        format!("${}p^4m^2n \\div {}p^4m^2n$", k * c, c),
        Answer::scalar(k),
    );

    Ok(QuestionItem::table(Topic::AlgebraicDivision.label(), "", vec![binomial, monomial]))
}

pub fn linear_equation<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let x = random_int(rng, 2, 9);
    let a = random_int(rng, 2, 6);
    let b = random_int(rng, 10, 50);
    let simple = LinearEquation::from_solution(x, a, b);

    let x = random_int(rng, 2, 8);
    let a = random_int(rng, 2, 9);
    let b = random_int(rng, 2, 9);
    let d = random_int(rng, 2, 5);
    // Inner coefficient strictly above the right-hand one keeps the solution unique.
    let c = random_int(rng, (d + 1).max(4), 9);
    let bracketed = BracketEquation::from_solution(x, a, b, c, d);

    let rows = vec![
        Row::new(format!("Solve: ${}$", simple.render()), Answer::scalar(simple.x)),
        Row::new(format!("Solve: ${}$", bracketed.render()), Answer::scalar(bracketed.x)),
    ];
    Ok(QuestionItem::table(
        Topic::LinearEquation.label(),
        "Find the value of x for the following equations:",
        rows,
    ))
}

pub fn simultaneous_equations<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let system = SimultaneousSystem::random(rng);
    let question = format!(
        "Solve Simultaneous Linear Equations in Two Variables: <br/> $$ {} $$",
        system.render()
    );
    let rows = vec![
        Row::new("x =", Answer::scalar(system.x)),
        Row::new("y =", Answer::scalar(system.y)),
    ];
    Ok(QuestionItem::table(Topic::SimultaneousEquations.label(), question, rows))
}

pub fn quadratic_equation<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let r1 = random_int(rng, 2, 9);
    let r2 = random_int(rng, r1 + 1, 12);
    let equation = QuadraticEquation::from_roots(r1, r2);

    let question = format!("Solve the following Quadratic Equation: <br/> $$ {} $$", equation.render());
    let rows = vec![
        Row::new("Smaller Root $(x_1) =$", Answer::scalar(equation.r1)),
        Row::new("Larger Root $(x_2) =$", Answer::scalar(equation.r2)),
    ];
    Ok(QuestionItem::table(Topic::QuadraticEquation.label(), question, rows))
}
