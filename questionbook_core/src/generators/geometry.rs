//! Mensuration and coordinate geometry.
//!
//! Exact-fit configurations come from curated pools (Pythagorean triples,
//! quadrant sign patterns) instead of random search.

use crate::answer::Answer;
use crate::catalog::Topic;
use crate::construct::{integer_right_triangles, section_pair, PYTHAGOREAN_TRIPLES};
use crate::diagram::{embed_image, render_diagram, Shape};
use crate::error::Result;
use crate::item::{InputType, QuestionItem, Row, Variant};
use crate::numeric::{format_fixed, pick, random_int, random_sign, sample_distinct, shuffle};
use rand::Rng;

/// Closed choice set for quadrant rows
pub const QUADRANTS: [&str; 4] = ["Quadrant-1", "Quadrant-2", "Quadrant-3", "Quadrant-4"];

/// Quadrant of `(x, y)`; `None` for points on an axis
pub fn quadrant(x: i64, y: i64) -> Option<&'static str> {
    match (x.signum(), y.signum()) {
        (1, 1) => Some(QUADRANTS[0]),
        (-1, 1) => Some(QUADRANTS[1]),
        (-1, -1) => Some(QUADRANTS[2]),
        (1, -1) => Some(QUADRANTS[3]),
        _ => None,
    }
}

/// Circle perimeter `2πr` with `π = 22/7`; `radius` must be a multiple of 7
fn circle_perimeter(radius: i64) -> i64 {
    44 * (radius / 7)
}

/// Circle area `πr²` with `π = 22/7`; `radius` must be a multiple of 7
fn circle_area(radius: i64) -> i64 {
    22 * (radius / 7) * radius
}

pub fn perimeter<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let (question, shape, answer) = match random_int(rng, 1, 3) {
        1 => {
            let radius = 7 * random_int(rng, 1, 5);
            (
                format!(
                    "Find the perimeter of circle with radius ${}$ cm. (Take $\\pi = \\frac{{22}}{{7}}$)",
                    radius
                ),
                Shape::Circle { radius },
                circle_perimeter(radius),
            )
        }
        2 => {
            let length = random_int(rng, 5, 15);
            let width = random_int(rng, 2, 10);
            (
                format!(
                    "Find the perimeter of a rectangle with length ${}$ cm and width ${}$ cm.",
                    length, width
                ),
                Shape::Rectangle { length, width },
                2 * (length + width),
            )
        }
        _ => {
            let side = random_int(rng, 4, 12);
            (
                format!("Find the perimeter of a square with side ${}$ cm.", side),
                Shape::Square { side },
                4 * side,
            )
        }
    };

    let question = question + &embed_image(&render_diagram(shape), "Shape");
    let rows = vec![Row::new("Perimeter =", Answer::scalar(answer)).with_unit("cm")];
    Ok(QuestionItem::table(Topic::Perimeter.label(), question, rows))
}

/// Five shapes, each row asking for both perimeter and area
pub fn perimeter_and_area<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let row = |name: &str, shape: Shape, perimeter: i64, area: i64| {
        Row::new(name, Answer::fields([("perimeter", perimeter), ("area", area)])).with_image(render_diagram(shape))
    };
    let mut rows = Vec::with_capacity(5);

    let length = random_int(rng, 4, 10);
    let width = random_int(rng, 2, length - 1);
    rows.push(row(
        "Rectangle",
        Shape::Rectangle { length, width },
        2 * (length + width),
        length * width,
    ));

    let side = random_int(rng, 3, 10);
    rows.push(row("Square", Shape::Square { side }, 4 * side, side * side));

    // One leg of every Pythagorean triple is even, so the area stays whole.
    let (base, height, hypotenuse) = *pick(rng, &PYTHAGOREAN_TRIPLES[..4]);
    rows.push(row(
        "Right Triangle",
        Shape::RightTriangle { base, height, hypotenuse },
        base + height + hypotenuse,
        base * height / 2,
    ));

    let base = random_int(rng, 5, 12);
    let side = random_int(rng, 4, 10);
    let height = random_int(rng, 2, side - 1);
    rows.push(row(
        "Parallelogram",
        Shape::Parallelogram { base, side, height },
        2 * (base + side),
        base * height,
    ));

    let radius = 7 * random_int(rng, 1, 4);
    rows.push(row(
        "Circle",
        Shape::Circle { radius },
        circle_perimeter(radius),
        circle_area(radius),
    ));

    Ok(QuestionItem::table(
        Topic::PerimeterAndArea.label(),
        "Find the perimeter and area of the following shapes:",
        rows,
    )
    .with_variant(Variant::DoubleInput)
    .with_columns(&["Shape", "Perimeter", "Area"], &["perimeter", "area"]))
}

/// Triangle height from its area, with the base given in metres
pub fn area<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let base_cm = if rng.gen_bool(0.5) { 10 } else { 20 };
    // Keeps the area at or below 50 sq.cm.
    let height = random_int(rng, 1, 100 / base_cm);
    let area = base_cm * height / 2;

    let question = format!(
        "If the area of $\\triangle ABC$ is ${}$ sq.cm and the base measure ${}$ m then find the height in cm.",
        area,
        format_fixed(base_cm / 10, 1)
    );
    let rows = vec![Row::new("Height =", Answer::scalar(height)).with_unit("cm")];
    Ok(QuestionItem::table(Topic::Area.label(), question, rows))
}

pub fn cartesian_point<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let mut signs = [(1, 1), (-1, 1), (-1, -1), (1, -1)];
    shuffle(rng, &mut signs);

    let rows = signs
        .iter()
        .map(|&(sx, sy)| {
            let x = sx * random_int(rng, 1, 15);
            let y = sy * random_int(rng, 1, 15);
            let label = quadrant(x, y).unwrap_or(QUADRANTS[0]);
            Row::new(format!("$({}, {})$", x, y), Answer::scalar(label)).with_choices(InputType::Select, &QUADRANTS)
        })
        .collect();

    Ok(QuestionItem::table(
        Topic::CartesianPoint.label(),
        "Select the quadrant in which the following points are present:",
        rows,
    ))
}

/// Distance between two points offset by a Pythagorean triple
pub fn coordinate_geometry<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let (dx, dy, distance) = *pick(rng, &PYTHAGOREAN_TRIPLES);
    let x1 = random_int(rng, -10, 10);
    let y1 = random_int(rng, -10, 10);
    let x2 = x1 + random_sign(rng) * dx;
    let y2 = y1 + random_sign(rng) * dy;

    let question = format!(
        "Distance between the points $P({}, {})$ and $Q({}, {})$",
        x1, y1, x2, y2
    );
    let rows = vec![Row::new("Distance =", Answer::scalar(distance)).with_unit("units")];
    Ok(QuestionItem::table(Topic::CoordinateGeometry.label(), question, rows))
}

/// Internal division in ratio `m:n`; coordinate gaps are multiples of `m + n`
pub fn section_formula<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let ratio = sample_distinct(rng, 1..=3, 2);
    let (m, n) = (ratio[0], ratio[1]);
    let sum = m + n;

    let (x1, x2) = section_pair(rng, sum);
    let (y1, y2) = section_pair(rng, sum);
    let px = (m * x2 + n * x1) / sum;
    let py = (m * y2 + n * y1) / sum;

    let question = format!(
        "Given $A = ({}, {})$ and $B = ({}, {})$ what are the coordinates of point $P = (x, y)$ \
         which internally divides line segment $\\overleftrightarrow{{AB}}$ in the ratio {}:{}?",
        x1, y1, x2, y2, m, n
    );
    let rows = vec![Row::new("P = ", Answer::Coordinate { x: px, y: py })];
    Ok(QuestionItem::table(Topic::SectionFormula.label(), question, rows).with_variant(Variant::Coordinate))
}

/// Flag pole and thread: find the ground distance
pub fn pythagoras<R: Rng + ?Sized>(rng: &mut R) -> Result<QuestionItem> {
    let candidates = integer_right_triangles(12, 10);
    let (base, height, thread) = if candidates.is_empty() {
        (3, 4, 5)
    } else {
        *pick(rng, &candidates)
    };

    let question = format!(
        "If a flag pole of height ${}$ meters is erected with the help of a thread of length ${}$ meters \
         then what is the distance between base of the thread to base of pole in meters ? {}",
        height,
        thread,
        embed_image(&render_diagram(Shape::FlagPole), "Triangle")
    );
    let rows = vec![Row::new("$d =$", Answer::scalar(base)).with_unit("m")];
    Ok(QuestionItem::table(Topic::Pythagoras.label(), question, rows))
}
