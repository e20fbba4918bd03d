//! Topic catalog: labels, dispatch and the chapter-ordered question book

use crate::config::QuestionBookConfig;
use crate::error::{GenerateError, Result};
use crate::generators::{algebra, arithmetic, geometry, trigonometry, word_problems};
use crate::item::QuestionItem;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// Every topic the generator library can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    NaturalWholeNumbers,
    Integers,
    Fractions,
    Decimals,
    Lcm,
    Hcf,
    LcmAndHcf,
    RatioProportion,
    SquareRoots,
    CubeRoots,
    Exponents,
    Bodmas,
    AlgebraicAddition,
    AlgebraicMultiplication,
    AlgebraicDivision,
    LinearEquation,
    SimultaneousEquations,
    QuadraticEquation,
    Perimeter,
    PerimeterAndArea,
    Area,
    CartesianPoint,
    CoordinateGeometry,
    SectionFormula,
    Trigonometry,
    TrigRatios,
    Pythagoras,
    Clocks,
    TrueFalse,
    DiceProbability,
    AgeProblem,
    NumberSquareProblem,
}

/// Curriculum-path names accepted in addition to the canonical labels
const ALIASES: [(&str, Topic); 30] = [
    ("Number Sense / Natural & Whole", Topic::NaturalWholeNumbers),
    ("Number Sense / Integers", Topic::Integers),
    ("Number Sense / Fractions", Topic::Fractions),
    ("Number Sense / Decimals", Topic::Decimals),
    ("Number Sense / LCM", Topic::Lcm),
    ("Number Sense / HCF", Topic::Hcf),
    ("Arithmetic / Ratio & Proportion", Topic::RatioProportion),
    ("Arithmetic / Clocks", Topic::Clocks),
    ("Number Sense / Square Roots", Topic::SquareRoots),
    ("Number Sense / Cube Roots", Topic::CubeRoots),
    ("Number Sense / Exponents", Topic::Exponents),
    ("Arithmetic / BODMAS", Topic::Bodmas),
    ("Algebra / Addition & Subtraction", Topic::AlgebraicAddition),
    ("Algebra / Multiplication", Topic::AlgebraicMultiplication),
    ("Algebra / Division", Topic::AlgebraicDivision),
    ("Algebra / Linear Equations", Topic::LinearEquation),
    ("Algebra / Simultaneous Equations", Topic::SimultaneousEquations),
    ("Algebra / Quadratic Equations", Topic::QuadraticEquation),
    ("Algebra / Word Problems (Age)", Topic::AgeProblem),
    ("Algebra / Word Problems (Quadratic)", Topic::NumberSquareProblem),
    ("Mensuration / Perimeter", Topic::PerimeterAndArea),
    ("Mensuration / Area", Topic::Area),
    ("Coordinate Geometry / Quadrants", Topic::CartesianPoint),
    ("Coordinate Geometry / Distance Formula", Topic::CoordinateGeometry),
    ("Coordinate Geometry / Section Formula", Topic::SectionFormula),
    ("Trigonometry / Ratios", Topic::Trigonometry),
    ("Trigonometry / Standard Angles", Topic::TrigRatios),
    ("Geometry / Pythagoras Theorem", Topic::Pythagoras),
    ("Probability / True/False", Topic::TrueFalse),
    ("Probability / Dice", Topic::DiceProbability),
];

impl Topic {
    pub const ALL: [Topic; 32] = [
        Topic::NaturalWholeNumbers,
        Topic::Integers,
        Topic::Fractions,
        Topic::Decimals,
        Topic::Lcm,
        Topic::Hcf,
        Topic::LcmAndHcf,
        Topic::RatioProportion,
        Topic::SquareRoots,
        Topic::CubeRoots,
        Topic::Exponents,
        Topic::Bodmas,
        Topic::AlgebraicAddition,
        Topic::AlgebraicMultiplication,
        Topic::AlgebraicDivision,
        Topic::LinearEquation,
        Topic::SimultaneousEquations,
        Topic::QuadraticEquation,
        Topic::Perimeter,
        Topic::PerimeterAndArea,
        Topic::Area,
        Topic::CartesianPoint,
        Topic::CoordinateGeometry,
        Topic::SectionFormula,
        Topic::Trigonometry,
        Topic::TrigRatios,
        Topic::Pythagoras,
        Topic::Clocks,
        Topic::TrueFalse,
        Topic::DiceProbability,
        Topic::AgeProblem,
        Topic::NumberSquareProblem,
    ];

    /// Stable label written into `QuestionItem::topic`
    pub fn label(&self) -> &'static str {
        match self {
            Topic::NaturalWholeNumbers => "Fundamental Operations on Natural and Whole Numbers",
            Topic::Integers => "Fundamental Operations On Integers",
            Topic::Fractions => "Fractions",
            Topic::Decimals => "Fundamental operations on decimals",
            Topic::Lcm => "Least Common Multiple",
            Topic::Hcf => "Highest Common Factor",
            Topic::LcmAndHcf => "LCM and HCF",
            Topic::RatioProportion => "Ratio and Proportion",
            Topic::SquareRoots => "Square and Square Roots",
            Topic::CubeRoots => "Cube and Cube Roots",
            Topic::Exponents => "Laws of Exponents",
            Topic::Bodmas => "BODMAS",
            Topic::AlgebraicAddition => "Algebraic Addition",
            Topic::AlgebraicMultiplication => "Algebraic Multiplication",
            Topic::AlgebraicDivision => "Algebraic Division",
            Topic::LinearEquation => "Linear Equations in one Variable",
            Topic::SimultaneousEquations => "Simultaneous Equations",
            Topic::QuadraticEquation => "Quadratic Equations",
            Topic::Perimeter => "Perimeter of Plane Figures",
            Topic::PerimeterAndArea => "Perimeter and Area",
            Topic::Area => "Area of Plane Figures",
            Topic::CartesianPoint => "Locating a point in a Cartesian Plane",
            Topic::CoordinateGeometry => "Coordinate Geometry",
            Topic::SectionFormula => "Section Formula",
            Topic::Trigonometry => "Trigonometry",
            Topic::TrigRatios => "Trigonometric Ratios of Standard angles",
            Topic::Pythagoras => "Word Problems - Pythagorean Theorem",
            Topic::Clocks => "Clocks",
            Topic::TrueFalse => "Miscellaneous",
            Topic::DiceProbability => "Probability",
            Topic::AgeProblem => "Linear Equations Word Problems",
            Topic::NumberSquareProblem => "Quadratic Equations Word Problems",
        }
    }

    /// Resolve a canonical label or curriculum-path alias. Matching is case-sensitive.
    pub fn from_label(label: &str) -> Result<Topic> {
        let label = label.trim();
        Topic::ALL
            .iter()
            .find(|t| t.label() == label)
            .copied()
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == label)
                    .map(|(_, topic)| *topic)
            })
            .ok_or_else(|| GenerateError::UnknownTopic {
                label: label.to_string(),
            })
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Generate one item for `topic`
pub fn generate<R: Rng + ?Sized>(topic: Topic, rng: &mut R) -> Result<QuestionItem> {
    let item = match topic {
        Topic::NaturalWholeNumbers => arithmetic::natural_whole_numbers(rng),
        Topic::Integers => arithmetic::integers(rng),
        Topic::Fractions => arithmetic::fractions(rng),
        Topic::Decimals => arithmetic::decimals(rng),
        Topic::Lcm => arithmetic::lcm_rows(rng),
        Topic::Hcf => arithmetic::hcf_rows(rng),
        Topic::LcmAndHcf => arithmetic::lcm_and_hcf(rng),
        Topic::RatioProportion => arithmetic::ratio_proportion(rng),
        Topic::SquareRoots => arithmetic::square_roots(rng),
        Topic::CubeRoots => arithmetic::cube_roots(rng),
        Topic::Exponents => arithmetic::exponents(rng),
        Topic::Bodmas => arithmetic::bodmas(rng),
        Topic::AlgebraicAddition => algebra::algebraic_addition(rng),
        Topic::AlgebraicMultiplication => algebra::algebraic_multiplication(rng),
        Topic::AlgebraicDivision => algebra::algebraic_division(rng),
        Topic::LinearEquation => algebra::linear_equation(rng),
        Topic::SimultaneousEquations => algebra::simultaneous_equations(rng),
        Topic::QuadraticEquation => algebra::quadratic_equation(rng),
        Topic::Perimeter => geometry::perimeter(rng),
        Topic::PerimeterAndArea => geometry::perimeter_and_area(rng),
        Topic::Area => geometry::area(rng),
        Topic::CartesianPoint => geometry::cartesian_point(rng),
        Topic::CoordinateGeometry => geometry::coordinate_geometry(rng),
        Topic::SectionFormula => geometry::section_formula(rng),
        Topic::Trigonometry => trigonometry::trigonometry(rng),
        Topic::TrigRatios => trigonometry::trig_ratios(rng),
        Topic::Pythagoras => geometry::pythagoras(rng),
        Topic::Clocks => word_problems::clocks(rng),
        Topic::TrueFalse => word_problems::true_false(rng),
        Topic::DiceProbability => word_problems::dice_probability(rng),
        Topic::AgeProblem => word_problems::age_problem(rng),
        Topic::NumberSquareProblem => word_problems::number_square_problem(rng),
    }?;

    debug_assert!(
        item.invariant_violations().is_empty(),
        "{} produced a malformed item: {:?}",
        topic,
        item.invariant_violations()
    );
    debug!(
        topic = topic.label(),
        kind = ?item.kind,
        rows = item.rows.len(),
        options = item.options.len(),
        "generated item"
    );
    Ok(item)
}

/// Generate one item for a topic label or alias
pub fn generate_by_label<R: Rng + ?Sized>(label: &str, rng: &mut R) -> Result<QuestionItem> {
    generate(Topic::from_label(label)?, rng)
}

/// Grade 10 curriculum order, grouped by chapter
pub const CHAPTERS: [(&str, &[Topic]); 10] = [
    (
        "Real Numbers",
        &[
            Topic::NaturalWholeNumbers,
            Topic::Integers,
            Topic::Fractions,
            Topic::Decimals,
            Topic::LcmAndHcf,
            Topic::RatioProportion,
            Topic::Bodmas,
        ],
    ),
    (
        "Exponents & Roots",
        &[Topic::Exponents, Topic::SquareRoots, Topic::CubeRoots],
    ),
    (
        "Algebraic Expressions",
        &[
            Topic::AlgebraicAddition,
            Topic::AlgebraicMultiplication,
            Topic::AlgebraicDivision,
        ],
    ),
    (
        "Linear Equations",
        &[Topic::LinearEquation, Topic::SimultaneousEquations],
    ),
    ("Quadratic Equations", &[Topic::QuadraticEquation]),
    (
        "Coordinate Geometry",
        &[
            Topic::CartesianPoint,
            Topic::CoordinateGeometry,
            Topic::SectionFormula,
        ],
    ),
    ("Geometry & Mensuration", &[Topic::PerimeterAndArea, Topic::Area]),
    (
        "Trigonometry",
        &[Topic::Pythagoras, Topic::TrigRatios, Topic::Trigonometry],
    ),
    ("Probability", &[Topic::TrueFalse, Topic::DiceProbability]),
    (
        "Aptitude",
        &[Topic::Clocks, Topic::AgeProblem, Topic::NumberSquareProblem],
    ),
];

/// Items generated for one chapter slot of the question book
#[derive(Debug, Clone, Serialize)]
pub struct TopicSet {
    pub chapter: &'static str,
    pub topic: &'static str,
    pub items: Vec<QuestionItem>,
}

/// Build the whole question book from an injected RNG
pub fn generate_question_book_with<R: Rng + ?Sized>(
    rng: &mut R,
    questions_per_topic: usize,
) -> Result<Vec<TopicSet>> {
    let mut book = Vec::new();
    for (chapter, topics) in CHAPTERS {
        for &topic in topics {
            let items = (0..questions_per_topic)
                .map(|_| generate(topic, rng))
                .collect::<Result<Vec<_>>>()?;
            book.push(TopicSet {
                chapter,
                topic: topic.label(),
                items,
            });
        }
    }
    Ok(book)
}

/// Build the question book described by `config`, reproducibly when a seed is set
pub fn generate_question_book(config: &QuestionBookConfig) -> Result<Vec<TopicSet>> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let book = generate_question_book_with(&mut rng, config.questions_per_topic)?;
    info!(
        topics = book.len(),
        items = book.iter().map(|set| set.items.len()).sum::<usize>(),
        seed = ?config.seed,
        "question book generated"
    );
    Ok(book)
}
