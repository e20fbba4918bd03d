use questionbook_core::construct::{FractionOp, LinearEquation, QuadraticEquation};
use questionbook_core::generators::geometry::quadrant;
use questionbook_core::generators::word_problems::dice_sum_probability;
use questionbook_core::numeric::{gcd, lcm};
use questionbook_core::{
    build_options, generate, score_response, Answer, Choice, Fraction, ItemKind, QuestionItem, Topic,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::collections::HashSet;

const SEEDS: u64 = 40;

fn for_every_item(mut check: impl FnMut(Topic, &QuestionItem)) {
    let _ = tracing_subscriber::fmt::try_init();
    for topic in Topic::ALL {
        for seed in 0..SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let item = generate(topic, &mut rng).unwrap();
            check(topic, &item);
        }
    }
}

fn collect_fractions(answer: &Answer, out: &mut Vec<Fraction>) {
    match answer {
        Answer::Fraction(f) => out.push(*f),
        Answer::Rows(rows) => rows.iter().for_each(|r| collect_fractions(r, out)),
        _ => {}
    }
}

#[test]
fn every_item_is_well_formed() {
    for_every_item(|topic, item| {
        let problems = item.invariant_violations();
        assert!(problems.is_empty(), "{}: {:?}", topic, problems);
        assert_eq!(item.topic, topic.label());
    });
}

#[test]
fn mcq_options_are_four_unique_values_with_one_correct() {
    for_every_item(|topic, item| {
        if item.kind != ItemKind::Mcq {
            return;
        }
        let values: HashSet<&str> = item.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(item.options.len(), 4, "{}", topic);
        assert_eq!(values.len(), 4, "{}", topic);
        let correct = item.answer.encode();
        assert_eq!(item.options.iter().filter(|o| o.value == correct).count(), 1, "{}", topic);
    });
}

#[test]
fn table_answer_map_is_indexed_by_row() {
    for_every_item(|topic, item| {
        if item.kind != ItemKind::TableInput {
            return;
        }
        let wire = serde_json::to_value(item).unwrap();
        let raw = wire["answer"].as_str().unwrap();
        let map: serde_json::Map<String, Value> = serde_json::from_str(raw).unwrap();

        let keys: HashSet<String> = map.keys().cloned().collect();
        let expected: HashSet<String> = (0..item.rows.len()).map(|i| i.to_string()).collect();
        assert_eq!(keys, expected, "{}", topic);

        for (i, row) in wire["rows"].as_array().unwrap().iter().enumerate() {
            assert_eq!(map[&i.to_string()], row["answer"], "{} row {}", topic, i);
        }
    });
}

#[test]
fn fraction_answers_are_canonical() {
    for_every_item(|topic, item| {
        let mut fractions = Vec::new();
        collect_fractions(&item.answer, &mut fractions);
        for f in fractions {
            assert!(f.den() > 0, "{}: {}", topic, f);
            assert_eq!(gcd(f.num(), f.den()), 1, "{}: {}", topic, f);
        }
    });
}

#[test]
fn wire_format_round_trips() {
    for_every_item(|topic, item| {
        let json = serde_json::to_string(item).unwrap();
        let back: QuestionItem = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, item, "{}", topic);
    });
}

#[test]
fn the_answer_always_scores_full_credit() {
    for_every_item(|topic, item| {
        let score = score_response(item, &item.answer.encode()).unwrap();
        assert_eq!(score.score, 1.0, "{}: {:?}", topic, score);
    });
}

#[test]
fn same_seed_same_item() {
    for topic in Topic::ALL {
        let a = generate(topic, &mut StdRng::seed_from_u64(2024)).unwrap();
        let b = generate(topic, &mut StdRng::seed_from_u64(2024)).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap(),
            "{}",
            topic
        );
    }
}

#[test]
fn quadratic_roots_satisfy_the_emitted_equation() {
    for seed in 0..SEEDS {
        let item = generate(Topic::QuadraticEquation, &mut StdRng::seed_from_u64(seed)).unwrap();
        let roots: Vec<i64> = item.rows.iter().map(|r| r.answer.encode().parse().unwrap()).collect();
        let equation = QuadraticEquation::from_roots(roots[0], roots[1]);
        assert!(item.question.contains(&equation.render()));
        for root in roots {
            assert_eq!(equation.evaluate(root), 0);
        }
    }
}

#[test]
fn linear_equation_with_solution_seven() {
    let eq = LinearEquation::from_solution(7, 3, 12);
    assert_eq!(eq.render(), "3x + 12 = 33");
    assert_eq!(eq.solve(), Some(7));
}

#[test]
fn quarter_plus_sixth_is_five_twelfths() {
    let sum = FractionOp::Add.apply(Fraction::new(1, 4), Fraction::new(1, 6));
    assert_eq!((sum.num(), sum.den()), (5, 12));
    assert_eq!(
        Answer::Fraction(sum).to_value(),
        serde_json::json!({ "num": "5", "den": "12" })
    );
}

#[test]
fn lcm_and_hcf_of_six_and_eight() {
    assert_eq!(lcm(6, 8), 24);
    assert_eq!(gcd(6, 8), 2);
}

#[test]
fn dice_sum_seven_is_one_sixth() {
    let p = dice_sum_probability(7);
    assert_eq!((p.num(), p.den()), (1, 6));
}

#[test]
fn point_left_of_y_axis_above_x_axis() {
    assert_eq!(quadrant(-3, 5), Some("Quadrant-2"));
}

#[test]
fn duplicate_correct_value_is_replaced() {
    let mut rng = StdRng::seed_from_u64(8);
    let correct = Choice::plain("12");
    let options = build_options(
        &mut rng,
        &correct,
        vec![Choice::plain("12"), Choice::plain("10"), Choice::plain("14")],
    )
    .unwrap();

    let values: HashSet<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(options.len(), 4);
    assert_eq!(values.len(), 4);
    assert!(values.contains("12") && values.contains("10") && values.contains("14"));
}

#[test]
fn unrepresentable_fraction_in_item_json_is_rejected() {
    let item = generate(Topic::DiceProbability, &mut StdRng::seed_from_u64(3)).unwrap();
    let mut wire = serde_json::to_value(&item).unwrap();
    let min = i64::MIN.to_string();
    wire["rows"][0]["answer"] = serde_json::json!({ "num": "1", "den": min });
    wire["answer"] = Value::String(format!(r#"{{"0":{{"num":"1","den":"{}"}}}}"#, min));

    let parsed: Result<QuestionItem, _> = serde_json::from_value(wire);
    assert!(parsed.is_err());
}

#[test]
fn unrepresentable_fraction_in_response_scores_zero() {
    let item = generate(Topic::DiceProbability, &mut StdRng::seed_from_u64(3)).unwrap();
    let score = score_response(&item, r#"{"0":{"num":"-9223372036854775808","den":"1"}}"#).unwrap();
    assert_eq!(score.score, 0.0);
}
