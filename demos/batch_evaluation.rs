use nuclide_rs::{Binding, Evaluator, EvaluatorConfig, SampleRange};

fn main() {
    nuclide_rs::init_logging();

    let mut evaluator = Evaluator::new(EvaluatorConfig::default());
    evaluator.declare_constant("N0").unwrap();
    evaluator.declare_constant("λ").unwrap();

    let formula = evaluator.parse("N(t) = N0 * exp(-λ * t)").unwrap();

    let bindings = vec![
        ("C-14", Binding::new().with("N0", 100.0).with("λ", 1.21e-4)),
        ("Cs-137", Binding::new().with("N0", 100.0).with("λ", 0.0230)),
        ("I-131", Binding::new().with("N0", 100.0).with("λ", 0.0864)),
        ("missing λ", Binding::new().with("N0", 100.0)),
    ];

    let range = SampleRange::new(0.0, 30.0, 4);
    for (label, binding) in &bindings {
        match evaluator.evaluate_range(&formula, binding, range) {
            Ok(evaluation) => println!("{}: {:?}", label, evaluation.samples.outputs()),
            Err(err) => println!("{}: {}", label, err),
        }
    }

    // A pole inside the range is reported, not returned as a value.
    let pole = evaluator.parse("f(t) = 1 / (t - 10)").unwrap();
    let evaluation = evaluator
        .evaluate_range(&pole, &Binding::new(), range)
        .unwrap();
    println!("\n{}", serde_json::to_string_pretty(&evaluation).unwrap());
}
