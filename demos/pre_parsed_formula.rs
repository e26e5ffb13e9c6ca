use nuclide_rs::{Binding, Evaluator, EvaluatorConfig, FailurePolicy};

fn main() {
    nuclide_rs::init_logging();

    let config = EvaluatorConfig::from_json(r#"{ "failure_policy": "abort" }"#)
        .expect("Invalid configuration");
    assert_eq!(config.failure_policy, FailurePolicy::Abort);

    let mut evaluator = Evaluator::new(config);
    evaluator.declare_constant("H").unwrap();

    let formula = evaluator
        .parse("D(h) = h * 365 * H / 1000")
        .expect("Failed to parse");
    println!("Parsed {}({}) using constants {:?}", formula.name, formula.variable, formula.constants());

    let binding: Binding = serde_json::from_str(r#"{ "H": 0.5 }"#).unwrap();
    let hours = [0.5, 1.0, 2.0, 8.0];

    match evaluator.evaluate(&formula, &binding, &hours) {
        Ok(result) => {
            for sample in &result.samples {
                println!("{} h/day -> {:.3} mSv/year", sample.input, sample.output);
            }
        }
        Err(err) => println!("Error: {}", err),
    }

    for attempt in ["D(h) = __import__('os')", "D(h) = h * rate", "D(H) = H"] {
        match evaluator.parse(attempt) {
            Ok(_) => println!("{} parsed", attempt),
            Err(err) => println!("{} rejected: {}", attempt, err),
        }
    }
}
