use nuclide_rs::physics::{decay, dose};
use nuclide_rs::{evaluate_formula, SampleRange};
use std::collections::HashMap;

fn main() {
    nuclide_rs::init_logging();

    let half_life = 8.02;
    let lambda = decay::decay_constant(half_life).expect("Invalid half-life");
    let constants = HashMap::from([("N0".to_string(), 100.0), ("λ".to_string(), lambda)]);

    let evaluation = evaluate_formula(
        "N(t) = N0 * exp(-λ * t)",
        &constants,
        SampleRange::new(0.0, 5.0 * half_life, 11),
    )
    .expect("Failed to evaluate");

    println!("I-131, T½ = {} days, λ = {:.5} 1/day", half_life, lambda);
    for sample in &evaluation.samples {
        println!("t = {:6.2}  N = {:8.3}", sample.input, sample.output);
    }

    let annual = dose::annual_dose(2.0, 0.5).expect("Invalid exposure");
    let category = dose::DoseCategory::from_dose(annual).expect("Invalid dose");
    println!(
        "\n2 h/day at 0.5 µSv/h: {:.3} mSv/year, {} ({})",
        annual,
        category.label(),
        category.description()
    );
}
