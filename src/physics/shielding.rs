use crate::physics::{in_range, non_negative, PhysicsResult};

/// Dose left after a shield that blocks `blocked_fraction` of it.
pub fn transmitted_dose(initial_dose: f64, blocked_fraction: f64) -> PhysicsResult<f64> {
    let initial = non_negative("initial dose", initial_dose)?;
    let blocked = in_range("blocked fraction", blocked_fraction, 0.0, 1.0)?;
    Ok(initial * (1.0 - blocked))
}
