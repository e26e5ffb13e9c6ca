use crate::physics::{in_range, non_negative, positive, PhysicsError, PhysicsResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// Half-width of the band around k = 1 that the core designer reports as critical.
pub const CRITICAL_BAND: f64 = 0.05;
/// Enrichment at which an unrodded core reaches k = 1.
const REFERENCE_ENRICHMENT_PERCENT: f64 = 5.0;

/// k_eff = ν·Σf / (Σf + Σa)
pub fn k_effective(
    neutrons_per_fission: f64,
    fission_cross_section: f64,
    absorption_cross_section: f64,
) -> PhysicsResult<f64> {
    let nu = positive("neutrons per fission", neutrons_per_fission)?;
    let sigma_f = non_negative("fission cross-section", fission_cross_section)?;
    let sigma_a = non_negative("absorption cross-section", absorption_cross_section)?;
    if sigma_f + sigma_a == 0.0 {
        return Err(PhysicsError::Undefined(
            "total cross-section is zero".to_string(),
        ));
    }
    Ok(nu * sigma_f / (sigma_f + sigma_a))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalityState {
    Subcritical,
    Critical,
    Supercritical,
}

impl CriticalityState {
    /// Classifies an exact multiplication factor: only k = 1 is critical.
    pub fn from_k_eff(k_eff: f64) -> Self {
        if k_eff < 1.0 {
            CriticalityState::Subcritical
        } else if k_eff == 1.0 {
            CriticalityState::Critical
        } else {
            CriticalityState::Supercritical
        }
    }

    /// Classifies an estimate, treating `1 ± CRITICAL_BAND` as critical.
    pub fn from_estimate(k_eff: f64) -> Self {
        if k_eff < 1.0 - CRITICAL_BAND {
            CriticalityState::Subcritical
        } else if k_eff <= 1.0 + CRITICAL_BAND {
            CriticalityState::Critical
        } else {
            CriticalityState::Supercritical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CriticalityState::Subcritical => "Subcritical",
            CriticalityState::Critical => "Critical",
            CriticalityState::Supercritical => "Supercritical",
        }
    }
}

/// Largest core radius the designer lays out, in cells.
pub const MAX_RADIUS_CELLS: usize = 10;

/// A toy core layout: a disc of fuel cells with uniform control-rod insertion.
///
/// Built through `ReactorCore::new`, which deserialization also goes through.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoreLayout")]
pub struct ReactorCore {
    enrichment_percent: f64,
    rod_insertion_percent: f64,
    radius_cells: usize,
}

/// Unvalidated wire form of `ReactorCore`.
#[derive(Deserialize)]
struct CoreLayout {
    enrichment_percent: f64,
    rod_insertion_percent: f64,
    radius_cells: usize,
}

impl TryFrom<CoreLayout> for ReactorCore {
    type Error = PhysicsError;

    fn try_from(layout: CoreLayout) -> Result<Self, Self::Error> {
        ReactorCore::new(
            layout.enrichment_percent,
            layout.rod_insertion_percent,
            layout.radius_cells,
        )
    }
}

impl ReactorCore {
    pub fn new(
        enrichment_percent: f64,
        rod_insertion_percent: f64,
        radius_cells: usize,
    ) -> PhysicsResult<Self> {
        if radius_cells > MAX_RADIUS_CELLS {
            return Err(PhysicsError::OutOfRange {
                quantity: "core radius",
                value: radius_cells as f64,
                min: 0.0,
                max: MAX_RADIUS_CELLS as f64,
            });
        }
        Ok(Self {
            enrichment_percent: in_range("enrichment", enrichment_percent, 0.0, 100.0)?,
            rod_insertion_percent: in_range("rod insertion", rod_insertion_percent, 0.0, 100.0)?,
            radius_cells,
        })
    }

    pub fn enrichment_percent(&self) -> f64 {
        self.enrichment_percent
    }

    pub fn rod_insertion_percent(&self) -> f64 {
        self.rod_insertion_percent
    }

    pub fn radius_cells(&self) -> usize {
        self.radius_cells
    }

    /// Relative reactivity of a single fuel cell.
    pub fn fuel_effectiveness(&self) -> f64 {
        self.enrichment_percent * (1.0 - self.rod_insertion_percent / 100.0)
    }

    /// Rounded to three decimals.
    pub fn estimate_k_eff(&self) -> f64 {
        let k_eff = self.enrichment_percent / REFERENCE_ENRICHMENT_PERCENT
            * (1.0 - self.rod_insertion_percent / 100.0);
        (k_eff * 1000.0).round() / 1000.0
    }

    pub fn state(&self) -> CriticalityState {
        CriticalityState::from_estimate(self.estimate_k_eff())
    }

    /// A `(2r+1)²` grid: fuel cells within `radius_cells` of the centre hold the
    /// fuel effectiveness, the rest are zero.
    pub fn reactivity_map(&self) -> Vec<Vec<f64>> {
        let radius = self.radius_cells as f64;
        let size = self.radius_cells * 2 + 1;
        let effectiveness = self.fuel_effectiveness();
        debug!(
            "Building {}x{} reactivity map, cell effectiveness {}",
            size, size, effectiveness
        );

        (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| {
                        let di = i as f64 - radius;
                        let dj = j as f64 - radius;
                        if (di * di + dj * dj).sqrt() <= radius {
                            effectiveness
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
