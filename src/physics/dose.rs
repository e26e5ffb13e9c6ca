use crate::ast::{Sample, SampleSet};
use crate::physics::{in_range, non_negative, positive, PhysicsResult};
use serde::Serialize;

/// Annual dose limit for members of the public, in mSv.
pub const PUBLIC_LIMIT_MSV: f64 = 1.0;
/// Annual dose limit used for radiation workers, in mSv.
pub const OCCUPATIONAL_LIMIT_MSV: f64 = 5.0;

/// Excess cancer risk per mSv.
const RISK_PER_MSV: f64 = 0.005;
const DAYS_PER_YEAR: f64 = 365.0;

/// Annual dose in mSv from a daily exposure at a constant rate in µSv/h.
pub fn annual_dose(hours_per_day: f64, rate_usv_per_hour: f64) -> PhysicsResult<f64> {
    let hours = in_range("hours per day", hours_per_day, 0.0, 24.0)?;
    let rate = non_negative("dose rate", rate_usv_per_hour)?;
    Ok(hours * DAYS_PER_YEAR * rate / 1000.0)
}

/// Linear no-threshold risk estimate for a dose in mSv, as a fraction.
pub fn cancer_risk(dose_msv: f64) -> PhysicsResult<f64> {
    Ok(non_negative("dose", dose_msv)? * RISK_PER_MSV)
}

/// Hours per day that keep the annual dose at `target_msv`.
pub fn safe_daily_hours(target_msv: f64, rate_usv_per_hour: f64) -> PhysicsResult<f64> {
    let target = non_negative("target dose", target_msv)?;
    let rate = positive("dose rate", rate_usv_per_hour)?;
    Ok(target * 1000.0 / (DAYS_PER_YEAR * rate))
}

/// Dose in mSv from a single exposure.
pub fn emergency_dose(hours: f64, rate_usv_per_hour: f64) -> PhysicsResult<f64> {
    let hours = non_negative("exposure duration", hours)?;
    let rate = non_negative("dose rate", rate_usv_per_hour)?;
    Ok(hours * rate / 1000.0)
}

/// Running total of a constant daily dose for days `1..=days`.
pub fn cumulative_dose_curve(daily_msv: f64, days: u32) -> PhysicsResult<SampleSet> {
    let daily = non_negative("daily dose", daily_msv)?;
    let samples = (1..=days)
        .map(|day| {
            let day = f64::from(day);
            Sample {
                input: day,
                output: daily * day,
            }
        })
        .collect();
    Ok(SampleSet::from_samples(samples))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseCategory {
    VeryLow,
    Low,
    Moderate,
    High,
    Extreme,
}

impl DoseCategory {
    /// Upper bounds are inclusive: 0.1 mSv is still `VeryLow`.
    pub fn from_dose(dose_msv: f64) -> PhysicsResult<Self> {
        let dose = non_negative("dose", dose_msv)?;
        Ok(if dose <= 0.1 {
            DoseCategory::VeryLow
        } else if dose <= 10.0 {
            DoseCategory::Low
        } else if dose <= 100.0 {
            DoseCategory::Moderate
        } else if dose <= 1000.0 {
            DoseCategory::High
        } else {
            DoseCategory::Extreme
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            DoseCategory::VeryLow => "Very Low",
            DoseCategory::Low => "Low",
            DoseCategory::Moderate => "Moderate",
            DoseCategory::High => "High",
            DoseCategory::Extreme => "Extreme",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DoseCategory::VeryLow => {
                "Typical background radiation or minor diagnostics. No health risk."
            }
            DoseCategory::Low => "Comparable to X-rays or flights. Low long-term risk.",
            DoseCategory::Moderate => {
                "Occupational level. Slight increased cancer risk over years."
            }
            DoseCategory::High => "Acute exposure zone. Risk of symptoms, seek evaluation.",
            DoseCategory::Extreme => "Dangerous or potentially fatal dose. Emergency situation.",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DoseCategory::VeryLow => "green",
            DoseCategory::Low => "yellow",
            DoseCategory::Moderate => "orange",
            DoseCategory::High => "red",
            DoseCategory::Extreme => "darkred",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyAssessment {
    WithinLimits,
    AbovePublicLimit,
    AcuteEffectsPossible,
}

impl EmergencyAssessment {
    pub fn from_dose(dose_msv: f64) -> PhysicsResult<Self> {
        let dose = non_negative("dose", dose_msv)?;
        Ok(if dose > 10.0 {
            EmergencyAssessment::AcuteEffectsPossible
        } else if dose > PUBLIC_LIMIT_MSV {
            EmergencyAssessment::AbovePublicLimit
        } else {
            EmergencyAssessment::WithinLimits
        })
    }

    pub fn message(&self) -> &'static str {
        match self {
            EmergencyAssessment::WithinLimits => "Within short-term safety limits.",
            EmergencyAssessment::AbovePublicLimit => "Above public limit. Caution advised.",
            EmergencyAssessment::AcuteEffectsPossible => "High dose. Acute effects possible.",
        }
    }
}
