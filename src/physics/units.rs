use crate::physics::{finite, positive, PhysicsError, PhysicsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Julian year.
pub const DAYS_PER_YEAR: f64 = 365.25;
pub const BECQUERELS_PER_CURIE: f64 = 3.7e10;

/// Dose units accepted by the converter. Gray is taken as biologically equivalent
/// to sievert.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoseUnit {
    #[serde(rename = "Sv")]
    Sievert,
    #[serde(rename = "mSv")]
    Millisievert,
    #[serde(rename = "rem")]
    Rem,
    #[serde(rename = "Gy")]
    Gray,
}

impl DoseUnit {
    pub const ALL: [DoseUnit; 4] = [
        DoseUnit::Millisievert,
        DoseUnit::Sievert,
        DoseUnit::Rem,
        DoseUnit::Gray,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            DoseUnit::Sievert => "Sv",
            DoseUnit::Millisievert => "mSv",
            DoseUnit::Rem => "rem",
            DoseUnit::Gray => "Gy",
        }
    }

    /// How many sieverts one of this unit is.
    pub fn in_sieverts(&self) -> f64 {
        match self {
            DoseUnit::Sievert | DoseUnit::Gray => 1.0,
            DoseUnit::Millisievert => 0.001,
            DoseUnit::Rem => 0.01,
        }
    }

    pub fn convert(&self, value: f64, to: DoseUnit) -> PhysicsResult<f64> {
        Ok(finite("dose", value)? * self.in_sieverts() / to.in_sieverts())
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DoseUnit {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DoseUnit::ALL
            .into_iter()
            .find(|unit| unit.symbol() == s.trim())
            .ok_or_else(|| PhysicsError::UnknownUnit(s.to_string()))
    }
}

pub fn years_to_seconds(years: f64) -> f64 {
    years * DAYS_PER_YEAR * SECONDS_PER_DAY
}

pub fn seconds_to_years(seconds: f64) -> f64 {
    seconds / (DAYS_PER_YEAR * SECONDS_PER_DAY)
}

pub fn days_to_seconds(days: f64) -> f64 {
    days * SECONDS_PER_DAY
}

pub fn seconds_to_days(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DAY
}

pub fn becquerel_to_curie(becquerels: f64) -> f64 {
    becquerels / BECQUERELS_PER_CURIE
}

pub fn curie_to_becquerel(curies: f64) -> f64 {
    curies * BECQUERELS_PER_CURIE
}

/// Equivalent dose from absorbed dose and a radiation weighting factor.
pub fn gray_to_sievert(gray: f64, weighting: f64) -> PhysicsResult<f64> {
    Ok(finite("absorbed dose", gray)? * positive("weighting factor", weighting)?)
}

pub fn sievert_to_gray(sievert: f64, weighting: f64) -> PhysicsResult<f64> {
    Ok(finite("equivalent dose", sievert)? / positive("weighting factor", weighting)?)
}
