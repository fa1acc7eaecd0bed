//! # Pipe Material
//!
//! Material strength properties and the safety-class margin table.
//!
//! ## Material Strengths
//!
//! - **SMYS**: specified minimum yield strength
//! - **SMTS**: specified minimum tensile strength
//!
//! SMTS ≥ SMYS is expected for real pipe steel but not enforced; the
//! flow-stress cap handles either ordering.
//!
//! ## Example
//!
//! ```rust
//! use corro_core::material::{MaterialProperties, SafetyClass};
//!
//! let steel = MaterialProperties { smys: 360.0, smts: 455.0 };
//! // 1.1 * 360 = 396, well below SMTS
//! assert!((steel.flow_stress() - 396.0).abs() < 1e-9);
//!
//! let (gamma_m, gamma_d) = SafetyClass::Medium.margins();
//! assert_eq!((gamma_m, gamma_d), (1.15, 1.05));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AssessError, AssessResult};

/// Strength properties of the pipe material, in the caller's pressure unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Specified minimum yield strength
    pub smys: f64,

    /// Specified minimum tensile strength
    pub smts: f64,
}

impl MaterialProperties {
    /// Validate strength parameters.
    pub fn validate(&self) -> AssessResult<()> {
        if self.smys <= 0.0 {
            return Err(AssessError::invalid_input(
                "smys",
                self.smys.to_string(),
                "SMYS must be positive",
            ));
        }
        if self.smts <= 0.0 {
            return Err(AssessError::invalid_input(
                "smts",
                self.smts.to_string(),
                "SMTS must be positive",
            ));
        }
        Ok(())
    }

    /// Flow stress: 1.1·SMYS, capped at SMTS
    pub fn flow_stress(&self) -> f64 {
        (1.1 * self.smys).min(self.smts)
    }
}

/// Qualitative risk category selecting the partial safety margins of the
/// safety-factor fracture method. Not used by the modified flow-stress
/// method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyClass {
    /// Reduced consequence of failure (e.g. remote, unmanned areas)
    Low,
    /// Normal consequence of failure
    #[default]
    Medium,
    /// Elevated consequence of failure (e.g. risers, populated areas)
    High,
}

impl SafetyClass {
    /// All safety classes for iteration
    pub const ALL: [SafetyClass; 3] = [SafetyClass::Low, SafetyClass::Medium, SafetyClass::High];

    /// Partial safety margins (gamma_m, gamma_d) for this class
    pub fn margins(&self) -> (f64, f64) {
        match self {
            SafetyClass::Low => (1.15, 1.00),
            SafetyClass::Medium => (1.15, 1.05),
            SafetyClass::High => (1.15, 1.15),
        }
    }

    /// String form used in requests and result records
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyClass::Low => "low",
            SafetyClass::Medium => "medium",
            SafetyClass::High => "high",
        }
    }
}

impl FromStr for SafetyClass {
    type Err = AssessError;

    fn from_str(s: &str) -> AssessResult<Self> {
        match s {
            "low" => Ok(SafetyClass::Low),
            "medium" => Ok(SafetyClass::Medium),
            "high" => Ok(SafetyClass::High),
            other => Err(AssessError::unknown_safety_class(other)),
        }
    }
}

impl fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
