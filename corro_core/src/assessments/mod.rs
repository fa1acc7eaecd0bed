//! # Defect Assessments
//!
//! This module contains the failure-pressure assessment methods. Each
//! method follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `calculate(input) -> Result<AssessmentOutcome, AssessError>` - Pure
//!   calculation function
//!
//! Both methods share one flat [`AssessmentOutcome`] record so callers
//! and the remaining-life search can treat them interchangeably.
//!
//! ## Available Methods
//!
//! - [`modified_flow_stress`] - Modified flow-stress method (B31G-style)
//! - [`safety_factor`] - Safety-factor fracture method (partial margins
//!   selected by safety class)

pub mod modified_flow_stress;
pub mod safety_factor;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use modified_flow_stress::FlowStressInput;
pub use safety_factor::FractureInput;

use crate::conditions::OperatingCondition;
use crate::defect::DefectGeometry;
use crate::errors::{AssessError, AssessResult};
use crate::material::{MaterialProperties, SafetyClass};

/// Selector over the fixed, closed set of supported assessment methods.
///
/// The set of standards is fixed and small, so method choice is a plain
/// tagged variant dispatched with a match, not an open plugin mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentMethod {
    /// Modified flow-stress method (default)
    #[default]
    ModifiedFlowStress,
    /// Safety-factor fracture method
    SafetyFactorFracture,
}

impl AssessmentMethod {
    /// All methods for iteration
    pub const ALL: [AssessmentMethod; 2] = [
        AssessmentMethod::ModifiedFlowStress,
        AssessmentMethod::SafetyFactorFracture,
    ];

    /// Method tag used in requests and result records
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentMethod::ModifiedFlowStress => "modified-flow-stress",
            AssessmentMethod::SafetyFactorFracture => "safety-factor-fracture",
        }
    }
}

impl FromStr for AssessmentMethod {
    type Err = AssessError;

    fn from_str(s: &str) -> AssessResult<Self> {
        match s {
            "modified-flow-stress" => Ok(AssessmentMethod::ModifiedFlowStress),
            "safety-factor-fracture" => Ok(AssessmentMethod::SafetyFactorFracture),
            other => Err(AssessError::unknown_method(other)),
        }
    }
}

impl fmt::Display for AssessmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat result record shared by both assessment methods.
///
/// `erf` is the utilization ratio MAOP / failure pressure; a value of
/// exactly 1.0 already counts as failing (`repair_required` is true at
/// the boundary, not just above it).
///
/// ## JSON Example
///
/// ```json
/// {
///   "method": "modified-flow-stress",
///   "relative_depth": 0.3937,
///   "geometry_factor": 12.449,
///   "flow_stress": 396.0,
///   "bulging_factor": 2.879,
///   "failure_stress": 298.13,
///   "failure_pressure": 7.483,
///   "erf": 0.2005,
///   "repair_required": false,
///   "status": "success"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    /// Which method produced this outcome
    pub method: AssessmentMethod,

    /// Relative defect depth d/t
    pub relative_depth: f64,

    /// Dimensionless geometry factor: the Z parameter L²/(D·t) for the
    /// modified flow-stress method, the slenderness L/√(D·t) for the
    /// safety-factor fracture method
    pub geometry_factor: f64,

    /// Folias-type bulging correction
    pub bulging_factor: f64,

    /// Flow stress min(1.1·SMYS, SMTS); modified flow-stress method only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_stress: Option<f64>,

    /// Predicted hoop stress at failure; modified flow-stress method only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_stress: Option<f64>,

    /// Predicted failure pressure of the corroded section
    pub failure_pressure: f64,

    /// Utilization ratio MAOP / failure pressure (ERF)
    pub erf: f64,

    /// Whether repair is required (erf ≥ 1.0)
    pub repair_required: bool,

    /// Display status: "danger" when repair is required, else "success"
    pub status: String,

    /// Safety class the margins were resolved from; safety-factor
    /// fracture method only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_class: Option<SafetyClass>,
}

impl AssessmentOutcome {
    /// Check if the defect is acceptable as found (erf < 1.0)
    pub fn passes(&self) -> bool {
        !self.repair_required
    }
}

/// Display status string for a utilization check
pub(crate) fn status_label(repair_required: bool) -> String {
    if repair_required { "danger" } else { "success" }.to_string()
}

/// Evaluate one defect with the selected method.
///
/// Thin conditional dispatch over the two calculation functions; the
/// remaining-life search calls this repeatedly at trial depths.
pub fn evaluate(
    method: AssessmentMethod,
    defect: &DefectGeometry,
    material: &MaterialProperties,
    operating: &OperatingCondition,
    safety_class: SafetyClass,
) -> AssessResult<AssessmentOutcome> {
    match method {
        AssessmentMethod::ModifiedFlowStress => modified_flow_stress::calculate(&FlowStressInput {
            defect: *defect,
            material: *material,
            operating: *operating,
        }),
        AssessmentMethod::SafetyFactorFracture => safety_factor::calculate(&FractureInput {
            defect: *defect,
            smts: material.smts,
            operating: *operating,
            safety_class,
        }),
    }
}
