//! # Safety-Factor Fracture Method
//!
//! Failure-pressure assessment using partial safety margins selected by
//! safety class. Unlike the modified flow-stress method this one works
//! from SMTS alone and divides the capacity by (gamma_m · gamma_d).
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use corro_core::assessments::safety_factor::{calculate, FractureInput};
//! use corro_core::conditions::OperatingCondition;
//! use corro_core::defect::DefectGeometry;
//! use corro_core::material::SafetyClass;
//!
//! let input = FractureInput {
//!     defect: DefectGeometry {
//!         diameter: 506.0,
//!         wall_thickness: 6.35,
//!         defect_length: 200.0,
//!         defect_depth: 2.5,
//!     },
//!     smts: 455.0,
//!     operating: OperatingCondition { maop: 1.5 },
//!     safety_class: SafetyClass::Medium,
//! };
//!
//! let outcome = calculate(&input).unwrap();
//! println!("ERF: {:.4} (class {})", outcome.erf, outcome.safety_class.unwrap());
//! ```

use serde::{Deserialize, Serialize};

use crate::assessments::{status_label, AssessmentMethod, AssessmentOutcome};
use crate::conditions::OperatingCondition;
use crate::defect::DefectGeometry;
use crate::errors::{AssessError, AssessResult};
use crate::material::SafetyClass;

/// Slenderness threshold √20 where the bulging correction switches to
/// its long-defect form
pub const SLENDERNESS_THRESHOLD: f64 = 4.47213595499958;

/// Input parameters for the safety-factor fracture method.
///
/// ## JSON Example
///
/// ```json
/// {
///   "defect": {
///     "diameter": 506.0,
///     "wall_thickness": 6.35,
///     "defect_length": 200.0,
///     "defect_depth": 2.5
///   },
///   "smts": 455.0,
///   "operating": { "maop": 1.5 },
///   "safety_class": "medium"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractureInput {
    /// Pipe and defect geometry
    pub defect: DefectGeometry,

    /// Specified minimum tensile strength
    pub smts: f64,

    /// Operating pressure
    pub operating: OperatingCondition,

    /// Safety class selecting the partial margins
    pub safety_class: SafetyClass,
}

/// Bulging correction as a function of defect slenderness s = L/√(D·t).
///
/// Same series approximation as the flow-stress method with Z = s², but
/// published with its switch point at s = √20 rather than Z = 50.
pub fn bulging_factor(slenderness: f64) -> AssessResult<f64> {
    let s2 = slenderness * slenderness;
    if slenderness <= SLENDERNESS_THRESHOLD {
        let radicand = 1.0 + 0.6275 * s2 - 0.003375 * s2 * s2;
        if radicand <= 0.0 {
            return Err(AssessError::computation_failed(
                AssessmentMethod::SafetyFactorFracture.as_str(),
                format!(
                    "Bulging factor undefined: negative radicand {radicand} at slenderness {slenderness}"
                ),
            ));
        }
        Ok(radicand.sqrt())
    } else {
        Ok(0.032 * s2 + 3.3)
    }
}

/// Assess one defect with the safety-factor fracture method.
///
/// # Arguments
///
/// * `input` - Geometry, SMTS, operating pressure, and safety class
///
/// # Returns
///
/// * `Ok(AssessmentOutcome)` - Flat result record with the resolved
///   safety class echoed back
/// * `Err(AssessError)` - If inputs are invalid or the formulas are
///   undefined for the geometry ratio
pub fn calculate(input: &FractureInput) -> AssessResult<AssessmentOutcome> {
    input.defect.validate()?;
    input.operating.validate()?;
    if input.smts <= 0.0 {
        return Err(AssessError::invalid_input(
            "smts",
            input.smts.to_string(),
            "SMTS must be positive",
        ));
    }

    let relative_depth = input.defect.relative_depth();
    let slenderness = input.defect.slenderness();
    let bulging = bulging_factor(slenderness)?;
    let (gamma_m, gamma_d) = input.safety_class.margins();

    let denominator = 1.0 - relative_depth / bulging;
    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(AssessError::computation_failed(
            AssessmentMethod::SafetyFactorFracture.as_str(),
            format!("Failure pressure undefined: denominator {denominator} is not positive"),
        ));
    }

    let failure_pressure = (2.0 * input.defect.wall_thickness * input.smts
        / (input.defect.diameter * gamma_m * gamma_d))
        * ((1.0 - relative_depth) / denominator);
    if !failure_pressure.is_finite() || failure_pressure <= 0.0 {
        return Err(AssessError::computation_failed(
            AssessmentMethod::SafetyFactorFracture.as_str(),
            format!("Failure pressure {failure_pressure} is not positive"),
        ));
    }

    let erf = input.operating.maop / failure_pressure;
    let repair_required = erf >= 1.0;

    Ok(AssessmentOutcome {
        method: AssessmentMethod::SafetyFactorFracture,
        relative_depth,
        geometry_factor: slenderness,
        bulging_factor: bulging,
        flow_stress: None,
        failure_stress: None,
        failure_pressure,
        erf,
        repair_required,
        status: status_label(repair_required),
        safety_class: Some(input.safety_class),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> FractureInput {
        FractureInput {
            defect: DefectGeometry {
                diameter: 506.0,
                wall_thickness: 6.35,
                defect_length: 200.0,
                defect_depth: 2.5,
            },
            smts: 455.0,
            operating: OperatingCondition { maop: 1.5 },
            safety_class: SafetyClass::Medium,
        }
    }

    #[test]
    fn test_reference_defect() {
        let outcome = calculate(&test_input()).unwrap();

        // s = 200 / sqrt(506 * 6.35) = 3.528, polynomial branch
        assert!((outcome.geometry_factor - 3.528).abs() < 1e-3);
        assert!((outcome.bulging_factor - 2.879).abs() < 1e-3);
        assert!(outcome.erf < 1.0);
        assert!(!outcome.repair_required);
        assert_eq!(outcome.safety_class, Some(SafetyClass::Medium));
        assert_eq!(outcome.flow_stress, None);
    }

    #[test]
    fn test_reference_failure_pressure() {
        let outcome = calculate(&test_input()).unwrap();
        // p = (2 * 6.35 * 455 / (506 * 1.15 * 1.05)) * ((1 - 0.3937) / (1 - 0.3937/2.879))
        let capacity = 2.0 * 6.35 * 455.0 / (506.0 * 1.15 * 1.05);
        let expected = capacity * ((1.0 - 2.5 / 6.35)
            / (1.0 - (2.5 / 6.35) / outcome.bulging_factor));
        assert!((outcome.failure_pressure - expected).abs() < 1e-9);
        assert!((outcome.erf - 1.5 / expected).abs() < 1e-9);
    }

    #[test]
    fn test_higher_class_is_more_conservative() {
        let mut input = test_input();
        input.safety_class = SafetyClass::Low;
        let low = calculate(&input).unwrap();
        input.safety_class = SafetyClass::High;
        let high = calculate(&input).unwrap();
        assert!(high.failure_pressure < low.failure_pressure);
        assert!(high.erf > low.erf);
    }

    #[test]
    fn test_branch_selection_at_threshold() {
        // Polynomial branch up to and including √20, long-defect form above
        let s = SLENDERNESS_THRESHOLD;
        let below = bulging_factor(s).unwrap();
        let expected_poly = (1.0 + 0.6275 * 20.0 - 0.003375 * 400.0_f64).sqrt();
        assert!((below - expected_poly).abs() < 1e-9);

        let above = bulging_factor(s + 1e-6).unwrap();
        let expected_linear = 0.032 * (s + 1e-6) * (s + 1e-6) + 3.3;
        assert!((above - expected_linear).abs() < 1e-9);
    }

    #[test]
    fn test_repair_boundary_is_inclusive() {
        let mut input = test_input();
        let outcome = calculate(&input).unwrap();
        input.operating.maop = outcome.failure_pressure;
        let at_boundary = calculate(&input).unwrap();
        assert_eq!(at_boundary.erf, 1.0);
        assert!(at_boundary.repair_required);
    }

    #[test]
    fn test_idempotence() {
        let a = calculate(&test_input()).unwrap();
        let b = calculate(&test_input()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialization_echoes_safety_class() {
        let outcome = calculate(&test_input()).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"safety_class\":\"medium\""));
        assert!(!json.contains("flow_stress"));
    }
}
