//! # Modified Flow-Stress Method
//!
//! Failure-pressure assessment of a single axial corrosion defect using
//! the modified flow-stress (B31G-style) method.
//!
//! ## Assumptions
//!
//! - Single rectangular-idealized axial defect
//! - Thin-wall hoop stress (P = 2·σ·t/D)
//! - Flow stress capped at SMTS
//! - All lengths in one linear unit, all pressures/stresses in one
//!   pressure unit, chosen by the caller
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use corro_core::assessments::modified_flow_stress::{calculate, FlowStressInput};
//! use corro_core::conditions::OperatingCondition;
//! use corro_core::defect::DefectGeometry;
//! use corro_core::material::MaterialProperties;
//!
//! let input = FlowStressInput {
//!     defect: DefectGeometry {
//!         diameter: 506.0,
//!         wall_thickness: 6.35,
//!         defect_length: 200.0,
//!         defect_depth: 2.5,
//!     },
//!     material: MaterialProperties { smys: 360.0, smts: 455.0 },
//!     operating: OperatingCondition { maop: 1.5 },
//! };
//!
//! let outcome = calculate(&input).unwrap();
//! println!("Failure pressure: {:.3}", outcome.failure_pressure);
//! println!("ERF: {:.4}", outcome.erf);
//! println!("Repair required: {}", outcome.repair_required);
//! ```

use serde::{Deserialize, Serialize};

use crate::assessments::{status_label, AssessmentMethod, AssessmentOutcome};
use crate::conditions::OperatingCondition;
use crate::defect::DefectGeometry;
use crate::errors::{AssessError, AssessResult};
use crate::material::MaterialProperties;

/// Input parameters for the modified flow-stress method.
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
///   "material": { "smys": 360.0, "smts": 455.0 },
///   "operating": { "maop": 1.5 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowStressInput {
    /// Pipe and defect geometry
    pub defect: DefectGeometry,

    /// Pipe material strengths
    pub material: MaterialProperties,

    /// Operating pressure
    pub operating: OperatingCondition,
}

/// Folias bulging correction as a function of the Z parameter.
///
/// The polynomial form is a series approximation valid for moderate Z;
/// past Z = 50 a linear asymptote replaces it, where the polynomial's
/// radicand would eventually go negative for long defects.
pub fn bulging_factor(shape_factor: f64) -> AssessResult<f64> {
    if shape_factor <= 50.0 {
        let radicand =
            1.0 + 0.6275 * shape_factor - 0.003375 * shape_factor * shape_factor;
        if radicand <= 0.0 {
            return Err(AssessError::computation_failed(
                AssessmentMethod::ModifiedFlowStress.as_str(),
                format!(
                    "Bulging factor undefined: negative radicand {radicand} at Z = {shape_factor}"
                ),
            ));
        }
        Ok(radicand.sqrt())
    } else {
        Ok(0.032 * shape_factor + 3.3)
    }
}

/// Assess one defect with the modified flow-stress method.
///
/// # Arguments
///
/// * `input` - Geometry, material strengths, and operating pressure
///
/// # Returns
///
/// * `Ok(AssessmentOutcome)` - Flat result record with all intermediates
/// * `Err(AssessError)` - If inputs are invalid or the formulas are
///   undefined for the geometry ratio
pub fn calculate(input: &FlowStressInput) -> AssessResult<AssessmentOutcome> {
    input.defect.validate()?;
    input.material.validate()?;
    input.operating.validate()?;

    let relative_depth = input.defect.relative_depth();
    let shape_factor = input.defect.shape_factor();
    let flow_stress = input.material.flow_stress();
    let bulging = bulging_factor(shape_factor)?;

    // Failure stress; the denominator must stay positive for the stress
    // to be physical
    let denominator = 1.0 - 0.85 * relative_depth / bulging;
    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(AssessError::computation_failed(
            AssessmentMethod::ModifiedFlowStress.as_str(),
            format!("Failure stress undefined: denominator {denominator} is not positive"),
        ));
    }
    let failure_stress = flow_stress * (1.0 - 0.85 * relative_depth) / denominator;

    let failure_pressure =
        2.0 * failure_stress * input.defect.wall_thickness / input.defect.diameter;
    if !failure_pressure.is_finite() || failure_pressure <= 0.0 {
        return Err(AssessError::computation_failed(
            AssessmentMethod::ModifiedFlowStress.as_str(),
            format!("Failure pressure {failure_pressure} is not positive"),
        ));
    }

    let erf = input.operating.maop / failure_pressure;
    let repair_required = erf >= 1.0;

    Ok(AssessmentOutcome {
        method: AssessmentMethod::ModifiedFlowStress,
        relative_depth,
        geometry_factor: shape_factor,
        bulging_factor: bulging,
        flow_stress: Some(flow_stress),
        failure_stress: Some(failure_stress),
        failure_pressure,
        erf,
        repair_required,
        status: status_label(repair_required),
        safety_class: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> FlowStressInput {
        FlowStressInput {
            defect: DefectGeometry {
                diameter: 506.0,
                wall_thickness: 6.35,
                defect_length: 200.0,
                defect_depth: 2.5,
            },
            material: MaterialProperties {
                smys: 360.0,
                smts: 455.0,
            },
            operating: OperatingCondition { maop: 1.5 },
        }
    }

    #[test]
    fn test_reference_defect() {
        let outcome = calculate(&test_input()).unwrap();

        assert!((outcome.relative_depth - 0.39370).abs() < 1e-4);
        // Z = 200² / (506 * 6.35) = 12.449, polynomial branch
        assert!((outcome.geometry_factor - 12.449).abs() < 1e-3);
        assert!((outcome.bulging_factor - 2.879).abs() < 1e-3);
        assert!((outcome.flow_stress.unwrap() - 396.0).abs() < 1e-9);
        assert!((outcome.failure_stress.unwrap() - 298.13).abs() < 0.05);
        assert!((outcome.failure_pressure - 7.4828).abs() < 1e-3);
        assert!((outcome.erf - 0.2005).abs() < 1e-3);
        assert!(!outcome.repair_required);
        assert_eq!(outcome.status, "success");
        assert!(outcome.passes());
    }

    #[test]
    fn test_long_defect_uses_linear_branch() {
        let mut input = test_input();
        // Z = 2000² / (506 * 6.35) = 1244.9 > 50
        input.defect.defect_length = 2000.0;
        let outcome = calculate(&input).unwrap();
        let expected = 0.032 * outcome.geometry_factor + 3.3;
        assert!((outcome.bulging_factor - expected).abs() < 1e-9);
    }

    #[test]
    fn test_branch_continuity_at_threshold() {
        // The polynomial and the linear asymptote nearly agree at Z = 50:
        // sqrt(23.9375) = 4.8926 vs 4.9
        let below = bulging_factor(50.0).unwrap();
        let above = bulging_factor(50.0 + 1e-9).unwrap();
        assert!((below - above).abs() < 0.01);
    }

    #[test]
    fn test_repair_boundary_is_inclusive() {
        let mut input = test_input();
        // Push MAOP to exactly the failure pressure: erf == 1.0
        let outcome = calculate(&input).unwrap();
        input.operating.maop = outcome.failure_pressure;
        let at_boundary = calculate(&input).unwrap();
        assert_eq!(at_boundary.erf, 1.0);
        assert!(at_boundary.repair_required);
        assert_eq!(at_boundary.status, "danger");
    }

    #[test]
    fn test_deeper_defect_raises_utilization() {
        let shallow = calculate(&test_input()).unwrap();
        let mut input = test_input();
        input.defect.defect_depth = 5.0;
        let deep = calculate(&input).unwrap();
        assert!(deep.erf > shallow.erf);
    }

    #[test]
    fn test_idempotence() {
        let a = calculate(&test_input()).unwrap();
        let b = calculate(&test_input()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut input = test_input();
        input.defect.defect_depth = 10.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_serialization() {
        let outcome = calculate(&test_input()).unwrap();
        let json = serde_json::to_string_pretty(&outcome).unwrap();
        let roundtrip: AssessmentOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, roundtrip);
        // Model B-only field stays out of the record
        assert!(!json.contains("safety_class"));
    }
}
