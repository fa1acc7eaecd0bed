//! # Assessment Request Contract
//!
//! The single synchronous call contract the core is consumed through,
//! independent of transport. A caller supplies one flat record of
//! numbers plus optional method/safety-class selectors and receives one
//! flat result record.
//!
//! Validation runs in full before any model executes: format errors,
//! per-field range errors, and unknown selector values are all rejected
//! up front (client-class errors); only in-computation failures surface
//! as server-class errors.
//!
//! ## Example
//!
//! ```rust
//! use corro_core::request::AssessmentRequest;
//!
//! let report = AssessmentRequest::example().run().unwrap();
//! assert!(!report.outcome.repair_required);
//! println!("{}", serde_json::to_string_pretty(&report.rounded()).unwrap());
//! ```

use serde::{Deserialize, Serialize};

use crate::assessments::{self, AssessmentMethod, AssessmentOutcome};
use crate::conditions::{CorrosionCondition, OperatingCondition};
use crate::defect::DefectGeometry;
use crate::errors::{AssessError, AssessResult};
use crate::material::{MaterialProperties, SafetyClass};
use crate::remaining_life::{self, LifeInput, LifeResult, RemainingLife};

/// One defect-assessment request.
///
/// All numeric fields use whatever consistent unit system the caller
/// chose (one linear unit, one pressure unit, one time unit for the
/// corrosion rate). Selector strings are resolved to their enums during
/// validation so unknown values are rejected before computation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "diameter": 506,
///   "wall_thickness": 6.35,
///   "defect_length": 200,
///   "defect_depth": 2.5,
///   "smys": 360,
///   "smts": 455,
///   "maop": 1.5,
///   "corrosion_rate": 0.1,
///   "method": "modified-flow-stress",
///   "safety_class": "medium"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// Outside pipe diameter
    pub diameter: f64,

    /// Nominal wall thickness
    pub wall_thickness: f64,

    /// Axial defect length
    pub defect_length: f64,

    /// Maximum defect depth
    pub defect_depth: f64,

    /// Specified minimum yield strength
    pub smys: f64,

    /// Specified minimum tensile strength
    pub smts: f64,

    /// Maximum allowable operating pressure
    pub maop: f64,

    /// Corrosion rate in depth per time unit; 0 means not growing
    #[serde(default)]
    pub corrosion_rate: f64,

    /// Assessment method selector; defaults to "modified-flow-stress"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Safety class selector; defaults to "medium". Only the
    /// safety-factor-fracture method reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_class: Option<String>,
}

impl AssessmentRequest {
    /// Canonical example record for demonstration and testing.
    pub fn example() -> AssessmentRequest {
        AssessmentRequest {
            diameter: 506.0,
            wall_thickness: 6.35,
            defect_length: 200.0,
            defect_depth: 2.5,
            smys: 360.0,
            smts: 455.0,
            maop: 1.5,
            corrosion_rate: 0.1,
            method: Some("modified-flow-stress".to_string()),
            safety_class: Some("medium".to_string()),
        }
    }

    /// Parse a request from JSON. Missing or non-numeric fields surface
    /// as `InvalidFormat` with serde's description of the offender.
    pub fn from_json(json: &str) -> AssessResult<AssessmentRequest> {
        serde_json::from_str(json).map_err(|e| AssessError::invalid_format(e.to_string()))
    }

    /// Defect geometry view of this request
    pub fn defect(&self) -> DefectGeometry {
        DefectGeometry {
            diameter: self.diameter,
            wall_thickness: self.wall_thickness,
            defect_length: self.defect_length,
            defect_depth: self.defect_depth,
        }
    }

    /// Material strength view of this request
    pub fn material(&self) -> MaterialProperties {
        MaterialProperties {
            smys: self.smys,
            smts: self.smts,
        }
    }

    /// Operating condition view of this request
    pub fn operating(&self) -> OperatingCondition {
        OperatingCondition { maop: self.maop }
    }

    /// Corrosion condition view of this request
    pub fn corrosion(&self) -> CorrosionCondition {
        CorrosionCondition {
            corrosion_rate: self.corrosion_rate,
        }
    }

    /// Resolve the method selector, defaulting when absent
    pub fn resolve_method(&self) -> AssessResult<AssessmentMethod> {
        match &self.method {
            Some(s) => s.parse(),
            None => Ok(AssessmentMethod::default()),
        }
    }

    /// Resolve the safety-class selector, defaulting when absent
    pub fn resolve_safety_class(&self) -> AssessResult<SafetyClass> {
        match &self.safety_class {
            Some(s) => s.parse(),
            None => Ok(SafetyClass::default()),
        }
    }

    /// Validate the whole request without running any model.
    ///
    /// Finiteness first, then per-field range constraints, then selector
    /// resolution. The first violation is returned.
    pub fn validate(&self) -> AssessResult<()> {
        let numeric_fields = [
            ("diameter", self.diameter),
            ("wall_thickness", self.wall_thickness),
            ("defect_length", self.defect_length),
            ("defect_depth", self.defect_depth),
            ("smys", self.smys),
            ("smts", self.smts),
            ("maop", self.maop),
            ("corrosion_rate", self.corrosion_rate),
        ];
        for (field, value) in numeric_fields {
            if !value.is_finite() {
                return Err(AssessError::invalid_format(format!(
                    "Field '{field}' is not a finite number"
                )));
            }
        }

        self.defect().validate()?;
        self.material().validate()?;
        self.operating().validate()?;
        self.corrosion().validate()?;
        self.resolve_method()?;
        self.resolve_safety_class()?;
        Ok(())
    }

    /// Run the full assessment: validation, the selected model, and,
    /// when a positive corrosion rate is supplied, remaining-life
    /// estimation.
    pub fn run(&self) -> AssessResult<AssessmentReport> {
        self.validate()?;
        let method = self.resolve_method()?;
        let safety_class = self.resolve_safety_class()?;

        let outcome = assessments::evaluate(
            method,
            &self.defect(),
            &self.material(),
            &self.operating(),
            safety_class,
        )?;

        let corrosion = self.corrosion();
        let life = if corrosion.is_growing() {
            Some(remaining_life::estimate(&LifeInput {
                method,
                defect: self.defect(),
                material: self.material(),
                operating: self.operating(),
                corrosion,
                safety_class,
            })?)
        } else {
            None
        };

        Ok(AssessmentReport { outcome, life })
    }
}

/// Combined flat response record: the model outcome plus, for growing
/// defects, the remaining-life block. Both halves flatten into one
/// key-value record on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Model outcome for the as-found defect
    #[serde(flatten)]
    pub outcome: AssessmentOutcome,

    /// Remaining-life block, present when corrosion_rate > 0
    #[serde(flatten)]
    pub life: Option<LifeResult>,
}

impl AssessmentReport {
    /// Copy of this report rounded for display: 4 decimal places for
    /// dimensionless ratios, 3 for stress/pressure/length/time values.
    /// Internal computation always keeps full precision; call this only
    /// at the presentation boundary.
    pub fn rounded(&self) -> AssessmentReport {
        let mut report = self.clone();

        let outcome = &mut report.outcome;
        outcome.relative_depth = round_to(outcome.relative_depth, 4);
        outcome.geometry_factor = round_to(outcome.geometry_factor, 4);
        outcome.bulging_factor = round_to(outcome.bulging_factor, 4);
        outcome.erf = round_to(outcome.erf, 4);
        outcome.flow_stress = outcome.flow_stress.map(|v| round_to(v, 3));
        outcome.failure_stress = outcome.failure_stress.map(|v| round_to(v, 3));
        outcome.failure_pressure = round_to(outcome.failure_pressure, 3);

        if let Some(life) = &mut report.life {
            life.min_critical_depth = round_to(life.min_critical_depth, 3);
            life.remaining_corrosion_tolerance = round_to(life.remaining_corrosion_tolerance, 3);
            life.corrosion_rate = round_to(life.corrosion_rate, 3);
            life.original_depth = round_to(life.original_depth, 3);
            life.wall_thickness = round_to(life.wall_thickness, 3);
            if let RemainingLife::Finite(v) = life.remaining_life {
                life.remaining_life = RemainingLife::Finite(round_to(v, 3));
            }
        }

        report
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_runs_clean() {
        let report = AssessmentRequest::example().run().unwrap();
        assert_eq!(report.outcome.method, AssessmentMethod::ModifiedFlowStress);
        assert!(!report.outcome.repair_required);
        assert!((report.outcome.erf - 0.2005).abs() < 1e-3);

        let life = report.life.expect("corrosion_rate 0.1 adds the life block");
        assert!((life.remaining_life.as_finite().unwrap() - 38.5).abs() < 1e-4);
    }

    #[test]
    fn test_zero_rate_omits_life_block() {
        let mut request = AssessmentRequest::example();
        request.corrosion_rate = 0.0;
        let report = request.run().unwrap();
        assert!(report.life.is_none());
    }

    #[test]
    fn test_defaults_when_selectors_absent() {
        let mut request = AssessmentRequest::example();
        request.method = None;
        request.safety_class = None;
        let report = request.run().unwrap();
        assert_eq!(report.outcome.method, AssessmentMethod::ModifiedFlowStress);
    }

    #[test]
    fn test_safety_factor_method_selected() {
        let mut request = AssessmentRequest::example();
        request.method = Some("safety-factor-fracture".to_string());
        request.safety_class = Some("high".to_string());
        let report = request.run().unwrap();
        assert_eq!(report.outcome.method, AssessmentMethod::SafetyFactorFracture);
        assert_eq!(report.outcome.safety_class, Some(SafetyClass::High));
    }

    #[test]
    fn test_depth_exceeding_wall_rejected_before_computation() {
        let mut request = AssessmentRequest::example();
        request.defect_depth = 10.0;
        let err = request.run().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("exceed wall thickness"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_unknown_method_rejected_before_computation() {
        let mut request = AssessmentRequest::example();
        request.method = Some("unknown-method".to_string());
        let err = request.run().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_METHOD");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_unknown_safety_class_rejected() {
        let mut request = AssessmentRequest::example();
        request.safety_class = Some("extreme".to_string());
        assert_eq!(
            request.run().unwrap_err().error_code(),
            "UNKNOWN_SAFETY_CLASS"
        );
    }

    #[test]
    fn test_non_finite_field_is_format_error() {
        let mut request = AssessmentRequest::example();
        request.maop = f64::NAN;
        let err = request.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FORMAT");
        assert!(err.to_string().contains("maop"));
    }

    #[test]
    fn test_missing_field_in_json() {
        let err = AssessmentRequest::from_json(r#"{"diameter": 506}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FORMAT");
    }

    #[test]
    fn test_non_numeric_field_in_json() {
        let json = r#"{
            "diameter": "wide", "wall_thickness": 6.35, "defect_length": 200,
            "defect_depth": 2.5, "smys": 360, "smts": 455, "maop": 1.5
        }"#;
        let err = AssessmentRequest::from_json(json).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FORMAT");
    }

    #[test]
    fn test_request_roundtrip() {
        let request = AssessmentRequest::example();
        let json = serde_json::to_string_pretty(&request).unwrap();
        let roundtrip = AssessmentRequest::from_json(&json).unwrap();
        assert_eq!(request, roundtrip);
    }

    #[test]
    fn test_report_is_flat() {
        let report = AssessmentRequest::example().run().unwrap();
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();
        let record = value.as_object().unwrap();
        // Model outcome and life block share one flat record
        assert!(record.contains_key("erf"));
        assert!(record.contains_key("failure_pressure"));
        assert!(record.contains_key("remaining_life"));
        assert!(record.contains_key("min_critical_depth"));
    }

    #[test]
    fn test_display_rounding() {
        let report = AssessmentRequest::example().run().unwrap().rounded();
        assert_eq!(report.outcome.relative_depth, 0.3937);
        assert_eq!(report.outcome.erf, 0.2005);
        assert_eq!(report.outcome.failure_pressure, 7.483);
        let life = report.life.unwrap();
        assert_eq!(life.remaining_life, RemainingLife::Finite(38.5));
        // Full precision preserved on the unrounded report
        let full = AssessmentRequest::example().run().unwrap();
        assert_ne!(full.outcome.relative_depth, 0.3937);
    }
}
