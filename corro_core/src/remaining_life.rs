//! # Remaining Life Estimation
//!
//! Finds the critical defect depth at which the selected method's
//! utilization ratio reaches 1.0, then converts the margin between the
//! as-found depth and the critical depth into a remaining-life estimate
//! using the corrosion rate.
//!
//! The search is a plain counted bisection: 50 iterations, an early
//! accept when |erf - 1| < 0.001, and a hard floor of 20% of wall
//! thickness on the reported critical depth. The fixed budget makes the
//! result deterministic and guarantees termination for any input.
//!
//! ## Example
//!
//! ```rust
//! use corro_core::assessments::AssessmentMethod;
//! use corro_core::conditions::{CorrosionCondition, OperatingCondition};
//! use corro_core::defect::DefectGeometry;
//! use corro_core::material::{MaterialProperties, SafetyClass};
//! use corro_core::remaining_life::{estimate, LifeInput, RemainingLife};
//!
//! let input = LifeInput {
//!     method: AssessmentMethod::ModifiedFlowStress,
//!     defect: DefectGeometry {
//!         diameter: 506.0,
//!         wall_thickness: 6.35,
//!         defect_length: 200.0,
//!         defect_depth: 2.5,
//!     },
//!     material: MaterialProperties { smys: 360.0, smts: 455.0 },
//!     operating: OperatingCondition { maop: 1.5 },
//!     corrosion: CorrosionCondition { corrosion_rate: 0.1 },
//!     safety_class: SafetyClass::Medium,
//! };
//!
//! let result = estimate(&input).unwrap();
//! match result.remaining_life {
//!     RemainingLife::Finite(years) => println!("{:.1} time units left", years),
//!     RemainingLife::Infinite => println!("no active corrosion"),
//! }
//! ```

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::assessments::{self, AssessmentMethod};
use crate::conditions::{CorrosionCondition, OperatingCondition};
use crate::defect::DefectGeometry;
use crate::errors::AssessResult;
use crate::material::{MaterialProperties, SafetyClass};

/// Fixed bisection budget; the loop never runs longer than this
pub const BISECTION_ITERATIONS: usize = 50;

/// Early-accept tolerance on |erf - 1|
pub const ERF_TOLERANCE: f64 = 0.001;

/// Standards-mandated floor: critical depth is never reported below this
/// fraction of wall thickness
pub const MIN_CRITICAL_DEPTH_FRACTION: f64 = 0.2;

/// Input parameters for remaining-life estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeInput {
    /// Assessment method evaluated at each trial depth
    pub method: AssessmentMethod,

    /// As-found pipe and defect geometry
    pub defect: DefectGeometry,

    /// Pipe material strengths
    pub material: MaterialProperties,

    /// Operating pressure
    pub operating: OperatingCondition,

    /// Corrosion growth condition
    pub corrosion: CorrosionCondition,

    /// Safety class, used when the method is safety-factor fracture
    pub safety_class: SafetyClass,
}

/// Remaining service life: a finite duration in the caller's time unit,
/// or infinite when the corrosion rate is zero.
///
/// Serializes as a plain number when finite and as the string
/// `"infinite"` otherwise, so an unbounded life can never be mistaken
/// for a finite one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemainingLife {
    /// Time until the defect reaches critical depth
    Finite(f64),
    /// No active corrosion; the defect is not growing
    Infinite,
}

impl RemainingLife {
    /// Whether this is the infinite sentinel
    pub fn is_infinite(&self) -> bool {
        matches!(self, RemainingLife::Infinite)
    }

    /// Finite value, if any
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            RemainingLife::Finite(v) => Some(*v),
            RemainingLife::Infinite => None,
        }
    }
}

impl Serialize for RemainingLife {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RemainingLife::Finite(v) => serializer.serialize_f64(*v),
            RemainingLife::Infinite => serializer.serialize_str("infinite"),
        }
    }
}

impl<'de> Deserialize<'de> for RemainingLife {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LifeVisitor;

        impl<'de> Visitor<'de> for LifeVisitor {
            type Value = RemainingLife;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number of time units or the string \"infinite\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<RemainingLife, E> {
                Ok(RemainingLife::Finite(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RemainingLife, E> {
                Ok(RemainingLife::Finite(v as f64))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RemainingLife, E> {
                Ok(RemainingLife::Finite(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RemainingLife, E> {
                if v == "infinite" {
                    Ok(RemainingLife::Infinite)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(LifeVisitor)
    }
}

/// Results from remaining-life estimation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "min_critical_depth": 1.27,
///   "remaining_life": 38.5,
///   "remaining_corrosion_tolerance": 3.85,
///   "corrosion_rate": 0.1,
///   "original_depth": 2.5,
///   "wall_thickness": 6.35
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeResult {
    /// Floor on critical depth: 20% of wall thickness
    pub min_critical_depth: f64,

    /// Remaining service life in the caller's time unit, or infinite
    pub remaining_life: RemainingLife,

    /// Depth margin the defect may still grow before reaching critical
    pub remaining_corrosion_tolerance: f64,

    /// Echo of the corrosion rate the estimate was derived from
    pub corrosion_rate: f64,

    /// Echo of the as-found defect depth
    pub original_depth: f64,

    /// Echo of the wall thickness
    pub wall_thickness: f64,
}

/// Find the critical depth where the selected method's erf reaches 1.0.
///
/// Bisection over [max(as-found depth, floor), wall thickness] with a
/// fixed budget of [`BISECTION_ITERATIONS`]. When the operating pressure
/// never drives erf to 1 inside the bracket (erf stays below 1 even
/// through-wall, or is already above 1 at the floor), the search
/// converges to the corresponding bracket edge and the last midpoint is
/// used. The 20% floor is enforced on the result in every case, even
/// when the search converged below it.
pub fn critical_depth(input: &LifeInput) -> AssessResult<f64> {
    let wall_thickness = input.defect.wall_thickness;
    let floor = MIN_CRITICAL_DEPTH_FRACTION * wall_thickness;

    let mut low = input.defect.defect_depth.max(floor);
    let mut high = wall_thickness;
    let mut mid = (low + high) / 2.0;

    for _ in 0..BISECTION_ITERATIONS {
        mid = (low + high) / 2.0;
        let outcome = assessments::evaluate(
            input.method,
            &input.defect.with_depth(mid),
            &input.material,
            &input.operating,
            input.safety_class,
        )?;

        if (outcome.erf - 1.0).abs() < ERF_TOLERANCE {
            return Ok(mid.max(floor));
        }
        if outcome.erf < 1.0 {
            // Defect still tolerable at this depth, search deeper
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(mid.max(floor))
}

/// Estimate remaining service life for a growing defect.
///
/// # Arguments
///
/// * `input` - Method selection, as-found state, and corrosion rate
///
/// # Returns
///
/// * `Ok(LifeResult)` - Critical-depth margin and derived life
/// * `Err(AssessError)` - If inputs are invalid or the method's formulas
///   are undefined at a trial depth
pub fn estimate(input: &LifeInput) -> AssessResult<LifeResult> {
    input.corrosion.validate()?;

    let critical = critical_depth(input)?;
    let original_depth = input.defect.defect_depth;
    let margin = critical - original_depth;

    let (remaining_life, remaining_corrosion_tolerance) = if input.corrosion.is_growing() {
        if margin > 0.0 {
            (
                RemainingLife::Finite(margin / input.corrosion.corrosion_rate),
                margin,
            )
        } else {
            // Already at or past critical depth
            (RemainingLife::Finite(0.0), 0.0)
        }
    } else {
        // Without a time dimension the margin is still reported, even
        // when it is not positive
        (RemainingLife::Infinite, margin)
    };

    Ok(LifeResult {
        min_critical_depth: MIN_CRITICAL_DEPTH_FRACTION * input.defect.wall_thickness,
        remaining_life,
        remaining_corrosion_tolerance,
        corrosion_rate: input.corrosion.corrosion_rate,
        original_depth,
        wall_thickness: input.defect.wall_thickness,
    })
}
