//! # Defect Geometry
//!
//! Geometry of a single axial corrosion defect on a pressure pipeline.
//!
//! All lengths must share one consistent linear unit chosen by the caller
//! (the models are unit-agnostic). A defect is an immutable value record
//! built fresh for each evaluation; nothing outlives a single call.
//!
//! ## Example
//!
//! ```rust
//! use corro_core::defect::DefectGeometry;
//!
//! let defect = DefectGeometry {
//!     diameter: 506.0,
//!     wall_thickness: 6.35,
//!     defect_length: 200.0,
//!     defect_depth: 2.5,
//! };
//!
//! defect.validate().unwrap();
//! assert!((defect.relative_depth() - 0.3937).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{AssessError, AssessResult};

/// Geometry of the pipe and the corrosion defect being assessed.
///
/// ## JSON Example
///
/// ```json
/// {
///   "diameter": 506.0,
///   "wall_thickness": 6.35,
///   "defect_length": 200.0,
///   "defect_depth": 2.5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefectGeometry {
    /// Outside pipe diameter D
    pub diameter: f64,

    /// Nominal wall thickness t
    pub wall_thickness: f64,

    /// Axial length of the corroded area L
    pub defect_length: f64,

    /// Maximum depth of the corroded area d
    pub defect_depth: f64,
}

impl DefectGeometry {
    /// Validate geometry parameters.
    pub fn validate(&self) -> AssessResult<()> {
        if self.diameter <= 0.0 {
            return Err(AssessError::invalid_input(
                "diameter",
                self.diameter.to_string(),
                "Diameter must be positive",
            ));
        }
        if self.wall_thickness <= 0.0 {
            return Err(AssessError::invalid_input(
                "wall_thickness",
                self.wall_thickness.to_string(),
                "Wall thickness must be positive",
            ));
        }
        if self.defect_length <= 0.0 {
            return Err(AssessError::invalid_input(
                "defect_length",
                self.defect_length.to_string(),
                "Defect length must be positive",
            ));
        }
        if self.defect_depth <= 0.0 {
            return Err(AssessError::invalid_input(
                "defect_depth",
                self.defect_depth.to_string(),
                "Defect depth must be positive",
            ));
        }
        if self.defect_depth > self.wall_thickness {
            return Err(AssessError::invalid_input(
                "defect_depth",
                self.defect_depth.to_string(),
                "Defect depth cannot exceed wall thickness",
            ));
        }
        Ok(())
    }

    /// Relative depth d/t, in (0, 1] for valid geometry
    pub fn relative_depth(&self) -> f64 {
        self.defect_depth / self.wall_thickness
    }

    /// Dimensionless length parameter Z = L² / (D·t)
    pub fn shape_factor(&self) -> f64 {
        (self.defect_length * self.defect_length) / (self.diameter * self.wall_thickness)
    }

    /// Defect slenderness L / √(D·t)
    pub fn slenderness(&self) -> f64 {
        self.defect_length / (self.diameter * self.wall_thickness).sqrt()
    }

    /// Copy of this geometry with a different defect depth.
    ///
    /// Used by the remaining-life search, which re-evaluates the selected
    /// model across trial depths while everything else stays fixed.
    pub fn with_depth(&self, defect_depth: f64) -> Self {
        DefectGeometry {
            defect_depth,
            ..*self
        }
    }
}
