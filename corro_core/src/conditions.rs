//! # Operating and Corrosion Conditions
//!
//! Operating pressure and the optional corrosion-growth condition. Both
//! use whatever consistent units the caller chose for the rest of the
//! request (pressure for MAOP, depth-per-time for the corrosion rate).

use serde::{Deserialize, Serialize};

use crate::errors::{AssessError, AssessResult};

/// Operating pressure of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingCondition {
    /// Maximum allowable operating pressure (MAOP)
    pub maop: f64,
}

impl OperatingCondition {
    /// Validate the operating pressure.
    pub fn validate(&self) -> AssessResult<()> {
        if self.maop <= 0.0 {
            return Err(AssessError::invalid_input(
                "maop",
                self.maop.to_string(),
                "MAOP must be positive",
            ));
        }
        Ok(())
    }
}

/// Corrosion growth condition. A zero rate means the defect is not
/// growing and remaining life is infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrosionCondition {
    /// Corrosion rate in depth per unit time
    pub corrosion_rate: f64,
}

impl CorrosionCondition {
    /// Validate the corrosion rate.
    pub fn validate(&self) -> AssessResult<()> {
        if self.corrosion_rate < 0.0 {
            return Err(AssessError::invalid_input(
                "corrosion_rate",
                self.corrosion_rate.to_string(),
                "Corrosion rate cannot be negative",
            ));
        }
        Ok(())
    }

    /// Whether the defect is actively growing
    pub fn is_growing(&self) -> bool {
        self.corrosion_rate > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maop_must_be_positive() {
        let op = OperatingCondition { maop: 0.0 };
        let err = op.validate().unwrap_err();
        assert!(err.to_string().contains("maop"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let c = CorrosionCondition {
            corrosion_rate: -0.1,
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_zero_rate_is_not_growing() {
        let c = CorrosionCondition {
            corrosion_rate: 0.0,
        };
        c.validate().unwrap();
        assert!(!c.is_growing());
    }
}
