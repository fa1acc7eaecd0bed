//! # corro_core - Corroded-Pipeline Assessment Engine
//!
//! `corro_core` computes remaining structural safety margins for corroded
//! pressure pipelines with a clean, LLM-friendly API. Two published
//! assessment methods predict the failure pressure of a single axial
//! defect, and a bounded critical-depth search turns a corrosion rate
//! into a remaining-life estimate. All inputs and outputs are
//! JSON-serializable, making the crate easy to wrap in any transport.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results;
//!   one defect per call, nothing retained between calls
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Unit-Agnostic**: The caller picks one consistent unit system;
//!   nothing here converts units
//!
//! ## Quick Start
//!
//! ```rust
//! use corro_core::request::AssessmentRequest;
//!
//! // The canonical example defect
//! let request = AssessmentRequest::example();
//!
//! let report = request.run().unwrap();
//! println!("ERF: {:.4}", report.outcome.erf);
//! println!("Repair required: {}", report.outcome.repair_required);
//!
//! // Serialize the display-rounded record for transmission
//! let json = serde_json::to_string_pretty(&report.rounded()).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`request`] - The external call contract: request record, validation, runner
//! - [`assessments`] - The failure-pressure assessment methods
//! - [`remaining_life`] - Critical-depth search and remaining-life estimation
//! - [`defect`] - Pipe and defect geometry
//! - [`material`] - Material strengths and the safety-class margin table
//! - [`conditions`] - Operating pressure and corrosion growth
//! - [`errors`] - Structured error types

pub mod assessments;
pub mod conditions;
pub mod defect;
pub mod errors;
pub mod material;
pub mod remaining_life;
pub mod request;

// Re-export commonly used types at crate root for convenience
pub use assessments::{AssessmentMethod, AssessmentOutcome};
pub use errors::{AssessError, AssessResult};
pub use remaining_life::{LifeResult, RemainingLife};
pub use request::{AssessmentReport, AssessmentRequest};
