//! # Electra Core
//!
//! The analysis engine behind an interactive diode-circuit tutor.
//!
//! This library provides:
//! - Randomized but physically plausible parameters for nine textbook circuits
//!   (series/parallel clippers, clampers, Zener regulators)
//! - Closed-form analysis returning the conduction state and output quantities
//!   a learner is asked to predict
//! - Engineering-notation formatting for display and tolerant comparison
//! - Answer sheets, grading and a caller-owned quiz session
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Topologies, circuit specs and spec validation
//! - [`generator`] - Parameter sampling
//! - [`analysis`] - Per-topology piecewise rules
//! - [`format`] - Engineering notation
//! - [`grading`] - Sample points, answer sheets and grade reports
//! - [`session`] - Quiz state carried between calls by the caller
//!
//! The three core pieces form a straight pipeline: the generator produces a
//! [`CircuitSpec`] once per "new circuit" request, the analyzer computes the
//! correct answer at each sample point, and the formatter renders correct
//! and submitted values side by side.
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! electra generate series_biasclipper --seed 7 --show-answers
//! electra check series_clipper --seed 7 FB:12.3 FB:9.8 RB:0 RB:0 RB:0
//! ```
//!
//! ### Library
//!
//! ```
//! use electra_core::{analyze, CircuitSpec, Conduction, Topology};
//!
//! let spec = CircuitSpec::new(Topology::SeriesClipper, 10.0, false, 1.0);
//! let result = analyze(&spec, 5.0);
//! assert_eq!(result.state(), Some(Conduction::Forward));
//! assert_eq!(result.vout(), 5.0);
//! ```

pub mod analysis;
pub mod circuit;
pub mod error;
pub mod format;
pub mod generator;
pub mod grading;
pub mod session;

// Re-export main types for convenience
pub use analysis::{analyze, analyze_as, AnalysisResult};
pub use circuit::{CircuitSpec, Conduction, Topology};
pub use error::{Result, TutorError};
pub use format::{to_engineering, EngineeringValue};
pub use generator::{GeneratorConfig, ParameterGenerator};
pub use grading::{grade, AnswerSheet, GradeReport};
pub use session::QuizSession;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmTutor;

/// Maximum absolute difference at which a submitted value is accepted
pub const GRADING_TOLERANCE: f64 = 0.1;

/// Offset of the inner sample points from the peak, in volts
pub const SAMPLE_OFFSET: f64 = 2.5;

/// Resistors are generated in kΩ and analyzed in Ω
pub const KILO: f64 = 1000.0;
