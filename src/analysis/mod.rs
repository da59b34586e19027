//! Closed-form analysis of the tutor's circuits.
//!
//! Every topology maps to one hand-derived piecewise rule; there is no
//! general solver here. [`analyze`] is a pure function of the spec and the
//! input sample: no state, no randomness.
//!
//! | Topology | Rule module | Output |
//! |----------|-------------|--------|
//! | `series_clipper`, `series_biasclipper` | [`clipper`] | FB/RB + Vo |
//! | `parallel_clipper`, `parallel_biasclipper` | [`clipper`] | FB/RB + Vo |
//! | `nobias_clamper`, `bias_clamper` | [`clamper`] | Vo |
//! | `zener_diode1` | [`zener`] | Vr, Ir, Pr, Pz |
//! | `zener_diode2` | [`zener`] | Il, Vr/Vs at Iz(max) and Iz(min) |
//! | `zener_diode3` | [`zener`] | Vr, Ir, Il/Rl at Iz(max) and Iz(min) |
//!
//! A spec missing a field its topology needs analyzes to
//! [`AnalysisResult::NotApplicable`] instead of failing.

pub mod clamper;
pub mod clipper;
pub mod zener;

pub use clipper::ClipperOutput;
pub use zener::{ZenerBasicResult, ZenerLoadResult, ZenerVariableResult};

use log::{trace, warn};

use crate::circuit::{CircuitSpec, Conduction, Topology};

/// A named output quantity, used for display and grading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    /// Short symbol, e.g. `Vr_max`
    pub symbol: &'static str,
    pub value: f64,
    /// Base SI unit symbol
    pub unit: &'static str,
}

impl Quantity {
    fn new(symbol: &'static str, value: f64, unit: &'static str) -> Self {
        Self { symbol, value, unit }
    }
}

/// Result of analyzing one circuit at one input sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisResult {
    /// Clipper: conduction state and output voltage
    Clipper(ClipperOutput),
    /// Clamper: output voltage only
    Clamper { vout: f64 },
    ZenerBasic(ZenerBasicResult),
    ZenerLoad(ZenerLoadResult),
    ZenerVariable(ZenerVariableResult),
    /// The spec lacks a field the topology needs: not conducting, zero output
    NotApplicable,
}

impl AnalysisResult {
    /// Diode conduction state. Clampers report none; Zener regulators are
    /// always conducting.
    pub fn state(&self) -> Option<Conduction> {
        match self {
            AnalysisResult::Clipper(out) => Some(out.state),
            AnalysisResult::Clamper { .. } => None,
            AnalysisResult::ZenerBasic(_)
            | AnalysisResult::ZenerLoad(_)
            | AnalysisResult::ZenerVariable(_) => Some(Conduction::Forward),
            AnalysisResult::NotApplicable => Some(Conduction::Reverse),
        }
    }

    /// Output voltage for clippers and clampers; zero otherwise.
    pub fn vout(&self) -> f64 {
        match self {
            AnalysisResult::Clipper(out) => out.vout,
            AnalysisResult::Clamper { vout } => *vout,
            _ => 0.0,
        }
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self, AnalysisResult::NotApplicable)
    }

    /// Every quantity the learner is asked for, in form order.
    pub fn quantities(&self) -> Vec<Quantity> {
        match self {
            AnalysisResult::Clipper(out) => vec![Quantity::new("Vo", out.vout, "V")],
            AnalysisResult::Clamper { vout } => vec![Quantity::new("Vo", *vout, "V")],
            AnalysisResult::ZenerBasic(z) => vec![
                Quantity::new("Vr", z.vr, "V"),
                Quantity::new("Ir", z.ir, "A"),
                Quantity::new("Pr", z.pr, "W"),
                Quantity::new("Pz", z.pz, "W"),
            ],
            AnalysisResult::ZenerLoad(z) => vec![
                Quantity::new("Il", z.il, "A"),
                Quantity::new("Vr_max", z.vr_max, "V"),
                Quantity::new("Vs_max", z.vs_max, "V"),
                Quantity::new("Vr_min", z.vr_min, "V"),
                Quantity::new("Vs_min", z.vs_min, "V"),
            ],
            AnalysisResult::ZenerVariable(z) => vec![
                Quantity::new("Vr", z.vr, "V"),
                Quantity::new("Ir", z.ir, "A"),
                Quantity::new("Il_max", z.il_max, "A"),
                Quantity::new("Il_min", z.il_min, "A"),
                Quantity::new("Rl_max", z.rl_max, "Ω"),
                Quantity::new("Rl_min", z.rl_min, "Ω"),
            ],
            AnalysisResult::NotApplicable => vec![Quantity::new("Vo", 0.0, "V")],
        }
    }
}

/// Analyze `spec` at input sample `vin`.
pub fn analyze(spec: &CircuitSpec, vin: f64) -> AnalysisResult {
    analyze_as(spec.topology, spec, vin)
}

/// Analyze `spec`'s component values under `topology`.
///
/// Zener regulators ignore `vin` and evaluate their single operating point
/// at `spec.vin_peak`.
pub fn analyze_as(topology: Topology, spec: &CircuitSpec, vin: f64) -> AnalysisResult {
    let result = match topology {
        Topology::SeriesClipper => {
            AnalysisResult::Clipper(clipper::series(vin, spec.diode_reversed))
        }
        Topology::ParallelClipper => {
            AnalysisResult::Clipper(clipper::parallel(vin, spec.diode_reversed))
        }
        Topology::SeriesBiasClipper => match spec.bias {
            Some(bias) => {
                AnalysisResult::Clipper(clipper::series_biased(vin, spec.diode_reversed, bias))
            }
            None => not_applicable(topology, "vbias"),
        },
        Topology::ParallelBiasClipper => match spec.bias {
            Some(bias) => {
                AnalysisResult::Clipper(clipper::parallel_biased(vin, spec.diode_reversed, bias))
            }
            None => not_applicable(topology, "vbias"),
        },
        Topology::NoBiasClamper => AnalysisResult::Clamper {
            vout: clamper::clamp(vin, spec.vin_peak, spec.diode_reversed, None),
        },
        Topology::BiasClamper => match spec.bias {
            Some(bias) => AnalysisResult::Clamper {
                vout: clamper::clamp(vin, spec.vin_peak, spec.diode_reversed, Some(bias)),
            },
            None => not_applicable(topology, "vbias"),
        },
        Topology::ZenerBasic => match spec.zener {
            Some(z) => {
                let r = spec.resistors.primary();
                AnalysisResult::ZenerBasic(zener::basic(spec.vin_peak, &z, r))
            }
            None => not_applicable(topology, "vz"),
        },
        Topology::ZenerLoad => match (spec.zener, spec.resistors.load()) {
            (Some(z), Some(r2)) => {
                let r1 = spec.resistors.primary();
                AnalysisResult::ZenerLoad(zener::with_load(&z, r1, r2))
            }
            (None, _) => not_applicable(topology, "vz"),
            (_, None) => not_applicable(topology, "r2"),
        },
        Topology::ZenerVariableLoad => match spec.zener {
            Some(z) => AnalysisResult::ZenerVariable(zener::variable_load(
                spec.vin_peak,
                &z,
                spec.resistors.primary(),
            )),
            None => not_applicable(topology, "vz"),
        },
    };

    trace!("{} at vin={}: {:?}", topology, vin, result);
    result
}

fn not_applicable(topology: Topology, param: &str) -> AnalysisResult {
    warn!("{} analyzed without '{}'; reporting not applicable", topology, param);
    AnalysisResult::NotApplicable
}
