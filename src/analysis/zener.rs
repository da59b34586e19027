//! Zener regulators.
//!
//! Resistor values arrive in kΩ. The single-resistor regulators scale them
//! to Ω, so their currents come out in amperes. The two-resistor regulator
//! works in kΩ and mA throughout.

use crate::circuit::ZenerRating;
use crate::KILO;

/// Single series resistor feeding the Zener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZenerBasicResult {
    /// Voltage across the series resistor
    pub vr: f64,
    /// Current through the series resistor
    pub ir: f64,
    /// Power dissipated in the resistor
    pub pr: f64,
    /// Power dissipated in the Zener
    pub pz: f64,
}

/// Series resistor plus fixed load resistor. Source voltage limits for the
/// Zener current range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZenerLoadResult {
    /// Load current
    pub il: f64,
    /// Series current at minimum Zener current
    pub ir_min: f64,
    /// Series current at maximum Zener current, only derived when no
    /// minimum Zener current is given
    pub ir_max: Option<f64>,
    pub vr_max: f64,
    pub vs_max: f64,
    pub vr_min: f64,
    pub vs_min: f64,
}

/// Series resistor plus variable load. Load limits for the Zener current range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZenerVariableResult {
    pub vr: f64,
    pub ir: f64,
    pub il_max: f64,
    pub il_min: f64,
    /// Load resistance at `il_max`; infinite when no load current flows
    pub rl_max: f64,
    /// Load resistance at `il_min`; infinite when no load current flows
    pub rl_min: f64,
}

pub fn basic(vin_peak: f64, zener: &ZenerRating, r_kohm: f64) -> ZenerBasicResult {
    let r = r_kohm * KILO;
    let vr = vin_peak - zener.vz;
    let ir = vr / r;
    ZenerBasicResult {
        vr,
        ir,
        pr: ir * vr,
        pz: ir * zener.vz,
    }
}

/// Resistors stay in kΩ here, so currents are in mA when the rating's
/// currents are read as mA.
pub fn with_load(zener: &ZenerRating, r1_kohm: f64, r2_kohm: f64) -> ZenerLoadResult {
    let vz = zener.vz;
    let il = vz / r2_kohm;

    // A zero minimum current counts as "not given" here.
    let (iz_min, ir_min, ir_max) = match zener.iz_min.filter(|&i| i != 0.0) {
        Some(iz_min) => (iz_min, iz_min + il, None),
        None => (0.0, il, Some(zener.iz_max + il)),
    };

    let vr_max = zener.iz_max * r1_kohm;
    let vr_min = iz_min * r1_kohm;
    ZenerLoadResult {
        il,
        ir_min,
        ir_max,
        vr_max,
        vs_max: vr_max + vz,
        vr_min,
        vs_min: vr_min + vz,
    }
}

pub fn variable_load(vin_peak: f64, zener: &ZenerRating, r_kohm: f64) -> ZenerVariableResult {
    let r = r_kohm * KILO;
    let vz = zener.vz;
    let vr = vin_peak - vz;
    let ir = vr / r;
    let il_max = ir - zener.iz_max;
    let il_min = match zener.iz_min {
        Some(iz_min) => ir - iz_min,
        None => ir,
    };

    ZenerVariableResult {
        vr,
        ir,
        il_max,
        il_min,
        rl_max: load_resistance(vz, il_max),
        rl_min: load_resistance(vz, il_min),
    }
}

/// `vz / il`, with an unloaded regulator reading as infinite resistance.
fn load_resistance(vz: f64, il: f64) -> f64 {
    if il == 0.0 {
        f64::INFINITY
    } else {
        vz / il
    }
}
