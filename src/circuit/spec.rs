//! Generated circuit instance.

use std::fmt;

use super::{Bias, Resistors, Topology, ZenerRating};
use crate::format::EngineeringValue;
use crate::KILO;

/// An immutable description of one generated circuit.
///
/// Only the fields relevant to `topology` are populated; see
/// [`validate_spec`](super::validate_spec) for the exact rule. A spec is
/// produced once per "new circuit" request and read by the analyzer on every
/// grading request while the circuit is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitSpec {
    /// Circuit topology
    pub topology: Topology,
    /// Peak input amplitude in volts
    pub vin_peak: f64,
    /// Primary diode drawn reversed
    pub diode_reversed: bool,
    /// Bias source (bias clipper/clamper variants only)
    pub bias: Option<Bias>,
    /// Resistor value(s) in kΩ
    pub resistors: Resistors,
    /// Zener rating (Zener variants only)
    pub zener: Option<ZenerRating>,
}

impl CircuitSpec {
    /// Create a spec with a single resistor and no optional fields.
    pub fn new(topology: Topology, vin_peak: f64, diode_reversed: bool, r_kohm: f64) -> Self {
        Self {
            topology,
            vin_peak,
            diode_reversed,
            bias: None,
            resistors: Resistors::Single(r_kohm),
            zener: None,
        }
    }

    /// Attach a bias source.
    pub fn with_bias(mut self, vbias: f64, reversed: bool) -> Self {
        self.bias = Some(Bias::new(vbias, reversed));
        self
    }

    /// Replace the resistor set.
    pub fn with_resistors(mut self, resistors: Resistors) -> Self {
        self.resistors = resistors;
        self
    }

    /// Attach a Zener rating.
    pub fn with_zener(mut self, vz: f64, iz_max: f64, iz_min: Option<f64>) -> Self {
        self.zener = Some(ZenerRating::new(vz, iz_max, iz_min));
        self
    }
}

/// Component values in engineering notation, one per line.
impl fmt::Display for CircuitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.topology.label())?;
        write!(f, "\nVin: {}", EngineeringValue::new(self.vin_peak, "V"))?;

        match self.resistors {
            Resistors::Single(r) => {
                write!(f, "\nResistor: {}", EngineeringValue::new(r * KILO, "Ω"))?
            }
            Resistors::Pair(r1, r2) => write!(
                f,
                "\nResistors: R1={}, R2={}",
                EngineeringValue::new(r1 * KILO, "Ω"),
                EngineeringValue::new(r2 * KILO, "Ω")
            )?,
        }

        let diode = if self.diode_reversed { "Reverse" } else { "Forward" };
        write!(f, "\nDiode: {} biased", diode)?;

        if let Some(zener) = self.zener {
            write!(f, "\nZener Voltage (Vz): {}", EngineeringValue::new(zener.vz, "V"))?;
            let iz_max = EngineeringValue::new(zener.iz_max, "A");
            write!(f, "\nZener Max Current (Iz_max): {}", iz_max)?;
            match zener.iz_min {
                Some(iz_min) => {
                    let iz_min = EngineeringValue::new(iz_min, "A");
                    write!(f, "\nZener Min Current (Iz_min): {}", iz_min)?
                }
                None => write!(f, "\nZener Min Current (Iz_min): N/A")?,
            }
        }

        if let Some(bias) = self.bias {
            let polarity = if bias.reversed { "Reversed" } else { "Forward" };
            write!(f, "\nBias: {} ({})", EngineeringValue::new(bias.vbias, "V"), polarity)?;
        }
        Ok(())
    }
}
