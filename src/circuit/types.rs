//! Core types for circuit description.

use std::fmt;
use std::str::FromStr;

use crate::error::TutorError;

/// The nine circuit topologies the tutor can generate and analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topology {
    /// Diode in series with a load resistor
    SeriesClipper,
    /// Series clipper with a DC bias source in the diode branch
    SeriesBiasClipper,
    /// Diode across the output, series resistor from the source
    ParallelClipper,
    /// Parallel clipper with a DC bias source in the diode branch
    ParallelBiasClipper,
    /// Capacitor + diode clamper
    NoBiasClamper,
    /// Clamper with a DC bias source in the diode branch
    BiasClamper,
    /// Zener regulator with a single series resistor
    ZenerBasic,
    /// Zener regulator with series resistor and load resistor
    ZenerLoad,
    /// Zener regulator driving a variable load
    ZenerVariableLoad,
}

/// Topology families. Each family shares a form shape and a sampling rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Clipper,
    Clamper,
    Zener,
}

impl Topology {
    /// Every topology, in menu order.
    pub const ALL: [Topology; 9] = [
        Topology::SeriesClipper,
        Topology::SeriesBiasClipper,
        Topology::ParallelClipper,
        Topology::ParallelBiasClipper,
        Topology::NoBiasClamper,
        Topology::BiasClamper,
        Topology::ZenerBasic,
        Topology::ZenerLoad,
        Topology::ZenerVariableLoad,
    ];

    /// Canonical identifier, e.g. `series_biasclipper`.
    pub fn name(&self) -> &'static str {
        match self {
            Topology::SeriesClipper => "series_clipper",
            Topology::SeriesBiasClipper => "series_biasclipper",
            Topology::ParallelClipper => "parallel_clipper",
            Topology::ParallelBiasClipper => "parallel_biasclipper",
            Topology::NoBiasClamper => "nobias_clamper",
            Topology::BiasClamper => "bias_clamper",
            Topology::ZenerBasic => "zener_diode1",
            Topology::ZenerLoad => "zener_diode2",
            Topology::ZenerVariableLoad => "zener_diode3",
        }
    }

    /// Human-readable title.
    pub fn label(&self) -> &'static str {
        match self {
            Topology::SeriesClipper => "Series Clipper",
            Topology::SeriesBiasClipper => "Series Bias Clipper",
            Topology::ParallelClipper => "Parallel Clipper",
            Topology::ParallelBiasClipper => "Parallel Bias Clipper",
            Topology::NoBiasClamper => "No Bias Clamper",
            Topology::BiasClamper => "Bias Clamper",
            Topology::ZenerBasic => "Zener Diode (Basic)",
            Topology::ZenerLoad => "Zener Diode (Two Resistors)",
            Topology::ZenerVariableLoad => "Zener Diode (Variable Resistor)",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Topology::SeriesClipper
            | Topology::SeriesBiasClipper
            | Topology::ParallelClipper
            | Topology::ParallelBiasClipper => Family::Clipper,
            Topology::NoBiasClamper | Topology::BiasClamper => Family::Clamper,
            Topology::ZenerBasic | Topology::ZenerLoad | Topology::ZenerVariableLoad => {
                Family::Zener
            }
        }
    }

    /// Whether the diode branch carries a DC bias source.
    pub fn is_biased(&self) -> bool {
        matches!(
            self,
            Topology::SeriesBiasClipper | Topology::ParallelBiasClipper | Topology::BiasClamper
        )
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Topology {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Topology::ALL
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .ok_or_else(|| TutorError::unknown_topology(name))
    }
}

/// Diode conduction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conduction {
    /// Forward biased (FB): current flows through the diode
    Forward,
    /// Reverse biased (RB): the diode blocks
    Reverse,
}

impl Conduction {
    /// Short form used on answer sheets.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Conduction::Forward => "FB",
            Conduction::Reverse => "RB",
        }
    }
}

impl fmt::Display for Conduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}

impl FromStr for Conduction {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FB" | "F" | "FORWARD" => Ok(Conduction::Forward),
            "RB" | "R" | "REVERSE" => Ok(Conduction::Reverse),
            other => Err(TutorError::invalid_parameter(
                "state",
                format!("expected FB or RB, got '{}'", other),
            )),
        }
    }
}

/// DC bias source in series with the diode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bias {
    /// Bias magnitude in volts (always >= 0)
    pub vbias: f64,
    /// Source drawn with reversed polarity
    pub reversed: bool,
}

impl Bias {
    pub fn new(vbias: f64, reversed: bool) -> Self {
        Self { vbias, reversed }
    }
}

/// Resistor values in kΩ, as drawn on the schematic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resistors {
    Single(f64),
    /// Series resistor and load resistor
    Pair(f64, f64),
}

impl Resistors {
    /// The series (first) resistor in kΩ.
    pub fn primary(&self) -> f64 {
        match *self {
            Resistors::Single(r) | Resistors::Pair(r, _) => r,
        }
    }

    /// The load (second) resistor in kΩ, if the circuit has one.
    pub fn load(&self) -> Option<f64> {
        match *self {
            Resistors::Single(_) => None,
            Resistors::Pair(_, r2) => Some(r2),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Resistors::Single(_) => 1,
            Resistors::Pair(..) => 2,
        }
    }
}

/// Zener diode rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZenerRating {
    /// Zener (breakdown) voltage in volts
    pub vz: f64,
    /// Maximum Zener current
    pub iz_max: f64,
    /// Minimum Zener current. `None` and `Some(0.0)` are kept apart:
    /// the two-resistor regulator branches on them differently.
    pub iz_min: Option<f64>,
}

impl ZenerRating {
    pub fn new(vz: f64, iz_max: f64, iz_min: Option<f64>) -> Self {
        Self { vz, iz_max, iz_min }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_names_round_trip() {
        for t in Topology::ALL {
            assert_eq!(t.name().parse::<Topology>().unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_topology() {
        let err = "full_wave_rectifier".parse::<Topology>().unwrap_err();
        assert_eq!(
            err,
            TutorError::UnknownTopology {
                name: "full_wave_rectifier".to_string()
            }
        );
    }

    #[test]
    fn test_families() {
        assert_eq!(Topology::ParallelBiasClipper.family(), Family::Clipper);
        assert_eq!(Topology::BiasClamper.family(), Family::Clamper);
        assert_eq!(Topology::ZenerVariableLoad.family(), Family::Zener);
        assert!(Topology::BiasClamper.is_biased());
        assert!(!Topology::ZenerLoad.is_biased());
    }

    #[test]
    fn test_conduction_parse() {
        assert_eq!("fb".parse::<Conduction>().unwrap(), Conduction::Forward);
        assert_eq!("RB".parse::<Conduction>().unwrap(), Conduction::Reverse);
        assert!("on".parse::<Conduction>().is_err());
    }

    #[test]
    fn test_resistors() {
        let r = Resistors::Pair(1.2, 4.7);
        assert_eq!(r.primary(), 1.2);
        assert_eq!(r.load(), Some(4.7));
        assert_eq!(Resistors::Single(2.0).load(), None);
    }
}
