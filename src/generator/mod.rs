//! Randomized circuit parameters.
//!
//! [`ParameterGenerator`] samples component values for a requested topology
//! inside ranges that keep the circuit pedagogically meaningful. All ranges
//! live in [`GeneratorConfig`].
//!
//! Sampling rules by family:
//! - Clippers and clampers: `vin_peak` in [5, 20] V (0.1 V steps), random
//!   diode polarity, one resistor in [0.22, 10] kΩ. Biased variants add
//!   `vbias` in [2, 10] V with an independent random polarity.
//! - Zener regulators: diode always reversed. `vz` is drawn from
//!   [0.2, 0.8] × `vin_peak` 80% of the time and from the stress region
//!   [0.8, 1.2] × `vin_peak` otherwise, so some circuits cannot regulate.
//!   `iz_min` is present 20% of the time.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::circuit::{CircuitSpec, Resistors, Topology, ZenerRating};

/// Closed sampling interval. `lo > hi` is allowed and samples the same span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub lo: f64,
    pub hi: f64,
}

impl Range {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// `lo + (hi - lo) * u` for `u` in `[0, 1)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.random();
        self.lo + (self.hi - self.lo) * u
    }

    /// Scale both ends by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.lo * factor, self.hi * factor)
    }

    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.lo <= self.hi { (self.lo, self.hi) } else { (self.hi, self.lo) };
        value >= lo && value <= hi
    }
}

/// Sampling ranges for circuit generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Peak input for every topology except the variable-load Zener (V)
    pub vin_peak: Range,
    /// Peak input for the variable-load Zener (V)
    pub vin_peak_variable_zener: Range,
    /// Resistor range (kΩ)
    pub resistance: Range,
    /// Series resistor range for the variable-load Zener (kΩ)
    pub resistance_variable_zener: Range,
    /// Bias source magnitude (V)
    pub vbias: Range,
    pub iz_max: Range,
    pub iz_max_variable_zener: Range,
    /// `vz` as a fraction of `vin_peak` in the regulating region
    pub vz_normal_fraction: Range,
    /// `vz` as a fraction of `vin_peak` in the stress region
    pub vz_stress_fraction: Range,
    /// Probability of drawing `vz` from the regulating region
    pub vz_normal_probability: f64,
    /// Probability that `iz_min` is given
    pub iz_min_probability: f64,
    /// Lower end of the `iz_min` draw
    pub iz_min_floor: f64,
    /// Upper end of the `iz_min` draw as a fraction of `iz_max`
    pub iz_min_ceiling_fraction: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            vin_peak: Range::new(5.0, 20.0),
            vin_peak_variable_zener: Range::new(20.0, 75.0),
            resistance: Range::new(0.220, 10.0),
            resistance_variable_zener: Range::new(0.220, 1.500),
            vbias: Range::new(2.0, 10.0),
            iz_max: Range::new(5.0, 30.0),
            iz_max_variable_zener: Range::new(2.0, 25.0),
            vz_normal_fraction: Range::new(0.2, 0.8),
            vz_stress_fraction: Range::new(0.8, 1.2),
            vz_normal_probability: 0.8,
            iz_min_probability: 0.2,
            iz_min_floor: 1.0,
            iz_min_ceiling_fraction: 0.2,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the peak input range for clippers, clampers and the fixed-load Zeners.
    pub fn with_vin_peak(mut self, lo: f64, hi: f64) -> Self {
        self.vin_peak = Range::new(lo, hi);
        self
    }

    /// Set the resistor range (kΩ).
    pub fn with_resistance(mut self, lo: f64, hi: f64) -> Self {
        self.resistance = Range::new(lo, hi);
        self
    }

    /// Set the bias magnitude range.
    pub fn with_vbias(mut self, lo: f64, hi: f64) -> Self {
        self.vbias = Range::new(lo, hi);
        self
    }

    /// Set the probability of a regulating `vz`.
    ///
    /// 1.0 never produces a stress-region Zener voltage.
    pub fn with_vz_normal_probability(mut self, p: f64) -> Self {
        self.vz_normal_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Set the probability that `iz_min` is given.
    pub fn with_iz_min_probability(mut self, p: f64) -> Self {
        self.iz_min_probability = p.clamp(0.0, 1.0);
        self
    }
}

/// Round to one decimal place, the resolution values are shown at.
fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Samples [`CircuitSpec`]s.
pub struct ParameterGenerator<R: Rng = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl ParameterGenerator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a reproducible generator.
    pub fn seeded(config: GeneratorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParameterGenerator<R> {
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Generate a circuit of the given topology.
    pub fn generate(&mut self, topology: Topology) -> CircuitSpec {
        let spec = match topology {
            Topology::SeriesClipper | Topology::ParallelClipper | Topology::NoBiasClamper => {
                self.unbiased(topology)
            }
            Topology::SeriesBiasClipper | Topology::ParallelBiasClipper | Topology::BiasClamper => {
                self.biased(topology)
            }
            Topology::ZenerBasic | Topology::ZenerLoad | Topology::ZenerVariableLoad => {
                self.zener(topology)
            }
        };

        debug!(
            "generated {}: vin_peak={} reversed={} bias={:?} resistors={:?} zener={:?}",
            spec.topology, spec.vin_peak, spec.diode_reversed, spec.bias, spec.resistors, spec.zener
        );
        spec
    }

    fn vin_peak(&mut self, topology: Topology) -> f64 {
        let range = if topology == Topology::ZenerVariableLoad {
            self.config.vin_peak_variable_zener
        } else {
            self.config.vin_peak
        };
        round_tenth(range.sample(&mut self.rng))
    }

    fn unbiased(&mut self, topology: Topology) -> CircuitSpec {
        let vin_peak = self.vin_peak(topology);
        let diode_reversed = self.rng.random::<bool>();
        let r = self.config.resistance.sample(&mut self.rng);
        CircuitSpec::new(topology, vin_peak, diode_reversed, r)
    }

    fn biased(&mut self, topology: Topology) -> CircuitSpec {
        let vin_peak = self.vin_peak(topology);
        let diode_reversed = self.rng.random::<bool>();
        let vbias = self.config.vbias.sample(&mut self.rng);
        let vbias_reversed = self.rng.random::<bool>();
        let r = self.config.resistance.sample(&mut self.rng);
        CircuitSpec::new(topology, vin_peak, diode_reversed, r).with_bias(vbias, vbias_reversed)
    }

    fn zener(&mut self, topology: Topology) -> CircuitSpec {
        let vin_peak = self.vin_peak(topology);
        let rating = self.zener_rating(topology, vin_peak);

        let resistors = match topology {
            Topology::ZenerLoad => Resistors::Pair(
                self.config.resistance.sample(&mut self.rng),
                self.config.resistance.sample(&mut self.rng),
            ),
            Topology::ZenerVariableLoad => {
                Resistors::Single(self.config.resistance_variable_zener.sample(&mut self.rng))
            }
            _ => Resistors::Single(self.config.resistance.sample(&mut self.rng)),
        };

        CircuitSpec {
            topology,
            vin_peak,
            diode_reversed: true,
            bias: None,
            resistors,
            zener: Some(rating),
        }
    }

    fn zener_rating(&mut self, topology: Topology, vin_peak: f64) -> ZenerRating {
        let fraction = if self.rng.random::<f64>() < self.config.vz_normal_probability {
            self.config.vz_normal_fraction
        } else {
            self.config.vz_stress_fraction
        };
        let vz = round_tenth(fraction.scaled(vin_peak).sample(&mut self.rng));

        let iz_max_range = if topology == Topology::ZenerVariableLoad {
            self.config.iz_max_variable_zener
        } else {
            self.config.iz_max
        };
        let iz_max = iz_max_range.sample(&mut self.rng);

        // For small iz_max the ceiling falls below the floor; the draw then
        // spans [ceiling, floor].
        let iz_min = if self.rng.random::<f64>() < self.config.iz_min_probability {
            let ceiling = iz_max * self.config.iz_min_ceiling_fraction;
            let range = Range::new(self.config.iz_min_floor, ceiling);
            Some(range.sample(&mut self.rng))
        } else {
            None
        };

        ZenerRating::new(vz, iz_max, iz_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::validate_spec;

    const DRAWS: usize = 500;

    fn generator(seed: u64) -> ParameterGenerator {
        ParameterGenerator::seeded(GeneratorConfig::default(), seed)
    }

    #[test]
    fn test_every_topology_validates() {
        let mut gen = generator(7);
        for _ in 0..50 {
            for topology in Topology::ALL {
                let spec = gen.generate(topology);
                assert_eq!(spec.topology, topology);
                validate_spec(&spec).unwrap();
            }
        }
    }

    #[test]
    fn test_clipper_ranges() {
        let mut gen = generator(1);
        let mut saw_reversed = false;
        let mut saw_forward = false;
        for _ in 0..DRAWS {
            let spec = gen.generate(Topology::SeriesClipper);
            assert!((5.0..=20.0).contains(&spec.vin_peak));
            assert!((spec.vin_peak * 10.0 - (spec.vin_peak * 10.0).round()).abs() < 1e-9);
            assert!((0.220..=10.0).contains(&spec.resistors.primary()));
            assert!(spec.bias.is_none() && spec.zener.is_none());
            saw_reversed |= spec.diode_reversed;
            saw_forward |= !spec.diode_reversed;
        }
        assert!(saw_reversed && saw_forward);
    }

    #[test]
    fn test_bias_ranges() {
        let mut gen = generator(2);
        let mut polarities = [false; 2];
        for _ in 0..DRAWS {
            let spec = gen.generate(Topology::ParallelBiasClipper);
            let bias = spec.bias.unwrap();
            assert!((2.0..=10.0).contains(&bias.vbias));
            polarities[bias.reversed as usize] = true;
        }
        assert!(polarities.iter().all(|&p| p));
    }

    #[test]
    fn test_zener_ranges() {
        let mut gen = generator(3);
        let mut stress = 0;
        let mut with_iz_min = 0;
        for _ in 0..DRAWS {
            let spec = gen.generate(Topology::ZenerBasic);
            let zener = spec.zener.unwrap();
            assert!(spec.diode_reversed);
            assert!((5.0..=20.0).contains(&spec.vin_peak));
            assert!((5.0..=30.0).contains(&zener.iz_max));
            // vz is rounded to 0.1 V after scaling
            assert!(zener.vz >= spec.vin_peak * 0.2 - 0.051);
            assert!(zener.vz <= spec.vin_peak * 1.2 + 0.051);
            if zener.vz > spec.vin_peak * 0.8 + 0.051 {
                stress += 1;
            }
            if let Some(iz_min) = zener.iz_min {
                with_iz_min += 1;
                assert!(iz_min >= 1.0 && iz_min <= zener.iz_max * 0.2);
            }
        }
        assert!(stress > 0 && stress < DRAWS / 2);
        assert!(with_iz_min > 0 && with_iz_min < DRAWS / 2);
    }

    #[test]
    fn test_variable_load_ranges() {
        let mut gen = generator(4);
        for _ in 0..DRAWS {
            let spec = gen.generate(Topology::ZenerVariableLoad);
            let zener = spec.zener.unwrap();
            assert!((20.0..=75.0).contains(&spec.vin_peak));
            assert!((0.220..=1.500).contains(&spec.resistors.primary()));
            assert!((2.0..=25.0).contains(&zener.iz_max));
            if let Some(iz_min) = zener.iz_min {
                let span = Range::new(1.0, zener.iz_max * 0.2);
                assert!(span.contains(iz_min));
            }
        }
    }

    #[test]
    fn test_load_zener_has_two_resistors() {
        let mut gen = generator(5);
        let spec = gen.generate(Topology::ZenerLoad);
        assert_eq!(spec.resistors.count(), 2);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generator(42).generate(Topology::BiasClamper);
        let b = generator(42).generate(Topology::BiasClamper);
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_probabilities() {
        let config = GeneratorConfig::new()
            .with_vz_normal_probability(1.0)
            .with_iz_min_probability(0.0);
        let mut gen = ParameterGenerator::seeded(config, 9);
        for _ in 0..DRAWS {
            let spec = gen.generate(Topology::ZenerLoad);
            let zener = spec.zener.unwrap();
            assert!(zener.vz <= spec.vin_peak * 0.8 + 0.051);
            assert!(zener.iz_min.is_none());
        }
    }

    #[test]
    fn test_config_ranges() {
        let config = GeneratorConfig::new()
            .with_vin_peak(8.0, 9.0)
            .with_resistance(1.0, 2.0)
            .with_vbias(3.0, 4.0);
        let mut gen = ParameterGenerator::seeded(config, 10);
        for _ in 0..DRAWS {
            let spec = gen.generate(Topology::SeriesBiasClipper);
            assert!((8.0..=9.0).contains(&spec.vin_peak));
            assert!((1.0..=2.0).contains(&spec.resistors.primary()));
            assert!((3.0..=4.0).contains(&spec.bias.unwrap().vbias));
        }
    }

    #[test]
    fn test_range_reversed_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        let range = Range::new(1.0, 0.4);
        for _ in 0..100 {
            let x = range.sample(&mut rng);
            assert!(x > 0.4 - 1e-12 && x <= 1.0);
        }
    }
}
