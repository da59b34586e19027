//! Circuit spec validation.

use crate::error::{Result, TutorError};

use super::{CircuitSpec, Family, Resistors, Topology};

/// Validate a circuit spec against its topology.
///
/// Checks:
/// - `vin_peak` and every resistor are finite and positive
/// - Bias is present exactly for the bias clipper/clamper variants
/// - Zener rating is present exactly for the Zener variants, whose diode is reversed
/// - Two resistors exactly for the two-resistor Zener regulator
pub fn validate_spec(spec: &CircuitSpec) -> Result<()> {
    let topology = spec.topology;

    positive("vin_peak", spec.vin_peak)?;

    match spec.resistors {
        Resistors::Single(r) => {
            positive("r1", r)?;
            if topology == Topology::ZenerLoad {
                return Err(TutorError::MissingParameter { topology, param: "r2" });
            }
        }
        Resistors::Pair(r1, r2) => {
            positive("r1", r1)?;
            positive("r2", r2)?;
            if topology != Topology::ZenerLoad {
                return Err(TutorError::UnexpectedParameter { topology, param: "r2" });
            }
        }
    }

    match (topology.is_biased(), spec.bias) {
        (true, None) => {
            return Err(TutorError::MissingParameter {
                topology,
                param: "vbias",
            })
        }
        (false, Some(_)) => {
            return Err(TutorError::UnexpectedParameter {
                topology,
                param: "vbias",
            })
        }
        (true, Some(bias)) => {
            if !bias.vbias.is_finite() || bias.vbias < 0.0 {
                return Err(TutorError::invalid_parameter(
                    "vbias",
                    "must be a non-negative magnitude",
                ));
            }
        }
        (false, None) => {}
    }

    let is_zener = topology.family() == Family::Zener;
    match (is_zener, spec.zener) {
        (true, None) => return Err(TutorError::MissingParameter { topology, param: "vz" }),
        (false, Some(_)) => return Err(TutorError::UnexpectedParameter { topology, param: "vz" }),
        (true, Some(zener)) => {
            positive("vz", zener.vz)?;
            positive("iz_max", zener.iz_max)?;
            if let Some(iz_min) = zener.iz_min {
                if !iz_min.is_finite() || iz_min < 0.0 {
                    return Err(TutorError::invalid_parameter("iz_min", "must be non-negative"));
                }
            }
            if !spec.diode_reversed {
                return Err(TutorError::invalid_parameter(
                    "diode_reversed",
                    "Zener regulators operate in reverse breakdown",
                ));
            }
        }
        (false, None) => {}
    }

    Ok(())
}

fn positive(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TutorError::invalid_parameter(
            param,
            format!("must be a positive finite value, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_specs() {
        let clipper = CircuitSpec::new(Topology::SeriesClipper, 10.0, false, 1.0);
        assert!(validate_spec(&clipper).is_ok());

        let biased = CircuitSpec::new(Topology::BiasClamper, 10.0, true, 1.0).with_bias(4.0, false);
        assert!(validate_spec(&biased).is_ok());

        let zener = CircuitSpec::new(Topology::ZenerLoad, 10.0, true, 1.0)
            .with_resistors(Resistors::Pair(1.0, 2.2))
            .with_zener(4.0, 10.0, None);
        assert!(validate_spec(&zener).is_ok());
    }

    #[test]
    fn test_missing_bias() {
        let spec = CircuitSpec::new(Topology::ParallelBiasClipper, 10.0, false, 1.0);
        assert_eq!(
            validate_spec(&spec),
            Err(TutorError::MissingParameter {
                topology: Topology::ParallelBiasClipper,
                param: "vbias"
            })
        );
    }

    #[test]
    fn test_unexpected_fields() {
        let spec = CircuitSpec::new(Topology::SeriesClipper, 10.0, false, 1.0)
            .with_bias(2.0, false);
        assert!(matches!(
            validate_spec(&spec),
            Err(TutorError::UnexpectedParameter { param: "vbias", .. })
        ));

        let spec = CircuitSpec::new(Topology::NoBiasClamper, 10.0, false, 1.0)
            .with_zener(4.0, 10.0, None);
        assert!(matches!(
            validate_spec(&spec),
            Err(TutorError::UnexpectedParameter { param: "vz", .. })
        ));
    }

    #[test]
    fn test_zener_checks() {
        let single = CircuitSpec::new(Topology::ZenerLoad, 10.0, true, 1.0)
            .with_zener(4.0, 10.0, None);
        assert!(matches!(
            validate_spec(&single),
            Err(TutorError::MissingParameter { param: "r2", .. })
        ));

        let forward = CircuitSpec::new(Topology::ZenerBasic, 10.0, false, 1.0)
            .with_zener(4.0, 10.0, None);
        assert!(matches!(validate_spec(&forward), Err(TutorError::InvalidParameter { .. })));
    }

    #[test]
    fn test_non_positive_values() {
        let spec = CircuitSpec::new(Topology::SeriesClipper, 0.0, false, 1.0);
        assert!(validate_spec(&spec).is_err());

        let spec = CircuitSpec::new(Topology::SeriesClipper, 5.0, false, -1.0);
        assert!(validate_spec(&spec).is_err());
    }
}
