//! Capacitor-diode clampers.
//!
//! The capacitor charges to the peak input (offset by the bias source when
//! there is one) and the output is the input shifted by that DC level. No
//! conduction state is reported for clampers.

use crate::circuit::Bias;

/// DC level the capacitor charges to. The output is `vin - shift`.
pub fn shift(vin_peak: f64, diode_reversed: bool, bias: Option<Bias>) -> f64 {
    match (diode_reversed, bias) {
        (false, None) => vin_peak,
        (true, None) => -vin_peak,
        (false, Some(b)) if !b.reversed => vin_peak - b.vbias,
        (false, Some(b)) => vin_peak + b.vbias,
        (true, Some(b)) if !b.reversed => -(vin_peak + b.vbias),
        (true, Some(b)) => -(vin_peak - b.vbias),
    }
}

/// Clamped output voltage at `vin`.
pub fn clamp(vin: f64, vin_peak: f64, diode_reversed: bool, bias: Option<Bias>) -> f64 {
    vin - shift(vin_peak, diode_reversed, bias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_unbiased_touches_zero() {
        assert_abs_diff_eq!(clamp(12.0, 12.0, false, None), 0.0);
        assert_abs_diff_eq!(clamp(-12.0, 12.0, false, None), -24.0);
        assert_abs_diff_eq!(clamp(-12.0, 12.0, true, None), 0.0);
        assert_abs_diff_eq!(clamp(12.0, 12.0, true, None), 24.0);
    }

    #[test]
    fn test_biased_at_peak() {
        let peak = 10.0;
        let fwd = Some(Bias::new(3.0, false));
        let rev = Some(Bias::new(3.0, true));

        assert_abs_diff_eq!(clamp(peak, peak, false, fwd), peak - (peak - 3.0));
        assert_abs_diff_eq!(clamp(peak, peak, false, rev), peak - (peak + 3.0));
        assert_abs_diff_eq!(clamp(peak, peak, true, fwd), peak + (peak + 3.0));
        assert_abs_diff_eq!(clamp(peak, peak, true, rev), peak + (peak - 3.0));
    }

    #[test]
    fn test_shift_levels() {
        let fwd = Some(Bias::new(2.5, false));
        let rev = Some(Bias::new(2.5, true));
        assert_abs_diff_eq!(shift(8.0, false, None), 8.0);
        assert_abs_diff_eq!(shift(8.0, true, None), -8.0);
        assert_abs_diff_eq!(shift(8.0, false, fwd), 5.5);
        assert_abs_diff_eq!(shift(8.0, false, rev), 10.5);
        assert_abs_diff_eq!(shift(8.0, true, fwd), -10.5);
        assert_abs_diff_eq!(shift(8.0, true, rev), -5.5);
    }

    #[test]
    fn test_clamp_keeps_waveform_shape() {
        let bias = Some(Bias::new(2.5, true));
        let swing = clamp(8.0, 8.0, true, bias) - clamp(-8.0, 8.0, true, bias);
        assert_abs_diff_eq!(swing, 16.0, epsilon = 1e-12);
    }
}
