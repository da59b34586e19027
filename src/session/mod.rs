//! Caller-owned quiz state.
//!
//! The engine holds no state between calls. A [`QuizSession`] carries the
//! current circuit and the last grade report; each operation takes the
//! session by value and hands back the updated one.

use rand::Rng;

use crate::analysis::AnalysisResult;
use crate::circuit::{CircuitSpec, Topology};
use crate::error::{Result, TutorError};
use crate::generator::ParameterGenerator;
use crate::grading::{answer_key, grade, AnswerSheet, GradeReport};

/// Current circuit and last grading outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSession {
    circuit: Option<CircuitSpec>,
    report: Option<GradeReport>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the circuit and forget the last report.
    pub fn start(self, spec: CircuitSpec) -> Self {
        Self {
            circuit: Some(spec),
            report: None,
        }
    }

    /// Generate a fresh circuit of `topology` and start on it.
    pub fn new_circuit<R: Rng>(
        self,
        generator: &mut ParameterGenerator<R>,
        topology: Topology,
    ) -> Self {
        self.start(generator.generate(topology))
    }

    pub fn circuit(&self) -> Option<&CircuitSpec> {
        self.circuit.as_ref()
    }

    pub fn report(&self) -> Option<&GradeReport> {
        self.report.as_ref()
    }

    fn require_circuit(&self) -> Result<&CircuitSpec> {
        self.circuit.as_ref().ok_or(TutorError::NoCircuit)
    }

    /// Grade `sheet` against the current circuit and keep the report.
    pub fn submit(self, sheet: &AnswerSheet) -> Result<Self> {
        let report = grade(self.require_circuit()?, sheet)?;
        Ok(Self {
            report: Some(report),
            ..self
        })
    }

    /// Correct results at every sample point of the current circuit.
    pub fn answer_key(&self) -> Result<Vec<(f64, AnalysisResult)>> {
        Ok(answer_key(self.require_circuit()?))
    }

    /// Circuit parameters in engineering notation, one per line.
    pub fn describe(&self) -> Result<String> {
        Ok(self.require_circuit()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Conduction, Resistors};
    use crate::generator::GeneratorConfig;
    use crate::grading::ClipperAnswer;

    #[test]
    fn test_empty_session_has_no_circuit() {
        let session = QuizSession::new();
        assert_eq!(session.describe(), Err(TutorError::NoCircuit));
        assert_eq!(session.answer_key(), Err(TutorError::NoCircuit));
        let sheet = AnswerSheet::Clamper(vec![0.0; 5]);
        assert_eq!(session.submit(&sheet), Err(TutorError::NoCircuit));
    }

    #[test]
    fn test_submit_keeps_report_and_start_clears_it() {
        let spec = CircuitSpec::new(Topology::ParallelClipper, 8.0, false, 1.0);
        let session = QuizSession::new().start(spec.clone());
        let sheet = AnswerSheet::Clipper(vec![
            ClipperAnswer::new(Conduction::Forward, 0.0),
            ClipperAnswer::new(Conduction::Forward, 0.0),
            ClipperAnswer::new(Conduction::Reverse, 0.0),
            ClipperAnswer::new(Conduction::Reverse, -5.5),
            ClipperAnswer::new(Conduction::Reverse, -8.0),
        ]);

        let session = session.submit(&sheet).unwrap();
        assert!(session.report().unwrap().all_correct());
        assert_eq!(session.circuit(), Some(&spec));

        let session = session.start(spec);
        assert!(session.report().is_none());
    }

    #[test]
    fn test_new_circuit_from_generator() {
        let mut generator = ParameterGenerator::seeded(GeneratorConfig::default(), 11);
        let session = QuizSession::new().new_circuit(&mut generator, Topology::ZenerLoad);
        let key = session.answer_key().unwrap();
        assert_eq!(key.len(), 1);
        assert!(key[0].1.is_applicable());
    }

    #[test]
    fn test_describe() {
        let spec = CircuitSpec::new(Topology::BiasClamper, 12.5, true, 4.7).with_bias(3.2, true);
        let text = QuizSession::new().start(spec).describe().unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Bias Clamper",
                "Vin: 12.5V",
                "Resistor: 4.7kΩ",
                "Diode: Reverse biased",
                "Bias: 3.2V (Reversed)",
            ]
        );

        let spec = CircuitSpec::new(Topology::ZenerLoad, 10.0, true, 1.0)
            .with_resistors(Resistors::Pair(0.22, 2.2))
            .with_zener(4.0, 12.0, None);
        let text = spec.to_string();
        assert!(text.contains("Resistors: R1=220Ω, R2=2.2kΩ"));
        assert!(text.contains("Zener Min Current (Iz_min): N/A"));
    }
}
