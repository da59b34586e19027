//! Answer sheets and grading.
//!
//! Clippers and clampers are graded at five input samples:
//! `vin_peak`, `vin_peak - 2.5`, `0`, `-(vin_peak - 2.5)`, `-vin_peak`.
//! Zener regulators are graded at their single operating point. A value is
//! accepted when it lies within [`GRADING_TOLERANCE`] of the correct one;
//! clipper rows also require the FB/RB state to match.

use std::fmt;

use crate::analysis::{analyze, AnalysisResult};
use crate::circuit::{CircuitSpec, Conduction, Family, Topology};
use crate::error::{Result, TutorError};
use crate::format::{parse_engineering, to_engineering};
use crate::{GRADING_TOLERANCE, SAMPLE_OFFSET};

/// Number of rows on a clipper or clamper sheet.
pub const SAMPLE_COUNT: usize = 5;

/// Zener sheet layouts: (symbol, unit) in form order.
const ZENER_BASIC_FIELDS: [(&str, &str); 4] = [("Vr", "V"), ("Ir", "A"), ("Pr", "W"), ("Pz", "W")];
const ZENER_LOAD_FIELDS: [(&str, &str); 5] = [
    ("Il", "A"),
    ("Vr_max", "V"),
    ("Vs_max", "V"),
    ("Vr_min", "V"),
    ("Vs_min", "V"),
];
const ZENER_VARIABLE_FIELDS: [(&str, &str); 6] = [
    ("Vr", "V"),
    ("Ir", "A"),
    ("Il_max", "A"),
    ("Il_min", "A"),
    ("Rl_max", "Ω"),
    ("Rl_min", "Ω"),
];

/// Input samples at which `spec` is graded.
pub fn sample_points(spec: &CircuitSpec) -> Vec<f64> {
    let peak = spec.vin_peak;
    match spec.topology.family() {
        Family::Zener => vec![peak],
        Family::Clipper | Family::Clamper => vec![
            peak,
            peak - SAMPLE_OFFSET,
            0.0,
            -(peak - SAMPLE_OFFSET),
            -peak,
        ],
    }
}

/// Correct result at every sample point.
pub fn answer_key(spec: &CircuitSpec) -> Vec<(f64, AnalysisResult)> {
    sample_points(spec)
        .into_iter()
        .map(|vin| (vin, analyze(spec, vin)))
        .collect()
}

/// Whether a submitted value is close enough to the correct one.
///
/// An infinite correct value only accepts the same infinity.
pub fn within_tolerance(submitted: f64, correct: f64) -> bool {
    if correct.is_infinite() {
        submitted == correct
    } else {
        (submitted - correct).abs() < GRADING_TOLERANCE
    }
}

/// One clipper row as entered by the learner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipperAnswer {
    pub state: Conduction,
    pub vout: f64,
}

impl ClipperAnswer {
    pub fn new(state: Conduction, vout: f64) -> Self {
        Self { state, vout }
    }
}

/// The learner's answers, one shape per form.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerSheet {
    /// One row per sample point
    Clipper(Vec<ClipperAnswer>),
    /// One output voltage per sample point
    Clamper(Vec<f64>),
    ZenerBasic {
        vr: f64,
        ir: f64,
        pr: f64,
        pz: f64,
    },
    ZenerLoad {
        il: f64,
        vr_max: f64,
        vs_max: f64,
        vr_min: f64,
        vs_min: f64,
    },
    ZenerVariable {
        vr: f64,
        ir: f64,
        il_max: f64,
        il_min: f64,
        rl_max: f64,
        rl_min: f64,
    },
}

impl AnswerSheet {
    /// Short description of the sheet shape, for error messages.
    pub fn kind(&self) -> String {
        match self {
            AnswerSheet::Clipper(rows) => format!("{} clipper rows", rows.len()),
            AnswerSheet::Clamper(rows) => format!("{} clamper rows", rows.len()),
            AnswerSheet::ZenerBasic { .. } => "basic Zener answers".to_string(),
            AnswerSheet::ZenerLoad { .. } => "two-resistor Zener answers".to_string(),
            AnswerSheet::ZenerVariable { .. } => "variable-load Zener answers".to_string(),
        }
    }

    /// Parse answer tokens for `topology`.
    ///
    /// Clippers take `FB:<vout>` / `RB:<vout>` tokens, clampers plain
    /// voltages, Zeners the sheet fields in form order. Numbers may carry
    /// an SI prefix and unit, e.g. `3mA` or `4.7kΩ`.
    pub fn parse<S: AsRef<str>>(topology: Topology, tokens: &[S]) -> Result<Self> {
        match topology.family() {
            Family::Clipper => {
                let rows = tokens
                    .iter()
                    .map(|t| parse_clipper_token(t.as_ref()))
                    .collect::<Result<Vec<_>>>()?;
                Ok(AnswerSheet::Clipper(rows))
            }
            Family::Clamper => {
                let rows = tokens
                    .iter()
                    .map(|t| parse_number(t.as_ref(), "V"))
                    .collect::<Result<Vec<_>>>()?;
                Ok(AnswerSheet::Clamper(rows))
            }
            Family::Zener => {
                let fields = zener_fields(topology);
                if tokens.len() != fields.len() {
                    return Err(TutorError::answer_mismatch(
                        format!("{} values ({})", fields.len(), field_list(fields)),
                        format!("{} values", tokens.len()),
                    ));
                }
                let v = tokens
                    .iter()
                    .zip(fields)
                    .map(|(t, (_, unit))| parse_number(t.as_ref(), unit))
                    .collect::<Result<Vec<_>>>()?;
                Ok(match topology {
                    Topology::ZenerBasic => AnswerSheet::ZenerBasic {
                        vr: v[0],
                        ir: v[1],
                        pr: v[2],
                        pz: v[3],
                    },
                    Topology::ZenerLoad => AnswerSheet::ZenerLoad {
                        il: v[0],
                        vr_max: v[1],
                        vs_max: v[2],
                        vr_min: v[3],
                        vs_min: v[4],
                    },
                    _ => AnswerSheet::ZenerVariable {
                        vr: v[0],
                        ir: v[1],
                        il_max: v[2],
                        il_min: v[3],
                        rl_max: v[4],
                        rl_min: v[5],
                    },
                })
            }
        }
    }

    fn zener_values(&self) -> Option<Vec<f64>> {
        match *self {
            AnswerSheet::ZenerBasic { vr, ir, pr, pz } => Some(vec![vr, ir, pr, pz]),
            AnswerSheet::ZenerLoad {
                il,
                vr_max,
                vs_max,
                vr_min,
                vs_min,
            } => Some(vec![il, vr_max, vs_max, vr_min, vs_min]),
            AnswerSheet::ZenerVariable {
                vr,
                ir,
                il_max,
                il_min,
                rl_max,
                rl_min,
            } => Some(vec![vr, ir, il_max, il_min, rl_max, rl_min]),
            _ => None,
        }
    }

    fn matches(&self, topology: Topology) -> bool {
        matches!(
            (self, topology.family(), topology),
            (AnswerSheet::Clipper(_), Family::Clipper, _)
                | (AnswerSheet::Clamper(_), Family::Clamper, _)
                | (AnswerSheet::ZenerBasic { .. }, _, Topology::ZenerBasic)
                | (AnswerSheet::ZenerLoad { .. }, _, Topology::ZenerLoad)
                | (AnswerSheet::ZenerVariable { .. }, _, Topology::ZenerVariableLoad)
        )
    }
}

fn zener_fields(topology: Topology) -> &'static [(&'static str, &'static str)] {
    match topology {
        Topology::ZenerBasic => &ZENER_BASIC_FIELDS,
        Topology::ZenerLoad => &ZENER_LOAD_FIELDS,
        _ => &ZENER_VARIABLE_FIELDS,
    }
}

fn field_list(fields: &[(&str, &str)]) -> String {
    fields.iter().map(|(s, _)| *s).collect::<Vec<_>>().join(", ")
}

fn parse_number(text: &str, unit: &str) -> Result<f64> {
    parse_engineering(text, unit).ok_or_else(|| TutorError::InvalidNumber {
        text: text.to_string(),
    })
}

fn parse_clipper_token(text: &str) -> Result<ClipperAnswer> {
    let (state, vout) = text.split_once(':').ok_or_else(|| {
        TutorError::invalid_parameter(
            "answer",
            format!("expected FB:<vout> or RB:<vout>, got '{}'", text),
        )
    })?;
    Ok(ClipperAnswer::new(state.parse()?, parse_number(vout, "V")?))
}

/// One graded quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedRow {
    /// Quantity symbol, e.g. `Vo` or `Rl_max`
    pub symbol: &'static str,
    pub unit: &'static str,
    /// Input sample, for per-sample rows
    pub vin: Option<f64>,
    pub submitted: f64,
    pub correct: f64,
    /// Submitted and correct conduction state, for clipper rows
    pub submitted_state: Option<Conduction>,
    pub correct_state: Option<Conduction>,
    pub is_correct: bool,
}

/// Outcome of grading one answer sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub topology: Topology,
    pub rows: Vec<GradedRow>,
}

impl GradeReport {
    /// (correct rows, total rows)
    pub fn score(&self) -> (usize, usize) {
        let correct = self.rows.iter().filter(|r| r.is_correct).count();
        (correct, self.rows.len())
    }

    pub fn all_correct(&self) -> bool {
        self.rows.iter().all(|r| r.is_correct)
    }
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Results", self.topology.label())?;
        for row in &self.rows {
            let mark = if row.is_correct { "✓" } else { "✗" };
            if let Some(vin) = row.vin {
                write!(f, "Vin = {:.1}V | ", vin)?;
            }
            if let (Some(yours), Some(correct)) = (row.submitted_state, row.correct_state) {
                write!(f, "Your D: {} | Correct D: {} | ", yours, correct)?;
            }
            writeln!(
                f,
                "{}: {} (Correct: {}) {}",
                row.symbol,
                to_engineering(row.submitted, row.unit),
                to_engineering(row.correct, row.unit),
                mark
            )?;
        }
        let (correct, total) = self.score();
        write!(f, "Score: {}/{}", correct, total)
    }
}

/// Grade `sheet` against the correct answers for `spec`.
pub fn grade(spec: &CircuitSpec, sheet: &AnswerSheet) -> Result<GradeReport> {
    let topology = spec.topology;
    if !sheet.matches(topology) {
        return Err(TutorError::answer_mismatch(
            format!("answers for {}", topology.label()),
            sheet.kind(),
        ));
    }

    let key = answer_key(spec);
    let rows = match sheet {
        AnswerSheet::Clipper(answers) => {
            check_row_count(answers.len())?;
            key.iter()
                .zip(answers)
                .map(|((vin, result), answer)| {
                    let correct_state = result.state();
                    let is_correct = within_tolerance(answer.vout, result.vout())
                        && Some(answer.state) == correct_state;
                    GradedRow {
                        symbol: "Vo",
                        unit: "V",
                        vin: Some(*vin),
                        submitted: answer.vout,
                        correct: result.vout(),
                        submitted_state: Some(answer.state),
                        correct_state,
                        is_correct,
                    }
                })
                .collect()
        }
        AnswerSheet::Clamper(answers) => {
            check_row_count(answers.len())?;
            key.iter()
                .zip(answers)
                .map(|((vin, result), &vout)| GradedRow {
                    symbol: "Vo",
                    unit: "V",
                    vin: Some(*vin),
                    submitted: vout,
                    correct: result.vout(),
                    submitted_state: None,
                    correct_state: None,
                    is_correct: within_tolerance(vout, result.vout()),
                })
                .collect()
        }
        _ => {
            let submitted = sheet.zener_values().unwrap_or_default();
            let result = key.first().map(|(_, r)| *r).unwrap_or(AnalysisResult::NotApplicable);
            // A spec the analyzer cannot evaluate grades against zeros.
            let correct: Vec<f64> = if result.is_applicable() {
                result.quantities().iter().map(|q| q.value).collect()
            } else {
                vec![0.0; submitted.len()]
            };
            zener_fields(topology)
                .iter()
                .zip(submitted.iter().zip(correct))
                .map(|(&(symbol, unit), (&submitted, correct))| GradedRow {
                    symbol,
                    unit,
                    vin: None,
                    submitted,
                    correct,
                    submitted_state: None,
                    correct_state: None,
                    is_correct: within_tolerance(submitted, correct),
                })
                .collect()
        }
    };

    Ok(GradeReport { topology, rows })
}

fn check_row_count(found: usize) -> Result<()> {
    if found == SAMPLE_COUNT {
        Ok(())
    } else {
        Err(TutorError::answer_mismatch(
            format!("{} rows", SAMPLE_COUNT),
            format!("{} rows", found),
        ))
    }
}
