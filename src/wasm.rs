//! WASM bindings for Electra Core.
//!
//! This module provides JavaScript-friendly bindings for a browser front end
//! that draws the schematic and the answer form.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmTutor, format } from 'electra_core';
//!
//! await init();
//!
//! const tutor = new WasmTutor();
//! tutor.new_circuit('series_biasclipper');
//! console.log(tutor.describe());
//!
//! for (const vin of tutor.sample_points()) {
//!   console.log(vin, tutor.correct_state(vin), format(tutor.correct_vout(vin), 'V'));
//! }
//!
//! const report = tutor.submit(['FB:7.2', 'FB:4.7', 'RB:0', 'RB:0', 'RB:0']);
//! ```

use wasm_bindgen::prelude::*;

use crate::analysis::analyze;
use crate::circuit::Topology;
use crate::error::TutorError;
use crate::generator::{GeneratorConfig, ParameterGenerator};
use crate::grading::{sample_points, AnswerSheet};
use crate::session::QuizSession;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: TutorError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible quiz driver.
///
/// Wraps a parameter generator and the current [`QuizSession`].
#[wasm_bindgen]
pub struct WasmTutor {
    generator: ParameterGenerator,
    session: QuizSession,
}

#[wasm_bindgen]
impl WasmTutor {
    /// Create a tutor. Pass a seed for reproducible circuits.
    ///
    /// # Example
    /// ```javascript
    /// const tutor = new WasmTutor(42n);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WasmTutor {
        let generator = match seed {
            Some(seed) => ParameterGenerator::seeded(GeneratorConfig::default(), seed),
            None => ParameterGenerator::new(GeneratorConfig::default()),
        };
        WasmTutor {
            generator,
            session: QuizSession::new(),
        }
    }

    /// Generate a new circuit.
    ///
    /// # Arguments
    /// * `circuit_type` - Topology name, e.g. `zener_diode2`
    #[wasm_bindgen]
    pub fn new_circuit(&mut self, circuit_type: &str) -> Result<(), JsValue> {
        let topology: Topology = circuit_type.parse().map_err(js_error)?;
        let session = std::mem::take(&mut self.session);
        self.session = session.new_circuit(&mut self.generator, topology);
        Ok(())
    }

    /// Circuit parameters, one per line.
    #[wasm_bindgen]
    pub fn describe(&self) -> Result<String, JsValue> {
        self.session.describe().map_err(js_error)
    }

    /// Input samples the form should ask about.
    #[wasm_bindgen]
    pub fn sample_points(&self) -> Result<Vec<f64>, JsValue> {
        let spec = self.session.circuit().ok_or_else(|| js_error(TutorError::NoCircuit))?;
        Ok(sample_points(spec))
    }

    /// Correct output voltage at `vin` (clippers and clampers).
    #[wasm_bindgen]
    pub fn correct_vout(&self, vin: f64) -> Result<f64, JsValue> {
        let spec = self.session.circuit().ok_or_else(|| js_error(TutorError::NoCircuit))?;
        Ok(analyze(spec, vin).vout())
    }

    /// Correct diode state at `vin` as `"FB"`/`"RB"`, or `undefined` for clampers.
    #[wasm_bindgen]
    pub fn correct_state(&self, vin: f64) -> Result<Option<String>, JsValue> {
        let spec = self.session.circuit().ok_or_else(|| js_error(TutorError::NoCircuit))?;
        Ok(analyze(spec, vin).state().map(|s| s.abbrev().to_string()))
    }

    /// Grade answers for the current circuit and return the report text.
    ///
    /// # Arguments
    /// * `answers` - Same tokens as the CLI `check` command
    #[wasm_bindgen]
    pub fn submit(&mut self, answers: Vec<String>) -> Result<String, JsValue> {
        let spec = self.session.circuit().ok_or_else(|| js_error(TutorError::NoCircuit))?;
        let sheet = AnswerSheet::parse(spec.topology, &answers).map_err(js_error)?;
        self.session = self.session.clone().submit(&sheet).map_err(js_error)?;
        Ok(self
            .session
            .report()
            .map(|r| r.to_string())
            .unwrap_or_default())
    }
}

/// Format a value in engineering notation.
#[wasm_bindgen]
pub fn format(value: f64, unit: &str) -> String {
    crate::format::to_engineering(value, unit)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
