//! `#[wasm_bindgen]` exports for the electric field lab.
//!
//! Two groups of exports:
//! - stateless field functions taking packed charges (`[x, y, value]` per
//!   charge, anchor coordinates) as a `Float64Array`;
//! - the `lab_*` simulator runner plus buffer accessors for the renderer.

pub mod runner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use coulomb_engine::{
    Charge, ChargeId, ChargeSign, LabError, Point, SimCommand, SimConfig, VisualizationMode,
};

pub use runner::LabRunner;

/// Floats per packed charge: x, y, value.
const PACKED_CHARGE_FLOATS: usize = 3;

thread_local! {
    static RUNNER: RefCell<Option<LabRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Logs and returns `None` before `lab_init()`.
fn with_runner<R>(f: impl FnOnce(&mut LabRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::error!("lab not initialized, call lab_init() first");
                None
            }
        }
    })
}

fn push(command: SimCommand) {
    with_runner(|r| r.push(command));
}

fn to_js(err: LabError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Unpack `[x, y, value, …]` into charges with ids 1, 2, ….
pub fn unpack_charges(packed: &[f64]) -> Result<Vec<Charge>, LabError> {
    packed
        .chunks_exact(PACKED_CHARGE_FLOATS)
        .enumerate()
        .map(|(i, c)| Charge::new(ChargeId(i as u32 + 1), c[0], c[1], c[2]))
        .collect()
}

fn flatten(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

// ---- Stateless field functions ----

/// `[field_x, field_y, magnitude, potential]` at `(x, y)`.
#[wasm_bindgen]
pub fn field_sample(charges: &[f64], x: f64, y: f64) -> Result<Vec<f64>, JsValue> {
    let charges = unpack_charges(charges).map_err(to_js)?;
    let s = coulomb_engine::evaluate_field_and_potential(&charges, x, y);
    Ok(vec![s.field.x, s.field.y, s.field.magnitude, s.potential])
}

/// `[magnitude, attractive, indicator]`: `attractive` is 1 or 0 and
/// `indicator` is the force bar fill in [0, 1].
#[wasm_bindgen]
pub fn coulomb_force(q1: f64, q2: f64, r: f64) -> Vec<f64> {
    let f = coulomb_engine::compute_force(q1, q2, r);
    vec![f.magnitude, if f.is_attractive() { 1.0 } else { 0.0 }, f.indicator_level()]
}

/// Calculator readout, e.g. `8.19 × 10⁻⁸ N`.
#[wasm_bindgen]
pub fn coulomb_force_label(q1: f64, q2: f64, r: f64) -> String {
    coulomb_engine::compute_force(q1, q2, r).display_magnitude()
}

/// "Attractive (opposite signs)" or "Repulsive (same signs)".
#[wasm_bindgen]
pub fn coulomb_interaction_label(q1: f64, q2: f64) -> String {
    coulomb_engine::Interaction::classify(q1, q2).label().to_string()
}

/// Flat `[x0, y0, x1, y1, …]` field line.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn trace_field_line(
    charges: &[f64],
    start_x: f64,
    start_y: f64,
    angle: f64,
    outward: bool,
    width: f64,
    height: f64,
    strength: f64,
) -> Result<Vec<f64>, JsValue> {
    let charges = unpack_charges(charges).map_err(to_js)?;
    let points = coulomb_engine::trace_field_line(
        &charges,
        Point::new(start_x, start_y),
        angle,
        outward,
        coulomb_engine::Bounds::new(width, height),
        strength,
    );
    Ok(flatten(&points))
}

/// Flat `[x0, y0, x1, y1, …]` crossings of `level`.
#[wasm_bindgen]
pub fn extract_equipotential(charges: &[f64], level: f64, width: f64, height: f64) -> Result<Vec<f64>, JsValue> {
    let charges = unpack_charges(charges).map_err(to_js)?;
    let points =
        coulomb_engine::extract_equipotential(&charges, level, coulomb_engine::Bounds::new(width, height));
    Ok(flatten(&points))
}

// ---- Simulator lifecycle ----

/// Create the simulator. `config_json` may be omitted or partial.
#[wasm_bindgen]
pub fn lab_init(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref() {
        Some(json) => SimConfig::from_json(json).map_err(to_js)?,
        None => SimConfig::default(),
    };
    let (width, height) = (config.world_width, config.world_height);
    let runner = LabRunner::new(config);
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    log::info!("field lab: initialized ({width}x{height})");
    Ok(())
}

/// Apply queued commands and rebuild buffers. Returns true when they changed.
#[wasm_bindgen]
pub fn lab_tick() -> bool {
    with_runner(|r| r.tick()).unwrap_or(false)
}

// ---- Commands ----

#[wasm_bindgen]
pub fn lab_add_charge(positive: bool) {
    let sign = if positive { ChargeSign::Positive } else { ChargeSign::Negative };
    push(SimCommand::AddCharge { sign });
}

#[wasm_bindgen]
pub fn lab_add_charge_at(value: f64, x: f64, y: f64) {
    push(SimCommand::AddChargeAt { value, x, y });
}

#[wasm_bindgen]
pub fn lab_move_charge(id: u32, x: f64, y: f64) {
    push(SimCommand::MoveCharge { id: ChargeId(id), x, y });
}

#[wasm_bindgen]
pub fn lab_remove_charge(id: u32) {
    push(SimCommand::RemoveCharge { id: ChargeId(id) });
}

#[wasm_bindgen]
pub fn lab_reset() {
    push(SimCommand::Reset);
}

#[wasm_bindgen]
pub fn lab_load_demo() {
    push(SimCommand::LoadDemo);
}

/// 0 = field lines, 1 = equipotential.
#[wasm_bindgen]
pub fn lab_set_mode(code: u32) {
    match VisualizationMode::from_code(code) {
        Some(mode) => push(SimCommand::SetMode(mode)),
        None => log::warn!("unknown visualization mode {code}"),
    }
}

/// Slider position, 0 to 100.
#[wasm_bindgen]
pub fn lab_set_field_strength(percent: f64) {
    push(SimCommand::SetFieldStrength(percent));
}

#[wasm_bindgen]
pub fn lab_set_charge_magnitude(magnitude: f64) {
    push(SimCommand::SetChargeMagnitude(magnitude));
}

#[wasm_bindgen]
pub fn lab_resize(width: f64, height: f64) {
    push(SimCommand::Resize { width, height });
}

#[wasm_bindgen]
pub fn lab_set_running(running: bool) {
    push(SimCommand::SetRunning(running));
}

#[wasm_bindgen]
pub fn lab_toggle_running() {
    push(SimCommand::ToggleRunning);
}

// ---- Queries ----

/// `[magnitude, attractive]` between two charges on the canvas.
#[wasm_bindgen]
pub fn lab_pair_force(a: u32, b: u32, metres_per_unit: f64) -> Result<Vec<f64>, JsValue> {
    with_runner(|r| r.pair_force(a, b, metres_per_unit))
        .ok_or_else(|| JsValue::from_str("lab not initialized"))?
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn lab_charges_json() -> Result<String, JsValue> {
    with_runner(|r| r.charges_json())
        .ok_or_else(|| JsValue::from_str("lab not initialized"))?
        .map_err(to_js)
}

/// `[running, mode, field strength, charge magnitude]`.
#[wasm_bindgen]
pub fn lab_controls() -> Vec<f64> {
    with_runner(|r| r.controls()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn lab_frame_json() -> Result<String, JsValue> {
    with_runner(|r| r.frame_json())
        .ok_or_else(|| JsValue::from_str("lab not initialized"))?
        .map_err(to_js)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_glyphs_ptr() -> *const f32 {
    with_runner(|r| r.glyphs_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_glyph_count() -> u32 {
    with_runner(|r| r.glyph_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_vectors_ptr() -> *const f32 {
    with_runner(|r| r.vectors_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_max_glyphs() -> u32 {
    with_runner(|r| r.max_glyphs()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_vector_vertices() -> u32 {
    with_runner(|r| r.max_vector_vertices()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_assigns_sequential_ids() {
        let charges = unpack_charges(&[10.0, 20.0, 1.0, 30.0, 40.0, -2.0]).unwrap();
        assert_eq!(charges.len(), 2);
        assert_eq!(charges[1].id, ChargeId(2));
        assert_eq!(charges[1].value(), -2.0);
        assert_eq!(charges[0].center(), Point::new(34.0, 44.0));
    }

    #[test]
    fn unpack_rejects_zero_and_ignores_trailing_floats() {
        assert!(matches!(
            unpack_charges(&[0.0, 0.0, 0.0]),
            Err(LabError::InvalidCharge { .. })
        ));
        assert_eq!(unpack_charges(&[1.0, 2.0, 3.0, 4.0]).unwrap().len(), 1);
    }

    #[test]
    fn flatten_interleaves_coordinates() {
        let flat = flatten(&[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn force_export_packs_flag() {
        let f = coulomb_force(2e-6, 3e-6, 0.15);
        assert!((f[0] - 2.4).abs() < 0.01);
        assert_eq!(f[1], 0.0);
        assert_eq!(f[2], 1.0);
        assert_eq!(coulomb_interaction_label(1.0, -1.0), "Attractive (opposite signs)");
    }
}
