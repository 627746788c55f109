//! `#[wasm_bindgen]` exports for the field visualizer.
//!
//! wasm-bindgen cannot export the `Visualizer` methods through a shared
//! borrow, so a single instance lives in a `thread_local!` and every export
//! goes through `with_viz()`.

pub mod runner;

pub use runner::Visualizer;

use std::cell::RefCell;

use efield_engine::{EfieldError, VizConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static VIZ: RefCell<Option<Visualizer>> = const { RefCell::new(None) };
}

fn with_viz<R>(f: impl FnOnce(&mut Visualizer) -> R) -> Result<R, JsValue> {
    VIZ.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let viz = borrow
            .as_mut()
            .ok_or_else(|| JsValue::from(js_sys::Error::new("visualizer not initialized; call viz_init() first")))?;
        Ok(f(viz))
    })
}

fn to_js(err: EfieldError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[wasm_bindgen]
pub fn viz_init(width: u32, height: u32) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = VizConfig {
        width,
        height,
        ..VizConfig::default()
    };
    let viz = Visualizer::new(config).map_err(to_js)?;
    VIZ.with(|cell| {
        *cell.borrow_mut() = Some(viz);
    });
    log::info!("efield: initialized {}x{}", width, height);
    Ok(())
}

#[wasm_bindgen]
pub fn viz_configure(json: &str) -> Result<(), JsValue> {
    with_viz(|v| v.configure(json))?.map_err(to_js)
}

#[wasm_bindgen]
pub fn viz_set_charges(json: &str) -> Result<(), JsValue> {
    with_viz(|v| v.set_charges_json(json))?.map_err(to_js)
}

/// Current charges as a JSON array of `{x, y, isPositive}`.
#[wasm_bindgen]
pub fn viz_get_charges() -> Result<String, JsValue> {
    with_viz(|v| v.charges_json())?.map_err(to_js)
}

#[wasm_bindgen]
pub fn viz_add_charge(x: f32, y: f32, is_positive: bool) -> Result<u32, JsValue> {
    let index = with_viz(|v| v.add_charge(x, y, is_positive))?.map_err(to_js)?;
    Ok(index as u32)
}

#[wasm_bindgen]
pub fn viz_move_charge(index: u32, x: f32, y: f32) -> Result<(), JsValue> {
    with_viz(|v| v.move_charge(index as usize, x, y))?.map_err(to_js)
}

/// Index of the charge under `(x, y)`, or -1.
#[wasm_bindgen]
pub fn viz_charge_at(x: f32, y: f32) -> Result<i32, JsValue> {
    with_viz(|v| v.charge_at(x, y).map_or(-1, |i| i as i32))
}

/// Recompute the scene if the charges changed. Returns whether it redrew.
#[wasm_bindgen]
pub fn viz_render() -> Result<bool, JsValue> {
    with_viz(|v| v.render())?.map_err(to_js)
}

// ---- Pure queries ----

#[wasm_bindgen]
pub fn viz_field(x: f32, y: f32) -> Result<Vec<f32>, JsValue> {
    with_viz(|v| v.field_at(x, y).to_vec())
}

#[wasm_bindgen]
pub fn viz_potential(x: f32, y: f32) -> Result<f32, JsValue> {
    with_viz(|v| v.potential_at(x, y))
}

#[wasm_bindgen]
pub fn viz_trace_line(x: f32, y: f32, is_positive: bool) -> Result<Vec<f32>, JsValue> {
    with_viz(|v| v.trace(x, y, is_positive))?.map_err(to_js)
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn get_pixels_ptr() -> Result<*const u8, JsValue> {
    with_viz(|v| v.pixels_ptr())
}

#[wasm_bindgen]
pub fn get_pixels_len() -> Result<u32, JsValue> {
    with_viz(|v| v.pixels_len())
}

#[wasm_bindgen]
pub fn get_vector_vertices_ptr() -> Result<*const f32, JsValue> {
    with_viz(|v| v.vector_vertices_ptr())
}

#[wasm_bindgen]
pub fn get_vector_vertex_count() -> Result<u32, JsValue> {
    with_viz(|v| v.vector_vertex_count())
}

#[wasm_bindgen]
pub fn get_viewport_width() -> Result<u32, JsValue> {
    with_viz(|v| v.width())
}

#[wasm_bindgen]
pub fn get_viewport_height() -> Result<u32, JsValue> {
    with_viz(|v| v.height())
}
