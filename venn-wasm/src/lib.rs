//! WASM bindings for the Venn circle puzzle.
//!
//! Stateless functions over circle snapshots, plus a [`GameSession`] class wrapping the interactive state
//! machine for browser front-ends.

use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::{de::DeserializeOwned, Serialize};
use venn_core::{
    circle::Circle,
    config::Config,
    graph,
    layout::Layout,
    matching,
    parse_log_level,
    r2::R2,
    region::Region,
    regions,
    session::{Canvas, Session},
    structure::Structure,
    target,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

fn parse<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

/// `undefined` or `null` → all defaults.
fn parse_config(config: JsValue) -> Result<Config, JsValue> {
    Ok(parse::<Option<Config>>(config, "config")?.unwrap_or_default())
}

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "off", "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsValue> {
    let level: Option<String> = parse(level, "log level")?;
    let level = parse_log_level(level.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

/// Regions of a circle configuration.
///
/// # Arguments
/// * `circles` - Array of `{ id, c: { x, y }, r }`; invalid circles are ignored.
/// * `config` - Optional [`Config`]; only `extract` is used.
///
/// # Returns
/// Array of regions `{ key, center, area?, samples, points? }`, sorted by key.
#[wasm_bindgen]
pub fn extract_regions(circles: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let circles: Vec<Circle> = parse(circles, "circles")?;
    let config = parse_config(config)?;
    to_js(&regions::extract(&circles, &config.extract))
}

/// Adjacency graph over previously extracted regions.
///
/// # Arguments
/// * `regions` - Output of [`extract_regions`].
/// * `circles` - The circles the regions came from (consulted by the geometric policy).
/// * `config` - Optional [`Config`]; `adjacency` and `touchEpsilon` are used.
#[wasm_bindgen]
pub fn build_graph(regions: JsValue, circles: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let regions: Vec<Region> = parse(regions, "regions")?;
    let circles: Vec<Circle> = parse(circles, "circles")?;
    let config = parse_config(config)?;
    to_js(&graph::build(&regions, &circles, config.adjacency, config.touch_epsilon))
}

/// Regions and graph for one configuration.
#[wasm_bindgen]
pub fn analyze(circles: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let circles: Vec<Circle> = parse(circles, "circles")?;
    let config = parse_config(config)?;
    to_js(&Structure::new(&circles, &config))
}

/// Compares `current` against `target`.
///
/// # Returns
/// `{ matched, comparison: { missingRegions, extraRegions, missingEdges, extraEdges } }`
#[wasm_bindgen]
pub fn evaluate(current: JsValue, target: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    #[derive(Serialize)]
    struct Evaluation {
        matched: bool,
        comparison: matching::Comparison,
    }
    let current: Vec<Circle> = parse(current, "current circles")?;
    let target: Vec<Circle> = parse(target, "target circles")?;
    let config = parse_config(config)?;
    let comparison = Structure::new(&current, &config).compare(&Structure::new(&target, &config));
    let matched = comparison.is_match(config.rule);
    to_js(&Evaluation { matched, comparison })
}

/// Whether `current`'s structure equals `target`'s under the configured rule.
#[wasm_bindgen]
pub fn is_match(current: JsValue, target: JsValue, config: JsValue) -> Result<bool, JsValue> {
    let current: Vec<Circle> = parse(current, "current circles")?;
    let target: Vec<Circle> = parse(target, "target circles")?;
    let config = parse_config(config)?;
    Ok(Structure::new(&current, &config).matches(&Structure::new(&target, &config), config.rule))
}

/// Random target derived from `circles` (2–4 valid circles), deterministic in `seed`.
#[wasm_bindgen]
pub fn random_target(circles: JsValue, seed: u32, config: JsValue) -> Result<JsValue, JsValue> {
    let base: Layout = parse(circles, "circles")?;
    let config = parse_config(config)?;
    let mut rng = StdRng::seed_from_u64(seed as u64);
    to_js(&target::generate(&base, &mut rng, &config))
}

/// Default three-circle layout for a `width` × `height` canvas.
#[wasm_bindgen]
pub fn default_circles(width: f64, height: f64) -> Result<JsValue, JsValue> {
    let layout = Layout::for_canvas(width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&layout)
}

/// Interactive puzzle state: the player's circles, a target, and pointer grabs.
#[wasm_bindgen]
pub struct GameSession(Session);

#[wasm_bindgen]
impl GameSession {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, seed: u32, config: JsValue) -> Result<GameSession, JsValue> {
        let config = parse_config(config)?;
        Session::new(Canvas::new(width, height), config, seed as u64)
            .map(GameSession)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Whether a circle (rim or interior) was hit.
    pub fn grab(&mut self, x: f64, y: f64) -> bool {
        self.0.grab(R2::new(x, y)).is_some()
    }

    /// Snapshot after applying the grab, or `undefined` if nothing is grabbed.
    pub fn drag(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        match self.0.drag(R2::new(x, y)) {
            Some(snapshot) => to_js(&snapshot),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn release(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.0.release())
    }

    pub fn evaluate(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.0.evaluate())
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.0.reset().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.0.resize(Canvas::new(width, height));
    }

    pub fn current(&self) -> Result<JsValue, JsValue> {
        to_js(&self.0.current())
    }

    pub fn target(&self) -> Result<JsValue, JsValue> {
        to_js(&self.0.target())
    }

    pub fn phase(&self) -> String {
        self.0.phase().to_string()
    }
}
