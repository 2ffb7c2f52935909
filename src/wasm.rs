//! WASM bindings for the concentric-core library.
//!
//! The JavaScript host owns the animation loop: it creates a
//! `ConcentricLayout`, loads a graph, calls `start()`, then calls `step()`
//! once per frame until it decides to `stop()`.

use wasm_bindgen::prelude::*;
use serde_json::to_string;

use crate::engine::{HopLayout, LayoutNotice};
use crate::graph::MemoryGraph;
use crate::layout::CurveVariant;
use crate::output::{LayoutOutput, parse_property_value};
use crate::params::LayoutParameters;

#[wasm_bindgen]
extern "C" {
    pub fn alert(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

#[wasm_bindgen]
pub struct ConcentricLayout {
    layout: HopLayout,
    graph: MemoryGraph,
}

#[wasm_bindgen]
impl ConcentricLayout {
    /// `variant` is "concentric" (or "circle") or "heart".
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> ConcentricLayout {
        let variant = CurveVariant::from_name(variant).unwrap_or_else(|| {
            console_error(&format!("Unknown layout '{}', using concentric circles", variant));
            CurveVariant::Circle
        });
        let layout = HopLayout::new(variant)
            .with_notifier(|notice: &LayoutNotice| alert(&notice.message()));
        ConcentricLayout {
            layout,
            graph: MemoryGraph::undirected(),
        }
    }

    /// Replace the current graph. Returns false (and keeps the old graph) on bad input.
    pub fn load_graph(&mut self, json: &str) -> bool {
        match MemoryGraph::from_json(json) {
            Ok(graph) => {
                console_log(&format!(
                    "Loaded graph with {} nodes and {} edges",
                    graph.node_count(),
                    graph.edge_count()
                ));
                self.graph = graph;
                true
            }
            Err(e) => {
                console_error(&format!("Error loading graph: {}", e));
                false
            }
        }
    }

    pub fn reset_defaults(&mut self) {
        self.layout.reset_defaults();
    }

    pub fn start(&mut self) {
        self.layout.start();
    }

    pub fn stop(&mut self) {
        self.layout.stop();
    }

    pub fn is_running(&self) -> bool {
        self.layout.is_running()
    }

    /// Run one pass and return the positions as JSON.
    pub fn step(&mut self) -> String {
        let output = match self.layout.run_one_pass(&self.graph) {
            Ok(report) => LayoutOutput::from_pass(report, self.graph.positions()),
            Err(e) => {
                console_error(&format!("Layout pass failed: {}", e));
                LayoutOutput::from_error(e.to_string())
            }
        };
        to_string(&output).unwrap_or_else(|_| "{\"error\": \"Serialization error\"}".to_string())
    }

    /// The property descriptors as a JSON array.
    pub fn properties(&self) -> String {
        to_string(&self.layout.properties()).unwrap_or_else(|_| "[]".to_string())
    }

    /// The current parameter values as JSON.
    pub fn parameters(&self) -> String {
        to_string(self.layout.parameters()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Set one property; `value` is JSON (a number or a string).
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        let value = match parse_property_value(value) {
            Ok(v) => v,
            Err(e) => {
                console_error(&format!("Error parsing value for '{}': {}", name, e));
                return false;
            }
        };
        match self.layout.set_property(name, value) {
            Ok(()) => true,
            Err(e) => {
                console_error(&e.to_string());
                false
            }
        }
    }

    /// Replace all parameters from a JSON object; missing fields take defaults.
    pub fn set_parameters(&mut self, json: &str) -> bool {
        let params: LayoutParameters = match serde_json::from_str(json) {
            Ok(p) => p,
            Err(e) => {
                console_error(&format!("Error parsing parameters: {}", e));
                return false;
            }
        };
        match self.layout.set_parameters(params) {
            Ok(()) => true,
            Err(e) => {
                console_error(&e.to_string());
                false
            }
        }
    }
}
