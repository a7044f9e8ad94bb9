// Shared test fakes for the map surface and selector panel.
//
// These record every call the cascade makes so tests can assert on visible
// state: which layers are live, where the viewport sits, which controls hold
// options, and what the info panel shows.

use std::collections::HashMap;

use geo_cascade::geometry::{BoundaryStyle, LatLng, Ring};
use geo_cascade::surface::{MapSurface, SelectorPanel};
use geo_cascade::{AdministrativeLevel, LocationOption};

/// One live layer on the recording surface.
#[derive(Debug, Clone)]
pub enum Layer {
    Marker { position: LatLng, popup: String },
    Boundary { rings: Vec<Ring> },
}

/// Map surface that tracks live layers and the current viewport.
#[derive(Default)]
pub struct RecordingSurface {
    next: u64,
    pub live: HashMap<u64, Layer>,
    pub view: Option<(LatLng, u8)>,
}

impl RecordingSurface {
    /// All live markers as (position, popup).
    #[allow(dead_code)] // Used by other test files
    pub fn markers(&self) -> Vec<(LatLng, String)> {
        self.live
            .values()
            .filter_map(|layer| match layer {
                Layer::Marker { position, popup } => Some((*position, popup.clone())),
                Layer::Boundary { .. } => None,
            })
            .collect()
    }

    /// All live boundary layers.
    #[allow(dead_code)]
    pub fn boundaries(&self) -> Vec<Vec<Ring>> {
        self.live
            .values()
            .filter_map(|layer| match layer {
                Layer::Boundary { rings } => Some(rings.clone()),
                Layer::Marker { .. } => None,
            })
            .collect()
    }
}

impl MapSurface for RecordingSurface {
    type LayerHandle = u64;

    fn add_marker(&mut self, position: LatLng, popup: &str) -> u64 {
        self.next += 1;
        self.live.insert(
            self.next,
            Layer::Marker {
                position,
                popup: popup.to_string(),
            },
        );
        self.next
    }

    fn add_polygon(&mut self, rings: &[Ring], _style: &BoundaryStyle) -> u64 {
        self.next += 1;
        self.live.insert(
            self.next,
            Layer::Boundary {
                rings: rings.to_vec(),
            },
        );
        self.next
    }

    fn remove_layer(&mut self, layer: u64) {
        assert!(
            self.live.remove(&layer).is_some(),
            "layer {layer} removed twice"
        );
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some((center, zoom));
    }
}

/// Selector panel that records populated options, the info panel content,
/// and every inline error.
#[derive(Default)]
pub struct RecordingPanel {
    pub options: HashMap<AdministrativeLevel, Vec<LocationOption>>,
    pub detail: Option<(AdministrativeLevel, Vec<(&'static str, String)>)>,
    pub errors: Vec<(AdministrativeLevel, String)>,
    pub toggle_resets: usize,
}

impl SelectorPanel for RecordingPanel {
    fn populate(&mut self, level: AdministrativeLevel, options: &[LocationOption]) {
        self.options.insert(level, options.to_vec());
    }

    fn clear_level(&mut self, level: AdministrativeLevel) {
        self.options.remove(&level);
    }

    fn show_detail(&mut self, level: AdministrativeLevel, rows: &[(&'static str, String)]) {
        self.detail = Some((level, rows.to_vec()));
    }

    fn clear_detail(&mut self) {
        self.detail = None;
    }

    fn show_error(&mut self, level: AdministrativeLevel, message: &str) {
        self.errors.push((level, message.to_string()));
    }

    fn reset_toggles(&mut self) {
        self.toggle_resets += 1;
    }
}
