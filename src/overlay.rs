//! Ownership and lifecycle of map overlays.
//!
//! At most one marker and one boundary layer may be live per administrative
//! level. The manager owns every handle the surface gives out; replacing an
//! overlay always removes its predecessor first, so layers never silently
//! stack. What used to be free-floating "current layer" globals in designs
//! like this become the two maps below, mutated only through these methods.

use std::collections::HashMap;

use log::debug;

use crate::config::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::geometry::{BoundaryStyle, LatLng, Ring};
use crate::level::AdministrativeLevel;
use crate::surface::MapSurface;

/// Owner of all markers and boundary layers drawn by the cascade.
pub struct MapOverlayManager<S: MapSurface> {
    surface: S,
    markers: HashMap<AdministrativeLevel, S::LayerHandle>,
    boundaries: HashMap<AdministrativeLevel, S::LayerHandle>,
    default_center: LatLng,
    default_zoom: u8,
}

impl<S: MapSurface> MapOverlayManager<S> {
    /// Wraps a surface, using the crate-wide default view for resets.
    pub fn new(surface: S) -> Self {
        Self::with_default_view(surface, DEFAULT_CENTER, DEFAULT_ZOOM)
    }

    /// Wraps a surface with an explicit initial/reset viewport.
    pub fn with_default_view(surface: S, center: LatLng, zoom: u8) -> Self {
        MapOverlayManager {
            surface,
            markers: HashMap::new(),
            boundaries: HashMap::new(),
            default_center: center,
            default_zoom: zoom,
        }
    }

    /// Places the marker for a level, removing any previous one.
    pub fn set_marker(&mut self, level: AdministrativeLevel, position: LatLng, popup: &str) {
        if let Some(old) = self.markers.remove(&level) {
            self.surface.remove_layer(old);
        }
        let handle = self.surface.add_marker(position, popup);
        self.markers.insert(level, handle);
    }

    /// Draws the boundary for a level, removing any previous one.
    ///
    /// An empty ring list means "no renderable boundary": the previous layer
    /// is removed and nothing is drawn.
    pub fn set_boundary(&mut self, level: AdministrativeLevel, rings: &[Ring], style: &BoundaryStyle) {
        self.clear_boundary(level);
        if rings.is_empty() {
            debug!("no renderable boundary for {level}, layer suppressed");
            return;
        }
        let handle = self.surface.add_polygon(rings, style);
        self.boundaries.insert(level, handle);
    }

    /// Removes a level's boundary layer, if live.
    pub fn clear_boundary(&mut self, level: AdministrativeLevel) {
        if let Some(old) = self.boundaries.remove(&level) {
            self.surface.remove_layer(old);
        }
    }

    /// Removes both overlays of a level.
    pub fn clear(&mut self, level: AdministrativeLevel) {
        if let Some(old) = self.markers.remove(&level) {
            self.surface.remove_layer(old);
        }
        self.clear_boundary(level);
    }

    /// Removes the overlays of a level and of every deeper level.
    pub fn clear_from(&mut self, level: AdministrativeLevel) {
        for l in level.and_descendants() {
            self.clear(l);
        }
    }

    /// Removes every marker and boundary across all levels.
    pub fn clear_all(&mut self) {
        self.clear_from(AdministrativeLevel::Province);
    }

    /// Recenters and zooms the viewport.
    pub fn pan_to(&mut self, center: LatLng, zoom: u8) {
        self.surface.set_view(center, zoom);
    }

    /// Returns the viewport to the default center and zoom.
    pub fn reset_view(&mut self) {
        self.surface.set_view(self.default_center, self.default_zoom);
    }

    /// Whether a marker is live at this level.
    pub fn has_marker(&self, level: AdministrativeLevel) -> bool {
        self.markers.contains_key(&level)
    }

    /// Whether a boundary is live at this level.
    pub fn has_boundary(&self, level: AdministrativeLevel) -> bool {
        self.boundaries.contains_key(&level)
    }

    /// Read access to the wrapped surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
