//! Interfaces to the surrounding page.
//!
//! The core never talks to a concrete map widget or DOM. It drives two
//! collaborator seams: a [`MapSurface`] (the map viewport and its layer set)
//! and a [`SelectorPanel`] (the four dependent selector controls plus the
//! info panel). The CLI binary implements them over the console; tests
//! implement them as recording fakes.

use crate::geometry::{BoundaryStyle, LatLng, Ring};
use crate::level::AdministrativeLevel;
use crate::models::LocationOption;

/// A map viewport that can hold marker and polygon layers.
///
/// Handles are opaque to the core; the overlay manager only stores them and
/// hands them back for removal. Implementations do not need to deduplicate;
/// layer lifecycle discipline is the overlay manager's job.
pub trait MapSurface {
    /// Opaque identifier of a live layer.
    type LayerHandle;

    /// Draws a point marker with popup content, returning its handle.
    fn add_marker(&mut self, position: LatLng, popup: &str) -> Self::LayerHandle;

    /// Draws a polygon layer from closed rings, returning its handle.
    /// Callers never pass an empty ring list.
    fn add_polygon(&mut self, rings: &[Ring], style: &BoundaryStyle) -> Self::LayerHandle;

    /// Removes a previously added layer.
    fn remove_layer(&mut self, layer: Self::LayerHandle);

    /// Recenters and zooms the viewport.
    fn set_view(&mut self, center: LatLng, zoom: u8);
}

/// The dependent selector controls and the info panel.
pub trait SelectorPanel {
    /// Fills a level's control with options and enables it.
    fn populate(&mut self, level: AdministrativeLevel, options: &[LocationOption]);

    /// Empties and disables a level's control.
    fn clear_level(&mut self, level: AdministrativeLevel);

    /// Shows the selected entity's attribute rows in the info panel.
    fn show_detail(&mut self, level: AdministrativeLevel, rows: &[(&'static str, String)]);

    /// Clears the info panel.
    fn clear_detail(&mut self);

    /// Shows an inline load-failure message for a level. The page must keep
    /// working; this is a degraded display, not an exception.
    fn show_error(&mut self, level: AdministrativeLevel, message: &str);

    /// Restores every boundary-visibility toggle to its default state.
    fn reset_toggles(&mut self);
}
