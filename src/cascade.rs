//! The cascading selection state machine.
//!
//! One parameterized implementation drives all four dependent selectors: on a
//! selection the controller updates [`SelectionState`], clears every
//! descendant control and overlay, fetches the level's detail and its
//! children concurrently, and, if the selection is still current when the
//! responses land, updates the map and panel.
//!
//! Selection currency is the system's principal race: the user may pick a new
//! value while an earlier fetch is still in flight. Every request carries a
//! [`SelectionTicket`] stamped with the selection epoch at issue time;
//! [`CascadeController::apply_payload`] compares it against the current epoch
//! and silently drops anything stale, so a late response can never flicker
//! the UI back to an abandoned selection.

use std::collections::{HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use crate::client::GeoDataClient;
use crate::config::{APPROX_OFFSET_DEGREES, DEFAULT_CENTER};
use crate::error::FetchError;
use crate::geometry::{normalize_boundary, BoundaryStyle, LatLng};
use crate::level::AdministrativeLevel;
use crate::models::{GeoDetail, LocationOption};
use crate::overlay::MapOverlayManager;
use crate::selection::SelectionState;
use crate::surface::{MapSurface, SelectorPanel};

/// Currency token for one in-flight selection.
///
/// Issued by [`CascadeController::begin_selection`] after the selection state
/// has been updated; the epoch it carries is compared against the live state
/// when the fetch completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    level: AdministrativeLevel,
    code: String,
    epoch: u64,
}

impl SelectionTicket {
    /// The level this selection targets.
    pub fn level(&self) -> AdministrativeLevel {
        self.level
    }

    /// The selected code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Everything fetched for one selection: the entity's detail (with boundary,
/// where the service has one) and the child options scoped to it.
#[derive(Debug, Clone, Default)]
pub struct LevelPayload {
    /// Detail/geo attributes of the selected entity.
    pub detail: GeoDetail,
    /// Children for the next level's control; empty at Village.
    pub children: Vec<LocationOption>,
}

/// What became of a `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The fetched payload was applied to the map and panel.
    Applied,
    /// A newer selection superseded this one; the payload was dropped.
    Stale,
    /// The fetch failed; an inline error was shown and descendants stay
    /// disabled.
    Failed,
    /// A deselect: the subtree was cleared without fetching.
    Cleared,
}

/// Orchestrator of the four dependent selectors, the map overlays, and the
/// info panel.
pub struct CascadeController<S: MapSurface, P: SelectorPanel> {
    client: GeoDataClient,
    selection: SelectionState,
    overlays: MapOverlayManager<S>,
    panel: P,
    /// Last applied marker position per level; the anchor for approximate
    /// child placement and for deselect pan-backs.
    anchors: HashMap<AdministrativeLevel, LatLng>,
    /// Levels whose boundary layer the user toggled off.
    hidden_boundaries: HashSet<AdministrativeLevel>,
    list_limit: u32,
}

impl<S: MapSurface, P: SelectorPanel> CascadeController<S, P> {
    /// Builds a controller over the given collaborators.
    pub fn new(client: GeoDataClient, surface: S, panel: P, list_limit: u32) -> Self {
        CascadeController {
            client,
            selection: SelectionState::new(),
            overlays: MapOverlayManager::new(surface),
            panel,
            anchors: HashMap::new(),
            hidden_boundaries: HashSet::new(),
            list_limit,
        }
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The overlay manager (read access, for inspection).
    pub fn overlays(&self) -> &MapOverlayManager<S> {
        &self.overlays
    }

    /// The selector panel collaborator (read access, for inspection).
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Fetches the root province options and populates the province control.
    ///
    /// Called once at startup and not tied to any selection, so it carries no
    /// ticket.
    pub async fn load_provinces(
        &mut self,
        search: Option<&str>,
    ) -> Result<Vec<LocationOption>, FetchError> {
        let options = self
            .client
            .list(AdministrativeLevel::Province, None, self.list_limit, search)
            .await?;
        self.panel.populate(AdministrativeLevel::Province, &options);
        Ok(options)
    }

    /// Synchronous phase of a selection: records the new code (clearing all
    /// descendant selections), empties and disables every descendant control,
    /// removes the affected overlays, and issues the currency ticket.
    ///
    /// The user never sees stale child options from a previous branch: they
    /// are gone before any fetch is issued.
    pub fn begin_selection(
        &mut self,
        level: AdministrativeLevel,
        code: &str,
    ) -> SelectionTicket {
        self.selection.set(level, Some(code.to_string()));
        self.overlays.clear_from(level);
        for deeper in level.descendants() {
            self.panel.clear_level(deeper);
            self.anchors.remove(&deeper);
        }
        debug!("selection {} -> {code} (epoch {})", level.label(), self.selection.epoch());
        SelectionTicket {
            level,
            code: code.to_string(),
            epoch: self.selection.epoch(),
        }
    }

    /// Fetches the detail and the child listing for a ticket, concurrently.
    pub async fn fetch_payload(
        &self,
        ticket: &SelectionTicket,
    ) -> Result<LevelPayload, FetchError> {
        let detail_fut = self.client.geo_detail(ticket.level, &ticket.code);
        match ticket.level.child() {
            Some(child) => {
                let children_fut =
                    self.client
                        .list(child, Some(ticket.code.as_str()), self.list_limit, None);
                let (detail, children) = futures::try_join!(detail_fut, children_fut)?;
                Ok(LevelPayload { detail, children })
            }
            None => Ok(LevelPayload {
                detail: detail_fut.await?,
                children: Vec::new(),
            }),
        }
    }

    /// Completion phase: applies a fetched payload if (and only if) the
    /// ticket is still current.
    ///
    /// Returns `false` without touching any visible state when a newer
    /// selection has superseded the ticket: the staleness guard.
    pub fn apply_payload(&mut self, ticket: &SelectionTicket, payload: LevelPayload) -> bool {
        if ticket.epoch != self.selection.epoch() {
            debug!(
                "dropping stale {} payload for {} (epoch {} != {})",
                ticket.level.label(),
                ticket.code,
                ticket.epoch,
                self.selection.epoch()
            );
            return false;
        }
        let level = ticket.level;

        let (position, approximate) = match payload.detail.coordinate() {
            Some(exact) => (exact, false),
            None => {
                let anchor = level
                    .parent()
                    .and_then(|parent| self.anchors.get(&parent).copied())
                    .unwrap_or(DEFAULT_CENTER);
                (approximate_position(anchor, &ticket.code), true)
            }
        };
        self.anchors.insert(level, position);

        let popup = marker_popup(level, &payload.detail, approximate);
        self.overlays.set_marker(level, position, &popup);

        let rings = payload
            .detail
            .boundary
            .as_ref()
            .map(normalize_boundary)
            .unwrap_or_default();
        if rings.is_empty() || self.hidden_boundaries.contains(&level) {
            self.overlays.clear_boundary(level);
        } else {
            self.overlays
                .set_boundary(level, &rings, &BoundaryStyle::for_level(level));
        }

        self.overlays.pan_to(position, level.zoom());

        if let Some(child) = level.child() {
            self.panel.populate(child, &payload.children);
        }

        let mut rows = payload.detail.info_pairs();
        if approximate {
            rows.push(("Position", "approximate (near parent)".to_string()));
        }
        self.panel.show_detail(level, &rows);

        info!(
            "applied {} {} ({}){}",
            level.label(),
            ticket.code,
            payload.detail.name,
            if approximate { ", approximate position" } else { "" }
        );
        true
    }

    /// Handles a control event at `level`.
    ///
    /// `None` (or an empty code) is a deselect: the subtree is cleared and
    /// the viewport falls back to the parent, or to the default view at
    /// Province. Otherwise the full begin → fetch → apply pipeline runs.
    ///
    /// A fetch failure is absorbed here, the sole layer responsible for
    /// user-visible degradation: an inline message is shown for the level and
    /// its descendant controls stay disabled. Nothing propagates.
    pub async fn select(
        &mut self,
        level: AdministrativeLevel,
        code: Option<&str>,
    ) -> SelectionOutcome {
        let Some(code) = code.filter(|c| !c.is_empty()) else {
            self.deselect(level);
            return SelectionOutcome::Cleared;
        };

        let ticket = self.begin_selection(level, code);
        match self.fetch_payload(&ticket).await {
            Ok(payload) => {
                if self.apply_payload(&ticket, payload) {
                    SelectionOutcome::Applied
                } else {
                    SelectionOutcome::Stale
                }
            }
            Err(e) => {
                error!("failed to load {} {}: {e}", level.label(), ticket.code);
                self.panel
                    .show_error(level, &format!("Failed to load {} data", level.label()));
                SelectionOutcome::Failed
            }
        }
    }

    /// Clears the selection at `level` and everything below it.
    pub fn deselect(&mut self, level: AdministrativeLevel) {
        self.selection.set(level, None);
        self.overlays.clear_from(level);
        for l in level.and_descendants() {
            self.anchors.remove(&l);
        }
        for deeper in level.descendants() {
            self.panel.clear_level(deeper);
        }
        self.panel.clear_detail();

        match level
            .parent()
            .and_then(|parent| self.anchors.get(&parent).map(|a| (parent, *a)))
        {
            Some((parent, anchor)) => self.overlays.pan_to(anchor, parent.zoom()),
            None => self.overlays.reset_view(),
        }
        debug!("deselected {} and below", level.label());
    }

    /// Shows or hides a level's boundary layer.
    ///
    /// Hiding removes the live layer immediately and is remembered for later
    /// selections at that level. Re-enabling takes effect on the next
    /// selection; boundary payloads are fetched per selection, never cached.
    pub fn set_boundary_visible(&mut self, level: AdministrativeLevel, visible: bool) {
        if visible {
            self.hidden_boundaries.remove(&level);
        } else {
            self.hidden_boundaries.insert(level);
            self.overlays.clear_boundary(level);
        }
    }

    /// Restores the whole subsystem to its initial configuration: empty
    /// selection, no overlays, default viewport, every descendant control
    /// empty and disabled, boundary toggles back to their defaults.
    ///
    /// Safe to call at any point, including before the province list has
    /// loaded.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.overlays.clear_all();
        self.overlays.reset_view();
        for level in AdministrativeLevel::iter() {
            if level.parent().is_some() {
                self.panel.clear_level(level);
            }
        }
        self.panel.clear_detail();
        self.hidden_boundaries.clear();
        self.panel.reset_toggles();
        self.anchors.clear();
        info!("cascade reset to initial state");
    }
}

/// Deterministic "near the parent" placement for levels without upstream
/// coordinates: a seeded offset of at most [`APPROX_OFFSET_DEGREES`] in each
/// axis, derived from the child code so placement is stable across runs.
fn approximate_position(anchor: LatLng, code: &str) -> LatLng {
    let mut hasher = DefaultHasher::new();
    code.hash(&mut hasher);
    let mut rng = StdRng::seed_from_u64(hasher.finish());
    LatLng {
        lat: anchor.lat + rng.random_range(-APPROX_OFFSET_DEGREES..APPROX_OFFSET_DEGREES),
        lng: anchor.lng + rng.random_range(-APPROX_OFFSET_DEGREES..APPROX_OFFSET_DEGREES),
    }
}

fn marker_popup(level: AdministrativeLevel, detail: &GeoDetail, approximate: bool) -> String {
    if approximate {
        format!(
            "{} ({}) - approximate location, not the exact position",
            detail.name,
            level.label()
        )
    } else {
        format!("{} ({})", detail.name, level.label())
    }
}
