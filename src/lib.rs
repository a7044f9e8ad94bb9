//! geo_cascade: a cascading explorer for Indonesia's four-level
//! administrative hierarchy (province → city/regency → district → village).
//!
//! Three things move in lockstep as the user drills down: the four dependent
//! selector controls, the map overlays (one marker and one boundary per
//! level), and an on-demand fetch pipeline against a remote geo-data service.
//! The interesting parts live in:
//!
//! - [`cascade::CascadeController`]: the selection state machine with its
//!   staleness guard for in-flight fetches
//! - [`geometry::normalize_boundary`]: defensive normalization of the
//!   service's inconsistent polygon encodings
//! - [`overlay::MapOverlayManager`]: exclusive ownership of every live map
//!   layer
//!
//! The map widget and the selector controls themselves are collaborators
//! behind the [`surface::MapSurface`] and [`surface::SelectorPanel`] traits;
//! the crate ships a console implementation in its binary and recording
//! fakes in its integration tests.
//!
//! # Example
//!
//! ```no_run
//! use geo_cascade::{AdministrativeLevel, CascadeController, GeoDataClient};
//! # use geo_cascade::surface::{MapSurface, SelectorPanel};
//! # async fn example<S: MapSurface, P: SelectorPanel>(surface: S, panel: P) -> anyhow::Result<()> {
//! let client = GeoDataClient::new("https://api.wilayah-indonesia.dev")?;
//! let mut controller = CascadeController::new(client, surface, panel, 100);
//! controller.load_provinces(None).await?;
//! controller.select(AdministrativeLevel::Province, Some("31")).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod cascade;
pub mod client;
pub mod config;
pub mod error;
pub mod geometry;
pub mod level;
pub mod models;
pub mod overlay;
pub mod selection;
pub mod surface;

pub use cascade::{CascadeController, LevelPayload, SelectionOutcome, SelectionTicket};
pub use client::GeoDataClient;
pub use config::Config;
pub use error::FetchError;
pub use geometry::{normalize_boundary, BoundaryStyle, LatLng, Ring};
pub use level::AdministrativeLevel;
pub use models::{GeoDetail, LocationOption};
pub use overlay::MapOverlayManager;
pub use selection::SelectionState;
