//! The administrative hierarchy and its per-level endpoint table.
//!
//! Indonesia's four administrative levels are totally ordered by containment
//! (a province contains cities, a city contains districts, a district contains
//! villages). All level-specific knowledge (endpoint paths, the query
//! parameter that scopes a listing to its parent, map zoom depth) lives in
//! the exhaustive matches below, so the cascade logic itself stays generic.

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// One rank in the province/city/district/village containment hierarchy.
///
/// The derived ordering follows containment: `Province < City < District <
/// Village`, deeper levels comparing greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display)]
pub enum AdministrativeLevel {
    /// Provinsi
    Province,
    /// Kabupaten / Kota
    City,
    /// Kecamatan
    District,
    /// Desa / Kelurahan
    Village,
}

impl AdministrativeLevel {
    /// Zero-based depth, Province first.
    pub fn index(self) -> usize {
        match self {
            AdministrativeLevel::Province => 0,
            AdministrativeLevel::City => 1,
            AdministrativeLevel::District => 2,
            AdministrativeLevel::Village => 3,
        }
    }

    /// The containing level, `None` for Province.
    pub fn parent(self) -> Option<Self> {
        match self {
            AdministrativeLevel::Province => None,
            AdministrativeLevel::City => Some(AdministrativeLevel::Province),
            AdministrativeLevel::District => Some(AdministrativeLevel::City),
            AdministrativeLevel::Village => Some(AdministrativeLevel::District),
        }
    }

    /// The next level down, `None` for Village.
    pub fn child(self) -> Option<Self> {
        match self {
            AdministrativeLevel::Province => Some(AdministrativeLevel::City),
            AdministrativeLevel::City => Some(AdministrativeLevel::District),
            AdministrativeLevel::District => Some(AdministrativeLevel::Village),
            AdministrativeLevel::Village => None,
        }
    }

    /// All levels strictly deeper than this one, shallowest first.
    pub fn descendants(self) -> impl Iterator<Item = Self> {
        Self::iter().filter(move |level| *level > self)
    }

    /// This level followed by all of its descendants.
    pub fn and_descendants(self) -> impl Iterator<Item = Self> {
        Self::iter().filter(move |level| *level >= self)
    }

    /// Path of the listing endpoint for this level.
    pub fn list_path(self) -> &'static str {
        match self {
            AdministrativeLevel::Province => "/provinsi",
            AdministrativeLevel::City => "/kabupaten-kota",
            AdministrativeLevel::District => "/kecamatan",
            AdministrativeLevel::Village => "/desa-kelurahan",
        }
    }

    /// Path of the detail endpoint for one entity at this level.
    pub fn detail_path(self, code: &str) -> String {
        format!("{}/{}", self.list_path(), code)
    }

    /// Path of the geo/boundary endpoint, where the service provides one.
    ///
    /// Only Province and City carry coordinates and boundaries upstream;
    /// District and Village return `None` and their map position must be
    /// approximated from the owning city.
    pub fn geo_path(self, code: &str) -> Option<String> {
        match self {
            AdministrativeLevel::Province | AdministrativeLevel::City => {
                Some(format!("{}/geo", self.detail_path(code)))
            }
            AdministrativeLevel::District | AdministrativeLevel::Village => None,
        }
    }

    /// Whether the service reports exact coordinates for this level.
    pub fn has_own_coordinates(self) -> bool {
        self.geo_path("x").is_some()
    }

    /// Query parameter that scopes this level's listing to its parent entity.
    pub fn scope_param(self) -> Option<&'static str> {
        match self {
            AdministrativeLevel::Province => None,
            AdministrativeLevel::City => Some("provinceCode"),
            AdministrativeLevel::District => Some("cityCode"),
            AdministrativeLevel::Village => Some("districtCode"),
        }
    }

    /// Map zoom used when focusing an entity at this level. Deeper levels zoom
    /// in further.
    pub fn zoom(self) -> u8 {
        match self {
            AdministrativeLevel::Province => 8,
            AdministrativeLevel::City => 10,
            AdministrativeLevel::District => 12,
            AdministrativeLevel::Village => 14,
        }
    }

    /// Lowercase label for log lines and user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            AdministrativeLevel::Province => "province",
            AdministrativeLevel::City => "city",
            AdministrativeLevel::District => "district",
            AdministrativeLevel::Village => "village",
        }
    }
}
