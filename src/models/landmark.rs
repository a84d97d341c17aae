//! Landmark and footprint types used by the resolver.

use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Rectangular ground-plane extent of a building, given as its
/// northwest/southeast corner pair.
///
/// Invariant: `northwest.lat > southeast.lat` and
/// `northwest.lon < southeast.lon`.
#[derive(Debug, Clone, Serialize)]
pub struct Footprint {
    /// Footprint id; a separate namespace from landmark ids, bridged by the
    /// catalog's remapping table.
    pub id: &'static str,

    /// English name
    pub name: &'static str,

    /// Korean name
    pub name_localized: &'static str,

    pub northwest: GeoPoint,
    pub southeast: GeoPoint,
}

impl Footprint {
    /// Midpoint of the two corners, used when synthesizing a minimal
    /// landmark record for footprints without catalog metadata.
    pub fn midpoint(&self) -> GeoPoint {
        GeoPoint::new(
            (self.northwest.lat + self.southeast.lat) / 2.0,
            (self.northwest.lon + self.southeast.lon) / 2.0,
        )
    }
}

/// A named point of interest with a center coordinate and descriptive
/// metadata, independent of any footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkInfo {
    pub id: String,

    /// English name
    pub name: String,

    /// Korean name
    pub name_localized: String,

    pub center: GeoPoint,

    pub description: String,

    /// Kept as text; several entries only record an era
    pub build_year: String,

    /// Heritage designation (national treasure number etc.)
    pub heritage: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl LandmarkInfo {
    /// Minimal record for a footprint that has no catalog entry.
    ///
    /// The resolver must never fail a request merely because enrichment data
    /// is missing, so this constructor fills every descriptive field with a
    /// generic placeholder derived from the footprint itself.
    pub fn minimal(footprint: &Footprint) -> Self {
        Self {
            id: footprint.id.to_string(),
            name: footprint.name.to_string(),
            name_localized: footprint.name_localized.to_string(),
            center: footprint.midpoint(),
            description: format!("{}은 경복궁의 중요한 건물 중 하나입니다.", footprint.name_localized),
            build_year: "조선시대".to_string(),
            heritage: "문화재".to_string(),
            features: vec!["전통 건축".to_string(), "경복궁 건물".to_string()],
            images: Vec::new(),
        }
    }
}

/// Output of a resolver call. Constructed fresh per request; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedLandmark {
    pub id: String,
    pub name: String,
    pub matched_by_footprint: bool,
    /// 0 for a footprint match, the haversine distance for a fallback match
    pub distance_meters: Option<f64>,
}
