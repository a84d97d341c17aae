//! GPS coordinate → landmark resolution.
//!
//! Two strategies in priority order: buffered-rectangle containment over the
//! footprint table, then a haversine nearest-landmark fallback over the
//! catalog centers.

use geo::Intersects;
use geo_types::{Coord, Point, Rect};
use tracing::debug;

use super::geometry::haversine_distance_meters;
use super::LandmarkCatalog;
use crate::models::{Footprint, GeoPoint, LandmarkInfo, ResolvedLandmark};

/// Tolerance added outward on all four sides of a footprint, in degrees.
/// Roughly 5 m, absorbing consumer-grade GPS error; a user standing at a
/// wall's true edge still reads as inside. Fixed, not adaptive.
pub const FOOTPRINT_BUFFER_DEG: f64 = 0.00005;

/// Maximum distance at which the nearest-landmark fallback still matches.
pub const FALLBACK_RADIUS_M: f64 = 100.0;

pub struct LandmarkResolver {
    /// Scan order is declaration order; first match wins
    footprints: Vec<Footprint>,
    catalog: LandmarkCatalog,
}

impl LandmarkResolver {
    pub fn new(footprints: Vec<Footprint>, catalog: LandmarkCatalog) -> Self {
        Self { footprints, catalog }
    }

    /// Resolver over the built-in tables.
    pub fn builtin() -> Self {
        Self::new(super::data::builtin_footprints(), LandmarkCatalog::builtin())
    }

    pub fn catalog(&self) -> &LandmarkCatalog {
        &self.catalog
    }

    /// Resolve a GPS fix to a landmark, or `None` when nothing is close
    /// enough. No match is an expected result, not an error; out-of-range
    /// coordinates simply match nothing.
    pub fn resolve(&self, lat: f64, lon: f64) -> Option<ResolvedLandmark> {
        if let Some(footprint) = self.find_footprint(lat, lon) {
            debug!("footprint match at ({}, {}): {}", lat, lon, footprint.id);
            let info = self.catalog.enrich(footprint);
            return Some(ResolvedLandmark {
                id: info.id,
                name: info.name,
                matched_by_footprint: true,
                distance_meters: Some(0.0),
            });
        }

        self.find_nearest(lat, lon)
            .map(|(info, distance)| ResolvedLandmark {
                id: info.id.clone(),
                name: info.name.clone(),
                matched_by_footprint: false,
                distance_meters: Some(distance),
            })
    }

    /// Full metadata for a matched coordinate, for callers that need more
    /// than the resolution result (e.g. narrative prompts).
    pub fn resolve_info(&self, lat: f64, lon: f64) -> Option<LandmarkInfo> {
        if let Some(footprint) = self.find_footprint(lat, lon) {
            return Some(self.catalog.enrich(footprint));
        }
        self.find_nearest(lat, lon).map(|(info, _)| info.clone())
    }

    /// Look up a landmark by either namespace: a landmark id directly, or a
    /// footprint id remapped (and synthesized when the catalog has no entry).
    pub fn landmark_by_id(&self, id: &str) -> Option<LandmarkInfo> {
        if let Some(info) = self.catalog.get(self.catalog.remap_id(id)) {
            return Some(info.clone());
        }
        self.footprints
            .iter()
            .find(|fp| fp.id == id)
            .map(|fp| self.catalog.enrich(fp))
    }

    /// First footprint whose buffered rectangle contains the point.
    fn find_footprint(&self, lat: f64, lon: f64) -> Option<&Footprint> {
        let point = Point::new(lon, lat);
        self.footprints
            .iter()
            .find(|fp| buffered_rect(fp).intersects(&point))
    }

    /// Nearest catalog center within the fallback radius, strictly.
    fn find_nearest(&self, lat: f64, lon: f64) -> Option<(&LandmarkInfo, f64)> {
        let here = GeoPoint::new(lat, lon);
        let mut best: Option<(&LandmarkInfo, f64)> = None;

        for info in self.catalog.entries() {
            let distance = haversine_distance_meters(here, info.center);
            if distance < FALLBACK_RADIUS_M
                && best.map_or(true, |(_, min)| distance < min)
            {
                best = Some((info, distance));
            }
        }

        if let Some((info, distance)) = best {
            debug!(
                "fallback match at ({}, {}): {} ({:.1} m)",
                lat, lon, info.id, distance
            );
        }
        best
    }
}

/// Footprint bounds expanded by the GPS buffer on all four sides.
///
/// Containment must be boundary-inclusive on both axes, which is why this
/// tests `intersects` rather than `contains` (geo's `Contains` excludes the
/// boundary).
fn buffered_rect(fp: &Footprint) -> Rect<f64> {
    Rect::new(
        Coord {
            x: fp.northwest.lon - FOOTPRINT_BUFFER_DEG,
            y: fp.southeast.lat - FOOTPRINT_BUFFER_DEG,
        },
        Coord {
            x: fp.southeast.lon + FOOTPRINT_BUFFER_DEG,
            y: fp.northwest.lat + FOOTPRINT_BUFFER_DEG,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::data::builtin_landmarks;

    fn builtin() -> LandmarkResolver {
        LandmarkResolver::builtin()
    }

    #[test]
    fn test_point_inside_footprint_matches() {
        let resolver = builtin();
        // Interior of the sajeongjeon rectangle
        let resolved = resolver.resolve(37.5790, 126.9770).expect("must match");
        assert_eq!(resolved.id, "sajeongjeon");
        assert!(resolved.matched_by_footprint);
        assert_eq!(resolved.distance_meters, Some(0.0));
    }

    #[test]
    fn test_footprint_id_is_remapped() {
        let resolver = builtin();
        // Interior of the geungjeongjeon rectangle; the catalog knows this
        // building as geunjeongjeon
        let resolved = resolver.resolve(37.5784, 126.9770).expect("must match");
        assert_eq!(resolved.id, "geunjeongjeon");
        assert!(resolved.matched_by_footprint);
    }

    #[test]
    fn test_buffer_extends_footprint_inclusively() {
        let resolver = builtin();
        let north = 37.579045873149205;
        let lon_inside = 126.9770;

        // Exactly on the boundary
        assert!(resolver.resolve(north, lon_inside).is_some());
        // On the buffered edge
        let on_buffer = resolver
            .resolve(north + FOOTPRINT_BUFFER_DEG, lon_inside)
            .expect("buffered edge must still match");
        assert_eq!(on_buffer.id, "sajeongjeon");
        assert!(on_buffer.matched_by_footprint);
        // Just beyond the buffer the footprint no longer matches; this point
        // is still within 100 m of catalog centers, so assert on the match
        // kind rather than on absence
        let beyond = resolver
            .resolve(north + FOOTPRINT_BUFFER_DEG + 0.000001, lon_inside)
            .expect("fallback still applies");
        assert!(!beyond.matched_by_footprint);

        // Same checks in the longitude direction
        let east = 126.97716009067494;
        let lat_inside = 37.5790;
        let on_buffer = resolver
            .resolve(lat_inside, east + FOOTPRINT_BUFFER_DEG)
            .expect("buffered edge must still match");
        assert_eq!(on_buffer.id, "sajeongjeon");
        assert!(on_buffer.matched_by_footprint);
        let beyond = resolver
            .resolve(lat_inside, east + FOOTPRINT_BUFFER_DEG + 0.000001)
            .expect("fallback still applies");
        assert!(!beyond.matched_by_footprint);
    }

    #[test]
    fn test_overlapping_footprints_resolve_to_first_declared() {
        let first = Footprint {
            id: "first-hall",
            name: "First Hall",
            name_localized: "일전",
            northwest: GeoPoint::new(37.0010, 126.0000),
            southeast: GeoPoint::new(37.0000, 126.0010),
        };
        let second = Footprint {
            id: "second-hall",
            name: "Second Hall",
            name_localized: "이전",
            northwest: GeoPoint::new(37.0015, 126.0005),
            southeast: GeoPoint::new(37.0005, 126.0015),
        };
        let catalog = LandmarkCatalog::new(builtin_landmarks(), Vec::new());

        let resolver = LandmarkResolver::new(vec![first.clone(), second.clone()], catalog);
        let resolved = resolver.resolve(37.0007, 126.0007).expect("in the overlap");
        assert_eq!(resolved.id, "first-hall");

        // Same point, reversed declaration order
        let catalog = LandmarkCatalog::new(builtin_landmarks(), Vec::new());
        let resolver = LandmarkResolver::new(vec![second, first], catalog);
        let resolved = resolver.resolve(37.0007, 126.0007).expect("in the overlap");
        assert_eq!(resolved.id, "second-hall");
    }

    #[test]
    fn test_fallback_within_radius() {
        let resolver = builtin();
        // ~55 m south of the deoksugung center, far from any footprint
        let resolved = resolver.resolve(37.5653, 126.9751).expect("must match");
        assert_eq!(resolved.id, "deoksugung");
        assert!(!resolved.matched_by_footprint);
        let distance = resolved.distance_meters.expect("fallback carries distance");
        let expected =
            haversine_distance_meters(GeoPoint::new(37.5653, 126.9751), GeoPoint::new(37.5658, 126.9751));
        assert!((distance - expected).abs() < 0.5);
        assert!(distance > 0.0 && distance < FALLBACK_RADIUS_M);
    }

    #[test]
    fn test_no_match_far_from_everything() {
        let resolver = builtin();
        assert!(resolver.resolve(0.0, 0.0).is_none());
        // Out-of-range coordinates are not an error, they just match nothing
        assert!(resolver.resolve(1234.5, -987.6).is_none());
    }

    #[test]
    fn test_palace_center_resolves() {
        let resolver = builtin();
        // Declared center of the gyeonghoeru/gyeongbokgung entries
        let resolved = resolver.resolve(37.5788, 126.9770).expect("must match");
        assert!(!resolved.id.is_empty());
    }

    #[test]
    fn test_resolve_info_synthesizes_for_unmapped_footprint() {
        let resolver = builtin();
        // Interior of eungjidang, which has no catalog entry
        let info = resolver
            .resolve_info(37.57957, 126.97675)
            .expect("footprint must match");
        assert_eq!(info.id, "eungjidang");
        assert_eq!(info.name, "Eungjidang");
        assert_eq!(info.build_year, "조선시대");
    }
}
