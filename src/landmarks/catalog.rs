//! Landmark metadata catalog with footprint-id remapping.

use hashbrown::HashMap;

use crate::models::{Footprint, LandmarkInfo};

/// Immutable landmark lookup built once at startup.
///
/// Footprint ids and landmark ids are separate namespaces; the remap table
/// bridges them, defaulting to identity for ids it does not list.
pub struct LandmarkCatalog {
    by_id: HashMap<String, LandmarkInfo>,
    /// Insertion order of the entries, kept for stable listings
    order: Vec<String>,
    remap: HashMap<&'static str, &'static str>,
}

impl LandmarkCatalog {
    pub fn new(entries: Vec<LandmarkInfo>, remap: Vec<(&'static str, &'static str)>) -> Self {
        let order: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
        let by_id = entries.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            by_id,
            order,
            remap: remap.into_iter().collect(),
        }
    }

    /// Catalog over the built-in tables.
    pub fn builtin() -> Self {
        Self::new(super::data::builtin_landmarks(), super::data::builtin_remap())
    }

    /// Translate a footprint id to a landmark id, falling back to the input
    /// unchanged when the table has no entry.
    pub fn remap_id<'a>(&self, footprint_id: &'a str) -> &'a str {
        self.remap.get(footprint_id).copied().unwrap_or(footprint_id)
    }

    pub fn get(&self, id: &str) -> Option<&LandmarkInfo> {
        self.by_id.get(id)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &LandmarkInfo> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Rich metadata for a matched footprint: the remapped catalog entry when
    /// one exists, otherwise a minimal record synthesized from the footprint
    /// alone.
    pub fn enrich(&self, footprint: &Footprint) -> LandmarkInfo {
        let landmark_id = self.remap_id(footprint.id);
        match self.by_id.get(landmark_id) {
            Some(info) => info.clone(),
            None => LandmarkInfo::minimal(footprint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    fn footprint(id: &'static str) -> Footprint {
        Footprint {
            id,
            name: "Test Hall",
            name_localized: "시험전",
            northwest: GeoPoint::new(37.001, 126.0),
            southeast: GeoPoint::new(37.0, 126.001),
        }
    }

    #[test]
    fn test_remap_identity_fallback() {
        let catalog = LandmarkCatalog::builtin();
        assert_eq!(catalog.remap_id("geungjeongjeon"), "geunjeongjeon");
        assert_eq!(catalog.remap_id("no-such-footprint"), "no-such-footprint");
    }

    #[test]
    fn test_enrich_prefers_catalog_entry() {
        let catalog = LandmarkCatalog::builtin();
        let info = catalog.enrich(&footprint("geungjeongjeon"));
        assert_eq!(info.id, "geunjeongjeon");
        assert_eq!(info.name, "Geunjeongjeon Hall");
    }

    #[test]
    fn test_enrich_synthesizes_minimal_record() {
        let catalog = LandmarkCatalog::builtin();
        let fp = footprint("unknown-hall");
        let info = catalog.enrich(&fp);
        assert_eq!(info.id, "unknown-hall");
        assert_eq!(info.name, "Test Hall");
        // Midpoint of the corners stands in for the missing center
        assert!((info.center.lat - 37.0005).abs() < 1e-9);
        assert!((info.center.lon - 126.0005).abs() < 1e-9);
        assert!(!info.description.is_empty());
    }
}
