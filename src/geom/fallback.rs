use ahash::AHashMap;
use geo::Point;

use crate::region::{Normalizer, RegionCode};

/// Hand-placed points (lon, lat) for flow participants outside the polygon dataset:
/// origin and transit countries of the Mediterranean, Balkan and eastern routes.
const FALLBACK_POINTS: &[(&str, f64, f64)] = &[
    ("AF",  66.0,  33.9),   // Afghanistan
    ("BD",  90.3,  23.7),   // Bangladesh
    ("CD",  23.6,  -2.9),   // DR Congo
    ("CI",  -5.5,   7.5),   // Côte d'Ivoire
    ("CM",  12.3,   5.7),   // Cameroon
    ("DZ",   2.6,  28.0),   // Algeria
    ("EG",  30.8,  26.8),   // Egypt
    ("ER",  39.8,  15.2),   // Eritrea
    ("ET",  40.5,   9.1),   // Ethiopia
    ("GE",  43.4,  42.3),   // Georgia
    ("GM", -15.3,  13.4),   // Gambia
    ("GN",  -9.7,   9.9),   // Guinea
    ("IQ",  43.7,  33.2),   // Iraq
    ("IR",  53.7,  32.4),   // Iran
    ("LB",  35.9,  33.9),   // Lebanon
    ("LY",  17.2,  26.3),   // Libya
    ("MA",  -7.1,  31.8),   // Morocco
    ("ML",  -4.0,  17.6),   // Mali
    ("MR", -10.9,  21.0),   // Mauritania
    ("NE",   8.1,  17.6),   // Niger
    ("NG",   8.7,   9.1),   // Nigeria
    ("PK",  69.3,  30.4),   // Pakistan
    ("PS",  35.2,  31.9),   // Palestine
    ("RU",  37.6,  55.8),   // Russia (Moscow, not the geographic center)
    ("SD",  30.2,  12.9),   // Sudan
    ("SN", -14.5,  14.5),   // Senegal
    ("SO",  46.2,   5.2),   // Somalia
    ("SY",  38.9,  35.0),   // Syria
    ("TN",   9.5,  33.9),   // Tunisia
    ("TR",  35.2,  39.0),   // Türkiye
    ("UA",  31.2,  48.4),   // Ukraine
    ("VE", -66.6,   6.4),   // Venezuela
    ("YE",  48.5,  15.6),   // Yemen
];

/// Static point registry for regions that never appear as polygons.
/// Consulted only after the centroid index misses.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    points: AHashMap<RegionCode, Point<f64>>,
}

impl FallbackTable {
    /// The builtin table, keyed through `normalizer` so lookups of codes
    /// normalized by the same instance agree with it.
    pub fn builtin(normalizer: &Normalizer) -> Self {
        Self {
            points: FALLBACK_POINTS.iter()
                .map(|&(code, lon, lat)| (normalizer.normalize(code), Point::new(lon, lat)))
                .collect(),
        }
    }

    /// Add or replace a point; later entries win.
    pub fn insert(&mut self, code: RegionCode, point: Point<f64>) {
        self.points.insert(code, point);
    }

    #[inline] pub fn get(&self, code: &RegionCode) -> Option<Point<f64>> { self.points.get(code).copied() }

    #[inline] pub fn len(&self) -> usize { self.points.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }
}
