//! # usng
//!
//! Codec de coordonnées géodésiques : conversions bidirectionnelles entre
//! latitude/longitude, la projection UTM et les désignations alphanumériques
//! USNG/MGRS.
//!
//! ## Features
//!
//! - Projection Transverse Mercator directe et inverse (séries au 6e ordre)
//! - Zones UTM 1-60 avec les exceptions Norvège/Svalbard
//! - Carrés de 100 km pilotés par une table de rotation unique
//! - Parseur et validateur de chaînes USNG/MGRS, précision 0-6
//! - Datums NAD83 (défaut) et NAD27, paramètres immuables : aucun état
//!   partagé mutable, toutes les conversions sont thread-safe
//! - Types `geo` pour l'interopérabilité avec l'écosystème Rust géospatial
//!
//! ## Usage
//!
//! ```rust
//! use usng::{Converter, Datum};
//!
//! let converter = Converter::new(Datum::Nad83);
//!
//! let usng = converter.ll_to_usng(38.8895, -77.0352, 6)?;
//! assert_eq!(usng, "18S UJ 23487 06483");
//!
//! let point = converter.usng_to_ll(&usng, true)?.center();
//! assert!((point.lat - 38.8895).abs() < 1e-4);
//! # Ok::<(), usng::UsngError>(())
//! ```

pub mod datum;
pub mod error;
pub mod format;
pub mod grid;
pub mod parse;
pub mod tm;
pub mod types;
pub mod zone;

pub use datum::{Datum, Ellipsoid};
pub use error::UsngError;
pub use parse::{is_valid_usng, parse_usng, UsngDesignation};
pub use types::{Hemisphere, LatLon, LatLonBounds, LatLonOrBounds, UtmCoordinate};
pub use zone::{band_letter, zone_number};

/// Convertisseur configuré sur un datum
///
/// Valeur immuable et copiable : les paramètres d'ellipsoïde sont dérivés
/// une fois à la construction, le même convertisseur peut être partagé
/// entre threads sans synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Converter {
    ellipsoid: Ellipsoid,
}

impl Converter {
    /// Crée un convertisseur pour le datum donné
    pub fn new(datum: Datum) -> Self {
        Self {
            ellipsoid: Ellipsoid::new(datum),
        }
    }

    /// Paramètres d'ellipsoïde utilisés par ce convertisseur
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Projette un point géographique en coordonnées UTM
    pub fn ll_to_utm(
        &self,
        lat: f64,
        lon: f64,
        zone_override: Option<u8>,
    ) -> Result<UtmCoordinate, UsngError> {
        tm::ll_to_utm(&self.ellipsoid, lat, lon, zone_override)
    }

    /// Reconvertit une coordonnée UTM en point (ou emprise si `accuracy`)
    pub fn utm_to_ll(
        &self,
        northing: f64,
        easting: f64,
        zone: u8,
        accuracy: Option<f64>,
    ) -> Result<LatLonOrBounds, UsngError> {
        tm::utm_to_ll(&self.ellipsoid, northing, easting, zone, accuracy)
    }

    /// Formate un point en chaîne USNG à la précision demandée (0-6)
    pub fn ll_to_usng(&self, lat: f64, lon: f64, precision: u8) -> Result<String, UsngError> {
        format::ll_to_usng(&self.ellipsoid, lat, lon, precision)
    }

    /// Formate un point en chaîne MGRS (USNG sans délimiteurs)
    pub fn ll_to_mgrs(&self, lat: f64, lon: f64, precision: u8) -> Result<String, UsngError> {
        format::ll_to_mgrs(&self.ellipsoid, lat, lon, precision)
    }

    /// Formate une emprise en chaîne USNG à la précision la mieux adaptée
    pub fn ll_bbox_to_usng(
        &self,
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    ) -> Result<String, UsngError> {
        format::ll_bbox_to_usng(&self.ellipsoid, north, south, east, west)
    }

    /// Convertit une chaîne USNG/MGRS en point ou emprise géographique
    pub fn usng_to_ll(&self, input: &str, center_only: bool) -> Result<LatLonOrBounds, UsngError> {
        parse::usng_to_ll(&self.ellipsoid, input, center_only)
    }
}

/// Formate un point en chaîne USNG sur le datum NAD83
pub fn ll_to_usng(lat: f64, lon: f64, precision: u8) -> Result<String, UsngError> {
    Converter::default().ll_to_usng(lat, lon, precision)
}

/// Formate un point en chaîne MGRS sur le datum NAD83
pub fn ll_to_mgrs(lat: f64, lon: f64, precision: u8) -> Result<String, UsngError> {
    Converter::default().ll_to_mgrs(lat, lon, precision)
}

/// Formate une emprise en chaîne USNG sur le datum NAD83
pub fn ll_bbox_to_usng(north: f64, south: f64, east: f64, west: f64) -> Result<String, UsngError> {
    Converter::default().ll_bbox_to_usng(north, south, east, west)
}

/// Projette un point en UTM sur le datum NAD83
pub fn ll_to_utm(lat: f64, lon: f64, zone_override: Option<u8>) -> Result<UtmCoordinate, UsngError> {
    Converter::default().ll_to_utm(lat, lon, zone_override)
}

/// Reconvertit une coordonnée UTM sur le datum NAD83
pub fn utm_to_ll(
    northing: f64,
    easting: f64,
    zone: u8,
    accuracy: Option<f64>,
) -> Result<LatLonOrBounds, UsngError> {
    Converter::default().utm_to_ll(northing, easting, zone, accuracy)
}

/// Convertit une chaîne USNG/MGRS sur le datum NAD83
pub fn usng_to_ll(input: &str, center_only: bool) -> Result<LatLonOrBounds, UsngError> {
    Converter::default().usng_to_ll(input, center_only)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<Converter>();
    }

    #[test]
    fn test_default_datum_is_nad83() {
        assert_eq!(
            Converter::default().ellipsoid(),
            Converter::new(Datum::Nad83).ellipsoid()
        );
    }

    #[test]
    fn test_free_functions_match_converter() {
        let converter = Converter::new(Datum::Nad83);
        assert_eq!(
            ll_to_usng(38.8895, -77.0352, 6).unwrap(),
            converter.ll_to_usng(38.8895, -77.0352, 6).unwrap()
        );
    }

    #[test]
    fn test_nad27_differs_from_nad83() {
        let nad83 = Converter::new(Datum::Nad83);
        let nad27 = Converter::new(Datum::Nad27);
        let a = nad83.ll_to_utm(38.8895, -77.0352, None).unwrap();
        let b = nad27.ll_to_utm(38.8895, -77.0352, None).unwrap();
        // Les deux datums divergent de quelques dizaines de mètres
        assert!((a.northing - b.northing).abs() > 1.0);
        assert_eq!(a.zone, b.zone);
    }
}
