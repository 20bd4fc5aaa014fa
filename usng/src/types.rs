//! Types de données pour le crate usng

use geo::{Coord, Point, Rect};

/// Point géodésique en degrés décimaux
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    /// Latitude en degrés, dans [-90, 90]
    pub lat: f64,

    /// Longitude en degrés, dans [-180, 180]
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for Point<f64> {
    fn from(p: LatLon) -> Self {
        Point::new(p.lon, p.lat)
    }
}

/// Emprise géographique en degrés décimaux
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLonBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl LatLonBounds {
    /// Centre de l'emprise
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }
}

impl From<LatLonBounds> for Rect<f64> {
    fn from(b: LatLonBounds) -> Self {
        Rect::new(
            Coord {
                x: b.west,
                y: b.south,
            },
            Coord {
                x: b.east,
                y: b.north,
            },
        )
    }
}

/// Hémisphère d'une coordonnée UTM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    North,
    South,
}

/// Coordonnée UTM
///
/// Le northing est signé : négatif dans l'hémisphère sud, relatif à
/// l'équateur. Le décalage de 10 000 000 m (convention MGRS) n'est
/// appliqué qu'à la frontière des chaînes USNG, via
/// [`UtmCoordinate::hemisphere_northing`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtmCoordinate {
    /// Easting en mètres, décalé de +500 000 m du méridien central
    pub easting: f64,

    /// Northing signé en mètres depuis l'équateur
    pub northing: f64,

    /// Numéro de zone UTM, dans [1, 60]
    pub zone: u8,

    /// Hémisphère du point d'origine
    pub hemisphere: Hemisphere,
}

impl UtmCoordinate {
    /// Northing avec le faux northing de 10 000 000 m au sud (convention MGRS)
    pub fn hemisphere_northing(&self) -> f64 {
        match self.hemisphere {
            Hemisphere::North => self.northing,
            Hemisphere::South => self.northing + crate::tm::NORTHING_OFFSET,
        }
    }
}

/// Résultat d'une conversion inverse : point seul ou emprise
/// selon que la précision demandée est connue
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LatLonOrBounds {
    Point(LatLon),
    Bounds(LatLonBounds),
}

impl LatLonOrBounds {
    /// Point représentatif : le point lui-même ou le centre de l'emprise
    pub fn center(&self) -> LatLon {
        match self {
            Self::Point(p) => *p,
            Self::Bounds(b) => b.center(),
        }
    }

    /// Emprise si le résultat en est une
    pub fn bounds(&self) -> Option<LatLonBounds> {
        match self {
            Self::Point(_) => None,
            Self::Bounds(b) => Some(*b),
        }
    }
}
