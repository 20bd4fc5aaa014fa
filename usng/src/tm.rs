//! Projection Transverse Mercator universelle (UTM)
//!
//! Séries directes et inverses au 6e ordre en excentricité, sur
//! l'ellipsoïde fourni. Le northing est signé (négatif au sud) ; le faux
//! northing MGRS de 10 000 000 m n'est appliqué qu'à la frontière des
//! chaînes USNG.

use tracing::trace;

use crate::datum::Ellipsoid;
use crate::error::UsngError;
use crate::types::{Hemisphere, LatLon, LatLonBounds, LatLonOrBounds, UtmCoordinate};
use crate::zone::{band_lat_range, band_letter, zone_lon_range, zone_number};

/// Facteur d'échelle au méridien central
pub const K0: f64 = 0.9996;

/// Faux easting depuis le méridien central
pub const EASTING_OFFSET: f64 = 500_000.0;

/// Faux northing de l'hémisphère sud (convention MGRS)
pub const NORTHING_OFFSET: f64 = 10_000_000.0;

/// Demi-largeur maximale (en mètres) au-delà de laquelle l'emprise
/// retournée est celle de la bande/zone entière
const MAX_ACCURACY: f64 = 100_000.0;

/// Longitude du méridien central d'une zone, en degrés
fn central_meridian(zone: u8) -> f64 {
    f64::from(zone - 1) * 6.0 - 177.0
}

/// Projette un point géographique en coordonnées UTM
///
/// `zone_override` force la zone de projection (utile près des frontières
/// de zones) ; sinon la zone est calculée, exceptions Norvège/Svalbard
/// comprises.
pub fn ll_to_utm(
    ellipsoid: &Ellipsoid,
    lat: f64,
    lon: f64,
    zone_override: Option<u8>,
) -> Result<UtmCoordinate, UsngError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(UsngError::InvalidLatitude(lat));
    }
    if !(-180.0..=360.0).contains(&lon) {
        return Err(UsngError::InvalidLongitude(lon));
    }
    // UTM n'est pas défini au-delà de [-80, 84]
    if !(-80.0..=84.0).contains(&lat) {
        return Err(UsngError::OutOfRange(lat));
    }

    let a = ellipsoid.equatorial_radius;
    let e2 = ellipsoid.ecc_squared;
    let ep2 = ellipsoid.ecc_prime_squared;

    // Normalise la longitude dans [-180, 180)
    let lon = (lon + 180.0) - ((lon + 180.0) / 360.0).floor() * 360.0 - 180.0;

    let zone = match zone_override {
        Some(z) if (1..=60).contains(&z) => z,
        Some(z) => return Err(UsngError::InvalidZone(z)),
        None => zone_number(lat, lon)?,
    };

    let lat_rad = lat.to_radians();
    let lon_rad = lon.to_radians();
    let lon_origin_rad = central_meridian(zone).to_radians();

    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let tan_lat = lat_rad.tan();

    let n = a / (1.0 - e2 * sin_lat.powi(2)).sqrt();
    let t = tan_lat.powi(2);
    let c = ep2 * cos_lat.powi(2);
    let a_term = cos_lat * (lon_rad - lon_origin_rad);

    // Arc méridien depuis l'équateur
    let m = a
        * ((1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0) * lat_rad
            - (3.0 * e2 / 8.0 + 3.0 * e2.powi(2) / 32.0 + 45.0 * e2.powi(3) / 1024.0)
                * (2.0 * lat_rad).sin()
            + (15.0 * e2.powi(2) / 256.0 + 45.0 * e2.powi(3) / 1024.0) * (4.0 * lat_rad).sin()
            - (35.0 * e2.powi(3) / 3072.0) * (6.0 * lat_rad).sin());

    let easting = K0
        * n
        * (a_term
            + (1.0 - t + c) * a_term.powi(3) / 6.0
            + (5.0 - 18.0 * t + t.powi(2) + 72.0 * c - 58.0 * ep2) * a_term.powi(5) / 120.0)
        + EASTING_OFFSET;

    let northing = K0
        * (m + n
            * tan_lat
            * (a_term.powi(2) / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c.powi(2)) * a_term.powi(4) / 24.0
                + (61.0 - 58.0 * t + t.powi(2) + 600.0 * c - 330.0 * ep2) * a_term.powi(6)
                    / 720.0));

    trace!(lat, lon, zone, easting, northing, "forward projection");

    Ok(UtmCoordinate {
        easting,
        northing,
        zone,
        hemisphere: if lat < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        },
    })
}

/// Reconvertit une coordonnée UTM en point géographique
///
/// `northing` est signé (négatif au sud). Si `accuracy` (demi-largeur en
/// mètres) est fournie et ≤ 100 000 m, retourne l'emprise dont le coin
/// opposé est reprojeté à `(northing + accuracy, easting + accuracy)` ;
/// au-delà de 100 000 m, retourne l'emprise entière de la bande/zone
/// depuis les tables statiques.
pub fn utm_to_ll(
    ellipsoid: &Ellipsoid,
    northing: f64,
    easting: f64,
    zone: u8,
    accuracy: Option<f64>,
) -> Result<LatLonOrBounds, UsngError> {
    if !(1..=60).contains(&zone) {
        return Err(UsngError::InvalidZone(zone));
    }

    let a = ellipsoid.equatorial_radius;
    let e2 = ellipsoid.ecc_squared;
    let ep2 = ellipsoid.ecc_prime_squared;
    let e1 = ellipsoid.e1;

    // Coordonnées réduites
    let x = easting - EASTING_OFFSET;
    let y = northing;

    // Latitude au pied de la perpendiculaire (footprint latitude)
    let m = y / K0;
    let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let n1 = a / (1.0 - e2 * sin_phi1.powi(2)).sqrt();
    let t1 = tan_phi1.powi(2);
    let c1 = ep2 * cos_phi1.powi(2);
    let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1.powi(2)).powf(1.5);
    let d = x / (n1 * K0);

    let mut lat = (phi1
        - (n1 * tan_phi1 / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2)
                    - 252.0 * ep2
                    - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0))
        .to_degrees();

    // Une latitude exactement nulle fausserait la classification de bande
    if lat == 0.0 {
        lat = 0.001;
    }

    let lon = central_meridian(zone)
        + ((d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
                * d.powi(5)
                / 120.0)
            / cos_phi1)
            .to_degrees();

    let Some(accuracy) = accuracy else {
        return Ok(LatLonOrBounds::Point(LatLon::new(lat, lon)));
    };

    if accuracy <= MAX_ACCURACY {
        // Coin opposé reprojeté à distance `accuracy`
        let corner = utm_to_ll(ellipsoid, northing + accuracy, easting + accuracy, zone, None)?
            .center();
        Ok(LatLonOrBounds::Bounds(LatLonBounds {
            north: corner.lat,
            east: corner.lon,
            south: lat,
            west: lon,
        }))
    } else {
        band_zone_bounds(zone, band_letter(lat)?)
    }
}

/// Emprise complète d'une bande de latitude dans une zone, depuis les
/// tables statiques
pub(crate) fn band_zone_bounds(zone: u8, band: char) -> Result<LatLonOrBounds, UsngError> {
    let (south, north) = band_lat_range(band).ok_or_else(|| {
        UsngError::malformed(band.to_string(), "unknown latitude band letter")
    })?;
    let (west, east) = zone_lon_range(zone).ok_or(UsngError::InvalidZone(zone))?;
    Ok(LatLonOrBounds::Bounds(LatLonBounds {
        north,
        south,
        east,
        west,
    }))
}
