//! Formatage des désignations USNG/MGRS
//!
//! Construit la chaîne "ZZB SQ EEEEE NNNNN" à la précision demandée, et
//! estime la précision adaptée à une emprise géographique.

use tracing::trace;

use crate::datum::Ellipsoid;
use crate::error::UsngError;
use crate::grid::{find_grid_letters, BLOCK_SIZE};
use crate::tm::ll_to_utm;
use crate::zone::band_letter;

/// Rayon terrestre moyen pour l'estimation haversine, en mètres
const EARTH_RADIUS: f64 = 6_371_000.0;

/// Formate un point en chaîne USNG
///
/// `precision` est le niveau de précision 0-6 : 0 donne "18S", 1 ajoute
/// le carré de 100 km ("18S UJ"), chaque niveau suivant ajoute un chiffre
/// par axe jusqu'à la précision métrique ("18S UJ 23487 06483").
pub fn ll_to_usng(
    ellipsoid: &Ellipsoid,
    lat: f64,
    lon: f64,
    precision: u8,
) -> Result<String, UsngError> {
    let utm = ll_to_utm(ellipsoid, lat, lon, None)?;
    let band = band_letter(lat)?;

    // Le faux northing sud n'est appliqué qu'ici, à la frontière chaîne
    let northing = utm.hemisphere_northing();

    let mut out = format!("{}{}", utm.zone, band);
    if precision >= 1 {
        let (col, row) = find_grid_letters(utm.zone, northing, utm.easting);
        out.push(' ');
        out.push(col);
        out.push(row);
    }

    // Niveau 0-6 → 0 à 5 chiffres par axe
    let digits = precision.min(6).saturating_sub(1);
    if digits >= 1 {
        let block = BLOCK_SIZE as i64;
        let scale = 10_i64.pow(u32::from(5 - digits));
        let east = (utm.easting.round() as i64).rem_euclid(block) / scale;
        let north = (northing.round() as i64).rem_euclid(block) / scale;
        let width = usize::from(digits);
        out.push_str(&format!(" {:0width$} {:0width$}", east, north));
    }

    trace!(lat, lon, precision, usng = out.as_str(), "formatted USNG");
    Ok(out)
}

/// Formate un point en chaîne MGRS (USNG sans délimiteurs)
pub fn ll_to_mgrs(
    ellipsoid: &Ellipsoid,
    lat: f64,
    lon: f64,
    precision: u8,
) -> Result<String, UsngError> {
    Ok(ll_to_usng(ellipsoid, lat, lon, precision)?.replace(' ', ""))
}

/// Formate une emprise en chaîne USNG à la précision la mieux adaptée
///
/// La précision est choisie d'après la plus grande dimension de l'emprise
/// (distance haversine) : au-delà de 100 km seule la zone/bande est
/// retournée, en dessous de 1 m la précision est maximale.
pub fn ll_bbox_to_usng(
    ellipsoid: &Ellipsoid,
    north: f64,
    south: f64,
    east: f64,
    west: f64,
) -> Result<String, UsngError> {
    let mut lat = (north + south) / 2.0;
    let mut lon = (east + west) / 2.0;

    // Emprise à cheval sur l'antiméridien : point milieu sur l'arc court
    if east < west {
        lon = (east + west + 360.0) / 2.0;
        if lon >= 180.0 {
            lon -= 360.0;
        }
    }

    // Cas dégénérés ramenés juste en deçà des bords
    if lon >= 180.0 {
        lon = 179.9;
    } else if lon <= -180.0 {
        lon = -179.9;
    }
    if lat >= 90.0 {
        lat = 89.9;
    } else if lat <= -90.0 {
        lat = -89.9;
    }

    let height = haversine(north, east, south, east);
    let width = haversine(south, east, south, west);
    let dist = height.max(width);

    let precision = if dist > 100_000.0 {
        0
    } else if dist > 10_000.0 {
        1
    } else if dist > 1_000.0 {
        2
    } else if dist > 100.0 {
        3
    } else if dist > 10.0 {
        4
    } else if dist > 1.0 {
        5
    } else {
        6
    };

    ll_to_usng(ellipsoid, lat, lon, precision)
}

/// Distance haversine entre deux points, en mètres
fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    EARTH_RADIUS * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}
