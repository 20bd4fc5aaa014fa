//! Calcul de zone UTM et de bande de latitude
//!
//! Zones de 6° de longitude numérotées 1-60 depuis -180°, avec les
//! irrégularités Norvège/Svalbard. Bandes de latitude de 8° lettrées
//! C-X (sans I ni O), la bande X étant étirée jusqu'à 84°.

use crate::error::UsngError;

/// Lettres de bandes de latitude, du sud (-80°) au nord (84°)
pub const BAND_LETTERS: &str = "CDEFGHJKLMNPQRSTUVWX";

/// Calcule le numéro de zone UTM pour un point
///
/// Applique dans l'ordre : normalisation de la longitude dans [-180, 180),
/// formule de base, exception Norvège (zone 32), exceptions Svalbard
/// (zones 31/33/35/37).
pub fn zone_number(lat: f64, lon: f64) -> Result<u8, UsngError> {
    if !(-180.0..=360.0).contains(&lon) {
        return Err(UsngError::InvalidLongitude(lon));
    }
    if !(-80.0..=84.0).contains(&lat) {
        return Err(UsngError::OutOfRange(lat));
    }

    // Normalise la longitude dans [-180, 180)
    let lon = (lon + 180.0) - ((lon + 180.0) / 360.0).floor() * 360.0 - 180.0;

    let mut zone = (((lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8;

    // Exception Norvège
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        zone = 32;
    }

    // Exceptions Svalbard
    if (72.0..84.0).contains(&lat) {
        if (0.0..9.0).contains(&lon) {
            zone = 31;
        } else if (9.0..21.0).contains(&lon) {
            zone = 33;
        } else if (21.0..33.0).contains(&lon) {
            zone = 35;
        } else if (33.0..42.0).contains(&lon) {
            zone = 37;
        }
    }

    Ok(zone)
}

/// Calcule la lettre de bande de latitude (C-X)
///
/// Hors de [-80, 84] la désignation UTM/USNG n'est pas définie : erreur
/// explicite plutôt que la sentinelle 'Z' historique.
pub fn band_letter(lat: f64) -> Result<char, UsngError> {
    if !(-80.0..=84.0).contains(&lat) {
        return Err(UsngError::OutOfRange(lat));
    }

    // Bandes de 8° depuis -80° ; la bande X couvre [72, 84]
    let index = (((lat + 80.0) / 8.0).floor() as usize).min(BAND_LETTERS.len() - 1);
    Ok(BAND_LETTERS.as_bytes()[index] as char)
}

/// Emprise de latitude (sud, nord) d'une bande
pub fn band_lat_range(band: char) -> Option<(f64, f64)> {
    let index = BAND_LETTERS.find(band.to_ascii_uppercase())?;
    let south = -80.0 + 8.0 * index as f64;
    // La bande X est étirée de 8° à 12°
    let north = if index == BAND_LETTERS.len() - 1 {
        84.0
    } else {
        south + 8.0
    };
    Some((south, north))
}

/// Emprise de longitude (ouest, est) d'une zone
pub fn zone_lon_range(zone: u8) -> Option<(f64, f64)> {
    if !(1..=60).contains(&zone) {
        return None;
    }
    let west = -180.0 + 6.0 * f64::from(zone - 1);
    Some((west, west + 6.0))
}
