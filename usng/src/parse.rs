//! Parsing et validation des chaînes USNG/MGRS
//!
//! Accepte les délimiteurs espace et "%20", les zones à 1 ou 2 chiffres
//! et toute précision de 0 à 5 paires de chiffres. Contrairement au
//! comportement historique (zéro silencieux), toute chaîne vide, tronquée
//! ou invalide produit une erreur explicite.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::datum::Ellipsoid;
use crate::error::UsngError;
use crate::grid::{square_easting_base, square_northing_base};
use crate::tm::{band_zone_bounds, utm_to_ll, NORTHING_OFFSET};
use crate::types::LatLonOrBounds;
use crate::zone::BAND_LETTERS;

/// Grammaire stricte de validation, héritée du comportement historique
///
/// Exige une zone à deux chiffres et les lettres de carré : "18S" seul
/// est rejeté bien que le parseur l'accepte. Cette incohérence est
/// volontairement conservée, des appelants en dépendent.
const USNG_GRAMMAR: &str =
    r"^\d{2}[CDEFGHJKLMNPQRSTUVWX][ABCDEFGHJKLMNPQRSTUVWXYZ][ABCDEFGHJKLMNPQRSTUV](\d\d){0,5}$";

/// Désignation USNG/MGRS décomposée
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsngDesignation {
    /// Numéro de zone UTM, dans [1, 60]
    pub zone: u8,

    /// Lettre de bande de latitude (C-X, sans I ni O)
    pub band: char,

    /// Lettres du carré de 100 000 m, si présentes
    pub square: Option<(char, char)>,

    /// Chiffres d'easting dans le carré (0 à 5 chiffres)
    pub easting: Option<String>,

    /// Chiffres de northing dans le carré (0 à 5 chiffres)
    pub northing: Option<String>,

    /// Nombre de paires de chiffres (0-5) : 5 = précision métrique
    pub precision: u8,
}

/// Met une chaîne en forme canonique : majuscules, sans espaces ni "%20"
fn canonicalize(input: &str) -> String {
    input.to_uppercase().replace("%20", "").replace(' ', "")
}

/// Décompose une chaîne USNG/MGRS en ses composants
pub fn parse_usng(input: &str) -> Result<UsngDesignation, UsngError> {
    let canonical = canonicalize(input);
    let bytes = canonical.as_bytes();

    if bytes.len() < 2 {
        return Err(UsngError::malformed(input, "too short, expected at least zone and band"));
    }

    // Zone à 1 ou 2 chiffres, selon le deuxième caractère
    if !bytes[0].is_ascii_digit() {
        return Err(UsngError::malformed(input, "must start with a zone number"));
    }
    let (zone, mut cursor) = if bytes[1].is_ascii_digit() {
        (u8::from(bytes[0] - b'0') * 10 + (bytes[1] - b'0'), 2)
    } else {
        (bytes[0] - b'0', 1)
    };
    if !(1..=60).contains(&zone) {
        return Err(UsngError::InvalidZone(zone));
    }

    let Some(&band_byte) = bytes.get(cursor) else {
        return Err(UsngError::malformed(input, "missing latitude band letter"));
    };
    let band = band_byte as char;
    if !BAND_LETTERS.contains(band) {
        return Err(UsngError::malformed(
            input,
            format!("invalid latitude band letter '{}'", band),
        ));
    }
    cursor += 1;

    let rest = &canonical[cursor..];
    if rest.is_empty() {
        // Zone et bande seules : désignation valide de précision 0
        return Ok(UsngDesignation {
            zone,
            band,
            square: None,
            easting: None,
            northing: None,
            precision: 0,
        });
    }

    if rest.len() < 2 {
        return Err(UsngError::malformed(input, "truncated 100 km square identifier"));
    }
    let square_bytes = &rest.as_bytes()[..2];
    if !square_bytes.iter().all(u8::is_ascii_alphabetic) {
        return Err(UsngError::malformed(input, "invalid 100 km square letters"));
    }
    let square = (square_bytes[0] as char, square_bytes[1] as char);

    let digits = &rest[2..];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UsngError::malformed(input, "easting/northing must be digits"));
    }
    if digits.len() % 2 != 0 {
        return Err(UsngError::malformed(
            input,
            "easting and northing must have the same number of digits",
        ));
    }
    if digits.len() > 10 {
        return Err(UsngError::malformed(input, "more than 5 digits per axis"));
    }

    let precision = (digits.len() / 2) as u8;
    let (easting, northing) = if precision == 0 {
        (None, None)
    } else {
        let (e, n) = digits.split_at(digits.len() / 2);
        (Some(e.to_string()), Some(n.to_string()))
    };

    Ok(UsngDesignation {
        zone,
        band,
        square: Some(square),
        easting,
        northing,
        precision,
    })
}

/// Valide une chaîne contre la grammaire USNG stricte
pub fn is_valid_usng(input: &str) -> bool {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    let grammar = GRAMMAR.get_or_init(|| {
        Regex::new(USNG_GRAMMAR).expect("USNG grammar must compile")
    });
    grammar.is_match(&canonicalize(input))
}

/// Convertit une chaîne USNG/MGRS en point ou emprise géographique
///
/// La demi-largeur de l'emprise vaut `100 000 / 10^précision` mètres ;
/// `center_only` retourne le seul point sud-ouest reprojeté. Une
/// désignation zone+bande sans carré se résout par les tables statiques
/// d'emprises de bandes/zones.
pub fn usng_to_ll(
    ellipsoid: &Ellipsoid,
    input: &str,
    center_only: bool,
) -> Result<LatLonOrBounds, UsngError> {
    let parts = parse_usng(input)?;
    debug!(?parts, center_only, "resolved USNG designation");

    let Some((column, row)) = parts.square else {
        let bounds = band_zone_bounds(parts.zone, parts.band)?;
        return Ok(if center_only {
            LatLonOrBounds::Point(bounds.center())
        } else {
            bounds
        });
    };

    let easting_base = square_easting_base(column).ok_or_else(|| {
        UsngError::malformed(input, format!("invalid column letter '{}'", column))
    })?;
    let northing_base = square_northing_base(parts.zone, parts.band, row).ok_or_else(|| {
        UsngError::malformed(
            input,
            format!("row letter '{}' not in the zone's alphabet", row),
        )
    })?;

    // Chiffres tronqués remis à l'échelle du mètre
    let scale = 10_f64.powi(i32::from(5 - parts.precision));
    let offset = |digits: &Option<String>| -> f64 {
        digits
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0)
            * scale
    };

    let easting = easting_base + offset(&parts.easting);
    let mut northing = northing_base + offset(&parts.northing);

    // Bandes C-M : hémisphère sud, retour au northing signé
    if parts.band < 'N' {
        northing -= NORTHING_OFFSET;
    }

    let accuracy = if center_only {
        None
    } else {
        Some(100_000.0 / 10_f64.powi(i32::from(parts.precision)))
    };

    utm_to_ll(ellipsoid, northing, easting, parts.zone, accuracy)
}
