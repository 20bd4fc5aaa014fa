//! Identifiants de carrés de 100 000 m (lettres MGRS)
//!
//! Les deux lettres d'un carré se répètent sur un cycle de 6 jeux de
//! zones : 8 colonnes (trois alphabets de 8 lettres utilisés deux fois)
//! et 20 lignes (un alphabet, décalé de 5 pour les jeux pairs). Le tout
//! est piloté par une table unique indexée par le jeu de zone.

use crate::zone::BAND_LETTERS;

/// Taille d'un carré de grille en mètres
pub const BLOCK_SIZE: f64 = 100_000.0;

const ROW_SET_SIZE: i64 = 20;
const COL_SET_SIZE: i64 = 8;

/// Alphabets (colonnes, lignes) par jeu de zone, indexés par `zone_set - 1`
///
/// Les colonnes parcourent ABCDEFGH / JKLMNPQR / STUVWXYZ en cycle de
/// deux tours ; les lignes alternent l'alphabet de base (jeux impairs)
/// et sa rotation de 5 (jeux pairs).
const GRID_SQUARE_SETS: [(&str, &str); 6] = [
    ("ABCDEFGH", "ABCDEFGHJKLMNPQRSTUV"),
    ("JKLMNPQR", "FGHJKLMNPQRSTUVABCDE"),
    ("STUVWXYZ", "ABCDEFGHJKLMNPQRSTUV"),
    ("ABCDEFGH", "FGHJKLMNPQRSTUVABCDE"),
    ("JKLMNPQR", "ABCDEFGHJKLMNPQRSTUV"),
    ("STUVWXYZ", "FGHJKLMNPQRSTUVABCDE"),
];

/// Alphabet complet des lettres de colonnes (sans I ni O), pour la
/// résolution inverse lettre → colonne
const COLUMN_LETTERS: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Bord sud de chaque bande de latitude, en millions de mètres de
/// northing vrai (décalage sud de 10 000 km inclus), indexé par C-X
const BAND_NORTHING_BASE: [f64; 20] = [
    1.1, 2.0, 2.9, 3.8, 4.7, 5.6, 6.5, 7.3, 8.2, 9.1, // C-M (hémisphère sud)
    0.0, 0.8, 1.7, 2.6, 3.5, 4.4, 5.3, 6.2, 7.0, 7.9, // N-X (hémisphère nord)
];

/// Début du segment de 2 millions de mètres (cycle complet des 20 lignes)
/// contenant le bord sud de chaque bande, indexé par C-X
const BAND_SEGMENT_BASE: [f64; 20] = [
    0.0, 2.0, 2.0, 2.0, 4.0, 4.0, 6.0, 6.0, 8.0, 8.0, // C-M
    0.0, 0.0, 0.0, 2.0, 2.0, 4.0, 4.0, 6.0, 6.0, 6.0, // N-X
];

/// Jeu de zone, dans [1, 6]
pub fn zone_set(zone: u8) -> usize {
    ((usize::from(zone) - 1) % 6) + 1
}

/// Lettres du carré de 100 000 m contenant une coordonnée UTM
///
/// `northing` doit inclure le faux northing de 10 000 000 m au sud ;
/// `easting` inclut le décalage de 500 000 m.
pub fn find_grid_letters(zone: u8, northing: f64, easting: f64) -> (char, char) {
    let (columns, rows) = GRID_SQUARE_SETS[zone_set(zone) - 1];

    // Position au mètre près, réduite au cycle 20 lignes × 8 colonnes
    let row = ((northing.round() as i64) / BLOCK_SIZE as i64).rem_euclid(ROW_SET_SIZE);
    let col = ((easting.round() as i64) / BLOCK_SIZE as i64 - 1).rem_euclid(COL_SET_SIZE);

    (
        columns.as_bytes()[col as usize] as char,
        rows.as_bytes()[row as usize] as char,
    )
}

/// Bord ouest (easting UTM) du carré désigné par une lettre de colonne
pub fn square_easting_base(column: char) -> Option<f64> {
    let index = COLUMN_LETTERS.find(column.to_ascii_uppercase())?;
    Some((1 + index as i64 % COL_SET_SIZE) as f64 * BLOCK_SIZE)
}

/// Bord sud (northing vrai) du carré désigné par une lettre de ligne,
/// résolu dans la bande de latitude donnée
///
/// La lettre de ligne ne fixe la position que modulo 2 000 000 m ; la
/// bande lève l'ambiguïté en choisissant le cycle dont le carré tombe
/// au-dessus de son bord sud.
pub fn square_northing_base(zone: u8, band: char, row: char) -> Option<f64> {
    let band_index = BAND_LETTERS.find(band.to_ascii_uppercase())?;
    let (_, rows) = GRID_SQUARE_SETS[zone_set(zone) - 1];
    let row_index = rows.find(row.to_ascii_uppercase())?;

    let band_base = BAND_NORTHING_BASE[band_index];
    let mut north = BAND_SEGMENT_BASE[band_index] + row_index as f64 / 10.0;
    if north < band_base {
        north += 2.0;
    }

    Some(north * 1_000_000.0)
}
