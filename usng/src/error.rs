//! Types d'erreurs pour le crate usng

use thiserror::Error;

/// Erreurs pouvant survenir lors d'une conversion de coordonnées
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsngError {
    /// Latitude hors du domaine documenté
    #[error("latitude {0} out of range [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude hors du domaine documenté
    #[error("longitude {0} out of range [-180, 360]")]
    InvalidLongitude(f64),

    /// Latitude hors de la plage de définition UTM/USNG
    #[error("latitude {0} outside UTM projection range [-80, 84]")]
    OutOfRange(f64),

    /// Numéro de zone UTM hors de [1, 60]
    #[error("zone number {0} out of range [1, 60]")]
    InvalidZone(u8),

    /// Chaîne USNG/MGRS vide, trop courte ou invalide
    #[error("malformed USNG string '{input}': {reason}")]
    MalformedUsng { input: String, reason: String },
}

impl UsngError {
    /// Crée une erreur de parsing USNG avec contexte
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedUsng {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
