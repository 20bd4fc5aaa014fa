//! Définitions des ellipsoïdes de référence
//!
//! Les paramètres sont dérivés une seule fois depuis le datum choisi et
//! restent immuables : pas d'état partagé mutable, les conversions sont
//! sûres en concurrence.

use std::str::FromStr;

/// Datum de référence pour les conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Datum {
    /// NAD83 / GRS80 (équivalent WGS84 au mm près)
    #[default]
    Nad83,
    /// NAD27 / Clarke 1866 (données historiques nord-américaines)
    Nad27,
}

impl FromStr for Datum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nad83" | "grs80" | "wgs84" => Ok(Self::Nad83),
            "nad27" | "clarke1866" => Ok(Self::Nad27),
            other => Err(format!(
                "unknown datum '{}', expected nad83 or nad27",
                other
            )),
        }
    }
}

/// Paramètres d'un ellipsoïde, précalculés pour les séries de projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub equatorial_radius: f64,

    /// Première excentricité au carré
    pub ecc_squared: f64,

    /// Deuxième excentricité au carré : e² / (1 - e²)
    pub ecc_prime_squared: f64,

    /// Coefficient e1 de la série inverse : (1 - √(1-e²)) / (1 + √(1-e²))
    pub e1: f64,
}

impl Ellipsoid {
    /// Construit les paramètres depuis un datum
    pub fn new(datum: Datum) -> Self {
        let (a, e2): (f64, f64) = match datum {
            // GRS80
            Datum::Nad83 => (6_378_137.0, 0.006_694_380_023),
            // Clarke 1866
            Datum::Nad27 => (6_378_206.4, 0.006_768_658),
        };

        let sqrt_one_minus_e2 = (1.0 - e2).sqrt();
        Self {
            equatorial_radius: a,
            ecc_squared: e2,
            ecc_prime_squared: e2 / (1.0 - e2),
            e1: (1.0 - sqrt_one_minus_e2) / (1.0 + sqrt_one_minus_e2),
        }
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::new(Datum::Nad83)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nad83_parameters() {
        let ell = Ellipsoid::new(Datum::Nad83);
        assert_eq!(ell.equatorial_radius, 6_378_137.0);
        assert!((ell.ecc_squared - 0.006_694_380_023).abs() < 1e-15);
        assert!((ell.ecc_prime_squared - 0.006_739_496_775_478_064).abs() < 1e-15);
        assert!((ell.e1 - 0.001_679_220_394_724_721_4).abs() < 1e-15);
    }

    #[test]
    fn test_nad27_parameters() {
        let ell = Ellipsoid::new(Datum::Nad27);
        assert_eq!(ell.equatorial_radius, 6_378_206.4);
        assert!((ell.ecc_squared - 0.006_768_658).abs() < 1e-15);
    }

    #[test]
    fn test_derived_invariants() {
        for datum in [Datum::Nad83, Datum::Nad27] {
            let ell = Ellipsoid::new(datum);
            let expected_ep2 = ell.ecc_squared / (1.0 - ell.ecc_squared);
            assert!((ell.ecc_prime_squared - expected_ep2).abs() < 1e-15);

            let root = (1.0 - ell.ecc_squared).sqrt();
            let expected_e1 = (1.0 - root) / (1.0 + root);
            assert!((ell.e1 - expected_e1).abs() < 1e-15);
        }
    }

    #[test]
    fn test_datum_from_str() {
        assert_eq!("nad83".parse::<Datum>().unwrap(), Datum::Nad83);
        assert_eq!("NAD27".parse::<Datum>().unwrap(), Datum::Nad27);
        assert_eq!("wgs84".parse::<Datum>().unwrap(), Datum::Nad83);
        assert!("ed50".parse::<Datum>().is_err());
    }
}
