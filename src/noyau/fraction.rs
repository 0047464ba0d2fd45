// src/noyau/fraction.rs
//
// Approximation rationnelle “d’affichage” :
// - pas de fractions continues : on essaie un jeu fixe de dénominateurs
// - échec fermé (None) plutôt qu’une fraction inexacte
// - Rational64 réduit par pgcd, dénominateur toujours > 0

use num_rational::Rational64;
use num_traits::Zero;

/// Tolérance absolue de reconnaissance.
pub const TOLERANCE_FRACTION: f64 = 1e-9;

/// En dessous : zéro structurel.
pub const SEUIL_ZERO: f64 = 1e-12;

/// Dénominateur maximal par défaut.
pub const DENOMINATEUR_MAX_DEFAUT: i64 = 1000;

/// Dénominateurs essayés, dans cet ordre.
pub const DENOMINATEURS: [i64; 28] = [
    2, 3, 4, 5, 6, 8, 10, 12, 16, 20, 24, 30, 32, 40, 48, 60, 64, 72, 80, 90, 100, 120, 128, 144,
    180, 240, 360, 720,
];

/// Au-delà, `round()` ne tient plus dans un i64 sans perte.
const MAGNITUDE_MAX: f64 = 9.0e15;

/// Magnitude (signe retiré) -> fraction p/q réduite, ou None.
pub fn vers_fraction(magnitude: f64, denominateur_max: i64) -> Option<Rational64> {
    let m = magnitude.abs();
    if !m.is_finite() || m >= MAGNITUDE_MAX {
        return None;
    }

    if m < SEUIL_ZERO {
        return Some(Rational64::zero());
    }

    // entier (à la tolérance près)
    let entier = m.round();
    if (m - entier).abs() < TOLERANCE_FRACTION {
        return Some(Rational64::from_integer(entier as i64));
    }

    for &d in DENOMINATEURS.iter().filter(|&&d| d <= denominateur_max) {
        let n = (m * d as f64).round();
        if (n / d as f64 - m).abs() < TOLERANCE_FRACTION {
            // Rational64::new réduit et force d > 0
            return Some(Rational64::new(n as i64, d));
        }
    }

    None
}

/// Raccourci avec le dénominateur max par défaut.
pub fn vers_fraction_defaut(magnitude: f64) -> Option<Rational64> {
    vers_fraction(magnitude, DENOMINATEUR_MAX_DEFAUT)
}
