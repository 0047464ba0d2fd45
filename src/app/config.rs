//! src/app/config.rs
//!
//! Réglages de l’explorateur (en mémoire, pas de fichier).
//!
//! Contrats :
//! - Chaque setter borne sa valeur (anti-abus / anti-gel).
//! - Aucune évaluation ici.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Degré : bornes du curseur.
pub const DEGRE_MIN: usize = 0;
pub const DEGRE_MAX: usize = 20;

/// Centre a : bornes du curseur.
pub const CENTRE_MIN: f64 = -10.0;
pub const CENTRE_MAX: f64 = 10.0;

/// Nombre de points du tracé.
const POINTS_DEFAUT: usize = 400;
const POINTS_MIN: usize = 50;
const POINTS_MAX: usize = 2000;

/// Intervalle d’animation (ms).
const INTERVALLE_DEFAUT_MS: u64 = 700;
const INTERVALLE_MIN_MS: u64 = 100;
const INTERVALLE_MAX_MS: u64 = 5000;

/// Fenêtre x par défaut.
pub const VUE_DEFAUT: (f64, f64) = (-6.0, 6.0);

/// Largeur minimale de la fenêtre x.
const LARGEUR_VUE_MIN: f64 = 0.1;

/// Exemples proposés en boutons : (libellé, expression).
pub const EXEMPLES: [(&str, &str); 14] = [
    ("sin", "sin(x)"),
    ("cos", "cos(x)"),
    ("exp", "exp(x)"),
    ("sinh", "sinh(x)"),
    ("cosh", "cosh(x)"),
    ("log(1+x)", "log(1+x)"),
    ("1/(1-x)", "1/(1-x)"),
    ("atan", "atan(x)"),
    ("√(1+x)", "sqrt(1+x)"),
    ("tan", "tan(x)"),
    ("sin(x)/x", "sin(x)/x"),
    ("exp(-x²)", "exp(-x^2)"),
    ("x·cos(2x)", "x*cos(2x)"),
    ("|x|", "abs(x)"),
];

#[derive(Clone, Debug, PartialEq)]
pub struct ConfigTaylor {
    nb_points: usize,
    intervalle: Duration,
    degre_max_animation: usize,
}

impl Default for ConfigTaylor {
    fn default() -> Self {
        Self {
            nb_points: POINTS_DEFAUT,
            intervalle: Duration::from_millis(INTERVALLE_DEFAUT_MS),
            degre_max_animation: DEGRE_MAX,
        }
    }
}

impl ConfigTaylor {
    pub fn plage_degre() -> RangeInclusive<usize> {
        DEGRE_MIN..=DEGRE_MAX
    }

    pub fn plage_centre() -> RangeInclusive<f64> {
        CENTRE_MIN..=CENTRE_MAX
    }

    pub fn nb_points(&self) -> usize {
        self.nb_points
    }

    pub fn set_nb_points(&mut self, n: usize) {
        self.nb_points = n.clamp(POINTS_MIN, POINTS_MAX);
    }

    pub fn intervalle(&self) -> Duration {
        self.intervalle
    }

    pub fn set_intervalle_ms(&mut self, ms: u64) {
        self.intervalle = Duration::from_millis(ms.clamp(INTERVALLE_MIN_MS, INTERVALLE_MAX_MS));
    }

    pub fn degre_max_animation(&self) -> usize {
        self.degre_max_animation
    }

    pub fn set_degre_max_animation(&mut self, n: usize) {
        self.degre_max_animation = n.clamp(DEGRE_MIN, DEGRE_MAX);
    }
}

/// Degré borné au curseur.
pub fn borner_degre(n: usize) -> usize {
    n.clamp(DEGRE_MIN, DEGRE_MAX)
}

/// Centre borné au curseur ; NaN -> 0.
pub fn borner_centre(a: f64) -> f64 {
    if a.is_nan() {
        return 0.0;
    }
    a.clamp(CENTRE_MIN, CENTRE_MAX)
}

/// Fenêtre x remise en ordre, largeur minimale garantie.
pub fn borner_vue(xmin: f64, xmax: f64) -> (f64, f64) {
    if !xmin.is_finite() || !xmax.is_finite() {
        return VUE_DEFAUT;
    }
    let (a, b) = if xmin <= xmax { (xmin, xmax) } else { (xmax, xmin) };
    if b - a < LARGEUR_VUE_MIN {
        let milieu = (a + b) / 2.0;
        return (milieu - LARGEUR_VUE_MIN / 2.0, milieu + LARGEUR_VUE_MIN / 2.0);
    }
    (a, b)
}
