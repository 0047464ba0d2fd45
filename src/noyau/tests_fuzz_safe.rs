//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * jamais de panique
//!   * len(coefficients) == n + 1, quelle que soit la stratégie
//!   * un calcul réussi n’a que des coefficients finis
//!   * seules EntreeVide / Analyse / Instabilite sortent du pipeline

use std::time::{Duration, Instant};

use super::coefficients::coefficients_taylor;
use super::erreur::ErreurTaylor;
use super::numerique::MoteurNumerique;
use super::pipeline::{calculer_serie, ParametresSerie};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn centre(&mut self) -> f64 {
        // [-3, 3] par pas de 0.25
        (self.pick(25) as f64 - 12.0) * 0.25
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const FONCTIONS: [&str; 13] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "exp", "log", "sqrt",
    "abs",
];

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => "x".to_string(),
        3 => format!("{}", rng.pick(9) + 1),
        4 => "pi".to_string(),
        _ => "0.5".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/// Chaînes cassées : parenthèses, opérateurs doublés, identifiants inconnus.
fn gen_cassee(rng: &mut Rng) -> String {
    let base = gen_expr(rng, 2);
    match rng.pick(5) {
        0 => format!("{base})"),
        1 => format!("({base}"),
        2 => format!("{base} * * x"),
        3 => format!("{base} + y"),
        _ => format!("{base} $"),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_pipeline_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut moteur = MoteurNumerique::new();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let p = ParametresSerie {
            centre: rng.centre(),
            degre: rng.pick(7) as usize,
            vue: (-4.0, 4.0),
            nb_points: 60,
        };

        match calculer_serie(&expr, &p, &mut moteur) {
            Ok(s) => {
                assert_eq!(s.coefficients.valeurs.len(), p.degre + 1, "expr={expr:?}");
                assert!(
                    s.coefficients.valeurs.iter().all(|c| c.is_finite()),
                    "coefficient non fini accepté: expr={expr:?}"
                );
                assert_eq!(s.trace.echantillons.len(), 60);
                assert!(!s.latex.is_empty());
                seen_ok += 1;
            }
            Err(ErreurTaylor::Instabilite { .. }) => seen_err += 1,
            Err(e) => panic!("erreur non attendue: expr={expr:?} err={e}"),
        }
    }

    // le générateur ne produit que des expressions lisibles
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok} (instables: {seen_err})");
}

#[test]
fn fuzz_safe_longueur_toujours_n_plus_1() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut moteur = MoteurNumerique::new();

    for i in 0..120 {
        budget(t0, max);

        let expr = if i % 3 == 0 {
            gen_cassee(&mut rng)
        } else {
            gen_expr(&mut rng, 3)
        };
        let a = rng.centre();
        let n = rng.pick(8) as usize;

        let c = coefficients_taylor(&expr, a, n, &mut moteur);
        assert_eq!(c.valeurs.len(), n + 1, "expr={expr:?} a={a} n={n}");
    }
}

#[test]
fn fuzz_safe_chaines_cassees_typees() {
    let mut rng = Rng::new(0x5EED_u64);
    let mut moteur = MoteurNumerique::new();
    let p = ParametresSerie::default();

    for _ in 0..60 {
        let expr = gen_cassee(&mut rng);
        match calculer_serie(&expr, &p, &mut moteur) {
            Err(ErreurTaylor::Analyse(msg)) => assert!(!msg.is_empty()),
            autre => panic!("attendu Analyse pour {expr:?}, obtenu {autre:?}"),
        }
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let mut rng1 = Rng::new(42);
    let mut rng2 = Rng::new(42);
    let mut m1 = MoteurNumerique::new();
    let mut m2 = MoteurNumerique::new();

    for _ in 0..30 {
        let e1 = gen_expr(&mut rng1, 3);
        let e2 = gen_expr(&mut rng2, 3);
        assert_eq!(e1, e2);

        let c1 = coefficients_taylor(&e1, 0.5, 6, &mut m1);
        let c2 = coefficients_taylor(&e2, 0.5, 6, &mut m2);
        assert_eq!(c1.source, c2.source);
        // NaN != NaN : comparaison bit à bit
        let b1: Vec<u64> = c1.valeurs.iter().map(|v| v.to_bits()).collect();
        let b2: Vec<u64> = c2.valeurs.iter().map(|v| v.to_bits()).collect();
        assert_eq!(b1, b2, "expr={e1:?}");
    }
}
