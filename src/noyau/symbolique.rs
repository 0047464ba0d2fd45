// src/noyau/symbolique.rs
//
// Repli symbolique : pour k = 0..=n
//   c_k = f^(k)(a) / k!   puis   f^(k) <- forme normale de d/dx f^(k)
//
// La forme normale (termes semblables regroupés) garde les dérivées petites :
// sans elle, tan(x) ou exp(-x^2) dépassent le garde-fou vers l’ordre 8–10.
//
// Échec (None) si :
// - l’expression ne se lit pas
// - une valeur évaluée n’est pas finie
// - l’arbre de la dérivée dépasse le garde-fou (taille ou profondeur)

use super::derive::derive;
use super::eval::{analyser, evaluer};
use super::expr::{Expr, MAX_NOEUDS, PROFONDEUR_MAX};
use super::forme_normale::{forme_normale, normaliser, vers_expr};
use super::rpn::VARIABLE;

/// Profondeur admise pour une dérivée (la saisie est bornée à PROFONDEUR_MAX).
const PROFONDEUR_DERIVEE: usize = 2 * PROFONDEUR_MAX;

/// Coefficients par dérivation symbolique répétée, sur une chaîne.
pub fn coefficients_symboliques(fonction: &str, a: f64, n: usize) -> Option<Vec<f64>> {
    let expr = analyser(fonction).ok()?;
    coefficients_symboliques_expr(&expr, a, n)
}

/// Même chose sur un arbre déjà lu (l’arbre d’entrée n’est pas modifié).
pub fn coefficients_symboliques_expr(expr: &Expr, a: f64, n: usize) -> Option<Vec<f64>> {
    let mut courante = forme_normale(expr).unwrap_or_else(|| expr.clone());
    let mut out = Vec::with_capacity(n + 1);
    let mut fact = 1.0;

    for k in 0..=n {
        if k > 0 {
            fact *= k as f64;
        }

        let v = evaluer(&courante, a);
        if !v.is_finite() {
            return None;
        }
        out.push(v / fact);

        // inutile de dériver après le dernier ordre
        if k < n {
            let derivee = derive(&courante, VARIABLE);
            courante = match normaliser(&derivee) {
                Some(s) => {
                    log::trace!("ordre {}: {} termes", k + 1, s.nb_termes());
                    vers_expr(&s)
                }
                None => derivee,
            };

            if courante.compter_noeuds(MAX_NOEUDS) > MAX_NOEUDS
                || courante.profondeur(PROFONDEUR_DERIVEE) > PROFONDEUR_DERIVEE
            {
                log::debug!("repli symbolique abandonné à l’ordre {}: arbre trop gros", k + 1);
                return None;
            }
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polynome_exact() {
        // (x-1)^3 autour de 1 : [0, 0, 0, 1]
        let c = coefficients_symboliques("(x-1)^3", 1.0, 4).unwrap();
        assert_eq!(c.len(), 5);
        for (k, attendu) in [0.0, 0.0, 0.0, 1.0, 0.0].iter().enumerate() {
            assert_relative_eq!(c[k], *attendu, epsilon = 1e-12);
        }
    }

    #[test]
    fn tan_en_zero() {
        // tan x = x + x^3/3 + 2x^5/15 + ...
        let c = coefficients_symboliques("tan(x)", 0.0, 5).unwrap();
        assert_relative_eq!(c[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(c[3], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(c[5], 2.0 / 15.0, epsilon = 1e-12);
        assert_relative_eq!(c[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn atan_hors_zero() {
        // atan'(1) = 1/2, atan''(1) = -2x/(1+x²)² = -1/2 => c_2 = -1/4
        let c = coefficients_symboliques("atan(x)", 1.0, 2).unwrap();
        assert_relative_eq!(c[0], std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(c[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(c[2], -0.25, epsilon = 1e-12);
    }

    #[test]
    fn non_fini_donne_none() {
        // sqrt'(0) = 1/(2·0) = inf
        assert!(coefficients_symboliques("sqrt(x)", 0.0, 2).is_none());
        // abs'(0) = 0/0
        assert!(coefficients_symboliques("abs(x)", 0.0, 1).is_none());
        assert!(coefficients_symboliques("log(x)", -1.0, 0).is_none());
    }

    #[test]
    fn illisible_donne_none() {
        assert!(coefficients_symboliques("sin(", 0.0, 2).is_none());
        assert!(coefficients_symboliques("", 0.0, 2).is_none());
    }

    #[test]
    fn ordre_zero_sans_derivee() {
        let c = coefficients_symboliques("x^2 + 1", 2.0, 0).unwrap();
        assert_eq!(c, vec![5.0]);
    }

    #[test]
    fn haut_degre_sans_abandon() {
        // P_20 autour de 0.5 doit retrouver f(0.6) : coefficients justes jusqu’au bout
        let cas: [(&str, fn(f64) -> f64); 6] = [
            ("tan(x)", f64::tan),
            ("exp(-x^2)", |x| (-x * x).exp()),
            ("sin(x)/x", |x| x.sin() / x),
            ("atan(x)", f64::atan),
            ("sqrt(1+x)", |x| (1.0 + x).sqrt()),
            ("x*cos(2x)", |x| x * (2.0 * x).cos()),
        ];
        for (f, g) in cas {
            let c = coefficients_symboliques(f, 0.5, 20)
                .unwrap_or_else(|| panic!("{f}: repli symbolique abandonné"));
            assert_eq!(c.len(), 21);
            let p: f64 = c.iter().rev().fold(0.0, |acc, ck| acc * 0.1 + ck);
            assert_relative_eq!(p, g(0.6), epsilon = 1e-12, max_relative = 1e-10);
        }
    }

    #[test]
    fn exp_moins_x2_en_zero() {
        // exp(-x^2) = Σ (-1)^m x^(2m) / m!
        let c = coefficients_symboliques("exp(-x^2)", 0.0, 20).unwrap();
        let mut fact = 1.0;
        for m in 0..=10 {
            if m > 0 {
                fact *= m as f64;
            }
            let signe = if m % 2 == 0 { 1.0 } else { -1.0 };
            assert_relative_eq!(c[2 * m], signe / fact, max_relative = 1e-12);
            if m < 10 {
                assert_eq!(c[2 * m + 1], 0.0);
            }
        }
    }
}
