// src/noyau/serie.rs
//
// Évaluation du polynôme de Taylor + échantillonnage pour le tracé.
//
// P_n(x) = Σ c_k (x-a)^k, la puissance est accumulée par multiplication (O(n)).
// En x = a : rend c_0 exactement (aucune opération flottante sur c_0).
//
// Un échantillon dont la valeur n’est pas finie porte None : trou dans la courbe,
// jamais d’arrêt du tracé.

/// Σ c_k (x-a)^k ; 0 pour un vecteur vide.
pub fn evaluer_taylor(coeffs: &[f64], a: f64, x: f64) -> f64 {
    let Some((&c0, reste)) = coeffs.split_first() else {
        return 0.0;
    };

    let dx = x - a;
    if dx == 0.0 {
        return c0;
    }

    let mut somme = c0;
    let mut puissance = 1.0;
    for &c in reste {
        puissance *= dx;
        somme += c * puissance;
    }
    somme
}

/// Un point du tracé : chaque valeur absente = trou.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Echantillon {
    pub x: f64,
    pub original: Option<f64>,
    pub taylor: Option<f64>,
    pub erreur: Option<f64>,
}

/// Courbes échantillonnées + erreur max sur la grille.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    pub echantillons: Vec<Echantillon>,
    /// max |f - P_n| sur les points où les deux existent.
    pub erreur_max: Option<f64>,
}

fn fini(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Grille uniforme de `nb_points` points sur [xmin, xmax] (bornes incluses).
pub fn echantillonner<F>(f: F, coeffs: &[f64], a: f64, (xmin, xmax): (f64, f64), nb_points: usize) -> Trace
where
    F: Fn(f64) -> f64,
{
    if nb_points == 0 || !xmin.is_finite() || !xmax.is_finite() {
        return Trace::default();
    }

    let pas = if nb_points > 1 {
        (xmax - xmin) / (nb_points - 1) as f64
    } else {
        0.0
    };

    let mut echantillons = Vec::with_capacity(nb_points);
    let mut erreur_max: Option<f64> = None;

    for i in 0..nb_points {
        // dernier point pile sur xmax (pas d’accumulation d’arrondi)
        let x = if i + 1 == nb_points && nb_points > 1 {
            xmax
        } else {
            xmin + i as f64 * pas
        };

        let original = fini(f(x));
        let taylor = fini(evaluer_taylor(coeffs, a, x));
        let erreur = match (original, taylor) {
            (Some(o), Some(t)) => fini((o - t).abs()),
            _ => None,
        };

        if let Some(e) = erreur {
            erreur_max = Some(erreur_max.map_or(e, |m| m.max(e)));
        }

        echantillons.push(Echantillon {
            x,
            original,
            taylor,
            erreur,
        });
    }

    Trace {
        echantillons,
        erreur_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn au_centre_c0_exact() {
        let c = [0.1 + 0.2, 7.0, -3.0, 1e10];
        for a in [0.0, -2.5, 1e-300, 123.456] {
            assert_eq!(evaluer_taylor(&c, a, a), c[0]);
        }
    }

    #[test]
    fn polynome_decale() {
        // 1 + 2(x-1) + 3(x-1)^2 en x = 3 : 1 + 4 + 12
        assert_relative_eq!(evaluer_taylor(&[1.0, 2.0, 3.0], 1.0, 3.0), 17.0);
        assert_eq!(evaluer_taylor(&[], 0.0, 5.0), 0.0);
    }

    #[test]
    fn exp_degre_2_en_1() {
        let p = evaluer_taylor(&[1.0, 1.0, 0.5], 0.0, 1.0);
        assert_relative_eq!(p, 2.5);
        assert_relative_eq!((std::f64::consts::E - p).abs(), 0.218_281_828_459_045, epsilon = 1e-12);
    }

    #[test]
    fn grille_bornes_incluses() {
        let t = echantillonner(|x| x, &[0.0, 1.0], 0.0, (-1.0, 1.0), 5);
        let xs: Vec<f64> = t.echantillons.iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(t.erreur_max, Some(0.0));
    }

    #[test]
    fn trous_sans_arret() {
        // log(x) absent pour x <= 0, présent ensuite
        let t = echantillonner(f64::ln, &[0.0], 1.0, (-1.0, 2.0), 4);
        assert_eq!(t.echantillons.len(), 4);
        assert_eq!(t.echantillons[0].original, None);
        assert_eq!(t.echantillons[1].original, None);
        assert_eq!(t.echantillons[0].erreur, None);
        assert!(t.echantillons[2].original.is_some());
        assert!(t.echantillons[0].taylor.is_some());
        assert!(t.erreur_max.is_some());
    }

    #[test]
    fn cas_degeneres() {
        assert!(echantillonner(|x| x, &[1.0], 0.0, (0.0, 1.0), 0).echantillons.is_empty());
        assert!(echantillonner(|x| x, &[1.0], 0.0, (f64::NAN, 1.0), 10).echantillons.is_empty());
        let t = echantillonner(|x| x, &[1.0], 0.0, (2.0, 5.0), 1);
        assert_eq!(t.echantillons[0].x, 2.0);
    }
}
