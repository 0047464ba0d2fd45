// src/noyau/forme_close.rs
//
// Coefficients de Taylor “à la main” pour un petit catalogue de fonctions.
//
// Chaque variante a son générateur. Un refus (hors catalogue, domaine) n’est pas
// une faute : c’est le signal “passe à la stratégie suivante”.
//
// Domaines (exacts) :
// - log(1+x)  : invalide si a <= -1
// - 1/(1-x)   : invalide si |a - 1| < 1e-10
// - atan(x)   : seulement en a = 0 (|a| <= 1e-10)
// - sqrt(1+x) : seulement en a = 0 (|a| <= 1e-10)
// - tan(x)    : jamais (pas de forme close)

use super::erreur::ErreurTaylor;

/// Tolérance “a vaut 0” / “a vaut 1”.
const TOLERANCE_CENTRE: f64 = 1e-10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FonctionCatalogue {
    Sinus,
    Cosinus,
    Exp,
    Sinh,
    Cosh,
    Log1p,
    InverseUnMoinsX,
    Atan,
    Racine1p,
    NonCouverte,
}

impl FonctionCatalogue {
    /// Identifiant normalisé (espaces retirés) -> variante.
    pub fn reconnaitre(fonction: &str) -> FonctionCatalogue {
        use FonctionCatalogue::*;

        let cle: String = fonction.chars().filter(|c| !c.is_whitespace()).collect();
        match cle.as_str() {
            "sin(x)" => Sinus,
            "cos(x)" => Cosinus,
            "exp(x)" => Exp,
            "sinh(x)" => Sinh,
            "cosh(x)" => Cosh,
            "log(1+x)" => Log1p,
            "1/(1-x)" => InverseUnMoinsX,
            "atan(x)" => Atan,
            "sqrt(1+x)" => Racine1p,
            // tan(x) est connu, mais sans forme close : repli
            _ => NonCouverte,
        }
    }

    /// Coefficients c_0..=c_n autour de `a`, ou refus typé.
    pub fn coefficients(self, a: f64, n: usize) -> Result<Vec<f64>, ErreurTaylor> {
        use FonctionCatalogue::*;

        match self {
            NonCouverte => Err(ErreurTaylor::HorsCatalogue),

            Sinus => {
                let cycle = [a.sin(), a.cos(), -a.sin(), -a.cos()];
                Ok(par_cycle(&cycle, n))
            }
            Cosinus => {
                let cycle = [a.cos(), -a.sin(), -a.cos(), a.sin()];
                Ok(par_cycle(&cycle, n))
            }
            Exp => Ok(par_cycle(&[a.exp()], n)),
            Sinh => Ok(par_cycle(&[a.sinh(), a.cosh()], n)),
            Cosh => Ok(par_cycle(&[a.cosh(), a.sinh()], n)),

            Log1p => {
                if a <= -1.0 {
                    return Err(ErreurTaylor::DomaineInvalide { centre: a });
                }
                let u = 1.0 + a;
                // c_0 = ln(1+a) ; c_k = (-1)^(k+1) / (k (1+a)^k)
                let mut out = Vec::with_capacity(n + 1);
                out.push(u.ln());
                let mut u_k = 1.0;
                for k in 1..=n {
                    u_k *= u;
                    let signe = if k % 2 == 1 { 1.0 } else { -1.0 };
                    out.push(signe / (k as f64 * u_k));
                }
                Ok(out)
            }

            InverseUnMoinsX => {
                if (a - 1.0).abs() < TOLERANCE_CENTRE {
                    return Err(ErreurTaylor::DomaineInvalide { centre: a });
                }
                // f^(k)(a) = k! / (1-a)^(k+1) => c_k = 1 / (1-a)^(k+1)
                let inv = 1.0 / (1.0 - a);
                let mut out = Vec::with_capacity(n + 1);
                let mut p = inv;
                for _ in 0..=n {
                    out.push(p);
                    p *= inv;
                }
                Ok(out)
            }

            Atan => {
                if a.abs() > TOLERANCE_CENTRE {
                    return Err(ErreurTaylor::DomaineInvalide { centre: a });
                }
                // ordres impairs : (-1)^((k-1)/2) / k ; pairs : 0
                Ok((0..=n)
                    .map(|k| {
                        if k % 2 == 0 {
                            0.0
                        } else if ((k - 1) / 2) % 2 == 0 {
                            1.0 / k as f64
                        } else {
                            -1.0 / k as f64
                        }
                    })
                    .collect())
            }

            Racine1p => {
                if a.abs() > TOLERANCE_CENTRE {
                    return Err(ErreurTaylor::DomaineInvalide { centre: a });
                }
                // binôme généralisé : Π_{j<k} (1/2 - j) / (j + 1)
                let mut out = Vec::with_capacity(n + 1);
                let mut c = 1.0;
                for j in 0..=n {
                    out.push(c);
                    c *= (0.5 - j as f64) / (j as f64 + 1.0);
                }
                Ok(out)
            }
        }
    }
}

/// Dérivées cycliques évaluées une fois en a : c_k = cycle[k mod p] / k!
fn par_cycle(cycle: &[f64], n: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(n + 1);
    let mut fact = 1.0;
    for k in 0..=n {
        if k > 0 {
            fact *= k as f64;
        }
        out.push(cycle[k % cycle.len()] / fact);
    }
    out
}

/// API “Option” : None = utiliser le repli.
pub fn coefficients_forme_close(fonction: &str, a: f64, n: usize) -> Option<Vec<f64>> {
    FonctionCatalogue::reconnaitre(fonction)
        .coefficients(a, n)
        .ok()
}
