// src/noyau/coefficients.rs
//
// Politique de choix des coefficients :
//   1) forme close (catalogue + domaine)
//   2) sinon dérivation symbolique répétée
//   3) sinon dérivées numériques (différences finies) sur l’évaluateur compilé
//      - NaN à un ordre => coefficient 0 pour cet ordre (jamais NaN)
//   4) chaîne illisible => vecteur nul de longueur n+1
//
// Les échecs des stratégies 1 et 2 sont rattrapés ici, sans bruit (log debug).
// Seule la stabilité globale (verifier_stabilite) est signalée à l’appelant.

use super::erreur::ErreurTaylor;
use super::eval::{compiler, FonctionCompilee};
use super::forme_close::FonctionCatalogue;
use super::numerique::MoteurNumerique;
use super::symbolique::coefficients_symboliques_expr;

/// Au-delà : la série est jugée instable (tracé ignoré).
pub const SEUIL_INSTABILITE: f64 = 1e15;

/// Stratégie qui a produit les coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    FormeClose,
    Symbolique,
    Numerique,
    Illisible,
}

impl Source {
    pub fn libelle(self) -> &'static str {
        match self {
            Source::FormeClose => "forme close",
            Source::Symbolique => "dérivation symbolique",
            Source::Numerique => "différences finies",
            Source::Illisible => "expression illisible (coefficients nuls)",
        }
    }
}

/// Vecteur de coefficients c_0..=c_n (invariant : len == n + 1).
#[derive(Clone, Debug, PartialEq)]
pub struct Coefficients {
    pub valeurs: Vec<f64>,
    pub source: Source,
}

impl Coefficients {
    pub fn degre(&self) -> usize {
        self.valeurs.len().saturating_sub(1)
    }

    /// max |c_k| ; non fini si un coefficient l’est.
    pub fn magnitude_max(&self) -> f64 {
        let mut max = 0.0f64;
        for c in &self.valeurs {
            if !c.is_finite() {
                return f64::INFINITY;
            }
            max = max.max(c.abs());
        }
        max
    }
}

/// API publique : (fonction, a, n) -> coefficients.
pub fn coefficients_taylor(
    fonction: &str,
    a: f64,
    n: usize,
    moteur: &mut MoteurNumerique,
) -> Coefficients {
    // 1) forme close
    if let Some(c) = forme_close(fonction, a, n) {
        return c;
    }

    // 4) illisible : rien d’autre à tenter
    match compiler(fonction) {
        Ok(f) => replis(fonction, &f, a, n, moteur),
        Err(e) => {
            log::debug!("{fonction}: {e}, coefficients nuls");
            Coefficients {
                valeurs: vec![0.0; n + 1],
                source: Source::Illisible,
            }
        }
    }
}

/// Même politique, sur une fonction déjà lue et compilée à partir de `fonction`.
pub fn coefficients_taylor_compilee(
    fonction: &str,
    compilee: &FonctionCompilee,
    a: f64,
    n: usize,
    moteur: &mut MoteurNumerique,
) -> Coefficients {
    forme_close(fonction, a, n).unwrap_or_else(|| replis(fonction, compilee, a, n, moteur))
}

fn forme_close(fonction: &str, a: f64, n: usize) -> Option<Coefficients> {
    match FonctionCatalogue::reconnaitre(fonction).coefficients(a, n) {
        Ok(valeurs) => {
            log::debug!("{fonction} en a={a}: forme close");
            Some(Coefficients {
                valeurs,
                source: Source::FormeClose,
            })
        }
        Err(e) => {
            log::debug!("{fonction} en a={a}: {e}, repli");
            None
        }
    }
}

/// 2) symbolique, sinon 3) numérique.
fn replis(
    fonction: &str,
    compilee: &FonctionCompilee,
    a: f64,
    n: usize,
    moteur: &mut MoteurNumerique,
) -> Coefficients {
    if let Some(valeurs) = coefficients_symboliques_expr(compilee.expr(), a, n) {
        log::debug!("{fonction} en a={a}: dérivation symbolique");
        return Coefficients {
            valeurs,
            source: Source::Symbolique,
        };
    }

    log::debug!("{fonction} en a={a}: différences finies");
    let mut valeurs = Vec::with_capacity(n + 1);
    for k in 0..=n {
        let d = moteur.derivee(|x| compilee.evaluer(x), a, k);
        if d.is_nan() {
            valeurs.push(0.0);
        } else {
            let fact = moteur.factorielles().factorielle(k as i64);
            valeurs.push(d / fact);
        }
    }

    log::debug!(
        "table de factorielles : {} entrées",
        moteur.factorielles().taille()
    );

    Coefficients {
        valeurs,
        source: Source::Numerique,
    }
}

/// Post-condition : max |c_k| fini et <= 1e15, sinon Instabilite.
pub fn verifier_stabilite(coeffs: &Coefficients) -> Result<(), ErreurTaylor> {
    let max = coeffs.magnitude_max();
    if !max.is_finite() || max > SEUIL_INSTABILITE {
        return Err(ErreurTaylor::Instabilite { max });
    }
    Ok(())
}
