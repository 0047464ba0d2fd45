//! Noyau — pipeline complet (API utilisée par l’UI et les tests)
//!
//! chaîne -> jetons -> RPN -> Expr -> simplify => FonctionCompilee
//!        -> coefficients (forme close / symbolique / numérique)
//!        -> stabilité -> termes LaTeX (ligne + aligned) -> échantillons
//!
//! Erreurs remontées : EntreeVide, Analyse, Instabilite.
//! Les refus de forme close restent internes (repli, log debug).

use super::coefficients::{coefficients_taylor_compilee, verifier_stabilite, Coefficients};
use super::derive::derive;
use super::erreur::ErreurTaylor;
use super::eval::FonctionCompilee;
use super::expr::Expr;
use super::format::{formater_termes, latex_ligne, latex_multiligne, TermeFormate};
use super::jetons::{format_tokens, tokenize};
use super::numerique::MoteurNumerique;
use super::rpn::{from_rpn, to_rpn, VARIABLE};
use super::serie::{echantillonner, Trace};

/// Paramètres d’un calcul (valeurs déjà bornées par l’appelant).
#[derive(Clone, Debug, PartialEq)]
pub struct ParametresSerie {
    pub centre: f64,
    pub degre: usize,
    pub vue: (f64, f64),
    pub nb_points: usize,
}

impl Default for ParametresSerie {
    fn default() -> Self {
        Self {
            centre: 0.0,
            degre: 5,
            vue: (-6.0, 6.0),
            nb_points: 400,
        }
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub expression: String,
    pub derivee: String,
    pub source: String,
    pub note: String,
}

/// Tout ce qu’il faut pour afficher une série.
#[derive(Clone, Debug, PartialEq)]
pub struct SerieTaylor {
    pub coefficients: Coefficients,
    pub termes: Vec<TermeFormate>,
    pub latex: String,
    pub latex_multiligne: String,
    pub trace: Trace,
    pub demarche: DemarcheNoyau,
}

/// Calcul complet pour (fonction, paramètres).
pub fn calculer_serie(
    fonction: &str,
    params: &ParametresSerie,
    moteur: &mut MoteurNumerique,
) -> Result<SerieTaylor, ErreurTaylor> {
    let s = fonction.trim();
    if s.is_empty() {
        return Err(ErreurTaylor::EntreeVide);
    }

    // 1) Lecture (jetons + RPN gardés pour la démarche)
    let (jetons_txt, rpn_txt, expr) = match lire(s) {
        Ok(v) => v,
        Err(msg) => {
            log::warn!("expression illisible {s:?}: {msg}");
            return Err(ErreurTaylor::Analyse(msg));
        }
    };

    let expression = expr.to_string();
    let derivee = derive(&expr, VARIABLE).to_string();
    let f = FonctionCompilee::from(expr);

    // 2) Coefficients (la chaîne n’est pas relue)
    let coefficients =
        coefficients_taylor_compilee(s, &f, params.centre, params.degre, moteur);

    // 3) Stabilité : rien n’est tracé si elle échoue
    if let Err(e) = verifier_stabilite(&coefficients) {
        log::warn!("{s} en a={}, n={}: {e}", params.centre, params.degre);
        return Err(e);
    }

    // 4) LaTeX
    let termes = formater_termes(&coefficients.valeurs, params.centre);
    let latex = latex_ligne(&termes);
    let latex_multiligne = latex_multiligne(&termes);

    // 5) Échantillons
    let (a, b) = params.vue;
    let vue = if a <= b { (a, b) } else { (b, a) };
    let trace = echantillonner(
        |x| f.evaluer(x),
        &coefficients.valeurs,
        params.centre,
        vue,
        params.nb_points,
    );

    let demarche = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
        expression,
        derivee,
        source: coefficients.source.libelle().to_string(),
        note: format!(
            "c_k = f^(k)(a)/k! pour k = 0..={}, a = {} ; termes |c_k| < 1e-12 omis.",
            params.degre, params.centre
        ),
    };

    Ok(SerieTaylor {
        coefficients,
        termes,
        latex,
        latex_multiligne,
        trace,
        demarche,
    })
}

/// jetons -> RPN -> Expr simplifiée, avec les textes intermédiaires.
fn lire(s: &str) -> Result<(String, String, Expr), String> {
    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?.simplify();
    Ok((format_tokens(&jetons), format_tokens(&rpn), expr))
}
