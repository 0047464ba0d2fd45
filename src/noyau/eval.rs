//! Noyau — évaluation numérique
//!
//! tokenize -> RPN -> Expr -> simplify => FonctionCompilee (appelable f(x) -> f64)
//!
//! Une évaluation ne “plante” jamais : un point hors domaine rend NaN/inf
//! et c’est à l’appelant de décider (échantillon manquant, repli, etc.).

use super::erreur::ErreurTaylor;
use super::expr::Expr;
use super::jetons::tokenize;
use super::rpn::{from_rpn, to_rpn, VARIABLE};

/// Lit une chaîne et rend l’arbre simplifié.
pub fn analyser(s: &str) -> Result<Expr, ErreurTaylor> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ErreurTaylor::EntreeVide);
    }

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;
    Ok(expr.simplify())
}

/// Évalue `expr` en remplaçant la variable par `x`.
pub fn evaluer(expr: &Expr, x: f64) -> f64 {
    use Expr::*;

    match expr {
        Num(v) => *v,
        Pi => std::f64::consts::PI,
        E => std::f64::consts::E,

        Var(nom) => {
            if nom == VARIABLE {
                x
            } else {
                f64::NAN
            }
        }

        Neg(a) => -evaluer(a, x),
        Add(a, b) => evaluer(a, x) + evaluer(b, x),
        Sub(a, b) => evaluer(a, x) - evaluer(b, x),
        Mul(a, b) => evaluer(a, x) * evaluer(b, x),
        Div(a, b) => evaluer(a, x) / evaluer(b, x),
        Pow(a, b) => puissance(evaluer(a, x), b, x),

        Appel(f, a) => f.appliquer(evaluer(a, x)),
    }
}

/// base^expo, avec exposant entier exact (powi) quand c’est possible :
/// (-8)^3 doit donner -512, pas NaN.
fn puissance(base: f64, expo: &Expr, x: f64) -> f64 {
    let e = evaluer(expo, x);
    if e.fract() == 0.0 && e.abs() <= i32::MAX as f64 {
        base.powi(e as i32)
    } else {
        base.powf(e)
    }
}

/// Fonction “compilée” : l’arbre lu une fois, évalué à la demande.
#[derive(Clone, Debug, PartialEq)]
pub struct FonctionCompilee {
    expr: Expr,
}

impl FonctionCompilee {
    pub fn evaluer(&self, x: f64) -> f64 {
        evaluer(&self.expr, x)
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl From<Expr> for FonctionCompilee {
    fn from(expr: Expr) -> Self {
        FonctionCompilee { expr }
    }
}

/// API publique : chaîne -> appelable f(x), ou erreur d’analyse.
pub fn compiler(s: &str) -> Result<FonctionCompilee, ErreurTaylor> {
    Ok(FonctionCompilee { expr: analyser(s)? })
}
