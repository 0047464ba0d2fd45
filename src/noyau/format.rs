// src/noyau/format.rs
//
// Mise en forme LaTeX de la série.
//
// Une seule liste de termes (formater_termes), deux rendus :
// - latex_ligne      : tout sur une ligne
// - latex_multiligne : environnement aligned, 4 termes par ligne
//
// Règles :
// - |c| < 1e-12 : terme omis
// - coefficient : fraction exacte si trouvée (p ou \frac{p}{q}), sinon décimal à 4 chiffres
//   significatifs (notation scientifique hors de [1e-4, 1e4))
// - coefficient "1" devant une puissance : omis
// - puissance : (x - a)^{k} avec a arrondi à 4 décimales ; x^{k} si cet arrondi vaut 0

use num_traits::One;

use super::fraction::{vers_fraction_defaut, SEUIL_ZERO};

/// Termes par ligne dans le rendu aligned.
pub const TERMES_PAR_LIGNE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signe {
    Plus,
    Moins,
}

/// Un terme c_k (x-a)^k déjà mis en forme.
#[derive(Clone, Debug, PartialEq)]
pub struct TermeFormate {
    pub ordre: usize,
    pub signe: Signe,
    /// |c_k| en texte (sans signe).
    pub texte_coeff: String,
    /// "" pour k = 0.
    pub texte_puissance: String,
    /// coefficient + puissance, sans signe.
    pub texte_combine: String,
}

impl TermeFormate {
    /// Texte avec signe en tête si négatif.
    pub fn texte_signe(&self) -> String {
        match self.signe {
            Signe::Plus => self.texte_combine.clone(),
            Signe::Moins => format!("-{}", self.texte_combine),
        }
    }

    fn operateur(&self) -> &'static str {
        match self.signe {
            Signe::Plus => "+",
            Signe::Moins => "-",
        }
    }
}

/* ------------------------ Nombres ------------------------ */

fn sans_zeros_finaux(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Décimal à 4 chiffres significatifs (m >= 0).
pub fn decimal_4(m: f64) -> String {
    if !m.is_finite() {
        return "\\infty".to_string();
    }
    if m == 0.0 {
        return "0".to_string();
    }

    if (1e-4..1e4).contains(&m) {
        let expo = m.log10().floor() as i32;
        let decimales = (3 - expo).max(0) as usize;
        return sans_zeros_finaux(format!("{m:.decimales$}"));
    }

    // notation scientifique : "1.235e-5" -> 1.235\times10^{-5}
    let s = format!("{m:.3e}");
    match s.split_once('e') {
        Some((mantisse, expo)) => {
            let mantisse = sans_zeros_finaux(mantisse.to_string());
            format!("{mantisse}\\times10^{{{expo}}}")
        }
        None => s,
    }
}

/// Magnitude -> "p", "\frac{p}{q}" ou décimal.
fn texte_magnitude(m: f64) -> String {
    match vers_fraction_defaut(m) {
        Some(r) if r.denom().is_one() => format!("{}", r.numer()),
        Some(r) => format!("\\frac{{{}}}{{{}}}", r.numer(), r.denom()),
        None => decimal_4(m),
    }
}

/// Coefficient signé, seul (tableau des coefficients).
pub fn formater_coefficient(c: f64) -> String {
    if c.abs() < SEUIL_ZERO {
        return "0".to_string();
    }
    let t = texte_magnitude(c.abs());
    if c < 0.0 {
        format!("-{t}")
    } else {
        t
    }
}

/* ------------------------ Puissances ------------------------ */

fn texte_puissance(k: usize, a: f64) -> String {
    if k == 0 {
        return String::new();
    }

    let arrondi = sans_zeros_finaux(format!("{:.4}", a.abs()));
    let base = if arrondi == "0" {
        "x".to_string()
    } else if a < 0.0 {
        format!("(x + {arrondi})")
    } else {
        format!("(x - {arrondi})")
    };

    if k == 1 {
        base
    } else {
        format!("{base}^{{{k}}}")
    }
}

/* ------------------------ Termes ------------------------ */

/// Liste des termes non nuls, dans l’ordre croissant des puissances.
pub fn formater_termes(coeffs: &[f64], a: f64) -> Vec<TermeFormate> {
    coeffs
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_finite() && c.abs() >= SEUIL_ZERO)
        .map(|(k, &c)| {
            let texte_coeff = texte_magnitude(c.abs());
            let texte_puissance = texte_puissance(k, a);
            let texte_combine = if texte_puissance.is_empty() {
                texte_coeff.clone()
            } else if texte_coeff == "1" {
                texte_puissance.clone()
            } else {
                format!("{texte_coeff}{texte_puissance}")
            };

            TermeFormate {
                ordre: k,
                signe: if c < 0.0 { Signe::Moins } else { Signe::Plus },
                texte_coeff,
                texte_puissance,
                texte_combine,
            }
        })
        .collect()
}

/// Suite de termes : le premier porte son signe seulement s’il est négatif,
/// les suivants sont liés par " + " / " - ".
fn enchainer(termes: &[TermeFormate], debut: bool) -> String {
    let mut out = String::new();
    for (i, t) in termes.iter().enumerate() {
        if i == 0 && debut {
            out.push_str(&t.texte_signe());
        } else {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(t.operateur());
            out.push(' ');
            out.push_str(&t.texte_combine);
        }
    }
    out
}

/// Rendu sur une ligne ; "0" si tous les termes sont omis.
pub fn latex_ligne(termes: &[TermeFormate]) -> String {
    if termes.is_empty() {
        return "0".to_string();
    }
    enchainer(termes, true)
}

/// Rendu aligned, TERMES_PAR_LIGNE termes par ligne.
pub fn latex_multiligne(termes: &[TermeFormate]) -> String {
    if termes.is_empty() {
        return "\\begin{aligned}\n&0\n\\end{aligned}".to_string();
    }

    let lignes: Vec<String> = termes
        .chunks(TERMES_PAR_LIGNE)
        .enumerate()
        .map(|(i, bloc)| format!("&{}", enchainer(bloc, i == 0)))
        .collect();

    format!("\\begin{{aligned}}\n{}\n\\end{{aligned}}", lignes.join(" \\\\\n"))
}
