// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est une fonction du catalogue (sin, cos, ..., abs) => fonction unaire
//    - si name == "x" => variable
//    - sinon => erreur (une seule variable libre)
// - Neg (moins unaire, déjà marqué par jetons.rs) : préfixe, sous ^ et au-dessus de * /
//   donc -x^2 = -(x^2) et 2^-x = 2^(-x)
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::expr::{Expr, Fonction, MAX_NOEUDS, PROFONDEUR_MAX};
use super::jetons::Tok;

/// Seule variable libre admise.
pub const VARIABLE: &str = "x";

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("x"), Slash, Num(2), RPar]
///   rpn:    [Ident("x"), Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => out.push(tok),

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Tok::Ident(name));
                } else {
                    out.push(Tok::Ident(name));
                }
            }

            // préfixe : ne dépile rien
            Tok::Neg | Tok::LPar => ops.push(tok),

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err("parenthèse fermante sans ouvrante".into());
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Ident(name)) = ops.last() {
                    if is_fonction_ident(name.as_str()) {
                        if let Some(f) = ops.pop() {
                            out.push(f);
                        }
                    }
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    if let Tok::Ident(name) = top {
                        if is_fonction_ident(name.as_str()) {
                            break;
                        }
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    if rpn.len() > MAX_NOEUDS {
        return Err(format!("expression trop longue (plus de {MAX_NOEUDS} éléments)"));
    }

    // (arbre, profondeur) : la garde agit pendant la construction,
    // aucun arbre trop profond n’est jamais bâti.
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let profonde = || format!("expression trop profonde (plus de {PROFONDEUR_MAX} niveaux)");

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push((Expr::Num(v), 1)),
            Tok::Pi => st.push((Expr::Pi, 1)),
            Tok::E => st.push((Expr::E, 1)),

            Tok::Neg => {
                let (a, d) = st.pop().ok_or("moins sans opérande")?;
                if d + 1 > PROFONDEUR_MAX {
                    return Err(profonde());
                }
                st.push((Expr::Neg(Box::new(a)), d + 1));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, db) = st.pop().ok_or("expression invalide")?;
                let (a, da) = st.pop().ok_or("expression invalide")?;
                let d = da.max(db) + 1;
                if d > PROFONDEUR_MAX {
                    return Err(profonde());
                }
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };

                st.push((e, d));
            }

            Tok::Ident(name) => match Fonction::depuis_nom(&name) {
                Some(f) => {
                    let (x, d) = st.pop().ok_or("fonction sans argument")?;
                    if d + 1 > PROFONDEUR_MAX {
                        return Err(profonde());
                    }
                    st.push((Expr::Appel(f, Box::new(x)), d + 1));
                }
                None if name == VARIABLE => st.push((Expr::Var(name), 1)),
                None => return Err(format!("identifiant inconnu: '{name}' (seule variable : x)")),
            },

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    let (e, _) = st.pop().ok_or("expression vide")?;
    if !st.is_empty() {
        return Err("expression invalide".into());
    }
    Ok(e)
}
