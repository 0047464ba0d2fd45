// src/noyau/derive.rs
//
// Dérivation symbolique (pure) : &Expr -> Expr, l’entrée n’est jamais modifiée.
//
// Les constructeurs locaux (somme, produit, ...) coupent les cas 0 et 1 tout de suite :
// sans ça, dériver sin(x^5) dix fois fabrique des arbres énormes avant même simplify().
// simplify() passe ensuite sur le résultat.

use super::expr::{add, appel, div, mul, neg, num, pow, sub, Expr, Fonction};

/* ------------------------ Constructeurs “prudents” ------------------------ */

fn somme(u: Expr, v: Expr) -> Expr {
    if u.est_num(0.0) {
        v
    } else if v.est_num(0.0) {
        u
    } else {
        add(u, v)
    }
}

fn difference(u: Expr, v: Expr) -> Expr {
    if v.est_num(0.0) {
        u
    } else if u.est_num(0.0) {
        oppose(v)
    } else {
        sub(u, v)
    }
}

fn produit(u: Expr, v: Expr) -> Expr {
    if u.est_num(0.0) || v.est_num(0.0) {
        num(0.0)
    } else if u.est_num(1.0) {
        v
    } else if v.est_num(1.0) {
        u
    } else {
        mul(u, v)
    }
}

fn quotient(u: Expr, v: Expr) -> Expr {
    if u.est_num(0.0) {
        num(0.0)
    } else if v.est_num(1.0) {
        u
    } else {
        div(u, v)
    }
}

fn oppose(u: Expr) -> Expr {
    match u {
        Expr::Num(v) => num(-v),
        Expr::Neg(x) => *x,
        x => neg(x),
    }
}

fn carre(u: Expr) -> Expr {
    pow(u, num(2.0))
}

/* ------------------------ Règles ------------------------ */

/// d(expr)/d(var), simplifié.
pub fn derive(expr: &Expr, var: &str) -> Expr {
    derive_brut(expr, var).simplify()
}

/// Dérivée sans simplification finale (règles + coupes 0/1 seulement).
pub fn derive_brut(expr: &Expr, var: &str) -> Expr {
    use Expr::*;

    // Constante (aucune occurrence de var) : dérivée nulle, sans descendre.
    if !expr.depend_de(var) {
        return num(0.0);
    }

    match expr {
        Num(_) | Pi | E => num(0.0),
        Var(v) => {
            if v == var {
                num(1.0)
            } else {
                num(0.0)
            }
        }

        Neg(u) => oppose(derive_brut(u, var)),

        // (u + v)' = u' + v'
        Add(u, v) => somme(derive_brut(u, var), derive_brut(v, var)),
        Sub(u, v) => difference(derive_brut(u, var), derive_brut(v, var)),

        // (u * v)' = u' v + u v'
        Mul(u, v) => {
            let du = derive_brut(u, var);
            let dv = derive_brut(v, var);
            somme(
                produit(du, (**v).clone()),
                produit((**u).clone(), dv),
            )
        }

        // (u / v)' = (u' v - u v') / v²
        Div(u, v) => {
            let du = derive_brut(u, var);
            let dv = derive_brut(v, var);

            if dv.est_num(0.0) {
                // dénominateur constant : u' / v
                return quotient(du, (**v).clone());
            }

            let numer = difference(
                produit(du, (**v).clone()),
                produit((**u).clone(), dv),
            );
            quotient(numer, carre((**v).clone()))
        }

        Pow(u, n) => derive_puissance(u, n, var),

        Appel(f, u) => {
            let du = derive_brut(u, var);
            let u = (**u).clone();
            produit(derive_fonction(*f, u), du)
        }
    }
}

/// (u^n)' selon que l’exposant dépend ou non de la variable.
fn derive_puissance(u: &Expr, n: &Expr, var: &str) -> Expr {
    let du = derive_brut(u, var);

    if !n.depend_de(var) {
        // exposant constant : n u^(n-1) u'
        let n_moins_1 = match n.valeur_num() {
            Some(v) => num(v - 1.0),
            None => difference(n.clone(), num(1.0)),
        };
        return produit(
            produit(n.clone(), pow(u.clone(), n_moins_1)),
            du,
        );
    }

    let dn = derive_brut(n, var);
    let puiss = pow(u.clone(), n.clone());

    if !u.depend_de(var) {
        // base constante : c^v ln(c) v'
        return produit(
            produit(puiss, appel(Fonction::Ln, u.clone())),
            dn,
        );
    }

    // cas général (dérivation logarithmique) : u^n (n' ln u + n u'/u)
    produit(
        puiss,
        somme(
            produit(dn, appel(Fonction::Ln, u.clone())),
            quotient(produit(n.clone(), du), u.clone()),
        ),
    )
}

/// f'(u) (sans le facteur u').
fn derive_fonction(f: Fonction, u: Expr) -> Expr {
    use Fonction::*;

    match f {
        Sin => appel(Cos, u),
        Cos => oppose(appel(Sin, u)),
        // 1 + tan²(u)
        Tan => somme(num(1.0), carre(appel(Tan, u))),
        // 1/√(1-u²)
        Asin => quotient(num(1.0), appel(Sqrt, difference(num(1.0), carre(u)))),
        Acos => oppose(quotient(
            num(1.0),
            appel(Sqrt, difference(num(1.0), carre(u))),
        )),
        // 1/(1+u²)
        Atan => quotient(num(1.0), somme(num(1.0), carre(u))),
        Sinh => appel(Cosh, u),
        Cosh => appel(Sinh, u),
        // 1 - tanh²(u)
        Tanh => difference(num(1.0), carre(appel(Tanh, u))),
        Exp => appel(Exp, u),
        Ln => quotient(num(1.0), u),
        // 1/(2√u)
        Sqrt => quotient(num(1.0), produit(num(2.0), appel(Sqrt, u))),
        // u/|u| (indéfini en 0 : l’évaluation rend NaN, et c’est voulu)
        Abs => quotient(u.clone(), appel(Abs, u)),
    }
}
