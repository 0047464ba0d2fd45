// src/noyau/expr.rs
//
// AST flottant (une variable libre, x).
// - Num : constante f64
// - Pi, E : constantes nommées (gardées symboliques pour l’affichage)
// - Var : variable (le parseur n’accepte que x)
// - Appel : fonction unaire du catalogue (sin, cos, ..., abs)
//
// IMPORTANT :
// - simplify() ne doit jamais “inventer” une valeur pour Var.
// - simplify() est locale : repliement des constantes + neutres, rien de plus.
// - simplify(), evaluer(), derive() sont récursifs : tout arbre construit à partir
//   d’une saisie passe d’abord par les garde-fous PROFONDEUR_MAX / MAX_NOEUDS.

use std::fmt;

/// Profondeur max d’un arbre parcouru récursivement (pile native, wasm compris).
pub const PROFONDEUR_MAX: usize = 256;

/// Taille max d’un arbre (saisie ou dérivée).
pub const MAX_NOEUDS: usize = 200_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Sqrt,
    Abs,
}

impl Fonction {
    /// Identificateur -> fonction (noms déjà en minuscules).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;
        let f = match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" | "arcsin" => Asin,
            "acos" | "arccos" => Acos,
            "atan" | "arctan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "exp" => Exp,
            "log" | "ln" => Ln,
            "sqrt" => Sqrt,
            "abs" => Abs,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Exp => "exp",
            Ln => "log",
            Sqrt => "sqrt",
            Abs => "abs",
        }
    }

    pub fn appliquer(self, v: f64) -> f64 {
        use Fonction::*;
        match self {
            Sin => v.sin(),
            Cos => v.cos(),
            Tan => v.tan(),
            Asin => v.asin(),
            Acos => v.acos(),
            Atan => v.atan(),
            Sinh => v.sinh(),
            Cosh => v.cosh(),
            Tanh => v.tanh(),
            Exp => v.exp(),
            Ln => v.ln(),
            Sqrt => v.sqrt(),
            Abs => v.abs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Pi,
    E,

    Var(String),

    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Box<Expr>),
}

/* ------------------------ Constructeurs courts ------------------------ */

pub fn num(v: f64) -> Expr {
    Expr::Num(v)
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(Box::new(a), Box::new(b))
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(Box::new(a), Box::new(b))
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(Box::new(a), Box::new(b))
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(Box::new(a), Box::new(b))
}

pub fn pow(a: Expr, b: Expr) -> Expr {
    Expr::Pow(Box::new(a), Box::new(b))
}

pub fn neg(a: Expr) -> Expr {
    Expr::Neg(Box::new(a))
}

pub fn appel(f: Fonction, a: Expr) -> Expr {
    Expr::Appel(f, Box::new(a))
}

impl Expr {
    pub fn est_num(&self, v: f64) -> bool {
        matches!(self, Expr::Num(x) if *x == v)
    }

    pub fn valeur_num(&self) -> Option<f64> {
        match self {
            Expr::Num(v) => Some(*v),
            _ => None,
        }
    }

    /// Vrai si `var` apparaît dans l’arbre.
    pub fn depend_de(&self, var: &str) -> bool {
        use Expr::*;
        match self {
            Num(_) | Pi | E => false,
            Var(v) => v == var,
            Neg(a) | Appel(_, a) => a.depend_de(var),
            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                a.depend_de(var) || b.depend_de(var)
            }
        }
    }

    /// Nombre de noeuds, borné : s’arrête dès que `plafond` est dépassé.
    /// Itératif (pas de récursion profonde sur les gros arbres de dérivées).
    pub fn compter_noeuds(&self, plafond: usize) -> usize {
        use Expr::*;

        let mut pile: Vec<&Expr> = Vec::with_capacity(64);
        pile.push(self);
        let mut n: usize = 0;

        while let Some(e) = pile.pop() {
            n += 1;
            if n > plafond {
                return n;
            }
            match e {
                Num(_) | Pi | E | Var(_) => {}
                Neg(a) | Appel(_, a) => pile.push(a.as_ref()),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }

        n
    }

    /// Profondeur, bornée : s’arrête dès que `plafond` est dépassé. Itératif.
    pub fn profondeur(&self, plafond: usize) -> usize {
        use Expr::*;

        let mut pile: Vec<(&Expr, usize)> = Vec::with_capacity(64);
        pile.push((self, 1));
        let mut max: usize = 0;

        while let Some((e, d)) = pile.pop() {
            max = max.max(d);
            if max > plafond {
                return max;
            }
            match e {
                Num(_) | Pi | E | Var(_) => {}
                Neg(a) | Appel(_, a) => pile.push((a.as_ref(), d + 1)),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    pile.push((a.as_ref(), d + 1));
                    pile.push((b.as_ref(), d + 1));
                }
            }
        }

        max
    }

    /// Simplification locale (SAFE), sans heuristiques.
    /// Repli des constantes numériques finies + éléments neutres.
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            Num(_) | Pi | E | Var(_) => self,

            Neg(a) => negation(a.simplify()),

            Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (Num(x), Num(y)) => Num(x + y),
                    (Num(x), _) if *x == 0.0 => b,
                    (_, Num(y)) if *y == 0.0 => a,
                    // a + (-b) => a - b
                    (_, Neg(nb)) => Sub(Box::new(a.clone()), nb.clone()),
                    _ => Add(Box::new(a), Box::new(b)),
                }
            }

            Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                // x - x => 0 (renforce la normalisation)
                if a == b {
                    return Num(0.0);
                }

                match (&a, &b) {
                    (Num(x), Num(y)) => Num(x - y),
                    (_, Num(y)) if *y == 0.0 => a,
                    (Num(x), _) if *x == 0.0 => negation(b),
                    // a - (-b) => a + b
                    (_, Neg(nb)) => Add(Box::new(a.clone()), nb.clone()),
                    _ => Sub(Box::new(a), Box::new(b)),
                }
            }

            Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                match (&a, &b) {
                    (Num(x), Num(y)) => Num(x * y),
                    (Num(x), _) | (_, Num(x)) if *x == 0.0 => Num(0.0),
                    (Num(x), _) if *x == 1.0 => b,
                    (_, Num(y)) if *y == 1.0 => a,
                    (Num(x), _) if *x == -1.0 => negation(b),
                    (_, Num(y)) if *y == -1.0 => negation(a),
                    // constante à gauche (forme stable pour l’affichage)
                    (_, Num(_)) => Mul(Box::new(b), Box::new(a)),
                    // k * (m * u) => (k*m) * u
                    (Num(k), Mul(p, q)) => {
                        if let Num(m) = p.as_ref() {
                            Mul(Box::new(Num(k * m)), q.clone())
                        } else {
                            Mul(Box::new(a.clone()), Box::new(b.clone()))
                        }
                    }
                    (Neg(x), Neg(y)) => Mul(x.clone(), y.clone()),
                    // le signe remonte : (-u) * v => -(u * v)
                    (Neg(x), _) => Neg(Box::new(Mul(x.clone(), Box::new(b.clone())))),
                    (_, Neg(y)) => Neg(Box::new(Mul(Box::new(a.clone()), y.clone()))),
                    _ => Mul(Box::new(a), Box::new(b)),
                }
            }

            Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                // division par zéro : on garde symbolique (l’évaluation donnera inf/NaN)
                if b.est_num(0.0) {
                    return Div(Box::new(a), Box::new(b));
                }

                match (&a, &b) {
                    (Num(x), Num(y)) => Num(x / y),
                    (Num(x), _) if *x == 0.0 => Num(0.0),
                    (_, Num(y)) if *y == 1.0 => a,
                    _ if a == b => Num(1.0),
                    _ => Div(Box::new(a), Box::new(b)),
                }
            }

            Pow(base, expo) => {
                let base = base.simplify();
                let expo = expo.simplify();

                match (&base, &expo) {
                    (Num(x), Num(y)) => {
                        let v = x.powf(*y);
                        if v.is_finite() {
                            Num(v)
                        } else {
                            Pow(Box::new(base), Box::new(expo))
                        }
                    }
                    (_, Num(y)) if *y == 0.0 => Num(1.0),
                    (_, Num(y)) if *y == 1.0 => base,
                    (Num(x), _) if *x == 1.0 => Num(1.0),
                    // (u^p)^q => u^(p*q) pour exposants entiers seulement
                    (Pow(u, p), Num(q)) => match p.as_ref() {
                        Num(pv) if pv.fract() == 0.0 && q.fract() == 0.0 => {
                            Pow(u.clone(), Box::new(Num(pv * q)))
                        }
                        _ => Pow(Box::new(base.clone()), Box::new(expo.clone())),
                    },
                    _ => Pow(Box::new(base), Box::new(expo)),
                }
            }

            Appel(f, a) => {
                let a = a.simplify();
                if let Num(v) = a {
                    let r = f.appliquer(v);
                    if r.is_finite() {
                        return Num(r);
                    }
                }
                Appel(f, Box::new(a))
            }
        }
    }
}

/// -e sur un arbre déjà simplifié (pas de nouvelle descente).
fn negation(e: Expr) -> Expr {
    match e {
        Expr::Num(v) => Expr::Num(-v),
        Expr::Neg(x) => *x,
        x => Expr::Neg(Box::new(x)),
    }
}

/* ------------------------ Affichage debug (pas “joli” final) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Num(v) => write!(f, "{v}"),
            Pi => write!(f, "π"),
            E => write!(f, "e"),
            Var(s) => write!(f, "{s}"),
            Neg(a) => write!(f, "-({a})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a})^({b})"),
            Appel(g, a) => write!(f, "{}({a})", g.nom()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::Var("x".into())
    }

    #[test]
    fn neutres() {
        assert_eq!(add(x(), num(0.0)).simplify(), x());
        assert_eq!(mul(num(1.0), x()).simplify(), x());
        assert_eq!(mul(x(), num(0.0)).simplify(), num(0.0));
        assert_eq!(pow(x(), num(1.0)).simplify(), x());
        assert_eq!(pow(x(), num(0.0)).simplify(), num(1.0));
        assert_eq!(div(x(), num(1.0)).simplify(), x());
    }

    #[test]
    fn constantes_repliees() {
        assert_eq!(add(num(2.0), mul(num(3.0), num(4.0))).simplify(), num(14.0));
        assert_eq!(appel(Fonction::Cos, num(0.0)).simplify(), num(1.0));
        assert_eq!(neg(neg(x())).simplify(), x());
    }

    #[test]
    fn var_jamais_inventee() {
        let e = appel(Fonction::Sin, x()).simplify();
        assert_eq!(e, appel(Fonction::Sin, x()));
        assert!(e.depend_de("x"));
        assert!(!num(3.0).depend_de("x"));
    }

    #[test]
    fn x_moins_x() {
        let e = sub(appel(Fonction::Exp, x()), appel(Fonction::Exp, x())).simplify();
        assert_eq!(e, num(0.0));
    }

    #[test]
    fn ln_negatif_non_replie() {
        // ln(-1) = NaN : on garde la forme symbolique
        let e = appel(Fonction::Ln, num(-1.0)).simplify();
        assert!(matches!(e, Expr::Appel(Fonction::Ln, _)));
    }

    #[test]
    fn compteur_borne() {
        let mut e = x();
        for _ in 0..12 {
            e = add(e.clone(), e);
        }
        // 2^13 - 1 noeuds : le plafond coupe court
        assert!(e.compter_noeuds(1000) > 1000);
        assert_eq!(add(x(), num(1.0)).compter_noeuds(1000), 3);
    }

    #[test]
    fn profondeur_bornee() {
        let mut e = x();
        for _ in 0..50 {
            e = add(e, num(1.0));
        }
        assert_eq!(e.profondeur(1000), 51);
        assert!(e.profondeur(10) > 10);
        assert_eq!(appel(Fonction::Sin, x()).profondeur(10), 2);
    }
}
