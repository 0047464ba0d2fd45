// src/noyau/forme_normale.rs
//
// Forme normale d’un arbre : somme de monômes à termes semblables regroupés.
//
//   somme   = { monôme -> coefficient f64 }     (coefficient 0 : terme retiré)
//   monôme  = { atome  -> exposant entier }      (monôme vide : la constante 1)
//   atome   = x | f(somme) | (somme)^k | (somme)^r (r non entier) | (somme)^(somme)
//
// Sert au repli symbolique : après chaque dérivation, u^a·u^b fusionne, les constantes
// se replient et les termes semblables s’additionnent. tan, exp(-x^2), sin(x)/x restent
// de petite taille jusqu’à l’ordre 20.
//
// IMPORTANT :
// - seuls les exposants ENTIERS fusionnent (u^(1/2)·u^(1/2) n’est pas u pour u < 0).
// - une constante non finie (1/0, ln 0) se replie telle quelle : l’évaluation la verra.
// - le rendu est équilibré (sommes et produits en arbre binaire) : profondeur en log.
// - None si une distribution dépasse MAX_TERMES (l’appelant garde l’arbre brut).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::expr::{add, appel, mul, neg, num, pow, Expr, Fonction};

/// Garde-fou sur la taille d’une somme normalisée.
pub const MAX_TERMES: usize = 20_000;

/// f64 totalement ordonné (clé de BTreeMap).
#[derive(Clone, Copy, Debug)]
pub struct Reel(pub f64);

impl PartialEq for Reel {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Reel {}

impl PartialOrd for Reel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Atome {
    Var(String),
    Appel(Fonction, Somme),
    /// Somme d’au moins deux termes, portée à un exposant entier par le monôme.
    Somme(Somme),
    /// Exposant constant non entier.
    Puissance(Somme, Reel),
    /// Exposant qui dépend de la variable.
    PuissanceVar(Somme, Somme),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Monome(BTreeMap<Atome, i32>);

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Somme(BTreeMap<Monome, Reel>);

/* ------------------------ Monômes ------------------------ */

impl Monome {
    fn atome(a: Atome) -> Monome {
        let mut m = BTreeMap::new();
        m.insert(a, 1);
        Monome(m)
    }

    fn est_unite(&self) -> bool {
        self.0.is_empty()
    }

    fn fois(&self, autre: &Monome) -> Monome {
        let mut out = self.0.clone();
        for (a, &k) in &autre.0 {
            let e = out.entry(a.clone()).or_insert(0);
            *e = e.saturating_add(k);
            if *e == 0 {
                out.remove(a);
            }
        }
        Monome(out)
    }

    fn puissance(&self, k: i32) -> Monome {
        Monome(
            self.0
                .iter()
                .map(|(a, &e)| (a.clone(), e.saturating_mul(k)))
                .collect(),
        )
    }
}

/* ------------------------ Sommes ------------------------ */

impl Somme {
    pub fn constante(c: f64) -> Somme {
        let mut s = Somme::default();
        s.ajouter(Monome::default(), c);
        s
    }

    fn atome(a: Atome) -> Somme {
        let mut s = Somme::default();
        s.ajouter(Monome::atome(a), 1.0);
        s
    }

    pub fn nb_termes(&self) -> usize {
        self.0.len()
    }

    /// Valeur si la somme est constante (la somme vide vaut 0).
    pub fn comme_constante(&self) -> Option<f64> {
        match self.0.len() {
            0 => Some(0.0),
            1 => self
                .0
                .iter()
                .next()
                .filter(|(m, _)| m.est_unite())
                .map(|(_, c)| c.0),
            _ => None,
        }
    }

    fn ajouter(&mut self, m: Monome, c: f64) {
        let total = self.0.get(&m).map_or(c, |r| r.0 + c);
        if total == 0.0 {
            self.0.remove(&m);
        } else {
            self.0.insert(m, Reel(total));
        }
    }

    fn plus(mut self, autre: Somme) -> Option<Somme> {
        for (m, c) in autre.0 {
            self.ajouter(m, c.0);
        }
        borne(self)
    }

    fn oppose(self) -> Somme {
        Somme(self.0.into_iter().map(|(m, c)| (m, Reel(-c.0))).collect())
    }

    fn fois(&self, autre: &Somme) -> Option<Somme> {
        let mut out = Somme::default();
        for (m1, c1) in &self.0 {
            for (m2, c2) in &autre.0 {
                out.ajouter(m1.fois(m2), c1.0 * c2.0);
                if out.0.len() > MAX_TERMES {
                    return None;
                }
            }
        }
        Some(out)
    }

    /// s^k, k entier : un seul terme se distribue, sinon atome (s)^k.
    fn puissance_entiere(self, k: i32) -> Somme {
        if k == 0 {
            return Somme::constante(1.0);
        }
        if k == 1 {
            return self;
        }
        if self.0.len() == 1 {
            if let Some((m, c)) = self.0.iter().next() {
                let mut s = Somme::default();
                s.ajouter(m.puissance(k), c.0.powi(k));
                return s;
            }
        }
        if self.0.is_empty() {
            return Somme::constante(0f64.powi(k));
        }
        let mut s = Somme::default();
        s.ajouter(Monome::atome(Atome::Somme(self)).puissance(k), 1.0);
        s
    }
}

fn borne(s: Somme) -> Option<Somme> {
    (s.0.len() <= MAX_TERMES).then_some(s)
}

/* ------------------------ Expr -> Somme ------------------------ */

/// Forme normale d’un arbre, ou None si elle devient trop grosse.
pub fn normaliser(expr: &Expr) -> Option<Somme> {
    use Expr::*;

    match expr {
        Num(v) => Some(Somme::constante(*v)),
        Pi => Some(Somme::constante(std::f64::consts::PI)),
        E => Some(Somme::constante(std::f64::consts::E)),
        Var(nom) => Some(Somme::atome(Atome::Var(nom.clone()))),

        Neg(a) => Some(normaliser(a)?.oppose()),
        Add(a, b) => normaliser(a)?.plus(normaliser(b)?),
        Sub(a, b) => normaliser(a)?.plus(normaliser(b)?.oppose()),
        Mul(a, b) => normaliser(a)?.fois(&normaliser(b)?),
        Div(a, b) => {
            let inverse = normaliser(b)?.puissance_entiere(-1);
            normaliser(a)?.fois(&inverse)
        }

        Pow(u, e) => {
            let base = normaliser(u)?;
            let expo = normaliser(e)?;
            Some(puissance(base, expo))
        }

        Appel(f, u) => {
            let arg = normaliser(u)?;
            Some(match arg.comme_constante() {
                Some(c) => Somme::constante(f.appliquer(c)),
                None => Somme::atome(Atome::Appel(*f, arg)),
            })
        }
    }
}

fn puissance(base: Somme, expo: Somme) -> Somme {
    match (base.comme_constante(), expo.comme_constante()) {
        (_, Some(k)) if k.fract() == 0.0 && k.abs() <= i32::MAX as f64 => {
            base.puissance_entiere(k as i32)
        }
        (Some(c), Some(k)) => Somme::constante(c.powf(k)),
        (None, Some(k)) => Somme::atome(Atome::Puissance(base, Reel(k))),
        (_, None) => Somme::atome(Atome::PuissanceVar(base, expo)),
    }
}

/* ------------------------ Somme -> Expr ------------------------ */

/// Arbre binaire équilibré (neutre si la liste est vide).
fn equilibrer(mut v: Vec<Expr>, op: fn(Expr, Expr) -> Expr, neutre: f64) -> Expr {
    while v.len() > 1 {
        let mut suivant = Vec::with_capacity(v.len().div_ceil(2));
        let mut it = v.into_iter();
        while let Some(a) = it.next() {
            match it.next() {
                Some(b) => suivant.push(op(a, b)),
                None => suivant.push(a),
            }
        }
        v = suivant;
    }
    v.pop().unwrap_or(num(neutre))
}

fn atome_vers_expr(a: &Atome) -> Expr {
    match a {
        Atome::Var(nom) => Expr::Var(nom.clone()),
        Atome::Appel(f, s) => appel(*f, vers_expr(s)),
        Atome::Somme(s) => vers_expr(s),
        Atome::Puissance(s, k) => pow(vers_expr(s), num(k.0)),
        Atome::PuissanceVar(b, e) => pow(vers_expr(b), vers_expr(e)),
    }
}

fn terme_vers_expr(m: &Monome, c: f64) -> Expr {
    if m.est_unite() {
        return num(c);
    }

    let facteurs: Vec<Expr> = m
        .0
        .iter()
        .map(|(a, &k)| {
            let base = atome_vers_expr(a);
            if k == 1 {
                base
            } else {
                pow(base, num(k as f64))
            }
        })
        .collect();
    let produit = equilibrer(facteurs, mul, 1.0);

    if c == 1.0 {
        produit
    } else if c == -1.0 {
        neg(produit)
    } else {
        mul(num(c), produit)
    }
}

pub fn vers_expr(s: &Somme) -> Expr {
    let termes: Vec<Expr> = s.0.iter().map(|(m, c)| terme_vers_expr(m, c.0)).collect();
    equilibrer(termes, add, 0.0)
}

/// Expr -> forme normale -> Expr.
pub fn forme_normale(expr: &Expr) -> Option<Expr> {
    normaliser(expr).map(|s| vers_expr(&s))
}
