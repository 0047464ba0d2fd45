// src/noyau/numerique.rs
//
// Dérivée n-ième par différences finies centrées.
//
// - h = eps^(1/(n+2)) * max(1, |x|), eps = 2.2e-16
// - points x + (n/2 - k) h, k = 0..=n
// - somme Σ (-1)^k C(n,k) f(x_k), divisée par h^n
// - un seul échantillon non fini => NaN (pas de résultat partiel)
//
// Limite connue : la précision s’effondre au-delà de l’ordre 10–15
// (troncature contre arrondi). Ce n’est pas un bug à corriger ici.

/// Epsilon machine arrondi, utilisé pour l’échelle du pas.
pub const EPS: f64 = 2.2e-16;

/// Table de factorielles mémoïsée.
/// Croît à la demande (indices 0..=n), ne rétrécit jamais.
#[derive(Clone, Debug)]
pub struct TableFactorielles {
    table: Vec<f64>,
}

impl Default for TableFactorielles {
    fn default() -> Self {
        Self { table: vec![1.0] }
    }
}

impl TableFactorielles {
    pub fn new() -> Self {
        Self::default()
    }

    /// n! ; pour n < 0, rend 1 (valeur garde).
    pub fn factorielle(&mut self, n: i64) -> f64 {
        if n < 0 {
            return 1.0;
        }
        let n = n as usize;
        while self.table.len() <= n {
            let k = self.table.len();
            let precedent = self.table[k - 1];
            self.table.push(precedent * k as f64);
        }
        self.table[n]
    }

    /// C(n, k) ; 0 si k > n.
    pub fn binomial(&mut self, n: usize, k: usize) -> f64 {
        if k > n {
            return 0.0;
        }
        let fn_ = self.factorielle(n as i64);
        let fk = self.factorielle(k as i64);
        let fnk = self.factorielle((n - k) as i64);
        fn_ / (fk * fnk)
    }

    /// Nombre d’entrées déjà calculées.
    pub fn taille(&self) -> usize {
        self.table.len()
    }
}

/// Moteur de dérivation numérique : possède son cache de factorielles.
#[derive(Clone, Debug, Default)]
pub struct MoteurNumerique {
    factorielles: TableFactorielles,
}

impl MoteurNumerique {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factorielles(&mut self) -> &mut TableFactorielles {
        &mut self.factorielles
    }

    /// Estimation de f^(n)(x).
    pub fn derivee<F>(&mut self, f: F, x: f64, n: usize) -> f64
    where
        F: Fn(f64) -> f64,
    {
        if n == 0 {
            return f(x);
        }

        let h = pas(x, n);
        let demi = n as f64 / 2.0;

        let mut somme = 0.0;
        for k in 0..=n {
            let v = f(x + (demi - k as f64) * h);
            if !v.is_finite() {
                return f64::NAN;
            }
            let c = self.factorielles.binomial(n, k);
            if k % 2 == 0 {
                somme += c * v;
            } else {
                somme -= c * v;
            }
        }

        somme / h.powi(n as i32)
    }
}

/// Pas adapté à l’ordre (compromis troncature / arrondi) et à l’échelle de x.
pub fn pas(x: f64, n: usize) -> f64 {
    EPS.powf(1.0 / (n as f64 + 2.0)) * x.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn factorielles_croissantes() {
        let mut t = TableFactorielles::new();
        assert_eq!(t.taille(), 1);
        assert_eq!(t.factorielle(0), 1.0);
        assert_eq!(t.factorielle(5), 120.0);
        assert_eq!(t.taille(), 6);
        // ne rétrécit pas
        assert_eq!(t.factorielle(3), 6.0);
        assert_eq!(t.taille(), 6);
        assert_eq!(t.factorielle(10), 3_628_800.0);
    }

    #[test]
    fn factorielle_negative_garde() {
        let mut t = TableFactorielles::new();
        assert_eq!(t.factorielle(-1), 1.0);
        assert_eq!(t.factorielle(-42), 1.0);
    }

    #[test]
    fn binomiaux() {
        let mut t = TableFactorielles::new();
        assert_eq!(t.binomial(4, 2), 6.0);
        assert_eq!(t.binomial(10, 0), 1.0);
        assert_eq!(t.binomial(10, 10), 1.0);
        assert_eq!(t.binomial(3, 5), 0.0);
    }

    #[test]
    fn ordre_zero_direct() {
        let mut m = MoteurNumerique::new();
        assert_eq!(m.derivee(|x| x * x + 1.0, 3.0, 0), 10.0);
    }

    #[test]
    fn premieres_derivees() {
        let mut m = MoteurNumerique::new();
        assert_relative_eq!(m.derivee(f64::sin, 0.5, 1), 0.5f64.cos(), epsilon = 1e-9);
        assert_relative_eq!(m.derivee(f64::exp, 1.0, 2), 1f64.exp(), epsilon = 1e-6);
        assert_abs_diff_eq!(m.derivee(|x| x * x * x, 2.0, 3), 6.0, epsilon = 1e-3);
    }

    #[test]
    fn echantillon_non_fini_donne_nan() {
        let mut m = MoteurNumerique::new();
        // sqrt en 0 : x - h/2 < 0 => NaN
        assert!(m.derivee(f64::sqrt, 0.0, 1).is_nan());
        assert!(m.derivee(|x| 1.0 / x, 0.0, 2).is_nan());
    }

    #[test]
    fn pas_mis_a_l_echelle() {
        assert_eq!(pas(0.0, 1), pas(1.0, 1));
        assert_relative_eq!(pas(10.0, 2), 10.0 * pas(0.0, 2));
    }
}
