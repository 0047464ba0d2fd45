//! src/app/minuterie.rs
//!
//! Minuterie répétitive annulable, pilotée par l’horloge de frame (secondes, f64).
//!
//! - Une seule poignée : demarrer() remplace toute échéance en cours.
//! - arreter() annule tout de suite : plus aucun tic après.
//! - tic(maintenant) rend le nombre d’échéances passées depuis le dernier appel
//!   (0, 1, ou plus si la frame a pris du retard).

use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Minuterie {
    /// (prochaine échéance, période), en secondes.
    echeance: Option<(f64, f64)>,
}

impl Minuterie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Démarre (ou redémarre) : premier tic à maintenant + intervalle.
    pub fn demarrer(&mut self, maintenant: f64, intervalle: Duration) {
        let periode = intervalle.as_secs_f64().max(1e-3);
        self.echeance = Some((maintenant + periode, periode));
    }

    pub fn arreter(&mut self) {
        self.echeance = None;
    }

    pub fn active(&self) -> bool {
        self.echeance.is_some()
    }

    /// Échéances franchies depuis le dernier appel.
    pub fn tic(&mut self, maintenant: f64) -> usize {
        let Some((mut prochaine, periode)) = self.echeance else {
            return 0;
        };

        let mut n = 0;
        while maintenant >= prochaine {
            n += 1;
            prochaine += periode;
        }
        self.echeance = Some((prochaine, periode));
        n
    }

    /// Temps avant la prochaine échéance (pour request_repaint_after).
    pub fn restant(&self, maintenant: f64) -> Option<Duration> {
        self.echeance
            .map(|(prochaine, _)| Duration::from_secs_f64((prochaine - maintenant).max(0.0)))
    }
}
