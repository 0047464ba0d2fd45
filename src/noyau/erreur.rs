// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - Analyse / EntreeVide : visibles (message utilisateur), tracé annulé
// - HorsCatalogue / DomaineInvalide : jamais visibles, déclenchent le repli
// - Instabilite : avertissement visible, tracé précédent conservé
//
// Les échecs d'évaluation ponctuels (un x du tracé) ne sont PAS des erreurs :
// l'échantillon porte None.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurTaylor {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("expression illisible : {0}")]
    Analyse(String),

    #[error("fonction hors du catalogue des formes closes")]
    HorsCatalogue,

    #[error("forme close invalide au centre a = {centre}")]
    DomaineInvalide { centre: f64 },

    #[error("série numériquement instable (|coeff| max = {max:e}) : tracé ignoré")]
    Instabilite { max: f64 },
}

impl ErreurTaylor {
    /// Vrai si l'erreur doit être montrée à l'utilisateur.
    pub fn est_visible(&self) -> bool {
        !matches!(
            self,
            ErreurTaylor::HorsCatalogue | ErreurTaylor::DomaineInvalide { .. }
        )
    }
}

impl From<String> for ErreurTaylor {
    fn from(msg: String) -> Self {
        ErreurTaylor::Analyse(msg)
    }
}

impl From<&str> for ErreurTaylor {
    fn from(msg: &str) -> Self {
        ErreurTaylor::Analyse(msg.to_string())
    }
}
