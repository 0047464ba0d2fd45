//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir les paramètres (fonction, a, n, fenêtre), le dernier rendu valide,
//! les messages, et la minuterie d’animation.
//!
//! Contrats :
//! - Toute mutation de paramètre est suivie d’un recalcul complet (idempotent).
//! - Instabilité : avertissement, le rendu précédent reste affiché.
//! - Expression illisible : message d’erreur, plus de tracé.

use crate::noyau::{calculer_serie, ErreurTaylor, MoteurNumerique, ParametresSerie, SerieTaylor};

use super::config::{borner_centre, borner_degre, borner_vue, ConfigTaylor, VUE_DEFAUT};
use super::minuterie::Minuterie;

/// Fonction affichée au lancement.
const FONCTION_DEFAUT: &str = "sin(x)";

/// Degré affiché au lancement.
const DEGRE_DEFAUT: usize = 5;

#[derive(Clone, Debug)]
pub struct AppTaylor {
    // --- paramètres ---
    pub fonction: String,
    pub centre: f64,
    pub degre: usize,
    pub vue: (f64, f64),
    pub config: ConfigTaylor,

    // --- affichage ---
    pub montrer_original: bool,
    pub montrer_taylor: bool,
    pub montrer_erreur: bool,
    pub latex_multiligne: bool,

    // --- sorties ---
    /// Dernier rendu valide (None après une expression illisible).
    pub serie: Option<SerieTaylor>,
    pub erreur: String,
    pub avertissement: String,

    // --- animation ---
    pub minuterie: Minuterie,

    // Cache de factorielles : vit aussi longtemps que l’app.
    moteur: MoteurNumerique,

    // --- UX ---
    pub focus_entree: bool,
}

impl Default for AppTaylor {
    fn default() -> Self {
        let mut app = Self {
            fonction: FONCTION_DEFAUT.to_string(),
            centre: 0.0,
            degre: DEGRE_DEFAUT,
            vue: VUE_DEFAUT,
            config: ConfigTaylor::default(),
            montrer_original: true,
            montrer_taylor: true,
            montrer_erreur: false,
            latex_multiligne: false,
            serie: None,
            erreur: String::new(),
            avertissement: String::new(),
            minuterie: Minuterie::new(),
            moteur: MoteurNumerique::new(),
            focus_entree: true,
        };
        app.recalculer();
        app
    }
}

impl AppTaylor {
    /* ------------------------ Calcul ------------------------ */

    pub fn parametres(&self) -> ParametresSerie {
        ParametresSerie {
            centre: self.centre,
            degre: self.degre,
            vue: self.vue,
            nb_points: self.config.nb_points(),
        }
    }

    /// Recalcul complet à partir des paramètres courants.
    pub fn recalculer(&mut self) {
        let params = self.parametres();
        let res = calculer_serie(&self.fonction, &params, &mut self.moteur);
        self.appliquer_resultat(res);
    }

    /// Dépose un résultat de pipeline dans l’état.
    pub fn appliquer_resultat(&mut self, res: Result<SerieTaylor, ErreurTaylor>) {
        match res {
            Ok(serie) => {
                self.serie = Some(serie);
                self.erreur.clear();
                self.avertissement.clear();
            }
            Err(e @ ErreurTaylor::Instabilite { .. }) => {
                // on garde le tracé et le LaTeX précédents ; l’ancienne erreur n’a plus cours
                self.erreur.clear();
                self.avertissement = e.to_string();
            }
            Err(e) if e.est_visible() => {
                self.serie = None;
                self.avertissement.clear();
                self.erreur = e.to_string();
            }
            // refus de forme close : jamais remontés par le pipeline
            Err(e) => log::debug!("erreur interne ignorée: {e}"),
        }
    }

    /* ------------------------ Paramètres ------------------------ */

    pub fn set_fonction(&mut self, fonction: impl Into<String>) {
        self.fonction = fonction.into();
        self.recalculer();
        self.focus_entree = true;
    }

    pub fn set_centre(&mut self, a: f64) {
        self.centre = borner_centre(a);
        self.recalculer();
    }

    pub fn set_degre(&mut self, n: usize) {
        self.degre = borner_degre(n);
        self.recalculer();
    }

    pub fn set_vue(&mut self, xmin: f64, xmax: f64) {
        self.vue = borner_vue(xmin, xmax);
        self.recalculer();
    }

    pub fn reset_vue(&mut self) {
        self.set_vue(VUE_DEFAUT.0, VUE_DEFAUT.1);
    }

    pub fn set_nb_points(&mut self, n: usize) {
        self.config.set_nb_points(n);
        self.recalculer();
    }

    /// Escape : efface l’avertissement (rien d’autre).
    pub fn effacer_avertissement(&mut self) {
        self.avertissement.clear();
    }

    /* ------------------------ Animation ------------------------ */

    /// Marche/arrêt. Au démarrage : degré remis à 0.
    pub fn basculer_animation(&mut self, maintenant: f64) {
        if self.minuterie.active() {
            self.minuterie.arreter();
            return;
        }
        self.degre = 0;
        self.recalculer();
        self.minuterie.demarrer(maintenant, self.config.intervalle());
        log::debug!("animation démarrée (jusqu’à n = {})", self.config.degre_max_animation());
    }

    /// Un tic = degré + 1 puis recalcul. Arrêt automatique à la borne.
    /// Rend vrai si quelque chose a changé.
    pub fn avancer_animation(&mut self, maintenant: f64) -> bool {
        let tics = self.minuterie.tic(maintenant);
        let borne = self.config.degre_max_animation();
        let mut change = false;

        for _ in 0..tics {
            if self.degre >= borne {
                break;
            }
            self.degre += 1;
            self.recalculer();
            change = true;
        }

        if self.degre >= borne {
            self.minuterie.arreter();
        }
        change
    }
}
