// src/app.rs
//
// Explorateur de Taylor — module App (racine)
// -------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs, vue.rs, config.rs, minuterie.rs)
// - Ré-exporter AppTaylor (pour main.rs: use crate::app::AppTaylor;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter est géré dans vue.rs (quand le champ fonction a le focus).
// - L’animation avance ici, une fois par frame, sur l’horloge egui.

pub mod config;
pub mod etat;
pub mod minuterie;
pub mod vue;

// Ré-export pratique : `use crate::app::AppTaylor;`
pub use etat::AppTaylor;

use eframe::egui;

impl eframe::App for AppTaylor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = masquer l’avertissement d’instabilité (rien d’autre).
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.effacer_avertissement();
        }

        // Animation : tics échus depuis la frame précédente.
        let maintenant = ctx.input(|i| i.time);
        self.avancer_animation(maintenant);
        if let Some(restant) = self.minuterie.restant(maintenant) {
            ctx.request_repaint_after(restant);
        }

        egui::SidePanel::left("controles")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.ui_controles(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_resultats(ui);
        });
    }
}
