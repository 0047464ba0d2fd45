// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppTaylor (etat.rs) pour natif + wasm
// - Clavier : Enter recalcule (quand le champ fonction est focus)
// - Tracé fait main (Painter) : f, P_n, |f - P_n|, une polyligne par morceau continu
// - LaTeX en texte brut + bouton copier
//
// Aucune logique numérique ici : tout passe par etat.rs -> noyau.

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke};

use super::config::{ConfigTaylor, EXEMPLES};
use super::etat::AppTaylor;
use crate::noyau::format::formater_coefficient;
use crate::noyau::serie::Echantillon;

const COULEUR_ORIGINAL: Color32 = Color32::from_rgb(70, 130, 230);
const COULEUR_TAYLOR: Color32 = Color32::from_rgb(230, 120, 40);
const COULEUR_ERREUR: Color32 = Color32::from_rgb(200, 60, 60);

/// Hauteur du tracé (px).
const HAUTEUR_TRACE: f32 = 360.0;

impl AppTaylor {
    /// Panneau de gauche : paramètres.
    pub fn ui_controles(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Explorateur de Taylor");
                ui.add_space(6.0);

                self.ui_fonction(ui);

                ui.add_space(8.0);
                ui.separator();

                self.ui_parametres(ui);

                ui.add_space(8.0);
                ui.separator();

                self.ui_animation(ui);

                ui.add_space(8.0);
                ui.separator();

                self.ui_affichage(ui);
            });
    }

    /// Panneau central : tracé + LaTeX + coefficients + démarche.
    pub fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !self.avertissement.is_empty() {
                    ui.colored_label(ui.visuals().warn_fg_color, &self.avertissement);
                    ui.small("Échap pour masquer.");
                    ui.add_space(4.0);
                }

                self.ui_trace(ui);

                ui.add_space(8.0);
                self.ui_latex(ui);

                ui.add_space(8.0);
                self.ui_coefficients(ui);

                ui.add_space(8.0);
                self.ui_demarche(ui);
            });
    }

    /* ------------------------ Contrôles ------------------------ */

    fn ui_fonction(&mut self, ui: &mut egui::Ui) {
        ui.label("f(x) :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.fonction)
                .desired_width(ui.available_width())
                .hint_text("Ex: sin(x), exp(-x^2), 1/(1-x)")
                .id_source("fonction_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter : singleline rend le focus au moment où Enter est pressé
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.lost_focus() && enter {
            self.recalculer();
        }

        if ui.button("Calculer").clicked() {
            self.recalculer();
        }

        ui.add_space(4.0);
        ui.label("Exemples :");
        ui.horizontal_wrapped(|ui| {
            for (libelle, expr) in EXEMPLES {
                if ui.button(libelle).on_hover_text(expr).clicked() {
                    self.set_fonction(expr);
                }
            }
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_parametres(&mut self, ui: &mut egui::Ui) {
        let mut n = self.degre;
        if ui
            .add(egui::Slider::new(&mut n, ConfigTaylor::plage_degre()).text("degré n"))
            .changed()
        {
            self.set_degre(n);
        }

        let mut a = self.centre;
        if ui
            .add(
                egui::Slider::new(&mut a, ConfigTaylor::plage_centre())
                    .step_by(0.05)
                    .text("centre a"),
            )
            .changed()
        {
            self.set_centre(a);
        }

        ui.horizontal(|ui| {
            let (mut xmin, mut xmax) = self.vue;
            ui.label("x ∈");
            let r1 = ui.add(egui::DragValue::new(&mut xmin).speed(0.1).range(-100.0..=100.0));
            ui.label("…");
            let r2 = ui.add(egui::DragValue::new(&mut xmax).speed(0.1).range(-100.0..=100.0));
            if r1.changed() || r2.changed() {
                self.set_vue(xmin, xmax);
            }
            if ui.button("↺").on_hover_text("Fenêtre par défaut").clicked() {
                self.reset_vue();
            }
        });

        let mut points = self.config.nb_points();
        if ui
            .add(egui::DragValue::new(&mut points).speed(10).range(50..=2000).suffix(" points"))
            .changed()
        {
            self.set_nb_points(points);
        }
    }

    fn ui_animation(&mut self, ui: &mut egui::Ui) {
        let maintenant = ui.input(|i| i.time);
        let libelle = if self.minuterie.active() {
            "⏹ Arrêter"
        } else {
            "▶ Animer le degré"
        };
        if ui.button(libelle).clicked() {
            self.basculer_animation(maintenant);
        }

        ui.horizontal(|ui| {
            let mut ms = self.config.intervalle().as_millis() as u64;
            ui.label("pas :");
            if ui
                .add(egui::DragValue::new(&mut ms).speed(10).range(100..=5000).suffix(" ms"))
                .changed()
            {
                self.config.set_intervalle_ms(ms);
            }

            let mut borne = self.config.degre_max_animation();
            ui.label("jusqu’à n =");
            if ui
                .add(egui::DragValue::new(&mut borne).range(ConfigTaylor::plage_degre()))
                .changed()
            {
                self.config.set_degre_max_animation(borne);
            }
        });
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        ui.checkbox(&mut self.montrer_original, "f(x)");
        ui.checkbox(&mut self.montrer_taylor, "Pₙ(x)");
        ui.checkbox(&mut self.montrer_erreur, "|f(x) − Pₙ(x)|");
        ui.checkbox(&mut self.latex_multiligne, "LaTeX sur plusieurs lignes");
    }

    /* ------------------------ Tracé ------------------------ */

    fn ui_trace(&self, ui: &mut egui::Ui) {
        let taille = egui::vec2(ui.available_width(), HAUTEUR_TRACE);
        let (resp, painter) = ui.allocate_painter(taille, egui::Sense::hover());
        let rect = resp.rect;
        let painter = painter.with_clip_rect(rect);

        painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

        let Some(serie) = &self.serie else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "aucun tracé",
                egui::FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return;
        };

        let echantillons = &serie.trace.echantillons;
        // fenêtre du rendu affiché (peut différer de self.vue après une instabilité)
        let (xmin, xmax) = match (echantillons.first(), echantillons.last()) {
            (Some(d), Some(f)) if f.x > d.x => (d.x, f.x),
            _ => self.vue,
        };
        let (ymin, ymax) = plage_y(echantillons);
        let repere = Repere {
            rect,
            x: (xmin, xmax),
            y: (ymin, ymax),
        };

        // axes + centre
        let axe = Stroke::new(1.0, ui.visuals().weak_text_color());
        if (ymin..=ymax).contains(&0.0) {
            painter.line_segment([repere.point(xmin, 0.0), repere.point(xmax, 0.0)], axe);
        }
        if (xmin..=xmax).contains(&0.0) {
            painter.line_segment([repere.point(0.0, ymin), repere.point(0.0, ymax)], axe);
        }
        if (xmin..=xmax).contains(&self.centre) {
            let c = Stroke::new(1.0, COULEUR_TAYLOR.gamma_multiply(0.4));
            painter.line_segment(
                [repere.point(self.centre, ymin), repere.point(self.centre, ymax)],
                c,
            );
        }

        let courbes: [(bool, Color32, fn(&Echantillon) -> Option<f64>); 3] = [
            (self.montrer_original, COULEUR_ORIGINAL, |e| e.original),
            (self.montrer_taylor, COULEUR_TAYLOR, |e| e.taylor),
            (self.montrer_erreur, COULEUR_ERREUR, |e| e.erreur),
        ];

        for (visible, couleur, valeur) in courbes {
            if !visible {
                continue;
            }
            let points = echantillons
                .iter()
                .map(|e| valeur(e).map(|y| repere.point(e.x, y)));
            for morceau in morceaux(points) {
                if morceau.len() >= 2 {
                    painter.add(egui::Shape::line(morceau, Stroke::new(2.0, couleur)));
                }
            }
        }

        let legende = match serie.trace.erreur_max {
            Some(e) => format!("y ∈ [{ymin:.3}, {ymax:.3}]   max |f − Pₙ| = {e:.3e}"),
            None => format!("y ∈ [{ymin:.3}, {ymax:.3}]"),
        };
        painter.text(
            rect.left_top() + egui::vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            legende,
            egui::FontId::monospace(12.0),
            ui.visuals().text_color(),
        );
    }

    /* ------------------------ LaTeX + coefficients ------------------------ */

    fn ui_latex(&self, ui: &mut egui::Ui) {
        let Some(serie) = &self.serie else {
            return;
        };

        ui.horizontal(|ui| {
            ui.label(format!("P_{}(x) :", serie.coefficients.degre()));
            ui.label(
                egui::RichText::new(serie.coefficients.source.libelle())
                    .small()
                    .background_color(ui.visuals().faint_bg_color),
            )
            .on_hover_text("stratégie qui a produit les coefficients");

            if ui.button("Copier").clicked() {
                ui.ctx().copy_text(serie.latex.clone());
            }
        });

        let texte = if self.latex_multiligne {
            &serie.latex_multiligne
        } else {
            &serie.latex
        };
        Self::champ_monospace(ui, "latex_out", texte, 2);
    }

    fn ui_coefficients(&self, ui: &mut egui::Ui) {
        let Some(serie) = &self.serie else {
            return;
        };

        egui::CollapsingHeader::new("Coefficients")
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("table_coefficients")
                    .num_columns(3)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("k");
                        ui.strong("c_k");
                        ui.strong("valeur");
                        ui.end_row();

                        for (k, c) in serie.coefficients.valeurs.iter().enumerate() {
                            ui.monospace(k.to_string());
                            ui.monospace(formater_coefficient(*c));
                            ui.monospace(format!("{c:.6e}"));
                            ui.end_row();
                        }
                    });
            });
    }

    fn ui_demarche(&self, ui: &mut egui::Ui) {
        let Some(serie) = &self.serie else {
            return;
        };
        let d = &serie.demarche;

        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                Self::champ_demarche(ui, "Expression", "demarche_expr", &d.expression);
                Self::champ_demarche(ui, "f′(x)", "demarche_derivee", &d.derivee);
                Self::champ_demarche(ui, "Coefficients", "demarche_source", &d.source);
                Self::champ_demarche(ui, "Note", "demarche_note", &d.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }
}

/* ------------------------ Géométrie du tracé ------------------------ */

/// Passage (x, y) monde -> écran.
struct Repere {
    rect: Rect,
    x: (f64, f64),
    y: (f64, f64),
}

impl Repere {
    fn point(&self, x: f64, y: f64) -> Pos2 {
        let tx = (x - self.x.0) / (self.x.1 - self.x.0);
        let ty = (y - self.y.0) / (self.y.1 - self.y.0);
        // hors cadre : écrasé juste au-delà du bord (le clip fait le reste)
        let ty = ty.clamp(-1.0, 2.0);
        Pos2::new(
            self.rect.left() + tx as f32 * self.rect.width(),
            self.rect.bottom() - ty as f32 * self.rect.height(),
        )
    }
}

/// Plage y : calée sur f (sinon sur P_n), avec marge ; jamais dégénérée.
fn plage_y(echantillons: &[Echantillon]) -> (f64, f64) {
    let mut valeurs: Vec<f64> = echantillons.iter().filter_map(|e| e.original).collect();
    if valeurs.is_empty() {
        valeurs = echantillons.iter().filter_map(|e| e.taylor).collect();
    }

    let (mut lo, mut hi) = valeurs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if hi - lo < 1e-9 {
        lo -= 1.0;
        hi += 1.0;
    }
    let marge = (hi - lo) * 0.1;
    (lo - marge, hi + marge)
}

/// Coupe une suite de points aux trous (None) : un Vec par morceau continu.
fn morceaux<I>(points: I) -> Vec<Vec<Pos2>>
where
    I: IntoIterator<Item = Option<Pos2>>,
{
    let mut out = Vec::new();
    let mut courant = Vec::new();
    for p in points {
        match p {
            Some(p) => courant.push(p),
            None => {
                if !courant.is_empty() {
                    out.push(std::mem::take(&mut courant));
                }
            }
        }
    }
    if !courant.is_empty() {
        out.push(courant);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ech(x: f64, original: Option<f64>) -> Echantillon {
        Echantillon {
            x,
            original,
            taylor: Some(0.0),
            erreur: None,
        }
    }

    #[test]
    fn morceaux_coupes_aux_trous() {
        let p = |x: f32| Some(Pos2::new(x, 0.0));
        let m = morceaux(vec![p(0.0), p(1.0), None, None, p(3.0), None, p(5.0), p(6.0)]);
        assert_eq!(m.len(), 3);
        assert_eq!(m[0].len(), 2);
        assert_eq!(m[1].len(), 1);
        assert_eq!(m[2].len(), 2);
        assert!(morceaux(vec![None, None]).is_empty());
    }

    #[test]
    fn plage_y_non_degeneree() {
        let (lo, hi) = plage_y(&[ech(0.0, Some(2.0)), ech(1.0, Some(2.0))]);
        assert!(lo < 2.0 && hi > 2.0);

        // aucune valeur de f : on se cale sur P_n
        let (lo, hi) = plage_y(&[ech(0.0, None)]);
        assert!(lo < 0.0 && hi > 0.0);

        assert_eq!(plage_y(&[]), (-1.0, 1.0));
    }

    #[test]
    fn repere_coins() {
        let r = Repere {
            rect: Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0)),
            x: (-1.0, 1.0),
            y: (0.0, 1.0),
        };
        assert_eq!(r.point(-1.0, 0.0), Pos2::new(0.0, 50.0));
        assert_eq!(r.point(1.0, 1.0), Pos2::new(100.0, 0.0));
        // très loin au-dessus : écrasé, pas d’infini
        assert!(r.point(0.0, 1e30).y.is_finite());
    }
}
