//! Noyau Taylor (f64, sans UI)
//!
//! Organisation interne :
//! - jetons.rs / rpn.rs / expr.rs / eval.rs : lecture + évaluation de f(x)
//! - derive.rs       : dérivation symbolique pure
//! - forme_normale.rs: termes semblables regroupés (dérivées successives compactes)
//! - fraction.rs     : f64 -> p/q (petits dénominateurs)
//! - forme_close.rs  : coefficients du catalogue (sin, cos, exp, ...)
//! - symbolique.rs   : repli par dérivées symboliques successives
//! - numerique.rs    : différences finies + table de factorielles
//! - coefficients.rs : politique forme close -> symbolique -> numérique
//! - serie.rs        : P_n(x) + échantillons
//! - format.rs       : termes LaTeX (ligne / aligned)
//! - pipeline.rs     : calcul complet

pub mod coefficients;
pub mod derive;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod forme_close;
pub mod forme_normale;
pub mod fraction;
pub mod jetons;
pub mod numerique;
pub mod pipeline;
pub mod rpn;
pub mod serie;
pub mod symbolique;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use coefficients::{coefficients_taylor, Coefficients, Source};
pub use erreur::ErreurTaylor;
pub use numerique::MoteurNumerique;
pub use pipeline::{calculer_serie, DemarcheNoyau, ParametresSerie, SerieTaylor};
