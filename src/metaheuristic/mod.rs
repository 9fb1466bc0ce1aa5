//! Simulated annealing over the local-search neighborhoods.
//!
//! A single-solution trajectory method: worsening moves are accepted with
//! a probability that shrinks as the temperature cools, so the search can
//! leave local optima that the greedy driver would stop in.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Eglese (1994), "Routeing winter gritting vehicles", *Discrete Applied
//!   Mathematics* 48(3), 231-244 (annealing applied to arc routing)

mod annealing;
mod config;

pub use annealing::{AnnealingResult, AnnealingRunner};
pub use config::{AnnealingConfig, MoveSelection};
