//! This crate implements the bin lorry that drives across a collection calendar.
//! It visits every collection day marker in turn, pauses there and returns to its depot.
//!
//! The calendar itself is rendered elsewhere; this crate only sees it through the [`stage::Stage`] trait.

pub mod day;
pub mod delay;
pub mod easing;
pub mod error;
pub mod grid;
pub mod sequencer;
pub mod simulation;
pub mod stage;
