//! Step definitions for owner dashboard BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
