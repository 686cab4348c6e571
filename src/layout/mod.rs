//! Deterministic initial placement of dataset shapes.

pub(crate) mod shape;
pub(crate) mod solver;
