//! Compiler facade: configuration, the `compile` entry point and scene fingerprints.

pub(crate) mod compiler;
pub(crate) mod config;
pub(crate) mod fingerprint;
