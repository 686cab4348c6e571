//! Shared primitives: geometry, time spans, errors and the injected random source.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod sample;
