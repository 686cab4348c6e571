//! Event-to-action translation: binding table, timing, narration and the emitter itself.

pub(crate) mod binding;
pub(crate) mod cursor;
pub(crate) mod emitter;
pub(crate) mod narrate;
pub(crate) mod style;
