//! Scene graph boundary model consumed by the external renderer.

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod timeline;
