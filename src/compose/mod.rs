//! Scene concatenation into one master timeline.

pub(crate) mod composer;
