pub(crate) mod backtrack;
pub(crate) mod distribution;
pub(crate) mod dynamic;
pub(crate) mod event;
pub(crate) mod graph;
pub(crate) mod input;
pub(crate) mod scan;
pub(crate) mod search;
pub(crate) mod sorting;
pub(crate) mod spanning;
pub(crate) mod stepper;
pub(crate) mod tree;
