//! algoscene compiles algorithms into animation scenes.
//!
//! A scene is a scene graph (visual objects with initial properties) plus a list of timed
//! mutations, serialized as camelCase JSON for an external renderer. Generation is a pure
//! function of `(algorithm, input, seed, config)`:
//!
//! - a [`Stepper`] simulates the algorithm and records [`SemanticEvent`]s,
//! - the layout engine places one glyph per logical item and binds it in a [`BindingTable`],
//! - the emitter turns events into [`Action`]s on a millisecond time cursor,
//! - [`compose`] concatenates finished scenes into one master timeline.
//!
//! [`Compiler`] wires these together.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod compile;
pub(crate) mod compose;
pub(crate) mod emit;
pub(crate) mod layout;
/// Boundary scene model consumed by the renderer.
pub mod scene;
pub(crate) mod simulate;

pub use crate::foundation::core::{Canvas, Point, Span, Vec2, round_time};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::sample::SampleSource;

pub use crate::compile::compiler::{Compiler, SceneRequest};
pub use crate::compile::config::CompilerConfig;
pub use crate::compile::fingerprint::{SceneFingerprint, fingerprint_scene};
pub use crate::compose::composer::{ComposeOpts, compose, title_card};
pub use crate::emit::binding::{BindingTable, Glyph, LogicalKey, Marker};
pub use crate::emit::cursor::TimeCursor;
pub use crate::emit::emitter::{EmitOpts, EmitOutput, emit};
pub use crate::emit::narrate::{Flavor, NarrativeLevel, Narrator};
pub use crate::emit::style::{EventKind, EventStyle, Palette, TimingTable};
pub use crate::layout::shape::{DatasetShape, GraphEdge, GraphNode, GridStyle};
pub use crate::layout::solver::{Geometry, Layout, LayoutOpts, layout};
pub use crate::scene::builder::SceneBuilder;
pub use crate::scene::model::{Action, ActionKind, ObjectKind, Props, Scene, VisualObject};
pub use crate::scene::timeline::ActionLog;
pub use crate::simulate::event::{Bound, FillReason, SemanticEvent};
pub use crate::simulate::input::{AlgorithmInput, Item};
pub use crate::simulate::stepper::{
    AlgorithmKind, Stepper, StepperFactory, StepperRegistry, Trace,
};
