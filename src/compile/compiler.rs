use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compile::config::CompilerConfig;
use crate::compose::composer::{ComposeOpts, compose, title_card};
use crate::emit::emitter::emit;
use crate::emit::narrate::Narrator;
use crate::foundation::error::SceneResult;
use crate::foundation::sample::SampleSource;
use crate::layout::shape::{DatasetShape, GridStyle};
use crate::layout::solver::{LayoutOpts, layout};
use crate::scene::builder::SceneBuilder;
use crate::scene::model::Scene;
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, StepperRegistry, Trace};

/// One scene to generate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRequest {
    pub kind: AlgorithmKind,
    /// Explicit input; sampled from `seed` when absent.
    #[serde(default)]
    pub input: Option<AlgorithmInput>,
    #[serde(default)]
    pub seed: u64,
    /// Defaults to the algorithm key.
    #[serde(default)]
    pub scene_id: Option<String>,
}

impl SceneRequest {
    pub fn new(kind: AlgorithmKind) -> Self {
        Self {
            kind,
            input: None,
            seed: 0,
            scene_id: None,
        }
    }

    pub fn with_input(mut self, input: AlgorithmInput) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_scene_id(mut self, scene_id: impl Into<String>) -> Self {
        self.scene_id = Some(scene_id.into());
        self
    }
}

/// Algorithm-to-timeline compiler: registry plus configuration.
///
/// Compilation is a pure function of the request and the config, so the same request always
/// yields byte-identical JSON.
#[derive(Clone, Debug)]
pub struct Compiler {
    registry: StepperRegistry,
    config: CompilerConfig,
}

impl Compiler {
    /// Compiler over the built-in algorithm families.
    pub fn new(config: CompilerConfig) -> SceneResult<Self> {
        Self::with_registry(StepperRegistry::global().clone(), config)
    }

    pub fn with_registry(registry: StepperRegistry, config: CompilerConfig) -> SceneResult<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn registry(&self) -> &StepperRegistry {
        &self.registry
    }

    /// Simulate `request` and emit its scene.
    ///
    /// Empty or degenerate inputs produce an empty but valid scene.
    #[tracing::instrument(skip(self), fields(kind = %request.kind, seed = request.seed))]
    pub fn compile(&self, request: &SceneRequest) -> SceneResult<Scene> {
        let cfg = &self.config;
        let kind = request.kind;
        let scene_id = request
            .scene_id
            .clone()
            .unwrap_or_else(|| kind.key().to_owned());
        let input = match &request.input {
            Some(input) => input.clone(),
            None => AlgorithmInput::sample(kind, &mut SampleSource::new(request.seed), cfg.level),
        };

        let stepper = match self.registry.resolve(kind, &input) {
            Ok(stepper) => stepper,
            Err(e) if e.is_shape() => {
                tracing::debug!(error = %e, "degenerate input, emitting empty scene");
                return Ok(Scene::no_op(scene_id, cfg.canvas, ""));
            }
            Err(e) => return Err(e),
        };
        let code = stepper.source(cfg.level);
        let shape = stepper.shape();
        let title = stepper.title();
        let laid_out = layout(
            &shape,
            &LayoutOpts {
                canvas: cfg.canvas,
                palette: &cfg.palette,
                title: &title,
            },
        )?;
        if laid_out.is_empty() {
            return Ok(Scene::no_op(scene_id, cfg.canvas, code));
        }

        let mut trace = Trace::new(cfg.max_events);
        stepper.simulate(&mut trace)?;
        tracing::debug!(events = trace.len(), "simulated");

        let narrator = Narrator::new(cfg.level, kind.flavor(), node_labels(&shape));
        let timing = cfg.effective_timing()?;
        let out = emit(
            trace.events(),
            laid_out,
            &narrator,
            |event| stepper.code_line(event, cfg.level),
            &cfg.emit_opts(&timing),
        )?;

        let mut b = SceneBuilder::new(scene_id, cfg.canvas)
            .code(code)
            .duration(out.end);
        for obj in out.objects {
            b.push_object(obj)?;
        }
        for action in out.actions {
            b.push_action(action)?;
        }
        b.build()
    }

    /// Compile independent requests in parallel. Results keep the request order.
    pub fn compile_batch(&self, requests: &[SceneRequest]) -> Vec<SceneResult<Scene>> {
        requests.par_iter().map(|r| self.compile(r)).collect()
    }

    /// Compile `requests` and compose them, after an optional title card, into one scene.
    pub fn course(&self, title: Option<&str>, requests: &[SceneRequest]) -> SceneResult<Scene> {
        let scenes = self
            .compile_batch(requests)
            .into_iter()
            .collect::<SceneResult<Vec<_>>>()?;
        let intro = match title {
            Some(title) => Some(title_card(
                title,
                &format!("{} algorithms", scenes.len()),
                self.config.canvas,
                &self.config.palette,
                2.5,
            )?),
            None => None,
        };
        compose(&scenes, intro.as_ref(), &ComposeOpts::default())
    }
}

/// Names used for nodes in captions.
fn node_labels(shape: &DatasetShape) -> Vec<String> {
    match shape {
        DatasetShape::Graph { nodes, .. } => nodes.iter().map(|n| n.label.clone()).collect(),
        DatasetShape::Tree { keys } => keys.iter().map(i64::to_string).collect(),
        DatasetShape::Grid {
            row_labels,
            style: GridStyle::Matrix,
            ..
        } => row_labels.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
