use std::collections::BTreeSet;

use crate::foundation::core::{Canvas, round_time};
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::model::{Action, Scene, VisualObject};
use crate::scene::timeline::ActionLog;

/// Builder for [`Scene`](crate::Scene).
///
/// Actions go through an [`ActionLog`], so overlapping writes to the same property are
/// resolved as they are added.
pub struct SceneBuilder {
    scene_id: String,
    canvas: Canvas,
    code: String,
    duration: Option<f64>,
    object_ids: BTreeSet<String>,
    objects: Vec<VisualObject>,
    log: ActionLog,
}

impl SceneBuilder {
    /// Create a builder for a new scene.
    pub fn new(scene_id: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            scene_id: scene_id.into(),
            canvas,
            code: String::new(),
            duration: None,
            object_ids: BTreeSet::new(),
            objects: Vec::new(),
            log: ActionLog::new(),
        }
    }

    /// Set the source code shown alongside the scene.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set an explicit duration. Defaults to the latest action end.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(round_time(duration));
        self
    }

    /// Insert an object under a unique id.
    pub fn object(mut self, object: VisualObject) -> SceneResult<Self> {
        self.push_object(object)?;
        Ok(self)
    }

    /// Append an action.
    pub fn action(mut self, action: Action) -> SceneResult<Self> {
        self.push_action(action)?;
        Ok(self)
    }

    /// In-place variant of [`SceneBuilder::object`].
    pub fn push_object(&mut self, object: VisualObject) -> SceneResult<()> {
        if !self.object_ids.insert(object.id.clone()) {
            return Err(SceneError::validation(format!(
                "duplicate object id '{}'",
                object.id
            )));
        }
        self.objects.push(object);
        Ok(())
    }

    /// In-place variant of [`SceneBuilder::action`].
    pub fn push_action(&mut self, action: Action) -> SceneResult<()> {
        self.log.push(action)
    }

    /// `true` when an object with `id` was added.
    pub fn has_object(&self, id: &str) -> bool {
        self.object_ids.contains(id)
    }

    /// Latest action end so far.
    pub fn last_end(&self) -> f64 {
        self.log.last_end()
    }

    /// Build and validate the final [`Scene`](crate::Scene).
    pub fn build(self) -> SceneResult<Scene> {
        let (truncated, dropped) = self.log.resolved_overlaps();
        if truncated + dropped > 0 {
            tracing::debug!(
                scene = %self.scene_id,
                truncated,
                dropped,
                "resolved overlapping property writes"
            );
        }
        let last_end = self.log.last_end();
        let duration = self.duration.unwrap_or(last_end).max(last_end);
        let scene = Scene {
            scene_id: self.scene_id,
            width: self.canvas.width,
            height: self.canvas.height,
            duration: round_time(duration),
            code: self.code,
            objects: self.objects,
            actions: self.log.into_actions(),
        };
        scene.validate()?;
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
