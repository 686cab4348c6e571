use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::core::{Canvas, Span};
use crate::foundation::error::{SceneError, SceneResult};

/// Ordered string-keyed property bag (object props and action params).
pub type Props = BTreeMap<String, Value>;

/// Visual primitive understood by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Circle centered on `(x, y)`.
    Circle,
    /// Text glyph run.
    Text,
    /// Path that other objects may follow.
    Path,
    /// Bar with an embedded value label.
    Bar,
    /// Arrow between two points.
    Arrow,
    /// Line segment `(x1, y1) -> (x2, y2)`.
    Line,
    /// Shaded sphere.
    Sphere,
    /// Chart axis.
    Axis,
    /// Raster image.
    Image,
}

/// Timed mutation kind understood by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Animate `opacity`.
    Fade,
    /// Move to `to: {x, y}`.
    Translate,
    /// Animate `scale`.
    Scale,
    /// Animate `color` (and optionally swap `text`).
    Color,
    /// Animate `angle`.
    Rotate,
    /// Animate `width` / `height`.
    Resize,
    /// Follow the path object named by `pathId`.
    FollowPath,
    /// No visual change; carries a narrative.
    Wait,
}

/// A visual primitive with its initial properties.
///
/// Objects are created once at layout time and afterwards only mutated through [`Action`]s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualObject {
    /// Unique id within a scene.
    pub id: String,
    /// Primitive kind.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Initial properties.
    #[serde(default)]
    pub props: Props,
}

impl VisualObject {
    /// Create an object without properties.
    pub fn new(id: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            kind,
            props: Props::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_owned(), value.into());
        self
    }

    /// Numeric property, if present.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.props.get(key).and_then(Value::as_f64)
    }

    /// String property, if present.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Initial opacity; a missing `opacity` prop means fully visible.
    pub fn initial_opacity(&self) -> f64 {
        self.number("opacity").unwrap_or(1.0)
    }
}

/// A timed mutation of exactly one object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Unique id within a scene.
    pub id: String,
    /// Target object id.
    pub object_id: String,
    /// Mutation kind.
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Kind-specific parameters.
    #[serde(default)]
    pub params: Props,
    /// Caption shown while this action runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    /// 1-based source line highlighted while this action runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_line: Option<u32>,
}

impl Action {
    /// Create an action over `span` with no params.
    pub fn new(
        id: impl Into<String>,
        object_id: impl Into<String>,
        kind: ActionKind,
        span: Span,
    ) -> Self {
        Self {
            id: id.into(),
            object_id: object_id.into(),
            kind,
            start: span.start,
            end: span.end,
            params: Props::new(),
            narrative: None,
            code_line: None,
        }
    }

    /// Builder-style param setter.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_owned(), value.into());
        self
    }

    /// Validated time span of this action.
    pub fn span(&self) -> SceneResult<Span> {
        Span::new(self.start, self.end)
            .map_err(|e| SceneError::timing(format!("action '{}': {e}", self.id)))
    }
}

/// One self-contained timed animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene identifier.
    pub scene_id: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Total duration in seconds.
    pub duration: f64,
    /// Source code shown next to the animation.
    pub code: String,
    /// Scene graph.
    pub objects: Vec<VisualObject>,
    /// Timeline.
    pub actions: Vec<Action>,
}

impl Scene {
    /// An empty, valid scene. Returned for empty datasets instead of simulating.
    pub fn no_op(scene_id: impl Into<String>, canvas: Canvas, code: impl Into<String>) -> Self {
        Self {
            scene_id: scene_id.into(),
            width: canvas.width,
            height: canvas.height,
            duration: 0.0,
            code: code.into(),
            objects: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        serde_json::from_reader(r).map_err(|e| SceneError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        serde_json::to_string(self).map_err(|e| SceneError::serde(format!("write scene JSON: {e}")))
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SceneError::serde(format!("write scene JSON: {e}")))
    }

    /// Canvas of this scene.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Look up an object by id.
    pub fn object(&self, id: &str) -> Option<&VisualObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Latest action end, or 0 for an empty timeline.
    pub fn max_action_end(&self) -> f64 {
        self.actions.iter().map(|a| a.end).fold(0.0, f64::max)
    }

    /// Actions targeting `object_id`, in timeline order.
    pub fn actions_for<'a>(&'a self, object_id: &'a str) -> impl Iterator<Item = &'a Action> + 'a {
        self.actions.iter().filter(move |a| a.object_id == object_id)
    }

    /// Check every structural and timing invariant of a scene.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SceneError::timing(format!(
                "scene '{}' duration must be finite and >= 0",
                self.scene_id
            )));
        }

        let mut object_ids = BTreeSet::new();
        for obj in &self.objects {
            if obj.id.trim().is_empty() {
                return Err(SceneError::validation("object id must be non-empty"));
            }
            if !object_ids.insert(obj.id.as_str()) {
                return Err(SceneError::validation(format!(
                    "duplicate object id '{}'",
                    obj.id
                )));
            }
        }

        let mut action_ids = BTreeSet::new();
        let mut writers: BTreeMap<(&str, &str), Vec<Span>> = BTreeMap::new();
        for action in &self.actions {
            if !action_ids.insert(action.id.as_str()) {
                return Err(SceneError::validation(format!(
                    "duplicate action id '{}'",
                    action.id
                )));
            }
            if !object_ids.contains(action.object_id.as_str()) {
                return Err(SceneError::validation(format!(
                    "action '{}' targets unknown object '{}'",
                    action.id, action.object_id
                )));
            }
            let span = action.span()?;
            if span.end > self.duration + 1e-9 {
                return Err(SceneError::timing(format!(
                    "action '{}' ends at {} after scene duration {}",
                    action.id, span.end, self.duration
                )));
            }
            for key in action.params.keys() {
                writers
                    .entry((action.object_id.as_str(), key.as_str()))
                    .or_default()
                    .push(span);
            }
        }

        for ((object_id, key), spans) in &mut writers {
            spans.sort_by(|a, b| a.start.total_cmp(&b.start));
            let mut reach = f64::NEG_INFINITY;
            for span in spans.iter() {
                if span.start < reach {
                    return Err(SceneError::validation(format!(
                        "object '{object_id}' has overlapping writes to '{key}' at {}",
                        span.start
                    )));
                }
                reach = reach.max(span.end);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
