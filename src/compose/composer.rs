use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::emit::style::Palette;
use crate::foundation::core::{Canvas, Span, round_time};
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::builder::SceneBuilder;
use crate::scene::model::{Action, ActionKind, ObjectKind, Scene, VisualObject};

/// Options of [`compose`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOpts {
    /// Id of the composed scene.
    pub scene_id: String,
    /// Fade-in length for objects that are visible at a scene's start.
    pub fade_in: f64,
    /// Fade-out length of the cleanup at the end of each scene.
    pub cleanup: f64,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            scene_id: "course".to_owned(),
            fade_in: 0.3,
            cleanup: 0.3,
        }
    }
}

impl ComposeOpts {
    pub fn validate(&self) -> SceneResult<()> {
        if self.scene_id.trim().is_empty() {
            return Err(SceneError::validation("composed scene id must be non-empty"));
        }
        for (name, v) in [("fade_in", self.fade_in), ("cleanup", self.cleanup)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SceneError::timing(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }
        Ok(())
    }
}

/// Concatenate `scenes` (after the optional `intro`) into one timeline.
///
/// Each scene's ids get a unique prefix (`intro_`, `s0_`, `s1_`, ...), its actions are shifted
/// by the total duration of the scenes before it, and every object fades out when its scene
/// ends. Objects visible at a scene's start are created hidden and faded in instead. Scenes are
/// composed strictly in order.
#[tracing::instrument(skip_all, fields(scenes = scenes.len(), intro = intro.is_some()))]
pub fn compose(scenes: &[Scene], intro: Option<&Scene>, opts: &ComposeOpts) -> SceneResult<Scene> {
    opts.validate()?;

    let parts: Vec<(String, &Scene)> = intro
        .map(|s| ("intro_".to_owned(), s))
        .into_iter()
        .chain(
            scenes
                .iter()
                .enumerate()
                .map(|(i, s)| (format!("s{i}_"), s)),
        )
        .collect();

    let canvas = parts
        .first()
        .map(|(_, s)| s.canvas())
        .unwrap_or_default();
    let mut builder = SceneBuilder::new(opts.scene_id.as_str(), canvas);
    let mut code = Vec::new();
    let mut offset = 0.0;

    for (prefix, scene) in &parts {
        scene.validate()?;
        if scene.canvas() != canvas {
            return Err(SceneError::validation(format!(
                "scene '{}' is {}x{}, expected {}x{}",
                scene.scene_id, scene.width, scene.height, canvas.width, canvas.height
            )));
        }
        append(&mut builder, prefix, scene, offset, opts)?;
        if !scene.code.is_empty() {
            code.push(format!("# {}\n{}", scene.scene_id, scene.code));
        }
        offset = round_time(offset + scene.duration);
    }

    let composed = builder.code(code.join("\n\n")).duration(offset).build()?;
    tracing::debug!(
        objects = composed.objects.len(),
        actions = composed.actions.len(),
        duration = composed.duration,
        "scenes composed"
    );
    Ok(composed)
}

fn append(
    builder: &mut SceneBuilder,
    prefix: &str,
    scene: &Scene,
    offset: f64,
    opts: &ComposeOpts,
) -> SceneResult<()> {
    let local_ids: BTreeSet<&str> = scene.objects.iter().map(|o| o.id.as_str()).collect();
    let live = scene.duration > 0.0;

    let mut entrances = Vec::new();
    for obj in &scene.objects {
        let mut renamed = obj.clone();
        renamed.id = format!("{prefix}{}", obj.id);
        let opacity = obj.initial_opacity();
        if live && opacity > 0.0 {
            renamed.props.insert("opacity".to_owned(), Value::from(0));
            // The fade-in must end before the scene's own first opacity write.
            let first_write = scene
                .actions_for(&obj.id)
                .filter(|a| a.params.contains_key("opacity"))
                .map(|a| a.start)
                .fold(scene.duration, f64::min);
            let len = opts.fade_in.min(first_write);
            if len > 0.0 {
                let span = Span::new(round_time(offset), round_time(offset + len))?;
                entrances.push(
                    Action::new(
                        format!("{}__enter", renamed.id),
                        renamed.id.as_str(),
                        ActionKind::Fade,
                        span,
                    )
                    .param("opacity", opacity),
                );
            }
        }
        builder.push_object(renamed)?;
    }
    for action in entrances {
        builder.push_action(action)?;
    }

    for action in &scene.actions {
        let mut renamed = action.clone();
        renamed.id = format!("{prefix}{}", action.id);
        renamed.object_id = format!("{prefix}{}", action.object_id);
        renamed.start = round_time(action.start + offset);
        renamed.end = round_time(action.end + offset);
        if let Some(path) = renamed.params.get_mut("pathId") {
            let target = path.as_str().ok_or_else(|| {
                SceneError::reference(format!(
                    "action '{}' in scene '{}': pathId must be a string",
                    action.id, scene.scene_id
                ))
            })?;
            if !local_ids.contains(target) {
                return Err(SceneError::reference(format!(
                    "action '{}' in scene '{}' follows unknown path '{target}'",
                    action.id, scene.scene_id
                )));
            }
            *path = Value::String(format!("{prefix}{target}"));
        }
        builder.push_action(renamed)?;
    }

    if live {
        let end = round_time(offset + scene.duration);
        let start = round_time(end - opts.cleanup.min(scene.duration));
        let span = Span::new(start, end)?;
        for obj in &scene.objects {
            let id = format!("{prefix}{}", obj.id);
            builder.push_action(
                Action::new(format!("{id}__exit"), id.as_str(), ActionKind::Fade, span)
                    .param("opacity", 0),
            )?;
        }
    }
    Ok(())
}

/// A short intro scene with a centred title and subtitle, held for `hold` seconds.
pub fn title_card(
    title: &str,
    subtitle: &str,
    canvas: Canvas,
    palette: &Palette,
    hold: f64,
) -> SceneResult<Scene> {
    canvas.validate()?;
    if !hold.is_finite() || hold <= 0.0 {
        return Err(SceneError::timing(format!(
            "title card hold must be finite and > 0 (got {hold})"
        )));
    }
    let mid = canvas.h() * 0.5;
    let mut b = SceneBuilder::new("intro", canvas)
        .duration(hold)
        .object(
            VisualObject::new("bg", ObjectKind::Rect)
                .with("x", 0)
                .with("y", 0)
                .with("width", canvas.width)
                .with("height", canvas.height)
                .with("color", palette.background.as_str()),
        )?
        .object(
            VisualObject::new("title", ObjectKind::Text)
                .with("x", canvas.center_x())
                .with("y", mid - 20.0)
                .with("text", title)
                .with("font", "bold 36px Inter")
                .with("color", palette.title.as_str())
                .with("opacity", 0),
        )?;
    let title_in = Span::new(0.0, round_time(0.6_f64.min(hold)))?;
    b.push_action(
        Action::new("title_in", "title", ActionKind::Fade, title_in).param("opacity", 1),
    )?;

    if !subtitle.is_empty() {
        b.push_object(
            VisualObject::new("subtitle", ObjectKind::Text)
                .with("x", canvas.center_x())
                .with("y", mid + 24.0)
                .with("text", subtitle)
                .with("font", "20px Inter")
                .with("color", palette.text.as_str())
                .with("opacity", 0),
        )?;
        let sub_in = Span::new(round_time(0.3_f64.min(hold * 0.5)), round_time(0.9_f64.min(hold)))?;
        b.push_action(
            Action::new("subtitle_in", "subtitle", ActionKind::Fade, sub_in).param("opacity", 1),
        )?;
    }
    b.build()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
