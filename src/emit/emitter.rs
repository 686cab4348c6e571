use std::collections::BTreeMap;

use serde_json::json;

use crate::emit::binding::{BindingTable, Glyph, LogicalKey, Marker};
use crate::emit::cursor::TimeCursor;
use crate::emit::narrate::Narrator;
use crate::emit::style::{Palette, TimingTable};
use crate::foundation::core::{Point, Span, round_time};
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::solver::{ArrayGeometry, Geometry, GridGeometry, Layout};
use crate::scene::model::{Action, ActionKind, VisualObject};
use crate::scene::timeline::ActionLog;
use crate::simulate::event::{Bound, SemanticEvent};

/// Upper bound on the spread of reveal start times, whatever the object count.
const MAX_REVEAL_SPREAD: f64 = 1.5;

const QUEEN: &str = "♛";

/// Timing and colour knobs of [`emit`].
#[derive(Clone, Copy, Debug)]
pub struct EmitOpts<'a> {
    pub timing: &'a TimingTable,
    pub palette: &'a Palette,
    /// De-highlight tail at the end of a transient highlight.
    pub reset: f64,
    /// Delay before the reveal phase.
    pub lead_in: f64,
    /// Fade-in length of each revealed object.
    pub reveal: f64,
    /// Delay between consecutive reveal fades.
    pub reveal_stagger: f64,
    /// Idle time after the last event.
    pub tail_padding: f64,
}

/// Everything needed to assemble a scene after emission.
#[derive(Clone, Debug)]
pub struct EmitOutput {
    /// Layout objects, unchanged.
    pub objects: Vec<VisualObject>,
    /// Emitted actions in emission order.
    pub actions: Vec<Action>,
    /// Binding table after the last event.
    pub binding: BindingTable,
    /// Scene end time.
    pub end: f64,
}

/// Turn `events` into timed actions over the objects of `layout`.
///
/// `code_line` maps an event to the source line it corresponds to. Every logical key an event
/// names must be bound in the layout; a missing key is a `Binding` error.
#[tracing::instrument(skip_all, fields(events = events.len(), objects = layout.objects.len()))]
pub fn emit<F>(
    events: &[SemanticEvent],
    layout: Layout,
    narrator: &Narrator,
    code_line: F,
    opts: &EmitOpts<'_>,
) -> SceneResult<EmitOutput>
where
    F: Fn(&SemanticEvent) -> Option<u32>,
{
    let Layout {
        objects,
        binding,
        geometry,
        reveal,
    } = layout;

    let mut em = Emitter::new(*opts, &objects, binding, geometry);
    em.reveal(&reveal)?;
    for event in events {
        em.event(event, narrator, code_line(event))?;
    }

    let end = round_time(em.cursor.now() + opts.tail_padding).max(em.log.last_end());
    em.binding.check_bijective()?;
    let (truncated, dropped) = em.log.resolved_overlaps();
    let actions = em.log.into_actions();
    tracing::debug!(
        actions = actions.len(),
        truncated,
        dropped,
        end,
        "timeline emitted"
    );

    Ok(EmitOutput {
        objects,
        actions,
        binding: em.binding,
        end,
    })
}

struct Emitter<'a> {
    opts: EmitOpts<'a>,
    geometry: Geometry,
    binding: BindingTable,
    /// Colour an object returns to after a transient highlight.
    resting: BTreeMap<String, String>,
    /// Colour an object was laid out with.
    base: BTreeMap<String, String>,
    /// Resting colours parked while an intermediate vertex is highlighted.
    held: BTreeMap<String, String>,
    log: ActionLog,
    cursor: TimeCursor,
    seq: usize,
    frame: Vec<Action>,
}

impl<'a> Emitter<'a> {
    fn new(
        opts: EmitOpts<'a>,
        objects: &[VisualObject],
        binding: BindingTable,
        geometry: Geometry,
    ) -> Self {
        let base: BTreeMap<String, String> = objects
            .iter()
            .filter_map(|o| o.text("color").map(|c| (o.id.clone(), c.to_owned())))
            .collect();
        Self {
            opts,
            geometry,
            binding,
            resting: base.clone(),
            base,
            held: BTreeMap::new(),
            log: ActionLog::new(),
            cursor: TimeCursor::default(),
            seq: 0,
            frame: Vec::new(),
        }
    }

    fn reveal(&mut self, ids: &[String]) -> SceneResult<()> {
        self.cursor = TimeCursor::starting_at(self.opts.lead_in)?;
        if ids.is_empty() {
            return Ok(());
        }
        let step = if ids.len() > 1 {
            self.opts
                .reveal_stagger
                .min(MAX_REVEAL_SPREAD / (ids.len() - 1) as f64)
        } else {
            0.0
        };
        let mut last = self.cursor.now();
        for (i, id) in ids.iter().enumerate() {
            let start = round_time(self.opts.lead_in + i as f64 * step);
            let span = Span::new(start, round_time(start + self.opts.reveal))?;
            last = last.max(span.end);
            let action = Action::new(self.next_id("reveal"), id.as_str(), ActionKind::Fade, span)
                .param("opacity", 1);
            self.log.push(action)?;
        }
        self.cursor = TimeCursor::starting_at(last)?;
        Ok(())
    }

    fn event(
        &mut self,
        event: &SemanticEvent,
        narrator: &Narrator,
        code_line: Option<u32>,
    ) -> SceneResult<()> {
        let kind = event.kind();
        let duration = self.opts.timing.duration(kind);
        let span = self.cursor.window(duration)?;
        let tag = kind.key();
        let hue = self.opts.timing.color(kind).to_owned();
        let palette = self.opts.palette;

        match *event {
            SemanticEvent::Pass { .. }
            | SemanticEvent::NotFound { .. }
            | SemanticEvent::Finish => {}
            SemanticEvent::Compare { i, j, .. } => {
                self.flash_key(tag, LogicalKey::Slot(i), &hue, span)?;
                if j != i {
                    self.flash_key(tag, LogicalKey::Slot(j), &hue, span)?;
                }
            }
            SemanticEvent::Swap { i, j, left, right } => {
                self.swap(tag, i, j, left, right, &hue, span)?;
            }
            SemanticEvent::SetMin { index, .. } | SemanticEvent::SetPivot { index, .. } => {
                let body = self.body(LogicalKey::Slot(index))?;
                self.mark(tag, &body, &hue, span)?;
            }
            SemanticEvent::ClearMin { index } => {
                let body = self.body(LogicalKey::Slot(index))?;
                let base = self.base_of(&body);
                self.mark(tag, &body, &base, span)?;
            }
            SemanticEvent::Split { low, high, .. } => {
                for slot in low..=high {
                    self.flash_key(tag, LogicalKey::Slot(slot), &hue, span)?;
                }
            }
            SemanticEvent::Assign { index, value, .. } => {
                self.assign(tag, index, value, &hue, span)?;
            }
            SemanticEvent::MarkSorted { index } => {
                let body = self.body(LogicalKey::Slot(index))?;
                self.mark(tag, &body, &palette.sorted, span)?;
            }
            SemanticEvent::Probe { mid, .. } => {
                self.move_pointer(tag, Marker::Mid, mid as isize, span)?;
                self.flash_key(tag, LogicalKey::Slot(mid), &hue, span)?;
            }
            SemanticEvent::Discard { from, to } => {
                for slot in from..=to {
                    let body = self.body(LogicalKey::Slot(slot))?;
                    self.mark(tag, &body, &palette.discarded, span)?;
                }
            }
            SemanticEvent::MoveBound { bound, index } => {
                let marker = match bound {
                    Bound::Low => Marker::Low,
                    Bound::High => Marker::High,
                };
                self.move_pointer(tag, marker, index, span)?;
            }
            SemanticEvent::Found { index, .. } => {
                let body = self.body(LogicalKey::Slot(index))?;
                self.mark(tag, &body, &hue, span)?;
            }
            SemanticEvent::Visit { node, from, .. } => {
                let body = self.body(LogicalKey::Node(node))?;
                self.mark(tag, &body, &palette.visited, span)?;
                if let Some(from) = from {
                    let edge = self.edge(from, node)?.body;
                    self.mark(tag, &edge, &palette.edge_active, span)?;
                }
            }
            SemanticEvent::PushFrontier { node, from } => {
                let body = self.body(LogicalKey::Node(node))?;
                if self.resting_of(&body) == palette.visited {
                    self.flash(tag, &body, &hue, span)?;
                } else {
                    self.mark(tag, &body, &hue, span)?;
                }
                if let Some(from) = from {
                    let edge = self.edge(from, node)?.body;
                    self.flash(tag, &edge, &hue, span)?;
                }
            }
            SemanticEvent::SetDistance { node, distance } => {
                let glyph = self.glyph(LogicalKey::Node(node))?;
                if let Some(label) = &glyph.label {
                    self.set_text(tag, label, &distance.to_string(), span);
                }
                self.flash(tag, &glyph.body, &hue, span)?;
            }
            SemanticEvent::RelaxEdge { from, to, .. } => {
                let edge = self.edge(from, to)?.body;
                self.flash(tag, &edge, &hue, span)?;
            }
            SemanticEvent::NegativeCycle { from, to } => {
                let edge = self.edge(from, to)?.body;
                self.mark(tag, &edge, &hue, span)?;
            }
            SemanticEvent::ConsiderVia { k } => {
                for key in self.cross(k)? {
                    let body = self.body(key)?;
                    let parked = self.resting_of(&body);
                    self.held.insert(body.clone(), parked);
                    self.mark(tag, &body, &hue, span)?;
                }
            }
            SemanticEvent::ReleaseVia { k } => {
                for key in self.cross(k)? {
                    let body = self.body(key)?;
                    let restored = self
                        .held
                        .remove(&body)
                        .unwrap_or_else(|| self.base_of(&body));
                    self.mark(tag, &body, &restored, span)?;
                }
            }
            SemanticEvent::ProbeCell { row, col }
            | SemanticEvent::TryCell { row, col }
            | SemanticEvent::RejectCell { row, col } => {
                self.flash_key(tag, LogicalKey::Cell(row, col), &hue, span)?;
            }
            SemanticEvent::FillCell {
                row, col, value, ..
            } => {
                let key = LogicalKey::Cell(row, col);
                let glyph = self.glyph(key)?;
                if let Some(label) = &glyph.label {
                    self.set_text(tag, label, &value.to_string(), span);
                }
                self.resting.insert(glyph.body.clone(), palette.filled.clone());
                self.flash(tag, &glyph.body, &hue, span)?;
                self.binding.get_mut(key)?.value = Some(value);
            }
            SemanticEvent::PlaceQueen { row, col } => {
                let key = LogicalKey::Cell(row, col);
                let glyph = self.glyph(key)?;
                if let Some(label) = &glyph.label {
                    self.set_text(tag, label, QUEEN, span);
                }
                self.mark(tag, &glyph.body, &hue, span)?;
                self.binding.get_mut(key)?.value = Some(1);
            }
            SemanticEvent::RemoveQueen { row, col } => {
                let key = LogicalKey::Cell(row, col);
                let glyph = self.glyph(key)?;
                if let Some(label) = &glyph.label {
                    self.set_text(tag, label, "", span);
                }
                let base = self.base_of(&glyph.body);
                self.mark(tag, &glyph.body, &base, span)?;
                self.binding.get_mut(key)?.value = None;
            }
            SemanticEvent::Descend { node, .. } => {
                self.flash_key(tag, LogicalKey::Node(node), &hue, span)?;
            }
            SemanticEvent::InsertNode { node, parent, .. } => {
                let body = self.body(LogicalKey::Node(node))?;
                self.fade_in(tag, &body, span);
                self.flash(tag, &body, &hue, span)?;
                if let Some(parent) = parent {
                    let edge = self.edge(parent, node)?.body;
                    self.fade_in(tag, &edge, span);
                }
            }
            SemanticEvent::ConsiderEdge { from, to, .. } => {
                let edge = self.edge(from, to)?.body;
                self.flash(tag, &edge, &hue, span)?;
            }
            SemanticEvent::AcceptEdge { from, to, .. } => {
                let edge = self.edge(from, to)?.body;
                self.mark(tag, &edge, &palette.edge_active, span)?;
                for node in [from, to] {
                    let body = self.body(LogicalKey::Node(node))?;
                    self.mark(tag, &body, &palette.visited, span)?;
                }
            }
            SemanticEvent::RejectEdge { from, to, .. } => {
                let edge = self.edge(from, to)?.body;
                self.mark(tag, &edge, &palette.discarded, span)?;
            }
            SemanticEvent::ScanStep { index, .. } => {
                self.flash_key(tag, LogicalKey::Slot(index), &hue, span)?;
            }
            SemanticEvent::NewBest { from, to, .. } => {
                for slot in from..=to {
                    self.flash_key(tag, LogicalKey::Slot(slot), &hue, span)?;
                }
            }
            SemanticEvent::BestRange { from, to, .. } => {
                for slot in from..=to {
                    let body = self.body(LogicalKey::Slot(slot))?;
                    self.mark(tag, &body, &palette.sorted, span)?;
                }
            }
            SemanticEvent::Tally {
                index,
                bucket,
                count,
                ..
            } => {
                self.flash_key(tag, LogicalKey::Slot(index), &hue, span)?;
                self.set_bucket(tag, bucket, count, &hue, span)?;
            }
            SemanticEvent::SortBucket { bucket, .. } => {
                self.flash_key(tag, LogicalKey::Bucket(bucket), &hue, span)?;
            }
            SemanticEvent::Gather {
                bucket,
                index,
                value,
                remaining,
                ..
            } => {
                self.set_bucket(tag, bucket, remaining, &hue, span)?;
                let body = self.body(LogicalKey::Slot(index))?;
                self.resting.insert(body, palette.sorted.clone());
                self.assign(tag, index, value, &hue, span)?;
            }
        }

        if let Some(status) = narrator.status(event) {
            let target = self.body(LogicalKey::Marker(Marker::Status))?;
            self.set_text(tag, &target, &status, span);
        }
        self.commit(tag, span, narrator.narrative(event), code_line)?;
        self.cursor.advance(duration)?;
        Ok(())
    }

    /// Move the staged actions of one event into the log, attaching its caption.
    fn commit(
        &mut self,
        tag: &str,
        span: Span,
        narrative: Option<String>,
        code_line: Option<u32>,
    ) -> SceneResult<()> {
        let mut frame = std::mem::take(&mut self.frame);
        if frame.is_empty() {
            if narrative.is_none() && code_line.is_none() {
                return Ok(());
            }
            let status = self.body(LogicalKey::Marker(Marker::Status))?;
            frame.push(Action::new(
                self.next_id(tag),
                status,
                ActionKind::Wait,
                span,
            ));
        }

        let mut first = 0;
        for (idx, action) in frame.iter().enumerate() {
            if action.start < frame[first].start {
                first = idx;
            }
        }
        frame[first].narrative = narrative;
        frame[first].code_line = code_line;

        for action in frame {
            self.log.push(action)?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn swap(
        &mut self,
        tag: &str,
        i: usize,
        j: usize,
        left: i64,
        right: i64,
        hue: &str,
        span: Span,
    ) -> SceneResult<()> {
        if i == j {
            return Ok(());
        }
        let geo = self.array()?;
        let a = self.glyph(LogicalKey::Slot(i))?;
        let b = self.glyph(LogicalKey::Slot(j))?;
        for (glyph, to, value) in [(&a, j, left), (&b, i, right)] {
            let slot = to as isize;
            let top = Point::new(geo.bar_x(slot), geo.bar_top(value));
            self.translate(tag, &glyph.body, top, span);
            if let Some(label) = &glyph.label {
                self.translate(tag, label, geo.label_pos(slot, value), span);
            }
            self.flash(tag, &glyph.body, hue, span)?;
        }
        self.binding.swap(LogicalKey::Slot(i), LogicalKey::Slot(j))
    }

    fn assign(
        &mut self,
        tag: &str,
        index: usize,
        value: i64,
        hue: &str,
        span: Span,
    ) -> SceneResult<()> {
        let geo = self.array()?;
        let key = LogicalKey::Slot(index);
        let glyph = self.glyph(key)?;
        let slot = index as isize;

        let resize = Action::new(self.next_id(tag), glyph.body.as_str(), ActionKind::Resize, span)
            .param("height", geo.bar_height(value));
        self.frame.push(resize);
        self.translate(
            tag,
            &glyph.body,
            Point::new(geo.bar_x(slot), geo.bar_top(value)),
            span,
        );
        self.flash(tag, &glyph.body, hue, span)?;
        if let Some(label) = &glyph.label {
            self.translate(tag, label, geo.label_pos(slot, value), span);
            self.set_text(tag, label, &value.to_string(), span);
        }
        self.binding.get_mut(key)?.value = Some(value);
        Ok(())
    }

    /// Show `count` in a bucket and flash it.
    fn set_bucket(
        &mut self,
        tag: &str,
        bucket: usize,
        count: usize,
        hue: &str,
        span: Span,
    ) -> SceneResult<()> {
        let key = LogicalKey::Bucket(bucket);
        let glyph = self.glyph(key)?;
        if let Some(label) = &glyph.label {
            self.set_text(tag, label, &count.to_string(), span);
        }
        self.flash(tag, &glyph.body, hue, span)?;
        self.binding.get_mut(key)?.value = Some(count as i64);
        Ok(())
    }

    fn move_pointer(
        &mut self,
        tag: &str,
        marker: Marker,
        slot: isize,
        span: Span,
    ) -> SceneResult<()> {
        let geo = self.array()?;
        let body = self.body(LogicalKey::Marker(marker))?;
        self.translate(tag, &body, geo.pointer_pos(slot, marker), span);
        self.fade_in(tag, &body, span);
        Ok(())
    }

    /// Cells in row `k` and column `k` of the grid.
    fn cross(&self, k: usize) -> SceneResult<Vec<LogicalKey>> {
        let geo = self.grid()?;
        if k >= geo.rows || k >= geo.cols {
            return Err(SceneError::binding(format!(
                "vertex {k} is outside the {}x{} matrix",
                geo.rows, geo.cols
            )));
        }
        let row = (0..geo.cols).map(|c| LogicalKey::Cell(k, c));
        let col = (0..geo.rows)
            .filter(|&r| r != k)
            .map(|r| LogicalKey::Cell(r, k));
        Ok(row.chain(col).collect())
    }

    fn glyph(&self, key: LogicalKey) -> SceneResult<Glyph> {
        self.binding.get(key).cloned()
    }

    fn body(&self, key: LogicalKey) -> SceneResult<String> {
        Ok(self.binding.get(key)?.body.clone())
    }

    /// Edges are looked up in either direction.
    fn edge(&self, u: usize, v: usize) -> SceneResult<Glyph> {
        match self.binding.get(LogicalKey::Edge(u, v)) {
            Ok(glyph) => Ok(glyph.clone()),
            Err(_) => self.binding.get(LogicalKey::Edge(v, u)).cloned(),
        }
    }

    fn array(&self) -> SceneResult<ArrayGeometry> {
        match &self.geometry {
            Geometry::Array(geo) => Ok(*geo),
            _ => Err(SceneError::binding("event needs an array layout")),
        }
    }

    fn grid(&self) -> SceneResult<GridGeometry> {
        match &self.geometry {
            Geometry::Grid(geo) => Ok(*geo),
            _ => Err(SceneError::binding("event needs a grid layout")),
        }
    }

    fn resting_of(&self, object: &str) -> String {
        self.resting
            .get(object)
            .cloned()
            .unwrap_or_else(|| self.opts.palette.text.clone())
    }

    fn base_of(&self, object: &str) -> String {
        self.base
            .get(object)
            .cloned()
            .unwrap_or_else(|| self.opts.palette.text.clone())
    }

    fn next_id(&mut self, tag: &str) -> String {
        self.seq += 1;
        format!("{tag}_{}", self.seq)
    }

    fn color(&mut self, tag: &str, object: &str, color: &str, span: Span) {
        let action =
            Action::new(self.next_id(tag), object, ActionKind::Color, span).param("color", color);
        self.frame.push(action);
    }

    /// Transient highlight: `color` for most of the window, back to the resting colour for the
    /// last `reset` seconds.
    fn flash(&mut self, tag: &str, object: &str, color: &str, span: Span) -> SceneResult<()> {
        let rest = self.resting_of(object);
        let tail = self.opts.reset.min(span.len() * 0.5);
        let split = round_time(span.end - tail);
        if split > span.start && split < span.end {
            self.color(tag, object, color, Span::new(span.start, split)?);
            self.color(tag, object, &rest, Span::new(split, span.end)?);
        } else {
            self.color(tag, object, &rest, span);
        }
        Ok(())
    }

    fn flash_key(&mut self, tag: &str, key: LogicalKey, color: &str, span: Span) -> SceneResult<()> {
        let body = self.body(key)?;
        self.flash(tag, &body, color, span)
    }

    /// Permanent mark: the new colour becomes the resting colour.
    fn mark(&mut self, tag: &str, object: &str, color: &str, span: Span) -> SceneResult<()> {
        self.resting.insert(object.to_owned(), color.to_owned());
        self.color(tag, object, color, span);
        Ok(())
    }

    fn fade_in(&mut self, tag: &str, object: &str, span: Span) {
        let action =
            Action::new(self.next_id(tag), object, ActionKind::Fade, span).param("opacity", 1);
        self.frame.push(action);
    }

    fn set_text(&mut self, tag: &str, object: &str, text: &str, span: Span) {
        let action = Action::new(self.next_id(tag), object, ActionKind::Fade, span)
            .param("opacity", 1)
            .param("text", text);
        self.frame.push(action);
    }

    fn translate(&mut self, tag: &str, object: &str, to: Point, span: Span) {
        let action = Action::new(self.next_id(tag), object, ActionKind::Translate, span)
            .param("to", json!({ "x": to.x, "y": to.y }));
        self.frame.push(action);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/emitter.rs"]
mod tests;
