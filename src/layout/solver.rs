use crate::emit::binding::{BindingTable, Glyph, LogicalKey, Marker};
use crate::emit::style::Palette;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::SceneResult;
use crate::layout::shape::{
    DatasetShape, GraphEdge, GraphNode, GridStyle, bst_in_order_ranks, bst_links,
};
use crate::scene::model::{ObjectKind, VisualObject};

const TITLE_Y: f64 = 30.0;
const STATUS_Y: f64 = 70.0;
const CONTENT_TOP: f64 = 110.0;
const MARGIN: f64 = 40.0;
/// Height kept free under the bars for the bucket row.
const BUCKET_BAND: f64 = 110.0;

/// Inputs of [`layout`] besides the dataset itself.
#[derive(Clone, Copy, Debug)]
pub struct LayoutOpts<'a> {
    pub canvas: Canvas,
    pub palette: &'a Palette,
    pub title: &'a str,
}

/// Initial scene graph for one dataset.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Objects in draw order.
    pub objects: Vec<VisualObject>,
    /// Logical keys bound to the objects above.
    pub binding: BindingTable,
    /// Geometry needed to move glyphs later.
    pub geometry: Geometry,
    /// Ids faded in before the first event, in reveal order.
    pub reveal: Vec<String>,
}

impl Layout {
    fn empty() -> Self {
        Self {
            objects: Vec::new(),
            binding: BindingTable::new(),
            geometry: Geometry::Empty,
            reveal: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up a laid-out object.
    pub fn object(&self, id: &str) -> Option<&VisualObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}

/// Shape-specific geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Empty,
    Array(ArrayGeometry),
    Nodes(NodeGeometry),
    Grid(GridGeometry),
}

/// Bar placement: slot `i` sits at `origin_x + i * pitch`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrayGeometry {
    pub origin_x: f64,
    pub pitch: f64,
    pub bar_width: f64,
    pub baseline: f64,
    pub unit: f64,
}

impl ArrayGeometry {
    /// Left edge of slot `slot`. Negative slots are valid and used by pointers running off the
    /// left end.
    pub fn bar_x(&self, slot: isize) -> f64 {
        px(self.origin_x + slot as f64 * self.pitch)
    }

    pub fn bar_height(&self, value: i64) -> f64 {
        px((value.unsigned_abs() as f64 * self.unit).max(4.0))
    }

    pub fn bar_top(&self, value: i64) -> f64 {
        px(self.baseline - self.bar_height(value))
    }

    /// Anchor of the value label above a bar.
    pub fn label_pos(&self, slot: isize, value: i64) -> Point {
        Point::new(
            px(self.bar_x(slot) + self.bar_width * 0.5),
            px(self.bar_top(value) - 10.0),
        )
    }

    /// Anchor of a search pointer under `slot`.
    pub fn pointer_pos(&self, slot: isize, marker: Marker) -> Point {
        let dy = match marker {
            Marker::Mid => 44.0,
            _ => 24.0,
        };
        Point::new(
            px(self.bar_x(slot) + self.bar_width * 0.5),
            px(self.baseline + dy),
        )
    }
}

/// Node centres indexed like the dataset's nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGeometry {
    pub positions: Vec<Point>,
    pub radius: f64,
}

impl NodeGeometry {
    pub fn position(&self, node: usize) -> Option<Point> {
        self.positions.get(node).copied()
    }
}

/// Cell `(r, c)` has its top-left corner at `origin + (c, r) * cell`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    pub origin: Point,
    pub cell: f64,
    pub rows: usize,
    pub cols: usize,
}

impl GridGeometry {
    pub fn cell_center(&self, row: usize, col: usize) -> Point {
        Point::new(
            px(self.origin.x + (col as f64 + 0.5) * self.cell),
            px(self.origin.y + (row as f64 + 0.5) * self.cell),
        )
    }
}

/// Pixel coordinates are kept to two decimals.
fn px(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Lay out `shape` on the canvas and bind every logical key to its objects.
///
/// The result is a pure function of `shape` and `opts`. An empty shape yields an empty layout.
pub fn layout(shape: &DatasetShape, opts: &LayoutOpts<'_>) -> SceneResult<Layout> {
    shape.validate()?;
    opts.canvas.validate()?;
    if shape.is_empty() {
        return Ok(Layout::empty());
    }

    let mut out = Layout::empty();
    chrome(&mut out, opts)?;
    match shape {
        DatasetShape::Array { values, pointers } => {
            array(&mut out, opts, values, *pointers, 0.0)?;
        }
        DatasetShape::Buckets { values, labels } => {
            array(&mut out, opts, values, false, BUCKET_BAND)?;
            buckets(&mut out, opts, labels)?;
        }
        DatasetShape::Tree { keys } => tree(&mut out, opts, keys)?,
        DatasetShape::Graph {
            nodes,
            edges,
            distances,
        } => graph(&mut out, opts, nodes, edges, *distances)?,
        DatasetShape::Grid {
            cells,
            row_labels,
            col_labels,
            style,
        } => grid(&mut out, opts, cells, row_labels, col_labels, *style)?,
    }
    Ok(out)
}

fn push(out: &mut Layout, obj: VisualObject, reveal: bool) {
    if reveal {
        out.reveal.push(obj.id.clone());
    }
    out.objects.push(obj);
}

fn chrome(out: &mut Layout, opts: &LayoutOpts<'_>) -> SceneResult<()> {
    let c = opts.canvas;
    let p = opts.palette;
    push(
        out,
        VisualObject::new("bg", ObjectKind::Rect)
            .with("x", 0)
            .with("y", 0)
            .with("width", c.width)
            .with("height", c.height)
            .with("color", p.background.as_str()),
        false,
    );
    push(
        out,
        VisualObject::new("title", ObjectKind::Text)
            .with("x", c.center_x())
            .with("y", TITLE_Y)
            .with("text", opts.title)
            .with("font", "bold 24px Inter")
            .with("color", p.title.as_str())
            .with("opacity", 0),
        true,
    );
    push(
        out,
        VisualObject::new("status", ObjectKind::Text)
            .with("x", c.center_x())
            .with("y", STATUS_Y)
            .with("text", "")
            .with("font", "18px monospace")
            .with("color", p.text.as_str())
            .with("opacity", 0),
        true,
    );
    out.binding
        .bind(LogicalKey::Marker(Marker::Title), Glyph::single("title"))?;
    out.binding
        .bind(LogicalKey::Marker(Marker::Status), Glyph::single("status"))?;
    Ok(())
}

fn array(
    out: &mut Layout,
    opts: &LayoutOpts<'_>,
    values: &[i64],
    pointers: bool,
    reserve: f64,
) -> SceneResult<()> {
    let c = opts.canvas;
    let n = values.len() as f64;
    let pitch = ((c.w() - 2.0 * MARGIN) / n).min(70.0);
    let bar_width = pitch * 5.0 / 7.0;
    let total = n * pitch - (pitch - bar_width);
    let baseline = c.h() - reserve - if pointers { 70.0 } else { 50.0 };
    let max_abs = values
        .iter()
        .map(|v| v.unsigned_abs())
        .max()
        .unwrap_or(1)
        .max(1) as f64;
    let unit = ((baseline - CONTENT_TOP - 20.0) / max_abs).clamp(0.0, 3.0);
    let geo = ArrayGeometry {
        origin_x: (c.w() - total) * 0.5,
        pitch,
        bar_width: px(bar_width),
        baseline,
        unit,
    };

    let font = if pitch >= 40.0 {
        "16px monospace"
    } else {
        "11px monospace"
    };
    for (i, &v) in values.iter().enumerate() {
        let slot = i as isize;
        let body = format!("bar_{i}");
        let label = format!("val_{i}");
        push(
            out,
            VisualObject::new(body.as_str(), ObjectKind::Rect)
                .with("x", geo.bar_x(slot))
                .with("y", geo.bar_top(v))
                .with("width", geo.bar_width)
                .with("height", geo.bar_height(v))
                .with("color", opts.palette.bar.as_str())
                .with("opacity", 0),
            true,
        );
        let at = geo.label_pos(slot, v);
        push(
            out,
            VisualObject::new(label.as_str(), ObjectKind::Text)
                .with("x", at.x)
                .with("y", at.y)
                .with("text", v.to_string())
                .with("font", font)
                .with("color", opts.palette.value_label.as_str())
                .with("opacity", 0),
            true,
        );
        out.binding.bind(
            LogicalKey::Slot(i),
            Glyph::labelled(body, label).with_value(v),
        )?;
    }

    if pointers {
        for (marker, id, text) in [
            (Marker::Low, "ptr_low", "L"),
            (Marker::High, "ptr_high", "H"),
            (Marker::Mid, "ptr_mid", "M"),
        ] {
            let at = geo.pointer_pos(0, marker);
            push(
                out,
                VisualObject::new(id, ObjectKind::Text)
                    .with("x", at.x)
                    .with("y", at.y)
                    .with("text", text)
                    .with("font", "bold 16px monospace")
                    .with("color", opts.palette.pointer.as_str())
                    .with("opacity", 0),
                false,
            );
            out.binding
                .bind(LogicalKey::Marker(marker), Glyph::single(id))?;
        }
    }

    out.geometry = Geometry::Array(geo);
    Ok(())
}

/// One box per bucket along the bottom edge, its count inside and its range underneath.
fn buckets(out: &mut Layout, opts: &LayoutOpts<'_>, labels: &[String]) -> SceneResult<()> {
    let c = opts.canvas;
    let n = labels.len() as f64;
    let pitch = ((c.w() - 2.0 * MARGIN) / n).min(110.0);
    let width = px(pitch * 0.8);
    let height = 36.0;
    let top = c.h() - 80.0;
    let left = (c.w() - (n * pitch - (pitch - width))) * 0.5;
    let font = if pitch >= 40.0 {
        "14px monospace"
    } else {
        "10px monospace"
    };

    for (k, text) in labels.iter().enumerate() {
        let x = px(left + k as f64 * pitch);
        let center = px(x + width * 0.5);
        let body = format!("bucket_{k}");
        let count = format!("count_{k}");
        push(
            out,
            VisualObject::new(body.as_str(), ObjectKind::Rect)
                .with("x", x)
                .with("y", px(top))
                .with("width", width)
                .with("height", height)
                .with("color", opts.palette.cell.as_str())
                .with("borderColor", opts.palette.edge.as_str())
                .with("borderWidth", 1)
                .with("opacity", 0),
            true,
        );
        push(
            out,
            VisualObject::new(count.as_str(), ObjectKind::Text)
                .with("x", center)
                .with("y", px(top + height * 0.5))
                .with("text", "0")
                .with("font", font)
                .with("color", opts.palette.text.as_str())
                .with("opacity", 0),
            true,
        );
        push(
            out,
            VisualObject::new(format!("bucket_label_{k}"), ObjectKind::Text)
                .with("x", center)
                .with("y", px(top + height + 16.0))
                .with("text", text.as_str())
                .with("font", font)
                .with("color", opts.palette.title.as_str())
                .with("opacity", 0),
            true,
        );
        out.binding.bind(
            LogicalKey::Bucket(k),
            Glyph::labelled(body, count).with_value(0),
        )?;
    }
    Ok(())
}

fn node_object(
    id: &str,
    at: Point,
    radius: f64,
    text: &str,
    opts: &LayoutOpts<'_>,
) -> VisualObject {
    VisualObject::new(id, ObjectKind::Circle)
        .with("x", px(at.x))
        .with("y", px(at.y))
        .with("radius", px(radius))
        .with("color", opts.palette.node.as_str())
        .with("borderColor", opts.palette.node_border.as_str())
        .with("borderWidth", 2)
        .with("text", text)
        .with("opacity", 0)
}

fn edge_object(id: &str, a: Point, b: Point, opts: &LayoutOpts<'_>) -> VisualObject {
    VisualObject::new(id, ObjectKind::Line)
        .with("x1", px(a.x))
        .with("y1", px(a.y))
        .with("x2", px(b.x))
        .with("y2", px(b.y))
        .with("color", opts.palette.edge.as_str())
        .with("width", 2)
        .with("opacity", 0)
}

fn tree(out: &mut Layout, opts: &LayoutOpts<'_>, keys: &[i64]) -> SceneResult<()> {
    let c = opts.canvas;
    let links = bst_links(keys);
    let ranks = bst_in_order_ranks(keys);
    let n = keys.len() as f64;
    let pitch = (c.w() - 2.0 * MARGIN) / n;
    let max_depth = links.iter().map(|l| l.depth).max().unwrap_or(0).max(1) as f64;
    let row_gap = ((c.h() - 40.0 - (CONTENT_TOP + 20.0)) / max_depth).min(80.0);
    let radius = (pitch * 0.4).clamp(8.0, 22.0);

    let positions: Vec<Point> = links
        .iter()
        .zip(&ranks)
        .map(|(link, &rank)| {
            Point::new(
                px(MARGIN + (rank as f64 + 0.5) * pitch),
                px(CONTENT_TOP + 20.0 + link.depth as f64 * row_gap),
            )
        })
        .collect();

    // Edges are drawn first so nodes cover their ends.
    for (child, link) in links.iter().enumerate() {
        let Some(parent) = link.parent else {
            continue;
        };
        let id = format!("edge_{parent}_{child}");
        push(
            out,
            edge_object(&id, positions[parent], positions[child], opts),
            false,
        );
        out.binding
            .bind(LogicalKey::Edge(parent, child), Glyph::single(id))?;
    }
    for (i, &key) in keys.iter().enumerate() {
        let id = format!("node_{i}");
        push(
            out,
            node_object(&id, positions[i], radius, &key.to_string(), opts),
            false,
        );
        out.binding
            .bind(LogicalKey::Node(i), Glyph::single(id).with_value(key))?;
    }

    out.geometry = Geometry::Nodes(NodeGeometry { positions, radius });
    Ok(())
}

fn graph(
    out: &mut Layout,
    opts: &LayoutOpts<'_>,
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    distances: bool,
) -> SceneResult<()> {
    let c = opts.canvas;
    let positions: Vec<Point> = if nodes.iter().all(|n| n.pos.is_some()) {
        nodes
            .iter()
            .filter_map(|n| n.pos)
            .map(|p| Point::new(px(p.x), px(p.y)))
            .collect()
    } else {
        let center = Point::new(c.center_x(), (c.h() + CONTENT_TOP) * 0.5);
        let r = ((c.h() - CONTENT_TOP) * 0.5 - 50.0).min(c.w() * 0.5 - 60.0).max(20.0);
        let n = nodes.len() as f64;
        (0..nodes.len())
            .map(|i| {
                let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::TAU / n;
                Point::new(
                    px(center.x + r * angle.cos()),
                    px(center.y + r * angle.sin()),
                )
            })
            .collect()
    };
    let radius = 25.0;

    for e in edges {
        let (a, b) = (positions[e.from], positions[e.to]);
        let id = format!("edge_{}_{}", e.from, e.to);
        push(out, edge_object(&id, a, b, opts), true);
        let glyph = match e.weight {
            Some(w) => {
                let wid = format!("weight_{}_{}", e.from, e.to);
                let mid = a.midpoint(b);
                push(
                    out,
                    VisualObject::new(wid.as_str(), ObjectKind::Text)
                        .with("x", px(mid.x))
                        .with("y", px(mid.y - 10.0))
                        .with("text", w.to_string())
                        .with("font", "14px monospace")
                        .with("color", opts.palette.pointer.as_str())
                        .with("opacity", 0),
                    true,
                );
                Glyph::labelled(id, wid).with_value(w)
            }
            None => Glyph::single(id),
        };
        out.binding
            .bind(LogicalKey::Edge(e.from, e.to), glyph)?;
    }

    for (i, node) in nodes.iter().enumerate() {
        let id = format!("node_{i}");
        push(out, node_object(&id, positions[i], radius, &node.label, opts), true);
        let glyph = if distances {
            let did = format!("dist_{i}");
            push(
                out,
                VisualObject::new(did.as_str(), ObjectKind::Text)
                    .with("x", positions[i].x)
                    .with("y", px(positions[i].y + radius + 18.0))
                    .with("text", "∞")
                    .with("font", "14px monospace")
                    .with("color", opts.palette.text.as_str())
                    .with("opacity", 0),
                true,
            );
            Glyph::labelled(id, did)
        } else {
            Glyph::single(id)
        };
        out.binding.bind(LogicalKey::Node(i), glyph)?;
    }

    out.geometry = Geometry::Nodes(NodeGeometry { positions, radius });
    Ok(())
}

/// Text shown for a grid value.
pub fn cell_text(value: Option<i64>, style: GridStyle) -> String {
    match (value, style) {
        (Some(v), _) => v.to_string(),
        (None, GridStyle::Matrix) => "∞".to_owned(),
        (None, _) => String::new(),
    }
}

fn grid(
    out: &mut Layout,
    opts: &LayoutOpts<'_>,
    cells: &[Vec<Option<i64>>],
    row_labels: &[String],
    col_labels: &[String],
    style: GridStyle,
) -> SceneResult<()> {
    let c = opts.canvas;
    let rows = cells.len();
    let cols = cells.first().map_or(0, Vec::len);
    let top = CONTENT_TOP + if col_labels.is_empty() { 10.0 } else { 35.0 };
    let side = if row_labels.is_empty() { MARGIN } else { 80.0 };
    let avail_w = c.w() - 2.0 * side;
    let avail_h = c.h() - top - 20.0;
    let cell = (avail_w / cols as f64)
        .min(avail_h / rows as f64)
        .min(60.0)
        .floor()
        .max(8.0);
    let geo = GridGeometry {
        origin: Point::new(px((c.w() - cols as f64 * cell) * 0.5), top),
        cell,
        rows,
        cols,
    };
    let font = format!("{}px Inter", (cell * 0.3).clamp(9.0, 16.0).round());

    for (r, row) in cells.iter().enumerate() {
        for (col, &value) in row.iter().enumerate() {
            let body = format!("cell_{r}_{col}");
            let label = format!("val_{r}_{col}");
            let fill = if style == GridStyle::Board && (r + col) % 2 == 1 {
                opts.palette.cell_alt.as_str()
            } else {
                opts.palette.cell.as_str()
            };
            push(
                out,
                VisualObject::new(body.as_str(), ObjectKind::Rect)
                    .with("x", px(geo.origin.x + col as f64 * cell))
                    .with("y", px(geo.origin.y + r as f64 * cell))
                    .with("width", cell)
                    .with("height", cell)
                    .with("color", fill)
                    .with("borderColor", opts.palette.edge.as_str())
                    .with("borderWidth", 1)
                    .with("opacity", 0),
                true,
            );
            let at = geo.cell_center(r, col);
            push(
                out,
                VisualObject::new(label.as_str(), ObjectKind::Text)
                    .with("x", at.x)
                    .with("y", at.y)
                    .with("text", cell_text(value, style))
                    .with("font", font.as_str())
                    .with("color", opts.palette.text.as_str())
                    .with("opacity", 0),
                true,
            );
            out.binding.bind(
                LogicalKey::Cell(r, col),
                Glyph::labelled(body, label).with_value(value),
            )?;
        }
    }

    let mid_y = px(geo.origin.y + rows as f64 * cell * 0.5);
    if style == GridStyle::Matrix {
        let size = format!("{}px Inter", (rows as f64 * cell).round());
        for (id, text, x) in [
            ("bracket_l", "[", geo.origin.x - 12.0),
            ("bracket_r", "]", geo.origin.x + cols as f64 * cell + 12.0),
        ] {
            push(
                out,
                VisualObject::new(id, ObjectKind::Text)
                    .with("x", px(x))
                    .with("y", mid_y)
                    .with("text", text)
                    .with("font", size.as_str())
                    .with("color", opts.palette.text.as_str())
                    .with("opacity", 0),
                true,
            );
        }
    }
    for (r, text) in row_labels.iter().enumerate() {
        let at = geo.cell_center(r, 0);
        push(
            out,
            VisualObject::new(format!("row_label_{r}"), ObjectKind::Text)
                .with("x", px(geo.origin.x - 30.0))
                .with("y", at.y)
                .with("text", text.as_str())
                .with("font", "bold 14px Inter")
                .with("color", opts.palette.title.as_str())
                .with("opacity", 0),
            true,
        );
    }
    for (col, text) in col_labels.iter().enumerate() {
        let at = geo.cell_center(0, col);
        push(
            out,
            VisualObject::new(format!("col_label_{col}"), ObjectKind::Text)
                .with("x", at.x)
                .with("y", px(geo.origin.y - 18.0))
                .with("text", text.as_str())
                .with("font", "bold 14px Inter")
                .with("color", opts.palette.title.as_str())
                .with("opacity", 0),
            true,
        );
    }

    out.geometry = Geometry::Grid(geo);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
