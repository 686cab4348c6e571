use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::error::{SceneError, SceneResult};

/// Named singleton glyphs shared by every layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Marker {
    /// Scene title.
    Title,
    /// Status / caption line.
    Status,
    /// Binary search low pointer.
    Low,
    /// Binary search high pointer.
    High,
    /// Binary search mid pointer.
    Mid,
}

/// Logical position or key an algorithm talks about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicalKey {
    /// Array slot.
    Slot(usize),
    /// Graph or tree node.
    Node(usize),
    /// Directed edge `from -> to`.
    Edge(usize, usize),
    /// Matrix / table / board cell.
    Cell(usize, usize),
    /// Counting or bucket-sort bin.
    Bucket(usize),
    /// Shared glyph.
    Marker(Marker),
}

impl fmt::Display for LogicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(i) => write!(f, "slot[{i}]"),
            Self::Node(i) => write!(f, "node[{i}]"),
            Self::Edge(u, v) => write!(f, "edge[{u}->{v}]"),
            Self::Cell(r, c) => write!(f, "cell[{r}][{c}]"),
            Self::Bucket(k) => write!(f, "bucket[{k}]"),
            Self::Marker(m) => write!(f, "marker[{m:?}]"),
        }
    }
}

/// The objects currently representing one logical key.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Main shape (bar, node circle, cell rect, ...).
    pub body: String,
    /// Companion text that travels with the body.
    pub label: Option<String>,
    /// Value currently displayed, when the key carries one.
    pub value: Option<i64>,
}

impl Glyph {
    /// Glyph made of a single object.
    pub fn single(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            label: None,
            value: None,
        }
    }

    /// Glyph made of a body plus a label.
    pub fn labelled(body: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            label: Some(label.into()),
            value: None,
        }
    }

    /// Attach a displayed value.
    pub fn with_value(mut self, value: impl Into<Option<i64>>) -> Self {
        self.value = value.into();
        self
    }

    fn ids(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.body).chain(self.label.iter())
    }
}

/// Live mapping from logical keys to the objects representing them.
///
/// The table is bijective: no two keys share an object and no object serves two keys. Moves
/// rebind keys; the objects themselves keep their identity.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    forward: BTreeMap<LogicalKey, Glyph>,
    reverse: BTreeMap<String, LogicalKey>,
}

impl BindingTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `glyph`. Fails if the key or any of the glyph's objects is already bound.
    pub fn bind(&mut self, key: LogicalKey, glyph: Glyph) -> SceneResult<()> {
        if self.forward.contains_key(&key) {
            return Err(SceneError::binding(format!("{key} is already bound")));
        }
        if glyph.label.as_ref() == Some(&glyph.body) {
            return Err(SceneError::binding(format!(
                "{key}: body and label must be distinct objects"
            )));
        }
        for id in glyph.ids() {
            if let Some(owner) = self.reverse.get(id) {
                return Err(SceneError::binding(format!(
                    "object '{id}' already serves {owner}"
                )));
            }
        }
        for id in glyph.ids() {
            self.reverse.insert(id.clone(), key);
        }
        self.forward.insert(key, glyph);
        Ok(())
    }

    /// Resolve a key to its glyph.
    pub fn get(&self, key: LogicalKey) -> SceneResult<&Glyph> {
        self.forward
            .get(&key)
            .ok_or_else(|| SceneError::binding(format!("{key} has no bound object")))
    }

    /// Resolve a key to its glyph for mutation of the displayed value.
    pub fn get_mut(&mut self, key: LogicalKey) -> SceneResult<&mut Glyph> {
        self.forward
            .get_mut(&key)
            .ok_or_else(|| SceneError::binding(format!("{key} has no bound object")))
    }

    /// `true` when `key` is bound.
    pub fn contains(&self, key: LogicalKey) -> bool {
        self.forward.contains_key(&key)
    }

    /// Key currently served by `object_id`.
    pub fn key_of(&self, object_id: &str) -> Option<LogicalKey> {
        self.reverse.get(object_id).copied()
    }

    /// Exchange the glyphs bound to `a` and `b`.
    pub fn swap(&mut self, a: LogicalKey, b: LogicalKey) -> SceneResult<()> {
        if a == b {
            self.get(a)?;
            return Ok(());
        }
        let ga = self.get(a)?.clone();
        let gb = self.get(b)?.clone();
        for id in gb.ids() {
            self.reverse.insert(id.clone(), a);
        }
        for id in ga.ids() {
            self.reverse.insert(id.clone(), b);
        }
        self.forward.insert(a, gb);
        self.forward.insert(b, ga);
        Ok(())
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// `true` when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Bound keys with their glyphs, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalKey, &Glyph)> {
        self.forward.iter().map(|(k, g)| (*k, g))
    }

    /// Values displayed by array slots, in slot order.
    pub fn slot_values(&self) -> Vec<Option<i64>> {
        self.forward
            .iter()
            .filter_map(|(k, g)| match k {
                LogicalKey::Slot(_) => Some(g.value),
                _ => None,
            })
            .collect()
    }

    /// Body object ids of array slots, in slot order.
    pub fn slot_bodies(&self) -> Vec<&str> {
        self.forward
            .iter()
            .filter_map(|(k, g)| match k {
                LogicalKey::Slot(_) => Some(g.body.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Re-check the bijection between keys and objects.
    pub fn check_bijective(&self) -> SceneResult<()> {
        let mut seen = 0usize;
        for (key, glyph) in &self.forward {
            for id in glyph.ids() {
                seen += 1;
                if self.reverse.get(id) != Some(key) {
                    return Err(SceneError::binding(format!(
                        "object '{id}' is not bound back to {key}"
                    )));
                }
            }
        }
        if seen != self.reverse.len() {
            return Err(SceneError::binding("binding table has dangling objects"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/binding.rs"]
mod tests;
