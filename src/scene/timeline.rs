use std::collections::BTreeMap;

use crate::foundation::core::Span;
use crate::foundation::error::SceneResult;
use crate::scene::model::Action;

/// Append-only action list that enforces the per-property overlap rule.
///
/// The rule is last-writer-wins per `(object, param key)`: a newly pushed action that writes a
/// key still being animated by an earlier action truncates the earlier one at the new start. If
/// the earlier action had not started yet, it loses the key instead, and an action left without
/// keys is dropped (handing its narrative to the newcomer).
#[derive(Debug, Default)]
pub struct ActionLog {
    slots: Vec<Option<Action>>,
    writers: BTreeMap<(String, String), Vec<usize>>,
    truncated: usize,
    dropped: usize,
}

impl ActionLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `action`, resolving conflicts with earlier writers.
    pub fn push(&mut self, mut action: Action) -> SceneResult<()> {
        let span = action.span()?;

        for key in action.params.keys() {
            let Some(indices) = self.writers.get(&(action.object_id.clone(), key.clone())) else {
                continue;
            };
            for &idx in indices {
                let Some(prev) = self.slots[idx].as_mut() else {
                    continue;
                };
                let disjoint = !span.overlaps(Span {
                    start: prev.start,
                    end: prev.end,
                });
                if disjoint || !prev.params.contains_key(key) {
                    continue;
                }
                if prev.start < span.start {
                    prev.end = span.start;
                    self.truncated += 1;
                } else {
                    prev.params.remove(key);
                }
            }
        }

        // Earlier actions that lost every key are superseded entirely.
        let keys: Vec<String> = action.params.keys().cloned().collect();
        for key in &keys {
            let Some(indices) = self.writers.get(&(action.object_id.clone(), key.clone())) else {
                continue;
            };
            for &idx in indices {
                let superseded = self.slots[idx]
                    .as_ref()
                    .is_some_and(|prev| prev.params.is_empty());
                if !superseded {
                    continue;
                }
                if let Some(prev) = self.slots[idx].take() {
                    self.dropped += 1;
                    if action.narrative.is_none() {
                        action.narrative = prev.narrative;
                        action.code_line = action.code_line.or(prev.code_line);
                    }
                }
            }
        }

        let idx = self.slots.len();
        for key in keys {
            self.writers
                .entry((action.object_id.clone(), key))
                .or_default()
                .push(idx);
        }
        self.slots.push(Some(action));
        Ok(())
    }

    /// Number of live actions.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// `true` when no live action remains.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Latest end time among live actions.
    pub fn last_end(&self) -> f64 {
        self.slots
            .iter()
            .flatten()
            .map(|a| a.end)
            .fold(0.0, f64::max)
    }

    /// How many earlier actions were shortened or dropped by the overlap rule.
    pub fn resolved_overlaps(&self) -> (usize, usize) {
        (self.truncated, self.dropped)
    }

    /// Live actions in push order.
    pub fn into_actions(self) -> Vec<Action> {
        self.slots.into_iter().flatten().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/timeline.rs"]
mod tests;
