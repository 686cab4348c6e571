use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::DatasetShape;
use crate::simulate::event::SemanticEvent;
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

/// Most keys a tree layout can hold legibly.
pub const MAX_KEYS: usize = 31;

const SOURCE: &str = "\
def insert(root, key):
    if root is None:
        return Node(key)
    if key < root.key:
        root.left = insert(root.left, key)
    else:
        root.right = insert(root.right, key)
    return root";

pub fn bst_insert(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::BstInsert;
    let keys = match input {
        AlgorithmInput::Keys { keys } | AlgorithmInput::Array { values: keys } => keys,
        other => return Err(other.mismatch(kind, "keys")),
    };
    if keys.is_empty() {
        return Err(SceneError::shape(format!("{kind}: no keys")));
    }
    if keys.len() > MAX_KEYS {
        return Err(SceneError::validation(format!(
            "{kind}: {} keys exceed the limit of {MAX_KEYS}",
            keys.len()
        )));
    }
    Ok(Box::new(BstInsert { keys: keys.clone() }))
}

/// Inserts keys one by one into a binary search tree.
#[derive(Clone, Debug)]
pub struct BstInsert {
    keys: Vec<i64>,
}

impl Stepper for BstInsert {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BstInsert
    }

    fn title(&self) -> String {
        "Binary Search Tree Insertion".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Tree {
            keys: self.keys.clone(),
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let n = self.keys.len();
        let mut left: Vec<Option<usize>> = vec![None; n];
        let mut right: Vec<Option<usize>> = vec![None; n];
        trace.push(SemanticEvent::InsertNode {
            node: 0,
            parent: None,
            key: self.keys[0],
        })?;
        for (idx, &key) in self.keys.iter().enumerate().skip(1) {
            let mut cur = 0;
            loop {
                let go_left = key < self.keys[cur];
                trace.push(SemanticEvent::Descend {
                    node: cur,
                    key,
                    left: go_left,
                })?;
                let child = if go_left {
                    &mut left[cur]
                } else {
                    &mut right[cur]
                };
                match *child {
                    Some(next) => cur = next,
                    None => {
                        *child = Some(idx);
                        trace.push(SemanticEvent::InsertNode {
                            node: idx,
                            parent: Some(cur),
                            key,
                        })?;
                        break;
                    }
                }
            }
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::Descend { left: true, .. } => Some(5),
            SemanticEvent::Descend { left: false, .. } => Some(7),
            SemanticEvent::InsertNode { .. } => Some(3),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/tree.rs"]
mod tests;
