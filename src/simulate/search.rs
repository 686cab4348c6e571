use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::DatasetShape;
use crate::simulate::event::{Bound, SemanticEvent};
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

const SOURCE: &str = "\
def binary_search(arr, target):
    low, high = 0, len(arr) - 1
    while low <= high:
        mid = (low + high) // 2
        if arr[mid] == target:
            return mid
        elif arr[mid] < target:
            low = mid + 1
        else:
            high = mid - 1
    return -1";

pub fn binary(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::BinarySearch;
    let AlgorithmInput::Search { values, target } = input else {
        return Err(input.mismatch(kind, "search"));
    };
    if values.is_empty() {
        return Err(SceneError::shape(format!("{kind}: array is empty")));
    }
    if values.windows(2).any(|w| w[0] > w[1]) {
        return Err(SceneError::validation(format!(
            "{kind}: values must be sorted ascending"
        )));
    }
    Ok(Box::new(BinarySearch {
        values: values.clone(),
        target: *target,
    }))
}

/// Classic `low`/`high`/`mid` binary search over sorted values.
#[derive(Clone, Debug)]
pub struct BinarySearch {
    values: Vec<i64>,
    target: i64,
}

impl Stepper for BinarySearch {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BinarySearch
    }

    fn title(&self) -> String {
        format!("Binary Search: Finding {}", self.target)
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Array {
            values: self.values.clone(),
            pointers: true,
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let a = &self.values;
        let mut low: isize = 0;
        let mut high: isize = a.len() as isize - 1;
        trace.push(SemanticEvent::MoveBound {
            bound: Bound::Low,
            index: low,
        })?;
        trace.push(SemanticEvent::MoveBound {
            bound: Bound::High,
            index: high,
        })?;

        while low <= high {
            let (lo, hi) = (low as usize, high as usize);
            let mid = (lo + hi) / 2;
            trace.push(SemanticEvent::Probe {
                low: lo,
                mid,
                high: hi,
                value: a[mid],
                target: self.target,
            })?;
            if a[mid] == self.target {
                trace.push(SemanticEvent::Found {
                    index: mid,
                    value: a[mid],
                })?;
                return trace.push(SemanticEvent::Finish);
            }
            if a[mid] < self.target {
                trace.push(SemanticEvent::Discard { from: lo, to: mid })?;
                low = mid as isize + 1;
                trace.push(SemanticEvent::MoveBound {
                    bound: Bound::Low,
                    index: low,
                })?;
            } else {
                trace.push(SemanticEvent::Discard { from: mid, to: hi })?;
                high = mid as isize - 1;
                trace.push(SemanticEvent::MoveBound {
                    bound: Bound::High,
                    index: high,
                })?;
            }
        }
        trace.push(SemanticEvent::NotFound {
            target: self.target,
        })?;
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::Probe { .. } => Some(4),
            SemanticEvent::Found { .. } => Some(6),
            SemanticEvent::MoveBound {
                bound: Bound::Low, ..
            } => Some(8),
            SemanticEvent::MoveBound {
                bound: Bound::High, ..
            } => Some(10),
            SemanticEvent::NotFound { .. } => Some(11),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/search.rs"]
mod tests;
