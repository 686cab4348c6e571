use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::DatasetShape;
use crate::simulate::event::SemanticEvent;
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

const SOURCE: &str = "\
def max_subarray(arr):
    cur = best = arr[0]
    for x in arr[1:]:
        if cur > 0:
            cur = cur + x
        else:
            cur = x
        best = max(best, cur)
    return best";

pub fn max_subarray(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::MaxSubarray;
    let values = match input {
        AlgorithmInput::Array { values } | AlgorithmInput::Search { values, .. } => values,
        other => return Err(other.mismatch(kind, "array")),
    };
    if values.is_empty() {
        return Err(SceneError::shape(format!("{kind}: array is empty")));
    }
    Ok(Box::new(MaxSubarray {
        values: values.clone(),
    }))
}

/// Kadane's running-sum scan. The first strictly larger sum wins, so the earliest best range is
/// reported.
#[derive(Clone, Debug)]
pub struct MaxSubarray {
    values: Vec<i64>,
}

impl Stepper for MaxSubarray {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::MaxSubarray
    }

    fn title(&self) -> String {
        "Maximum Subarray (Kadane's Algorithm)".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Array {
            values: self.values.clone(),
            pointers: false,
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let a = &self.values;
        let mut current = a[0];
        let mut best = a[0];
        let mut start = 0;
        let mut range = (0, 0);
        trace.push(SemanticEvent::ScanStep {
            index: 0,
            value: a[0],
            current,
            best,
            restart: true,
        })?;
        trace.push(SemanticEvent::NewBest {
            from: 0,
            to: 0,
            sum: best,
        })?;

        for (i, &x) in a.iter().enumerate().skip(1) {
            let restart = current <= 0;
            if restart {
                current = x;
                start = i;
            } else {
                current = current.checked_add(x).ok_or_else(|| {
                    SceneError::validation(format!("{}: running sum overflows", self.kind()))
                })?;
            }
            let improved = current > best;
            if improved {
                best = current;
                range = (start, i);
            }
            trace.push(SemanticEvent::ScanStep {
                index: i,
                value: x,
                current,
                best,
                restart,
            })?;
            if improved {
                trace.push(SemanticEvent::NewBest {
                    from: range.0,
                    to: range.1,
                    sum: best,
                })?;
            }
        }

        trace.push(SemanticEvent::BestRange {
            from: range.0,
            to: range.1,
            sum: best,
        })?;
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::ScanStep { index: 0, .. } => Some(2),
            SemanticEvent::ScanStep { restart: true, .. } => Some(7),
            SemanticEvent::ScanStep { .. } => Some(5),
            SemanticEvent::NewBest { .. } => Some(8),
            SemanticEvent::BestRange { .. } => Some(9),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/scan.rs"]
mod tests;
