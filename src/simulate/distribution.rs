//! Non-comparison sorts that distribute values into bins and gather them back.

use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::DatasetShape;
use crate::simulate::event::SemanticEvent;
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

/// Largest value counting sort accepts; one bin per value fits on the canvas up to here.
const MAX_COUNTING_VALUE: i64 = 30;
const BUCKETS: usize = 5;

fn non_negative(input: &AlgorithmInput, kind: AlgorithmKind) -> SceneResult<Vec<i64>> {
    let values = match input {
        AlgorithmInput::Array { values } | AlgorithmInput::Search { values, .. } => values,
        other => return Err(other.mismatch(kind, "array")),
    };
    if values.is_empty() {
        return Err(SceneError::shape(format!("{kind}: array is empty")));
    }
    if let Some(v) = values.iter().find(|&&v| v < 0) {
        return Err(SceneError::validation(format!(
            "{kind}: values must be >= 0 (got {v})"
        )));
    }
    Ok(values.clone())
}

pub fn counting(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::CountingSort;
    let values = non_negative(input, kind)?;
    if let Some(v) = values.iter().find(|&&v| v > MAX_COUNTING_VALUE) {
        return Err(SceneError::validation(format!(
            "{kind}: values must be <= {MAX_COUNTING_VALUE} (got {v})"
        )));
    }
    Ok(Box::new(Distribution {
        values,
        counting: true,
    }))
}

pub fn bucket(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(Distribution {
        values: non_negative(input, AlgorithmKind::BucketSort)?,
        counting: false,
    }))
}

const COUNTING_SOURCE: &str = "\
def counting_sort(arr):
    count = [0] * (max(arr) + 1)
    for x in arr:
        count[x] += 1
    i = 0
    for v, c in enumerate(count):
        for _ in range(c):
            arr[i] = v
            i += 1
    return arr";

const BUCKET_SOURCE: &str = "\
def bucket_sort(arr, k=5):
    width = max(arr) // k + 1
    buckets = [[] for _ in range(k)]
    for x in arr:
        buckets[x // width].append(x)
    for b in buckets:
        b.sort()
    i = 0
    for b in buckets:
        for x in b:
            arr[i] = x
            i += 1
    return arr";

/// Counting sort (one bin per value) or bucket sort (five equal-width ranges).
#[derive(Clone, Debug)]
pub struct Distribution {
    values: Vec<i64>,
    counting: bool,
}

impl Distribution {
    fn max(&self) -> i64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Width of one bucket-sort range. `max / width < BUCKETS` always holds.
    fn width(&self) -> i64 {
        self.max() / BUCKETS as i64 + 1
    }

    fn bin_of(&self, value: i64) -> usize {
        if self.counting {
            value as usize
        } else {
            (value / self.width()) as usize
        }
    }

    fn labels(&self) -> Vec<String> {
        if self.counting {
            (0..=self.max()).map(|v| v.to_string()).collect()
        } else {
            let w = self.width();
            (0..BUCKETS as i64)
                .map(|b| format!("{}-{}", b * w, (b + 1).saturating_mul(w) - 1))
                .collect()
        }
    }
}

impl Stepper for Distribution {
    fn kind(&self) -> AlgorithmKind {
        if self.counting {
            AlgorithmKind::CountingSort
        } else {
            AlgorithmKind::BucketSort
        }
    }

    fn title(&self) -> String {
        if self.counting {
            "Counting Sort".to_owned()
        } else {
            "Bucket Sort".to_owned()
        }
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Buckets {
            values: self.values.clone(),
            labels: self.labels(),
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut a = self.values.clone();
        let mut bins: Vec<Vec<i64>> = vec![Vec::new(); self.labels().len()];
        for (index, &value) in a.iter().enumerate() {
            let bucket = self.bin_of(value);
            bins[bucket].push(value);
            trace.push(SemanticEvent::Tally {
                index,
                value,
                bucket,
                count: bins[bucket].len(),
            })?;
        }

        if !self.counting {
            for (bucket, bin) in bins.iter_mut().enumerate() {
                if bin.is_empty() {
                    continue;
                }
                bin.sort();
                trace.push(SemanticEvent::SortBucket {
                    bucket,
                    size: bin.len(),
                })?;
            }
        }

        let mut index = 0;
        for (bucket, bin) in bins.iter().enumerate() {
            for (taken, &value) in bin.iter().enumerate() {
                trace.push(SemanticEvent::Gather {
                    bucket,
                    index,
                    value,
                    previous: a[index],
                    remaining: bin.len() - taken - 1,
                })?;
                a[index] = value;
                index += 1;
            }
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        if self.counting {
            COUNTING_SOURCE
        } else {
            BUCKET_SOURCE
        }
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match (event, self.counting) {
            (SemanticEvent::Tally { .. }, true) => Some(4),
            (SemanticEvent::Gather { .. }, true) => Some(8),
            (SemanticEvent::Tally { .. }, false) => Some(5),
            (SemanticEvent::SortBucket { .. }, false) => Some(7),
            (SemanticEvent::Gather { .. }, false) => Some(11),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/distribution.rs"]
mod tests;
