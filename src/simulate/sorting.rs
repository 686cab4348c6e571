//! Comparison sorts over an array of bars.

use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::DatasetShape;
use crate::simulate::event::SemanticEvent;
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

fn array_values(input: &AlgorithmInput, kind: AlgorithmKind) -> SceneResult<Vec<i64>> {
    match input {
        AlgorithmInput::Array { values } | AlgorithmInput::Search { values, .. } => {
            if values.is_empty() {
                return Err(SceneError::shape(format!("{kind}: array is empty")));
            }
            Ok(values.clone())
        }
        other => Err(other.mismatch(kind, "array")),
    }
}

fn bars(values: &[i64]) -> DatasetShape {
    DatasetShape::Array {
        values: values.to_vec(),
        pointers: false,
    }
}

/// Emit a swap of slots `i` and `j` and apply it to `a`.
fn swap(trace: &mut Trace, a: &mut [i64], i: usize, j: usize) -> SceneResult<()> {
    trace.push(SemanticEvent::Swap {
        i,
        j,
        left: a[i],
        right: a[j],
    })?;
    a.swap(i, j);
    Ok(())
}

pub fn bubble(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(BubbleSort {
        values: array_values(input, AlgorithmKind::BubbleSort)?,
    }))
}

pub fn selection(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(SelectionSort {
        values: array_values(input, AlgorithmKind::SelectionSort)?,
    }))
}

pub fn quick(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(QuickSort {
        values: array_values(input, AlgorithmKind::QuickSort)?,
    }))
}

pub fn merge(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(MergeSort {
        values: array_values(input, AlgorithmKind::MergeSort)?,
    }))
}

const BUBBLE_SOURCE: &str = "\
def bubble_sort(arr):
    n = len(arr)
    for i in range(n - 1):
        swapped = False
        for j in range(n - 1 - i):
            if arr[j] > arr[j + 1]:
                arr[j], arr[j + 1] = arr[j + 1], arr[j]
                swapped = True
        if not swapped:
            break
    return arr";

const BUBBLE_KIDS_SOURCE: &str = "\
repeat for every round:
    look at each pair of neighbours
        if the left one is bigger:
            swap them!";

/// Adjacent compare-and-swap passes with early exit.
#[derive(Clone, Debug)]
pub struct BubbleSort {
    values: Vec<i64>,
}

impl Stepper for BubbleSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BubbleSort
    }

    fn title(&self) -> String {
        "Bubble Sort".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        bars(&self.values)
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut a = self.values.clone();
        let n = a.len();
        // slots at or past `unsorted` are final
        let mut unsorted = n;
        for pass in 0..n.saturating_sub(1) {
            trace.push(SemanticEvent::Pass { number: pass + 1 })?;
            let mut swapped = false;
            for j in 0..n - 1 - pass {
                trace.push(SemanticEvent::Compare {
                    i: j,
                    j: j + 1,
                    left: a[j],
                    right: a[j + 1],
                })?;
                if a[j] > a[j + 1] {
                    swap(trace, &mut a, j, j + 1)?;
                    swapped = true;
                }
            }
            unsorted = n - 1 - pass;
            trace.push(SemanticEvent::MarkSorted { index: unsorted })?;
            if !swapped {
                break;
            }
        }
        for index in 0..unsorted {
            trace.push(SemanticEvent::MarkSorted { index })?;
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, level: NarrativeLevel) -> &'static str {
        match level {
            NarrativeLevel::Kids => BUBBLE_KIDS_SOURCE,
            _ => BUBBLE_SOURCE,
        }
    }

    fn code_line(&self, event: &SemanticEvent, level: NarrativeLevel) -> Option<u32> {
        let kids = level == NarrativeLevel::Kids;
        match event {
            SemanticEvent::Pass { .. } => Some(if kids { 1 } else { 3 }),
            SemanticEvent::Compare { .. } => Some(if kids { 3 } else { 6 }),
            SemanticEvent::Swap { .. } => Some(if kids { 4 } else { 7 }),
            SemanticEvent::Finish if !kids => Some(11),
            _ => None,
        }
    }
}

const SELECTION_SOURCE: &str = "\
def selection_sort(arr):
    n = len(arr)
    for i in range(n - 1):
        min_idx = i
        for j in range(i + 1, n):
            if arr[j] < arr[min_idx]:
                min_idx = j
        if min_idx != i:
            arr[i], arr[min_idx] = arr[min_idx], arr[i]
    return arr";

/// Running-minimum selection; ties keep the lower index.
#[derive(Clone, Debug)]
pub struct SelectionSort {
    values: Vec<i64>,
}

impl Stepper for SelectionSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::SelectionSort
    }

    fn title(&self) -> String {
        "Selection Sort".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        bars(&self.values)
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut a = self.values.clone();
        let n = a.len();
        for i in 0..n.saturating_sub(1) {
            trace.push(SemanticEvent::Pass { number: i + 1 })?;
            let mut min = i;
            trace.push(SemanticEvent::SetMin {
                index: i,
                value: a[i],
            })?;
            for j in i + 1..n {
                trace.push(SemanticEvent::Compare {
                    i: j,
                    j: min,
                    left: a[j],
                    right: a[min],
                })?;
                if a[j] < a[min] {
                    trace.push(SemanticEvent::ClearMin { index: min })?;
                    min = j;
                    trace.push(SemanticEvent::SetMin {
                        index: j,
                        value: a[j],
                    })?;
                }
            }
            trace.push(SemanticEvent::ClearMin { index: min })?;
            if min != i {
                swap(trace, &mut a, i, min)?;
            }
            trace.push(SemanticEvent::MarkSorted { index: i })?;
        }
        trace.push(SemanticEvent::MarkSorted { index: n - 1 })?;
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        SELECTION_SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::Pass { .. } => Some(3),
            SemanticEvent::Compare { .. } => Some(6),
            SemanticEvent::SetMin { .. } => Some(7),
            SemanticEvent::Swap { .. } => Some(9),
            _ => None,
        }
    }
}

const QUICK_SOURCE: &str = "\
def quick_sort(arr, low, high):
    if low < high:
        pivot = arr[high]
        i = low - 1
        for j in range(low, high):
            if arr[j] <= pivot:
                i += 1
                arr[i], arr[j] = arr[j], arr[i]
        arr[i + 1], arr[high] = arr[high], arr[i + 1]
        quick_sort(arr, low, i)
        quick_sort(arr, i + 2, high)";

/// Lomuto partition around the last element.
#[derive(Clone, Debug)]
pub struct QuickSort {
    values: Vec<i64>,
}

impl Stepper for QuickSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::QuickSort
    }

    fn title(&self) -> String {
        "Quick Sort".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        bars(&self.values)
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut a = self.values.clone();
        // Explicit stack of inclusive ranges; the left part is always finished first.
        let mut stack: Vec<(isize, isize)> = vec![(0, a.len() as isize - 1)];
        while let Some((low, high)) = stack.pop() {
            if low > high {
                continue;
            }
            if low == high {
                trace.push(SemanticEvent::MarkSorted {
                    index: low as usize,
                })?;
                continue;
            }
            let (lo, hi) = (low as usize, high as usize);
            let pivot = a[hi];
            trace.push(SemanticEvent::SetPivot {
                index: hi,
                value: pivot,
            })?;
            let mut store = lo;
            for j in lo..hi {
                trace.push(SemanticEvent::Compare {
                    i: j,
                    j: hi,
                    left: a[j],
                    right: pivot,
                })?;
                if a[j] <= pivot {
                    if store != j {
                        swap(trace, &mut a, store, j)?;
                    }
                    store += 1;
                }
            }
            if store != hi {
                swap(trace, &mut a, store, hi)?;
            }
            trace.push(SemanticEvent::MarkSorted { index: store })?;
            let p = store as isize;
            stack.push((p + 1, high));
            stack.push((low, p - 1));
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        QUICK_SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::SetPivot { .. } => Some(3),
            SemanticEvent::Compare { .. } => Some(6),
            SemanticEvent::Swap { .. } => Some(8),
            _ => None,
        }
    }
}

const MERGE_SOURCE: &str = "\
def merge_sort(arr):
    if len(arr) <= 1:
        return arr
    mid = len(arr) // 2
    left = merge_sort(arr[:mid])
    right = merge_sort(arr[mid:])
    merged, i, j = [], 0, 0
    while i < len(left) and j < len(right):
        if left[i] <= right[j]:
            merged.append(left[i]); i += 1
        else:
            merged.append(right[j]); j += 1
    merged += left[i:] + right[j:]
    return merged";

/// Top-down merge sort; merged values are written back slot by slot.
#[derive(Clone, Debug)]
pub struct MergeSort {
    values: Vec<i64>,
}

impl MergeSort {
    fn sort(trace: &mut Trace, a: &mut [i64], lo: usize, hi: usize) -> SceneResult<()> {
        let len = hi - lo + 1;
        if len <= 1 {
            return Ok(());
        }
        let mid = lo + len / 2;
        trace.push(SemanticEvent::Split {
            low: lo,
            mid,
            high: hi,
        })?;
        Self::sort(trace, a, lo, mid - 1)?;
        Self::sort(trace, a, mid, hi)?;

        let left = a[lo..mid].to_vec();
        let right = a[mid..=hi].to_vec();
        let (mut i, mut j) = (0, 0);
        let mut k = lo;
        while i < left.len() || j < right.len() {
            let take_left = if i < left.len() && j < right.len() {
                trace.push(SemanticEvent::Compare {
                    i: lo + i,
                    j: mid + j,
                    left: left[i],
                    right: right[j],
                })?;
                left[i] <= right[j]
            } else {
                i < left.len()
            };
            let value = if take_left {
                i += 1;
                left[i - 1]
            } else {
                j += 1;
                right[j - 1]
            };
            if a[k] != value {
                trace.push(SemanticEvent::Assign {
                    index: k,
                    value,
                    previous: a[k],
                })?;
                a[k] = value;
            }
            k += 1;
        }
        Ok(())
    }
}

impl Stepper for MergeSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::MergeSort
    }

    fn title(&self) -> String {
        "Merge Sort".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        bars(&self.values)
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut a = self.values.clone();
        let n = a.len();
        Self::sort(trace, &mut a, 0, n - 1)?;
        for index in 0..n {
            trace.push(SemanticEvent::MarkSorted { index })?;
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        MERGE_SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::Split { .. } => Some(4),
            SemanticEvent::Compare { .. } => Some(9),
            SemanticEvent::Assign { .. } => Some(10),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/sorting.rs"]
mod tests;
