//! Row-major dynamic-programming table fills.

use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::{DatasetShape, GridStyle};
use crate::simulate::event::{FillReason, SemanticEvent};
use crate::simulate::input::{AlgorithmInput, Item};
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

const MAX_ROWS: usize = 17;
const MAX_COLS: usize = 31;

fn check_table(kind: AlgorithmKind, rows: usize, cols: usize) -> SceneResult<()> {
    if rows > MAX_ROWS || cols > MAX_COLS {
        return Err(SceneError::validation(format!(
            "{kind}: a {rows}x{cols} table does not fit on the canvas (max {MAX_ROWS}x{MAX_COLS})"
        )));
    }
    Ok(())
}

fn fill(
    trace: &mut Trace,
    table: &mut [Vec<i64>],
    row: usize,
    col: usize,
    value: i64,
    reason: FillReason,
) -> SceneResult<()> {
    table[row][col] = value;
    trace.push(SemanticEvent::FillCell {
        row,
        col,
        value,
        reason,
    })
}

/// Fill row 0 then column 0 with `base(row, col)`.
fn fill_base(
    trace: &mut Trace,
    table: &mut [Vec<i64>],
    base: impl Fn(usize, usize) -> i64,
) -> SceneResult<()> {
    let cols = table.first().map_or(0, Vec::len);
    for col in 0..cols {
        fill(trace, table, 0, col, base(0, col), FillReason::Base)?;
    }
    for row in 1..table.len() {
        fill(trace, table, row, 0, base(row, 0), FillReason::Base)?;
    }
    Ok(())
}

fn blank(rows: usize, cols: usize) -> Vec<Vec<Option<i64>>> {
    vec![vec![None; cols]; rows]
}

fn char_labels(s: &[char]) -> Vec<String> {
    std::iter::once(String::new())
        .chain(s.iter().map(char::to_string))
        .collect()
}

pub fn knapsack(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::Knapsack;
    let AlgorithmInput::Knapsack { items, capacity } = input else {
        return Err(input.mismatch(kind, "knapsack"));
    };
    if items.is_empty() {
        return Err(SceneError::shape(format!("{kind}: no items")));
    }
    let cols = capacity
        .checked_add(1)
        .ok_or_else(|| SceneError::validation(format!("{kind}: capacity {capacity} is too large")))?;
    check_table(kind, items.len() + 1, cols)?;
    items
        .iter()
        .filter(|it| it.value > 0)
        .try_fold(0i64, |acc, it| acc.checked_add(it.value))
        .ok_or_else(|| SceneError::validation(format!("{kind}: total item value overflows")))?;
    Ok(Box::new(Knapsack {
        items: items.clone(),
        capacity: *capacity,
    }))
}

const KNAPSACK_SOURCE: &str = "\
def knapsack(items, capacity):
    n = len(items)
    dp = [[0] * (capacity + 1) for _ in range(n + 1)]
    for i in range(1, n + 1):
        wt, val = items[i - 1]
        for w in range(1, capacity + 1):
            dp[i][w] = dp[i - 1][w]
            if wt <= w and dp[i - 1][w - wt] + val > dp[i][w]:
                dp[i][w] = dp[i - 1][w - wt] + val
    return dp[n][capacity]";

/// 0/1 knapsack; row `i` considers the first `i` items.
#[derive(Clone, Debug)]
pub struct Knapsack {
    items: Vec<Item>,
    capacity: usize,
}

impl Stepper for Knapsack {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Knapsack
    }

    fn title(&self) -> String {
        format!("0/1 Knapsack (Capacity={})", self.capacity)
    }

    fn shape(&self) -> DatasetShape {
        let rows = self.items.len() + 1;
        let cols = self.capacity + 1;
        DatasetShape::Grid {
            cells: blank(rows, cols),
            row_labels: std::iter::once("-".to_owned())
                .chain(self.items.iter().map(|it| format!("w{} v{}", it.weight, it.value)))
                .collect(),
            col_labels: (0..cols).map(|c| c.to_string()).collect(),
            style: GridStyle::Table,
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut dp = vec![vec![0i64; self.capacity + 1]; self.items.len() + 1];
        fill_base(trace, &mut dp, |_, _| 0)?;
        for (i, item) in self.items.iter().enumerate().map(|(i, it)| (i + 1, it)) {
            for w in 1..=self.capacity {
                let skip = dp[i - 1][w];
                let take = match w.checked_sub(item.weight) {
                    Some(rest) => Some(dp[i - 1][rest].checked_add(item.value).ok_or_else(|| {
                        SceneError::validation(format!("{}: table value overflows", self.kind()))
                    })?),
                    None => None,
                };
                match take {
                    Some(t) if t > skip => fill(trace, &mut dp, i, w, t, FillReason::Take)?,
                    _ => fill(trace, &mut dp, i, w, skip, FillReason::Skip)?,
                }
            }
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        KNAPSACK_SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::FillCell {
                reason: FillReason::Base,
                ..
            } => Some(3),
            SemanticEvent::FillCell {
                reason: FillReason::Take,
                ..
            } => Some(9),
            SemanticEvent::FillCell { .. } => Some(7),
            _ => None,
        }
    }
}

pub fn fibonacci(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::Fibonacci;
    let AlgorithmInput::Sequence { n } = input else {
        return Err(input.mismatch(kind, "sequence"));
    };
    if *n == 0 {
        return Err(SceneError::shape(format!("{kind}: no terms requested")));
    }
    check_table(kind, 1, *n)?;
    Ok(Box::new(Fibonacci { n: *n }))
}

const FIBONACCI_SOURCE: &str = "\
def fibonacci(n):
    dp = [0] * n
    if n > 1:
        dp[1] = 1
    for i in range(2, n):
        dp[i] = dp[i - 1] + dp[i - 2]
    return dp";

/// Bottom-up Fibonacci over a single row of `n` terms.
#[derive(Clone, Debug)]
pub struct Fibonacci {
    n: usize,
}

impl Stepper for Fibonacci {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Fibonacci
    }

    fn title(&self) -> String {
        "Fibonacci (Dynamic Programming)".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Grid {
            cells: blank(1, self.n),
            row_labels: Vec::new(),
            col_labels: (0..self.n).map(|i| format!("F({i})")).collect(),
            style: GridStyle::Table,
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut dp = vec![vec![0i64; self.n]];
        for col in 0..self.n.min(2) {
            fill(trace, &mut dp, 0, col, col as i64, FillReason::Base)?;
        }
        for col in 2..self.n {
            trace.push(SemanticEvent::ProbeCell { row: 0, col: col - 1 })?;
            trace.push(SemanticEvent::ProbeCell { row: 0, col: col - 2 })?;
            let (left, right) = (dp[0][col - 1], dp[0][col - 2]);
            let value = left.checked_add(right).ok_or_else(|| {
                SceneError::validation(format!("{}: F({col}) overflows", self.kind()))
            })?;
            fill(trace, &mut dp, 0, col, value, FillReason::Sum { left, right })?;
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        FIBONACCI_SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::FillCell { col: 0, .. } => Some(2),
            SemanticEvent::FillCell { col: 1, .. } => Some(4),
            SemanticEvent::FillCell { .. } | SemanticEvent::ProbeCell { .. } => Some(6),
            _ => None,
        }
    }
}

/// Which string comparison a [`StringTable`] computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StringMetric {
    Lcs,
    EditDistance,
}

fn strings(input: &AlgorithmInput, kind: AlgorithmKind) -> SceneResult<(Vec<char>, Vec<char>)> {
    let AlgorithmInput::Strings { a, b } = input else {
        return Err(input.mismatch(kind, "strings"));
    };
    if a.is_empty() && b.is_empty() {
        return Err(SceneError::shape(format!("{kind}: both strings are empty")));
    }
    let (a, b): (Vec<char>, Vec<char>) = (a.chars().collect(), b.chars().collect());
    check_table(kind, a.len() + 1, b.len() + 1)?;
    Ok((a, b))
}

pub fn lcs(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let (a, b) = strings(input, AlgorithmKind::Lcs)?;
    Ok(Box::new(StringTable {
        a,
        b,
        metric: StringMetric::Lcs,
    }))
}

pub fn edit_distance(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let (a, b) = strings(input, AlgorithmKind::EditDistance)?;
    Ok(Box::new(StringTable {
        a,
        b,
        metric: StringMetric::EditDistance,
    }))
}

const LCS_SOURCE: &str = "\
def lcs(a, b):
    dp = [[0] * (len(b) + 1) for _ in range(len(a) + 1)]
    for i in range(1, len(a) + 1):
        for j in range(1, len(b) + 1):
            if a[i - 1] == b[j - 1]:
                dp[i][j] = dp[i - 1][j - 1] + 1
            else:
                dp[i][j] = max(dp[i - 1][j], dp[i][j - 1])
    return dp[len(a)][len(b)]";

const EDIT_DISTANCE_SOURCE: &str = "\
def edit_distance(a, b):
    dp = [[0] * (len(b) + 1) for _ in range(len(a) + 1)]
    for i in range(len(a) + 1): dp[i][0] = i
    for j in range(len(b) + 1): dp[0][j] = j
    for i in range(1, len(a) + 1):
        for j in range(1, len(b) + 1):
            if a[i - 1] == b[j - 1]:
                dp[i][j] = dp[i - 1][j - 1]
            else:
                dp[i][j] = 1 + min(dp[i - 1][j], dp[i][j - 1], dp[i - 1][j - 1])
    return dp[len(a)][len(b)]";

/// LCS length or Levenshtein distance between `a` (rows) and `b` (columns).
#[derive(Clone, Debug)]
pub struct StringTable {
    a: Vec<char>,
    b: Vec<char>,
    metric: StringMetric,
}

impl Stepper for StringTable {
    fn kind(&self) -> AlgorithmKind {
        match self.metric {
            StringMetric::Lcs => AlgorithmKind::Lcs,
            StringMetric::EditDistance => AlgorithmKind::EditDistance,
        }
    }

    fn title(&self) -> String {
        let a: String = self.a.iter().collect();
        let b: String = self.b.iter().collect();
        match self.metric {
            StringMetric::Lcs => format!("Longest Common Subsequence: {a} / {b}"),
            StringMetric::EditDistance => format!("Edit Distance: {a} -> {b}"),
        }
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Grid {
            cells: blank(self.a.len() + 1, self.b.len() + 1),
            row_labels: char_labels(&self.a),
            col_labels: char_labels(&self.b),
            style: GridStyle::Table,
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let (n, m) = (self.a.len(), self.b.len());
        let mut dp = vec![vec![0i64; m + 1]; n + 1];
        match self.metric {
            StringMetric::Lcs => fill_base(trace, &mut dp, |_, _| 0)?,
            StringMetric::EditDistance => {
                fill_base(trace, &mut dp, |r, c| (r + c) as i64)?;
            }
        }
        for i in 1..=n {
            for j in 1..=m {
                let same = self.a[i - 1] == self.b[j - 1];
                let (value, reason) = match (self.metric, same) {
                    (StringMetric::Lcs, true) => (dp[i - 1][j - 1] + 1, FillReason::Match),
                    (StringMetric::Lcs, false) => {
                        (dp[i - 1][j].max(dp[i][j - 1]), FillReason::Mismatch)
                    }
                    (StringMetric::EditDistance, true) => (dp[i - 1][j - 1], FillReason::Match),
                    (StringMetric::EditDistance, false) => (
                        1 + dp[i - 1][j].min(dp[i][j - 1]).min(dp[i - 1][j - 1]),
                        FillReason::Mismatch,
                    ),
                };
                fill(trace, &mut dp, i, j, value, reason)?;
            }
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        match self.metric {
            StringMetric::Lcs => LCS_SOURCE,
            StringMetric::EditDistance => EDIT_DISTANCE_SOURCE,
        }
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        let SemanticEvent::FillCell { reason, col, .. } = event else {
            return None;
        };
        match (self.metric, reason) {
            (StringMetric::Lcs, FillReason::Base) => Some(2),
            (StringMetric::Lcs, FillReason::Match) => Some(6),
            (StringMetric::Lcs, _) => Some(8),
            (StringMetric::EditDistance, FillReason::Base) if *col == 0 => Some(3),
            (StringMetric::EditDistance, FillReason::Base) => Some(4),
            (StringMetric::EditDistance, FillReason::Match) => Some(8),
            (StringMetric::EditDistance, _) => Some(10),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/dynamic.rs"]
mod tests;
