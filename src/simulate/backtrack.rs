use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::{DatasetShape, GridStyle};
use crate::simulate::event::SemanticEvent;
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

/// Largest board drawn.
pub const MAX_QUEENS: usize = 8;

const SOURCE: &str = "\
def solve(board, row, n):
    if row == n:
        return True
    for col in range(n):
        if is_safe(board, row, col):
            board[row] = col
            if solve(board, row + 1, n):
                return True
            board[row] = -1
    return False";

pub fn n_queens(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::NQueens;
    let AlgorithmInput::Board { n } = input else {
        return Err(input.mismatch(kind, "board"));
    };
    match *n {
        0 => Err(SceneError::shape(format!("{kind}: board is empty"))),
        2 | 3 => Err(SceneError::validation(format!(
            "{kind}: a {n}x{n} board has no solution"
        ))),
        n if n > MAX_QUEENS => Err(SceneError::validation(format!(
            "{kind}: board size {n} exceeds {MAX_QUEENS}"
        ))),
        n => Ok(Box::new(NQueens { n })),
    }
}

/// Row-by-row backtracking; stops at the first full placement.
#[derive(Clone, Debug)]
pub struct NQueens {
    n: usize,
}

impl NQueens {
    fn safe(queens: &[usize], row: usize, col: usize) -> bool {
        queens
            .iter()
            .enumerate()
            .all(|(r, &c)| c != col && r.abs_diff(row) != c.abs_diff(col))
    }

    fn place(&self, trace: &mut Trace, queens: &mut Vec<usize>) -> SceneResult<bool> {
        let row = queens.len();
        if row == self.n {
            return Ok(true);
        }
        for col in 0..self.n {
            trace.push(SemanticEvent::TryCell { row, col })?;
            if !Self::safe(queens, row, col) {
                trace.push(SemanticEvent::RejectCell { row, col })?;
                continue;
            }
            trace.push(SemanticEvent::PlaceQueen { row, col })?;
            queens.push(col);
            if self.place(trace, queens)? {
                return Ok(true);
            }
            queens.pop();
            trace.push(SemanticEvent::RemoveQueen { row, col })?;
        }
        Ok(false)
    }
}

impl Stepper for NQueens {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::NQueens
    }

    fn title(&self) -> String {
        format!("{}-Queens Problem", self.n)
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Grid {
            cells: vec![vec![None; self.n]; self.n],
            row_labels: Vec::new(),
            col_labels: Vec::new(),
            style: GridStyle::Board,
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut queens = Vec::with_capacity(self.n);
        if !self.place(trace, &mut queens)? {
            return Err(SceneError::simulation(format!(
                "no placement found for {} queens",
                self.n
            )));
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::TryCell { .. } | SemanticEvent::RejectCell { .. } => Some(5),
            SemanticEvent::PlaceQueen { .. } => Some(6),
            SemanticEvent::RemoveQueen { .. } => Some(9),
            SemanticEvent::Finish => Some(3),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/backtrack.rs"]
mod tests;
