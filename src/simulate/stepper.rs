use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::emit::narrate::{Flavor, NarrativeLevel};
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::DatasetShape;
use crate::simulate::event::SemanticEvent;
use crate::simulate::input::AlgorithmInput;

/// Algorithm families the compiler can animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum AlgorithmKind {
    BubbleSort,
    SelectionSort,
    QuickSort,
    MergeSort,
    CountingSort,
    BucketSort,
    BinarySearch,
    MaxSubarray,
    Bfs,
    Dfs,
    Dijkstra,
    BellmanFord,
    FloydWarshall,
    KruskalMst,
    PrimMst,
    Fibonacci,
    Knapsack,
    Lcs,
    EditDistance,
    NQueens,
    BstInsert,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 21] = [
        Self::BubbleSort,
        Self::SelectionSort,
        Self::QuickSort,
        Self::MergeSort,
        Self::CountingSort,
        Self::BucketSort,
        Self::BinarySearch,
        Self::MaxSubarray,
        Self::Bfs,
        Self::Dfs,
        Self::Dijkstra,
        Self::BellmanFord,
        Self::FloydWarshall,
        Self::KruskalMst,
        Self::PrimMst,
        Self::Fibonacci,
        Self::Knapsack,
        Self::Lcs,
        Self::EditDistance,
        Self::NQueens,
        Self::BstInsert,
    ];

    /// Canonical key, as emitted by the intent classifier.
    pub fn key(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble_sort",
            Self::SelectionSort => "selection_sort",
            Self::QuickSort => "quick_sort",
            Self::MergeSort => "merge_sort",
            Self::CountingSort => "counting_sort",
            Self::BucketSort => "bucket_sort",
            Self::BinarySearch => "binary_search",
            Self::MaxSubarray => "max_subarray",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::BellmanFord => "bellman_ford",
            Self::FloydWarshall => "floyd_warshall",
            Self::KruskalMst => "kruskal_mst",
            Self::PrimMst => "prim_mst",
            Self::Fibonacci => "fibonacci",
            Self::Knapsack => "knapsack",
            Self::Lcs => "lcs",
            Self::EditDistance => "edit_distance",
            Self::NQueens => "n_queens",
            Self::BstInsert => "bst",
        }
    }

    pub fn flavor(self) -> Flavor {
        match self {
            Self::BubbleSort
            | Self::SelectionSort
            | Self::QuickSort
            | Self::MergeSort
            | Self::CountingSort
            | Self::BucketSort => Flavor::Sort,
            Self::BinarySearch => Flavor::Search,
            Self::MaxSubarray => Flavor::Scan,
            Self::Bfs | Self::Dfs => Flavor::Traversal,
            Self::Dijkstra | Self::BellmanFord | Self::FloydWarshall => Flavor::ShortestPath,
            Self::KruskalMst | Self::PrimMst => Flavor::SpanningTree,
            Self::Fibonacci | Self::Knapsack | Self::Lcs | Self::EditDistance => Flavor::Table,
            Self::NQueens => Flavor::Backtracking,
            Self::BstInsert => Flavor::Tree,
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let kind = match key.as_str() {
            "bubble_sort" | "bubble" => Self::BubbleSort,
            "selection_sort" | "selection" => Self::SelectionSort,
            "quick_sort" | "quicksort" | "quick" => Self::QuickSort,
            "merge_sort" | "mergesort" | "merge" => Self::MergeSort,
            "counting_sort" | "counting" => Self::CountingSort,
            "bucket_sort" | "bucket" => Self::BucketSort,
            "binary_search" | "search" | "binary" => Self::BinarySearch,
            "max_subarray" | "maximum_subarray" | "kadane" => Self::MaxSubarray,
            "bfs" | "breadth_first_search" => Self::Bfs,
            "dfs" | "depth_first_search" => Self::Dfs,
            "dijkstra" | "shortest_path" => Self::Dijkstra,
            "bellman_ford" | "bellman" => Self::BellmanFord,
            "floyd_warshall" | "floyd" => Self::FloydWarshall,
            "kruskal_mst" | "kruskal" | "mst" | "spanning_tree" | "minimum_spanning_tree" => {
                Self::KruskalMst
            }
            "prim_mst" | "prim" => Self::PrimMst,
            "fibonacci" | "fib" => Self::Fibonacci,
            "knapsack" | "01_knapsack" | "0_1_knapsack" => Self::Knapsack,
            "lcs" | "longest_common_subsequence" => Self::Lcs,
            "edit_distance" | "levenshtein" => Self::EditDistance,
            "n_queens" | "nqueens" | "queens" => Self::NQueens,
            "bst" | "bst_insert" | "binary_search_tree" => Self::BstInsert,
            _ => {
                return Err(SceneError::validation(format!(
                    "unknown algorithm kind '{s}'"
                )));
            }
        };
        Ok(kind)
    }
}

/// Collects semantic events and enforces the event budget.
#[derive(Debug)]
pub struct Trace {
    events: Vec<SemanticEvent>,
    budget: usize,
}

impl Trace {
    pub fn new(budget: usize) -> Self {
        Self {
            events: Vec::new(),
            budget,
        }
    }

    /// Record one event. Going past the budget is fatal: it means the stepper does not
    /// terminate on this input.
    pub fn push(&mut self, event: SemanticEvent) -> SceneResult<()> {
        if self.events.len() >= self.budget {
            return Err(SceneError::simulation(format!(
                "stepper exceeded its budget of {} events",
                self.budget
            )));
        }
        self.events.push(event);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[SemanticEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SemanticEvent> {
        self.events
    }
}

/// One algorithm family bound to its input.
pub trait Stepper: Send + Sync {
    fn kind(&self) -> AlgorithmKind;

    /// Title shown at the top of the scene.
    fn title(&self) -> String;

    /// Dataset the layout engine draws.
    fn shape(&self) -> DatasetShape;

    /// Run the algorithm on a copy of the input, recording every decision in order.
    fn simulate(&self, trace: &mut Trace) -> SceneResult<()>;

    /// Source listing shown next to the animation.
    fn source(&self, _level: NarrativeLevel) -> &'static str {
        ""
    }

    /// 1-based line of [`Stepper::source`] that `event` corresponds to.
    fn code_line(&self, _event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        None
    }
}

/// Builds a stepper from caller input.
pub type StepperFactory = fn(&AlgorithmInput) -> SceneResult<Box<dyn Stepper>>;

/// Maps algorithm kinds to stepper factories.
#[derive(Clone, Default)]
pub struct StepperRegistry {
    factories: BTreeMap<AlgorithmKind, StepperFactory>,
}

impl fmt::Debug for StepperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepperRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StepperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in family.
    pub fn with_defaults() -> Self {
        use crate::simulate::{
            backtrack, distribution, dynamic, graph, scan, search, sorting, spanning, tree,
        };

        let mut r = Self::new();
        r.register(AlgorithmKind::BubbleSort, sorting::bubble);
        r.register(AlgorithmKind::SelectionSort, sorting::selection);
        r.register(AlgorithmKind::QuickSort, sorting::quick);
        r.register(AlgorithmKind::MergeSort, sorting::merge);
        r.register(AlgorithmKind::CountingSort, distribution::counting);
        r.register(AlgorithmKind::BucketSort, distribution::bucket);
        r.register(AlgorithmKind::BinarySearch, search::binary);
        r.register(AlgorithmKind::MaxSubarray, scan::max_subarray);
        r.register(AlgorithmKind::Bfs, graph::bfs);
        r.register(AlgorithmKind::Dfs, graph::dfs);
        r.register(AlgorithmKind::Dijkstra, graph::dijkstra);
        r.register(AlgorithmKind::BellmanFord, graph::bellman_ford);
        r.register(AlgorithmKind::FloydWarshall, graph::floyd_warshall);
        r.register(AlgorithmKind::KruskalMst, spanning::kruskal);
        r.register(AlgorithmKind::PrimMst, spanning::prim);
        r.register(AlgorithmKind::Fibonacci, dynamic::fibonacci);
        r.register(AlgorithmKind::Knapsack, dynamic::knapsack);
        r.register(AlgorithmKind::Lcs, dynamic::lcs);
        r.register(AlgorithmKind::EditDistance, dynamic::edit_distance);
        r.register(AlgorithmKind::NQueens, backtrack::n_queens);
        r.register(AlgorithmKind::BstInsert, tree::bst_insert);
        r
    }

    /// Shared registry with the built-in families.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<StepperRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::with_defaults)
    }

    /// Register or replace the factory for `kind`.
    pub fn register(&mut self, kind: AlgorithmKind, factory: StepperFactory) {
        self.factories.insert(kind, factory);
    }

    pub fn contains(&self, kind: AlgorithmKind) -> bool {
        self.factories.contains_key(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = AlgorithmKind> + '_ {
        self.factories.keys().copied()
    }

    /// Build the stepper for `kind` over `input`.
    pub fn resolve(
        &self,
        kind: AlgorithmKind,
        input: &AlgorithmInput,
    ) -> SceneResult<Box<dyn Stepper>> {
        let factory = self.factories.get(&kind).ok_or_else(|| {
            SceneError::validation(format!("no stepper registered for '{kind}'"))
        })?;
        let stepper = factory(input)?;
        if stepper.kind() != kind {
            return Err(SceneError::validation(format!(
                "factory for '{kind}' built a '{}' stepper",
                stepper.kind()
            )));
        }
        Ok(stepper)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/stepper.rs"]
mod tests;
