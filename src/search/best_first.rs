//! Generic best-first (A*) search over an implicit graph.
//!
//! The graph is never materialized: the caller supplies the start state, a
//! neighbor-expansion function, an edge-distance function, a heuristic, a
//! goal test, and a wall-clock timeout. States must be cheap to clone and
//! hashable so the visited set can deduplicate them.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Outcome of a best-first search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<N> {
    /// Goal test satisfied; the node sequence from start to goal inclusive.
    Found(Vec<N>),
    /// Every reachable state was expanded without satisfying the goal test.
    Exhausted,
    /// The wall-clock budget ran out first.
    TimedOut,
}

/// Entry in the open set, ordered by f-score.
#[derive(Clone)]
struct HeapEntry<N> {
    node: N,
    f_score: f32,
}

impl<N: Eq> PartialEq for HeapEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<N: Eq> Eq for HeapEntry<N> {}

impl<N: Eq> Ord for HeapEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower f_score = higher priority)
        other
            .f_score
            .partial_cmp(&self.f_score)
            .unwrap_or(Ordering::Equal)
    }
}

impl<N: Eq> PartialOrd for HeapEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run a best-first search from `start`.
///
/// `neighbors` produces the legal successor states of a node, `distance`
/// the edge cost between a node and one of its successors, and `heuristic`
/// an estimate of remaining cost. With an admissible heuristic this is A*.
pub fn best_first_search<N, FN, FD, FH, FG>(
    start: N,
    mut neighbors: FN,
    distance: FD,
    heuristic: FH,
    is_goal: FG,
    timeout: Duration,
) -> SearchOutcome<N>
where
    N: Clone + Eq + Hash,
    FN: FnMut(&N) -> Vec<N>,
    FD: Fn(&N, &N) -> f32,
    FH: Fn(&N) -> f32,
    FG: Fn(&N) -> bool,
{
    let deadline = Instant::now() + timeout;

    let mut open_set = BinaryHeap::new();
    let mut g_score: HashMap<N, f32> = HashMap::new();
    let mut came_from: HashMap<N, N> = HashMap::new();
    let mut closed_set: HashSet<N> = HashSet::new();

    g_score.insert(start.clone(), 0.0);
    open_set.push(HeapEntry {
        f_score: heuristic(&start),
        node: start,
    });

    while let Some(current) = open_set.pop() {
        if Instant::now() >= deadline {
            return SearchOutcome::TimedOut;
        }

        let current = current.node;

        if is_goal(&current) {
            return SearchOutcome::Found(reconstruct_path(&came_from, current));
        }

        // Stale heap entries are skipped rather than decreased in place.
        if !closed_set.insert(current.clone()) {
            continue;
        }

        let current_g = *g_score.get(&current).unwrap_or(&f32::INFINITY);

        for neighbor in neighbors(&current) {
            if closed_set.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g + distance(&current, &neighbor);
            let existing_g = *g_score.get(&neighbor).unwrap_or(&f32::INFINITY);

            if tentative_g < existing_g {
                came_from.insert(neighbor.clone(), current.clone());
                g_score.insert(neighbor.clone(), tentative_g);

                let f = tentative_g + heuristic(&neighbor);
                open_set.push(HeapEntry {
                    node: neighbor,
                    f_score: f,
                });
            }
        }
    }

    SearchOutcome::Exhausted
}

/// Walk the parent map back from the goal to the start.
fn reconstruct_path<N: Clone + Eq + Hash>(came_from: &HashMap<N, N>, goal: N) -> Vec<N> {
    let mut path = Vec::new();
    let mut current = goal;

    while let Some(prev) = came_from.get(&current) {
        let prev = prev.clone();
        path.push(current);
        current = prev;
    }
    path.push(current);

    path.reverse();
    path
}
