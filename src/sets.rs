use crate::indices::RowIndex;
use crate::solution::Solutions;
use crate::{Algorithm, ProblemData, Solution};
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// The active-set entries removed by one [covering](`SetMatrix::cover`)
/// operation, in the order of the elements of the covering subset.
///
/// The caller owns this record and must hand it back to the matching
/// [uncovering](`SetMatrix::uncover`) operation, which lets coverings nest
/// to any depth without shared bookkeeping.
pub(crate) type Removed = Vec<FxHashSet<RowIndex>>;

/// The hash-set realization of the incidence matrix of an exact cover
/// problem.
///
/// Instead of linking nodes together, this structure maps every element of
/// the universe that still needs to be covered to the set of subsets that
/// contain it and have not been ruled out yet. Covering an element deletes
/// its entry; uncovering it reinserts the entry that was taken out. This
/// formulation of Algorithm X was popularized by A. Assaf in the essay
/// "Algorithm X in 30 lines!".
pub struct SetMatrix<'p, E, S> {
    /// The problem whose incidence matrix this structure represents.
    problem: &'p ProblemData<E, S>,
    /// The active columns. Each key is the position of an uncovered element
    /// in the universe, and its value holds the rows of the active subsets
    /// that contain the element.
    columns: FxHashMap<usize, FxHashSet<RowIndex>>,
}

impl<'p, E, S> crate::IncidenceMatrix<'p, E, S> for SetMatrix<'p, E, S>
where
    E: Hash + Eq,
    S: Hash + Eq + Clone,
{
    const ALGORITHM: Algorithm = Algorithm::HashSets;

    fn new(problem: &'p ProblemData<E, S>) -> Self {
        let n = problem.universe().len();
        let mut columns: FxHashMap<usize, FxHashSet<RowIndex>> = FxHashMap::default();
        columns.reserve(n);
        columns.extend((0..n).map(|position| (position, FxHashSet::default())));
        for row in 0..problem.subset_count() {
            for position in problem.positions(row) {
                if let Some(column) = columns.get_mut(position) {
                    column.insert(row);
                }
            }
        }
        debug!(
            "built hash-set matrix with {} columns and {} entries",
            n,
            problem.occurrences()
        );
        Self { problem, columns }
    }

    fn solve(mut self) -> Vec<Solution<S>> {
        let problem = self.problem;
        let mut solutions = Solutions::new(problem.ids());
        let mut partial = Vec::with_capacity(problem.universe().len());
        debug!(
            "{} search started on {} subsets",
            Self::ALGORITHM,
            problem.subset_count()
        );
        self.search(&mut partial, &mut solutions);
        let solutions = solutions.into_vec();
        debug!(
            "{} search finished with {} solutions",
            Self::ALGORITHM,
            solutions.len()
        );
        solutions
    }
}

impl<'p, E, S> SetMatrix<'p, E, S>
where
    E: Hash + Eq,
    S: Hash + Eq + Clone,
{
    fn search(&mut self, partial: &mut Vec<RowIndex>, solutions: &mut Solutions<'p, S>) {
        let Some(column) = self.choose_column() else {
            solutions.record(partial);
            return;
        };
        // Visit the rows in ascending order, so that the search does not
        // depend on the iteration order of the hash set.
        let mut rows: Vec<RowIndex> = self.columns[&column].iter().copied().collect();
        if rows.is_empty() {
            return;
        }
        rows.sort_unstable();
        for row in rows {
            partial.push(row);
            let removed = self.cover(row);
            self.search(partial, solutions);
            self.uncover(row, removed);
            partial.pop();
        }
    }
}

impl<'p, E, S> SetMatrix<'p, E, S> {
    /// Finds an active column with the fewest active rows. Ties are broken
    /// by the position of the element in the universe.
    ///
    /// Returns `None` if all columns have been covered.
    fn choose_column(&self) -> Option<usize> {
        let mut min_len = usize::MAX;
        let mut min_position = None;
        for position in 0..self.problem.universe().len() {
            if let Some(column) = self.columns.get(&position) {
                if column.len() < min_len {
                    if column.is_empty() {
                        return Some(position);
                    }
                    min_len = column.len();
                    min_position = Some(position);
                }
            }
        }
        min_position
    }

    /// Chooses the subset at `row` for the partial solution. For each element
    /// of the subset, every other active subset that contains the element is
    /// removed from the columns of its remaining elements, and then the
    /// column of the element itself is taken out.
    ///
    /// Returns the removed columns, which must be passed to [`Self::uncover`].
    fn cover(&mut self, row: RowIndex) -> Removed {
        let problem = self.problem;
        let positions = problem.positions(row);
        let mut removed = Vec::with_capacity(positions.len());
        for &position in positions {
            let column = self
                .columns
                .remove(&position)
                .expect("elements of an active subset should be uncovered");
            for &other in &column {
                for sibling in problem.positions(other) {
                    if *sibling != position {
                        self.column_mut(*sibling).remove(&other);
                    }
                }
            }
            removed.push(column);
        }
        removed
    }

    /// Undoes the updates made by the [covering](`Self::cover`) of the subset
    /// at `row`, replaying the removed columns in reverse element order.
    fn uncover(&mut self, row: RowIndex, mut removed: Removed) {
        let problem = self.problem;
        for &position in problem.positions(row).iter().rev() {
            let column = removed
                .pop()
                .expect("every covered element should have a removed column");
            for &other in &column {
                for sibling in problem.positions(other) {
                    if *sibling != position {
                        self.column_mut(*sibling).insert(other);
                    }
                }
            }
            self.columns.insert(position, column);
        }
        debug_assert!(removed.is_empty(), "covering records should not be shared");
    }

    /// Returns the element whose column would be chosen for branching at
    /// the next step of the search, or [`None`] if every element has been
    /// covered.
    pub fn next_column(&self) -> Option<&'p E> {
        let position = self.choose_column()?;
        Some(&self.problem.universe()[position])
    }

    /// Returns the total number of entries in the active columns.
    pub fn attached_count(&self) -> usize {
        self.columns.values().map(|rows| rows.len()).sum()
    }

    /// Returns `true` if every column has been covered.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns a mutable reference to the active column of the element at
    /// the given position of the universe.
    ///
    /// # Panics
    ///
    /// This function panics if the element has already been covered.
    fn column_mut(&mut self, position: usize) -> &mut FxHashSet<RowIndex> {
        self.columns
            .get_mut(&position)
            .expect("sibling columns of an active subset should be uncovered")
    }
}
