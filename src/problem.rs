use crate::error::InvalidInput;
use crate::indices::RowIndex;
use crate::Solution;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// A validated exact cover problem: a universe of distinct elements and
/// a collection of named subsets of that universe.
///
/// The contents are immutable once [`ProblemData::new`] succeeds, and both
/// incidence structures ([`LinkedMatrix`] and [`SetMatrix`]) borrow them
/// for the duration of a search.
///
/// [`LinkedMatrix`]: crate::LinkedMatrix
/// [`SetMatrix`]: crate::SetMatrix
#[derive(Debug, Clone)]
pub struct ProblemData<E, S> {
    /// The elements to be covered, in the order given by the caller.
    universe: Vec<E>,
    /// The subset identifiers, in the order given by the caller.
    ids: Vec<S>,
    /// The elements of each subset.
    subsets: Vec<Vec<E>>,
    /// The position in `universe` of each element of each subset. This table
    /// is filled in during validation, so that the incidence structures can
    /// find the column of an element in constant time.
    positions: Vec<Vec<usize>>,
    /// The row of every subset identifier.
    rows: FxHashMap<S, RowIndex>,
}

impl<E, S> ProblemData<E, S>
where
    E: Hash + Eq,
    S: Hash + Eq + Clone,
{
    /// Validates a universe and a collection of `(id, subset)` pairs.
    ///
    /// Validation happens eagerly and completely before anything else is
    /// built. It fails if the universe or the collection is empty, if the
    /// universe has duplicate elements, if two subsets share an identifier,
    /// or if some subset is empty, repeats an element, or mentions an
    /// element that is not in the universe.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_cover_solver::{InvalidInput, ProblemData};
    ///
    /// let problem = ProblemData::new(1..=3, [('a', vec![1, 2]), ('b', vec![3])]);
    /// assert!(problem.is_ok());
    ///
    /// let problem = ProblemData::new(1..=3, [('a', vec![1, 4])]);
    /// assert_eq!(
    ///     problem.unwrap_err(),
    ///     InvalidInput::UnknownElement { subset: 0, position: 1 }
    /// );
    /// ```
    pub fn new<U, C, T>(universe: U, collection: C) -> Result<Self, InvalidInput>
    where
        U: IntoIterator<Item = E>,
        C: IntoIterator<Item = (S, T)>,
        T: IntoIterator<Item = E>,
    {
        let universe: Vec<E> = universe.into_iter().collect();
        if universe.is_empty() {
            return Err(InvalidInput::EmptyUniverse);
        }
        let mut columns = FxHashMap::default();
        columns.reserve(universe.len());
        for (position, element) in universe.iter().enumerate() {
            if columns.insert(element, position).is_some() {
                return Err(InvalidInput::DuplicateElement { position });
            }
        }

        let mut ids = Vec::new();
        let mut subsets = Vec::new();
        let mut positions = Vec::new();
        let mut rows = FxHashMap::default();
        let mut seen = FxHashSet::default();
        for (row, (id, subset)) in collection.into_iter().enumerate() {
            if rows.insert(id.clone(), row).is_some() {
                return Err(InvalidInput::DuplicateSubsetId { subset: row });
            }
            let subset: Vec<E> = subset.into_iter().collect();
            if subset.is_empty() {
                return Err(InvalidInput::EmptySubset { subset: row });
            }
            seen.clear();
            let mut row_positions = Vec::with_capacity(subset.len());
            for (position, element) in subset.iter().enumerate() {
                let &column = columns.get(element).ok_or(InvalidInput::UnknownElement {
                    subset: row,
                    position,
                })?;
                if !seen.insert(column) {
                    return Err(InvalidInput::DuplicateSubsetElement {
                        subset: row,
                        position,
                    });
                }
                row_positions.push(column);
            }
            ids.push(id);
            subsets.push(subset);
            positions.push(row_positions);
        }
        if subsets.is_empty() {
            return Err(InvalidInput::EmptyCollection);
        }

        debug!(
            "validated exact cover problem with {} elements and {} subsets",
            universe.len(),
            subsets.len()
        );
        Ok(Self {
            universe,
            ids,
            subsets,
            positions,
            rows,
        })
    }

    /// Returns the elements of the subset with the given identifier, if any.
    pub fn subset(&self, id: &S) -> Option<&[E]> {
        self.rows.get(id).map(|&row| self.subsets[row].as_slice())
    }

    /// Iterates over the contents of the subsets chosen by a solution, in
    /// the order in which they appear in the solution. Identifiers that are
    /// not part of this problem are skipped.
    pub fn subsets_of<'a>(
        &'a self,
        solution: &'a Solution<S>,
    ) -> impl Iterator<Item = (&'a S, &'a [E])> + 'a {
        solution
            .iter()
            .filter_map(move |id| self.subset(id).map(|subset| (id, subset)))
    }

    /// Returns whether the subsets named by `solution` partition the universe,
    /// that is, whether every element is covered by exactly one of them.
    pub fn is_exact_cover(&self, solution: &Solution<S>) -> bool {
        let mut covered = vec![false; self.universe.len()];
        for id in solution.iter() {
            let Some(&row) = self.rows.get(id) else {
                return false;
            };
            for &column in &self.positions[row] {
                if std::mem::replace(&mut covered[column], true) {
                    return false; // The element is covered twice.
                }
            }
        }
        covered.into_iter().all(|c| c)
    }
}

impl<E, S> ProblemData<E, S> {
    /// Returns the elements to be covered.
    pub fn universe(&self) -> &[E] {
        &self.universe
    }

    /// Returns the number of subsets in the collection.
    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }

    /// Iterates over the `(id, subset)` pairs of the collection, in the order
    /// in which they were given.
    pub fn subsets(&self) -> impl Iterator<Item = (&S, &[E])> {
        self.ids
            .iter()
            .zip(self.subsets.iter().map(Vec::as_slice))
    }

    /// Returns the total number of element occurrences across all subsets,
    /// which is the number of data nodes in a [`LinkedMatrix`].
    ///
    /// [`LinkedMatrix`]: crate::LinkedMatrix
    pub fn occurrences(&self) -> usize {
        self.positions.iter().map(Vec::len).sum()
    }

    /// Returns the subset identifiers, indexed by row.
    pub(crate) fn ids(&self) -> &[S] {
        &self.ids
    }

    /// Returns the universe positions of the elements of the subset at the
    /// given row, in the order in which the subset lists them.
    ///
    /// # Panics
    ///
    /// This function panics if the row is out of bounds.
    pub(crate) fn positions(&self, row: RowIndex) -> &[usize] {
        &self.positions[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knuth() -> ProblemData<u8, char> {
        ProblemData::new(
            1..=7,
            [
                ('A', vec![1, 4, 7]),
                ('B', vec![1, 4]),
                ('C', vec![4, 5, 7]),
                ('D', vec![3, 5, 6]),
                ('E', vec![2, 3, 6, 7]),
                ('F', vec![2, 7]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn accepts_valid_problem() {
        let problem = knuth();
        assert_eq!(problem.universe(), &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(problem.subset_count(), 6);
        assert_eq!(problem.occurrences(), 17);
        assert_eq!(problem.subset(&'E'), Some(&[2, 3, 6, 7][..]));
        assert_eq!(problem.subset(&'Z'), None);
        assert_eq!(problem.positions(4), &[1, 2, 5, 6]);
        assert_eq!(problem.ids()[3], 'D');
    }

    #[test]
    fn accepts_string_elements() {
        let problem = ProblemData::new(
            ["Make", "Pera", "Mä"],
            [
                ("1st", vec!["Make", "Pera"]),
                ("2nd", vec!["Pera", "Mä"]),
                ("3rd", vec!["Mä", "Make"]),
            ],
        )
        .unwrap();
        let ids: Vec<_> = problem.subsets().map(|(id, _)| *id).collect();
        assert_eq!(ids, ["1st", "2nd", "3rd"]);
        assert_eq!(problem.positions(2), &[2, 0]);
    }

    #[test]
    fn rejects_empty_universe() {
        let problem = ProblemData::new(Vec::<u8>::new(), [(0, vec![1])]);
        assert_eq!(problem.unwrap_err(), InvalidInput::EmptyUniverse);
    }

    #[test]
    fn rejects_empty_collection() {
        let problem = ProblemData::<u8, u8>::new([1, 2], Vec::<(u8, Vec<u8>)>::new());
        assert_eq!(problem.unwrap_err(), InvalidInput::EmptyCollection);
    }

    #[test]
    fn rejects_duplicate_universe_elements() {
        let problem = ProblemData::new([1, 2, 3, 2], [(0, vec![1])]);
        assert_eq!(
            problem.unwrap_err(),
            InvalidInput::DuplicateElement { position: 3 }
        );
    }

    #[test]
    fn rejects_duplicate_subset_ids() {
        let problem = ProblemData::new([1, 2], [('x', vec![1]), ('y', vec![2]), ('x', vec![2])]);
        assert_eq!(
            problem.unwrap_err(),
            InvalidInput::DuplicateSubsetId { subset: 2 }
        );
    }

    #[test]
    fn rejects_empty_subsets() {
        let problem = ProblemData::new([1, 2], [(0, vec![1, 2]), (1, vec![])]);
        assert_eq!(problem.unwrap_err(), InvalidInput::EmptySubset { subset: 1 });
    }

    #[test]
    fn rejects_duplicate_subset_elements() {
        let problem = ProblemData::new([1, 2, 3], [(0, vec![3, 1, 3])]);
        assert_eq!(
            problem.unwrap_err(),
            InvalidInput::DuplicateSubsetElement {
                subset: 0,
                position: 2
            }
        );
    }

    #[test]
    fn rejects_elements_outside_universe() {
        let problem = ProblemData::new([1, 2, 3], [(0, vec![1]), (1, vec![2, 9])]);
        assert_eq!(
            problem.unwrap_err(),
            InvalidInput::UnknownElement {
                subset: 1,
                position: 1
            }
        );
    }

    #[test]
    fn checks_partition_property() {
        let problem = knuth();
        assert!(problem.is_exact_cover(&Solution::new(vec!['B', 'D', 'F'])));
        assert!(problem.is_exact_cover(&Solution::new(vec!['F', 'B', 'D'])));
        // Element 4 is covered twice.
        assert!(!problem.is_exact_cover(&Solution::new(vec!['A', 'B', 'D', 'F'])));
        // Elements 2 and 7 are not covered.
        assert!(!problem.is_exact_cover(&Solution::new(vec!['B', 'D'])));
        assert!(!problem.is_exact_cover(&Solution::new(vec!['B', 'D', 'Q'])));
    }

    #[test]
    fn translates_solutions_into_subsets() {
        let problem = knuth();
        let solution = Solution::new(vec!['B', 'F', 'D']);
        let subsets: Vec<_> = problem.subsets_of(&solution).collect();
        assert_eq!(
            subsets,
            [
                (&'B', &[1, 4][..]),
                (&'F', &[2, 7][..]),
                (&'D', &[3, 5, 6][..])
            ]
        );
    }
}
