use std::slice;

/// An exact cover: the identifiers of pairwise disjoint subsets whose union
/// is the whole universe.
///
/// The identifiers appear in the order in which the search chose the
/// subsets, that is, by increasing depth in the search tree. This order is
/// deterministic but carries no meaning; use [`Solution::canonical`] to
/// compare solutions regardless of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution<S> {
    ids: Vec<S>,
}

impl<S> Solution<S> {
    /// Creates a solution from a list of subset identifiers.
    pub fn new(ids: Vec<S>) -> Self {
        Self { ids }
    }

    /// Returns the identifiers of the chosen subsets.
    pub fn ids(&self) -> &[S] {
        &self.ids
    }

    /// Returns the number of subsets in the solution.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the solution chooses no subsets.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over the identifiers of the chosen subsets.
    pub fn iter(&self) -> slice::Iter<'_, S> {
        self.ids.iter()
    }

    /// Consumes the solution, returning the identifiers of its subsets.
    pub fn into_ids(self) -> Vec<S> {
        self.ids
    }

    /// Returns whether the solution chooses the subset with identifier `id`.
    pub fn contains(&self, id: &S) -> bool
    where
        S: PartialEq,
    {
        self.ids.contains(id)
    }

    /// Returns the identifiers sorted in ascending order.
    ///
    /// Two solutions choose the same subsets if and only if their canonical
    /// forms are equal.
    pub fn canonical(&self) -> Vec<S>
    where
        S: Ord + Clone,
    {
        let mut ids = self.ids.clone();
        ids.sort_unstable();
        ids
    }
}

impl<S> IntoIterator for Solution<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a Solution<S> {
    type Item = &'a S;
    type IntoIter = slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// Collects the solutions found by a search, by translating the row stack
/// of the search into subset identifiers.
pub(crate) struct Solutions<'p, S> {
    /// The identifiers of the subsets, indexed by row.
    ids: &'p [S],
    found: Vec<Solution<S>>,
}

impl<'p, S: Clone> Solutions<'p, S> {
    pub(crate) fn new(ids: &'p [S]) -> Self {
        Self {
            ids,
            found: Vec::new(),
        }
    }

    /// Records a copy of the partial solution on top of the search stack,
    /// which has just been found to cover every element.
    pub(crate) fn record(&mut self, rows: &[usize]) {
        let ids = rows.iter().map(|&row| self.ids[row].clone()).collect();
        log::trace!("found solution #{} with rows {rows:?}", self.found.len() + 1);
        self.found.push(Solution::new(ids));
    }

    pub(crate) fn into_vec(self) -> Vec<Solution<S>> {
        self.found
    }
}
