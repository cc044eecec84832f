use crate::indices::{ColumnIndex, NodeIndex, RowIndex};
use crate::solution::Solutions;
use crate::{Algorithm, ProblemData, Solution};
use log::debug;
use std::hash::Hash;

/// A column header in the horizontal list of a [`LinkedMatrix`].
#[derive(Copy, Clone)]
pub(crate) struct Column {
    /// The previous column in the (horizontal) list of active columns, in
    /// cyclic order. The contents of this variable are preserved when the
    /// column is removed from such linked list, which is what makes it
    /// possible to put the column back later.
    ///
    /// This field corresponds to the `L` pointer in Knuth's data structure.
    left: ColumnIndex,
    /// The next column in the list of active columns, in cyclic order. (See
    /// `self.left` for details.)
    ///
    /// This field corresponds to the `R` pointer in Knuth's data structure.
    right: ColumnIndex,
    /// The number of data nodes currently attached to the vertical list of
    /// this column.
    ///
    /// This field corresponds to the `S` member in Knuth's data structure.
    size: usize,
}

/// The position of the root in the `columns` table of a [`LinkedMatrix`].
/// The root is the head of the list of active columns, but never a column
/// itself.
pub(crate) const ROOT: ColumnIndex = ColumnIndex::new(0);

/// A node in the toroidal data structure of a [`LinkedMatrix`]: either the
/// head of the vertical list of a column, or a data node that represents
/// the membership of one subset in one column.
#[derive(Copy, Clone)]
pub(crate) struct Node {
    /// The previous node in the vertical list of `column`, in cyclic order.
    ///
    /// This field corresponds to the `U` pointer in Knuth's data structure.
    up: NodeIndex,
    /// The next node in the vertical list of `column`, in cyclic order.
    ///
    /// This field corresponds to the `D` pointer in Knuth's data structure.
    down: NodeIndex,
    /// The previous node of the same subset, in cyclic order. Heads link
    /// to themselves.
    ///
    /// This field corresponds to the `L` pointer in Knuth's data structure.
    left: NodeIndex,
    /// The next node of the same subset, in cyclic order. Heads link
    /// to themselves.
    ///
    /// This field corresponds to the `R` pointer in Knuth's data structure.
    right: NodeIndex,
    /// The column of the vertical list that contains this node.
    ///
    /// This field corresponds to the `C` pointer in Knuth's data structure.
    column: ColumnIndex,
    /// The subset to which this node belongs, or [`None`] if the node is
    /// the head of a vertical list.
    row: Option<RowIndex>,
}

impl Node {
    /// Creates the head of an empty vertical list.
    fn head(column: ColumnIndex) -> Self {
        let ix = column.head();
        Self {
            up: ix,
            down: ix,
            left: ix,
            right: ix,
            column,
            row: None,
        }
    }
}

/// The dancing links realization of the incidence matrix of an exact cover
/// problem, as described by D. E. Knuth in the paper "Dancing links",
/// [arXiv:cs/0011047][dl] [cs.DS] (2000).
///
/// Every element of the universe is a column, and every subset is a row.
/// The nodes live in a sequential table and refer to each other by index,
/// so detaching a node from its lists never frees its record; the links
/// of a detached node still point to its former neighbors, and attaching
/// it again restores the lists exactly.
///
/// [dl]: https://arxiv.org/pdf/cs/0011047.pdf
pub struct LinkedMatrix<'p, E, S> {
    /// The problem whose incidence matrix this structure represents.
    problem: &'p ProblemData<E, S>,
    /// The root followed by one header per element of the universe, some of
    /// which are uncovered and consequently appear in the active list.
    columns: Vec<Column>,
    /// The heads of the vertical lists, one per entry of `columns` (the root
    /// included), followed by the data nodes of every subset. The nodes of
    /// a subset occupy consecutive positions, in the order in which the
    /// subset lists its elements.
    nodes: Vec<Node>,
}

impl<'p, E, S> crate::IncidenceMatrix<'p, E, S> for LinkedMatrix<'p, E, S>
where
    E: Hash + Eq,
    S: Hash + Eq + Clone,
{
    const ALGORITHM: Algorithm = Algorithm::DancingLinks;

    fn new(problem: &'p ProblemData<E, S>) -> Self {
        // Construct the horizontal list, in the order of the universe.
        let n = problem.universe().len();
        let columns = (0..=n)
            .map(|ix| Column {
                left: ColumnIndex::new(if ix == 0 { n } else { ix - 1 }),
                right: ColumnIndex::new(if ix == n { 0 } else { ix + 1 }),
                size: 0,
            })
            .collect();
        let mut nodes = Vec::with_capacity(n + 1 + problem.occurrences());
        nodes.extend((0..=n).map(|ix| Node::head(ColumnIndex::new(ix))));
        let mut matrix = Self {
            problem,
            columns,
            nodes,
        };
        for row in 0..problem.subset_count() {
            matrix.append_row(row);
        }
        debug!(
            "built dancing links matrix with {} columns and {} data nodes",
            n,
            matrix.nodes.len() - n - 1
        );
        matrix
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

impl<'p, E, S> LinkedMatrix<'p, E, S>
where
    E: Hash + Eq,
    S: Hash + Eq + Clone,
{
    /// Appends one data node per element of the subset at the given row to
    /// the bottom of the vertical lists of the corresponding columns, and
    /// links the new nodes together into a horizontal list.
    fn append_row(&mut self, row: RowIndex) {
        let problem = self.problem;
        let positions = problem.positions(row);
        let first = self.nodes.len();
        let last = first + positions.len() - 1;
        for (offset, &position) in positions.iter().enumerate() {
            let ix = NodeIndex::new(first + offset);
            let column = ColumnIndex::of_element(position);
            let head = column.head();
            let bottom = self.node(head).up;
            self.node_mut(bottom).down = ix;
            self.node_mut(head).up = ix;
            self.column_mut(column).size += 1;
            self.nodes.push(Node {
                up: bottom,
                down: head,
                left: NodeIndex::new(if offset == 0 { last } else { ix.get() - 1 }),
                right: NodeIndex::new(if ix.get() == last { first } else { ix.get() + 1 }),
                column,
                row: Some(row),
            });
        }
    }

    /// Runs Algorithm X on the active part of the matrix. The rows chosen
    /// so far are in `partial`.
    fn search(&mut self, partial: &mut Vec<RowIndex>, solutions: &mut Solutions<'p, S>) {
        let Some(column) = self.choose_column() else {
            // Every element has been covered.
            solutions.record(partial);
            return;
        };
        if self.column(column).size == 0 {
            // No subset can cover this element; backtrack.
            return;
        }
        self.cover(column);
        let head = column.head();
        let mut row_ix = self.node(head).down;
        while row_ix != head {
            let row = self
                .node(row_ix)
                .row
                .expect("vertical list should only contain data nodes below its head");
            partial.push(row);
            // Cover the other columns of the row, from left to right.
            let mut cur_ix = self.node(row_ix).right;
            while cur_ix != row_ix {
                self.cover(self.node(cur_ix).column);
                cur_ix = self.node(cur_ix).right;
            }
            self.search(partial, solutions);
            // Uncover them in the opposite order.
            let mut cur_ix = self.node(row_ix).left;
            while cur_ix != row_ix {
                self.uncover(self.node(cur_ix).column);
                cur_ix = self.node(cur_ix).left;
            }
            partial.pop();
            row_ix = self.node(row_ix).down;
        }
        self.uncover(column);
    }
}

impl<'p, E, S> LinkedMatrix<'p, E, S> {
    /// Finds an active column whose vertical list has minimum length. Ties
    /// are broken by the position of the column in the horizontal list of
    /// active columns.
    ///
    /// Returns `None` if all columns have been covered.
    fn choose_column(&self) -> Option<ColumnIndex> {
        let mut min_size = usize::MAX;
        let mut min_ix = None;
        let mut cur_ix = self.column(ROOT).right;
        while cur_ix != ROOT {
            let column = self.column(cur_ix);
            if column.size < min_size {
                // An empty column is surely the result.
                if column.size == 0 {
                    return Some(cur_ix);
                }
                min_size = column.size;
                min_ix = Some(cur_ix);
            }
            cur_ix = column.right;
        }
        min_ix
    }

    /// Removes a column from the list of columns remaining to be covered, and
    /// detaches every other node of the rows in its vertical list from their
    /// own columns. Rows are visited from top to bottom, and the nodes of
    /// each row from left to right.
    fn cover(&mut self, ix: ColumnIndex) {
        let Column { left, right, .. } = *self.column(ix);
        self.column_mut(left).right = right;
        self.column_mut(right).left = left;

        let head = ix.head();
        let mut row_ix = self.node(head).down;
        while row_ix != head {
            let mut cur_ix = self.node(row_ix).right;
            while cur_ix != row_ix {
                self.detach(cur_ix);
                cur_ix = self.node(cur_ix).right;
            }
            row_ix = self.node(row_ix).down;
        }
    }

    /// Undoes the updates made by the last [covering](`Self::cover`) of the
    /// given column. The rows are visited from bottom to top and the nodes
    /// of each row from right to left, which is the only order that restores
    /// every link and every size exactly.
    fn uncover(&mut self, ix: ColumnIndex) {
        let head = ix.head();
        let mut row_ix = self.node(head).up;
        while row_ix != head {
            let mut cur_ix = self.node(row_ix).left;
            while cur_ix != row_ix {
                self.attach(cur_ix);
                cur_ix = self.node(cur_ix).left;
            }
            row_ix = self.node(row_ix).up;
        }

        let Column { left, right, .. } = *self.column(ix);
        self.column_mut(left).right = ix;
        self.column_mut(right).left = ix;
    }

    /// Removes a data node from the vertical list of its column, leaving its
    /// own links untouched.
    fn detach(&mut self, ix: NodeIndex) {
        let Node {
            up, down, column, ..
        } = *self.node(ix);
        self.node_mut(up).down = down;
        self.node_mut(down).up = up;
        let column = self.column_mut(column);
        debug_assert!(column.size > 0, "column size must not underflow");
        column.size -= 1;
    }

    /// Puts a [detached](`Self::detach`) data node back into its former
    /// position in the vertical list of its column.
    fn attach(&mut self, ix: NodeIndex) {
        let Node {
            up, down, column, ..
        } = *self.node(ix);
        self.column_mut(column).size += 1;
        self.node_mut(up).down = ix;
        self.node_mut(down).up = ix;
    }

    /// Returns the element whose column would be chosen for branching at
    /// the next step of the search, or [`None`] if every element has been
    /// covered.
    pub fn next_column(&self) -> Option<&'p E> {
        let column = self.choose_column()?.element()?;
        Some(&self.problem.universe()[column])
    }

    /// Returns the total number of data nodes attached to the active columns.
    pub fn attached_count(&self) -> usize {
        let mut count = 0;
        let mut cur_ix = self.column(ROOT).right;
        while cur_ix != ROOT {
            let column = self.column(cur_ix);
            count += column.size;
            cur_ix = column.right;
        }
        count
    }

    /// Returns `true` if every column has been removed from the list of
    /// active columns.
    pub fn is_empty(&self) -> bool {
        self.column(ROOT).right == ROOT
    }

    // Accessor methods.

    /// Returns a reference to the column at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    fn column(&self, ix: ColumnIndex) -> &Column {
        &self.columns[ix.get()]
    }

    /// Returns a mutable reference to the column at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    fn column_mut(&mut self, ix: ColumnIndex) -> &mut Column {
        &mut self.columns[ix.get()]
    }

    /// Returns a reference to the node at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    fn node(&self, ix: NodeIndex) -> &Node {
        &self.nodes[ix.get()]
    }

    /// Returns a mutable reference to the node at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    fn node_mut(&mut self, ix: NodeIndex) -> &mut Node {
        &mut self.nodes[ix.get()]
    }
}
