/// The position of a column header in the `columns` table of a
/// [`LinkedMatrix`].
///
/// Position 0 is reserved for the root, the head of the horizontal list
/// of active columns; the column for the $k$th element of the universe
/// lives at position $k+1$. A column header doubles as the head node of
/// its vertical list, so a column index is also a valid [`NodeIndex`].
///
/// [`LinkedMatrix`]: `crate::LinkedMatrix`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the column for the element at the given position of the
    /// universe.
    #[must_use]
    pub const fn of_element(position: usize) -> Self {
        Self(position + 1)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the position in the universe of the element represented by
    /// this column, or [`None`] if this is the root.
    #[must_use]
    pub const fn element(self) -> Option<usize> {
        self.0.checked_sub(1)
    }

    /// Returns the head node of the vertical list for this column.
    #[must_use]
    pub const fn head(self) -> NodeIndex {
        NodeIndex(self.0)
    }
}

/// The position of a node in the `nodes` arena of a [`LinkedMatrix`].
///
/// The first records of the arena are the heads of the vertical lists,
/// one per [`ColumnIndex`]; the data nodes of the subsets follow them
/// in the order of the subset collection.
///
/// [`LinkedMatrix`]: `crate::LinkedMatrix`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// The position of a subset in the collection of a [`ProblemData`].
///
/// Both incidence structures work with row positions internally and only
/// translate them back to subset identifiers when a solution is recorded.
///
/// [`ProblemData`]: `crate::ProblemData`
pub type RowIndex = usize;
