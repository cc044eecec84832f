use crate::Algorithm;
use thiserror::Error;

/// Things that may go wrong when setting up or solving an exact cover problem.
///
/// Every error is detected synchronously, before the search starts; the
/// search itself cannot fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The universe or the subset collection violates one of the rules
    /// checked by [`ProblemData::new`].
    ///
    /// [`ProblemData::new`]: crate::ProblemData::new
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    /// A search was requested with an incidence structure that was built
    /// for the other algorithm.
    #[error("the {algorithm} algorithm cannot search a matrix built for {matrix}")]
    StructureMismatch {
        algorithm: Algorithm,
        matrix: Algorithm,
    },
    /// The requested algorithm name is not recognized.
    #[error("unknown algorithm `{name}`, expected one of: {}", .valid.join(", "))]
    UnknownAlgorithm {
        name: String,
        valid: Vec<&'static str>,
    },
    /// The textual description of a problem could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A violation of the invariants of a universe and its subset collection.
///
/// Positions are zero-based. We report positions instead of the offending
/// values so that elements and subset identifiers need not be printable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("the universe is empty")]
    EmptyUniverse,
    #[error("the subset collection is empty")]
    EmptyCollection,
    #[error("universe element at position {position} appears more than once")]
    DuplicateElement { position: usize },
    #[error("subset identifier at position {subset} is used more than once")]
    DuplicateSubsetId { subset: usize },
    #[error("subset at position {subset} is empty")]
    EmptySubset { subset: usize },
    #[error("subset at position {subset} repeats its element at position {position}")]
    DuplicateSubsetElement { subset: usize, position: usize },
    #[error("element at position {position} of subset {subset} is not in the universe")]
    UnknownElement { subset: usize, position: usize },
}

/// Failure to read a universe or a subset collection from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected a comma-separated list of integers, e.g. `1,2,3,4`, but found `{token}` in `{input}`")]
    Universe { input: String, token: String },
    #[error("expected subsets separated by semicolons, e.g. `1,3;2,4`, but found `{token}` in `{input}`")]
    Subset { input: String, token: String },
}
