//! This crate provides two implementations of D. E. Knuth's Algorithm X for
//! solving the exact cover problem.
//!
//! Suppose we're given a _universe_ $U$ of elements and a collection
//! $\mathcal{S}$ of named subsets of $U$; the _exact cover_ problem is to find
//! a subcollection $\mathcal{S}^\star\subseteq\mathcal{S}$ of subsets such that
//! each element of $U$ occurs in exactly one of $\mathcal{S}^\star$'s subsets.
//! Knuth proposed a method that achieves this goal in the paper "Dancing Links",
//! [arXiv:cs/0011047][dl] [cs.DS] (2000), whose title refers to a clever yet
//! simple technique for deleting and restoring the nodes of a doubly linked
//! list. His backtracking scheme, called _Algorithm X_, repeatedly chooses
//! the element with the fewest remaining candidates, tries each subset that
//! contains it, and removes every subset that conflicts with that choice
//! before going one level deeper. [For further information, see Section
//! 7.2.2.1 of [_The Art of Computer Programming_ **4B** (2022)][taocp4b],
//! Part 2, 65–70.]
//!
//! Many problems reduce to exact cover: tiling a board with polyominoes,
//! completing a sudoku grid, placing queens on a chessboard, and so on. The
//! producers of such reductions build a [`ProblemData`], and consumers map the
//! returned [`Solution`]s back to the subsets they chose.
//!
//! The following structures are the most important pieces of this crate:
//! - [`LinkedMatrix`] stores the incidence matrix of the problem as circular
//!   doubly linked lists, and runs Algorithm X by "dancing" their links.
//! - [`SetMatrix`] stores the same matrix as a hash map from elements to the
//!   sets of subsets that contain them.
//!
//! Both find exactly the same solutions. [`Algorithm`] selects one of them
//! by name, which is convenient when the choice is made at runtime.
//!
//! # Examples
//!
//! Knuth's toy problem from the "Dancing Links" paper has a unique solution:
//!
//! ```
//! use exact_cover_solver::{Algorithm, ProblemData};
//!
//! let problem = ProblemData::new(
//!     1..=7,
//!     [
//!         ('A', vec![1, 4, 7]),
//!         ('B', vec![1, 4]),
//!         ('C', vec![4, 5, 7]),
//!         ('D', vec![3, 5, 6]),
//!         ('E', vec![2, 3, 6, 7]),
//!         ('F', vec![2, 7]),
//!     ],
//! )?;
//!
//! let algorithm: Algorithm = "DLX".parse()?;
//! let solutions = algorithm.solve(algorithm.build(&problem))?;
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].canonical(), ['B', 'D', 'F']);
//! assert!(problem.is_exact_cover(&solutions[0]));
//! # Ok::<(), exact_cover_solver::Error>(())
//! ```
//!
//! [dl]: https://arxiv.org/pdf/cs/0011047.pdf
//! [taocp4b]: https://www-cs-faculty.stanford.edu/~knuth/taocp.html#vol4

mod dl;
mod error;
mod indices;
mod parse;
mod problem;
mod sets;
mod solution;

pub use dl::LinkedMatrix;
pub use error::{Error, InvalidInput, ParseError};
pub use problem::ProblemData;
pub use sets::SetMatrix;
pub use solution::Solution;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// An incidence structure on which Algorithm X can search for exact covers.
///
/// A structure is built once per search from a validated [`ProblemData`], it
/// is mutated in place while the search runs, and it is consumed when the
/// search is over.
///
/// This trait is sealed, meaning that it cannot be implemented outside of the
/// `exact-cover-solver` crate.
///
/// # Examples
///
/// ```
/// use exact_cover_solver::{IncidenceMatrix, LinkedMatrix, ProblemData, SetMatrix};
///
/// let problem = ProblemData::new(
///     1..=7,
///     [
///         (1, vec![4, 7]),
///         (2, vec![3]),
///         (3, vec![2, 6]),
///         (4, vec![1, 3, 5]),
///         (5, vec![1, 4, 5, 7]),
///         (6, vec![1, 2, 4, 5, 6, 7]),
///     ],
/// )?;
/// assert_eq!(LinkedMatrix::new(&problem).solve().len(), 3);
/// assert_eq!(SetMatrix::new(&problem).solve().len(), 3);
/// # Ok::<(), exact_cover_solver::InvalidInput>(())
/// ```
pub trait IncidenceMatrix<'p, E, S>: private::Sealed {
    /// The algorithm that searches this kind of structure.
    const ALGORITHM: Algorithm;

    /// Builds the structure for the given problem, in time proportional to
    /// the total number of element occurrences in its subsets.
    fn new(problem: &'p ProblemData<E, S>) -> Self;

    /// Visits all exact covers of the problem and returns them in the order
    /// in which the depth-first search finds them. An empty list means that
    /// the problem has no solution.
    fn solve(self) -> Vec<Solution<S>>;
}

pub(crate) mod private {
    pub trait Sealed {}

    impl<E, S> Sealed for crate::LinkedMatrix<'_, E, S> {}
    impl<E, S> Sealed for crate::SetMatrix<'_, E, S> {}
}

/// The implementations of Algorithm X provided by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Algorithm X on a [`LinkedMatrix`].
    #[default]
    DancingLinks,
    /// Algorithm X on a [`SetMatrix`].
    HashSets,
}

impl Algorithm {
    /// Every algorithm, in the order in which [`Error::UnknownAlgorithm`]
    /// lists their names.
    pub const ALL: [Algorithm; 2] = [Algorithm::DancingLinks, Algorithm::HashSets];

    /// Returns the name under which the algorithm can be [parsed](`FromStr`).
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::DancingLinks => "DLX",
            Algorithm::HashSets => "DictX",
        }
    }

    /// Returns an alternative, descriptive name of the algorithm, which is
    /// also accepted by the parser.
    const fn alias(self) -> &'static str {
        match self {
            Algorithm::DancingLinks => "dancing-links",
            Algorithm::HashSets => "hash-sets",
        }
    }

    /// Builds the incidence structure searched by this algorithm.
    pub fn build<'p, E, S>(self, problem: &'p ProblemData<E, S>) -> Matrix<'p, E, S>
    where
        E: Hash + Eq,
        S: Hash + Eq + Clone,
    {
        match self {
            Algorithm::DancingLinks => Matrix::Linked(LinkedMatrix::new(problem)),
            Algorithm::HashSets => Matrix::Sets(SetMatrix::new(problem)),
        }
    }

    /// Visits all exact covers of the problem represented by `matrix`.
    ///
    /// Fails with [`Error::StructureMismatch`] if `matrix` was built for the
    /// other algorithm; no search takes place in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_cover_solver::{Algorithm, Error, ProblemData};
    ///
    /// let problem = ProblemData::new(1..=2, [("x", vec![1]), ("y", vec![2])])?;
    /// let matrix = Algorithm::HashSets.build(&problem);
    /// assert_eq!(
    ///     Algorithm::DancingLinks.solve(matrix).unwrap_err(),
    ///     Error::StructureMismatch {
    ///         algorithm: Algorithm::DancingLinks,
    ///         matrix: Algorithm::HashSets,
    ///     }
    /// );
    /// # Ok::<(), exact_cover_solver::Error>(())
    /// ```
    pub fn solve<E, S>(self, matrix: Matrix<'_, E, S>) -> Result<Vec<Solution<S>>, Error>
    where
        E: Hash + Eq,
        S: Hash + Eq + Clone,
    {
        match (self, matrix) {
            (Algorithm::DancingLinks, Matrix::Linked(matrix)) => Ok(matrix.solve()),
            (Algorithm::HashSets, Matrix::Sets(matrix)) => Ok(matrix.solve()),
            (algorithm, matrix) => Err(Error::StructureMismatch {
                algorithm,
                matrix: matrix.algorithm(),
            }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parses the [name](`Algorithm::name`) of an algorithm, ignoring ASCII
    /// case. The descriptive names `dancing-links` and `hash-sets` are also
    /// recognized.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| {
                name.eq_ignore_ascii_case(algorithm.name())
                    || name.eq_ignore_ascii_case(algorithm.alias())
            })
            .ok_or_else(|| Error::UnknownAlgorithm {
                name: name.to_owned(),
                valid: Algorithm::ALL.iter().map(|a| a.name()).collect(),
            })
    }
}

/// An incidence structure built for one of the [algorithms](`Algorithm`).
pub enum Matrix<'p, E, S> {
    /// A dancing-links matrix, searched by [`Algorithm::DancingLinks`].
    Linked(LinkedMatrix<'p, E, S>),
    /// A hash-set matrix, searched by [`Algorithm::HashSets`].
    Sets(SetMatrix<'p, E, S>),
}

impl<E, S> Matrix<'_, E, S> {
    /// Returns the algorithm that can search this structure.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Matrix::Linked(_) => Algorithm::DancingLinks,
            Matrix::Sets(_) => Algorithm::HashSets,
        }
    }
}

impl<'p, E, S> From<LinkedMatrix<'p, E, S>> for Matrix<'p, E, S> {
    fn from(matrix: LinkedMatrix<'p, E, S>) -> Self {
        Matrix::Linked(matrix)
    }
}

impl<'p, E, S> From<SetMatrix<'p, E, S>> for Matrix<'p, E, S> {
    fn from(matrix: SetMatrix<'p, E, S>) -> Self {
        Matrix::Sets(matrix)
    }
}

/// Visits all exact covers of a problem with the given algorithm.
///
/// This is a shorthand for building the structure of `algorithm` and then
/// solving it, which cannot fail.
pub fn solve<E, S>(problem: &ProblemData<E, S>, algorithm: Algorithm) -> Vec<Solution<S>>
where
    E: Hash + Eq,
    S: Hash + Eq + Clone,
{
    match algorithm {
        Algorithm::DancingLinks => LinkedMatrix::new(problem).solve(),
        Algorithm::HashSets => SetMatrix::new(problem).solve(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    fn universe() -> Vec<u8> {
        (1..=7).collect()
    }

    /// Returns the solutions as a set of sets of subset identifiers.
    fn solution_sets<S: Ord + Clone>(solutions: &[Solution<S>]) -> BTreeSet<Vec<S>> {
        solutions.iter().map(Solution::canonical).collect()
    }

    fn assert_partitions<E: Hash + Eq, S: Hash + Eq + Clone>(
        problem: &ProblemData<E, S>,
        solutions: &[Solution<S>],
    ) {
        for solution in solutions {
            assert!(problem.is_exact_cover(solution));
        }
    }

    #[test]
    fn finds_single_solution() {
        let problem = ProblemData::new(
            universe(),
            [
                ('A', vec![1, 4, 7]),
                ('B', vec![1, 4]),
                ('C', vec![4, 5, 7]),
                ('D', vec![3, 5, 6]),
                ('E', vec![2, 3, 6, 7]),
                ('F', vec![2, 7]),
            ],
        )
        .unwrap();
        for algorithm in Algorithm::ALL {
            let solutions = solve(&problem, algorithm);
            assert_eq!(solutions.len(), 1, "{algorithm}");
            assert_eq!(solutions[0].canonical(), ['B', 'D', 'F']);
            assert_partitions(&problem, &solutions);
        }
    }

    #[test]
    fn finds_no_solution_when_an_element_is_never_covered() {
        let problem = ProblemData::new(
            universe(),
            [
                ('A', vec![1, 6, 7]),
                ('B', vec![2, 6, 7]),
                ('C', vec![3, 6, 7]),
                ('D', vec![4, 6, 7]),
            ],
        )
        .unwrap();
        for algorithm in Algorithm::ALL {
            assert!(solve(&problem, algorithm).is_empty(), "{algorithm}");
        }
    }

    #[test]
    fn finds_all_solutions() {
        let problem = ProblemData::new(
            universe(),
            [
                (1, vec![4, 7]),
                (2, vec![3]),
                (3, vec![2, 6]),
                (4, vec![1, 3, 5]),
                (5, vec![1, 4, 5, 7]),
                (6, vec![1, 2, 4, 5, 6, 7]),
            ],
        )
        .unwrap();
        let expected = BTreeSet::from([vec![1, 3, 4], vec![2, 3, 5], vec![2, 6]]);
        for algorithm in Algorithm::ALL {
            let solutions = solve(&problem, algorithm);
            assert_eq!(solutions.len(), 3, "{algorithm}");
            assert_eq!(solution_sets(&solutions), expected);
            assert_partitions(&problem, &solutions);
        }
    }

    #[test]
    fn finds_solutions_in_depth_first_order() {
        let problem =
            ProblemData::new([1, 2], [('a', vec![1]), ('b', vec![2]), ('c', vec![1, 2])])
                .unwrap();
        for algorithm in Algorithm::ALL {
            let solutions: Vec<_> = solve(&problem, algorithm)
                .into_iter()
                .map(Solution::into_ids)
                .collect();
            assert_eq!(solutions, [vec!['a', 'b'], vec!['c']], "{algorithm}");
        }
    }

    #[test]
    fn repeated_searches_do_not_interfere() {
        let problem = ProblemData::new([1, 2], [(0, vec![1]), (1, vec![2])]).unwrap();
        for algorithm in Algorithm::ALL {
            let first = solve(&problem, algorithm);
            let second = solve(&problem, algorithm);
            assert_eq!(first, second);
            assert_eq!(first.len(), 1);
        }
    }

    #[test]
    fn algorithms_agree_on_random_problems() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let n = rng.gen_range(1..=9);
            let m = rng.gen_range(1..=14);
            let mut collection = Vec::new();
            for id in 0..m {
                let subset: Vec<usize> = (0..n).filter(|_| rng.gen_bool(0.35)).collect();
                if !subset.is_empty() {
                    collection.push((id, subset));
                }
            }
            if collection.is_empty() {
                continue;
            }
            let problem = ProblemData::new(0..n, collection).unwrap();
            let linked = solve(&problem, Algorithm::DancingLinks);
            let sets = solve(&problem, Algorithm::HashSets);
            assert_eq!(solution_sets(&linked), solution_sets(&sets));
            assert_eq!(linked.len(), sets.len());
            assert_partitions(&problem, &linked);
        }
    }

    #[test]
    fn rejects_mismatched_structures() {
        let problem = ProblemData::new([1], [(0, vec![1])]).unwrap();
        let matrix = Matrix::from(LinkedMatrix::new(&problem));
        assert_eq!(matrix.algorithm(), Algorithm::DancingLinks);
        assert_eq!(
            Algorithm::HashSets.solve(matrix).unwrap_err(),
            Error::StructureMismatch {
                algorithm: Algorithm::HashSets,
                matrix: Algorithm::DancingLinks,
            }
        );

        let matrix = Matrix::from(SetMatrix::new(&problem));
        assert!(Algorithm::HashSets.solve(matrix).is_ok());
    }

    #[test]
    fn builds_matching_structures() {
        let problem = ProblemData::new([1], [(0, vec![1])]).unwrap();
        for algorithm in Algorithm::ALL {
            let matrix = algorithm.build(&problem);
            assert_eq!(matrix.algorithm(), algorithm);
            assert_eq!(algorithm.solve(matrix).unwrap().len(), 1);
        }
    }

    /// Collects the messages logged by the whole test binary.
    struct Capture(std::sync::Mutex<Vec<String>>);

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            self.0.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(std::sync::Mutex::new(Vec::new()));

    #[test]
    fn logs_start_and_end_of_search() {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
        let problem = ProblemData::new([1, 2], [("x", vec![1]), ("y", vec![2])]).unwrap();
        for algorithm in Algorithm::ALL {
            solve(&problem, algorithm);
        }
        let messages = CAPTURE.0.lock().unwrap();
        for expected in [
            "DLX search started on 2 subsets",
            "DLX search finished with 1 solutions",
            "DictX search started on 2 subsets",
            "DictX search finished with 1 solutions",
        ] {
            assert!(messages.iter().any(|m| m == expected), "{expected}");
        }
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("DLX".parse::<Algorithm>(), Ok(Algorithm::DancingLinks));
        assert_eq!("dlx".parse::<Algorithm>(), Ok(Algorithm::DancingLinks));
        assert_eq!(" DictX ".parse::<Algorithm>(), Ok(Algorithm::HashSets));
        assert_eq!("dancing-links".parse::<Algorithm>(), Ok(Algorithm::DancingLinks));
        assert_eq!("Hash-Sets".parse::<Algorithm>(), Ok(Algorithm::HashSets));
        assert_eq!(Algorithm::default(), Algorithm::DancingLinks);
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn rejects_unknown_algorithm_names() {
        let error = "AlgorithmY".parse::<Algorithm>().unwrap_err();
        assert_eq!(
            error,
            Error::UnknownAlgorithm {
                name: "AlgorithmY".to_owned(),
                valid: vec!["DLX", "DictX"],
            }
        );
        assert_eq!(
            error.to_string(),
            "unknown algorithm `AlgorithmY`, expected one of: DLX, DictX"
        );
    }
}
