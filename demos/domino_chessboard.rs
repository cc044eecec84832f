//! This program determines in how many ways can 18 dominoes fill a $6\times6$
//! board, once with each implementation of Algorithm X. We set up an exact
//! cover problem with one element for each of the $6\times6=36$ cells, and
//! one subset for each placement of a domino.
//!
//! P. W. Kasteleyn obtained a closed formula for the number of domino coverings
//! of an $m\times n$ rectangle \[_Physica_ **27** (1961), pp. 1209–1225].
//! Interested readers can learn more by working out exercise 7.51 in the second
//! edition of the book _Concrete Mathematics_ (Addison–Wesley, 1994) by R. Graham,
//! D. E. Knuth and O. Patashnik.
use exact_cover_solver::{Algorithm, ProblemData};
use std::time::Instant;

/// The number $m$ of rows of the board, also known as _ranks_.
const ROWS: u8 = 6;

/// The number $n$ of columns of the board, also known as _files_.
const COLUMNS: u8 = 6;

fn main() {
    env_logger::init();

    // Generate all cells of an $m\times n$ board.
    let cells: Vec<_> = (0..ROWS)
        .flat_map(|x| (0..COLUMNS).map(move |y| (x, y)))
        .collect();

    // There's a subset for each pair of adjacent cells. We start with the
    // $m(n-1)$ horizontal placements,
    let mut dominoes = Vec::new();
    for x0 in 0..ROWS {
        for y0 in 0..COLUMNS - 1 {
            dominoes.push([(x0, y0), (x0, y0 + 1)]);
        }
    }
    // and continue with the $n(m-1)$ vertical ones. To reduce symmetry, insist
    // that the domino occupying the upper left cell is laid out horizontally.
    for y0 in 0..COLUMNS {
        for x0 in (y0 == 0) as u8..ROWS - 1 {
            dominoes.push([(x0, y0), (x0 + 1, y0)]);
        }
    }

    let problem = ProblemData::new(cells, dominoes.into_iter().enumerate())
        .expect("every domino should lie on the board");
    for algorithm in Algorithm::ALL {
        let start = Instant::now();
        let solutions = exact_cover_solver::solve(&problem, algorithm);
        // Count the number of solutions, taking symmetry into account.
        let count = 2 * solutions.len();
        println!("{algorithm}: {count} tilings in {:?}", start.elapsed());
        assert_eq!(count, 6728);
    }
}
