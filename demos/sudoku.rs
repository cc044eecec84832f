//! This program completes a $9\times9$ sudoku grid by reducing it to an exact
//! cover problem. There are four kinds of constraints, each of which must be
//! satisfied exactly once:
//! - every cell $(r,c)$ holds a value;
//! - every row $r$ contains every value $v$;
//! - every column $c$ contains every value $v$;
//! - every $3\times3$ block $b$ contains every value $v$.
//!
//! Placing value $v$ into cell $(r,c)$ satisfies one constraint of each kind,
//! so there is one subset per placement. A cell that holds a clue contributes
//! only the placement of its clue; an empty cell contributes all nine.
//!
//! The puzzle is given as 81 characters in row-major order, with `0` or `.`
//! marking the empty cells; whitespace is ignored.
//!
//! ```text
//! cargo run --example sudoku -- "53..7.... 6..195... .98....6. ..." --algorithm DictX
//! ```
//!
//! Run with `RUST_LOG=debug` to see the size of the problem and the search.
use clap::Parser;
use exact_cover_solver::{Algorithm, ProblemData, Solution};
use std::process::ExitCode;
use thiserror::Error;

/// The side of the grid.
const N: u8 = 9;

/// The side of a block.
const B: u8 = 3;

/// A puzzle with a unique solution, taken from the Wikipedia article on
/// sudoku.
const WIKIPEDIA: &str = "53..7....\
                         6..195...\
                         .98....6.\
                         8...6...3\
                         4..8.3..1\
                         7...2...6\
                         .6....28.\
                         ...419..5\
                         ....8..79";

type Grid = [[u8; N as usize]; N as usize];

#[derive(Parser, Debug)]
#[command(name = "sudoku")]
#[command(about = "Complete a sudoku grid by reducing it to exact cover")]
struct Args {
    /// The 81 cells of the puzzle in row-major order, `0` or `.` if empty
    #[arg(default_value = WIKIPEDIA)]
    puzzle: String,

    /// Algorithm to search with (DLX or DictX)
    #[arg(short, long, default_value_t = Algorithm::DancingLinks)]
    algorithm: Algorithm,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum PuzzleError {
    #[error("expected 81 cells, found {0}")]
    Length(usize),
    #[error("cell {cell} holds `{found}`, expected a digit or `.`")]
    Cell { cell: usize, found: char },
}

/// Reads a grid, with zeros standing for the empty cells.
fn parse_puzzle(puzzle: &str) -> Result<Grid, PuzzleError> {
    let cells: Vec<char> = puzzle.chars().filter(|c| !c.is_whitespace()).collect();
    if cells.len() != usize::from(N * N) {
        return Err(PuzzleError::Length(cells.len()));
    }
    let mut grid = [[0; N as usize]; N as usize];
    for (cell, &found) in cells.iter().enumerate() {
        let value = match found {
            '.' => 0,
            _ => found
                .to_digit(10)
                .ok_or(PuzzleError::Cell { cell, found })? as u8,
        };
        grid[cell / N as usize][cell % N as usize] = value;
    }
    Ok(grid)
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
enum Constraint {
    Cell(u8, u8),
    Row(u8, u8),
    Column(u8, u8),
    Block(u8, u8),
}

/// Placing `value` at row `r` and column `c`.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
struct Placement {
    r: u8,
    c: u8,
    value: u8,
}

impl Placement {
    fn constraints(self) -> [Constraint; 4] {
        let Placement { r, c, value } = self;
        let block = (r / B) * B + c / B;
        [
            Constraint::Cell(r, c),
            Constraint::Row(r, value),
            Constraint::Column(c, value),
            Constraint::Block(block, value),
        ]
    }
}

/// Sets up the exact cover problem whose solutions complete `puzzle`.
fn sudoku_problem(puzzle: &Grid) -> ProblemData<Constraint, Placement> {
    let mut universe = Vec::new();
    for i in 0..N {
        for j in 0..N {
            let value = j + 1;
            universe.push(Constraint::Cell(i, j));
            universe.push(Constraint::Row(i, value));
            universe.push(Constraint::Column(i, value));
            universe.push(Constraint::Block(i, value));
        }
    }

    let mut placements = Vec::new();
    for r in 0..N {
        for c in 0..N {
            match puzzle[r as usize][c as usize] {
                0 => placements.extend((1..=N).map(|value| Placement { r, c, value })),
                value => placements.push(Placement { r, c, value }),
            }
        }
    }

    ProblemData::new(
        universe,
        placements.into_iter().map(|p| (p, p.constraints())),
    )
    .expect("every cell should contribute distinct placements")
}

/// Translates a solution back into a grid.
fn fill(solution: &Solution<Placement>) -> Grid {
    let mut grid = [[0; N as usize]; N as usize];
    for &Placement { r, c, value } in solution {
        grid[r as usize][c as usize] = value;
    }
    grid
}

fn print_grid(grid: &Grid) {
    for (r, row) in grid.iter().enumerate() {
        if r > 0 && r % B as usize == 0 {
            println!("------+-------+------");
        }
        let line: Vec<String> = row
            .chunks(B as usize)
            .map(|block| {
                block
                    .iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        println!("{}", line.join(" | "));
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let puzzle = match parse_puzzle(&args.puzzle) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let problem = sudoku_problem(&puzzle);
    let solutions = exact_cover_solver::solve(&problem, args.algorithm);
    match solutions.len() {
        0 => println!("the puzzle has no solution"),
        1 => println!("the puzzle has a unique solution"),
        count => println!("the puzzle has {count} solutions, showing the first"),
    }
    if let Some(solution) = solutions.first() {
        assert!(problem.is_exact_cover(solution));
        print_grid(&fill(solution));
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_puzzles() {
        let grid = parse_puzzle(WIKIPEDIA).unwrap();
        assert_eq!(grid[0], [5, 3, 0, 0, 7, 0, 0, 0, 0]);
        assert_eq!(grid[8], [0, 0, 0, 0, 8, 0, 0, 7, 9]);

        let zeros = WIKIPEDIA.replace('.', "0");
        assert_eq!(parse_puzzle(&zeros).unwrap(), grid);
    }

    #[test]
    fn rejects_malformed_puzzles() {
        assert_eq!(parse_puzzle("123"), Err(PuzzleError::Length(3)));
        let puzzle = format!("x{}", &WIKIPEDIA[1..]);
        assert_eq!(
            parse_puzzle(&puzzle),
            Err(PuzzleError::Cell {
                cell: 0,
                found: 'x'
            })
        );
    }

    #[test]
    fn completes_the_puzzle() {
        let puzzle = parse_puzzle(WIKIPEDIA).unwrap();
        let problem = sudoku_problem(&puzzle);
        for algorithm in Algorithm::ALL {
            let solutions = exact_cover_solver::solve(&problem, algorithm);
            assert_eq!(solutions.len(), 1, "{algorithm}");
            let grid = fill(&solutions[0]);
            assert_eq!(grid[0], [5, 3, 4, 6, 7, 8, 9, 1, 2]);
            assert_eq!(grid[8], [3, 4, 5, 2, 8, 6, 1, 7, 9]);
        }
    }

    #[test]
    fn conflicting_clues_have_no_solution() {
        let puzzle = format!("55{}", &WIKIPEDIA[2..]);
        let problem = sudoku_problem(&parse_puzzle(&puzzle).unwrap());
        assert!(exact_cover_solver::solve(&problem, Algorithm::DancingLinks).is_empty());
    }
}
