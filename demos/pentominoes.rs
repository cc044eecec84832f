//! This program counts the ways to pack the twelve pentominoes into a
//! rectangle of 60 squares: $3\times20$, $4\times15$, $5\times12$ or
//! $6\times10$. The exact cover problem has one element per piece, which says
//! that every piece is used once, and one element per square of the board.
//! Each subset is a placement of some piece in some orientation at some
//! offset, and it contains the name of the piece along with the five squares
//! that the placement occupies.
//!
//! Every one of these rectangles has four symmetries, and the V pentomino has
//! four orientations that those symmetries permute. Placing V in a single
//! orientation therefore yields every solution exactly once up to symmetry.
//!
//! ```text
//! cargo run --release --example pentominoes -- --height 5 --width 12 --algorithm DictX
//! ```
use clap::Parser;
use exact_cover_solver::{Algorithm, ProblemData};
use std::collections::HashSet;
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;

/// The supported boards, as `(height, width, packings)` triples. The last
/// entry is the number of packings up to symmetry.
const BOARDS: [(usize, usize, usize); 4] = [
    (3, 20, 2),
    (4, 15, 368),
    (5, 12, 1010),
    (6, 10, 2339),
];

#[derive(Parser, Debug)]
#[command(name = "pentominoes")]
#[command(about = "Count the packings of the twelve pentominoes into a rectangle")]
struct Args {
    /// Number of rows of the board
    #[arg(long, default_value_t = 6)]
    height: usize,

    /// Number of columns of the board
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Algorithm to search with (DLX or DictX)
    #[arg(short, long, default_value_t = Algorithm::DancingLinks)]
    algorithm: Algorithm,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot pack the pentominoes into a {height}x{width} board, expected one of: 3x20, 4x15, 5x12, 6x10")]
struct UnsupportedBoard {
    height: usize,
    width: usize,
}

/// A rectangle that the twelve pentominoes can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Board {
    height: usize,
    width: usize,
    /// The number of packings up to symmetry.
    packings: usize,
}

impl Board {
    fn new(height: usize, width: usize) -> Result<Self, UnsupportedBoard> {
        BOARDS
            .into_iter()
            .find(|&(h, w, _)| (h, w) == (height, width))
            .map(|(height, width, packings)| Board {
                height,
                width,
                packings,
            })
            .ok_or(UnsupportedBoard { height, width })
    }
}

type Shape = Vec<Vec<bool>>;

/// The twelve pentominoes in their base orientations, with `#` marking the
/// occupied squares.
const PIECES: [(char, &[&str]); 12] = [
    ('V', &["..#", "..#", "###"]),
    ('U', &["#.#", "###"]),
    ('X', &[".#.", "###", ".#."]),
    ('T', &["#..", "###", "#.."]),
    ('Y', &["####", ".#.."]),
    ('I', &["#####"]),
    ('F', &[".#.", "##.", ".##"]),
    ('P', &["###", "##."]),
    ('W', &["##.", ".##", "..#"]),
    ('Z', &["#..", "###", "..#"]),
    ('N', &["##..", ".###"]),
    ('L', &["####", "#..."]),
];

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
enum Cell {
    Piece(char),
    Square(usize, usize),
}

/// A piece in a given orientation, with its upper left corner at square
/// `(x, y)` of the board.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
struct Placement {
    piece: char,
    orientation: usize,
    x: usize,
    y: usize,
}

fn parse_shape(rows: &[&str]) -> Shape {
    rows.iter()
        .map(|row| row.chars().map(|c| c == '#').collect())
        .collect()
}

fn transpose(shape: &Shape) -> Shape {
    (0..shape[0].len())
        .map(|j| shape.iter().map(|row| row[j]).collect())
        .collect()
}

fn flip_left_right(shape: &Shape) -> Shape {
    shape
        .iter()
        .map(|row| row.iter().rev().copied().collect())
        .collect()
}

fn flip_up_down(shape: &Shape) -> Shape {
    shape.iter().rev().cloned().collect()
}

/// Lists the distinct orientations of a piece, obtained by transposing and
/// flipping its base shape.
fn orientations(name: char, base: Shape) -> Vec<Shape> {
    if name == 'V' {
        return vec![base];
    }
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    let transposed = transpose(&base);
    for shape in [base, transposed] {
        let mirrored = flip_left_right(&shape);
        for shape in [shape, mirrored] {
            let flipped = flip_up_down(&shape);
            for shape in [shape, flipped] {
                if seen.insert(shape.clone()) {
                    result.push(shape);
                }
            }
        }
    }
    result
}

/// Returns the squares covered by `shape` when its upper left corner lies at
/// `(x, y)`, provided that they all fit on the board.
fn squares(board: Board, shape: &Shape, x: usize, y: usize) -> Option<Vec<Cell>> {
    if x + shape.len() > board.height || y + shape[0].len() > board.width {
        return None;
    }
    let cells = shape
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &occupied)| occupied)
                .map(move |(j, _)| Cell::Square(x + i, y + j))
        })
        .collect();
    Some(cells)
}

/// Sets up the exact cover problem of packing the pentominoes into `board`.
fn packing_problem(board: Board) -> ProblemData<Cell, Placement> {
    let Board { height, width, .. } = board;
    let universe: Vec<_> = PIECES
        .iter()
        .map(|&(name, _)| Cell::Piece(name))
        .chain((0..height).flat_map(|x| (0..width).map(move |y| Cell::Square(x, y))))
        .collect();

    let mut placements = Vec::new();
    for &(piece, rows) in &PIECES {
        for (orientation, shape) in orientations(piece, parse_shape(rows))
            .into_iter()
            .enumerate()
        {
            for x in 0..height {
                for y in 0..width {
                    if let Some(mut cells) = squares(board, &shape, x, y) {
                        cells.insert(0, Cell::Piece(piece));
                        let id = Placement {
                            piece,
                            orientation,
                            x,
                            y,
                        };
                        placements.push((id, cells));
                    }
                }
            }
        }
    }
    log::debug!("{} placements of 12 pentominoes", placements.len());
    ProblemData::new(universe, placements).expect("every placement should lie on the board")
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let board = match Board::new(args.height, args.width) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let problem = packing_problem(board);
    let start = Instant::now();
    let solutions = exact_cover_solver::solve(&problem, args.algorithm);
    println!(
        "{}: {} packings of a {}x{} rectangle in {:?}",
        args.algorithm,
        solutions.len(),
        board.height,
        board.width,
        start.elapsed()
    );
    assert_eq!(solutions.len(), board.packings);

    // Draw the first packing.
    if let Some(solution) = solutions.first() {
        let mut grid = vec![vec!['.'; board.width]; board.height];
        for (placement, cells) in problem.subsets_of(solution) {
            for cell in cells {
                if let Cell::Square(x, y) = *cell {
                    grid[x][y] = placement.piece;
                }
            }
        }
        for row in grid {
            println!("{}", row.into_iter().collect::<String>());
        }
    }
    ExitCode::SUCCESS
}
