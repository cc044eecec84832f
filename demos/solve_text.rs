//! Solves an exact cover problem over the integers given on the command line.
//!
//! ```text
//! cargo run --example solve_text -- --universe 1,2,3,4,5,6,7 \
//!     --subsets "1,4,7; 1,4; 4,5,7; 3,5,6; 2,3,6,7; 2,7" --algorithm DictX
//! ```
//!
//! Each solution is printed on its own line as the positions of its subsets
//! in the collection, followed by their contents.
use clap::Parser;
use exact_cover_solver::{Algorithm, ProblemData};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "solve_text")]
#[command(about = "Find every exact cover of a universe of integers")]
struct Args {
    /// Elements of the universe, separated by commas
    #[arg(short, long, value_name = "LIST")]
    universe: String,

    /// Subsets of the universe, separated by semicolons
    #[arg(short, long, value_name = "LISTS")]
    subsets: String,

    /// Algorithm to search with (DLX or DictX)
    #[arg(short, long, default_value_t = Algorithm::DancingLinks)]
    algorithm: Algorithm,

    /// Only print the number of solutions
    #[arg(short, long)]
    count: bool,
}

fn run(args: &Args) -> Result<(), exact_cover_solver::Error> {
    let problem = ProblemData::parse(&args.universe, &args.subsets)?;
    log::info!(
        "solving {} subsets over {} elements with {}",
        problem.subset_count(),
        problem.universe().len(),
        args.algorithm
    );
    let matrix = args.algorithm.build(&problem);
    let solutions = args.algorithm.solve(matrix)?;
    if args.count {
        println!("{}", solutions.len());
        return Ok(());
    }
    if solutions.is_empty() {
        println!("no solutions");
    }
    for solution in &solutions {
        let subsets: Vec<String> = problem
            .subsets_of(solution)
            .map(|(id, subset)| {
                let elements: Vec<String> = subset.iter().map(i64::to_string).collect();
                format!("{id}:{{{}}}", elements.join(","))
            })
            .collect();
        println!("{}", subsets.join(" "));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
