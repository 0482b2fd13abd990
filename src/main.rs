use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;

use u_localsearch::ga::{GaConfig, GaRunner};
use u_localsearch::hc::{HcConfig, HcRunner};
use u_localsearch::puzzle::{self, NeighborDomain, PuzzleEvolutionaryProblem, PuzzleProblem};
use u_localsearch::space::EvolutionaryProblemSpace;
use u_localsearch::SearchError;

/// Solve a Latin-square puzzle with hill climbing or a genetic algorithm
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Puzzle file; asked for on stdin when omitted
    path: Option<PathBuf>,

    /// `hc` or `ga`; asked for on stdin when omitted
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Hill climbing: restarts after the first climb
    #[arg(long, default_value_t = 10)]
    max_restarts: usize,

    /// Hill climbing: only try values 1..=K for neighbors
    #[arg(long, value_name = "K")]
    neighbor_values: Option<u32>,

    /// GA: population size
    #[arg(long, default_value_t = 10)]
    population: usize,

    /// GA: generation cap
    #[arg(long, default_value_t = 10_000)]
    max_generations: usize,

    /// GA: wall-clock limit in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy)]
enum Algorithm {
    HillClimb,
    Genetic,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hc" => Ok(Self::HillClimb),
            "ga" => Ok(Self::Genetic),
            _ => Err(format!("Unknown algorithm: {}", s)),
        }
    }
}

fn main() -> ExitCode {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_module_path(false)
        .init();

    let args = Args::parse();

    let algorithm = match args.algorithm.clone().map_or_else(|| prompt("hc/ga?> "), Ok) {
        Ok(answer) => answer,
        Err(e) => return fail(&e),
    };
    let Ok(algorithm) = algorithm.parse::<Algorithm>() else {
        eprintln!("Invalid option");
        return ExitCode::from(1);
    };

    let path = match args
        .path
        .clone()
        .map_or_else(|| prompt("file location?> ").map(PathBuf::from), Ok)
    {
        Ok(path) => path,
        Err(e) => return fail(&e),
    };

    match run(&args, algorithm, path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn run(args: &Args, algorithm: Algorithm, path: PathBuf) -> Result<(), SearchError> {
    let grid = puzzle::load(&path)?;

    let report = match algorithm {
        Algorithm::HillClimb => {
            let mut problem = PuzzleProblem::new(grid);
            if let Some(k) = args.neighbor_values {
                problem = problem.with_neighbor_domain(NeighborDomain::Fixed(k));
            }
            let mut config = HcConfig::default().with_max_restarts(args.max_restarts);
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }

            let result = HcRunner::run(&problem, &config);
            format!(
                "Final value: {}\nBoard:\n{}",
                result.best_score,
                problem.solution(&result.best)
            )
        }
        Algorithm::Genetic => {
            let problem = PuzzleEvolutionaryProblem::from_grid(grid);
            let mut config = GaConfig::default()
                .with_population_size(args.population)
                .with_max_generations(args.max_generations);
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }
            if let Some(ms) = args.time_limit_ms {
                config = config.with_time_limit_ms(ms);
            }

            let result = GaRunner::run(&problem, &config)?;
            if !result.converged {
                log::warn!("no solution found; showing the fittest board");
            }
            format!(
                "Fitness value: {}\nBoard:\n{}",
                problem.fitness(&result.best),
                problem.base().solution(&result.best)
            )
        }
    };

    println!();
    print!("{report}");
    Ok(())
}

fn prompt(label: &str) -> Result<String, SearchError> {
    let stdin_error = |source| SearchError::Io {
        path: PathBuf::from("<stdin>"),
        source,
    };

    print!("{label}");
    io::stdout().flush().map_err(stdin_error)?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).map_err(stdin_error)?;
    Ok(line.trim().to_owned())
}

fn fail(err: &SearchError) -> ExitCode {
    eprintln!("Error: {}", err);
    ExitCode::from(1)
}
